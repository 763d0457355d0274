//! Shared fixtures and assertions for integration tests.

#![allow(dead_code)]

pub mod outline_fixtures;
pub mod symbol_assertions;
