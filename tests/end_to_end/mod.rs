//! End-to-end tests: outline → build → organize → render, and the
//! document workflow over fixture collaborators.

pub mod tests_pipeline;
pub mod tests_workflow;
