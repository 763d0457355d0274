pub mod error;
pub mod text_utils;

pub use error::{Result, SharpenError};
