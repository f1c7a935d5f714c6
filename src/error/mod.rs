//! Error handling for the harness
//!
//! This module defines error types and handling patterns used throughout the application.

pub mod formatting;
pub mod types;

pub use formatting::{error_chain, format_error, format_error_for_logging};
pub use types::{Error, Result};
