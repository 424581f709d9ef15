//! Error types for validation failures.
//!
//! This module provides types for representing validation diagnostics with
//! the schema identity, path, and message of each failed constraint.

mod validation_error;

pub use validation_error::{ValidationError, ValidationErrors};
