//! Validation diagnostic types.
//!
//! This module provides [`ValidationError`] for single constraint failures
//! and [`ValidationErrors`] for accumulating multiple diagnostics.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;
use crate::schema::SchemaNode;

/// A single validation diagnostic.
///
/// `ValidationError` records which schema node rejected the data, where in
/// the data tree the rejection happened, and why:
/// - **schema_pointer**: the canonical pointer of the failing schema node
/// - **path**: where in the data structure the failure occurred
/// - **message**: human-readable description of the failure
/// - **code**: machine-readable code for programmatic handling
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{JsonPath, SchemaNode, ValidationError};
///
/// let schema = SchemaNode::build(&json!({"type": "string"})).unwrap();
/// let error = ValidationError::new(
///     &schema,
///     JsonPath::root().push_field("email"),
///     "expected string, got 5",
/// )
/// .with_code("invalid_type");
///
/// assert_eq!(error.schema_pointer, "#");
/// assert_eq!(error.code, "invalid_type");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Canonical pointer of the schema node whose constraint failed.
    pub schema_pointer: String,
    /// The path to the data value that failed validation.
    pub path: JsonPath,
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable error code (e.g., `min_length`).
    pub code: String,
}

impl ValidationError {
    /// Creates a new diagnostic for the given schema node, path, and message.
    ///
    /// The error code defaults to "validation_error". Use `with_code` to set
    /// a more specific code.
    pub fn new(schema: &SchemaNode, path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            schema_pointer: schema.pointer().to_string(),
            path,
            message: message.into(),
            code: "validation_error".to_string(),
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl std::error::Error for ValidationError {}

// ValidationError is Send + Sync since all fields are owned types.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// A non-empty, ordered collection of validation diagnostics.
///
/// `ValidationErrors` wraps a `NonEmptyVec<ValidationError>` to guarantee
/// that at least one diagnostic is present. This is essential for use with
/// `Validation<T, ValidationErrors>` since a failure must carry at least one
/// error. Order is the traversal order in which the checks executed.
///
/// # Combining Errors
///
/// `ValidationErrors` implements `Semigroup`, allowing diagnostics from
/// multiple validations to be combined:
///
/// ```rust
/// use serde_json::json;
/// use stillwater::prelude::*;
/// use verdict::{JsonPath, SchemaNode, ValidationError, ValidationErrors};
///
/// let schema = SchemaNode::build(&json!({})).unwrap();
/// let errors1 = ValidationErrors::single(ValidationError::new(
///     &schema,
///     JsonPath::root().push_field("name"),
///     "required",
/// ));
/// let errors2 = ValidationErrors::single(ValidationError::new(
///     &schema,
///     JsonPath::root().push_field("email"),
///     "invalid format",
/// ));
///
/// let combined = errors1.combine(errors2);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Creates a `ValidationErrors` containing a single diagnostic.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `ValidationErrors` from a `NonEmptyVec` of diagnostics.
    pub fn from_non_empty(errors: NonEmptyVec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Returns the number of diagnostics in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false since this collection is guaranteed non-empty.
    ///
    /// This method exists for API consistency but always returns false.
    pub fn is_empty(&self) -> bool {
        false // NonEmptyVec is never empty
    }

    /// Returns an iterator over the contained diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns all diagnostics at the specified path.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all diagnostics with the specified error code.
    pub fn with_code(&self, code: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first diagnostic in the collection.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<ValidationError>`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }

    /// Creates a `ValidationErrors` from a `Vec<ValidationError>`.
    ///
    /// # Panics
    ///
    /// Panics if the provided vec is empty. Use this when you are certain
    /// the vec contains at least one diagnostic.
    pub fn from_vec(errors: Vec<ValidationError>) -> Self {
        Self(NonEmptyVec::from_vec(errors).expect("ValidationErrors requires at least one error"))
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Aggregate message: every diagnostic, space-joined.
        for (i, error) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

// ValidationErrors is Send + Sync since it only contains ValidationError.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};
