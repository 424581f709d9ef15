//! # Verdict
//!
//! A JSON Schema validation engine that accumulates ALL violations,
//! annotating each with the path at which it occurred rather than stopping
//! at the first failure.
//!
//! ## Overview
//!
//! Callers supply two already-parsed generic trees: a schema document and a
//! data document. [`SchemaNode::build`] turns the schema tree into a typed,
//! immutable-after-construction node tree; [`expand`] resolves any `$ref`
//! placeholders in place; [`validate`] then walks schema and data in
//! lockstep, applying the full constraint set (type, enum, combinators,
//! array, numeric, object and string keywords plus pattern-based format
//! checks) and collecting one diagnostic per violation. Error accumulation
//! uses stillwater's `Validation` type.
//!
//! Self-referential schemas are safe: a per-invocation visited set detects
//! validation loops and reports them as diagnostics instead of recursing
//! forever.
//!
//! ## Core Types
//!
//! - [`SchemaNode`]: one constraint-bearing unit of the schema tree
//! - [`JsonPath`]: a `#`-rooted pointer to a value in the data tree
//! - [`ValidationError`]: a single diagnostic (schema identity, path, message)
//! - [`ValidationErrors`]: a non-empty, ordered collection of diagnostics
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use verdict::{validate, SchemaNode};
//!
//! let schema = SchemaNode::build(&json!({
//!     "type": "object",
//!     "properties": {
//!         "name": {"type": "string", "minLength": 1},
//!         "age": {"type": "integer", "minimum": 0}
//!     },
//!     "required": ["name"]
//! }))
//! .unwrap();
//!
//! assert!(validate(&schema, &json!({"name": "Ada", "age": 36})).is_success());
//!
//! // Invalid values produce one diagnostic per violation, with paths.
//! let result = validate(&schema, &json!({"name": "", "age": -1}));
//! assert!(result.is_failure());
//! ```

pub mod error;
pub mod expand;
pub mod format;
pub mod path;
pub mod schema;
pub mod store;
pub mod validator;

pub use error::{ValidationError, ValidationErrors};
pub use expand::{expand, expand_with_store, ExpandError};
pub use format::Format;
pub use path::{JsonPath, PathSegment};
pub use schema::{
    AdditionalProperties, BuildError, Dependency, Items, SchemaNode, SchemaType,
};
pub use store::{SchemaStore, StoreError};
pub use validator::{validate, validate_batch, validate_or_fail};

/// Type alias for validation results using ValidationErrors
pub type ValidationResult<T> = stillwater::Validation<T, ValidationErrors>;
