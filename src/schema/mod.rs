//! The schema tree: typed keyword data, no validation logic.
//!
//! This module provides [`SchemaNode`], an immutable-after-construction tree
//! of JSON Schema keywords, together with the typed attribute enums
//! ([`SchemaType`], [`Items`], [`AdditionalProperties`], [`Dependency`]) and
//! the [`SchemaNode::build`] constructor that turns an already-parsed
//! `serde_json::Value` into a schema tree.
//!
//! No validation logic lives here; the engine in [`crate::validator`] walks
//! this tree through the accessor methods.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use verdict::SchemaNode;
//!
//! let schema = SchemaNode::build(&json!({
//!     "type": "object",
//!     "properties": {
//!         "name": {"type": "string", "minLength": 1}
//!     },
//!     "required": ["name"]
//! }))
//! .unwrap();
//!
//! assert_eq!(schema.pointer(), "#");
//! assert_eq!(schema.properties()["name"].pointer(), "#/properties/name");
//! ```

mod build;
mod node;

pub use build::BuildError;
pub use node::{AdditionalProperties, Dependency, Items, SchemaNode, SchemaType};
