//! A thread-safe store of named schema documents.
//!
//! The store maps base URIs to schema tree roots so the reference expander
//! can resolve cross-document `$ref` targets.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::schema::SchemaNode;

/// Type alias for the document storage map.
type DocumentMap = Arc<RwLock<HashMap<String, Arc<SchemaNode>>>>;

/// A thread-safe registry of schema documents keyed by base URI.
///
/// Multiple threads can resolve concurrently (read access); registration is
/// serialized (write access). Cloning the store produces another handle to
/// the same documents.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{SchemaNode, SchemaStore};
///
/// let store = SchemaStore::new();
/// let address = SchemaNode::build_with_uri(
///     &json!({"type": "object"}),
///     "http://example.com/address",
/// )
/// .unwrap();
///
/// store.register("http://example.com/address", address).unwrap();
/// assert!(store.contains("http://example.com/address"));
/// ```
pub struct SchemaStore {
    documents: DocumentMap,
}

impl SchemaStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a schema document under the given base URI.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateUri` if the URI is already registered.
    pub fn register(
        &self,
        uri: impl Into<String>,
        root: Arc<SchemaNode>,
    ) -> Result<(), StoreError> {
        let uri = uri.into();
        let mut documents = self.documents.write();

        if documents.contains_key(&uri) {
            return Err(StoreError::DuplicateUri(uri));
        }

        documents.insert(uri, root);
        Ok(())
    }

    /// Retrieves a document root by base URI.
    pub fn get(&self, uri: &str) -> Option<Arc<SchemaNode>> {
        self.documents.read().get(uri).cloned()
    }

    /// Returns true if a document is registered under the given base URI.
    pub fn contains(&self, uri: &str) -> bool {
        self.documents.read().contains_key(uri)
    }
}

impl Default for SchemaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SchemaStore {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
        }
    }
}

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Attempted to register a document under a URI that already exists.
    #[error("document '{0}' already registered")]
    DuplicateUri(String),
}
