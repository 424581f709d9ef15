//! Reference expansion: replacing `$ref` placeholder nodes with their
//! resolution target's attributes.
//!
//! Expansion is a shallow attribute copy: the reference node receives the
//! target's attributes with children shared, while keeping its own pointer
//! and parent identity. After expansion a node may be reachable from itself
//! through `not`, `allOf` and friends; the validator's loop guard tolerates
//! that, which is why identity preservation matters. The validation engine
//! itself assumes it never encounters an unexpanded reference.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::schema::SchemaNode;
use crate::store::SchemaStore;

/// Errors produced while expanding references.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    /// A `$ref` named a document or fragment that could not be found.
    #[error("unresolved reference '{0}'")]
    Unresolved(String),

    /// A chain of references reached itself without ever hitting a
    /// concrete schema.
    #[error("reference cycle through '{0}'")]
    Cycle(String),
}

/// Expands every reference reachable from `root`, resolving in-document
/// `#`/`#/...` pointers only.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{expand, validate, SchemaNode};
///
/// let schema = SchemaNode::build(&json!({
///     "properties": {"name": {"$ref": "#/definitions/short"}},
///     "definitions": {"short": {"type": "string", "maxLength": 8}}
/// }))
/// .unwrap();
/// expand(&schema).unwrap();
///
/// assert!(validate(&schema, &json!({"name": "ok"})).is_success());
/// assert!(validate(&schema, &json!({"name": "far too long"})).is_failure());
/// ```
pub fn expand(root: &Arc<SchemaNode>) -> Result<(), ExpandError> {
    expand_with_store(root, &SchemaStore::new())
}

/// Expands every reference reachable from `root`, resolving cross-document
/// references through the store.
///
/// References take the form `uri`, `uri#/path`, `#` or `#/path`; the
/// fragment is resolved against the named document's pointer space.
/// Documents pulled in from the store are expanded too, since their nodes
/// become reachable from `root` through the shared children.
pub fn expand_with_store(root: &Arc<SchemaNode>, store: &SchemaStore) -> Result<(), ExpandError> {
    let mut expander = Expander {
        store,
        index: HashMap::new(),
        worklist: Vec::new(),
    };
    expander.index_document(root);

    // The worklist grows as cross-document targets are pulled in.
    let mut position = 0;
    while position < expander.worklist.len() {
        let node = Arc::clone(&expander.worklist[position]);
        position += 1;

        if node.reference().is_some() {
            let target = expander.resolve_chain(&node)?;
            node.copy_attributes_from(&target);
        }
    }

    Ok(())
}

struct Expander<'a> {
    store: &'a SchemaStore,
    /// Every known node by canonical pointer, across all indexed documents.
    index: HashMap<String, Arc<SchemaNode>>,
    worklist: Vec<Arc<SchemaNode>>,
}

impl Expander<'_> {
    fn index_document(&mut self, root: &Arc<SchemaNode>) {
        if self.index.contains_key(root.pointer()) {
            return;
        }
        self.index
            .insert(root.pointer().to_string(), Arc::clone(root));
        self.worklist.push(Arc::clone(root));
        for child in root.children() {
            self.index_document(&child);
        }
    }

    /// Chases reference-to-reference chains until a concrete node, erroring
    /// on pure reference cycles.
    fn resolve_chain(&mut self, node: &Arc<SchemaNode>) -> Result<Arc<SchemaNode>, ExpandError> {
        let mut seen = HashSet::new();
        let mut current = Arc::clone(node);

        while let Some(reference) = current.reference() {
            if !seen.insert(current.pointer().to_string()) {
                return Err(ExpandError::Cycle(reference));
            }
            current = self.resolve(&reference, &current)?;
        }

        Ok(current)
    }

    fn resolve(
        &mut self,
        reference: &str,
        from: &SchemaNode,
    ) -> Result<Arc<SchemaNode>, ExpandError> {
        let (base, fragment) = match reference.find('#') {
            Some(position) => (&reference[..position], &reference[position + 1..]),
            None => (reference, ""),
        };

        let prefix = if base.is_empty() {
            // In-document reference: resolve against the referencing node's
            // own document base.
            document_prefix(from).to_string()
        } else {
            let document = self
                .store
                .get(base)
                .ok_or_else(|| ExpandError::Unresolved(reference.to_string()))?;
            self.index_document(&document);
            document.pointer().to_string()
        };

        self.index
            .get(&format!("{}{}", prefix, fragment))
            .cloned()
            .ok_or_else(|| ExpandError::Unresolved(reference.to_string()))
    }
}

/// The node's pointer up to and including the `#` separating base URI from
/// fragment.
fn document_prefix(node: &SchemaNode) -> &str {
    match node.pointer().find('#') {
        Some(position) => &node.pointer()[..=position],
        None => node.pointer(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_in_document_expansion() {
        let schema = SchemaNode::build(&json!({
            "properties": {"id": {"$ref": "#/definitions/id"}},
            "definitions": {"id": {"type": "integer", "minimum": 1}}
        }))
        .unwrap();

        expand(&schema).unwrap();

        let id = schema.properties()["id"].clone();
        assert!(id.reference().is_none());
        assert_eq!(id.types(), schema.definitions()["id"].types());
        // Identity is preserved; only attributes were copied.
        assert_eq!(id.pointer(), "#/properties/id");
        assert_eq!(id.parent().unwrap().pointer(), "#");
    }

    #[test]
    fn test_reference_chain() {
        let schema = SchemaNode::build(&json!({
            "properties": {"a": {"$ref": "#/definitions/b"}},
            "definitions": {
                "b": {"$ref": "#/definitions/c"},
                "c": {"type": "boolean"}
            }
        }))
        .unwrap();

        expand(&schema).unwrap();

        let a = schema.properties()["a"].clone();
        assert!(a.reference().is_none());
        assert_eq!(a.types(), schema.definitions()["c"].types());
    }

    #[test]
    fn test_pure_reference_cycle_is_an_error() {
        let schema = SchemaNode::build(&json!({
            "definitions": {
                "ping": {"$ref": "#/definitions/pong"},
                "pong": {"$ref": "#/definitions/ping"}
            }
        }))
        .unwrap();

        assert!(matches!(expand(&schema), Err(ExpandError::Cycle(_))));
    }

    #[test]
    fn test_unresolved_reference() {
        let schema = SchemaNode::build(&json!({
            "properties": {"a": {"$ref": "#/definitions/missing"}}
        }))
        .unwrap();

        assert!(matches!(expand(&schema), Err(ExpandError::Unresolved(_))));
    }

    #[test]
    fn test_self_reference_shares_children() {
        let schema = SchemaNode::build(&json!({
            "not": {"$ref": "#"}
        }))
        .unwrap();

        expand(&schema).unwrap();

        // The expanded `not` child carries the root's attributes; its own
        // `not` is itself.
        let not = schema.not().unwrap();
        assert_eq!(not.pointer(), "#/not");
        assert_eq!(not.not().unwrap().pointer(), "#/not");
    }

    #[test]
    fn test_cross_document_expansion() {
        let store = SchemaStore::new();
        let address = SchemaNode::build_with_uri(
            &json!({"type": "object", "required": ["city"]}),
            "http://example.com/address",
        )
        .unwrap();
        store
            .register("http://example.com/address", address)
            .unwrap();

        let person = SchemaNode::build(&json!({
            "properties": {"home": {"$ref": "http://example.com/address#"}}
        }))
        .unwrap();

        expand_with_store(&person, &store).unwrap();

        let home = person.properties()["home"].clone();
        assert!(home.reference().is_none());
        assert_eq!(home.required(), vec!["city".to_string()]);
    }

    #[test]
    fn test_unknown_document() {
        let person = SchemaNode::build(&json!({
            "properties": {"home": {"$ref": "http://example.com/nowhere#"}}
        }))
        .unwrap();

        assert!(matches!(
            expand(&person),
            Err(ExpandError::Unresolved(_))
        ));
    }
}
