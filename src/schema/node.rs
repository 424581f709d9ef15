//! The schema node aggregate and its attribute accessors.

use std::fmt;
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::RwLock;
use regex::Regex;
use serde_json::{Number, Value};

use crate::format::Format;

/// A primitive type tag allowed by the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl SchemaType {
    /// Parses a JSON Schema type keyword, returning None for unknown tags.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(SchemaType::Null),
            "boolean" => Some(SchemaType::Boolean),
            "integer" => Some(SchemaType::Integer),
            "number" => Some(SchemaType::Number),
            "string" => Some(SchemaType::String),
            "array" => Some(SchemaType::Array),
            "object" => Some(SchemaType::Object),
            _ => None,
        }
    }

    /// Returns the JSON Schema keyword for this type tag.
    pub fn name(&self) -> &'static str {
        match self {
            SchemaType::Null => "null",
            SchemaType::Boolean => "boolean",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::String => "string",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }

    /// Returns true if the value's runtime kind satisfies this type tag.
    ///
    /// `integer` and `number` are not disjoint: a value classified as an
    /// integer also satisfies `number`.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            SchemaType::Null => value.is_null(),
            SchemaType::Boolean => value.is_boolean(),
            SchemaType::Integer => value.is_i64() || value.is_u64(),
            SchemaType::Number => value.is_number(),
            SchemaType::String => value.is_string(),
            SchemaType::Array => value.is_array(),
            SchemaType::Object => value.is_object(),
        }
    }
}

/// The `items` keyword: a single schema applied to every element (list
/// validation) or an ordered list of schemas applied positionally (tuple
/// validation).
#[derive(Debug, Clone)]
pub enum Items {
    List(Arc<SchemaNode>),
    Tuple(Vec<Arc<SchemaNode>>),
}

/// The `additionalProperties` keyword: a boolean or a schema applied to
/// every key not covered by `properties`/`patternProperties`.
#[derive(Debug, Clone)]
pub enum AdditionalProperties {
    /// Extra keys always pass (the default).
    Allow,
    /// Any extra key is a violation.
    Deny,
    /// Every extra key's value is validated against this schema.
    Schema(Arc<SchemaNode>),
}

/// One entry of the `dependencies` keyword.
#[derive(Debug, Clone)]
pub enum Dependency {
    /// Co-required property names, checked when the key is present.
    Keys(Vec<String>),
    /// A schema the whole object must satisfy when the key is present.
    Schema(Arc<SchemaNode>),
}

/// The full keyword set of one schema node.
///
/// List-valued and map-valued attributes default to empty containers, never
/// to an absent marker, so traversal code needs no null-checks. The boolean
/// keywords carry their defined defaults regardless of whether the keyword
/// was present in the source document.
#[derive(Clone)]
pub(crate) struct Attributes {
    pub reference: Option<String>,

    pub types: Vec<SchemaType>,
    pub enum_values: Option<Vec<Value>>,
    pub all_of: Vec<Arc<SchemaNode>>,
    pub any_of: Vec<Arc<SchemaNode>>,
    pub one_of: Vec<Arc<SchemaNode>>,
    pub not: Option<Arc<SchemaNode>>,

    pub items: Option<Items>,
    pub additional_items: bool,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub unique_items: bool,

    pub minimum: Option<Number>,
    pub maximum: Option<Number>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub multiple_of: Option<Number>,

    pub properties: IndexMap<String, Arc<SchemaNode>>,
    pub pattern_properties: Vec<(Regex, Arc<SchemaNode>)>,
    pub additional_properties: AdditionalProperties,
    pub required: Vec<String>,
    pub dependencies: IndexMap<String, Dependency>,
    pub min_properties: Option<usize>,
    pub max_properties: Option<usize>,
    pub strict_properties: bool,

    pub pattern: Option<Regex>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub format: Option<Format>,

    pub definitions: IndexMap<String, Arc<SchemaNode>>,

    // Hyper-schema attributes, carried but never evaluated.
    pub links: Vec<Value>,
    pub media: Option<Value>,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            reference: None,
            types: Vec::new(),
            enum_values: None,
            all_of: Vec::new(),
            any_of: Vec::new(),
            one_of: Vec::new(),
            not: None,
            items: None,
            additional_items: true,
            min_items: None,
            max_items: None,
            unique_items: false,
            minimum: None,
            maximum: None,
            exclusive_minimum: false,
            exclusive_maximum: false,
            multiple_of: None,
            properties: IndexMap::new(),
            pattern_properties: Vec::new(),
            additional_properties: AdditionalProperties::Allow,
            required: Vec::new(),
            dependencies: IndexMap::new(),
            min_properties: None,
            max_properties: None,
            strict_properties: false,
            pattern: None,
            min_length: None,
            max_length: None,
            format: None,
            definitions: IndexMap::new(),
            links: Vec::new(),
            media: None,
        }
    }
}

/// One constraint-bearing unit of the schema tree.
///
/// A node is identified by its `pointer` (canonical URI plus JSON-Pointer
/// fragment); two nodes with the same pointer are the same schema identity
/// for loop detection. Children are owned exclusively by their containing
/// node; `parent` is a navigation-only back-reference and never an ownership
/// edge.
///
/// Nodes are constructed once (during [`SchemaNode::build`] and reference
/// expansion) and read-only during validation, so the same tree may be
/// validated concurrently against independent data inputs.
pub struct SchemaNode {
    pointer: String,
    parent: RwLock<Weak<SchemaNode>>,
    attrs: RwLock<Attributes>,
}

impl SchemaNode {
    /// Creates a node with the given pointer, no parent, and all attributes
    /// at their defaults. Used by the builder before attributes are filled in.
    pub(crate) fn bare(pointer: String) -> Arc<Self> {
        Arc::new(Self {
            pointer,
            parent: RwLock::new(Weak::new()),
            attrs: RwLock::new(Attributes::default()),
        })
    }

    pub(crate) fn set_parent(&self, parent: &Arc<SchemaNode>) {
        *self.parent.write() = Arc::downgrade(parent);
    }

    pub(crate) fn set_attributes(&self, attrs: Attributes) {
        *self.attrs.write() = attrs;
    }

    /// Overwrites this node's attributes with a shallow copy of the target's.
    ///
    /// Children are shared, not cloned, so an expanded self-referential
    /// schema reaches the same child nodes as its target. The node keeps its
    /// own pointer and parent, which is what keeps pointer-based loop
    /// detection correct after expansion.
    pub fn copy_attributes_from(&self, target: &SchemaNode) {
        let copied = target.attrs.read().clone();
        *self.attrs.write() = copied;
    }

    /// The canonical URI + JSON-Pointer fragment identifying this node.
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    /// The containing node, or None for a root node.
    pub fn parent(&self) -> Option<Arc<SchemaNode>> {
        self.parent.read().upgrade()
    }

    /// The unresolved `$ref` target, present only before expansion.
    pub fn reference(&self) -> Option<String> {
        self.attrs.read().reference.clone()
    }

    /// Allowed primitive type tags; empty means unconstrained.
    pub fn types(&self) -> Vec<SchemaType> {
        self.attrs.read().types.clone()
    }

    /// Allowed literal values; None means unconstrained.
    pub fn enum_values(&self) -> Option<Vec<Value>> {
        self.attrs.read().enum_values.clone()
    }

    pub fn all_of(&self) -> Vec<Arc<SchemaNode>> {
        self.attrs.read().all_of.clone()
    }

    pub fn any_of(&self) -> Vec<Arc<SchemaNode>> {
        self.attrs.read().any_of.clone()
    }

    pub fn one_of(&self) -> Vec<Arc<SchemaNode>> {
        self.attrs.read().one_of.clone()
    }

    pub fn not(&self) -> Option<Arc<SchemaNode>> {
        self.attrs.read().not.clone()
    }

    pub fn items(&self) -> Option<Items> {
        self.attrs.read().items.clone()
    }

    /// Whether surplus elements are allowed under tuple validation.
    /// Defaults to true.
    pub fn additional_items(&self) -> bool {
        self.attrs.read().additional_items
    }

    pub fn min_items(&self) -> Option<usize> {
        self.attrs.read().min_items
    }

    pub fn max_items(&self) -> Option<usize> {
        self.attrs.read().max_items
    }

    /// Defaults to false.
    pub fn unique_items(&self) -> bool {
        self.attrs.read().unique_items
    }

    pub fn minimum(&self) -> Option<Number> {
        self.attrs.read().minimum.clone()
    }

    pub fn maximum(&self) -> Option<Number> {
        self.attrs.read().maximum.clone()
    }

    /// Defaults to false.
    pub fn exclusive_minimum(&self) -> bool {
        self.attrs.read().exclusive_minimum
    }

    /// Defaults to false.
    pub fn exclusive_maximum(&self) -> bool {
        self.attrs.read().exclusive_maximum
    }

    pub fn multiple_of(&self) -> Option<Number> {
        self.attrs.read().multiple_of.clone()
    }

    /// Declared properties in declaration order.
    pub fn properties(&self) -> IndexMap<String, Arc<SchemaNode>> {
        self.attrs.read().properties.clone()
    }

    /// Compiled pattern properties in declaration order.
    pub fn pattern_properties(&self) -> Vec<(Regex, Arc<SchemaNode>)> {
        self.attrs.read().pattern_properties.clone()
    }

    /// Defaults to [`AdditionalProperties::Allow`].
    pub fn additional_properties(&self) -> AdditionalProperties {
        self.attrs.read().additional_properties.clone()
    }

    pub fn required(&self) -> Vec<String> {
        self.attrs.read().required.clone()
    }

    pub fn dependencies(&self) -> IndexMap<String, Dependency> {
        self.attrs.read().dependencies.clone()
    }

    pub fn min_properties(&self) -> Option<usize> {
        self.attrs.read().min_properties
    }

    pub fn max_properties(&self) -> Option<usize> {
        self.attrs.read().max_properties
    }

    /// Defaults to false. When true the object must contain exactly the
    /// declared properties.
    pub fn strict_properties(&self) -> bool {
        self.attrs.read().strict_properties
    }

    pub fn pattern(&self) -> Option<Regex> {
        self.attrs.read().pattern.clone()
    }

    pub fn min_length(&self) -> Option<usize> {
        self.attrs.read().min_length
    }

    pub fn max_length(&self) -> Option<usize> {
        self.attrs.read().max_length
    }

    pub fn format(&self) -> Option<Format> {
        self.attrs.read().format
    }

    pub fn definitions(&self) -> IndexMap<String, Arc<SchemaNode>> {
        self.attrs.read().definitions.clone()
    }

    /// Hyper-schema `links`, carried but never evaluated.
    pub fn links(&self) -> Vec<Value> {
        self.attrs.read().links.clone()
    }

    /// Hyper-schema `media`, carried but never evaluated.
    pub fn media(&self) -> Option<Value> {
        self.attrs.read().media.clone()
    }

    /// A finite, non-restartable sequence over every directly-owned
    /// subschema.
    ///
    /// Used by the reference expander for traversal; the validator has its
    /// own dispatch and does not call this.
    pub fn children(&self) -> impl Iterator<Item = Arc<SchemaNode>> {
        let attrs = self.attrs.read();
        let mut children: Vec<Arc<SchemaNode>> = Vec::new();

        children.extend(attrs.all_of.iter().cloned());
        children.extend(attrs.any_of.iter().cloned());
        children.extend(attrs.one_of.iter().cloned());
        if let Some(not) = &attrs.not {
            children.push(Arc::clone(not));
        }
        match &attrs.items {
            Some(Items::List(sub)) => children.push(Arc::clone(sub)),
            Some(Items::Tuple(subs)) => children.extend(subs.iter().cloned()),
            None => {}
        }
        if let AdditionalProperties::Schema(sub) = &attrs.additional_properties {
            children.push(Arc::clone(sub));
        }
        children.extend(attrs.properties.values().cloned());
        children.extend(attrs.pattern_properties.iter().map(|(_, sub)| Arc::clone(sub)));
        for dependency in attrs.dependencies.values() {
            if let Dependency::Schema(sub) = dependency {
                children.push(Arc::clone(sub));
            }
        }
        children.extend(attrs.definitions.values().cloned());

        children.into_iter()
    }
}

impl fmt::Debug for SchemaNode {
    // Expanded trees can reach themselves through their children, so Debug
    // prints the identity only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchemaNode({})", self.pointer)
    }
}
