//! Construction of schema trees from already-parsed generic values.
//!
//! The caller is expected to have parsed the schema document into a
//! `serde_json::Value`; this module turns that generic tree into a typed
//! [`SchemaNode`] tree, assigning canonical pointers and wiring parent
//! back-references as it descends. Raw text parsing is not handled here.

use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value};

use super::node::{AdditionalProperties, Attributes, Dependency, Items, SchemaNode, SchemaType};
use crate::format::Format;

/// Errors produced while building a schema tree from a generic value.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The value at the given pointer is neither an object nor a boolean.
    #[error("value at {0} is not a schema (expected object or boolean)")]
    NotASchema(String),

    /// A keyword held a value of the wrong shape.
    #[error("invalid value for '{keyword}' at {pointer}: {detail}")]
    InvalidKeyword {
        keyword: &'static str,
        pointer: String,
        detail: String,
    },

    /// The `type` keyword named an unknown primitive tag.
    #[error("unknown type '{name}' at {pointer}")]
    UnknownType { name: String, pointer: String },

    /// A `pattern` or `patternProperties` regex failed to compile.
    #[error("invalid regex '{pattern}' at {pointer}: {source}")]
    InvalidRegex {
        pattern: String,
        pointer: String,
        source: regex::Error,
    },
}

impl SchemaNode {
    /// Builds a schema tree from an already-parsed generic value.
    ///
    /// The root pointer is `#`; children get pointers like
    /// `#/properties/name` and `#/allOf/0`. Boolean schema shorthand is
    /// normalized to a node: `true` becomes the unconstrained schema and
    /// `false` a schema that rejects every value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde_json::json;
    /// use verdict::SchemaNode;
    ///
    /// let schema = SchemaNode::build(&json!({"type": "integer"})).unwrap();
    /// assert_eq!(schema.pointer(), "#");
    /// ```
    pub fn build(value: &Value) -> Result<Arc<SchemaNode>, BuildError> {
        Self::build_with_uri(value, "")
    }

    /// Builds a schema tree whose pointers are anchored at `uri#`.
    ///
    /// Use this for documents registered in a [`crate::SchemaStore`] so
    /// cross-document references can name them.
    pub fn build_with_uri(value: &Value, uri: &str) -> Result<Arc<SchemaNode>, BuildError> {
        build_node(value, format!("{}#", uri))
    }
}

fn build_node(value: &Value, pointer: String) -> Result<Arc<SchemaNode>, BuildError> {
    let node = SchemaNode::bare(pointer);
    let attrs = match value {
        Value::Bool(true) => Attributes::default(),
        Value::Bool(false) => {
            // `false` rejects everything: its `not` is the empty schema,
            // which every value matches.
            let mut attrs = Attributes::default();
            attrs.not = Some(subschema(&node, &Value::Object(Map::new()), "not")?);
            attrs
        }
        Value::Object(map) => build_attributes(map, &node)?,
        _ => return Err(BuildError::NotASchema(node.pointer().to_string())),
    };
    node.set_attributes(attrs);
    Ok(node)
}

/// Builds one owned child and wires its parent back-reference.
fn subschema(
    parent: &Arc<SchemaNode>,
    value: &Value,
    token: impl AsRef<str>,
) -> Result<Arc<SchemaNode>, BuildError> {
    let child = build_node(value, format!("{}/{}", parent.pointer(), token.as_ref()))?;
    child.set_parent(parent);
    Ok(child)
}

fn build_attributes(
    map: &Map<String, Value>,
    node: &Arc<SchemaNode>,
) -> Result<Attributes, BuildError> {
    let mut attrs = Attributes::default();

    // An unexpanded reference carries no other attributes; the expander
    // overwrites them all from the resolution target anyway.
    if let Some(reference) = map.get("$ref") {
        let reference = reference
            .as_str()
            .ok_or_else(|| invalid("$ref", node, "expected a string"))?;
        attrs.reference = Some(reference.to_string());
        return Ok(attrs);
    }

    for (keyword, value) in map {
        match keyword.as_str() {
            "type" => attrs.types = parse_types(value, node)?,
            "enum" => {
                let values = value
                    .as_array()
                    .ok_or_else(|| invalid("enum", node, "expected an array"))?;
                attrs.enum_values = Some(values.clone());
            }
            "allOf" => attrs.all_of = parse_schema_list(value, node, "allOf")?,
            "anyOf" => attrs.any_of = parse_schema_list(value, node, "anyOf")?,
            "oneOf" => attrs.one_of = parse_schema_list(value, node, "oneOf")?,
            "not" => attrs.not = Some(subschema(node, value, "not")?),

            "items" => {
                attrs.items = Some(match value {
                    Value::Array(subs) => {
                        let mut tuple = Vec::with_capacity(subs.len());
                        for (i, sub) in subs.iter().enumerate() {
                            tuple.push(subschema(node, sub, format!("items/{}", i))?);
                        }
                        Items::Tuple(tuple)
                    }
                    _ => Items::List(subschema(node, value, "items")?),
                });
            }
            "additionalItems" => {
                attrs.additional_items = value
                    .as_bool()
                    .ok_or_else(|| invalid("additionalItems", node, "expected a boolean"))?;
            }
            "minItems" => attrs.min_items = Some(parse_count(value, "minItems", node)?),
            "maxItems" => attrs.max_items = Some(parse_count(value, "maxItems", node)?),
            "uniqueItems" => {
                attrs.unique_items = value
                    .as_bool()
                    .ok_or_else(|| invalid("uniqueItems", node, "expected a boolean"))?;
            }

            "minimum" => attrs.minimum = Some(parse_number(value, "minimum", node)?),
            "maximum" => attrs.maximum = Some(parse_number(value, "maximum", node)?),
            "exclusiveMinimum" => {
                attrs.exclusive_minimum = value
                    .as_bool()
                    .ok_or_else(|| invalid("exclusiveMinimum", node, "expected a boolean"))?;
            }
            "exclusiveMaximum" => {
                attrs.exclusive_maximum = value
                    .as_bool()
                    .ok_or_else(|| invalid("exclusiveMaximum", node, "expected a boolean"))?;
            }
            "multipleOf" => {
                let number = parse_number(value, "multipleOf", node)?;
                if number.as_f64().unwrap_or(0.0) <= 0.0 {
                    return Err(invalid("multipleOf", node, "expected a positive number"));
                }
                attrs.multiple_of = Some(number);
            }

            "properties" => {
                let map = value
                    .as_object()
                    .ok_or_else(|| invalid("properties", node, "expected an object"))?;
                for (name, sub) in map {
                    let child = subschema(node, sub, format!("properties/{}", name))?;
                    attrs.properties.insert(name.clone(), child);
                }
            }
            "patternProperties" => {
                let map = value
                    .as_object()
                    .ok_or_else(|| invalid("patternProperties", node, "expected an object"))?;
                for (pattern, sub) in map {
                    let regex = compile_regex(pattern, node)?;
                    let child = subschema(node, sub, format!("patternProperties/{}", pattern))?;
                    attrs.pattern_properties.push((regex, child));
                }
            }
            "additionalProperties" => {
                attrs.additional_properties = match value {
                    Value::Bool(true) => AdditionalProperties::Allow,
                    Value::Bool(false) => AdditionalProperties::Deny,
                    Value::Object(_) => AdditionalProperties::Schema(subschema(
                        node,
                        value,
                        "additionalProperties",
                    )?),
                    _ => {
                        return Err(invalid(
                            "additionalProperties",
                            node,
                            "expected a boolean or a schema",
                        ))
                    }
                };
            }
            "required" => attrs.required = parse_names(value, "required", node)?,
            "dependencies" => {
                let map = value
                    .as_object()
                    .ok_or_else(|| invalid("dependencies", node, "expected an object"))?;
                for (name, dependency) in map {
                    let entry = match dependency {
                        Value::Array(_) => {
                            Dependency::Keys(parse_names(dependency, "dependencies", node)?)
                        }
                        Value::Object(_) | Value::Bool(_) => Dependency::Schema(subschema(
                            node,
                            dependency,
                            format!("dependencies/{}", name),
                        )?),
                        _ => {
                            return Err(invalid(
                                "dependencies",
                                node,
                                "expected a name list or a schema",
                            ))
                        }
                    };
                    attrs.dependencies.insert(name.clone(), entry);
                }
            }
            "minProperties" => {
                attrs.min_properties = Some(parse_count(value, "minProperties", node)?)
            }
            "maxProperties" => {
                attrs.max_properties = Some(parse_count(value, "maxProperties", node)?)
            }
            "strictProperties" => {
                attrs.strict_properties = value
                    .as_bool()
                    .ok_or_else(|| invalid("strictProperties", node, "expected a boolean"))?;
            }

            "pattern" => {
                let pattern = value
                    .as_str()
                    .ok_or_else(|| invalid("pattern", node, "expected a string"))?;
                attrs.pattern = Some(compile_regex(pattern, node)?);
            }
            "minLength" => attrs.min_length = Some(parse_count(value, "minLength", node)?),
            "maxLength" => attrs.max_length = Some(parse_count(value, "maxLength", node)?),
            "format" => {
                let name = value
                    .as_str()
                    .ok_or_else(|| invalid("format", node, "expected a string"))?;
                // Unknown format tags always pass, so they build to None.
                attrs.format = Format::from_name(name);
            }

            "definitions" => {
                let map = value
                    .as_object()
                    .ok_or_else(|| invalid("definitions", node, "expected an object"))?;
                for (name, sub) in map {
                    let child = subschema(node, sub, format!("definitions/{}", name))?;
                    attrs.definitions.insert(name.clone(), child);
                }
            }

            "links" => {
                let links = value
                    .as_array()
                    .ok_or_else(|| invalid("links", node, "expected an array"))?;
                attrs.links = links.clone();
            }
            "media" => attrs.media = Some(value.clone()),

            // Annotations and unknown keywords are ignored.
            _ => {}
        }
    }

    Ok(attrs)
}

fn parse_types(value: &Value, node: &Arc<SchemaNode>) -> Result<Vec<SchemaType>, BuildError> {
    let names: Vec<&str> = match value {
        Value::String(name) => vec![name.as_str()],
        Value::Array(names) => names
            .iter()
            .map(|n| n.as_str().ok_or_else(|| invalid("type", node, "expected type names")))
            .collect::<Result<_, _>>()?,
        _ => return Err(invalid("type", node, "expected a string or array of strings")),
    };

    names
        .into_iter()
        .map(|name| {
            SchemaType::from_name(name).ok_or_else(|| BuildError::UnknownType {
                name: name.to_string(),
                pointer: node.pointer().to_string(),
            })
        })
        .collect()
}

fn parse_schema_list(
    value: &Value,
    node: &Arc<SchemaNode>,
    keyword: &'static str,
) -> Result<Vec<Arc<SchemaNode>>, BuildError> {
    let subs = value
        .as_array()
        .ok_or_else(|| invalid(keyword, node, "expected an array of schemas"))?;
    subs.iter()
        .enumerate()
        .map(|(i, sub)| subschema(node, sub, format!("{}/{}", keyword, i)))
        .collect()
}

fn parse_names(
    value: &Value,
    keyword: &'static str,
    node: &Arc<SchemaNode>,
) -> Result<Vec<String>, BuildError> {
    let names = value
        .as_array()
        .ok_or_else(|| invalid(keyword, node, "expected an array of names"))?;
    names
        .iter()
        .map(|name| {
            name.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(keyword, node, "expected property names"))
        })
        .collect()
}

fn parse_count(
    value: &Value,
    keyword: &'static str,
    node: &Arc<SchemaNode>,
) -> Result<usize, BuildError> {
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| invalid(keyword, node, "expected a non-negative integer"))
}

fn parse_number(
    value: &Value,
    keyword: &'static str,
    node: &Arc<SchemaNode>,
) -> Result<serde_json::Number, BuildError> {
    match value {
        Value::Number(number) => Ok(number.clone()),
        _ => Err(invalid(keyword, node, "expected a number")),
    }
}

fn compile_regex(pattern: &str, node: &Arc<SchemaNode>) -> Result<Regex, BuildError> {
    Regex::new(pattern).map_err(|source| BuildError::InvalidRegex {
        pattern: pattern.to_string(),
        pointer: node.pointer().to_string(),
        source,
    })
}

fn invalid(keyword: &'static str, node: &Arc<SchemaNode>, detail: &str) -> BuildError {
    BuildError::InvalidKeyword {
        keyword,
        pointer: node.pointer().to_string(),
        detail: detail.to_string(),
    }
}
