//! The recursive validation engine.
//!
//! The engine walks a schema node and a data node in lockstep, applies every
//! applicable constraint, and accumulates one diagnostic per violation
//! rather than short-circuiting on the first failure. Combinator subresults
//! are composed with the error-suppression semantics described on each
//! check, and a per-invocation visited set guards against validation loops
//! in self-referential schemas.

mod array;
mod numeric;
mod object;
mod string;

use std::collections::HashSet;

use rayon::prelude::*;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{ValidationError, ValidationErrors};
use crate::path::JsonPath;
use crate::schema::SchemaNode;
use crate::ValidationResult;

/// Validates a data tree against a schema tree, accumulating every
/// diagnostic.
///
/// Returns `Validation::Success(())` when the data satisfies the schema, or
/// `Validation::Failure` carrying every collectible diagnostic in traversal
/// order (depth-first, check-declaration order within each node). The schema
/// must be fully reference-expanded; see [`crate::expand`].
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{validate, SchemaNode};
///
/// let schema = SchemaNode::build(&json!({
///     "type": "object",
///     "properties": {"name": {"type": "string", "minLength": 1}},
///     "required": ["name"]
/// }))
/// .unwrap();
///
/// assert!(validate(&schema, &json!({"name": "Ada"})).is_success());
/// assert!(validate(&schema, &json!({"name": ""})).is_failure());
/// ```
pub fn validate(schema: &SchemaNode, data: &Value) -> ValidationResult<()> {
    let mut context = Context::new();
    let ok = context.visit(schema, data, &JsonPath::root());

    if ok {
        Validation::Success(())
    } else {
        Validation::Failure(ValidationErrors::from_vec(context.errors))
    }
}

/// Fail-fast form of [`validate`].
///
/// Returns `Err` carrying every diagnostic when validation fails; the
/// error's `Display` is the space-joined concatenation of all diagnostics.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{validate_or_fail, SchemaNode};
///
/// let schema = SchemaNode::build(&json!({"type": "integer"})).unwrap();
/// assert!(validate_or_fail(&schema, &json!(5)).is_ok());
/// assert!(validate_or_fail(&schema, &json!("five")).is_err());
/// ```
pub fn validate_or_fail(schema: &SchemaNode, data: &Value) -> Result<(), ValidationErrors> {
    validate(schema, data).into_result()
}

/// Validates many independent data trees against one shared schema tree in
/// parallel.
///
/// The schema tree is read-only during validation, so each document gets
/// its own engine invocation with its own visited set and diagnostics list.
/// Results are in input order.
pub fn validate_batch(schema: &SchemaNode, documents: &[Value]) -> Vec<ValidationResult<()>> {
    documents
        .par_iter()
        .map(|document| validate(schema, document))
        .collect()
}

/// Per-invocation engine state: the visited set for loop detection and the
/// diagnostics sink. Never shared across `validate` calls.
pub(crate) struct Context {
    visited: HashSet<(String, String)>,
    errors: Vec<ValidationError>,
}

impl Context {
    fn new() -> Self {
        Self {
            visited: HashSet::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn error(
        &mut self,
        schema: &SchemaNode,
        path: &JsonPath,
        code: &str,
        message: impl Into<String>,
    ) {
        self.errors
            .push(ValidationError::new(schema, path.clone(), message).with_code(code));
    }

    /// The top-level recursive step.
    ///
    /// Every check runs even if an earlier one already failed, so all
    /// applicable diagnostics surface; the conjunction is computed eagerly
    /// over already-evaluated results.
    pub(crate) fn visit(&mut self, schema: &SchemaNode, data: &Value, path: &JsonPath) -> bool {
        // Combinators pass the same path downward, so a self-referential
        // schema revisits the exact (pointer, path) key; further recursion
        // from here would never terminate.
        let key = (schema.pointer().to_string(), path.to_string());
        if !self.visited.insert(key) {
            self.error(schema, path, "loop_detected", "validation loop detected");
            return false;
        }

        let mut ok = true;
        ok &= self.check_all_of(schema, data, path);
        ok &= self.check_any_of(schema, data, path);
        ok &= self.check_enum(schema, data, path);
        ok &= self.check_one_of(schema, data, path);
        ok &= self.check_not(schema, data, path);
        ok &= self.check_type(schema, data, path);

        match data {
            Value::Array(elements) => ok &= array::check(self, schema, elements, path),
            Value::Number(number) => ok &= numeric::check(self, schema, number, path),
            Value::Object(object) => ok &= object::check(self, schema, data, object, path),
            Value::String(s) => ok &= string::check(self, schema, s, path),
            Value::Null | Value::Bool(_) => {}
        }

        ok
    }

    /// Runs a subschema against a discarded, local diagnostic sink.
    ///
    /// Only success or failure is observed; whatever diagnostics the
    /// sub-validation produced are dropped so the caller is not flooded with
    /// errors from rejected alternatives or inverted conditions. The one
    /// exception is a detected validation loop: that is a malformed-schema
    /// condition, not a data error, so it survives the sink.
    pub(crate) fn visit_quiet(
        &mut self,
        schema: &SchemaNode,
        data: &Value,
        path: &JsonPath,
    ) -> bool {
        let kept = std::mem::take(&mut self.errors);
        let ok = self.visit(schema, data, path);
        let discarded = std::mem::replace(&mut self.errors, kept);
        self.errors
            .extend(discarded.into_iter().filter(|e| e.code == "loop_detected"));
        ok
    }

    /// `allOf`: every subschema must validate against the same data and
    /// path. Sub-diagnostics are kept, and one summary diagnostic is
    /// appended on any failure.
    fn check_all_of(&mut self, schema: &SchemaNode, data: &Value, path: &JsonPath) -> bool {
        let subschemas = schema.all_of();
        if subschemas.is_empty() {
            return true;
        }

        let mut all = true;
        for subschema in &subschemas {
            all &= self.visit(subschema, data, path);
        }

        if !all {
            self.error(
                schema,
                path,
                "all_of",
                "did not match all subschemas of allOf",
            );
        }
        all
    }

    /// `anyOf`: at least one subschema must validate. Alternatives run
    /// quietly; the first success wins.
    fn check_any_of(&mut self, schema: &SchemaNode, data: &Value, path: &JsonPath) -> bool {
        let subschemas = schema.any_of();
        if subschemas.is_empty() {
            return true;
        }

        for subschema in &subschemas {
            if self.visit_quiet(subschema, data, path) {
                return true;
            }
        }

        self.error(
            schema,
            path,
            "any_of",
            format!(
                "did not match any of the {} subschemas of anyOf",
                subschemas.len()
            ),
        );
        false
    }

    /// `enum`: the data must be a member of the literal set by value
    /// equality.
    fn check_enum(&mut self, schema: &SchemaNode, data: &Value, path: &JsonPath) -> bool {
        let allowed = match schema.enum_values() {
            Some(allowed) => allowed,
            None => return true,
        };

        if allowed.contains(data) {
            true
        } else {
            self.error(
                schema,
                path,
                "enum",
                format!(
                    "value {} is not one of {}",
                    data,
                    Value::Array(allowed.clone())
                ),
            );
            false
        }
    }

    /// `oneOf`: exactly one subschema must validate. Every alternative runs
    /// quietly; zero matches and more than one match are the same failure.
    fn check_one_of(&mut self, schema: &SchemaNode, data: &Value, path: &JsonPath) -> bool {
        let subschemas = schema.one_of();
        if subschemas.is_empty() {
            return true;
        }

        let mut matched = 0usize;
        for subschema in &subschemas {
            if self.visit_quiet(subschema, data, path) {
                matched += 1;
            }
        }

        if matched == 1 {
            true
        } else {
            self.error(
                schema,
                path,
                "one_of",
                format!(
                    "matched {} subschemas of oneOf, expected exactly one",
                    matched
                ),
            );
            false
        }
    }

    /// `not`: the subschema must fail.
    fn check_not(&mut self, schema: &SchemaNode, data: &Value, path: &JsonPath) -> bool {
        let subschema = match schema.not() {
            Some(subschema) => subschema,
            None => return true,
        };

        if self.visit_quiet(&subschema, data, path) {
            self.error(schema, path, "not", "matched subschema of not condition");
            false
        } else {
            true
        }
    }

    /// `type`: the data's runtime kind must map into the allowed set.
    fn check_type(&mut self, schema: &SchemaNode, data: &Value, path: &JsonPath) -> bool {
        let types = schema.types();
        if types.is_empty() {
            return true;
        }

        if types.iter().any(|t| t.matches(data)) {
            true
        } else {
            let expected: Vec<&str> = types.iter().map(|t| t.name()).collect();
            self.error(
                schema,
                path,
                "invalid_type",
                format!("expected {}, got {}", expected.join(" or "), data),
            );
            false
        }
    }
}
