//! Mapping-gated checks: `additionalProperties`, `dependencies`,
//! `maxProperties`, `minProperties`, `patternProperties`, `properties`,
//! `required`, `strictProperties`.

use serde_json::{Map, Value};

use super::Context;
use crate::path::JsonPath;
use crate::schema::{AdditionalProperties, Dependency, SchemaNode};

pub(crate) fn check(
    ctx: &mut Context,
    schema: &SchemaNode,
    data: &Value,
    object: &Map<String, Value>,
    path: &JsonPath,
) -> bool {
    let mut ok = true;
    ok &= check_additional_properties(ctx, schema, object, path);
    ok &= check_dependencies(ctx, schema, data, object, path);
    ok &= check_max_properties(ctx, schema, object, path);
    ok &= check_min_properties(ctx, schema, object, path);
    ok &= check_pattern_properties(ctx, schema, object, path);
    ok &= check_properties(ctx, schema, object, path);
    ok &= check_required(ctx, schema, object, path, &schema.required());
    ok &= check_strict_properties(ctx, schema, object, path);
    ok
}

/// Keys not declared in `properties` and not matched by any
/// `patternProperties` regex, in data order.
fn extra_keys(schema: &SchemaNode, object: &Map<String, Value>) -> Vec<String> {
    let properties = schema.properties();
    let patterns = schema.pattern_properties();

    object
        .keys()
        .filter(|key| {
            !properties.contains_key(key.as_str())
                && !patterns.iter().any(|(regex, _)| regex.is_match(key))
        })
        .cloned()
        .collect()
}

fn check_additional_properties(
    ctx: &mut Context,
    schema: &SchemaNode,
    object: &Map<String, Value>,
    path: &JsonPath,
) -> bool {
    match schema.additional_properties() {
        AdditionalProperties::Allow => true,
        AdditionalProperties::Schema(subschema) => {
            let mut ok = true;
            for key in extra_keys(schema, object) {
                ok &= ctx.visit(&subschema, &object[&key], &path.push_field(&key));
            }
            ok
        }
        AdditionalProperties::Deny => {
            let mut extras = extra_keys(schema, object);
            if extras.is_empty() {
                true
            } else {
                extras.sort();
                ctx.error(
                    schema,
                    path,
                    "additional_properties",
                    format!("additional properties are not allowed: {}", extras.join(", ")),
                );
                false
            }
        }
    }
}

fn check_dependencies(
    ctx: &mut Context,
    schema: &SchemaNode,
    data: &Value,
    object: &Map<String, Value>,
    path: &JsonPath,
) -> bool {
    let mut ok = true;
    for (name, dependency) in schema.dependencies() {
        // An absent key satisfies its dependency vacuously.
        if !object.contains_key(&name) {
            continue;
        }
        match dependency {
            // The whole object is validated at the same path, not the
            // dependent key's value.
            Dependency::Schema(subschema) => ok &= ctx.visit(&subschema, data, path),
            Dependency::Keys(names) => ok &= check_required(ctx, schema, object, path, &names),
        }
    }
    ok
}

fn check_max_properties(
    ctx: &mut Context,
    schema: &SchemaNode,
    object: &Map<String, Value>,
    path: &JsonPath,
) -> bool {
    match schema.max_properties() {
        Some(max) if object.len() > max => {
            ctx.error(
                schema,
                path,
                "max_properties",
                format!("expected at most {} properties, got {}", max, object.len()),
            );
            false
        }
        _ => true,
    }
}

fn check_min_properties(
    ctx: &mut Context,
    schema: &SchemaNode,
    object: &Map<String, Value>,
    path: &JsonPath,
) -> bool {
    match schema.min_properties() {
        Some(min) if object.len() < min => {
            ctx.error(
                schema,
                path,
                "min_properties",
                format!("expected at least {} properties, got {}", min, object.len()),
            );
            false
        }
        _ => true,
    }
}

fn check_pattern_properties(
    ctx: &mut Context,
    schema: &SchemaNode,
    object: &Map<String, Value>,
    path: &JsonPath,
) -> bool {
    let mut ok = true;
    // A key may match several patterns and is validated by each.
    for (regex, subschema) in schema.pattern_properties() {
        for (key, value) in object {
            if regex.is_match(key) {
                ok &= ctx.visit(&subschema, value, &path.push_field(key));
            }
        }
    }
    ok
}

fn check_properties(
    ctx: &mut Context,
    schema: &SchemaNode,
    object: &Map<String, Value>,
    path: &JsonPath,
) -> bool {
    let mut ok = true;
    for (name, subschema) in schema.properties() {
        if let Some(value) = object.get(&name) {
            ok &= ctx.visit(&subschema, value, &path.push_field(&name));
        }
    }
    ok
}

fn check_required(
    ctx: &mut Context,
    schema: &SchemaNode,
    object: &Map<String, Value>,
    path: &JsonPath,
    names: &[String],
) -> bool {
    let mut missing: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| !object.contains_key(*name))
        .collect();

    if missing.is_empty() {
        true
    } else {
        missing.sort_unstable();
        let mut present: Vec<&str> = object.keys().map(String::as_str).collect();
        present.sort_unstable();
        ctx.error(
            schema,
            path,
            "required",
            format!(
                "missing required properties: {} (present: {})",
                missing.join(", "),
                present.join(", ")
            ),
        );
        false
    }
}

fn check_strict_properties(
    ctx: &mut Context,
    schema: &SchemaNode,
    object: &Map<String, Value>,
    path: &JsonPath,
) -> bool {
    if !schema.strict_properties() {
        return true;
    }

    let mut ok = true;

    let mut extras = extra_keys(schema, object);
    if !extras.is_empty() {
        extras.sort();
        ctx.error(
            schema,
            path,
            "strict_properties",
            format!("properties not declared in schema: {}", extras.join(", ")),
        );
        ok = false;
    }

    // Every declared property becomes mandatory.
    let declared: Vec<String> = schema.properties().keys().cloned().collect();
    ok &= check_required(ctx, schema, object, path, &declared);

    ok
}
