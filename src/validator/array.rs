//! Sequence-gated checks: `items`, `maxItems`, `minItems`, `uniqueItems`.

use serde_json::Value;

use super::Context;
use crate::path::JsonPath;
use crate::schema::{Items, SchemaNode};

pub(crate) fn check(
    ctx: &mut Context,
    schema: &SchemaNode,
    elements: &[Value],
    path: &JsonPath,
) -> bool {
    let mut ok = true;
    ok &= check_items(ctx, schema, elements, path);
    ok &= check_max_items(ctx, schema, elements, path);
    ok &= check_min_items(ctx, schema, elements, path);
    ok &= check_unique_items(ctx, schema, elements, path);
    ok
}

fn check_items(
    ctx: &mut Context,
    schema: &SchemaNode,
    elements: &[Value],
    path: &JsonPath,
) -> bool {
    match schema.items() {
        None => true,
        Some(Items::List(subschema)) => {
            let mut ok = true;
            for (index, element) in elements.iter().enumerate() {
                ok &= ctx.visit(&subschema, element, &path.push_index(index));
            }
            ok
        }
        Some(Items::Tuple(subschemas)) => {
            if elements.len() < subschemas.len() {
                ctx.error(
                    schema,
                    path,
                    "too_few_items",
                    format!(
                        "too few items: expected at least {}, got {}",
                        subschemas.len(),
                        elements.len()
                    ),
                );
                return false;
            }
            if elements.len() > subschemas.len() && !schema.additional_items() {
                ctx.error(
                    schema,
                    path,
                    "too_many_items",
                    format!(
                        "too many items: expected at most {}, got {}",
                        subschemas.len(),
                        elements.len()
                    ),
                );
                return false;
            }

            // Positional pairs; surplus elements are left unchecked when
            // additionalItems allows them.
            let mut ok = true;
            for (index, (subschema, element)) in subschemas.iter().zip(elements).enumerate() {
                ok &= ctx.visit(subschema, element, &path.push_index(index));
            }
            ok
        }
    }
}

fn check_max_items(
    ctx: &mut Context,
    schema: &SchemaNode,
    elements: &[Value],
    path: &JsonPath,
) -> bool {
    match schema.max_items() {
        Some(max) if elements.len() > max => {
            ctx.error(
                schema,
                path,
                "max_items",
                format!("expected at most {} items, got {}", max, elements.len()),
            );
            false
        }
        _ => true,
    }
}

fn check_min_items(
    ctx: &mut Context,
    schema: &SchemaNode,
    elements: &[Value],
    path: &JsonPath,
) -> bool {
    match schema.min_items() {
        Some(min) if elements.len() < min => {
            ctx.error(
                schema,
                path,
                "min_items",
                format!("expected at least {} items, got {}", min, elements.len()),
            );
            false
        }
        _ => true,
    }
}

fn check_unique_items(
    ctx: &mut Context,
    schema: &SchemaNode,
    elements: &[Value],
    path: &JsonPath,
) -> bool {
    if !schema.unique_items() {
        return true;
    }

    // Pairwise value equality; Value is not hashable, so O(n^2) it is.
    for i in 0..elements.len() {
        for j in 0..i {
            if elements[i] == elements[j] {
                ctx.error(
                    schema,
                    path,
                    "unique_items",
                    format!("duplicate items at indices {} and {}", j, i),
                );
                return false;
            }
        }
    }
    true
}
