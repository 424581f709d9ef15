//! String-gated checks: `format`, `maxLength`, `minLength`, `pattern`.
//!
//! Lengths are character counts (Unicode scalar values), not byte counts.

use super::Context;
use crate::path::JsonPath;
use crate::schema::SchemaNode;

pub(crate) fn check(ctx: &mut Context, schema: &SchemaNode, value: &str, path: &JsonPath) -> bool {
    let mut ok = true;
    ok &= check_format(ctx, schema, value, path);
    ok &= check_max_length(ctx, schema, value, path);
    ok &= check_min_length(ctx, schema, value, path);
    ok &= check_pattern(ctx, schema, value, path);
    ok
}

fn check_format(ctx: &mut Context, schema: &SchemaNode, value: &str, path: &JsonPath) -> bool {
    let format = match schema.format() {
        Some(format) => format,
        None => return true,
    };

    if format.check(value) {
        true
    } else {
        ctx.error(
            schema,
            path,
            "format",
            format!("'{}' is not a valid {}", value, format.name()),
        );
        false
    }
}

fn check_max_length(ctx: &mut Context, schema: &SchemaNode, value: &str, path: &JsonPath) -> bool {
    let max = match schema.max_length() {
        Some(max) => max,
        None => return true,
    };

    let length = value.chars().count();
    if length <= max {
        true
    } else {
        ctx.error(
            schema,
            path,
            "max_length",
            format!("expected at most {} characters, got {}", max, length),
        );
        false
    }
}

fn check_min_length(ctx: &mut Context, schema: &SchemaNode, value: &str, path: &JsonPath) -> bool {
    let min = match schema.min_length() {
        Some(min) => min,
        None => return true,
    };

    let length = value.chars().count();
    if length >= min {
        true
    } else {
        ctx.error(
            schema,
            path,
            "min_length",
            format!("expected at least {} characters, got {}", min, length),
        );
        false
    }
}

fn check_pattern(ctx: &mut Context, schema: &SchemaNode, value: &str, path: &JsonPath) -> bool {
    let pattern = match schema.pattern() {
        Some(pattern) => pattern,
        None => return true,
    };

    if pattern.is_match(value) {
        true
    } else {
        ctx.error(
            schema,
            path,
            "pattern",
            format!("'{}' does not match pattern '{}'", value, pattern.as_str()),
        );
        false
    }
}
