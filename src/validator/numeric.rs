//! Numeric-gated checks: `maximum`, `minimum`, `multipleOf`.
//!
//! Integer and floating-point data share these checks; bound comparisons
//! happen in f64, while `multipleOf` computes the remainder in the value's
//! native numeric domain.

use serde_json::Number;

use super::Context;
use crate::path::JsonPath;
use crate::schema::SchemaNode;

pub(crate) fn check(
    ctx: &mut Context,
    schema: &SchemaNode,
    number: &Number,
    path: &JsonPath,
) -> bool {
    let mut ok = true;
    ok &= check_maximum(ctx, schema, number, path);
    ok &= check_minimum(ctx, schema, number, path);
    ok &= check_multiple_of(ctx, schema, number, path);
    ok
}

fn as_f64(number: &Number) -> f64 {
    number.as_f64().unwrap_or(f64::NAN)
}

fn check_maximum(
    ctx: &mut Context,
    schema: &SchemaNode,
    number: &Number,
    path: &JsonPath,
) -> bool {
    let max = match schema.maximum() {
        Some(max) => max,
        None => return true,
    };

    let value = as_f64(number);
    let bound = as_f64(&max);
    let within = if schema.exclusive_maximum() {
        value < bound
    } else {
        value <= bound
    };

    if within {
        true
    } else {
        let relation = if schema.exclusive_maximum() { "<" } else { "<=" };
        ctx.error(
            schema,
            path,
            "maximum",
            format!("expected a value {} {}, got {}", relation, max, number),
        );
        false
    }
}

fn check_minimum(
    ctx: &mut Context,
    schema: &SchemaNode,
    number: &Number,
    path: &JsonPath,
) -> bool {
    let min = match schema.minimum() {
        Some(min) => min,
        None => return true,
    };

    let value = as_f64(number);
    let bound = as_f64(&min);
    let within = if schema.exclusive_minimum() {
        value > bound
    } else {
        value >= bound
    };

    if within {
        true
    } else {
        let relation = if schema.exclusive_minimum() { ">" } else { ">=" };
        ctx.error(
            schema,
            path,
            "minimum",
            format!("expected a value {} {}, got {}", relation, min, number),
        );
        false
    }
}

fn check_multiple_of(
    ctx: &mut Context,
    schema: &SchemaNode,
    number: &Number,
    path: &JsonPath,
) -> bool {
    let multiple = match schema.multiple_of() {
        Some(multiple) => multiple,
        None => return true,
    };

    // The builder guarantees the divisor is positive.
    let divides = match (number.as_i64(), multiple.as_i64()) {
        (Some(value), Some(divisor)) => value % divisor == 0,
        _ => as_f64(number) % as_f64(&multiple) == 0.0,
    };

    if divides {
        true
    } else {
        ctx.error(
            schema,
            path,
            "multiple_of",
            format!("{} is not a multiple of {}", number, multiple),
        );
        false
    }
}
