//! Tests for the numeric keywords: `minimum`, `maximum`, exclusive bounds,
//! and `multipleOf`.

use serde_json::{json, Value};
use std::sync::Arc;
use stillwater::Validation;
use verdict::{validate, SchemaNode, ValidationErrors};

fn schema(value: Value) -> Arc<SchemaNode> {
    SchemaNode::build(&value).unwrap()
}

fn failure(schema: &SchemaNode, data: Value) -> ValidationErrors {
    match validate(schema, &data) {
        Validation::Failure(errors) => errors,
        Validation::Success(_) => panic!("expected validation to fail"),
    }
}

// ====== Bounds ======

#[test]
fn test_minimum_inclusive_by_default() {
    let age = schema(json!({"minimum": 0}));

    assert!(validate(&age, &json!(0)).is_success());
    assert!(validate(&age, &json!(120)).is_success());

    let errors = failure(&age, json!(-1));
    assert_eq!(errors.first().code, "minimum");
    assert_eq!(errors.first().message, "expected a value >= 0, got -1");
}

#[test]
fn test_maximum_inclusive_by_default() {
    let percent = schema(json!({"maximum": 100}));

    assert!(validate(&percent, &json!(100)).is_success());

    let errors = failure(&percent, json!(101));
    assert_eq!(errors.first().code, "maximum");
    assert_eq!(errors.first().message, "expected a value <= 100, got 101");
}

#[test]
fn test_exclusive_minimum() {
    let positive = schema(json!({"minimum": 0, "exclusiveMinimum": true}));

    assert!(validate(&positive, &json!(1)).is_success());
    assert!(validate(&positive, &json!(0.001)).is_success());

    let errors = failure(&positive, json!(0));
    assert_eq!(errors.first().message, "expected a value > 0, got 0");
}

#[test]
fn test_exclusive_maximum() {
    let fraction = schema(json!({"maximum": 1, "exclusiveMaximum": true}));

    assert!(validate(&fraction, &json!(0.999)).is_success());

    let errors = failure(&fraction, json!(1));
    assert_eq!(errors.first().message, "expected a value < 1, got 1");
}

#[test]
fn test_float_bounds_apply_to_integers() {
    let bounded = schema(json!({"minimum": 0.5, "maximum": 9.5}));

    assert!(validate(&bounded, &json!(5)).is_success());
    assert!(validate(&bounded, &json!(0)).is_failure());
    assert!(validate(&bounded, &json!(10)).is_failure());
}

#[test]
fn test_bounds_ignore_non_numbers() {
    // Numeric keywords gate on the data being a number.
    let bounded = schema(json!({"minimum": 10}));

    assert!(validate(&bounded, &json!("three")).is_success());
    assert!(validate(&bounded, &json!(null)).is_success());
}

#[test]
fn test_both_bounds_violated_reports_once_each() {
    // Contradictory schema; each bound produces its own diagnostic.
    let narrow = schema(json!({"minimum": 10, "maximum": 5}));

    let errors = failure(&narrow, json!(7));
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.with_code("maximum").len(), 1);
    assert_eq!(errors.with_code("minimum").len(), 1);
}

// ====== multipleOf ======

#[test]
fn test_multiple_of_integers() {
    let third = schema(json!({"multipleOf": 3}));

    assert!(validate(&third, &json!(9)).is_success());
    assert!(validate(&third, &json!(0)).is_success());
    assert!(validate(&third, &json!(-6)).is_success());

    let errors = failure(&third, json!(10));
    assert_eq!(errors.first().code, "multiple_of");
    assert_eq!(errors.first().message, "10 is not a multiple of 3");
}

#[test]
fn test_multiple_of_floats() {
    let half = schema(json!({"multipleOf": 0.5}));

    assert!(validate(&half, &json!(1.5)).is_success());
    assert!(validate(&half, &json!(2)).is_success());
    assert!(validate(&half, &json!(1.3)).is_failure());
}

#[test]
fn test_multiple_of_large_integers_stay_exact() {
    // i64 arithmetic, not f64, for integer data and divisors.
    let big = schema(json!({"multipleOf": 3}));

    assert!(validate(&big, &json!(3_000_000_000_000_000_000i64)).is_success());
    assert!(validate(&big, &json!(3_000_000_000_000_000_001i64)).is_failure());
}

// ====== Integer Typing ======

#[test]
fn test_integer_rejects_fractions() {
    let count = schema(json!({"type": "integer", "minimum": 0}));

    assert!(validate(&count, &json!(5)).is_success());

    let errors = failure(&count, json!(5.5));
    assert_eq!(errors.first().code, "invalid_type");
    assert_eq!(errors.first().message, "expected integer, got 5.5");
}

#[test]
fn test_number_accepts_integers() {
    let amount = schema(json!({"type": "number"}));

    assert!(validate(&amount, &json!(5)).is_success());
    assert!(validate(&amount, &json!(5.5)).is_success());
    assert!(validate(&amount, &json!("5")).is_failure());
}
