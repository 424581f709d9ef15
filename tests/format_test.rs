//! Tests for the `format` keyword as seen through schema validation.
//!
//! The matchers themselves are unit-tested next to their definitions; these
//! cover the keyword wiring, diagnostics, and the unknown-tag rule.

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

#[test]
fn test_email_format() {
    let email = schema(json!({"format": "email"}));

    assert!(validate(&email, &json!("user@example.com")).is_success());

    let errors = failure(&email, json!("not-an-email"));
    assert_eq!(errors.first().code, "format");
    assert_eq!(errors.first().message, "'not-an-email' is not a valid email");
}

#[test]
fn test_date_time_format() {
    let timestamp = schema(json!({"format": "date-time"}));

    assert!(validate(&timestamp, &json!("2024-05-01T12:30:00Z")).is_success());
    assert!(validate(&timestamp, &json!("2024-05-01T12:30:00.123+02:00")).is_success());
    assert!(validate(&timestamp, &json!("2024-05-01")).is_failure());
}

#[test]
fn test_ip_address_formats() {
    let v4 = schema(json!({"format": "ipv4"}));
    let v6 = schema(json!({"format": "ipv6"}));

    assert!(validate(&v4, &json!("192.168.0.1")).is_success());
    assert!(validate(&v4, &json!("256.1.1.1")).is_failure());
    assert!(validate(&v6, &json!("fe80::1")).is_success());
    assert!(validate(&v6, &json!("192.168.0.1")).is_failure());
}

#[test]
fn test_hostname_format() {
    let host = schema(json!({"format": "hostname"}));

    assert!(validate(&host, &json!("example.com")).is_success());
    assert!(validate(&host, &json!("-leading.example.com")).is_failure());
}

#[test]
fn test_uri_format() {
    let uri = schema(json!({"format": "uri"}));

    assert!(validate(&uri, &json!("https://example.com/path")).is_success());
    assert!(validate(&uri, &json!("/relative/path")).is_failure());
}

#[test]
fn test_uuid_format() {
    let uuid = schema(json!({"format": "uuid"}));

    assert!(validate(&uuid, &json!("123e4567-e89b-12d3-a456-426614174000")).is_success());
    assert!(validate(&uuid, &json!("nope")).is_failure());
}

#[test]
fn test_regex_format_checks_compilability() {
    let pattern = schema(json!({"format": "regex"}));

    assert!(validate(&pattern, &json!("^[a-z]+$")).is_success());
    assert!(validate(&pattern, &json!("[unclosed")).is_failure());
}

#[test]
fn test_unknown_format_always_passes() {
    // Unrecognized tags build to no format constraint at all.
    let custom = schema(json!({"format": "carrier-pigeon"}));

    assert!(validate(&custom, &json!("anything")).is_success());
    assert!(validate(&custom, &json!("")).is_success());
}

#[test]
fn test_format_ignores_non_strings() {
    let email = schema(json!({"format": "email"}));

    assert!(validate(&email, &json!(42)).is_success());
    assert!(validate(&email, &json!(null)).is_success());
}
