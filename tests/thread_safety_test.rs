//! Tests for concurrent validation against shared schema trees.

use serde_json::json;
use std::sync::Arc;
use std::thread;
use verdict::{validate, validate_batch, SchemaNode, SchemaStore};

#[test]
fn test_concurrent_validation_shares_one_schema() {
    let user = SchemaNode::build(&json!({
        "type": "object",
        "properties": {
            "name": {"type": "string", "minLength": 1},
            "age": {"type": "integer", "minimum": 0}
        },
        "required": ["name"]
    }))
    .unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let user = Arc::clone(&user);
            thread::spawn(move || {
                let result = validate(
                    &user,
                    &json!({
                        "name": format!("User{}", i),
                        "age": 20 + i
                    }),
                );
                assert!(result.is_success());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_failures_stay_independent() {
    // Each invocation has its own diagnostics; a failing document in one
    // thread never contaminates another thread's result.
    let positive = SchemaNode::build(&json!({"minimum": 1})).unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let positive = Arc::clone(&positive);
            thread::spawn(move || {
                let value = if i % 2 == 0 { 5 } else { -5 };
                let result = validate(&positive, &json!(value));
                assert_eq!(result.is_success(), i % 2 == 0);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_batch_results_in_input_order() {
    let integer = SchemaNode::build(&json!({"type": "integer"})).unwrap();

    let documents = vec![json!(1), json!("two"), json!(3), json!(null), json!(5)];
    let results = validate_batch(&integer, &documents);

    assert_eq!(results.len(), 5);
    let outcomes: Vec<_> = results.iter().map(|r| r.is_success()).collect();
    assert_eq!(outcomes, vec![true, false, true, false, true]);
}

#[test]
fn test_batch_of_many_documents() {
    let bounded = SchemaNode::build(&json!({"minimum": 0, "maximum": 999})).unwrap();

    let documents: Vec<_> = (0..1000).map(|i| json!(i)).collect();
    let results = validate_batch(&bounded, &documents);

    assert!(results.iter().all(|r| r.is_success()));
}

#[test]
fn test_concurrent_store_access() {
    let store = SchemaStore::new();
    store
        .register(
            "http://example.com/id",
            SchemaNode::build_with_uri(&json!({"type": "integer"}), "http://example.com/id")
                .unwrap(),
        )
        .unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                assert!(store.contains("http://example.com/id"));
                assert!(store.get("http://example.com/id").is_some());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
