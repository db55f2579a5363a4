//! Property-based tests for path reads and writes
//!
//! These tests check the get/set invariants over generated paths and values.

use hookup_core::path::{get, set};
use hookup_core::predicates::is_empty;
use hookup_core::{Path, PathSegment};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Object keys that never parse as an index
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,8}"
}

fn segment_strategy() -> impl Strategy<Value = PathSegment> {
    prop_oneof![
        3 => key_strategy().prop_map(PathSegment::Key),
        1 => (0usize..4).prop_map(PathSegment::Index),
    ]
}

fn path_strategy() -> impl Strategy<Value = Path> {
    prop::collection::vec(segment_strategy(), 1..5).prop_map(Path::from)
}

/// Non-null leaf values
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z ]{0,12}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn prop_set_then_get(path in path_strategy(), value in leaf_strategy()) {
        let target = set(&json!({}), &path, value.clone());
        prop_assert_eq!(get(&target, &path), Some(&value));
    }

    #[test]
    fn prop_set_is_non_destructive(
        path in path_strategy(),
        first in leaf_strategy(),
        second in leaf_strategy(),
    ) {
        let target = set(&json!({}), &path, first.clone());
        let again = set(&target, &path, second);
        prop_assert_eq!(get(&again, &path), Some(&first));
        prop_assert_eq!(again, target);
    }

    #[test]
    fn prop_set_leaves_input_untouched(path in path_strategy(), value in leaf_strategy()) {
        let original = json!({"keep": [1, 2, {"nested": true}]});
        let before = original.clone();
        let _ = set(&original, &path, value);
        prop_assert_eq!(original, before);
    }

    #[test]
    fn prop_dotted_text_round_trips(path in path_strategy()) {
        let text = path.to_string();
        prop_assert_eq!(Path::parse(&text), path);
    }

    #[test]
    fn prop_numbers_are_never_empty(n in any::<i64>()) {
        prop_assert!(!is_empty(&json!(n)));
    }
}

#[test]
fn test_emptiness_table() {
    assert!(!is_empty(&json!(0)));
    assert!(is_empty(&Value::Null));
    assert!(is_empty(&json!({})));
    assert!(is_empty(&json!([])));
    assert!(is_empty(&json!("")));
    assert!(!is_empty(&json!("x")));
}
