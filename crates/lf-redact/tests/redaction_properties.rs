//! Property-based tests for the redaction engine.
//!
//! Uses proptest to check that redaction holds across arbitrary acyclic
//! records.

use lf_redact::{LogFilter, Value, PLACEHOLDER};
use proptest::prelude::*;
use serde_json::{Map, Value as JsonValue};

/// Field names mixing sensitive and ordinary words, in assorted casing.
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("password".to_string()),
        Just("AccessToken".to_string()),
        Just("user".to_string()),
        Just("count".to_string()),
        Just("payload".to_string()),
        Just("items".to_string()),
        "[a-z]{1,8}",
    ]
}

/// Arbitrary JSON trees, including JSON-encoded string leaves.
fn json_strategy() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        any::<i64>().prop_map(JsonValue::from),
        "[a-z ]{0,12}".prop_map(JsonValue::String),
    ];

    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
            prop::collection::vec((key_strategy(), inner.clone()), 0..5)
                .prop_map(|entries| JsonValue::Object(entries.into_iter().collect())),
            inner.prop_map(|v| JsonValue::String(v.to_string())),
        ]
    })
}

fn record_strategy() -> impl Strategy<Value = Map<String, JsonValue>> {
    prop::collection::vec((key_strategy(), json_strategy()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every top-level sensitive key ends up holding the placeholder.
    #[test]
    fn sensitive_keys_always_placeholder(record in record_strategy()) {
        let filter = LogFilter::default();
        let out = filter.process_json(&JsonValue::Object(record.clone()));

        for key in record.keys() {
            if filter.is_on_blacklist(key) {
                prop_assert_eq!(&out[key.as_str()], &JsonValue::String(PLACEHOLDER.to_string()));
            }
        }
    }

    /// Output keeps exactly the input's keys, in the same order.
    #[test]
    fn keys_preserved(record in record_strategy()) {
        let filter = LogFilter::default();
        let out = filter.process_json(&JsonValue::Object(record.clone()));

        let in_keys: Vec<&String> = record.keys().collect();
        let out_keys: Vec<&String> = out.keys().collect();
        prop_assert_eq!(in_keys, out_keys);
    }

    /// Filtering an already filtered record changes nothing.
    #[test]
    fn idempotent(record in record_strategy()) {
        let filter = LogFilter::default();
        let once = filter.process_json(&JsonValue::Object(record));
        let twice = filter.process_json(&JsonValue::Object(once.clone()));
        prop_assert_eq!(once, twice);
    }

    /// Non-mapping inputs always degrade to an empty mapping.
    #[test]
    fn non_mapping_is_empty(value in json_strategy()) {
        prop_assume!(!value.is_object());
        let filter = LogFilter::default();
        prop_assert!(filter.process(&Value::from(value)).is_empty());
    }
}
