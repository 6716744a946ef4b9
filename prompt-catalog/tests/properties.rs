//! Property-based tests for parsing, classification and repair

use prompt_catalog::{
    parse_frontmatter, repair_catalog, validate_catalog, Classifier, Repairer,
};
use proptest::prelude::*;
use serde_json::{Map, Value};

const FIELDS: [&str; 6] = ["id", "name", "description", "emoji", "group", "prompt"];

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-5i64..50).prop_map(Value::from),
        prop::sample::select(vec![
            "", " ", "1", "3", "X", "🔧", "👨‍👩‍👧‍👦", "General", "  Dev ", "---\ndescription: x\n---\nBody",
            "# Title here\nbody", "finance helper", "data", "abc",
        ])
        .prop_map(|s| Value::String(s.to_string())),
        "[a-zA-Z #_-]{0,20}".prop_map(Value::String),
    ]
}

fn field_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => leaf_strategy(),
        1 => prop::collection::vec(leaf_strategy(), 0..4).prop_map(Value::Array),
    ]
}

fn record_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        6 => prop::collection::vec(prop::option::of(field_strategy()), 6).prop_map(|values| {
            let mut record = Map::new();
            for (field, value) in FIELDS.iter().zip(values) {
                if let Some(value) = value {
                    record.insert(field.to_string(), value);
                }
            }
            Value::Object(record)
        }),
        1 => leaf_strategy(),
    ]
}

fn catalog_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(record_strategy(), 0..8)
}

proptest! {
    #[test]
    fn test_document_without_block_is_unchanged(text in any::<String>()) {
        prop_assume!(!text.starts_with("---"));
        let result = parse_frontmatter(&text);
        prop_assert!(result.metadata.is_empty());
        prop_assert_eq!(result.content, text);
    }

    #[test]
    fn test_repair_is_idempotent(mut records in catalog_strategy()) {
        repair_catalog(&mut records);
        let snapshot = records.clone();

        let second = repair_catalog(&mut records);
        prop_assert!(second.fixes.is_empty(), "second run applied {:?}", second.fixes);
        prop_assert_eq!(records, snapshot);
    }

    #[test]
    fn test_repair_assigns_dense_ids(mut records in catalog_strategy()) {
        let count = records.len();
        repair_catalog(&mut records);

        prop_assert_eq!(records.len(), count);
        for (index, record) in records.iter().enumerate() {
            let expected = Value::String((index + 1).to_string());
            prop_assert_eq!(&record["id"], &expected);
        }
    }

    #[test]
    fn test_repaired_catalog_has_no_errors(mut records in catalog_strategy()) {
        repair_catalog(&mut records);
        let result = validate_catalog(&records, true);
        prop_assert!(result.is_ok(), "errors: {:?}", result.errors());
    }

    #[test]
    fn test_group_string_becomes_singleton(group in "[A-Za-z][A-Za-z ]{0,15}") {
        let mut records = vec![serde_json::json!({"group": group.clone()})];
        Repairer::new().repair(&mut records);
        let expected = serde_json::json!([group]);
        prop_assert_eq!(&records[0]["group"], &expected);
    }

    #[test]
    fn test_classifier_is_deterministic(
        description in "[a-z ]{0,40}",
        name in "[a-z-]{0,20}",
    ) {
        let first = Classifier::for_compile();
        let second = Classifier::for_compile();
        let symbol = first.classify(&description, &name).to_string();
        prop_assert_eq!(first.classify(&description, &name), symbol.as_str());
        prop_assert_eq!(second.classify(&description, &name), symbol.as_str());

        let repair = Classifier::for_repair();
        prop_assert_eq!(
            repair.classify(&description, &name),
            repair.classify(&description, &name)
        );
    }
}
