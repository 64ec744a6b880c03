use std::collections::HashSet;

use csv_tablegen::headers::{normalize, sanitize_identifier, sanitize_unique};
use csv_tablegen::infer::{SqlType, infer};
use csv_tablegen::sql::{ColumnDef, render_create_table};
use csv_tablegen::value::RawValue;
use proptest::prelude::*;

#[test]
fn full_pipeline_produces_the_expected_statement() {
    let raw_headers = vec![Some("Name"), Some("Age")];
    let normalized = normalize(raw_headers.into_iter());
    let identifiers = sanitize_unique(&normalized.names);

    let name_values = vec![
        RawValue::Text("Alice".to_string()),
        RawValue::Text("Bob".to_string()),
    ];
    let age_values = vec![
        RawValue::Text("30".to_string()),
        RawValue::Text("41".to_string()),
    ];

    let columns = vec![
        ColumnDef {
            identifier: identifiers[0].clone(),
            sql_type: infer(&normalized.names[0], &name_values, 2),
        },
        ColumnDef {
            identifier: identifiers[1].clone(),
            sql_type: infer(&normalized.names[1], &age_values, 2),
        },
    ];

    assert_eq!(
        render_create_table(&sanitize_identifier("People"), &columns),
        "CREATE TABLE [People] (\n    [Name] NVARCHAR(5),\n    [Age] INT\n);"
    );
}

#[test]
fn inference_is_deterministic() {
    let values = vec![
        RawValue::Text("2024-01-01".to_string()),
        RawValue::Null,
        RawValue::Text("15/02/2024".to_string()),
    ];
    let first = infer("created", &values, 2);
    let second = infer("created", &values, 2);
    assert_eq!(first, second);
    assert_eq!(first, SqlType::DateTime);
}

fn header_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        // Plain identifiers, including ones that collide after trimming.
        "[a-c]{1,3}",
        Just("  ".to_string()),
        Just("id".to_string()),
        Just("id_2".to_string()),
        Just("Unit Price".to_string()),
    ])
}

proptest! {
    #[test]
    fn normalized_headers_are_unique_and_order_preserving(
        raw in proptest::collection::vec(header_strategy(), 0..24)
    ) {
        let normalized = normalize(raw.iter().map(|h| h.as_deref()));

        prop_assert_eq!(normalized.names.len(), raw.len());

        let mut seen = HashSet::new();
        for name in &normalized.names {
            prop_assert!(!name.trim().is_empty());
            prop_assert!(seen.insert(name.clone()), "duplicate name {}", name);
        }
    }

    #[test]
    fn sanitized_identifiers_are_unique_and_bracket_safe(
        raw in proptest::collection::vec(header_strategy(), 0..24)
    ) {
        let normalized = normalize(raw.iter().map(|h| h.as_deref()));
        let identifiers = sanitize_unique(&normalized.names);

        prop_assert_eq!(identifiers.len(), normalized.names.len());

        let mut seen = HashSet::new();
        for identifier in &identifiers {
            prop_assert!(
                identifier.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "unsafe identifier {}",
                identifier
            );
            prop_assert!(seen.insert(identifier.clone()));
        }
    }

    #[test]
    fn infer_never_panics_and_always_decides(
        values in proptest::collection::vec(
            prop_oneof![
                Just(RawValue::Null),
                any::<i64>().prop_map(|n| RawValue::Text(n.to_string())),
                "[ -~]{0,40}".prop_map(RawValue::Text),
                any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(RawValue::Number),
                any::<bool>().prop_map(RawValue::Boolean),
            ],
            0..64,
        ),
        threshold in 1usize..1000,
    ) {
        let decision = infer("column", &values, threshold);
        if let SqlType::Nvarchar(len) = decision {
            prop_assert!((1..=255).contains(&len));
        }
    }
}
