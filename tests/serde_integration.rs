//! Serialized error reports (requires the `serde` feature)

#![cfg(feature = "serde")]

use fieldguard::{record, validate, ConstraintKind, Error};
use serde_json::json;

record! {
    pub struct Order {
        #[validate = "between:1,99"]
        pub quantity: i32,
        #[validate = "in:eur,usd"]
        pub currencies: Vec<String>,
    }
}

#[test]
fn test_error_report_serializes() {
    let order = Order {
        quantity: 0,
        currencies: vec!["eur".into(), "gbp".into()],
    };
    let err = validate(&order).unwrap_err();

    let report = serde_json::to_value(&err).unwrap();
    assert_eq!(
        report,
        json!({
            "error": "invalid",
            "details": [
                {
                    "field": "quantity",
                    "violation": { "violation": "integer_out_of_range" }
                },
                {
                    "field": "currencies",
                    "violation": {
                        "violation": "element",
                        "element": "string",
                        "index": 1,
                        "reason": "not_allowed"
                    }
                }
            ]
        })
    );
}

#[test]
fn test_not_a_record_serializes() {
    let report = serde_json::to_value(Error::NotARecord).unwrap();
    assert_eq!(report, json!({ "error": "not_a_record" }));
}

#[test]
fn test_constraint_kind_uses_annotation_tokens() {
    assert_eq!(
        serde_json::to_value(ConstraintKind::Range).unwrap(),
        json!("between")
    );
    let kind: ConstraintKind = serde_json::from_str("\"in\"").unwrap();
    assert_eq!(kind, ConstraintKind::Membership);
    assert!(serde_json::from_str::<ConstraintKind>("\"regexp\"").is_err());
}

#[test]
fn test_unknown_kind_lists_every_token() {
    let message = serde_json::from_str::<ConstraintKind>("\"regexp\"")
        .unwrap_err()
        .to_string();
    for token in ConstraintKind::TOKENS {
        assert!(message.contains(token), "{message} should mention {token}");
    }
}
