use super::*;
use std::cmp::Ordering;

#[test]
fn canonical_order_ranks_null_first() {
    let mut values = vec![
        Value::from("b"),
        Value::Int(3),
        Value::Null,
        Value::Bool(true),
        Value::from("a"),
        Value::Int(-1),
    ];
    values.sort();

    assert_eq!(
        values,
        vec![
            Value::Null,
            Value::Bool(true),
            Value::Int(-1),
            Value::Int(3),
            Value::from("a"),
            Value::from("b"),
        ]
    );
}

#[test]
fn canonical_order_is_rank_only_across_numeric_variants() {
    assert_eq!(
        canonical_cmp(&Value::Int(100), &Value::Uint(1)),
        Ordering::Less
    );
    assert_ne!(Value::Int(1), Value::Uint(1));
}

#[test]
fn strict_order_widens_numeric_variants() {
    assert_eq!(
        strict_order_cmp(&Value::Int(100), &Value::Uint(1)),
        Some(Ordering::Greater)
    );
    assert_eq!(
        strict_order_cmp(&Value::Int(-1), &Value::Uint(0)),
        Some(Ordering::Less)
    );
    assert_eq!(
        strict_order_cmp(&Value::Uint(2), &Value::from(2.5)),
        Some(Ordering::Less)
    );
}

#[test]
fn strict_order_rejects_mismatched_variants() {
    assert_eq!(strict_order_cmp(&Value::from("1"), &Value::Int(1)), None);
    assert_eq!(strict_order_cmp(&Value::Null, &Value::Null), None);
}

#[test]
fn float_zero_signs_compare_equal() {
    assert_eq!(Value::from(0.0), Value::from(-0.0));
    assert_eq!(
        canonical_cmp(&Value::from(f64::NAN), &Value::from(f64::NAN)),
        Ordering::Equal
    );
}

#[test]
fn display_renders_null_as_empty() {
    assert_eq!(Value::Null.to_string(), "");
    assert_eq!(Value::from("Sales").to_string(), "Sales");
    assert_eq!(Value::Int(-7).to_string(), "-7");
    assert_eq!(Value::Bool(false).to_string(), "false");
}

#[test]
fn numeric_variants_are_numeric() {
    for value in [Value::Int(-1), Value::Uint(2), Value::from(0.5)] {
        assert!(value.is_numeric(), "{value:?}");
    }
    for value in [Value::Null, Value::Bool(true), Value::from("1")] {
        assert!(!value.is_numeric(), "{value:?}");
    }
}

#[test]
fn option_converts_to_null() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(5_i32)), Value::Int(5));
}

#[test]
fn text_helpers_require_text_on_both_sides() {
    let name = Value::from("Widget A");

    assert_eq!(
        name.text_contains(&Value::from("widget"), TextMode::Ci),
        Some(true)
    );
    assert_eq!(
        name.text_contains(&Value::from("widget"), TextMode::Cs),
        Some(false)
    );
    assert_eq!(name.text_starts_with(&Value::from("Wid")), Some(true));
    assert_eq!(name.text_ends_with(&Value::Int(1)), None);
}

#[test]
fn serializes_as_plain_json_scalars() {
    let ulid = Ulid::from_parts(0, 1);
    let json = serde_json::to_value(vec![
        Value::Null,
        Value::Int(4),
        Value::from("x"),
        Value::Ulid(ulid),
    ])
    .unwrap();

    assert_eq!(
        json,
        serde_json::json!([null, 4, "x", ulid.to_string()])
    );
}
