use crate::{
    path::{ExtractError, FieldPath, Record, extract_value},
    query::predicate::{CompareOp, ComparePredicate, Predicate},
    value::{TextMode, Value, strict_order_cmp},
};
use std::cmp::Ordering;

///
/// FieldPresence
///
/// Result of attempting to read a field from a record during predicate
/// evaluation. This distinguishes between a missing field and a
/// present field whose value may be `Null`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum FieldPresence {
    /// Field exists and has a value (including `Value::Null`).
    Present(Value),
    /// Field is not present on the record.
    Missing,
}

// Read a relation-form field. An unset relation on the way reads as NULL,
// matching outer-join semantics.
fn read_field(record: &dyn Record, field: &str) -> FieldPresence {
    let Ok(path) = FieldPath::from_relation(field) else {
        return FieldPresence::Missing;
    };

    match extract_value(&path, record) {
        Ok(value) => FieldPresence::Present(value),
        Err(ExtractError::Missing(_)) => FieldPresence::Present(Value::Null),
        Err(ExtractError::UnknownAttribute { .. }) => FieldPresence::Missing,
    }
}

// Evaluate a field predicate only when the field is present.
fn on_present(record: &dyn Record, field: &str, f: impl FnOnce(&Value) -> bool) -> bool {
    match read_field(record, field) {
        FieldPresence::Present(value) => f(&value),
        FieldPresence::Missing => false,
    }
}

///
/// Evaluate a predicate against a single record.
///
/// This function performs **pure runtime evaluation**:
/// - no schema access
/// - no planning
/// - no validation
///
/// Any unsupported comparison simply evaluates to `false`.
///
#[must_use]
pub fn eval(record: &dyn Record, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::False => false,

        Predicate::And(children) => children.iter().all(|child| eval(record, child)),
        Predicate::Or(children) => children.iter().any(|child| eval(record, child)),
        Predicate::Not(inner) => !eval(record, inner),

        Predicate::Compare(cmp) => eval_compare(record, cmp),

        Predicate::In { field, values } => on_present(record, field, |actual| {
            values.iter().any(|candidate| values_equal(actual, candidate))
        }),

        Predicate::IsNull { field } => {
            matches!(read_field(record, field), FieldPresence::Present(Value::Null))
        }

        Predicate::TextContainsCi { field, value } => on_present(record, field, |actual| {
            // NOTE: Invalid text comparisons are treated as non-matches.
            actual.text_contains(value, TextMode::Ci).unwrap_or(false)
        }),
    }
}

///
/// Evaluate a single comparison predicate against a record.
///
/// Returns `false` if:
/// - the field is missing
/// - the comparison is not defined for the operand types
///
fn eval_compare(record: &dyn Record, cmp: &ComparePredicate) -> bool {
    let ComparePredicate { field, op, value } = cmp;

    let FieldPresence::Present(actual) = read_field(record, field) else {
        return false;
    };

    // NOTE: Comparison helpers return None when a comparison is invalid; eval treats that as false.
    match op {
        CompareOp::Eq => values_equal(&actual, value),
        CompareOp::Ne => strict_order_cmp(&actual, value).is_some_and(Ordering::is_ne),

        CompareOp::Lt => strict_order_cmp(&actual, value).is_some_and(Ordering::is_lt),
        CompareOp::Lte => strict_order_cmp(&actual, value).is_some_and(Ordering::is_le),
        CompareOp::Gt => strict_order_cmp(&actual, value).is_some_and(Ordering::is_gt),
        CompareOp::Gte => strict_order_cmp(&actual, value).is_some_and(Ordering::is_ge),

        CompareOp::Contains => actual.text_contains(value, TextMode::Cs).unwrap_or(false),
        CompareOp::StartsWith => actual.text_starts_with(value).unwrap_or(false),
        CompareOp::EndsWith => actual.text_ends_with(value).unwrap_or(false),
    }
}

// NULL never equals anything, itself included.
fn values_equal(actual: &Value, expected: &Value) -> bool {
    strict_order_cmp(actual, expected).is_some_and(Ordering::is_eq)
}
