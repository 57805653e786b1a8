//! Scalar comparison semantics for the predicate sub-language.
//!
//! Comparisons dispatch on the value tag. Integers and floats coerce to a
//! common numeric domain; every other cross-type comparison is false. Null
//! participates only in equality: `null = null` holds, `x != null` holds
//! for non-null `x`, and every ordering comparison touching null is false.

use std::cmp::Ordering;

use crate::model::PropertyValue;
use crate::query::ast::{CompareOp, StringOp};

/// Equality across tags: numeric family coerced, null equal only to null.
pub(crate) fn values_equal(lhs: &PropertyValue, rhs: &PropertyValue) -> bool {
    use PropertyValue::*;
    match (lhs, rhs) {
        (Null, Null) => true,
        (Bool(a), Bool(b)) => a == b,
        (Int(a), Int(b)) => a == b,
        (Float(a), Float(b)) => a == b,
        (Int(a), Float(b)) | (Float(b), Int(a)) => (*a as f64) == *b,
        (String(a), String(b)) => a == b,
        _ => false,
    }
}

/// Ordering across tags: numeric family coerced, same-type for the rest,
/// `None` for any mixed or null operand.
pub(crate) fn partial_cmp_value(lhs: &PropertyValue, rhs: &PropertyValue) -> Option<Ordering> {
    use PropertyValue::*;
    match (lhs, rhs) {
        (Bool(a), Bool(b)) => a.partial_cmp(b),
        (Int(a), Int(b)) => a.partial_cmp(b),
        (Float(a), Float(b)) => a.partial_cmp(b),
        (Int(a), Float(b)) => (*a as f64).partial_cmp(b),
        (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)),
        (String(a), String(b)) => a.partial_cmp(b),
        _ => None,
    }
}

/// Applies a comparison operator under the rules above.
pub(crate) fn compare(op: CompareOp, lhs: &PropertyValue, rhs: &PropertyValue) -> bool {
    match op {
        CompareOp::Eq => values_equal(lhs, rhs),
        CompareOp::Ne => !values_equal(lhs, rhs),
        CompareOp::Lt => matches!(partial_cmp_value(lhs, rhs), Some(Ordering::Less)),
        CompareOp::Le => matches!(
            partial_cmp_value(lhs, rhs),
            Some(Ordering::Less | Ordering::Equal)
        ),
        CompareOp::Gt => matches!(partial_cmp_value(lhs, rhs), Some(Ordering::Greater)),
        CompareOp::Ge => matches!(
            partial_cmp_value(lhs, rhs),
            Some(Ordering::Greater | Ordering::Equal)
        ),
    }
}

/// Applies a string operator; false unless both sides are strings.
pub(crate) fn apply_string_op(op: StringOp, lhs: &PropertyValue, rhs: &str) -> bool {
    let PropertyValue::String(subject) = lhs else {
        return false;
    };
    match op {
        StringOp::StartsWith => subject.starts_with(rhs),
        StringOp::EndsWith => subject.ends_with(rhs),
        StringOp::Contains => subject.contains(rhs),
    }
}
