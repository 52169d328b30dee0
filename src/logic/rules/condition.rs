use serde_json::Value;

use crate::models::{ConditionOperator, ConditionValue, Context, RuleCondition};

/// Checks one dimensional condition against the design context.
///
/// The dimension resolves to the first of its candidate keys present in the
/// context. Anything the operator does not cover evaluates to `false`.
pub fn evaluate_condition(condition: &RuleCondition, context: &Context) -> bool {
    let resolved = context.first_of(condition.dimension.context_keys());
    let expected = &condition.value;

    let result = match condition.operator {
        ConditionOperator::Equals => equals(resolved, expected),
        ConditionOperator::NotEquals => !equals(resolved, expected),
        ConditionOperator::Contains => contains(resolved, expected),
        ConditionOperator::GreaterThan => {
            compare_numbers(resolved, expected, |actual, bound| actual > bound)
        }
        ConditionOperator::LessThan => {
            compare_numbers(resolved, expected, |actual, bound| actual < bound)
        }
        ConditionOperator::In => match expected {
            ConditionValue::List(members) => resolved
                .map(|actual| members.iter().any(|m| m.strict_eq(actual)))
                .unwrap_or(false),
            _ => false,
        },
    };

    tracing::trace!(
        dimension = %condition.dimension,
        operator = %condition.operator,
        matched = result,
        "condition evaluated"
    );
    result
}

fn equals(resolved: Option<&Value>, expected: &ConditionValue) -> bool {
    match (resolved, expected.as_scalar()) {
        (Some(actual), Some(scalar)) => scalar.strict_eq(actual),
        // List values are distinct instances and never strictly equal
        _ => false,
    }
}

fn contains(resolved: Option<&Value>, expected: &ConditionValue) -> bool {
    match resolved {
        Some(Value::Array(items)) => match expected.as_scalar() {
            Some(needle) => items.iter().any(|item| needle.strict_eq(item)),
            None => false,
        },
        Some(Value::String(haystack)) => match expected {
            ConditionValue::Text(needle) => haystack.contains(needle.as_str()),
            _ => false,
        },
        _ => false,
    }
}

fn compare_numbers<F>(resolved: Option<&Value>, expected: &ConditionValue, cmp: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    match (resolved.and_then(Value::as_f64), expected.as_f64()) {
        (Some(actual), Some(bound)) => cmp(actual, bound),
        _ => false,
    }
}
