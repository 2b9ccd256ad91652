//! Structural matching of patterns against dynamic values.

use super::pattern::Pattern;
use serde_json::Value;

/// Test `value` against `pattern`.
///
/// Pure and read-only: neither the pattern, the value nor the state is
/// modified, so matching is safe to repeat and to run concurrently.
/// Predicates receive `(value, state)`.
///
/// # Example
///
/// ```rust
/// use rulebook::core::{matches, Pattern};
/// use serde_json::{json, Value};
///
/// assert!(matches(&Pattern::number(), &json!(3), &Value::Null));
/// assert!(matches(&Pattern::from("add"), &json!("add"), &Value::Null));
/// assert!(!matches(&Pattern::any(), &Value::Null, &Value::Null));
/// ```
pub fn matches(pattern: &Pattern, value: &Value, state: &Value) -> bool {
    match pattern {
        Pattern::Wildcard => !value.is_null(),
        Pattern::Literal(literal) => literal.equals(value),
        Pattern::Type(tag) => tag.admits(value),
        Pattern::Predicate(predicate) => predicate(value, state),
        Pattern::Shape(fields) => match value {
            // value may carry keys the pattern does not mention
            Value::Object(object) => fields.iter().all(|(key, field)| {
                object
                    .get(key)
                    .is_some_and(|actual| matches(field, actual, state))
            }),
            _ => false,
        },
        Pattern::Sequence(items) => match value {
            Value::Array(values) => {
                values.len() >= items.len()
                    && items
                        .iter()
                        .zip(values)
                        .all(|(item, actual)| matches(item, actual, state))
            }
            _ => false,
        },
        Pattern::Optional(inner) => value.is_null() || matches(inner, value, state),
        Pattern::OneOf(alternatives) => alternatives
            .iter()
            .any(|alternative| matches(alternative, value, state)),
        Pattern::ArrayOf(inner) => match value {
            Value::Array(values) => values.iter().all(|v| matches(inner, v, state)),
            _ => false,
        },
        Pattern::ObjectOf(inner) => match value {
            Value::Object(object) => object.values().all(|v| matches(inner, v, state)),
            _ => false,
        },
    }
}
