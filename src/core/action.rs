//! Actions delivered to a rule set, and the call encoding convention.

use super::matcher::matches;
use super::pattern::Pattern;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Reserved discriminant carried by encoded calls on the wire.
pub const CALL_TAG: &str = "@@rulebook/call";

/// An incoming action.
///
/// On the wire a `Call` is `{"type": CALL_TAG, "payload": [...]}`; any other
/// value is an `Event`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Action {
    /// Ordered arguments of a builder-style call, e.g. `["add", 3]`.
    Call(Vec<Value>),
    /// Conventional `{type, ...}` event from the surrounding system.
    Event(Value),
}

/// Wrap call arguments as a tagged action.
///
/// # Example
///
/// ```rust
/// use rulebook::core::{encode_call, Action};
/// use serde_json::json;
///
/// let action = encode_call(vec![json!("add"), json!(3)]);
/// assert_eq!(action, Action::Call(vec![json!("add"), json!(3)]));
/// ```
pub fn encode_call(values: Vec<Value>) -> Action {
    Action::Call(values)
}

impl Action {
    pub fn event(event: Value) -> Self {
        Action::Event(event)
    }

    /// The `type` field of an event. Calls have none.
    pub fn event_type(&self) -> Option<&str> {
        match self {
            Action::Call(_) => None,
            Action::Event(event) => event.get("type").and_then(Value::as_str),
        }
    }

    /// Test a rule pattern against this action.
    ///
    /// Calls are matched position by position, a missing argument reading as
    /// null and surplus arguments being allowed. Events are matched whole
    /// against the first segment.
    pub fn matches(&self, pattern: &[Pattern], state: &Value) -> bool {
        match self {
            Action::Call(args) => pattern.iter().enumerate().all(|(i, segment)| {
                matches(segment, args.get(i).unwrap_or(&Value::Null), state)
            }),
            Action::Event(event) => match pattern.first() {
                Some(segment) => matches(segment, event, state),
                None => !event.is_null(),
            },
        }
    }

    /// Arguments handed to the handler of a rule with this `pattern`.
    ///
    /// For calls, the positions held by literal segments are dropped and the
    /// remaining values are kept in order. Every open segment yields a value,
    /// null when the call stopped short of it. Events are always passed whole.
    pub fn decode(&self, pattern: &[Pattern]) -> Vec<Value> {
        match self {
            Action::Call(args) => (0..args.len().max(pattern.len()))
                .filter(|i| !pattern.get(*i).is_some_and(Pattern::is_constant))
                .map(|i| args.get(i).cloned().unwrap_or(Value::Null))
                .collect(),
            Action::Event(event) => vec![event.clone()],
        }
    }
}

impl From<Value> for Action {
    /// Tagged wire calls decode to `Call`, everything else is an `Event`.
    fn from(value: Value) -> Self {
        if value.get("type").and_then(Value::as_str) == Some(CALL_TAG) {
            if let Some(Value::Array(args)) = value.get("payload") {
                return Action::Call(args.clone());
            }
        }
        Action::Event(value)
    }
}

impl From<Action> for Value {
    fn from(action: Action) -> Self {
        match action {
            Action::Call(args) => json!({ "type": CALL_TAG, "payload": args }),
            Action::Event(event) => event,
        }
    }
}
