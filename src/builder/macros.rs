//! Macros for ergonomic action construction.

/// Encode a call from heterogeneous values.
///
/// Each argument is an expression converted with `serde_json::json!`, so
/// anything serializable may be passed.
///
/// # Example
///
/// ```
/// use rulebook::{call, Action};
/// use serde_json::json;
///
/// let action = call!["todo", "add", json!({ "title": "write docs" })];
/// assert_eq!(
///     action,
///     Action::Call(vec![json!("todo"), json!("add"), json!({ "title": "write docs" })])
/// );
/// ```
#[macro_export]
macro_rules! call {
    ($($value:expr),* $(,)?) => {
        $crate::core::Action::Call(::std::vec![$(::serde_json::json!($value)),*])
    };
}
