//! Declarative patterns tested against values and the current state.
//!
//! A `Pattern` is a closed set of shapes. Every shape is handled by the single
//! exhaustive `match` in [`crate::core::matches`], so there is no such thing
//! as an unrecognised pattern at runtime.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// User predicate invoked with `(value, state)`.
pub type PredicateFn = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// Constant value matched by strict equality.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Str(String),
    /// Numbers compare as doubles, so `3` and `3.0` are the same literal.
    Number(f64),
    Bool(bool),
}

impl Literal {
    /// Strict equality against a dynamic value.
    pub fn equals(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::Str(expected), Value::String(actual)) => expected == actual,
            (Literal::Number(expected), Value::Number(actual)) => {
                actual.as_f64().is_some_and(|n| n == *expected)
            }
            (Literal::Bool(expected), Value::Bool(actual)) => expected == actual,
            _ => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "{s:?}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Runtime kind of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeTag {
    Number,
    String,
    Bool,
    Array,
    /// Any object, regardless of its keys.
    Object,
}

impl TypeTag {
    pub fn admits(self, value: &Value) -> bool {
        match self {
            TypeTag::Number => value.is_number(),
            TypeTag::String => value.is_string(),
            TypeTag::Bool => value.is_boolean(),
            TypeTag::Array => value.is_array(),
            TypeTag::Object => value.is_object(),
        }
    }
}

/// A declarative description of the values a rule accepts.
///
/// # Example
///
/// ```rust
/// use rulebook::core::Pattern;
/// use serde_json::{json, Value};
///
/// let pattern = Pattern::shape([
///     ("id", Pattern::number()),
///     ("tags", Pattern::array_of(Pattern::string())),
/// ]);
///
/// assert!(pattern.matches(&json!({ "id": 7, "tags": ["a"], "extra": true }), &Value::Null));
/// assert!(!pattern.matches(&json!({ "id": "7", "tags": [] }), &Value::Null));
/// ```
#[derive(Clone)]
pub enum Pattern {
    /// Anything except null.
    Wildcard,
    Literal(Literal),
    Type(TypeTag),
    Predicate(PredicateFn),
    /// Object carrying at least these keys, each matching its pattern.
    Shape(Vec<(String, Pattern)>),
    /// Array at least as long as the pattern, matched position by position.
    Sequence(Vec<Pattern>),
    Optional(Box<Pattern>),
    OneOf(Vec<Pattern>),
    ArrayOf(Box<Pattern>),
    ObjectOf(Box<Pattern>),
}

impl Pattern {
    pub fn any() -> Self {
        Pattern::Wildcard
    }

    pub fn number() -> Self {
        Pattern::Type(TypeTag::Number)
    }

    pub fn string() -> Self {
        Pattern::Type(TypeTag::String)
    }

    pub fn boolean() -> Self {
        Pattern::Type(TypeTag::Bool)
    }

    pub fn array() -> Self {
        Pattern::Type(TypeTag::Array)
    }

    pub fn object() -> Self {
        Pattern::Type(TypeTag::Object)
    }

    /// Match when `predicate(value, state)` returns `true`.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        Pattern::Predicate(Arc::new(predicate))
    }

    /// Match null, or anything `inner` matches.
    pub fn optional(inner: impl Into<Pattern>) -> Self {
        Pattern::Optional(Box::new(inner.into()))
    }

    pub fn one_of<I, P>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Pattern>,
    {
        Pattern::OneOf(alternatives.into_iter().map(Into::into).collect())
    }

    /// Match an array whose every element matches `inner`.
    pub fn array_of(inner: impl Into<Pattern>) -> Self {
        Pattern::ArrayOf(Box::new(inner.into()))
    }

    /// Match an object whose every property value matches `inner`.
    pub fn object_of(inner: impl Into<Pattern>) -> Self {
        Pattern::ObjectOf(Box::new(inner.into()))
    }

    pub fn shape<I, K, P>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<Pattern>,
    {
        Pattern::Shape(
            fields
                .into_iter()
                .map(|(key, pattern)| (key.into(), pattern.into()))
                .collect(),
        )
    }

    pub fn sequence<I, P>(items: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Pattern>,
    {
        Pattern::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Constant positions are stripped from decoded call arguments.
    pub fn is_constant(&self) -> bool {
        matches!(self, Pattern::Literal(_))
    }

    /// Test `value` against this pattern. `state` is handed to predicates.
    pub fn matches(&self, value: &Value, state: &Value) -> bool {
        super::matcher::matches(self, value, state)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => f.write_str("Wildcard"),
            Pattern::Literal(literal) => write!(f, "Literal({literal})"),
            Pattern::Type(tag) => write!(f, "Type({tag:?})"),
            Pattern::Predicate(_) => f.write_str("Predicate(..)"),
            Pattern::Shape(fields) => f
                .debug_map()
                .entries(fields.iter().map(|(k, p)| (k, p)))
                .finish(),
            Pattern::Sequence(items) => f.debug_list().entries(items).finish(),
            Pattern::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            Pattern::OneOf(alternatives) => f.debug_tuple("OneOf").field(alternatives).finish(),
            Pattern::ArrayOf(inner) => f.debug_tuple("ArrayOf").field(inner).finish(),
            Pattern::ObjectOf(inner) => f.debug_tuple("ObjectOf").field(inner).finish(),
        }
    }
}

impl From<Literal> for Pattern {
    fn from(literal: Literal) -> Self {
        Pattern::Literal(literal)
    }
}

impl From<TypeTag> for Pattern {
    fn from(tag: TypeTag) -> Self {
        Pattern::Type(tag)
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Literal(Literal::Str(s.to_string()))
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::Literal(Literal::Str(s))
    }
}

impl From<&String> for Pattern {
    fn from(s: &String) -> Self {
        Pattern::Literal(Literal::Str(s.clone()))
    }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self {
        Pattern::Literal(Literal::Bool(b))
    }
}

impl From<f64> for Pattern {
    fn from(n: f64) -> Self {
        Pattern::Literal(Literal::Number(n))
    }
}

macro_rules! integer_literal {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Pattern {
                fn from(n: $int) -> Self {
                    Pattern::Literal(Literal::Number(n as f64))
                }
            }
        )*
    };
}

integer_literal!(i32, i64, u32, u64, usize);

/// Read a JSON value as a pattern: null is a wildcard, scalars are literals,
/// objects are shapes and arrays are positional sequences.
impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Pattern::Wildcard,
            Value::Bool(b) => Pattern::Literal(Literal::Bool(b)),
            Value::Number(n) => Pattern::Literal(Literal::Number(n.as_f64().unwrap_or(f64::NAN))),
            Value::String(s) => Pattern::Literal(Literal::Str(s)),
            Value::Array(items) => Pattern::Sequence(items.into_iter().map(Pattern::from).collect()),
            Value::Object(map) => Pattern::Shape(
                map.into_iter()
                    .map(|(key, value)| (key, Pattern::from(value)))
                    .collect(),
            ),
        }
    }
}
