//! Run-scoped mutation context for handlers.

use crate::core::Action;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while folding queued mutations into the next state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error("cannot {op} on a {found} state; expected an object")]
    NonObjectState { op: &'static str, found: &'static str },

    #[error("merge produced a {found}; expected an object")]
    NonObjectPatch { found: &'static str },
}

type Compute = Box<dyn FnOnce(&Value) -> Value>;
type Reduce = Box<dyn FnOnce(Value, &Action) -> Value>;

enum Mutation {
    Set { key: String, compute: Compute },
    Merge(Compute),
    Update(Reduce),
}

impl Mutation {
    fn apply(self, state: Value, action: &Action) -> Result<Value, DispatchError> {
        match self {
            Mutation::Set { key, compute } => {
                let value = compute(&state);
                let mut object = into_object(state, "set")?;
                object.insert(key, value);
                Ok(Value::Object(object))
            }
            Mutation::Merge(compute) => match compute(&state) {
                Value::Null => Ok(state),
                Value::Object(patch) => {
                    let mut object = into_object(state, "merge")?;
                    object.extend(patch);
                    Ok(Value::Object(object))
                }
                other => Err(DispatchError::NonObjectPatch {
                    found: kind(&other),
                }),
            },
            Mutation::Update(reduce) => Ok(reduce(state, action)),
        }
    }
}

/// Null reads as an empty object, so a handler may build state from nothing.
fn into_object(state: Value, op: &'static str) -> Result<Map<String, Value>, DispatchError> {
    match state {
        Value::Null => Ok(Map::new()),
        Value::Object(object) => Ok(object),
        other => Err(DispatchError::NonObjectState {
            op,
            found: kind(&other),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Write-only queue of state transformations collected during one run.
///
/// A fresh `Mutations` is handed to the hooks and handler of a matched rule;
/// nothing is applied until the run folds the queue, in call order, into the
/// next state. Closures passed here see the state as left by the mutations
/// queued before them.
///
/// # Example
///
/// ```rust
/// use rulebook::dispatch::Handler;
/// use rulebook::{call, Pattern};
/// use serde_json::json;
///
/// let handler = Handler::build(|b| {
///     Ok(b.on(("rename", Pattern::string()), |m, args| {
///         m.set("name", args[0].clone())
///             .set_with("renames", |s| json!(s["renames"].as_i64().unwrap_or(0) + 1));
///     }))
/// })
/// .unwrap();
///
/// let next = handler.run(Some(json!({ "renames": 0 })), &call!["rename", "ada"]).unwrap();
/// assert_eq!(next, json!({ "name": "ada", "renames": 1 }));
/// ```
pub struct Mutations {
    queue: Vec<Mutation>,
}

impl Mutations {
    pub(crate) fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Assign `value` to the state field `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        self.queue.push(Mutation::Set {
            key: key.into(),
            compute: Box::new(move |_| value),
        });
        self
    }

    /// Assign the value computed from the current state to `key`.
    pub fn set_with<F>(&mut self, key: impl Into<String>, compute: F) -> &mut Self
    where
        F: FnOnce(&Value) -> Value + 'static,
    {
        self.queue.push(Mutation::Set {
            key: key.into(),
            compute: Box::new(compute),
        });
        self
    }

    /// Shallow-merge the object returned by `compute` into the state.
    pub fn merge<F>(&mut self, compute: F) -> &mut Self
    where
        F: FnOnce(&Value) -> Value + 'static,
    {
        self.queue.push(Mutation::Merge(Box::new(compute)));
        self
    }

    /// Replace the whole state with `reduce(state, action)`.
    pub fn update<F>(&mut self, reduce: F) -> &mut Self
    where
        F: FnOnce(Value, &Action) -> Value + 'static,
    {
        self.queue.push(Mutation::Update(Box::new(reduce)));
        self
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Apply every queued mutation, in order, starting from `state`.
    pub(crate) fn fold(self, state: Value, action: &Action) -> Result<Value, DispatchError> {
        self.queue
            .into_iter()
            .try_fold(state, |state, mutation| mutation.apply(state, action))
    }
}
