//! State-reducing rule set.

use crate::builder::{BuildError, RuleSetBuilder};
use crate::core::Action;
use crate::dispatch::mutations::{DispatchError, Mutations};
use crate::dispatch::rule::{Outcome, RuleSet};
use serde_json::Value;
use tracing::trace;

/// Reduces `(state, action)` to the next state using first-match rules.
///
/// # Example
///
/// ```rust
/// use rulebook::dispatch::Handler;
/// use rulebook::{call, Pattern};
/// use serde_json::json;
///
/// let counter = Handler::build(|b| {
///     b.on("increment", |m, _| {
///         m.set_with("count", |s| json!(s["count"].as_i64().unwrap_or(0) + 1));
///     })
///     .on(("add", Pattern::number()), |m, args| {
///         let n = args[0].as_i64().unwrap_or(0);
///         m.set_with("count", move |s| json!(s["count"].as_i64().unwrap_or(0) + n));
///     })
///     .init_state(json!({ "count": 0 }))
/// })
/// .unwrap();
///
/// let state = counter.run(None, &call!["increment"]).unwrap();
/// let state = counter.run(Some(state), &call!["add", 3]).unwrap();
/// assert_eq!(state, json!({ "count": 4 }));
/// ```
pub struct Handler {
    rules: RuleSet<Mutations>,
    initial_state: Option<Value>,
}

impl Handler {
    /// Run the builder callback once and freeze the result.
    pub fn build<F>(configure: F) -> Result<Self, BuildError>
    where
        F: FnOnce(RuleSetBuilder<Mutations>) -> Result<RuleSetBuilder<Mutations>, BuildError>,
    {
        let (rules, initial_state) = configure(RuleSetBuilder::new())?.finish();
        Ok(Self {
            rules,
            initial_state,
        })
    }

    /// State used when `run` receives `None`.
    pub fn initial_state(&self) -> Option<&Value> {
        self.initial_state.as_ref()
    }

    pub fn rule_set(&self) -> &RuleSet<Mutations> {
        &self.rules
    }

    /// Compute the next state for `action`.
    ///
    /// `None` stands for "no state yet" and is replaced by the initial state,
    /// or null if none was declared. When nothing matches and there is no
    /// fallback the state is returned unchanged.
    pub fn run(&self, state: Option<Value>, action: &Action) -> Result<Value, DispatchError> {
        let state = state
            .or_else(|| self.initial_state.clone())
            .unwrap_or(Value::Null);

        let mut mutations = Mutations::new();
        if self.rules.apply(&mut mutations, action, &state) == Outcome::Unhandled {
            return Ok(state);
        }

        trace!(mutations = mutations.len(), "folding mutations");
        mutations.fold(state, action)
    }

    /// Adapt into a plain reducer function.
    pub fn into_reducer(
        self,
    ) -> impl Fn(Option<Value>, &Action) -> Result<Value, DispatchError> + Send + Sync {
        move |state: Option<Value>, action: &Action| self.run(state, action)
    }
}
