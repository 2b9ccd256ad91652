//! Action-forwarding rule set, sitting between dispatch and the reducer.

use crate::builder::{BuildError, RuleSetBuilder};
use crate::core::{encode_call, Action};
use crate::dispatch::rule::{Outcome, RuleSet};
use serde_json::Value;
use tracing::trace;

/// The surrounding event system, as seen by a middleware.
pub trait Store {
    /// Snapshot of the current state, used for guards and predicates.
    fn state(&self) -> Value;

    /// Feed a new action back into the event system.
    fn dispatch(&self, action: Action);
}

enum Directive {
    Pass,
    Next(Action),
    Dispatch(Action),
}

/// Run-scoped context deciding what happens to the outgoing action.
///
/// Directives are applied in the order they were issued once the matched
/// rule's chain has finished. Issuing none swallows the action.
pub struct Forwarding {
    directives: Vec<Directive>,
}

impl Forwarding {
    pub(crate) fn new() -> Self {
        Self {
            directives: Vec::new(),
        }
    }

    /// Forward the current outgoing action unaltered: the incoming action,
    /// or the last one sent through `next`/`next_raw` in this run.
    pub fn pass(&mut self) -> &mut Self {
        self.directives.push(Directive::Pass);
        self
    }

    /// Forward a newly encoded call instead.
    pub fn next(&mut self, values: impl Into<Vec<Value>>) -> &mut Self {
        self.directives.push(Directive::Next(encode_call(values.into())));
        self
    }

    /// Forward an arbitrary action instead.
    pub fn next_raw(&mut self, action: impl Into<Action>) -> &mut Self {
        self.directives.push(Directive::Next(action.into()));
        self
    }

    /// Dispatch a new encoded call through the store.
    pub fn dispatch(&mut self, values: impl Into<Vec<Value>>) -> &mut Self {
        self.directives.push(Directive::Dispatch(encode_call(values.into())));
        self
    }

    pub fn dispatch_raw(&mut self, action: impl Into<Action>) -> &mut Self {
        self.directives.push(Directive::Dispatch(action.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Rewrites, forwards or re-dispatches actions using first-match rules.
///
/// # Example
///
/// ```rust
/// use rulebook::dispatch::{Middleware, Store};
/// use rulebook::{call, Action, Pattern};
/// use serde_json::{json, Value};
///
/// struct Quiet;
///
/// impl Store for Quiet {
///     fn state(&self) -> Value {
///         Value::Null
///     }
///     fn dispatch(&self, _action: Action) {}
/// }
///
/// let aliases = Middleware::build(|b| {
///     Ok(b.on(("inc", Pattern::number()), |f, args| {
///         f.next(vec![json!("increment"), args[0].clone()]);
///     }))
/// })
/// .unwrap();
///
/// let mut seen = Vec::new();
/// aliases.run(&Quiet, |action| seen.push(action), call!["inc", 2]);
/// assert_eq!(seen, vec![call!["increment", 2]]);
/// ```
pub struct Middleware {
    rules: RuleSet<Forwarding>,
}

impl Middleware {
    /// Run the builder callback once and freeze the result.
    pub fn build<F>(configure: F) -> Result<Self, BuildError>
    where
        F: FnOnce(RuleSetBuilder<Forwarding>) -> Result<RuleSetBuilder<Forwarding>, BuildError>,
    {
        let (rules, _) = configure(RuleSetBuilder::new())?.finish();
        Ok(Self { rules })
    }

    pub fn rule_set(&self) -> &RuleSet<Forwarding> {
        &self.rules
    }

    /// Handle one action on its way to `next`.
    ///
    /// An action no rule (and no fallback) claims is passed to `next`
    /// unchanged. Otherwise the issued directives are applied in order.
    /// Returns what the last call to `next` returned, or `None` when the
    /// action was not forwarded.
    pub fn run<S, N, R>(&self, store: &S, mut next: N, action: Action) -> Option<R>
    where
        S: Store + ?Sized,
        N: FnMut(Action) -> R,
    {
        let state = store.state();
        let mut forwarding = Forwarding::new();
        if self.rules.apply(&mut forwarding, &action, &state) == Outcome::Unhandled {
            return Some(next(action));
        }

        trace!(directives = forwarding.len(), "applying directives");
        let mut outgoing = action;
        let mut forwarded = None;
        for directive in forwarding.directives {
            match directive {
                Directive::Pass => forwarded = Some(next(outgoing.clone())),
                Directive::Next(replacement) => {
                    outgoing = replacement;
                    forwarded = Some(next(outgoing.clone()));
                }
                Directive::Dispatch(new_action) => store.dispatch(new_action),
            }
        }
        forwarded
    }
}

/// Pass-through adapter placed in front of the event system.
///
/// Untagged arrays become encoded calls, tagged wire calls are decoded, and
/// everything else is forwarded as a plain event.
///
/// # Example
///
/// ```rust
/// use rulebook::dispatch::call_encoding_middleware;
/// use rulebook::Action;
/// use serde_json::json;
///
/// let action = call_encoding_middleware(json!(["add", 1]), |action| action);
/// assert_eq!(action, Action::Call(vec![json!("add"), json!(1)]));
/// ```
pub fn call_encoding_middleware<N, R>(event: Value, next: N) -> R
where
    N: FnOnce(Action) -> R,
{
    match event {
        Value::Array(values) => next(encode_call(values)),
        other => next(Action::from(other)),
    }
}
