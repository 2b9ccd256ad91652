//! Builder for configuring rule sets.

use crate::builder::error::BuildError;
use crate::builder::segments::IntoSegments;
use crate::core::Pattern;
use crate::dispatch::{HandlerFn, HookFn, Mutations, Rule, RuleSet};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Build-time surface of a rule set.
///
/// Handed to the callback of [`crate::dispatch::Handler::build`] or
/// [`crate::dispatch::Middleware::build`]. `C` is the run context the
/// registered handlers and hooks receive.
pub struct RuleSetBuilder<C> {
    namespace: Vec<Pattern>,
    before: Vec<HookFn<C>>,
    after: Vec<HookFn<C>>,
    rules: Vec<Rule<C>>,
    fallback: Option<HandlerFn<C>>,
    initial_state: Option<Value>,
}

impl<C: 'static> RuleSetBuilder<C> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            namespace: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
            rules: Vec::new(),
            fallback: None,
            initial_state: None,
        }
    }

    /// Prefix every rule declared afterwards with `segments`.
    /// Repeated calls accumulate.
    pub fn namespace(mut self, segments: impl IntoSegments) -> Self {
        self.namespace.extend(segments.into_segments());
        self
    }

    /// Replace the current namespace with `remap(namespace)`.
    pub fn namespace_with<F>(mut self, remap: F) -> Self
    where
        F: FnOnce(Vec<Pattern>) -> Vec<Pattern>,
    {
        self.namespace = remap(std::mem::take(&mut self.namespace));
        self
    }

    /// Add a rule matching `namespace ++ segments`.
    pub fn on<P, F>(self, segments: P, handler: F) -> Self
    where
        P: IntoSegments,
        F: Fn(&mut C, &[Value]) + Send + Sync + 'static,
    {
        self.push_rule(None, segments, Arc::new(handler))
    }

    /// Add a rule that additionally requires the state to match `guard`.
    pub fn on_state<G, P, F>(self, guard: G, segments: P, handler: F) -> Self
    where
        G: Into<Pattern>,
        P: IntoSegments,
        F: Fn(&mut C, &[Value]) + Send + Sync + 'static,
    {
        self.push_rule(Some(guard.into()), segments, Arc::new(handler))
    }

    fn push_rule<P: IntoSegments>(
        mut self,
        state_guard: Option<Pattern>,
        segments: P,
        handler: HandlerFn<C>,
    ) -> Self {
        let mut pattern = self.namespace.clone();
        pattern.extend(segments.into_segments());
        self.rules.push(Rule {
            pattern,
            state_guard,
            handler,
        });
        self
    }

    /// Run `hook` before the handler of every matched rule.
    pub fn before_each<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.before.push(Arc::new(hook));
        self
    }

    /// Run `hook` after the handler of every matched rule.
    pub fn after_each<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.after.push(Arc::new(hook));
        self
    }

    /// Register the handler run when no rule matches.
    /// It receives every argument of the action.
    pub fn otherwise<F>(mut self, handler: F) -> Result<Self, BuildError>
    where
        F: Fn(&mut C, &[Value]) + Send + Sync + 'static,
    {
        if self.fallback.is_some() {
            return Err(BuildError::DuplicateFallback);
        }
        self.fallback = Some(Arc::new(handler));
        Ok(self)
    }

    pub(crate) fn finish(self) -> (RuleSet<C>, Option<Value>) {
        debug!(
            rules = self.rules.len(),
            before = self.before.len(),
            after = self.after.len(),
            fallback = self.fallback.is_some(),
            "rule set built"
        );
        let rules = RuleSet {
            rules: self.rules,
            before: self.before,
            after: self.after,
            fallback: self.fallback,
        };
        (rules, self.initial_state)
    }
}

impl RuleSetBuilder<Mutations> {
    /// For each key, add a rule `(key, _)` assigning the argument to `key`.
    pub fn setter<I, K>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        keys.into_iter().fold(self, |builder, key| {
            let key: String = key.into();
            let field = key.clone();
            builder.on((key, Pattern::any()), move |m, args| {
                let value = args.first().cloned().unwrap_or(Value::Null);
                m.set(field.clone(), value);
            })
        })
    }

    /// Set the state used when a run starts without one.
    pub fn init_state(mut self, state: impl Into<Value>) -> Result<Self, BuildError> {
        if self.initial_state.is_some() {
            return Err(BuildError::DuplicateInitialState);
        }
        self.initial_state = Some(state.into());
        Ok(self)
    }
}

impl<C: 'static> Default for RuleSetBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call;
    use crate::dispatch::Forwarding;
    use serde_json::json;

    #[test]
    fn otherwise_can_only_be_registered_once() {
        let result = RuleSetBuilder::<Mutations>::new()
            .otherwise(|_, _| {})
            .and_then(|b| b.otherwise(|_, _| {}));

        assert!(matches!(result, Err(BuildError::DuplicateFallback)));
    }

    #[test]
    fn init_state_can_only_be_set_once() {
        let result = RuleSetBuilder::<Mutations>::new()
            .init_state(json!({}))
            .and_then(|b| b.init_state(json!({ "again": true })));

        assert!(matches!(result, Err(BuildError::DuplicateInitialState)));
    }

    #[test]
    fn first_registration_succeeds() {
        assert!(RuleSetBuilder::<Forwarding>::new()
            .otherwise(|_, _| {})
            .is_ok());
        assert!(RuleSetBuilder::<Mutations>::new()
            .init_state(Value::Null)
            .is_ok());
    }

    #[test]
    fn namespace_prefixes_later_rules_only() {
        let (rules, _) = RuleSetBuilder::<Mutations>::new()
            .on("bare", |_, _| {})
            .namespace("counter")
            .on("increment", |_, _| {})
            .namespace(("nested", "deeper"))
            .on("reset", |_, _| {})
            .finish();

        let lengths: Vec<usize> = rules.rules().iter().map(|r| r.pattern.len()).collect();
        assert_eq!(lengths, vec![1, 2, 4]);

        let state = Value::Null;
        assert!(rules.rules()[1].can_fire(&call!["counter", "increment"], &state));
        assert!(!rules.rules()[1].can_fire(&call!["increment"], &state));
        assert!(rules.rules()[2].can_fire(&call!["counter", "nested", "deeper", "reset"], &state));
    }

    #[test]
    fn namespace_with_remaps_the_prefix() {
        let (rules, _) = RuleSetBuilder::<Mutations>::new()
            .namespace(("app", "counter"))
            .namespace_with(|mut ns| {
                ns.remove(0);
                ns
            })
            .on("increment", |_, _| {})
            .finish();

        assert!(rules.rules()[0].can_fire(&call!["counter", "increment"], &Value::Null));
    }

    #[test]
    fn setter_declares_one_rule_per_key() {
        let (rules, _) = RuleSetBuilder::<Mutations>::new()
            .setter(["foo", "bar"])
            .finish();

        assert_eq!(rules.rules().len(), 2);
        assert!(rules.rules()[0].can_fire(&call!["foo", 1], &Value::Null));
        assert!(!rules.rules()[0].can_fire(&call!["foo"], &Value::Null));
        assert!(rules.rules()[1].can_fire(&call!["bar", "x"], &Value::Null));
    }

    #[test]
    fn hooks_are_recorded_in_declaration_order() {
        let (rules, _) = RuleSetBuilder::<Vec<u8>>::new()
            .before_each(|log| log.push(1))
            .after_each(|log| log.push(3))
            .before_each(|log| log.push(2))
            .on((), |log, _| log.push(0))
            .finish();

        let mut log = Vec::new();
        rules.apply(&mut log, &call!["anything"], &Value::Null);

        assert_eq!(log, vec![1, 2, 0, 3]);
    }
}
