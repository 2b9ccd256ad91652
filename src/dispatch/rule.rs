//! Rules and first-match selection.

use crate::core::{Action, Pattern};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace};

/// Rule body, called with the run context and the decoded arguments.
pub type HandlerFn<C> = Arc<dyn Fn(&mut C, &[Value]) + Send + Sync>;

/// Hook run around every matched rule.
pub type HookFn<C> = Arc<dyn Fn(&mut C) + Send + Sync>;

/// One entry of a rule set.
pub struct Rule<C> {
    /// Namespace followed by the declared segments.
    pub pattern: Vec<Pattern>,
    /// Tested against the state before the pattern is looked at.
    pub state_guard: Option<Pattern>,
    pub handler: HandlerFn<C>,
}

impl<C> Rule<C> {
    /// Check if this rule fires for `action` in `state` (pure).
    pub fn can_fire(&self, action: &Action, state: &Value) -> bool {
        if let Some(guard) = &self.state_guard {
            if !guard.matches(state, state) {
                return false;
            }
        }
        action.matches(&self.pattern, state)
    }
}

impl<C> Clone for Rule<C> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            state_guard: self.state_guard.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// What a rule set did with an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The rule at this declaration index matched and ran.
    Matched(usize),
    /// Nothing matched and the fallback ran.
    Fallback,
    /// Nothing matched and there is no fallback.
    Unhandled,
}

/// Frozen, ordered rules plus hooks and fallback.
///
/// Built by [`crate::builder::RuleSetBuilder`]; never modified afterwards.
pub struct RuleSet<C> {
    pub(crate) rules: Vec<Rule<C>>,
    pub(crate) before: Vec<HookFn<C>>,
    pub(crate) after: Vec<HookFn<C>>,
    pub(crate) fallback: Option<HandlerFn<C>>,
}

impl<C> RuleSet<C> {
    pub fn rules(&self) -> &[Rule<C>] {
        &self.rules
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Index of the first rule that fires, in declaration order.
    pub fn select(&self, action: &Action, state: &Value) -> Option<usize> {
        self.rules
            .iter()
            .position(|rule| rule.can_fire(action, state))
    }

    /// Select a rule and run its chain against `ctx`.
    ///
    /// The chain is every before hook, the rule's handler, then every after
    /// hook. Hooks do not run for the fallback.
    pub fn apply(&self, ctx: &mut C, action: &Action, state: &Value) -> Outcome {
        let Some(index) = self.select(action, state) else {
            return match &self.fallback {
                Some(fallback) => {
                    debug!(event_type = ?action.event_type(), "no rule matched, running fallback");
                    fallback(ctx, &action.decode(&[]));
                    Outcome::Fallback
                }
                None => {
                    debug!(event_type = ?action.event_type(), "no rule matched");
                    Outcome::Unhandled
                }
            };
        };

        let rule = &self.rules[index];
        trace!(rule = index, "rule matched");

        for hook in &self.before {
            hook(ctx);
        }
        (rule.handler)(ctx, &action.decode(&rule.pattern));
        for hook in &self.after {
            hook(ctx);
        }

        Outcome::Matched(index)
    }
}
