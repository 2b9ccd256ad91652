//! Running rule sets against incoming actions.
//!
//! A run selects the first rule whose state guard and pattern match, then
//! executes the before hooks, the rule's handler and the after hooks against a
//! context created for that run alone:
//!
//! - [`Handler`] hands out [`Mutations`] and folds them into the next state
//! - [`Middleware`] hands out [`Forwarding`] and decides the outgoing action
//!
//! Because each run owns its context, built handlers and middleware hold no
//! mutable state and may be shared between threads.

mod handler;
mod middleware;
mod mutations;
mod rule;

pub use handler::Handler;
pub use middleware::{call_encoding_middleware, Forwarding, Middleware, Store};
pub use mutations::{DispatchError, Mutations};
pub use rule::{HandlerFn, HookFn, Outcome, Rule, RuleSet};
