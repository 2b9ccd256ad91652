//! Rulebook: declarative first-match action dispatch
//!
//! A rule book turns `(state, action)` into the next state by trying an
//! ordered list of rules and running the first one whose pattern matches.
//! Matching is pure and structural; state changes are collected from the
//! matched handler and folded in afterwards.
//!
//! # Core Concepts
//!
//! - **Pattern**: literal, type, predicate, shape and combinator matchers
//! - **Action**: an encoded multi-argument call or a plain `{type, ...}` event
//! - **Handler**: rules reducing state through a run-scoped `Mutations` context
//! - **Middleware**: rules deciding which action travels on, via `Forwarding`
//!
//! # Example
//!
//! ```rust
//! use rulebook::dispatch::Handler;
//! use rulebook::call;
//! use serde_json::json;
//!
//! let turnstile = Handler::build(|b| {
//!     b.on_state("LOCKED", "addToken", |m, _| {
//!         m.update(|_, _| json!("OPEN"));
//!     })
//!     .on_state("OPEN", "turnTurnstile", |m, _| {
//!         m.update(|_, _| json!("LOCKED"));
//!     })
//!     .init_state("LOCKED")
//! })
//! .unwrap();
//!
//! let state = turnstile.run(None, &call!["addToken"]).unwrap();
//! assert_eq!(state, json!("OPEN"));
//! let state = turnstile.run(Some(state), &call!["addToken"]).unwrap();
//! assert_eq!(state, json!("OPEN"));
//! let state = turnstile.run(Some(state), &call!["turnTurnstile"]).unwrap();
//! assert_eq!(state, json!("LOCKED"));
//! ```

pub mod builder;
pub mod core;
pub mod dispatch;

// Re-export commonly used types
pub use crate::builder::{BuildError, RuleSetBuilder};
pub use crate::core::{encode_call, matches, Action, Pattern, TypeTag, CALL_TAG};
pub use crate::dispatch::{DispatchError, Forwarding, Handler, Middleware, Mutations, Store};
