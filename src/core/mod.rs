//! Pure matching core.
//!
//! This module contains everything that decides *whether* a rule applies:
//! - `Pattern`, the closed set of pattern shapes
//! - `matches`, the structural matcher
//! - `Action`, the incoming action and its call encoding
//!
//! Nothing in here touches state; dispatch lives in [`crate::dispatch`].

mod action;
mod matcher;
mod pattern;

pub use action::{encode_call, Action, CALL_TAG};
pub use matcher::matches;
pub use pattern::{Literal, Pattern, PredicateFn, TypeTag};
