//! Builder API for declaring rule sets.
//!
//! The builder is the configuration surface of the crate: it is consumed by
//! the callback passed to [`crate::dispatch::Handler::build`] or
//! [`crate::dispatch::Middleware::build`] and frozen when the callback returns.
//! Mutation happens elsewhere, through the run contexts in
//! [`crate::dispatch`].
//!
//! # Example
//!
//! ```
//! use rulebook::dispatch::Handler;
//! use rulebook::{call, BuildError};
//! use serde_json::json;
//!
//! let result = Handler::build(|b| {
//!     b.setter(["foo", "bar"])
//!         .init_state(json!({ "foo": 0, "bar": 0 }))?
//!         .init_state(json!({}))
//! });
//! assert!(matches!(result, Err(BuildError::DuplicateInitialState)));
//!
//! let handler = Handler::build(|b| b.setter(["foo", "bar"]).init_state(json!({ "foo": 0, "bar": 0 })))
//!     .unwrap();
//! let state = handler.run(None, &call!["foo", 12]).unwrap();
//! assert_eq!(state, json!({ "foo": 12, "bar": 0 }));
//! ```

pub mod error;
pub mod macros;
pub mod rule_set;
pub mod segments;

pub use error::BuildError;
pub use rule_set::RuleSetBuilder;
pub use segments::IntoSegments;
