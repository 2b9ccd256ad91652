//! Build errors for rule set builders.

use thiserror::Error;

/// Errors that can occur while configuring a rule set.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Fallback already registered. Call .otherwise(handler) at most once")]
    DuplicateFallback,

    #[error("Initial state already set. Call .init_state(state) at most once")]
    DuplicateInitialState,
}
