//! Engine errors.

use thiserror::Error;

/// Errors raised by the simulation engine.
///
/// Raised before the first random draw; a run that starts never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Caller inputs violate a precondition.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}
