//! Domain error types for the reasoning core.
//!
//! A single structured error enum using `thiserror`, mirroring the
//! classify-then-branch pattern used throughout this codebase: each
//! variant carries enough context to decide retryability without the
//! caller having to parse a message string.

use thiserror::Error;

/// Errors raised by the reasoning pipeline and its supporting services.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReasoningError {
    /// A request failed validation before any analysis ran.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A pipeline stage (analysis, rules, solutions, priority) failed internally.
    #[error("stage '{stage}' failed: {reason}")]
    StageFailed {
        /// Name of the failing stage, e.g. "analysis" or "priority".
        stage: String,
        /// Human-readable failure reason.
        reason: String,
    },

    /// A port implementation (tension store, event sink) is unavailable.
    #[error("oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// A batch or registry operation exceeded its configured capacity.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),

    /// Two or more business rules produced contradictory actions.
    #[error("conflicting rules: {0}")]
    ConflictingRules(String),

    /// Capability evolution could not produce a valid result.
    #[error("evolution failed: {0}")]
    EvolutionFailed(String),
}

impl ReasoningError {
    /// Returns true if retrying the same request might succeed.
    ///
    /// Only oracle unavailability is considered transient; the rest are
    /// a function of the input or of detected structural conflicts and
    /// will reproduce identically on retry.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::OracleUnavailable(_))
    }
}

/// Convenience alias for reasoning pipeline results.
pub type ReasoningResult<T> = Result<T, ReasoningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_display() {
        let err = ReasoningError::InvalidInput("title must not be empty".to_string());
        assert_eq!(err.to_string(), "invalid input: title must not be empty");
    }

    #[test]
    fn stage_failed_display() {
        let err = ReasoningError::StageFailed {
            stage: "priority".to_string(),
            reason: "unknown method".to_string(),
        };
        assert_eq!(err.to_string(), "stage 'priority' failed: unknown method");
    }

    #[test]
    fn only_oracle_unavailable_is_transient() {
        assert!(ReasoningError::OracleUnavailable("store down".to_string()).is_transient());
        assert!(!ReasoningError::InvalidInput("x".to_string()).is_transient());
        assert!(!ReasoningError::CapacityExceeded("x".to_string()).is_transient());
        assert!(!ReasoningError::ConflictingRules("x".to_string()).is_transient());
        assert!(!ReasoningError::EvolutionFailed("x".to_string()).is_transient());
    }

    #[test]
    fn errors_are_cloneable_and_comparable() {
        let a = ReasoningError::InvalidInput("x".to_string());
        let b = a.clone();
        assert_eq!(a, b);
    }
}
