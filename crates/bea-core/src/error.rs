//! BEA error types
//!
//! Errors surfaced by state resolution, operator resolution, calibration
//! loading and the internal catalog invariants.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How a caller referred to an emotional state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateRef {
    /// Lookup by numeric id
    Id(u8),
    /// Lookup by (case-insensitive) name
    Name(String),
}

impl fmt::Display for StateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateRef::Id(id) => write!(f, "#{id}"),
            StateRef::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Errors from emotional-state operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BeaError {
    /// A referenced state does not exist in the state table.
    #[error("emotional state '{reference}' not found")]
    NotFound {
        /// The id or name that failed to resolve
        reference: StateRef,
    },

    /// The operator token does not resolve to one of the five operators.
    #[error("unsupported operator '{token}'")]
    UnsupportedOperator {
        /// The token as received
        token: String,
    },

    /// A structural invariant of the catalog or calculator was broken.
    #[error("invariant violation: {reason}")]
    InvariantViolation {
        /// What was violated
        reason: String,
    },

    /// Calibration could not be loaded or failed validation.
    #[error("invalid calculator configuration: {reason}")]
    Config {
        /// Reason the configuration was rejected
        reason: String,
    },
}

impl BeaError {
    /// Create a not-found error for a state name.
    pub fn name_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            reference: StateRef::Name(name.into()),
        }
    }

    /// Create a not-found error for a state id.
    pub fn id_not_found(id: u8) -> Self {
        Self::NotFound {
            reference: StateRef::Id(id),
        }
    }

    /// Create an unsupported operator error.
    pub fn unsupported_operator(token: impl Into<String>) -> Self {
        Self::UnsupportedOperator {
            token: token.into(),
        }
    }

    /// Create an invariant violation error.
    pub fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Whether the caller should re-prompt for a state name.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for BEA operations.
pub type BeaResult<T> = Result<T, BeaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BeaError::name_not_found("NotAState");
        assert!(err.to_string().contains("NotAState"));
        assert!(err.is_not_found());

        let err = BeaError::id_not_found(40);
        assert!(err.to_string().contains("#40"));

        let err = BeaError::unsupported_operator("unknownop");
        assert!(err.to_string().contains("unknownop"));
        assert!(!err.is_not_found());

        let err = BeaError::invariant("table has 31 entries");
        assert!(err.to_string().contains("31 entries"));
    }
}
