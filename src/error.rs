//! Engine error taxonomy.
//!
//! Three classes, matching how failures surface to callers:
//! - invalid arguments: a referenced entity could not be resolved or loaded;
//!   recoverable, never leaves partial mutations
//! - inconsistent store: an internal invariant is violated; an
//!   integration/programming fault surfaced loudly
//! - uninitialized state: process-wide state read before its initializing
//!   command completed; also a programming fault
//!
//! Handlers return these through `Result`; the dispatch loop converts any
//! error into a correlated failure event, so no handler swallows an error.

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised while processing a command.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A referenced entity could not be resolved or loaded.
    #[error("invalid arguments: {reason}")]
    InvalidArguments {
        /// What could not be resolved, naming the offending reference.
        reason: String,
    },

    /// An internal store invariant is violated.
    #[error("inconsistent store: {0}")]
    InconsistentStore(String),

    /// Process-wide state was read before initialization.
    #[error("attempting to access uninitialized {0} state")]
    UninitializedState(&'static str),
}

impl EngineError {
    /// Invalid-arguments error with a formatted reason.
    pub fn invalid_arguments(reason: impl Into<String>) -> Self {
        EngineError::InvalidArguments {
            reason: reason.into(),
        }
    }

    /// Inconsistent-store error with a formatted reason.
    pub fn inconsistent_store(reason: impl Into<String>) -> Self {
        EngineError::InconsistentStore(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let e = EngineError::invalid_arguments("insight with ref rev#insight was not found");
        assert!(e.to_string().contains("rev#insight"));

        let e = EngineError::UninitializedState("entitlements");
        assert!(e.to_string().contains("entitlements"));
    }
}
