//! Insight loading interface.

use async_trait::async_trait;

use crate::model::{Insight, ObjRef};

/// Errors from insight loading.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    /// The backend holds no insight under the given reference.
    #[error("insight {0} not found")]
    NotFound(String),

    /// The backend could not be reached or answered with a fault.
    #[error("backend error: {0}")]
    Backend(String),
}

impl LoadError {
    /// Whether a retry of the same load can succeed.
    ///
    /// Backend faults are transient; a missing insight stays missing.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LoadError::Backend(_))
    }
}

/// Insight loading interface.
///
/// The engine always re-fetches an insight when a command switches a widget
/// to it, so stale local copies never reach the store. The `load` method
/// takes `&self`; implementations that maintain mutable state should use
/// interior mutability.
#[async_trait]
pub trait InsightLoader: Send + Sync {
    /// Load the insight the given reference points at.
    async fn load(&self, workspace: &str, insight_ref: &ObjRef) -> Result<Insight, LoadError>;
}
