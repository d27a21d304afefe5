//! Per-engine execution context.

use crate::model::ObjRef;

/// Ambient facts about the session a command executes in.
///
/// The context is fixed for the lifetime of an engine and travels with every
/// handler invocation alongside the command itself.
#[derive(Debug, Clone)]
pub struct EngineContext {
    /// Workspace the dashboard belongs to.
    pub workspace: String,
    /// Reference of the dashboard being edited, when persisted.
    pub dashboard_ref: Option<ObjRef>,
    /// Identifier of the acting user, when known.
    pub user: Option<String>,
}

impl EngineContext {
    /// Context for the given workspace.
    pub fn new(workspace: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            dashboard_ref: None,
            user: None,
        }
    }

    /// Attach the dashboard reference.
    pub fn with_dashboard_ref(mut self, dashboard_ref: ObjRef) -> Self {
        self.dashboard_ref = Some(dashboard_ref);
        self
    }

    /// Attach the acting user.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}
