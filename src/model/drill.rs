//! Per-widget drill target configuration.

use serde::{Deserialize, Serialize};

use super::objref::{HasIdentity, ObjRef, RefIdentity};

/// One available drill target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillTarget {
    /// Display title of the target.
    pub title: String,
    /// Object the drill navigates to.
    pub target: ObjRef,
}

/// Drill configuration for one widget, keyed by the widget's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillTargets {
    /// Identity of the owning widget.
    pub identity: RefIdentity,
    /// Available drill targets.
    pub targets: Vec<DrillTarget>,
}

impl DrillTargets {
    /// Drill targets for the widget with the given identity.
    pub fn new(identity: RefIdentity, targets: Vec<DrillTarget>) -> Self {
        Self { identity, targets }
    }
}

impl HasIdentity for DrillTargets {
    fn identity(&self) -> &RefIdentity {
        &self.identity
    }
}
