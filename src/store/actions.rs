//! Store mutation actions.
//!
//! Handlers never mutate state directly: they assemble an [`ActionBatch`]
//! which the dispatch loop applies atomically through
//! [`crate::store::DashboardState::apply_batch`]. Reversible primary
//! mutations carry [`UndoMeta`] referencing the originating command so a
//! higher-level undo stack can reconstruct a reverse command; bookkeeping
//! actions (UI refresh intents, entitlement initialization) carry none.

use crate::commands::Command;
use crate::model::{
    DrillTargets, EntitlementDescriptor, Insight, ItemCoordinates, ObjRef, SizeInfo,
};

/// Undo metadata attached to reversible mutations.
#[derive(Debug, Clone)]
pub struct UndoMeta {
    /// The command that caused the mutation.
    pub cmd: Command,
}

impl UndoMeta {
    /// Undo metadata referencing the given command.
    pub fn new(cmd: &Command) -> Self {
        Self { cmd: cmd.clone() }
    }
}

/// One typed store mutation.
#[derive(Debug, Clone)]
pub enum Action {
    /// Upsert a freshly loaded insight into the normalized table.
    UpsertInsight {
        /// The insight to upsert.
        insight: Insight,
    },

    /// Signal that the visible insight list should be refreshed.
    RequestInsightListRefresh,

    /// Point an insight widget at a different insight.
    ReplaceInsightWidgetInsight {
        /// Widget to modify.
        widget_ref: ObjRef,
        /// Insight the widget should render.
        insight_ref: ObjRef,
        /// When set, replace the widget's visualization properties.
        properties: Option<serde_json::Value>,
        /// When set, replace the widget's displayed title.
        new_title: Option<String>,
        /// When set, resize the widget for the new content.
        new_size: Option<SizeInfo>,
        /// Originating command, for undo.
        undo: UndoMeta,
    },

    /// Remove a section item from the layout.
    RemoveSectionItem {
        /// Position of the item.
        coords: ItemCoordinates,
        /// Also remove the section when it becomes empty.
        eager: bool,
        /// When set, stash the removed item under this identifier.
        stash_identifier: Option<String>,
        /// Originating command, for undo.
        undo: UndoMeta,
    },

    /// Record drill targets for a widget.
    SetDrillTargets {
        /// The targets, keyed by the owning widget's identity.
        targets: DrillTargets,
        /// Originating command, for undo.
        undo: UndoMeta,
    },

    /// Initialize the session entitlement set.
    InitializeEntitlements {
        /// The complete resolved set.
        entitlements: Vec<EntitlementDescriptor>,
    },
}

impl Action {
    /// Undo metadata, for reversible mutations.
    pub fn undo(&self) -> Option<&UndoMeta> {
        match self {
            Action::ReplaceInsightWidgetInsight { undo, .. }
            | Action::RemoveSectionItem { undo, .. }
            | Action::SetDrillTargets { undo, .. } => Some(undo),
            Action::UpsertInsight { .. }
            | Action::RequestInsightListRefresh
            | Action::InitializeEntitlements { .. } => None,
        }
    }
}

/// An ordered batch of actions applied atomically.
#[derive(Debug, Clone, Default)]
pub struct ActionBatch {
    actions: Vec<Action>,
}

impl ActionBatch {
    /// Batch over the given actions.
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// The actions in application order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the batch holds no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Consume the batch, yielding actions in order.
    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }
}

impl From<Vec<Action>> for ActionBatch {
    fn from(actions: Vec<Action>) -> Self {
        Self::new(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandKind;

    #[test]
    fn test_primary_mutations_carry_undo() {
        let cmd = Command::new(CommandKind::RemoveSectionItem {
            coords: ItemCoordinates {
                section_index: 0,
                item_index: 0,
            },
            eager: false,
            stash_identifier: None,
        });
        let action = Action::RemoveSectionItem {
            coords: ItemCoordinates {
                section_index: 0,
                item_index: 0,
            },
            eager: false,
            stash_identifier: None,
            undo: UndoMeta::new(&cmd),
        };
        let undo = action.undo().expect("reversible mutation carries undo");
        assert_eq!(undo.cmd.correlation_id(), cmd.correlation_id());
    }

    #[test]
    fn test_bookkeeping_actions_carry_no_undo() {
        assert!(Action::RequestInsightListRefresh.undo().is_none());
        assert!(Action::InitializeEntitlements {
            entitlements: vec![]
        }
        .undo()
        .is_none());
    }
}
