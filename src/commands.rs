//! Commands: intents to change dashboard state.
//!
//! The command set is a closed enum so routing is checked exhaustively at
//! compile time; there is no string-tag dispatch. Each command is processed
//! by exactly one handler and yields exactly one terminal event correlated
//! through the command's correlation id.

use crate::correlation;
use crate::error::EngineError;
use crate::model::{
    DrillTarget, EntitlementDescriptor, ItemCoordinates, ObjRef,
};

/// Payload of a command, one variant per handler.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    /// Swap the insight rendered by an insight widget.
    ChangeInsightWidgetInsight {
        /// Widget to modify.
        widget_ref: ObjRef,
        /// Insight to swap in.
        insight_ref: ObjRef,
        /// Optional visualization property overrides to set alongside.
        visualization_properties: Option<serde_json::Value>,
    },

    /// Remove a section item located by the widget it holds.
    RemoveSectionItemByWidgetRef {
        /// Widget whose item should be removed.
        widget_ref: ObjRef,
        /// Also remove the section when it becomes empty.
        eager: bool,
        /// When set, stash the removed item under this identifier.
        stash_identifier: Option<String>,
    },

    /// Remove a section item located by coordinates.
    RemoveSectionItem {
        /// Position of the item.
        coords: ItemCoordinates,
        /// Also remove the section when it becomes empty.
        eager: bool,
        /// When set, stash the removed item under this identifier.
        stash_identifier: Option<String>,
    },

    /// Record drill targets for a widget.
    SetDrillTargets {
        /// Widget the targets belong to.
        widget_ref: ObjRef,
        /// Available drill targets.
        targets: Vec<DrillTarget>,
    },

    /// Initialize the session entitlements set.
    InitializeEntitlements {
        /// The complete resolved entitlement set.
        entitlements: Vec<EntitlementDescriptor>,
    },
}

impl CommandKind {
    /// Stable command name used for routing logs and failure events.
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::ChangeInsightWidgetInsight { .. } => "change_insight_widget_insight",
            CommandKind::RemoveSectionItemByWidgetRef { .. } => {
                "remove_section_item_by_widget_ref"
            }
            CommandKind::RemoveSectionItem { .. } => "remove_section_item",
            CommandKind::SetDrillTargets { .. } => "set_drill_targets",
            CommandKind::InitializeEntitlements { .. } => "initialize_entitlements",
        }
    }
}

/// An intent to mutate dashboard state.
///
/// Carries its payload and a correlation id linking it to its terminal
/// event. Construct with [`Command::new`] for a generated id or
/// [`Command::with_correlation_id`] to supply one.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    correlation_id: String,
    kind: CommandKind,
}

impl Command {
    /// Command with a freshly generated correlation id.
    pub fn new(kind: CommandKind) -> Self {
        Self {
            correlation_id: correlation::fresh_correlation_id(),
            kind,
        }
    }

    /// Command with a caller-supplied correlation id, validated for format.
    pub fn with_correlation_id(
        kind: CommandKind,
        correlation_id: impl Into<String>,
    ) -> Result<Self, EngineError> {
        let correlation_id = correlation_id.into();
        correlation::validate_correlation_id(&correlation_id)?;
        Ok(Self {
            correlation_id,
            kind,
        })
    }

    /// The correlation id linking this command to its terminal event.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// The command payload.
    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    /// Stable command name for logs and failure events.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}
