//! Events: correlated terminal outcomes of command processing.
//!
//! Exactly one event is emitted per processed command, carrying the same
//! correlation id as the command so callers can match responses to requests.

use chrono::{DateTime, Utc};

use crate::commands::Command;
use crate::error::EngineError;
use crate::model::{Insight, ItemCoordinates, ObjRef};

/// Classification carried by failure events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A referenced entity could not be resolved or loaded; recoverable.
    InvalidArguments,
    /// An internal store invariant was violated; integration fault.
    InconsistentStore,
    /// Process-wide state was read before initialization.
    UninitializedState,
}

/// Payload of a terminal event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// An insight widget now renders a different insight.
    InsightWidgetInsightSwitched {
        /// The modified widget.
        widget_ref: ObjRef,
        /// The insight now rendered, as freshly loaded.
        insight: Insight,
    },

    /// A section item was removed from the layout.
    SectionItemRemoved {
        /// Reference of the widget the removed item held.
        widget_ref: ObjRef,
        /// Position the item was removed from.
        coords: ItemCoordinates,
        /// Whether the item was stashed for later re-insertion.
        stashed: bool,
        /// Whether the emptied section was removed as well.
        section_removed: bool,
    },

    /// Drill targets were recorded for a widget.
    DrillTargetsSet {
        /// The widget the targets belong to.
        widget_ref: ObjRef,
    },

    /// The session entitlement set was initialized.
    EntitlementsInitialized {
        /// Number of entitlement descriptors in the set.
        count: usize,
    },

    /// Command processing failed; no state was mutated.
    CommandFailed {
        /// Name of the failed command.
        command: &'static str,
        /// Failure classification.
        kind: FailureKind,
        /// Human-readable reason naming the offending reference.
        reason: String,
    },
}

/// Terminal outcome of processing a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    correlation_id: String,
    created_at: DateTime<Utc>,
    kind: EventKind,
}

impl Event {
    fn new(cmd: &Command, kind: EventKind) -> Self {
        Self {
            correlation_id: cmd.correlation_id().to_string(),
            created_at: Utc::now(),
            kind,
        }
    }

    /// Success event for a completed insight swap.
    pub fn insight_widget_insight_switched(
        cmd: &Command,
        widget_ref: ObjRef,
        insight: Insight,
    ) -> Self {
        Self::new(
            cmd,
            EventKind::InsightWidgetInsightSwitched {
                widget_ref,
                insight,
            },
        )
    }

    /// Success event for a completed section item removal.
    pub fn section_item_removed(
        cmd: &Command,
        widget_ref: ObjRef,
        coords: ItemCoordinates,
        stashed: bool,
        section_removed: bool,
    ) -> Self {
        Self::new(
            cmd,
            EventKind::SectionItemRemoved {
                widget_ref,
                coords,
                stashed,
                section_removed,
            },
        )
    }

    /// Success event for recorded drill targets.
    pub fn drill_targets_set(cmd: &Command, widget_ref: ObjRef) -> Self {
        Self::new(cmd, EventKind::DrillTargetsSet { widget_ref })
    }

    /// Success event for an initialized entitlement set.
    pub fn entitlements_initialized(cmd: &Command, count: usize) -> Self {
        Self::new(cmd, EventKind::EntitlementsInitialized { count })
    }

    /// Failure event for a command whose handler raised an error.
    pub fn command_failed(cmd: &Command, error: &EngineError) -> Self {
        let kind = match error {
            EngineError::InvalidArguments { .. } => FailureKind::InvalidArguments,
            EngineError::InconsistentStore(_) => FailureKind::InconsistentStore,
            EngineError::UninitializedState(_) => FailureKind::UninitializedState,
        };
        Self::new(
            cmd,
            EventKind::CommandFailed {
                command: cmd.name(),
                kind,
                reason: error.to_string(),
            },
        )
    }

    /// Correlation id matching the originating command.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// When the event was produced.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The event payload.
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Whether this is a failure event.
    pub fn is_failure(&self) -> bool {
        matches!(self.kind, EventKind::CommandFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandKind;

    fn command() -> Command {
        Command::with_correlation_id(
            CommandKind::ChangeInsightWidgetInsight {
                widget_ref: ObjRef::id("w1"),
                insight_ref: ObjRef::id("i2"),
                visualization_properties: None,
            },
            "corr-42",
        )
        .unwrap()
    }

    #[test]
    fn test_event_carries_command_correlation() {
        let cmd = command();
        let event = Event::drill_targets_set(&cmd, ObjRef::id("w1"));
        assert_eq!(event.correlation_id(), "corr-42");
        assert!(!event.is_failure());
    }

    #[test]
    fn test_command_failed_classifies_errors() {
        let cmd = command();

        let event = Event::command_failed(&cmd, &EngineError::invalid_arguments("nope"));
        match event.kind() {
            EventKind::CommandFailed { command, kind, .. } => {
                assert_eq!(*command, "change_insight_widget_insight");
                assert_eq!(*kind, FailureKind::InvalidArguments);
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }

        let event = Event::command_failed(&cmd, &EngineError::UninitializedState("entitlements"));
        match event.kind() {
            EventKind::CommandFailed { kind, reason, .. } => {
                assert_eq!(*kind, FailureKind::UninitializedState);
                assert!(reason.contains("entitlements"));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }
}
