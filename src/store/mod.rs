//! The dashboard store: slice states and atomic batch application.
//!
//! State is partitioned into slices, each carrying a revision counter that
//! selectors use for memoization. All mutation flows through
//! [`DashboardState::apply_batch`], which validates every action in a batch
//! before committing any of them, so a batch either lands whole or leaves
//! the store untouched.

mod actions;
mod drill_targets_state;
mod entitlements_state;
mod insights_state;
mod layout_state;
mod ui_state;

pub use actions::{Action, ActionBatch, UndoMeta};
pub use drill_targets_state::DrillTargetsState;
pub use entitlements_state::EntitlementsState;
pub use insights_state::InsightsState;
pub use layout_state::LayoutState;
pub use ui_state::UiState;

use crate::error::{EngineError, Result};
use crate::model::{Insight, Layout};

/// Complete dashboard state.
#[derive(Debug, Clone)]
pub struct DashboardState {
    layout: LayoutState,
    insights: InsightsState,
    drill_targets: DrillTargetsState,
    entitlements: EntitlementsState,
    ui: UiState,
}

impl DashboardState {
    /// State seeded with a layout and the insights it references.
    pub fn new(layout: Layout, insights: Vec<Insight>) -> Self {
        Self {
            layout: LayoutState::new(layout),
            insights: InsightsState::new(insights),
            drill_targets: DrillTargetsState::new(),
            entitlements: EntitlementsState::new(),
            ui: UiState::new(),
        }
    }

    /// Layout slice.
    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    /// Insight slice.
    pub fn insights(&self) -> &InsightsState {
        &self.insights
    }

    /// Drill target slice.
    pub fn drill_targets(&self) -> &DrillTargetsState {
        &self.drill_targets
    }

    /// Entitlement slice.
    pub fn entitlements(&self) -> &EntitlementsState {
        &self.entitlements
    }

    /// UI slice.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Apply a batch of actions atomically.
    ///
    /// Every action is checked against the current state before any is
    /// committed. A failed check aborts the whole batch with
    /// [`EngineError::InconsistentStore`] and leaves the store unchanged;
    /// handlers validate their inputs up front, so a failure here means a
    /// handler produced a batch that no longer matches the state it read.
    pub fn apply_batch(&mut self, batch: ActionBatch) -> Result<()> {
        for action in batch.actions() {
            self.check(action)
                .map_err(EngineError::inconsistent_store)?;
        }
        for action in batch.into_actions() {
            self.apply(action);
        }
        Ok(())
    }

    fn check(&self, action: &Action) -> std::result::Result<(), String> {
        match action {
            Action::ReplaceInsightWidgetInsight { widget_ref, .. } => {
                self.layout.check_replace_insight(widget_ref)
            }
            Action::RemoveSectionItem { coords, .. } => self.layout.check_remove_item(*coords),
            Action::UpsertInsight { .. }
            | Action::RequestInsightListRefresh
            | Action::SetDrillTargets { .. }
            | Action::InitializeEntitlements { .. } => Ok(()),
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::UpsertInsight { insight } => self.insights.apply_upsert(insight),
            Action::RequestInsightListRefresh => self.ui.apply_request_insight_list_refresh(),
            Action::ReplaceInsightWidgetInsight {
                widget_ref,
                insight_ref,
                properties,
                new_title,
                new_size,
                ..
            } => self.layout.apply_replace_insight(
                &widget_ref,
                insight_ref,
                properties,
                new_title,
                new_size,
            ),
            Action::RemoveSectionItem {
                coords,
                eager,
                stash_identifier,
                ..
            } => self.layout.apply_remove_item(coords, eager, stash_identifier),
            Action::SetDrillTargets { targets, .. } => self.drill_targets.apply_set(targets),
            Action::InitializeEntitlements { entitlements } => {
                self.entitlements.apply_initialize(entitlements)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Command, CommandKind};
    use crate::model::{
        InsightWidget, ItemCoordinates, ObjRef, RefIdentity, Section, SectionItem,
    };

    fn seeded_state() -> DashboardState {
        let widget = InsightWidget::new(
            RefIdentity::new("w1", "/obj/w1"),
            "Sales widget",
            ObjRef::id("i1"),
        );
        let layout = Layout::new(vec![Section {
            header: None,
            items: vec![SectionItem { widget }],
        }]);
        DashboardState::new(layout, Vec::new())
    }

    fn remove_cmd(coords: ItemCoordinates) -> Command {
        Command::new(CommandKind::RemoveSectionItem {
            coords,
            eager: false,
            stash_identifier: None,
        })
    }

    mod apply_batch {
        use super::*;

        #[test]
        fn test_commits_every_action_when_all_checks_pass() {
            let mut state = seeded_state();
            let coords = ItemCoordinates {
                section_index: 0,
                item_index: 0,
            };
            let cmd = remove_cmd(coords);

            state
                .apply_batch(
                    vec![
                        Action::RequestInsightListRefresh,
                        Action::RemoveSectionItem {
                            coords,
                            eager: false,
                            stash_identifier: None,
                            undo: UndoMeta::new(&cmd),
                        },
                    ]
                    .into(),
                )
                .unwrap();

            assert_eq!(state.ui().insight_list_refreshes(), 1);
            assert_eq!(state.layout().layout().widgets().count(), 0);
        }

        #[test]
        fn test_rejects_whole_batch_on_any_failed_check() {
            let mut state = seeded_state();
            let bad = ItemCoordinates {
                section_index: 4,
                item_index: 0,
            };
            let cmd = remove_cmd(bad);

            let err = state
                .apply_batch(
                    vec![
                        Action::RequestInsightListRefresh,
                        Action::RemoveSectionItem {
                            coords: bad,
                            eager: false,
                            stash_identifier: None,
                            undo: UndoMeta::new(&cmd),
                        },
                    ]
                    .into(),
                )
                .unwrap_err();

            assert!(matches!(err, EngineError::InconsistentStore(_)));
            assert_eq!(state.ui().insight_list_refreshes(), 0);
            assert_eq!(state.layout().layout().widgets().count(), 1);
        }

        #[test]
        fn test_empty_batch_leaves_revisions_untouched() {
            let mut state = seeded_state();
            let layout_rev = state.layout().rev();

            state.apply_batch(ActionBatch::default()).unwrap();

            assert_eq!(state.layout().rev(), layout_rev);
        }
    }
}
