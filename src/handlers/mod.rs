//! Command handlers.
//!
//! One handler per command variant, routed by an exhaustive match so a new
//! command cannot be added without a handler. Handlers read state through
//! selectors, validate up front, perform at most one awaited loader call,
//! and return one atomic [`ActionBatch`] paired with the terminal [`Event`]
//! to emit once the batch commits. They never mutate state themselves.

mod change_insight;
mod drill_targets;
mod entitlements;
mod remove_section_item;
mod validation;

use crate::commands::{Command, CommandKind};
use crate::config::LoaderConfig;
use crate::context::EngineContext;
use crate::error::Result;
use crate::events::Event;
use crate::interfaces::InsightLoader;
use crate::selectors::Selectors;
use crate::store::{ActionBatch, DashboardState};

/// Everything a handler reads: state, selectors, context, and the loader.
pub(crate) struct HandlerEnv<'a> {
    pub(crate) state: &'a DashboardState,
    pub(crate) selectors: &'a Selectors,
    pub(crate) ctx: &'a EngineContext,
    pub(crate) loader: &'a dyn InsightLoader,
    pub(crate) loader_config: &'a LoaderConfig,
}

/// A handler's result: the batch to commit and the event to emit after.
pub(crate) struct HandlerOutcome {
    pub(crate) batch: ActionBatch,
    pub(crate) event: Event,
}

/// Route a command to its handler.
pub(crate) async fn process(env: &HandlerEnv<'_>, cmd: &Command) -> Result<HandlerOutcome> {
    match cmd.kind() {
        CommandKind::ChangeInsightWidgetInsight {
            widget_ref,
            insight_ref,
            visualization_properties,
        } => {
            change_insight::handle(
                env,
                cmd,
                widget_ref,
                insight_ref,
                visualization_properties.as_ref(),
            )
            .await
        }
        CommandKind::RemoveSectionItemByWidgetRef {
            widget_ref,
            eager,
            stash_identifier,
        } => remove_section_item::handle_by_widget_ref(
            env,
            cmd,
            widget_ref,
            *eager,
            stash_identifier.clone(),
        ),
        CommandKind::RemoveSectionItem {
            coords,
            eager,
            stash_identifier,
        } => remove_section_item::handle(env, cmd, *coords, *eager, stash_identifier.clone()),
        CommandKind::SetDrillTargets {
            widget_ref,
            targets,
        } => drill_targets::handle(env, cmd, widget_ref, targets),
        CommandKind::InitializeEntitlements { entitlements } => {
            entitlements::handle(cmd, entitlements)
        }
    }
}
