//! Recording per-widget drill targets.

use tracing::debug;

use super::{validation, HandlerEnv, HandlerOutcome};
use crate::commands::Command;
use crate::error::Result;
use crate::events::Event;
use crate::model::{DrillTarget, DrillTargets, HasIdentity, ObjRef};
use crate::store::{Action, ActionBatch, UndoMeta};

pub(crate) fn handle(
    env: &HandlerEnv<'_>,
    cmd: &Command,
    widget_ref: &ObjRef,
    targets: &[DrillTarget],
) -> Result<HandlerOutcome> {
    let widget = validation::validate_existing_insight_widget(env.selectors, env.state, widget_ref)?;

    debug!(
        correlation_id = %cmd.correlation_id(),
        widget = %widget_ref,
        count = targets.len(),
        "Recording drill targets"
    );

    let batch = ActionBatch::new(vec![Action::SetDrillTargets {
        targets: DrillTargets::new(widget.identity().clone(), targets.to_vec()),
        undo: UndoMeta::new(cmd),
    }]);
    let event = Event::drill_targets_set(cmd, widget_ref.clone());
    Ok(HandlerOutcome { batch, event })
}
