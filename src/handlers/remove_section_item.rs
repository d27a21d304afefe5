//! Removing section items, by coordinates or by the widget they hold.

use tracing::debug;

use super::{HandlerEnv, HandlerOutcome};
use crate::commands::Command;
use crate::error::{EngineError, Result};
use crate::events::Event;
use crate::model::{ItemCoordinates, ObjRef};
use crate::store::{Action, ActionBatch, UndoMeta};

/// Resolve a widget reference to coordinates, then remove the item there.
pub(crate) fn handle_by_widget_ref(
    env: &HandlerEnv<'_>,
    cmd: &Command,
    widget_ref: &ObjRef,
    eager: bool,
    stash_identifier: Option<String>,
) -> Result<HandlerOutcome> {
    let layout = env.state.layout().layout();
    let coords = layout.coordinates_of(widget_ref).ok_or_else(|| {
        EngineError::invalid_arguments(format!(
            "cannot find widget to remove with ref {widget_ref}"
        ))
    })?;
    // emit the resolved widget's preferred ref, not the caller's flavor
    let resolved_ref = layout
        .item(coords)
        .map(|item| item.widget.obj_ref())
        .unwrap_or_else(|| widget_ref.clone());
    remove_at(env, cmd, resolved_ref, coords, eager, stash_identifier)
}

/// Remove the item at the given coordinates.
pub(crate) fn handle(
    env: &HandlerEnv<'_>,
    cmd: &Command,
    coords: ItemCoordinates,
    eager: bool,
    stash_identifier: Option<String>,
) -> Result<HandlerOutcome> {
    let item = env.state.layout().layout().item(coords).ok_or_else(|| {
        EngineError::invalid_arguments(format!(
            "no layout item at section {} item {}",
            coords.section_index, coords.item_index
        ))
    })?;
    let widget_ref = item.widget.obj_ref();
    remove_at(env, cmd, widget_ref, coords, eager, stash_identifier)
}

fn remove_at(
    env: &HandlerEnv<'_>,
    cmd: &Command,
    widget_ref: ObjRef,
    coords: ItemCoordinates,
    eager: bool,
    stash_identifier: Option<String>,
) -> Result<HandlerOutcome> {
    let remaining_items = env
        .state
        .layout()
        .layout()
        .sections
        .get(coords.section_index)
        .map_or(0, |s| s.items.len());
    let section_removed = eager && remaining_items == 1;
    let stashed = stash_identifier.is_some();

    debug!(
        correlation_id = %cmd.correlation_id(),
        widget = %widget_ref,
        section = coords.section_index,
        item = coords.item_index,
        stashed,
        section_removed,
        "Removing section item"
    );

    let batch = ActionBatch::new(vec![Action::RemoveSectionItem {
        coords,
        eager,
        stash_identifier,
        undo: UndoMeta::new(cmd),
    }]);
    let event = Event::section_item_removed(cmd, widget_ref, coords, stashed, section_removed);
    Ok(HandlerOutcome { batch, event })
}
