//! Switching the insight an insight widget renders.

use backon::Retryable;
use tracing::{debug, warn};

use super::{validation, HandlerEnv, HandlerOutcome};
use crate::commands::Command;
use crate::error::{EngineError, Result};
use crate::events::Event;
use crate::model::{size_for_visualization, Insight, ObjRef};
use crate::retry::{is_retryable_load_error, loader_backoff};
use crate::store::{Action, ActionBatch, UndoMeta};

/// Full pipeline for an insight swap:
///
/// 1. the widget must exist in the layout
/// 2. the insight it currently renders must be in the store (inconsistent
///    store otherwise, so the fault surfaces loudly)
/// 3. the target insight is always re-fetched from the backend; any load
///    failure surfaces as invalid arguments naming the reference
/// 4. the widget title follows the insight title unless the widget carries
///    a custom one, and the widget is resized when the visualization type
///    changes
pub(crate) async fn handle(
    env: &HandlerEnv<'_>,
    cmd: &Command,
    widget_ref: &ObjRef,
    insight_ref: &ObjRef,
    visualization_properties: Option<&serde_json::Value>,
) -> Result<HandlerOutcome> {
    let widget = validation::validate_existing_insight_widget(env.selectors, env.state, widget_ref)?;

    let original = env
        .selectors
        .insight_by_ref(&widget.insight)
        .select(env.state);
    let original = original.as_ref().as_ref().ok_or_else(|| {
        EngineError::inconsistent_store(format!(
            "insight {} rendered by widget {widget_ref} is not in the store",
            widget.insight
        ))
    })?;

    let insight = load_insight(env, insight_ref).await?;

    let has_custom_title = widget.title() != original.title();
    let new_title = (!has_custom_title && insight.title() != original.title())
        .then(|| insight.title().to_string());
    let new_size = (insight.visualization != original.visualization)
        .then(|| size_for_visualization(insight.visualization));

    debug!(
        correlation_id = %cmd.correlation_id(),
        widget = %widget_ref,
        insight = %insight_ref,
        retitled = new_title.is_some(),
        resized = new_size.is_some(),
        "Switching widget insight"
    );

    let batch = ActionBatch::new(vec![
        Action::UpsertInsight {
            insight: insight.clone(),
        },
        Action::RequestInsightListRefresh,
        Action::ReplaceInsightWidgetInsight {
            widget_ref: widget_ref.clone(),
            insight_ref: insight_ref.clone(),
            properties: visualization_properties.cloned(),
            new_title,
            new_size,
            undo: UndoMeta::new(cmd),
        },
    ]);
    let event = Event::insight_widget_insight_switched(cmd, widget_ref.clone(), insight);
    Ok(HandlerOutcome { batch, event })
}

/// Load the target insight, retrying transient backend faults.
async fn load_insight(env: &HandlerEnv<'_>, insight_ref: &ObjRef) -> Result<Insight> {
    let load = || async { env.loader.load(&env.ctx.workspace, insight_ref).await };
    load.retry(loader_backoff(env.loader_config))
        .when(is_retryable_load_error)
        .await
        .map_err(|err| {
            warn!(insight = %insight_ref, error = %err, "Insight load failed");
            EngineError::invalid_arguments(format!(
                "the insight with ref {insight_ref} was not found"
            ))
        })
}
