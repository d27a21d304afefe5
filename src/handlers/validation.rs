//! Pure validation guards shared by command handlers.
//!
//! Guards read entities through selectors and never perform I/O; a failed
//! guard aborts the handler before any action is assembled, so validation
//! failures leave the store untouched by construction.

use crate::error::{EngineError, Result};
use crate::model::{InsightWidget, ObjRef};
use crate::selectors::Selectors;
use crate::store::DashboardState;

/// Resolve the insight widget the given reference points at.
///
/// Fails with [`EngineError::InvalidArguments`] naming the serialized
/// reference when no widget in the layout matches.
pub(crate) fn validate_existing_insight_widget(
    selectors: &Selectors,
    state: &DashboardState,
    widget_ref: &ObjRef,
) -> Result<InsightWidget> {
    selectors
        .widgets_map(state)
        .get(widget_ref)
        .cloned()
        .ok_or_else(|| {
            EngineError::invalid_arguments(format!(
                "cannot find insight widget with ref {widget_ref}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Layout, RefIdentity, Section, SectionItem};

    fn state_with_widget(identifier: &str) -> DashboardState {
        let widget = InsightWidget::new(
            RefIdentity::new(identifier, format!("/obj/{identifier}")),
            "Widget",
            ObjRef::id("i1"),
        );
        DashboardState::new(
            Layout::new(vec![Section {
                header: None,
                items: vec![SectionItem { widget }],
            }]),
            Vec::new(),
        )
    }

    #[test]
    fn test_resolves_widget_by_either_flavor() {
        let selectors = Selectors::default();
        let state = state_with_widget("w1");

        assert!(
            validate_existing_insight_widget(&selectors, &state, &ObjRef::id("w1")).is_ok()
        );
        assert!(
            validate_existing_insight_widget(&selectors, &state, &ObjRef::uri("/obj/w1")).is_ok()
        );
    }

    #[test]
    fn test_unknown_widget_names_the_ref() {
        let selectors = Selectors::default();
        let state = state_with_widget("w1");

        let err = validate_existing_insight_widget(&selectors, &state, &ObjRef::id("missing"))
            .unwrap_err();
        assert!(err.to_string().contains("missing"));
        assert!(matches!(err, EngineError::InvalidArguments { .. }));
    }
}
