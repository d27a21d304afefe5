//! Memoized read-side queries over [`DashboardState`].
//!
//! Derived views are recomputed only when the slice they derive from has
//! moved to a new revision; otherwise the previously computed value is
//! returned as the same `Arc` instance. Parametrized selectors (per-ref
//! lookups) come from factories keyed by the reference's canonical string,
//! so two canonically equal references share one selector instance and its
//! memoized result. Factory caches are bounded; rarely used selector
//! instances are evicted least-recently-used first.

mod memo;

use std::sync::{Arc, Mutex};

use crate::error::{EngineError, Result};
use crate::model::{
    serialize_obj_ref, DrillTargets, EntitlementDescriptor, Insight, InsightWidget, ObjRef,
    ObjRefMap,
};
use crate::store::DashboardState;
use memo::{LruCache, RevCache};

/// Memoized selector registry for one dashboard engine.
pub struct Selectors {
    widgets_map: RevCache<ObjRefMap<InsightWidget>>,
    insights_map: RevCache<ObjRefMap<Insight>>,
    insight_selectors: Mutex<LruCache<Arc<InsightByRefSelector>>>,
    drill_selectors: Mutex<LruCache<Arc<DrillTargetsByRefSelector>>>,
}

impl Selectors {
    /// Registry whose factory caches hold at most `cache_capacity` selector
    /// instances each.
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            widgets_map: RevCache::new(),
            insights_map: RevCache::new(),
            insight_selectors: Mutex::new(LruCache::new(cache_capacity)),
            drill_selectors: Mutex::new(LruCache::new(cache_capacity)),
        }
    }

    /// Identity map of all widgets in the layout.
    pub fn widgets_map(&self, state: &DashboardState) -> Arc<ObjRefMap<InsightWidget>> {
        self.widgets_map
            .get_or_compute(state.layout().rev(), || {
                ObjRefMap::new(state.layout().layout().widgets().cloned())
            })
    }

    /// Identity map of all insights in the normalized table.
    pub fn insights_map(&self, state: &DashboardState) -> Arc<ObjRefMap<Insight>> {
        self.insights_map
            .get_or_compute(state.insights().rev(), || {
                ObjRefMap::new(state.insights().all().iter().cloned())
            })
    }

    /// Selector resolving the insight the given reference points at.
    ///
    /// Canonically equal references yield the same selector instance.
    pub fn insight_by_ref(&self, obj_ref: &ObjRef) -> Arc<InsightByRefSelector> {
        let key = serialize_obj_ref(obj_ref);
        let mut cache = self
            .insight_selectors
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        cache.get_or_insert_with(&key, || {
            Arc::new(InsightByRefSelector {
                obj_ref: obj_ref.clone(),
                cache: RevCache::new(),
            })
        })
    }

    /// Selector resolving the drill targets recorded for the given widget.
    pub fn drill_targets_by_widget_ref(&self, obj_ref: &ObjRef) -> Arc<DrillTargetsByRefSelector> {
        let key = serialize_obj_ref(obj_ref);
        let mut cache = self
            .drill_selectors
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        cache.get_or_insert_with(&key, || {
            Arc::new(DrillTargetsByRefSelector {
                obj_ref: obj_ref.clone(),
                cache: RevCache::new(),
            })
        })
    }

    /// The initialized entitlement set.
    ///
    /// Fails with [`EngineError::UninitializedState`] when read before the
    /// initializing command completed.
    pub fn entitlements<'a>(
        &self,
        state: &'a DashboardState,
    ) -> Result<&'a [EntitlementDescriptor]> {
        state
            .entitlements()
            .entitlements()
            .ok_or(EngineError::UninitializedState("entitlements"))
    }

    /// The entitlement with the given name, if granted.
    pub fn entitlement_by_name<'a>(
        &self,
        state: &'a DashboardState,
        name: &str,
    ) -> Result<Option<&'a EntitlementDescriptor>> {
        Ok(self
            .entitlements(state)?
            .iter()
            .find(|e| e.name == name))
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SELECTOR_CACHE_CAPACITY)
    }
}

/// Memoized per-reference insight lookup.
pub struct InsightByRefSelector {
    obj_ref: ObjRef,
    cache: RevCache<Option<Insight>>,
}

impl InsightByRefSelector {
    /// The insight the selector's reference points at, or `None` when the
    /// table holds no such insight.
    pub fn select(&self, state: &DashboardState) -> Arc<Option<Insight>> {
        self.cache.get_or_compute(state.insights().rev(), || {
            state
                .insights()
                .all()
                .iter()
                .find(|insight| matches_identity(&self.obj_ref, insight))
                .cloned()
        })
    }
}

/// Memoized per-widget drill target lookup.
pub struct DrillTargetsByRefSelector {
    obj_ref: ObjRef,
    cache: RevCache<Option<DrillTargets>>,
}

impl DrillTargetsByRefSelector {
    /// Drill targets recorded for the selector's widget, if any.
    pub fn select(&self, state: &DashboardState) -> Arc<Option<DrillTargets>> {
        self.cache.get_or_compute(state.drill_targets().rev(), || {
            state.drill_targets().all().get(&self.obj_ref).cloned()
        })
    }
}

fn matches_identity(obj_ref: &ObjRef, insight: &Insight) -> bool {
    match obj_ref {
        ObjRef::Id { identifier, .. } => {
            insight.identity.identifier.as_deref() == Some(identifier.as_str())
        }
        ObjRef::Uri(uri) => insight.identity.uri.as_deref() == Some(uri.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DrillTarget, Layout, RefIdentity, Section, SectionItem, VisualizationType,
        ENTITLEMENT_PDF_EXPORTS, ENTITLEMENT_WORKSPACE_COUNT,
    };
    use crate::store::{Action, ActionBatch};

    fn insight(identifier: &str, title: &str) -> Insight {
        Insight::new(
            RefIdentity::new(identifier, format!("/obj/{identifier}")),
            title,
            VisualizationType::Column,
        )
    }

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
        DashboardState::new(layout, vec![insight("i1", "Sales")])
    }

    #[test]
    fn test_widgets_map_is_reused_until_layout_changes() {
        let selectors = Selectors::default();
        let state = seeded_state();
        let a = selectors.widgets_map(&state);
        let b = selectors.widgets_map(&state);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_equal_refs_share_selector_instance() {
        let selectors = Selectors::default();
        let a = selectors.insight_by_ref(&ObjRef::id("i1".to_string()));
        let b = selectors.insight_by_ref(&ObjRef::id("i1".to_string()));
        assert!(Arc::ptr_eq(&a, &b));

        let other = selectors.insight_by_ref(&ObjRef::id("i2"));
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[test]
    fn test_selector_factory_cache_is_bounded() {
        let selectors = Selectors::new(2);
        let first = selectors.insight_by_ref(&ObjRef::id("a"));
        selectors.insight_by_ref(&ObjRef::id("b"));
        // touching "a" makes "b" the eviction candidate
        selectors.insight_by_ref(&ObjRef::id("a"));
        selectors.insight_by_ref(&ObjRef::id("c"));

        assert_eq!(selectors.insight_selectors.lock().unwrap().len(), 2);

        // the survivor is still the same instance
        let again = selectors.insight_by_ref(&ObjRef::id("a"));
        assert!(Arc::ptr_eq(&first, &again));
    }

    #[test]
    fn test_insight_selector_recomputes_after_upsert() {
        let selectors = Selectors::default();
        let mut state = seeded_state();
        let selector = selectors.insight_by_ref(&ObjRef::id("i1"));

        let before = selector.select(&state);
        let again = selector.select(&state);
        assert!(Arc::ptr_eq(&before, &again));

        state
            .apply_batch(ActionBatch::new(vec![Action::UpsertInsight {
                insight: insight("i1", "Sales v2"),
            }]))
            .unwrap();

        let after = selector.select(&state);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.as_ref().as_ref().unwrap().title, "Sales v2");
    }

    #[test]
    fn test_insight_selector_resolves_by_uri_flavor() {
        let selectors = Selectors::default();
        let state = seeded_state();
        let selector = selectors.insight_by_ref(&ObjRef::uri("/obj/i1"));
        assert!(selector.select(&state).is_some());
    }

    #[test]
    fn test_drill_selector_tracks_slice_revision() {
        let selectors = Selectors::default();
        let mut state = seeded_state();
        let selector = selectors.drill_targets_by_widget_ref(&ObjRef::id("w1"));
        assert!(selector.select(&state).is_none());

        let targets = DrillTargets::new(
            RefIdentity::new("w1", "/obj/w1"),
            vec![DrillTarget {
                title: "Detail".to_string(),
                target: ObjRef::id("t1"),
            }],
        );
        state
            .apply_batch(ActionBatch::new(vec![Action::SetDrillTargets {
                targets,
                undo: crate::store::UndoMeta::new(&crate::commands::Command::new(
                    crate::commands::CommandKind::SetDrillTargets {
                        widget_ref: ObjRef::id("w1"),
                        targets: vec![],
                    },
                )),
            }]))
            .unwrap();

        let resolved = selector.select(&state);
        assert_eq!(resolved.as_ref().as_ref().unwrap().targets.len(), 1);
    }

    #[test]
    fn test_entitlements_error_before_initialization() {
        let selectors = Selectors::default();
        let state = seeded_state();
        assert!(matches!(
            selectors.entitlements(&state),
            Err(EngineError::UninitializedState("entitlements"))
        ));
    }

    #[test]
    fn test_entitlement_by_name_after_initialization() {
        let selectors = Selectors::default();
        let mut state = seeded_state();
        state
            .apply_batch(ActionBatch::new(vec![Action::InitializeEntitlements {
                entitlements: vec![EntitlementDescriptor::with_value(
                    ENTITLEMENT_WORKSPACE_COUNT,
                    "5",
                )],
            }]))
            .unwrap();

        let found = selectors
            .entitlement_by_name(&state, ENTITLEMENT_WORKSPACE_COUNT)
            .unwrap();
        assert_eq!(found.unwrap().value.as_deref(), Some("5"));
        assert!(selectors
            .entitlement_by_name(&state, ENTITLEMENT_PDF_EXPORTS)
            .unwrap()
            .is_none());
    }
}
