//! Test utilities and mock implementations.
//!
//! This module provides a mock insight loader and entity builders for
//! testing without a real backend.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::interfaces::{InsightLoader, LoadError};
use crate::model::{
    serialize_obj_ref, Insight, InsightWidget, Layout, ObjRef, RefIdentity, Section, SectionItem,
    VisualizationType,
};

/// Mock insight loader serving a fixed set of insights.
///
/// Resolves references by identifier or URI. Loads of references in the
/// fail set return `Backend` errors; unknown references return `NotFound`.
#[derive(Default)]
pub struct StaticInsightLoader {
    insights: Vec<Insight>,
    fail_refs: RwLock<HashSet<String>>,
    /// Number of initial load attempts that fail with a backend error
    /// before loads start succeeding. Exercises retry paths.
    transient_failures: AtomicUsize,
    load_attempts: AtomicUsize,
}

impl StaticInsightLoader {
    pub fn new(insights: Vec<Insight>) -> Self {
        Self {
            insights,
            ..Self::default()
        }
    }

    /// Make loads of the given reference fail with a backend error.
    pub async fn set_fail_for(&self, obj_ref: &ObjRef) {
        self.fail_refs.write().await.insert(serialize_obj_ref(obj_ref));
    }

    /// Make the next `count` load attempts fail with a backend error.
    pub fn set_transient_failures(&self, count: usize) {
        self.transient_failures.store(count, Ordering::SeqCst);
    }

    /// Total load attempts observed, including failed ones.
    pub fn load_attempts(&self) -> usize {
        self.load_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InsightLoader for StaticInsightLoader {
    async fn load(&self, _workspace: &str, insight_ref: &ObjRef) -> Result<Insight, LoadError> {
        self.load_attempts.fetch_add(1, Ordering::SeqCst);

        let remaining = self.transient_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(LoadError::Backend("transient backend fault".to_string()));
        }

        let key = serialize_obj_ref(insight_ref);
        if self.fail_refs.read().await.contains(&key) {
            return Err(LoadError::Backend("backend unavailable".to_string()));
        }

        self.insights
            .iter()
            .find(|insight| match insight_ref {
                ObjRef::Id { identifier, .. } => {
                    insight.identity.identifier.as_deref() == Some(identifier.as_str())
                }
                ObjRef::Uri(uri) => insight.identity.uri.as_deref() == Some(uri.as_str()),
            })
            .cloned()
            .ok_or(LoadError::NotFound(key))
    }
}

/// Insight with both reference flavors and a derived URI.
pub fn test_insight(identifier: &str, title: &str, visualization: VisualizationType) -> Insight {
    Insight::new(
        RefIdentity::new(identifier, format!("/obj/{identifier}")),
        title,
        visualization,
    )
}

/// Widget rendering the given insight.
pub fn test_widget(identifier: &str, title: &str, insight_ref: ObjRef) -> InsightWidget {
    InsightWidget::new(
        RefIdentity::new(identifier, format!("/obj/{identifier}")),
        title,
        insight_ref,
    )
}

/// Layout with one section per widget group.
pub fn test_layout(sections: Vec<Vec<InsightWidget>>) -> Layout {
    Layout::new(
        sections
            .into_iter()
            .map(|widgets| Section {
                header: None,
                items: widgets
                    .into_iter()
                    .map(|widget| SectionItem { widget })
                    .collect(),
            })
            .collect(),
    )
}
