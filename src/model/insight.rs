//! Insight entities: analytical visualization definitions.

use serde::{Deserialize, Serialize};

use super::objref::{HasIdentity, ObjRef, RefIdentity};

/// Visualization type driving rendering and default sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisualizationType {
    /// Tabular visualization.
    Table,
    /// Column chart.
    Column,
    /// Bar chart.
    Bar,
    /// Line chart.
    Line,
    /// Pie chart.
    Pie,
    /// Single-number headline.
    Headline,
}

/// A filter attached to an insight definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightFilter {
    /// Display form the filter applies to.
    pub display_form: ObjRef,
    /// Filter element values.
    pub values: Vec<String>,
    /// Whether the filter excludes the listed values.
    pub negative: bool,
}

/// Analytical visualization definition.
///
/// Loaded lazily through the external loader and cached in the normalized
/// insight table keyed by reference identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Reference identity.
    pub identity: RefIdentity,
    /// Derived display title.
    pub title: String,
    /// Attached filters.
    pub filters: Vec<InsightFilter>,
    /// Visualization type.
    pub visualization: VisualizationType,
    /// Visualization properties (free-form JSON).
    pub properties: serde_json::Value,
}

impl Insight {
    /// Insight with no filters and empty properties.
    pub fn new(
        identity: RefIdentity,
        title: impl Into<String>,
        visualization: VisualizationType,
    ) -> Self {
        Self {
            identity,
            title: title.into(),
            filters: Vec::new(),
            visualization,
            properties: serde_json::Value::Null,
        }
    }

    /// The insight's derived display title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl HasIdentity for Insight {
    fn identity(&self) -> &RefIdentity {
        &self.identity
    }
}
