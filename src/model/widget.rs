//! Insight widget entities: dashboard tiles bound to an insight.

use serde::{Deserialize, Serialize};

use super::objref::{HasIdentity, ObjRef, RefIdentity};
use super::sizing::SizeInfo;

/// Dashboard tile rendering an insight.
///
/// Owned by the layout aggregate and mutated only through dispatched layout
/// actions. The title is either derived from the linked insight or customized
/// by the user; a title is considered custom when it differs from the linked
/// insight's derived title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightWidget {
    /// Reference identity.
    pub identity: RefIdentity,
    /// Displayed title.
    pub title: String,
    /// Reference to the linked insight.
    pub insight: ObjRef,
    /// Size metadata, when pinned.
    pub size: Option<SizeInfo>,
    /// Custom properties (free-form JSON).
    pub properties: serde_json::Value,
}

impl InsightWidget {
    /// Widget with no pinned size and empty custom properties.
    pub fn new(identity: RefIdentity, title: impl Into<String>, insight: ObjRef) -> Self {
        Self {
            identity,
            title: title.into(),
            insight,
            size: None,
            properties: serde_json::Value::Null,
        }
    }

    /// The widget's displayed title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Preferred reference to this widget.
    pub fn obj_ref(&self) -> ObjRef {
        self.identity.obj_ref()
    }
}

impl HasIdentity for InsightWidget {
    fn identity(&self) -> &RefIdentity {
        &self.identity
    }
}
