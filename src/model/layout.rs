//! Dashboard layout aggregate: sections of widget-bearing items.

use serde::{Deserialize, Serialize};

use super::objref::ObjRef;
use super::widget::InsightWidget;

/// Optional section title/description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionHeader {
    /// Section title.
    pub title: Option<String>,
    /// Section description.
    pub description: Option<String>,
}

/// One item in a layout section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionItem {
    /// The widget placed at this item.
    pub widget: InsightWidget,
}

/// One layout section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Optional header.
    pub header: Option<SectionHeader>,
    /// Ordered items.
    pub items: Vec<SectionItem>,
}

/// Position of an item within the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCoordinates {
    /// Index of the section.
    pub section_index: usize,
    /// Index of the item within the section.
    pub item_index: usize,
}

/// The dashboard layout aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Ordered sections.
    pub sections: Vec<Section>,
}

impl Layout {
    /// Layout with the given sections.
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Iterate all widgets across sections in layout order.
    pub fn widgets(&self) -> impl Iterator<Item = &InsightWidget> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter())
            .map(|i| &i.widget)
    }

    /// The item at the given coordinates, when in range.
    pub fn item(&self, coords: ItemCoordinates) -> Option<&SectionItem> {
        self.sections
            .get(coords.section_index)
            .and_then(|s| s.items.get(coords.item_index))
    }

    /// Coordinates of the widget with the given reference.
    ///
    /// Matches by either reference flavor against the widget's identity;
    /// type discriminators are ignored.
    pub fn coordinates_of(&self, widget_ref: &ObjRef) -> Option<ItemCoordinates> {
        for (section_index, section) in self.sections.iter().enumerate() {
            for (item_index, item) in section.items.iter().enumerate() {
                let identity = &item.widget.identity;
                let matches = match widget_ref {
                    ObjRef::Id { identifier, .. } => {
                        identity.identifier.as_deref() == Some(identifier.as_str())
                    }
                    ObjRef::Uri(uri) => identity.uri.as_deref() == Some(uri.as_str()),
                };
                if matches {
                    return Some(ItemCoordinates {
                        section_index,
                        item_index,
                    });
                }
            }
        }
        None
    }
}
