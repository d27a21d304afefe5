//! Layout slice: the section/item aggregate plus the removal stash.

use std::collections::HashMap;

use crate::model::{InsightWidget, ItemCoordinates, Layout, ObjRef, SectionItem, SizeInfo};

/// Layout slice of the dashboard store.
///
/// The revision counter is bumped on every committed mutation; selectors key
/// their memoization on it.
#[derive(Debug, Clone)]
pub struct LayoutState {
    layout: Layout,
    stash: HashMap<String, Vec<SectionItem>>,
    rev: u64,
}

impl LayoutState {
    pub(crate) fn new(layout: Layout) -> Self {
        Self {
            layout,
            stash: HashMap::new(),
            rev: 1,
        }
    }

    /// The layout aggregate.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Revision counter; changes whenever the slice is mutated.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// Items stashed under the given identifier, most recent last.
    pub fn stashed(&self, identifier: &str) -> Option<&[SectionItem]> {
        self.stash.get(identifier).map(Vec::as_slice)
    }

    fn widget_mut(&mut self, widget_ref: &ObjRef) -> Option<&mut InsightWidget> {
        let coords = self.layout.coordinates_of(widget_ref)?;
        self.layout
            .sections
            .get_mut(coords.section_index)
            .and_then(|s| s.items.get_mut(coords.item_index))
            .map(|i| &mut i.widget)
    }

    pub(crate) fn check_replace_insight(&self, widget_ref: &ObjRef) -> Result<(), String> {
        if self.layout.coordinates_of(widget_ref).is_none() {
            return Err(format!("widget with ref {widget_ref} is not in the layout"));
        }
        Ok(())
    }

    pub(crate) fn apply_replace_insight(
        &mut self,
        widget_ref: &ObjRef,
        insight_ref: ObjRef,
        properties: Option<serde_json::Value>,
        new_title: Option<String>,
        new_size: Option<SizeInfo>,
    ) {
        if let Some(widget) = self.widget_mut(widget_ref) {
            widget.insight = insight_ref;
            if let Some(properties) = properties {
                widget.properties = properties;
            }
            if let Some(title) = new_title {
                widget.title = title;
            }
            if let Some(size) = new_size {
                widget.size = Some(size);
            }
        }
        self.rev += 1;
    }

    pub(crate) fn check_remove_item(&self, coords: ItemCoordinates) -> Result<(), String> {
        if self.layout.item(coords).is_none() {
            return Err(format!(
                "no layout item at section {} item {}",
                coords.section_index, coords.item_index
            ));
        }
        Ok(())
    }

    pub(crate) fn apply_remove_item(
        &mut self,
        coords: ItemCoordinates,
        eager: bool,
        stash_identifier: Option<String>,
    ) {
        if let Some(section) = self.layout.sections.get_mut(coords.section_index) {
            if coords.item_index < section.items.len() {
                let item = section.items.remove(coords.item_index);
                if let Some(identifier) = stash_identifier {
                    self.stash.entry(identifier).or_default().push(item);
                }
                if eager && section.items.is_empty() {
                    self.layout.sections.remove(coords.section_index);
                }
            }
        }
        self.rev += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RefIdentity, Section};

    fn widget(identifier: &str) -> InsightWidget {
        InsightWidget::new(
            RefIdentity::new(identifier, format!("/obj/{identifier}")),
            identifier,
            ObjRef::id("i1"),
        )
    }

    fn state(widgets_per_section: Vec<Vec<&str>>) -> LayoutState {
        LayoutState::new(Layout::new(
            widgets_per_section
                .into_iter()
                .map(|ids| Section {
                    header: None,
                    items: ids
                        .into_iter()
                        .map(|id| SectionItem { widget: widget(id) })
                        .collect(),
                })
                .collect(),
        ))
    }

    #[test]
    fn test_replace_insight_updates_widget_and_rev() {
        let mut s = state(vec![vec!["w1"]]);
        let rev = s.rev();

        s.apply_replace_insight(
            &ObjRef::id("w1"),
            ObjRef::id("i2"),
            None,
            Some("Revenue".to_string()),
            Some(SizeInfo {
                grid_width: 6,
                grid_height: 14,
            }),
        );

        let w = s.layout().widgets().next().unwrap();
        assert_eq!(w.insight, ObjRef::id("i2"));
        assert_eq!(w.title, "Revenue");
        assert!(w.size.is_some());
        assert!(s.rev() > rev);
    }

    #[test]
    fn test_replace_insight_preserves_title_when_not_set() {
        let mut s = state(vec![vec!["w1"]]);
        s.apply_replace_insight(&ObjRef::id("w1"), ObjRef::id("i2"), None, None, None);
        assert_eq!(s.layout().widgets().next().unwrap().title, "w1");
    }

    #[test]
    fn test_remove_item_plain() {
        let mut s = state(vec![vec!["w1", "w2"]]);
        s.apply_remove_item(
            ItemCoordinates {
                section_index: 0,
                item_index: 0,
            },
            false,
            None,
        );
        assert_eq!(s.layout().sections.len(), 1);
        assert_eq!(s.layout().widgets().count(), 1);
    }

    #[test]
    fn test_eager_remove_drops_emptied_section() {
        let mut s = state(vec![vec!["w1"], vec!["w2"]]);
        s.apply_remove_item(
            ItemCoordinates {
                section_index: 0,
                item_index: 0,
            },
            true,
            None,
        );
        assert_eq!(s.layout().sections.len(), 1);
    }

    #[test]
    fn test_stashed_item_is_kept() {
        let mut s = state(vec![vec!["w1"]]);
        s.apply_remove_item(
            ItemCoordinates {
                section_index: 0,
                item_index: 0,
            },
            false,
            Some("stash-1".to_string()),
        );
        let stashed = s.stashed("stash-1").unwrap();
        assert_eq!(stashed.len(), 1);
        assert_eq!(
            stashed[0].widget.identity.identifier.as_deref(),
            Some("w1")
        );
    }

    #[test]
    fn test_check_remove_rejects_out_of_range() {
        let s = state(vec![vec!["w1"]]);
        assert!(s
            .check_remove_item(ItemCoordinates {
                section_index: 0,
                item_index: 3
            })
            .is_err());
    }
}
