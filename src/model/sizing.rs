//! Default widget sizing derived from visualization type.

use serde::{Deserialize, Serialize};

use super::insight::VisualizationType;

/// Widget size in layout grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeInfo {
    /// Width in grid columns.
    pub grid_width: u32,
    /// Height in grid rows.
    pub grid_height: u32,
}

/// Default size for a widget rendering the given visualization type.
///
/// Used when a content swap changes the visualization: the widget is resized
/// to the new content's default unless it fits already.
pub fn size_for_visualization(visualization: VisualizationType) -> SizeInfo {
    match visualization {
        VisualizationType::Headline => SizeInfo {
            grid_width: 4,
            grid_height: 8,
        },
        VisualizationType::Table => SizeInfo {
            grid_width: 12,
            grid_height: 12,
        },
        VisualizationType::Column
        | VisualizationType::Bar
        | VisualizationType::Line
        | VisualizationType::Pie => SizeInfo {
            grid_width: 6,
            grid_height: 14,
        },
    }
}
