//! Domain model for dashboard entities.
//!
//! Entities are plain data: they are created by store initialization or by
//! dispatched mutations and are never mutated directly by callers. Identity
//! is structural: see [`objref`] for the reference model and [`refmap`] for
//! identity-keyed lookup.

pub mod drill;
pub mod entitlement;
pub mod insight;
pub mod layout;
pub mod objref;
pub mod refmap;
pub mod sizing;
pub mod widget;

pub use drill::{DrillTarget, DrillTargets};
pub use entitlement::{
    EntitlementDescriptor, ENTITLEMENT_CUSTOM_THEMING, ENTITLEMENT_PDF_EXPORTS,
    ENTITLEMENT_WORKSPACE_COUNT,
};
pub use insight::{Insight, InsightFilter, VisualizationType};
pub use layout::{ItemCoordinates, Layout, Section, SectionHeader, SectionItem};
pub use objref::{serialize_obj_ref, HasIdentity, ObjRef, ObjectType, RefIdentity};
pub use refmap::ObjRefMap;
pub use sizing::{size_for_visualization, SizeInfo};
pub use widget::InsightWidget;
