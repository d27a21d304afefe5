//! Session entitlements: named feature descriptors.

use serde::{Deserialize, Serialize};

/// Entitlement name enabling PDF exports.
pub const ENTITLEMENT_PDF_EXPORTS: &str = "PdfExports";
/// Entitlement name enabling custom theming.
pub const ENTITLEMENT_CUSTOM_THEMING: &str = "CustomTheming";
/// Entitlement name capping workspace count; the value carries the limit.
pub const ENTITLEMENT_WORKSPACE_COUNT: &str = "WorkspaceCount";

/// One named feature descriptor.
///
/// Entitlements are process-wide and initialized once per session as a
/// complete set; there is no partial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementDescriptor {
    /// Feature name, e.g. [`ENTITLEMENT_PDF_EXPORTS`].
    pub name: String,
    /// Optional feature value (e.g. a numeric limit encoded as string).
    pub value: Option<String>,
}

impl EntitlementDescriptor {
    /// Descriptor without a value.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Descriptor carrying a value.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}
