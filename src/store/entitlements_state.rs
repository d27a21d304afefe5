//! Entitlement slice: session-wide feature descriptors.

use crate::model::EntitlementDescriptor;

/// Session entitlements. `None` until initialization completes; the set is
/// only ever replaced wholesale, never patched.
#[derive(Debug, Clone)]
pub struct EntitlementsState {
    entitlements: Option<Vec<EntitlementDescriptor>>,
    rev: u64,
}

impl EntitlementsState {
    pub(crate) fn new() -> Self {
        Self {
            entitlements: None,
            rev: 1,
        }
    }

    /// The initialized entitlement set, or `None` before initialization.
    pub fn entitlements(&self) -> Option<&[EntitlementDescriptor]> {
        self.entitlements.as_deref()
    }

    /// Revision counter; changes whenever the slice is mutated.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub(crate) fn apply_initialize(&mut self, entitlements: Vec<EntitlementDescriptor>) {
        self.entitlements = Some(entitlements);
        self.rev += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ENTITLEMENT_PDF_EXPORTS, ENTITLEMENT_WORKSPACE_COUNT};

    #[test]
    fn test_uninitialized_until_first_apply() {
        let s = EntitlementsState::new();
        assert!(s.entitlements().is_none());
    }

    #[test]
    fn test_reinitialize_replaces_wholesale() {
        let mut s = EntitlementsState::new();
        s.apply_initialize(vec![
            EntitlementDescriptor::named(ENTITLEMENT_PDF_EXPORTS),
            EntitlementDescriptor::with_value(ENTITLEMENT_WORKSPACE_COUNT, "5"),
        ]);
        let rev = s.rev();

        s.apply_initialize(vec![EntitlementDescriptor::named(ENTITLEMENT_PDF_EXPORTS)]);

        assert_eq!(s.entitlements().unwrap().len(), 1);
        assert!(s.rev() > rev);
    }
}
