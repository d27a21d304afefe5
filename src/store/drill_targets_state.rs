//! Drill target slice: per-widget drill configuration.

use crate::model::{DrillTargets, ObjRefMap};

/// Drill targets for all widgets that reported them, keyed by widget
/// identity.
#[derive(Debug, Clone)]
pub struct DrillTargetsState {
    targets: ObjRefMap<DrillTargets>,
    rev: u64,
}

impl DrillTargetsState {
    pub(crate) fn new() -> Self {
        Self {
            targets: ObjRefMap::new(Vec::new()),
            rev: 1,
        }
    }

    /// Identity map of all recorded drill targets.
    pub fn all(&self) -> &ObjRefMap<DrillTargets> {
        &self.targets
    }

    /// Revision counter; changes whenever the slice is mutated.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub(crate) fn apply_set(&mut self, targets: DrillTargets) {
        self.targets.insert(targets);
        self.rev += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DrillTarget, ObjRef, RefIdentity};

    fn targets_for(identifier: &str, count: usize) -> DrillTargets {
        let targets = (0..count)
            .map(|i| DrillTarget {
                title: format!("target {i}"),
                target: ObjRef::id(format!("t{i}")),
            })
            .collect();
        DrillTargets::new(
            RefIdentity::new(identifier, format!("/obj/{identifier}")),
            targets,
        )
    }

    #[test]
    fn test_set_replaces_existing_entry_for_widget() {
        let mut s = DrillTargetsState::new();
        s.apply_set(targets_for("w1", 1));
        let rev = s.rev();

        s.apply_set(targets_for("w1", 3));

        assert_eq!(s.all().len(), 1);
        let entry = s.all().get(&ObjRef::id("w1")).unwrap();
        assert_eq!(entry.targets.len(), 3);
        assert!(s.rev() > rev);
    }

    #[test]
    fn test_entries_resolve_by_either_flavor() {
        let mut s = DrillTargetsState::new();
        s.apply_set(targets_for("w1", 2));
        assert!(s.all().has(&ObjRef::uri("/obj/w1")));
    }
}
