//! Identity-keyed lookup map.
//!
//! [`ObjRefMap`] resolves entities by structural reference identity rather
//! than value equality: it maintains one index per reference flavor so that
//! identifier-based and URI-based references to the same object hit the same
//! entry. Construction is a single O(n) pass; later entries with an equal
//! identity replace earlier ones, so the map never holds two entries for
//! references that are equal under structural identity.

use std::collections::HashMap;

use super::objref::{HasIdentity, ObjRef};

/// Map of entities keyed by structural reference identity.
///
/// Lookups with an identifier reference succeed regardless of the type
/// discriminator unless the map was built with
/// [`ObjRefMap::with_strict_type_check`], in which case a discriminator on
/// both sides must match. No iteration order is guaranteed beyond insertion
/// order of surviving entries.
#[derive(Debug, Clone)]
pub struct ObjRefMap<T> {
    items: Vec<Option<T>>,
    by_identifier: HashMap<String, usize>,
    by_uri: HashMap<String, usize>,
    strict_type_check: bool,
}

impl<T: HasIdentity> ObjRefMap<T> {
    /// Build a map from entities, ignoring type discriminators on lookup.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self::build(items, false)
    }

    /// Build a map that requires matching type discriminators when both the
    /// entity and the lookup reference carry one.
    pub fn with_strict_type_check(items: impl IntoIterator<Item = T>) -> Self {
        Self::build(items, true)
    }

    fn build(items: impl IntoIterator<Item = T>, strict_type_check: bool) -> Self {
        let mut map = Self {
            items: Vec::new(),
            by_identifier: HashMap::new(),
            by_uri: HashMap::new(),
            strict_type_check,
        };
        for item in items {
            map.insert(item);
        }
        map
    }

    /// Insert an entity, replacing any entry with an equal identity.
    pub fn insert(&mut self, item: T) {
        let identity = item.identity().clone();

        // An equal identity may already be indexed under either flavor.
        let existing = identity
            .identifier
            .as_ref()
            .and_then(|id| self.by_identifier.get(id).copied())
            .or_else(|| {
                identity
                    .uri
                    .as_ref()
                    .and_then(|uri| self.by_uri.get(uri).copied())
            });

        let slot = match existing {
            Some(slot) => {
                self.items[slot] = Some(item);
                slot
            }
            None => {
                self.items.push(Some(item));
                self.items.len() - 1
            }
        };

        if let Some(id) = identity.identifier {
            self.by_identifier.insert(id, slot);
        }
        if let Some(uri) = identity.uri {
            self.by_uri.insert(uri, slot);
        }
    }

    /// Resolve a reference to its entity.
    pub fn get(&self, obj_ref: &ObjRef) -> Option<&T> {
        let slot = match obj_ref {
            ObjRef::Id {
                identifier,
                obj_type,
            } => {
                let slot = *self.by_identifier.get(identifier)?;
                if self.strict_type_check {
                    let entity_type =
                        self.items[slot].as_ref().and_then(|i| i.identity().obj_type);
                    if let (Some(want), Some(have)) = (obj_type, entity_type) {
                        if *want != have {
                            return None;
                        }
                    }
                }
                slot
            }
            ObjRef::Uri(uri) => *self.by_uri.get(uri)?,
        };
        self.items[slot].as_ref()
    }

    /// Whether the reference resolves to an entity.
    pub fn has(&self, obj_ref: &ObjRef) -> bool {
        self.get(obj_ref).is_some()
    }

    /// Number of distinct entities.
    pub fn len(&self) -> usize {
        self.items.iter().filter(|i| i.is_some()).count()
    }

    /// Whether the map holds no entities.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate entities. No ordering guarantee.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter_map(|i| i.as_ref())
    }
}
