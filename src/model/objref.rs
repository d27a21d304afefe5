//! Structural object references.
//!
//! An [`ObjRef`] identifies a domain object in one of two flavors: by
//! identifier (optionally qualified with an object type) or by URI. Two
//! references denote the same object when they resolve to the same entity
//! under either canonical encoding, so equality across flavors is computed
//! through canonicalization and the dual-index [`crate::model::ObjRefMap`],
//! never through literal deep-equality.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type discriminator carried by identifier-based references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectType {
    /// Analytical visualization definition.
    Insight,
    /// Dashboard object.
    Dashboard,
    /// Attribute display form.
    DisplayForm,
    /// Measure definition.
    Measure,
    /// Attribute definition.
    Attribute,
}

impl ObjectType {
    /// Canonical lowercase name used in serialized keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Insight => "insight",
            ObjectType::Dashboard => "dashboard",
            ObjectType::DisplayForm => "displayForm",
            ObjectType::Measure => "measure",
            ObjectType::Attribute => "attribute",
        }
    }
}

/// Structural identifier for a domain object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjRef {
    /// Identifier-based reference, optionally qualified with an object type.
    Id {
        /// Stable object identifier.
        identifier: String,
        /// Optional type discriminator. Lookups ignore it unless the map is
        /// constructed with strict type checking.
        obj_type: Option<ObjectType>,
    },
    /// URI-based (value) reference.
    Uri(String),
}

impl ObjRef {
    /// Identifier-based reference without a type discriminator.
    pub fn id(identifier: impl Into<String>) -> Self {
        ObjRef::Id {
            identifier: identifier.into(),
            obj_type: None,
        }
    }

    /// Identifier-based reference qualified with an object type.
    pub fn typed(identifier: impl Into<String>, obj_type: ObjectType) -> Self {
        ObjRef::Id {
            identifier: identifier.into(),
            obj_type: Some(obj_type),
        }
    }

    /// URI-based reference.
    pub fn uri(uri: impl Into<String>) -> Self {
        ObjRef::Uri(uri.into())
    }
}

impl fmt::Display for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_obj_ref(self))
    }
}

/// Serialize a reference to its canonical string key.
///
/// The key is unique per reference value and is used for map keys and
/// memoization cache keys:
/// - `Id` without type: the identifier itself
/// - `Id` with type: `identifier#type`
/// - `Uri`: the URI
pub fn serialize_obj_ref(obj_ref: &ObjRef) -> String {
    match obj_ref {
        ObjRef::Id {
            identifier,
            obj_type: Some(t),
        } => format!("{identifier}#{}", t.as_str()),
        ObjRef::Id {
            identifier,
            obj_type: None,
        } => identifier.clone(),
        ObjRef::Uri(uri) => uri.clone(),
    }
}

/// The reference-bearing facet of an entity.
///
/// Entities expose both their identifier and URI when known, which is what
/// lets the identity map resolve either reference flavor to the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefIdentity {
    /// Stable object identifier.
    pub identifier: Option<String>,
    /// Object URI.
    pub uri: Option<String>,
    /// Object type, when known.
    pub obj_type: Option<ObjectType>,
}

impl RefIdentity {
    /// Identity carrying both identifier and URI.
    pub fn new(identifier: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            uri: Some(uri.into()),
            obj_type: None,
        }
    }

    /// Attach an object type discriminator.
    pub fn with_type(mut self, obj_type: ObjectType) -> Self {
        self.obj_type = Some(obj_type);
        self
    }

    /// Preferred [`ObjRef`] for this identity: identifier flavor when an
    /// identifier is known, URI flavor otherwise.
    pub fn obj_ref(&self) -> ObjRef {
        match (&self.identifier, &self.uri) {
            (Some(id), _) => ObjRef::Id {
                identifier: id.clone(),
                obj_type: self.obj_type,
            },
            (None, Some(uri)) => ObjRef::Uri(uri.clone()),
            (None, None) => ObjRef::Id {
                identifier: String::new(),
                obj_type: self.obj_type,
            },
        }
    }
}

/// Entities that expose a structural reference identity.
pub trait HasIdentity {
    /// The entity's reference identity.
    fn identity(&self) -> &RefIdentity;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_id_ref() {
        assert_eq!(serialize_obj_ref(&ObjRef::id("sales")), "sales");
    }

    #[test]
    fn test_serialize_typed_id_ref() {
        assert_eq!(
            serialize_obj_ref(&ObjRef::typed("sales", ObjectType::Insight)),
            "sales#insight"
        );
    }

    #[test]
    fn test_serialize_uri_ref() {
        assert_eq!(
            serialize_obj_ref(&ObjRef::uri("/gdc/md/ws/obj/1")),
            "/gdc/md/ws/obj/1"
        );
    }

    #[test]
    fn test_distinct_instances_share_canonical_key() {
        let a = ObjRef::id("sales".to_string());
        let b = ObjRef::id("sales".to_string());
        assert_eq!(serialize_obj_ref(&a), serialize_obj_ref(&b));
    }

    #[test]
    fn test_identity_prefers_identifier_flavor() {
        let identity = RefIdentity::new("w1", "/gdc/md/ws/obj/1");
        assert_eq!(identity.obj_ref(), ObjRef::id("w1"));
    }

    #[test]
    fn test_identity_falls_back_to_uri_flavor() {
        let identity = RefIdentity {
            identifier: None,
            uri: Some("/gdc/md/ws/obj/1".to_string()),
            obj_type: None,
        };
        assert_eq!(identity.obj_ref(), ObjRef::uri("/gdc/md/ws/obj/1"));
    }

    #[test]
    fn test_display_matches_canonical_serialization() {
        let r = ObjRef::typed("t1", ObjectType::Dashboard);
        assert_eq!(r.to_string(), serialize_obj_ref(&r));
    }
}
