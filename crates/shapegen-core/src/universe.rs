//! The source type universe: every declaration the host layer can describe.
//!
//! The compiler never reflects over a live runtime. Instead a host adapter (or
//! a JSON document written by one) hands it a [`TypeUniverse`], and the
//! standard [`UniverseParser`](crate::parser::UniverseParser) reads
//! declarations from there.

pub mod descriptor;
pub mod raw_type;
pub mod source_ref;

pub use descriptor::{
    ClassDescriptor, DeclarationKind, EnumConstant, IdGenerator, IdentityInfo, NamedType,
    PropertyAccess, PropertyDescriptor, Shape, TypeIdInclusion, TypeIdKind, TypeInfo, Unwrapped,
};
pub use raw_type::{RawType, TypeId};
pub use source_ref::{Role, SourceTypeRef};

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// On-disk form of a universe.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct UniverseDocument {
    #[serde(default)]
    pub types: Vec<ClassDescriptor>,
    /// The global subtype registry used when an anchor lists no subtypes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registered_subtypes: Vec<NamedType>,
}

/// Indexed set of class descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "UniverseDocument", into = "UniverseDocument")]
pub struct TypeUniverse {
    types: IndexMap<TypeId, ClassDescriptor>,
    registered_subtypes: Vec<NamedType>,
}

impl From<UniverseDocument> for TypeUniverse {
    fn from(doc: UniverseDocument) -> Self {
        let mut universe = TypeUniverse::new();
        for desc in doc.types {
            universe.insert(desc);
        }
        universe.registered_subtypes = doc.registered_subtypes;
        universe
    }
}

impl From<TypeUniverse> for UniverseDocument {
    fn from(universe: TypeUniverse) -> Self {
        UniverseDocument {
            types: universe.types.into_values().collect(),
            registered_subtypes: universe.registered_subtypes,
        }
    }
}

impl TypeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor. A later descriptor with the same id replaces the
    /// earlier one but keeps its position.
    pub fn insert(&mut self, desc: ClassDescriptor) {
        self.types.insert(desc.id.clone(), desc);
    }

    pub fn with_type(mut self, desc: ClassDescriptor) -> Self {
        self.insert(desc);
        self
    }

    pub fn register_subtype(&mut self, subtype: NamedType) {
        self.registered_subtypes.push(subtype);
    }

    pub fn with_registered_subtype(mut self, subtype: NamedType) -> Self {
        self.register_subtype(subtype);
        self
    }

    pub fn get(&self, id: &TypeId) -> Option<&ClassDescriptor> {
        self.types.get(id)
    }

    pub fn contains(&self, id: &TypeId) -> bool {
        self.types.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.types.values()
    }

    pub fn registered_subtypes(&self) -> &[NamedType] {
        &self.registered_subtypes
    }

    /// Direct supertypes in search order: superclass first, then interfaces.
    pub fn supertypes<'a>(&'a self, desc: &'a ClassDescriptor) -> impl Iterator<Item = &'a TypeId> {
        desc.superclass
            .iter()
            .chain(desc.interfaces.iter())
            .filter_map(RawType::class_id)
    }

    /// Depth-first search of the hierarchy of `start`, superclass before
    /// interfaces. Returns the first descriptor for which `probe` yields a value.
    pub fn search_hierarchy<T>(
        &self,
        start: &TypeId,
        include_self: bool,
        probe: impl Fn(&ClassDescriptor) -> Option<T>,
    ) -> Option<(&ClassDescriptor, T)> {
        let mut visited = HashSet::new();
        let desc = self.get(start)?;
        visited.insert(start.clone());
        if include_self {
            if let Some(found) = probe(desc) {
                return Some((desc, found));
            }
        }
        for parent in self.supertypes(desc) {
            if let Some(hit) = self.search_from(parent, &probe, &mut visited) {
                return Some(hit);
            }
        }
        None
    }

    fn search_from<'a, T>(
        &'a self,
        id: &TypeId,
        probe: &impl Fn(&ClassDescriptor) -> Option<T>,
        visited: &mut HashSet<TypeId>,
    ) -> Option<(&'a ClassDescriptor, T)> {
        if !visited.insert(id.clone()) {
            return None;
        }
        let desc = self.get(id)?;
        if let Some(found) = probe(desc) {
            return Some((desc, found));
        }
        for parent in self.supertypes(desc) {
            if let Some(hit) = self.search_from(parent, probe, visited) {
                return Some(hit);
            }
        }
        None
    }

    /// Whether `sub` is `sup` or transitively extends/implements it.
    pub fn is_subtype_of(&self, sub: &TypeId, sup: &TypeId) -> bool {
        sub == sup
            || self
                .search_hierarchy(sub, false, |d| (&d.id == sup).then_some(()))
                .is_some()
    }
}
