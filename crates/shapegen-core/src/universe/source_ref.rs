use super::raw_type::{RawType, TypeId};
use serde::Serialize;
use std::fmt;

/// Why a type was pulled into the closure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "role", content = "name", rename_all = "snake_case")]
pub enum Role {
    Root,
    Superclass,
    Interface,
    Subclass,
    Property(String),
    TypeArgument,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Root => f.write_str("<root>"),
            Role::Superclass => f.write_str("<superclass>"),
            Role::Interface => f.write_str("<interface>"),
            Role::Subclass => f.write_str("<subclass>"),
            Role::Property(name) => write!(f, "property `{name}`"),
            Role::TypeArgument => f.write_str("<type argument>"),
        }
    }
}

/// A reference to a type in the origin system, plus where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceTypeRef {
    pub raw: RawType,
    /// The declaration whose parsing discovered this reference.
    pub origin: Option<TypeId>,
    pub role: Role,
}

impl SourceTypeRef {
    pub fn new(raw: RawType, origin: Option<TypeId>, role: Role) -> Self {
        Self { raw, origin, role }
    }

    pub fn root(id: impl Into<TypeId>) -> Self {
        Self::new(RawType::class(id), None, Role::Root)
    }

    /// The declaration this reference points at, if it is a class reference.
    pub fn identity(&self) -> Option<&TypeId> {
        self.raw.class_id()
    }
}

impl fmt::Display for SourceTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.raw, self.role)?;
        if let Some(origin) = &self.origin {
            write!(f, " from `{origin}`")?;
        }
        Ok(())
    }
}
