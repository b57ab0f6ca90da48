//! Raw type references as they appear in the origin type system.
//!
//! A `RawType` is what a host reflection layer reports for a property type,
//! a superclass or an interface before any resolution happens. It is only ever
//! used as a lookup key and as input to the resolver chain; it is never
//! mutated after construction.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical identity of a declared type (its fully qualified name).
///
/// Nested types use `$` as separator, e.g. `com.acme.Outer$Inner`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TypeId(pub String);

impl TypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The unqualified name: `com.acme.Outer$Inner` -> `Inner`.
    pub fn simple_name(&self) -> &str {
        self.0.rsplit(['.', '$']).next().unwrap_or(&self.0)
    }

    /// Qualifying segments without the simple name:
    /// `com.acme.Outer$Inner` -> `["com", "acme", "Outer"]`.
    pub fn namespace(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.0.split(['.', '$']).collect();
        segments.pop();
        segments
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A raw, unresolved type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawType {
    /// A named class, interface or enum, possibly parameterized.
    ///
    /// Example: `Map<String, List<Item>>`
    Class {
        name: TypeId,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<RawType>,
    },

    /// A type variable of the enclosing generic declaration.
    Variable { name: String },

    /// A native array.
    Array { element: Box<RawType> },

    /// A union produced by the host layer (rare, but some runtimes report them).
    Union { members: Vec<RawType> },

    /// An unbounded wildcard (`?`).
    Wildcard,

    /// A shape the host layer could not categorize (function types, intersection
    /// bounds, ...). Nothing in the standard chain resolves it.
    Opaque { description: String },
}

impl RawType {
    /// A non-generic class reference.
    pub fn class(name: impl Into<TypeId>) -> Self {
        RawType::Class {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A parameterized class reference.
    pub fn generic(name: impl Into<TypeId>, args: Vec<RawType>) -> Self {
        RawType::Class {
            name: name.into(),
            args,
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        RawType::Variable { name: name.into() }
    }

    pub fn array(element: RawType) -> Self {
        RawType::Array {
            element: Box::new(element),
        }
    }

    pub fn opaque(description: impl Into<String>) -> Self {
        RawType::Opaque {
            description: description.into(),
        }
    }

    /// The class identity, if this is a class reference.
    pub fn class_id(&self) -> Option<&TypeId> {
        match self {
            RawType::Class { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Generic arguments of a class reference (empty otherwise).
    pub fn args(&self) -> &[RawType] {
        match self {
            RawType::Class { args, .. } => args,
            _ => &[],
        }
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawType::Class { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            RawType::Variable { name } => f.write_str(name),
            RawType::Array { element } => write!(f, "{element}[]"),
            RawType::Union { members } => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            RawType::Wildcard => f.write_str("?"),
            RawType::Opaque { description } => write!(f, "<opaque: {description}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name_and_namespace() {
        let id = TypeId::new("com.acme.Outer$Inner");
        assert_eq!(id.simple_name(), "Inner");
        assert_eq!(id.namespace(), vec!["com", "acme", "Outer"]);

        let bare = TypeId::new("Shape");
        assert_eq!(bare.simple_name(), "Shape");
        assert!(bare.namespace().is_empty());
    }

    #[test]
    fn test_display_nested_generic() {
        let raw = RawType::generic(
            "Map",
            vec![
                RawType::class("String"),
                RawType::generic("List", vec![RawType::variable("T")]),
            ],
        );
        assert_eq!(raw.to_string(), "Map<String, List<T>>");
    }

    #[test]
    fn test_json_shape() {
        let raw: RawType =
            serde_json::from_str(r#"{"kind":"class","name":"List","args":[{"kind":"wildcard"}]}"#)
                .unwrap();
        assert_eq!(raw, RawType::generic("List", vec![RawType::Wildcard]));
    }
}
