//! Declaration descriptors: what the host layer knows about one declared type.

use super::raw_type::{RawType, TypeId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    #[default]
    Class,
    AbstractClass,
    Interface,
    Enum,
}

/// Serialization shape override for a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Default,
    /// Serialized as a structured object (matters for enums and pair-likes).
    Object,
    String,
    /// Enum serialized by ordinal.
    Number,
}

/// Where a polymorphic type identifier is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TypeIdInclusion {
    /// A property added by the serializer.
    Property,
    /// A property the type already declares.
    ExistingProperty,
    WrapperObject,
    WrapperArray,
    ExternalProperty,
}

/// What a polymorphic type identifier contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TypeIdKind {
    /// A registered logical name.
    Name,
    /// The fully qualified type identity.
    Class,
    MinimalClass,
    Custom,
    None,
}

/// Polymorphic type information declared on a union anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeInfo {
    pub include: TypeIdInclusion,
    #[serde(rename = "use")]
    pub id_kind: TypeIdKind,
    /// Discriminant property name; falls back to the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl TypeInfo {
    pub fn new(include: TypeIdInclusion, id_kind: TypeIdKind) -> Self {
        Self {
            include,
            id_kind,
            property: None,
        }
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }
}

/// A subtype entry, optionally carrying its registered logical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NamedType {
    pub id: TypeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NamedType {
    pub fn new(id: impl Into<TypeId>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn named(id: impl Into<TypeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

/// How object identities are generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdGenerator {
    None,
    /// A designated property of the type holds the id.
    Property { property: String },
    IntSequence,
    Uuid,
    StringId,
    Custom,
}

/// Object identity metadata, declared on a type or a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IdentityInfo {
    pub generator: IdGenerator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_as_id: Option<bool>,
}

impl IdentityInfo {
    pub fn new(generator: IdGenerator) -> Self {
        Self {
            generator,
            always_as_id: None,
        }
    }

    pub fn always_as_id(mut self) -> Self {
        self.always_as_id = Some(true);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertyAccess {
    #[default]
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

/// Flattening directive: pull the properties of the property's type into the owner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Unwrapped {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: RawType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub access: PropertyAccess,
    /// Position in an explicit serialization order (property-order metadata).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialization_index: Option<usize>,
    /// Explicit index metadata on the property itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    /// Declaration position of the backing field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unwrapped: Option<Unwrapped>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityInfo>,
    /// Custom serializer class bound to this property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serializer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deserializer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, ty: RawType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
            access: PropertyAccess::default(),
            serialization_index: None,
            index: None,
            field_index: None,
            unwrapped: None,
            identity: None,
            serializer: None,
            deserializer: None,
            annotations: Vec::new(),
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_field_index(mut self, index: usize) -> Self {
        self.field_index = Some(index);
        self
    }

    pub fn with_index(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_serialization_index(mut self, index: usize) -> Self {
        self.serialization_index = Some(index);
        self
    }

    pub fn with_identity(mut self, identity: IdentityInfo) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_serializer(mut self, serializer: impl Into<String>) -> Self {
        self.serializer = Some(serializer.into());
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn unwrapped(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.unwrapped = Some(Unwrapped {
            prefix: prefix.into(),
            suffix: suffix.into(),
        });
        self
    }
}

/// One enum constant. A missing value means "serialized by name".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnumConstant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EnumConstant {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            description: None,
        }
    }

    pub fn valued(name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            description: None,
        }
    }
}

/// Everything the host layer reports about one declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassDescriptor {
    pub id: TypeId,
    #[serde(default)]
    pub kind: DeclarationKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<RawType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<RawType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<EnumConstant>,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_info: Option<TypeInfo>,
    /// Explicitly listed subtypes; takes precedence over the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtypes: Option<Vec<NamedType>>,
    /// Registered logical name used as the discriminant literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ClassDescriptor {
    pub fn new(id: impl Into<TypeId>, kind: DeclarationKind) -> Self {
        Self {
            id: id.into(),
            kind,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            properties: Vec::new(),
            constants: Vec::new(),
            shape: Shape::Default,
            type_info: None,
            subtypes: None,
            type_name: None,
            identity: None,
            annotations: Vec::new(),
            description: None,
        }
    }

    pub fn class(id: impl Into<TypeId>) -> Self {
        Self::new(id, DeclarationKind::Class)
    }

    pub fn interface(id: impl Into<TypeId>) -> Self {
        Self::new(id, DeclarationKind::Interface)
    }

    pub fn abstract_class(id: impl Into<TypeId>) -> Self {
        Self::new(id, DeclarationKind::AbstractClass)
    }

    pub fn enumeration(id: impl Into<TypeId>, constants: Vec<EnumConstant>) -> Self {
        let mut desc = Self::new(id, DeclarationKind::Enum);
        desc.constants = constants;
        desc
    }

    /// Abstract classes and interfaces cannot be instantiated, so they never
    /// carry a discriminant literal.
    pub fn is_abstract(&self) -> bool {
        matches!(
            self.kind,
            DeclarationKind::AbstractClass | DeclarationKind::Interface
        )
    }

    pub fn is_enum(&self) -> bool {
        self.kind == DeclarationKind::Enum
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_superclass(mut self, superclass: RawType) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn with_interface(mut self, interface: RawType) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_type_params(mut self, params: &[&str]) -> Self {
        self.type_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_type_info(mut self, info: TypeInfo) -> Self {
        self.type_info = Some(info);
        self
    }

    pub fn with_subtypes(mut self, subtypes: Vec<NamedType>) -> Self {
        self.subtypes = Some(subtypes);
        self
    }

    pub fn with_type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    pub fn with_identity(mut self, identity: IdentityInfo) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
