use super::property::PropertyModel;
use super::target_type::{Literal, TargetType};
use crate::naming::Symbol;
use crate::universe::TypeId;
use serde::Serialize;

/// A structured object declaration (class or interface in the origin system).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeanModel {
    pub symbol: Symbol,
    pub origin: TypeId,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<TargetType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TargetType>,
    /// Variants when this declaration anchors a tagged union.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Symbol>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminant_property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminant_literal: Option<String>,
    /// The discriminant is written by the serializer, not declared by the type.
    pub synthetic_discriminant: bool,
    pub is_abstract: bool,
    pub properties: Vec<PropertyModel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl BeanModel {
    pub fn new(symbol: Symbol, origin: TypeId) -> Self {
        Self {
            symbol,
            origin,
            type_params: Vec::new(),
            parent: None,
            interfaces: Vec::new(),
            variants: None,
            discriminant_property: None,
            discriminant_literal: None,
            synthetic_discriminant: false,
            is_abstract: false,
            properties: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyModel> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn is_tagged_union(&self) -> bool {
        self.variants.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumKind {
    StringBased,
    NumberBased,
    /// Serialized as an object; carries properties like a bean.
    Object,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumMemberModel {
    pub name: String,
    pub value: Literal,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumModel {
    pub symbol: Symbol,
    pub origin: TypeId,
    pub kind: EnumKind,
    pub members: Vec<EnumMemberModel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyModel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "declaration", rename_all = "snake_case")]
pub enum DeclarationModel {
    Bean(BeanModel),
    Enum(EnumModel),
}

impl DeclarationModel {
    pub fn symbol(&self) -> Symbol {
        match self {
            DeclarationModel::Bean(b) => b.symbol,
            DeclarationModel::Enum(e) => e.symbol,
        }
    }

    pub fn origin(&self) -> &TypeId {
        match self {
            DeclarationModel::Bean(b) => &b.origin,
            DeclarationModel::Enum(e) => &e.origin,
        }
    }

    pub fn properties(&self) -> &[PropertyModel] {
        match self {
            DeclarationModel::Bean(b) => &b.properties,
            DeclarationModel::Enum(e) => &e.properties,
        }
    }

    pub fn properties_mut(&mut self) -> &mut Vec<PropertyModel> {
        match self {
            DeclarationModel::Bean(b) => &mut b.properties,
            DeclarationModel::Enum(e) => &mut e.properties,
        }
    }

    pub fn as_bean(&self) -> Option<&BeanModel> {
        match self {
            DeclarationModel::Bean(b) => Some(b),
            DeclarationModel::Enum(_) => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumModel> {
        match self {
            DeclarationModel::Enum(e) => Some(e),
            DeclarationModel::Bean(_) => None,
        }
    }

    /// Every symbol this declaration points at: property types, parent,
    /// interfaces and union variants. Own symbol excluded.
    pub fn referenced_symbols(&self) -> Vec<Symbol> {
        let mut out = Vec::new();
        if let DeclarationModel::Bean(bean) = self {
            if let Some(parent) = &bean.parent {
                parent.collect_symbols(&mut out);
            }
            for interface in &bean.interfaces {
                interface.collect_symbols(&mut out);
            }
            for variant in bean.variants.iter().flatten() {
                if !out.contains(variant) {
                    out.push(*variant);
                }
            }
        }
        for property in self.properties() {
            property.ty.collect_symbols(&mut out);
        }
        let own = self.symbol();
        out.retain(|s| *s != own);
        out
    }
}
