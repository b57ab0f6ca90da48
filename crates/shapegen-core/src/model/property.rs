use super::target_type::TargetType;
use crate::universe::PropertyAccess;
use serde::Serialize;

/// Pull the members of the property's type into the owning declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PullProperties {
    pub prefix: String,
    pub suffix: String,
}

/// Ordering metadata carried through from the source property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OrderingHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serialization_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyModel {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TargetType,
    pub optional: bool,
    pub access: PropertyAccess,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull: Option<PullProperties>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(skip)]
    pub ordering: OrderingHints,
}

impl PropertyModel {
    pub fn new(name: impl Into<String>, ty: TargetType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            access: PropertyAccess::ReadWrite,
            pull: None,
            comments: Vec::new(),
            ordering: OrderingHints::default(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_ordering(mut self, ordering: OrderingHints) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_pull(mut self, pull: PullProperties) -> Self {
        self.pull = Some(pull);
        self
    }
}
