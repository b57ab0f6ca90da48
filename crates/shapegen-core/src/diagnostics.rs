//! Non-fatal findings collected during a compilation.

use crate::universe::{Role, TypeId};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// No resolver produced a type for a property or supertype.
    UnsupportedType,
    /// More than one property carries the discriminant name.
    AmbiguousDiscriminant,
    /// A declared property duplicated the synthetic discriminant and was dropped.
    DuplicateDiscriminant,
    /// The declaration could not be parsed; its symbol became external.
    ParseFailure,
    /// An enum constant value was neither a string nor a number.
    IgnoredEnumValue,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::UnsupportedType => "unsupported_type",
            Category::AmbiguousDiscriminant => "ambiguous_discriminant",
            Category::DuplicateDiscriminant => "duplicate_discriminant",
            Category::ParseFailure => "parse_failure",
            Category::IgnoredEnumValue => "ignored_enum_value",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: Category,
    /// The type the finding is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<TypeId>,
    /// The declaration that referenced it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<TypeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, category: Category, message: impl Into<String>) -> Self {
        Self {
            severity,
            category,
            type_id: None,
            origin: None,
            role: None,
            message: message.into(),
        }
    }

    pub fn error(category: Category, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, category, message)
    }

    pub fn warning(category: Category, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, message)
    }

    pub fn info(category: Category, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, category, message)
    }

    pub fn with_type(mut self, type_id: TypeId) -> Self {
        self.type_id = Some(type_id);
        self
    }

    pub fn with_origin(mut self, origin: Option<TypeId>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.severity, self.category.as_str())?;
        if let Some(type_id) = &self.type_id {
            write!(f, " {type_id}")?;
        }
        write!(f, ": {}", self.message)?;
        match (&self.role, &self.origin) {
            (Some(role), Some(origin)) => write!(f, " ({role} of `{origin}`)"),
            (Some(role), None) => write!(f, " ({role})"),
            (None, Some(origin)) => write!(f, " (from `{origin}`)"),
            (None, None) => Ok(()),
        }
    }
}

/// Ordered collection of diagnostics for one compilation.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => tracing::error!(category = diagnostic.category.as_str(), "{diagnostic}"),
            Severity::Warning => tracing::warn!(category = diagnostic.category.as_str(), "{diagnostic}"),
            Severity::Info => tracing::info!(category = diagnostic.category.as_str(), "{diagnostic}"),
        }
        self.items.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_context() {
        let diagnostic = Diagnostic::error(Category::ParseFailure, "type `x.Gone` is missing")
            .with_type(TypeId::new("x.Gone"))
            .with_origin(Some(TypeId::new("x.Order")))
            .with_role(Role::Property("gone".into()));
        assert_eq!(
            diagnostic.to_string(),
            "error[parse_failure] x.Gone: type `x.Gone` is missing (property `gone` of `x.Order`)"
        );
    }

    #[test]
    fn test_collects_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::info(Category::DuplicateDiscriminant, "first"));
        diagnostics.push(Diagnostic::warning(Category::UnsupportedType, "second"));
        assert!(!diagnostics.has_errors());
        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
