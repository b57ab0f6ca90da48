//! Target type expressions.
//!
//! A `TargetType` is the structural type a property (or parent reference)
//! resolves to. Named types are referenced by [`Symbol`], never by name, so the
//! expression stays valid until names are assigned.

use crate::naming::{Symbol, SymbolTable};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Any,
    Unknown,
    String,
    Number,
    Boolean,
    BigInt,
    Null,
    Undefined,
    Void,
}

impl Primitive {
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::Any => "any",
            Primitive::Unknown => "unknown",
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::BigInt => "bigint",
            Primitive::Null => "null",
            Primitive::Undefined => "undefined",
            Primitive::Void => "void",
        }
    }

    /// Parse a target-language primitive keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "any" => Primitive::Any,
            "unknown" => Primitive::Unknown,
            "string" => Primitive::String,
            "number" => Primitive::Number,
            "boolean" => Primitive::Boolean,
            "bigint" => Primitive::BigInt,
            "null" => Primitive::Null,
            "undefined" => Primitive::Undefined,
            "void" => Primitive::Void,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Number(serde_json::Number),
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Literal::String(value.into())
    }

    fn render(&self) -> String {
        match self {
            Literal::String(s) => format!("{s:?}"),
            Literal::Number(n) => n.to_string(),
        }
    }
}

/// A member of an anonymous object type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectMember {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TargetType,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetType {
    Primitive { primitive: Primitive },

    /// A named declaration, possibly with type arguments.
    ///
    /// Example: `Page<Item>`
    Reference { symbol: Symbol, args: Vec<TargetType> },

    /// A type parameter of the enclosing declaration.
    Variable { name: String },

    Array { element: Box<TargetType> },

    Union { members: Vec<TargetType> },

    /// An anonymous object type.
    Object { members: Vec<ObjectMember> },

    Literal { value: Literal },

    /// Target text emitted as-is (serializer mappings, user resolvers).
    Verbatim { text: String },

    /// A dictionary: `{ [key: K]: V }`.
    IndexSignature {
        key: Box<TargetType>,
        value: Box<TargetType>,
    },
}

impl TargetType {
    pub fn primitive(primitive: Primitive) -> Self {
        TargetType::Primitive { primitive }
    }

    pub fn any() -> Self {
        Self::primitive(Primitive::Any)
    }

    pub fn unknown() -> Self {
        Self::primitive(Primitive::Unknown)
    }

    pub fn string() -> Self {
        Self::primitive(Primitive::String)
    }

    pub fn number() -> Self {
        Self::primitive(Primitive::Number)
    }

    pub fn boolean() -> Self {
        Self::primitive(Primitive::Boolean)
    }

    pub fn undefined() -> Self {
        Self::primitive(Primitive::Undefined)
    }

    pub fn reference(symbol: Symbol, args: Vec<TargetType>) -> Self {
        TargetType::Reference { symbol, args }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        TargetType::Variable { name: name.into() }
    }

    pub fn array(element: TargetType) -> Self {
        TargetType::Array {
            element: Box::new(element),
        }
    }

    pub fn union(members: Vec<TargetType>) -> Self {
        TargetType::Union { members }
    }

    pub fn literal(value: Literal) -> Self {
        TargetType::Literal { value }
    }

    pub fn verbatim(text: impl Into<String>) -> Self {
        TargetType::Verbatim { text: text.into() }
    }

    pub fn index_signature(key: TargetType, value: TargetType) -> Self {
        TargetType::IndexSignature {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn is_primitive(&self, primitive: Primitive) -> bool {
        matches!(self, TargetType::Primitive { primitive: p } if *p == primitive)
    }

    /// The referenced symbol when this is a plain reference.
    pub fn as_reference(&self) -> Option<Symbol> {
        match self {
            TargetType::Reference { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }

    /// All symbols referenced anywhere in this expression, in first-seen order.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    pub fn collect_symbols(&self, out: &mut Vec<Symbol>) {
        match self {
            TargetType::Reference { symbol, args } => {
                if !out.contains(symbol) {
                    out.push(*symbol);
                }
                for arg in args {
                    arg.collect_symbols(out);
                }
            }
            TargetType::Array { element } => element.collect_symbols(out),
            TargetType::Union { members } => {
                for m in members {
                    m.collect_symbols(out);
                }
            }
            TargetType::Object { members } => {
                for m in members {
                    m.ty.collect_symbols(out);
                }
            }
            TargetType::IndexSignature { key, value } => {
                key.collect_symbols(out);
                value.collect_symbols(out);
            }
            TargetType::Primitive { .. }
            | TargetType::Variable { .. }
            | TargetType::Literal { .. }
            | TargetType::Verbatim { .. } => {}
        }
    }

    /// Render in TypeScript-like notation. Used for messages and tests; emitters
    /// own real formatting.
    pub fn describe(&self, symbols: &SymbolTable) -> String {
        let mut out = String::new();
        self.describe_into(symbols, &mut out);
        out
    }

    fn describe_into(&self, symbols: &SymbolTable, out: &mut String) {
        match self {
            TargetType::Primitive { primitive } => out.push_str(primitive.as_str()),
            TargetType::Reference { symbol, args } => {
                out.push_str(&symbols.display_name(*symbol));
                if !args.is_empty() {
                    out.push('<');
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        arg.describe_into(symbols, out);
                    }
                    out.push('>');
                }
            }
            TargetType::Variable { name } => out.push_str(name),
            TargetType::Array { element } => {
                let wrap = matches!(**element, TargetType::Union { .. });
                if wrap {
                    out.push('(');
                }
                element.describe_into(symbols, out);
                if wrap {
                    out.push(')');
                }
                out.push_str("[]");
            }
            TargetType::Union { members } => {
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    m.describe_into(symbols, out);
                }
            }
            TargetType::Object { members } => {
                out.push_str("{ ");
                for m in members {
                    let _ = write!(out, "{}{}: ", m.name, if m.optional { "?" } else { "" });
                    m.ty.describe_into(symbols, out);
                    out.push_str("; ");
                }
                out.push('}');
            }
            TargetType::Literal { value } => out.push_str(&value.render()),
            TargetType::Verbatim { text } => out.push_str(text),
            TargetType::IndexSignature { key, value } => {
                out.push_str("{ [index: ");
                key.describe_into(symbols, out);
                out.push_str("]: ");
                value.describe_into(symbols, out);
                out.push_str(" }");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::TypeId;

    #[test]
    fn test_describe_nested() {
        let mut symbols = SymbolTable::new();
        let page = symbols.symbol_for(&TypeId::new("a.Page"));
        let item = symbols.symbol_for(&TypeId::new("a.Item"));
        let ty = TargetType::union(vec![
            TargetType::array(TargetType::reference(
                page,
                vec![TargetType::reference(item, vec![])],
            )),
            TargetType::index_signature(TargetType::string(), TargetType::number()),
            TargetType::undefined(),
        ]);
        assert_eq!(
            ty.describe(&symbols),
            "a.Page<a.Item>[] | { [index: string]: number } | undefined"
        );
    }

    #[test]
    fn test_collect_symbols_dedupes() {
        let mut symbols = SymbolTable::new();
        let item = symbols.symbol_for(&TypeId::new("Item"));
        let ty = TargetType::union(vec![
            TargetType::reference(item, vec![]),
            TargetType::array(TargetType::reference(item, vec![])),
        ]);
        assert_eq!(ty.symbols(), vec![item]);
    }

    #[test]
    fn test_primitive_keywords() {
        assert_eq!(Primitive::from_keyword("bigint"), Some(Primitive::BigInt));
        assert_eq!(Primitive::from_keyword("Date"), None);
    }
}
