//! The compiled model: declarations in the target structural type system.

pub mod declaration;
pub mod property;
pub mod target_type;

pub use declaration::{BeanModel, DeclarationModel, EnumKind, EnumMemberModel, EnumModel};
pub use property::{OrderingHints, PropertyModel, PullProperties};
pub use target_type::{Literal, ObjectMember, Primitive, TargetType};

use crate::error::InvariantViolation;
use crate::naming::{Symbol, SymbolTable};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Model {
    pub declarations: Vec<DeclarationModel>,
    /// Symbols of the requested root types, in request order.
    pub roots: Vec<Symbol>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, declaration: DeclarationModel) {
        self.declarations.push(declaration);
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn get(&self, symbol: Symbol) -> Option<&DeclarationModel> {
        self.declarations.iter().find(|d| d.symbol() == symbol)
    }

    pub fn get_mut(&mut self, symbol: Symbol) -> Option<&mut DeclarationModel> {
        self.declarations.iter_mut().find(|d| d.symbol() == symbol)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.get(symbol).is_some()
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.declarations.iter().map(DeclarationModel::symbol)
    }

    /// Declared symbols plus every symbol they reference.
    pub fn live_symbols(&self) -> HashSet<Symbol> {
        let mut live: HashSet<Symbol> = self.symbols().collect();
        for declaration in &self.declarations {
            live.extend(declaration.referenced_symbols());
        }
        live
    }

    /// Check the structural invariants of a finished model: each symbol is
    /// declared once, and every referenced symbol is either declared here or
    /// external in `symbols`.
    pub fn verify(&self, symbols: &SymbolTable) -> Result<(), InvariantViolation> {
        let mut counts: IndexMap<Symbol, usize> = IndexMap::new();
        for declaration in &self.declarations {
            *counts.entry(declaration.symbol()).or_default() += 1;
        }
        if let Some((symbol, count)) = counts.iter().find(|(_, c)| **c > 1) {
            return Err(InvariantViolation::DuplicateSymbol {
                name: symbols.display_name(*symbol),
                count: *count,
            });
        }

        for declaration in &self.declarations {
            for target in declaration.referenced_symbols() {
                if !counts.contains_key(&target) && !symbols.is_external(target) {
                    return Err(InvariantViolation::DanglingReference {
                        owner: symbols.display_name(declaration.symbol()),
                        target: symbols.display_name(target),
                    });
                }
            }
        }
        Ok(())
    }
}
