use super::{ModelTransformer, TransformError};
use crate::model::Model;
use crate::naming::{Symbol, SymbolTable};
use std::collections::{HashSet, VecDeque};

/// Drops declarations not reachable from the roots. A model without roots is
/// returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PruneUnreferenced;

impl ModelTransformer for PruneUnreferenced {
    fn name(&self) -> &str {
        "prune-unreferenced"
    }

    fn transform(&self, _symbols: &SymbolTable, mut model: Model) -> Result<Model, TransformError> {
        if model.roots.is_empty() {
            return Ok(model);
        }
        let mut reachable: HashSet<Symbol> = HashSet::new();
        let mut queue: VecDeque<Symbol> = model.roots.iter().copied().collect();
        while let Some(symbol) = queue.pop_front() {
            if !reachable.insert(symbol) {
                continue;
            }
            if let Some(declaration) = model.get(symbol) {
                queue.extend(declaration.referenced_symbols());
            }
        }
        let before = model.declarations.len();
        model.declarations.retain(|d| reachable.contains(&d.symbol()));
        tracing::debug!(removed = before - model.declarations.len(), "pruned unreferenced declarations");
        Ok(model)
    }
}
