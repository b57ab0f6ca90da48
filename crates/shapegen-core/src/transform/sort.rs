use super::{ModelTransformer, TransformError};
use crate::model::Model;
use crate::naming::SymbolTable;

/// Orders declarations by assigned output name, falling back to type identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortDeclarations;

impl ModelTransformer for SortDeclarations {
    fn name(&self) -> &str {
        "sort-declarations"
    }

    fn transform(&self, symbols: &SymbolTable, mut model: Model) -> Result<Model, TransformError> {
        model.declarations.sort_by(|a, b| {
            symbols
                .display_name(a.symbol())
                .cmp(&symbols.display_name(b.symbol()))
                .then_with(|| a.origin().cmp(b.origin()))
        });
        Ok(model)
    }
}
