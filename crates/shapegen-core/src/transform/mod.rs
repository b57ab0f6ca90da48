//! Model transformers.
//!
//! A transformer maps a finished model to a new model with read access to the
//! symbol table. Transformers run in registration order, each seeing the
//! previous one's output; the compiler re-verifies the model afterwards.

pub mod fold;
pub mod inline;
pub mod prune;
pub mod sort;

pub use fold::FoldOptionalWrappers;
pub use inline::InlinePulledProperties;
pub use prune::PruneUnreferenced;
pub use sort::SortDeclarations;

use crate::error::CompileError;
use crate::model::Model;
use crate::naming::SymbolTable;
use crate::settings::BuiltinTransformer;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransformError {
    pub message: String,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait ModelTransformer {
    fn name(&self) -> &str;

    fn transform(&self, symbols: &SymbolTable, model: Model) -> Result<Model, TransformError>;
}

/// Adapter so plain closures can be registered as transformers.
pub struct FnTransformer<F> {
    name: String,
    func: F,
}

impl<F> ModelTransformer for FnTransformer<F>
where
    F: Fn(&SymbolTable, Model) -> Result<Model, TransformError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, symbols: &SymbolTable, model: Model) -> Result<Model, TransformError> {
        (self.func)(symbols, model)
    }
}

pub fn transform_fn<F>(name: impl Into<String>, func: F) -> FnTransformer<F>
where
    F: Fn(&SymbolTable, Model) -> Result<Model, TransformError>,
{
    FnTransformer {
        name: name.into(),
        func,
    }
}

/// An ordered list of transformers.
#[derive(Default)]
pub struct TransformerPipeline {
    transformers: Vec<Box<dyn ModelTransformer>>,
}

impl TransformerPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_builtins(builtins: &[BuiltinTransformer]) -> Self {
        builtins
            .iter()
            .fold(Self::new(), |pipeline, builtin| match builtin {
                BuiltinTransformer::InlinePulledProperties => pipeline.then(InlinePulledProperties),
                BuiltinTransformer::PruneUnreferenced => pipeline.then(PruneUnreferenced),
                BuiltinTransformer::FoldOptionalWrappers => pipeline.then(FoldOptionalWrappers),
                BuiltinTransformer::SortDeclarations => pipeline.then(SortDeclarations),
            })
    }

    pub fn then(mut self, transformer: impl ModelTransformer + 'static) -> Self {
        self.push(Box::new(transformer));
        self
    }

    pub fn push(&mut self, transformer: Box<dyn ModelTransformer>) {
        self.transformers.push(transformer);
    }

    pub fn names(&self) -> Vec<&str> {
        self.transformers.iter().map(|t| t.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    pub fn run(&self, symbols: &SymbolTable, model: Model) -> Result<Model, CompileError> {
        self.transformers.iter().try_fold(model, |model, transformer| {
            tracing::debug!(transformer = transformer.name(), "running transformer");
            transformer
                .transform(symbols, model)
                .map_err(|err| CompileError::Transformer {
                    name: transformer.name().to_string(),
                    message: err.message,
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BeanModel, DeclarationModel};
    use crate::universe::TypeId;

    #[test]
    fn test_runs_in_registration_order() {
        let mut symbols = SymbolTable::new();
        let a = symbols.symbol_for(&TypeId::new("A"));
        let b = symbols.symbol_for(&TypeId::new("B"));

        let pipeline = TransformerPipeline::new()
            .then(transform_fn("add-a", move |_, mut model: Model| {
                model.push(DeclarationModel::Bean(BeanModel::new(a, "A".into())));
                Ok(model)
            }))
            .then(transform_fn("add-b", move |_, mut model: Model| {
                model.push(DeclarationModel::Bean(BeanModel::new(b, "B".into())));
                Ok(model)
            }));

        assert_eq!(pipeline.names(), vec!["add-a", "add-b"]);
        let model = pipeline.run(&symbols, Model::new()).unwrap();
        let order: Vec<_> = model.symbols().collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn test_failure_names_the_transformer() {
        let symbols = SymbolTable::new();
        let pipeline = TransformerPipeline::new().then(transform_fn("broken", |_, _| {
            Err(TransformError::new("nope"))
        }));
        let err = pipeline.run(&symbols, Model::new()).unwrap_err();
        assert!(matches!(err, CompileError::Transformer { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_builtins_in_configured_order() {
        let pipeline = TransformerPipeline::from_builtins(&[
            BuiltinTransformer::SortDeclarations,
            BuiltinTransformer::PruneUnreferenced,
        ]);
        assert_eq!(pipeline.names(), vec!["sort-declarations", "prune-unreferenced"]);
    }
}
