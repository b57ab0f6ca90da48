//! The compiler entry point.

use crate::closure::TypeGraphClosure;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::CompileError;
use crate::model::{DeclarationModel, Model};
use crate::naming::{SymbolInfo, SymbolTable};
use crate::parser::{ModelParser, UniverseParser};
use crate::resolve::{ChainPosition, ExclusionFilter, Resolver, ResolverChain};
use crate::settings::Settings;
use crate::transform::{ModelTransformer, TransformerPipeline};
use crate::universe::{SourceTypeRef, TypeId, TypeUniverse};
use serde::Serialize;
use tracing::info;

/// Compiles root types of a [`TypeUniverse`] into a [`Model`].
///
/// A compiler is configured once and may run any number of compilations; each
/// compilation starts from a fresh symbol table and visited set.
pub struct Compiler {
    settings: Settings,
    parser: Box<dyn ModelParser>,
    resolvers: Vec<(ChainPosition, Resolver)>,
    transformers: TransformerPipeline,
}

impl Compiler {
    /// Validates the settings up front; malformed mappings or exclusion
    /// patterns fail here rather than mid-compilation.
    pub fn new(settings: Settings) -> Result<Self, CompileError> {
        settings.validate()?;
        Ok(Self {
            settings,
            parser: Box::new(UniverseParser),
            resolvers: Vec::new(),
            transformers: TransformerPipeline::new(),
        })
    }

    pub fn with_parser(mut self, parser: impl ModelParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn with_resolver(mut self, position: ChainPosition, resolver: Resolver) -> Self {
        self.resolvers.push((position, resolver));
        self
    }

    /// Register a transformer to run after the configured built-ins.
    pub fn with_transformer(mut self, transformer: impl ModelTransformer + 'static) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[tracing::instrument(skip_all, fields(roots = roots.len(), universe = universe.len()))]
    pub fn compile(&self, universe: &TypeUniverse, roots: &[TypeId]) -> Result<CompileOutput, CompileError> {
        let chain = ResolverChain::standard(&self.settings, &self.resolvers)?;
        let exclusion = ExclusionFilter::from_settings(&self.settings)?;
        let mut symbols = SymbolTable::new();
        let mut diagnostics = Diagnostics::new();

        let mut closure = TypeGraphClosure::new(
            universe,
            &self.settings,
            &chain,
            self.parser.as_ref(),
            &exclusion,
        );
        for root in roots {
            closure.enqueue(SourceTypeRef::root(root.clone()));
        }
        let model = closure.run(&mut symbols, &mut diagnostics);
        model.verify(&symbols)?;

        // Transformers see provisional names; collisions are judged on the
        // declarations that survive them.
        symbols.retain(&model.live_symbols());
        symbols.assign_provisional_names(&self.settings.naming);

        let builtins = TransformerPipeline::from_builtins(&self.settings.transformers);
        let model = builtins.run(&symbols, model)?;
        let model = self.transformers.run(&symbols, model)?;
        model.verify(&symbols)?;

        symbols.retain(&model.live_symbols());
        symbols.assign_names(&self.settings.naming)?;

        info!(
            declarations = model.len(),
            symbols = symbols.len(),
            diagnostics = diagnostics.len(),
            "compilation finished"
        );
        Ok(CompileOutput {
            model,
            symbols,
            diagnostics: diagnostics.into_vec(),
        })
    }
}

#[derive(Debug)]
pub struct CompileOutput {
    pub model: Model,
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    /// Look up a declaration by its assigned output name.
    pub fn declaration(&self, name: &str) -> Option<&DeclarationModel> {
        self.model
            .declarations
            .iter()
            .find(|d| self.symbols.name_of(d.symbol()) == Some(name))
    }

    /// Assigned output names in model order.
    pub fn declaration_names(&self) -> Vec<&str> {
        self.model
            .declarations
            .iter()
            .filter_map(|d| self.symbols.name_of(d.symbol()))
            .collect()
    }

    /// Serializable view for hand-off to emitters.
    pub fn document(&self) -> CompiledDocument<'_> {
        CompiledDocument {
            symbols: self.symbols.describe(),
            model: &self.model,
            diagnostics: &self.diagnostics,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompiledDocument<'a> {
    pub symbols: Vec<SymbolInfo>,
    pub model: &'a Model,
    pub diagnostics: &'a [Diagnostic],
}
