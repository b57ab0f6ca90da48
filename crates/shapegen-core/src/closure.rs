//! Type graph closure.
//!
//! Starting from the root references, repeatedly parse the next unvisited
//! declaration and enqueue everything it references, until the queue drains.
//! Processing is FIFO and the visited set is keyed by type identity, so the
//! result depends only on the roots, the universe and the settings.

use crate::diagnostics::{Category, Diagnostic, Diagnostics};
use crate::model::{DeclarationModel, Model};
use crate::naming::SymbolTable;
use crate::ordering::sort_properties;
use crate::parser::{ModelParser, ParsedDeclaration};
use crate::resolve::{ExclusionFilter, ResolveContext, ResolverChain};
use crate::settings::Settings;
use crate::tagged_union::TaggedUnionResolver;
use crate::universe::{Role, SourceTypeRef, TypeId, TypeUniverse};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

pub struct TypeGraphClosure<'a> {
    universe: &'a TypeUniverse,
    settings: &'a Settings,
    chain: &'a ResolverChain,
    parser: &'a dyn ModelParser,
    exclusion: &'a ExclusionFilter,
    queue: VecDeque<SourceTypeRef>,
    visited: HashSet<TypeId>,
}

impl<'a> TypeGraphClosure<'a> {
    pub fn new(
        universe: &'a TypeUniverse,
        settings: &'a Settings,
        chain: &'a ResolverChain,
        parser: &'a dyn ModelParser,
        exclusion: &'a ExclusionFilter,
    ) -> Self {
        Self {
            universe,
            settings,
            chain,
            parser,
            exclusion,
            queue: VecDeque::new(),
            visited: HashSet::new(),
        }
    }

    pub fn enqueue(&mut self, source: SourceTypeRef) {
        self.queue.push_back(source);
    }

    /// Drain the queue into a model. Declarations that fail to parse become
    /// external symbols with a diagnostic; the rest of the graph is unaffected.
    pub fn run(mut self, symbols: &mut SymbolTable, diagnostics: &mut Diagnostics) -> Model {
        let unions = TaggedUnionResolver::new(self.universe, self.settings);
        let mut model = Model::new();

        while let Some(source) = self.queue.pop_front() {
            let Some(id) = source.identity().cloned() else {
                continue;
            };
            let is_root = source.role == Role::Root;
            if !self.visited.insert(id.clone()) {
                let symbol = symbols.symbol_for(&id);
                if is_root && model.contains(symbol) {
                    // a root already pulled in by an earlier root
                    push_root(&mut model, symbol);
                }
                continue;
            }
            if self.exclusion.is_excluded(&id) {
                let symbol = symbols.symbol_for(&id);
                symbols.mark_external(symbol);
                debug!(type_id = %id, "excluded");
                continue;
            }

            debug!(type_id = %id, role = %source.role, queued = self.queue.len(), "parsing declaration");
            let parsed = {
                let mut ctx = ResolveContext::new(self.chain, self.universe, self.settings, symbols);
                ctx.set_role(source.role.clone());
                self.parser.parse_declaration(&source, &mut ctx, diagnostics)
            };

            match parsed {
                Ok(ParsedDeclaration {
                    mut declaration,
                    discovered,
                }) => {
                    let variants = self.complete(&mut declaration, symbols, diagnostics, &unions);
                    if is_root {
                        push_root(&mut model, declaration.symbol());
                    }
                    model.push(declaration);
                    for reference in discovered.into_iter().chain(variants) {
                        self.enqueue(reference);
                    }
                }
                Err(err) => {
                    let symbol = symbols.symbol_for(&id);
                    symbols.mark_external(symbol);
                    diagnostics.push(
                        Diagnostic::error(Category::ParseFailure, err.to_string())
                            .with_type(id)
                            .with_origin(source.origin.clone())
                            .with_role(source.role.clone()),
                    );
                }
            }
        }
        model
    }

    /// Tagged-union annotation and member ordering.
    fn complete(
        &self,
        declaration: &mut DeclarationModel,
        symbols: &mut SymbolTable,
        diagnostics: &mut Diagnostics,
        unions: &TaggedUnionResolver<'_>,
    ) -> Vec<SourceTypeRef> {
        let mut variants = Vec::new();
        if let DeclarationModel::Bean(bean) = declaration {
            if let Some(desc) = self.universe.get(&bean.origin) {
                variants = unions.apply(bean, desc, symbols, diagnostics);
            }
        }
        sort_properties(declaration.properties_mut(), self.settings.ordering);
        variants
    }
}

fn push_root(model: &mut Model, symbol: crate::naming::Symbol) {
    if !model.roots.contains(&symbol) {
        model.roots.push(symbol);
    }
}
