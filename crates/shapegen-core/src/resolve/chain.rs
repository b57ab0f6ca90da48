use super::custom::{self, CustomMappings};
use super::exclusion::{self, ExclusionFilter};
use super::{identity, semantic, structural};
use crate::error::{ConfigError, ResolveError};
use crate::model::TargetType;
use crate::naming::{Symbol, SymbolTable};
use crate::settings::Settings;
use crate::universe::{PropertyDescriptor, RawType, Role, SourceTypeRef, TypeId, TypeUniverse};
use std::fmt;
use std::sync::Arc;

/// A resolved type plus the declarations it pulled into the closure.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub ty: TargetType,
    pub discovered: Vec<SourceTypeRef>,
}

impl Resolution {
    pub fn new(ty: TargetType) -> Self {
        Self {
            ty,
            discovered: Vec::new(),
        }
    }

    pub fn with_discovered(ty: TargetType, discovered: Vec<SourceTypeRef>) -> Self {
        Self { ty, discovered }
    }
}

/// Outcome of one resolver stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Type(Resolution),
    /// Not handled here; try the next stage.
    Pass,
}

pub type ResolveFn =
    dyn Fn(&RawType, &mut ResolveContext<'_>) -> Result<Resolved, ResolveError> + Send + Sync;

/// A named resolver stage.
#[derive(Clone)]
pub struct Resolver {
    name: String,
    func: Arc<ResolveFn>,
}

impl Resolver {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&RawType, &mut ResolveContext<'_>) -> Result<Resolved, ResolveError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, raw: &RawType, ctx: &mut ResolveContext<'_>) -> Result<Resolved, ResolveError> {
        (self.func)(raw, ctx)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Resolver").field(&self.name).finish()
    }
}

/// Where a user-supplied resolver is spliced into the standard chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPosition {
    /// After exclusion, before custom mappings and every built-in stage.
    BeforeBuiltins,
    /// After the structural default; sees only what nothing else handled.
    AfterBuiltins,
}

/// Ordered resolver stages. The first stage that does not pass wins.
#[derive(Debug, Clone)]
pub struct ResolverChain {
    stages: Vec<Resolver>,
}

impl ResolverChain {
    /// The standard chain:
    /// exclusion, user (before), custom mapping, serializer mapping, identity,
    /// pair-like, optional-like, object enum, structural, user (after).
    pub fn standard(
        settings: &Settings,
        extra: &[(ChainPosition, Resolver)],
    ) -> Result<Self, ConfigError> {
        let exclusion = ExclusionFilter::from_settings(settings)?;
        let mappings = CustomMappings::from_settings(settings)?;

        let mut stages = vec![exclusion::resolver(exclusion)];
        stages.extend(
            extra
                .iter()
                .filter(|(pos, _)| *pos == ChainPosition::BeforeBuiltins)
                .map(|(_, r)| r.clone()),
        );
        stages.push(custom::resolver(mappings));
        stages.push(semantic::serializer_mapping());
        stages.push(identity::resolver());
        stages.push(semantic::pair_like());
        stages.push(semantic::optional_like());
        stages.push(semantic::object_enum());
        stages.push(structural::resolver());
        stages.extend(
            extra
                .iter()
                .filter(|(pos, _)| *pos == ChainPosition::AfterBuiltins)
                .map(|(_, r)| r.clone()),
        );
        Ok(Self { stages })
    }

    pub fn from_stages(stages: Vec<Resolver>) -> Self {
        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(Resolver::name).collect()
    }

    pub fn resolve(&self, raw: &RawType, ctx: &mut ResolveContext<'_>) -> Result<Resolution, ResolveError> {
        for stage in &self.stages {
            if let Resolved::Type(resolution) = stage.apply(raw, ctx)? {
                tracing::trace!(stage = stage.name(), raw = %raw, "resolved");
                return Ok(resolution);
            }
        }
        Err(ResolveError::Unsupported {
            raw: raw.to_string(),
        })
    }
}

/// Mutable state threaded through one resolution.
///
/// Carries the property being resolved (if any), whether the current type sits
/// inside a container, and the declaration being parsed. Stages recurse via
/// [`ResolveContext::resolve`] and friends.
pub struct ResolveContext<'a> {
    pub universe: &'a TypeUniverse,
    pub settings: &'a Settings,
    pub symbols: &'a mut SymbolTable,
    chain: &'a ResolverChain,
    origin: Option<TypeId>,
    role: Role,
    property: Option<&'a PropertyDescriptor>,
    inside_collection: bool,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        chain: &'a ResolverChain,
        universe: &'a TypeUniverse,
        settings: &'a Settings,
        symbols: &'a mut SymbolTable,
    ) -> Self {
        Self {
            universe,
            settings,
            symbols,
            chain,
            origin: None,
            role: Role::Root,
            property: None,
            inside_collection: false,
        }
    }

    pub fn resolve(&mut self, raw: &RawType) -> Result<Resolution, ResolveError> {
        let chain = self.chain;
        chain.resolve(raw, self)
    }

    /// Resolve a container element or type argument.
    pub fn resolve_element(&mut self, raw: &RawType) -> Result<Resolution, ResolveError> {
        let saved = std::mem::replace(&mut self.inside_collection, true);
        let result = self.resolve(raw);
        self.inside_collection = saved;
        result
    }

    /// Resolve without the current property context. Property-scoped stages
    /// (identity, serializer mappings) pass on the nested call.
    pub fn resolve_detached(&mut self, raw: &RawType) -> Result<Resolution, ResolveError> {
        let saved = self.property.take();
        let result = self.resolve(raw);
        self.property = saved;
        result
    }

    pub fn origin(&self) -> Option<&TypeId> {
        self.origin.as_ref()
    }

    pub fn set_origin(&mut self, origin: Option<TypeId>) {
        self.origin = origin;
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn property(&self) -> Option<&'a PropertyDescriptor> {
        self.property
    }

    pub fn set_property(&mut self, property: Option<&'a PropertyDescriptor>) {
        self.property = property;
    }

    pub fn inside_collection(&self) -> bool {
        self.inside_collection
    }

    pub fn symbol_for(&mut self, id: &TypeId) -> Symbol {
        self.symbols.symbol_for(id)
    }

    /// A discovered reference attributed to the current origin and role.
    pub fn discovered(&self, id: &TypeId) -> SourceTypeRef {
        SourceTypeRef::new(RawType::class(id.clone()), self.origin.clone(), self.role.clone())
    }
}
