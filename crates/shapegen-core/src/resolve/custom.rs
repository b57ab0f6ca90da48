//! User-declared type mappings: `"com.acme.Money" = "Decimal"`,
//! `"com.acme.Page<T>" = "Paged<T>"`.
//!
//! Targets are external: they become verbatim-named symbols and are never
//! parsed. Source parameters are bound positionally and substituted into the
//! target's arguments.

use super::chain::{Resolution, Resolved, Resolver};
use crate::error::ConfigError;
use crate::model::{Primitive, TargetType};
use crate::naming::GenericName;
use crate::universe::TypeId;
use std::collections::HashMap;

/// A parsed mapping target, arguments expanded recursively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTarget {
    pub name: String,
    pub args: Vec<MappingTarget>,
}

impl MappingTarget {
    fn parse(text: &str, key: &str) -> Result<Self, ConfigError> {
        let parsed = GenericName::parse(text).map_err(|source| ConfigError::MalformedMapping {
            key: key.to_string(),
            source,
        })?;
        let args = parsed
            .arguments
            .iter()
            .map(|arg| MappingTarget::parse(arg, key))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: parsed.base_name,
            args,
        })
    }

    /// Leaf names that look like type parameters (single upper-case token
    /// optionally followed by digits, e.g. `T`, `K`, `T2`).
    fn parameter_leaves<'s>(&'s self, out: &mut Vec<&'s str>) {
        if self.args.is_empty() && looks_like_parameter(&self.name) {
            out.push(&self.name);
        }
        for arg in &self.args {
            arg.parameter_leaves(out);
        }
    }
}

fn looks_like_parameter(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase()) && chars.all(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomMapping {
    pub source: GenericName,
    pub target: MappingTarget,
}

#[derive(Debug, Clone, Default)]
pub struct CustomMappings {
    mappings: Vec<CustomMapping>,
}

impl CustomMappings {
    pub fn from_settings(settings: &crate::settings::Settings) -> Result<Self, ConfigError> {
        let mut mappings = Vec::with_capacity(settings.custom_type_mappings.len());
        for (source_text, target_text) in &settings.custom_type_mappings {
            let source =
                GenericName::parse(source_text).map_err(|source| ConfigError::MalformedMapping {
                    key: source_text.clone(),
                    source,
                })?;
            let target = MappingTarget::parse(target_text, source_text)?;

            let mut leaves = Vec::new();
            target.parameter_leaves(&mut leaves);
            if let Some(unbound) = leaves
                .into_iter()
                .find(|leaf| !source.arguments.iter().any(|a| a == leaf))
            {
                return Err(ConfigError::UnboundMappingParameter {
                    source_name: source_text.clone(),
                    target: target_text.clone(),
                    parameter: unbound.to_string(),
                });
            }
            mappings.push(CustomMapping { source, target });
        }
        Ok(Self { mappings })
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// A mapping whose source matches `id` and declares `arity` parameters.
    /// A non-generic source matches any arity (arguments are then dropped).
    pub fn find(&self, id: &TypeId, arity: usize) -> Option<&CustomMapping> {
        self.mappings.iter().find(|m| {
            m.source.base_name == id.as_str()
                && (m.source.arguments.len() == arity || m.source.arguments.is_empty())
        })
    }
}

pub fn resolver(mappings: CustomMappings) -> Resolver {
    Resolver::new("custom-mapping", move |raw, ctx| {
        let Some(id) = raw.class_id() else {
            return Ok(Resolved::Pass);
        };
        let args = raw.args();
        let Some(mapping) = mappings.find(id, args.len()) else {
            return Ok(Resolved::Pass);
        };

        let mut discovered = Vec::new();
        let mut bindings: HashMap<&str, TargetType> = HashMap::new();
        for (param, arg) in mapping.source.arguments.iter().zip(args) {
            let resolved = ctx.resolve_element(arg)?;
            discovered.extend(resolved.discovered);
            bindings.insert(param.as_str(), resolved.ty);
        }

        let ty = build_target(&mapping.target, &bindings, ctx.symbols);
        Ok(Resolved::Type(Resolution::with_discovered(ty, discovered)))
    })
}

fn build_target(
    target: &MappingTarget,
    bindings: &HashMap<&str, TargetType>,
    symbols: &mut crate::naming::SymbolTable,
) -> TargetType {
    if target.args.is_empty() {
        if let Some(bound) = bindings.get(target.name.as_str()) {
            return bound.clone();
        }
        if let Some(primitive) = Primitive::from_keyword(&target.name) {
            return TargetType::primitive(primitive);
        }
    }
    let args = target
        .args
        .iter()
        .map(|arg| build_target(arg, bindings, symbols))
        .collect();
    TargetType::reference(symbols.external(&target.name), args)
}
