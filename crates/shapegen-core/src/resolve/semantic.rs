//! Stages keyed on what a type means rather than how it is shaped.

use super::chain::{ResolveContext, Resolution, Resolved, Resolver};
use super::structural::map_key;
use crate::model::{Primitive, TargetType};
use crate::universe::{RawType, Shape};

/// A property bound to a custom serializer whose output type is configured.
pub fn serializer_mapping() -> Resolver {
    Resolver::new("serializer-mapping", |_raw, ctx| {
        if ctx.inside_collection() {
            return Ok(Resolved::Pass);
        }
        let Some(property) = ctx.property() else {
            return Ok(Resolved::Pass);
        };
        let settings = ctx.settings;
        let mapped = property
            .serializer
            .as_ref()
            .and_then(|s| settings.serializer_type_mappings.get(s))
            .or_else(|| {
                property
                    .deserializer
                    .as_ref()
                    .and_then(|d| settings.deserializer_type_mappings.get(d))
            });
        Ok(match mapped {
            Some(text) => Resolved::Type(Resolution::new(verbatim_or_primitive(text))),
            None => Resolved::Pass,
        })
    })
}

fn verbatim_or_primitive(text: &str) -> TargetType {
    match Primitive::from_keyword(text.trim()) {
        Some(primitive) => TargetType::primitive(primitive),
        None => TargetType::verbatim(text),
    }
}

/// Two-argument pair types become a single-entry dictionary, unless the type
/// is declared with an object shape (then it is an ordinary declaration).
pub fn pair_like() -> Resolver {
    Resolver::new("pair-like", |raw, ctx| {
        let RawType::Class { name, args } = raw else {
            return Ok(Resolved::Pass);
        };
        if args.len() != 2 || !ctx.settings.pair_like_types.iter().any(|p| p == name.as_str()) {
            return Ok(Resolved::Pass);
        }
        if ctx.universe.get(name).is_some_and(|d| d.shape == Shape::Object) {
            return Ok(Resolved::Pass);
        }
        key_value(&args[0], &args[1], ctx)
    })
}

pub(crate) fn key_value(
    key: &RawType,
    value: &RawType,
    ctx: &mut ResolveContext<'_>,
) -> Result<Resolved, crate::error::ResolveError> {
    let key = ctx.resolve_element(key)?;
    let value = ctx.resolve_element(value)?;
    let mut discovered = key.discovered;
    discovered.extend(value.discovered);
    Ok(Resolved::Type(Resolution::with_discovered(
        TargetType::index_signature(map_key(key.ty), value.ty),
        discovered,
    )))
}

/// `Optional<T>` becomes `T | undefined`.
pub fn optional_like() -> Resolver {
    Resolver::new("optional-like", |raw, ctx| {
        let RawType::Class { name, args } = raw else {
            return Ok(Resolved::Pass);
        };
        if args.len() != 1
            || !ctx
                .settings
                .optional_like_types
                .iter()
                .any(|o| o == name.as_str())
        {
            return Ok(Resolved::Pass);
        }
        let inner = ctx.resolve(&args[0])?;
        Ok(Resolved::Type(Resolution::with_discovered(
            TargetType::union(vec![inner.ty, TargetType::undefined()]),
            inner.discovered,
        )))
    })
}

/// Declarations serialized as objects: enums with object shape, and classes
/// with object shape whose names are also configured as list, map or pair
/// aliases. Both resolve to a reference so the structural shortcuts never turn
/// them into arrays or dictionaries.
pub fn object_enum() -> Resolver {
    Resolver::new("object-enum", |raw, ctx| {
        let RawType::Class { name, args } = raw else {
            return Ok(Resolved::Pass);
        };
        let universe = ctx.universe;
        match universe.get(name) {
            Some(desc) if desc.shape == Shape::Object => {
                let symbol = ctx.symbol_for(name);
                let mut discovered = vec![ctx.discovered(name)];
                let mut target_args = Vec::with_capacity(args.len());
                for arg in args {
                    let resolved = ctx.resolve_element(arg)?;
                    discovered.extend(resolved.discovered);
                    target_args.push(resolved.ty);
                }
                Ok(Resolved::Type(Resolution::with_discovered(
                    TargetType::reference(symbol, target_args),
                    discovered,
                )))
            }
            _ => Ok(Resolved::Pass),
        }
    })
}
