//! The structural default: the last built-in stage.

use super::chain::{ResolveContext, Resolution, Resolved, Resolver};
use super::semantic::key_value;
use crate::error::ResolveError;
use crate::model::{Literal, Primitive, TargetType};
use crate::universe::RawType;

pub fn resolver() -> Resolver {
    Resolver::new("structural", resolve_structural)
}

fn resolve_structural(raw: &RawType, ctx: &mut ResolveContext<'_>) -> Result<Resolved, ResolveError> {
    match raw {
        RawType::Class { name, args } => {
            let settings = ctx.settings;
            if let Some(primitive) = settings.primitive_aliases.get(name.as_str()) {
                return Ok(resolved(TargetType::primitive(*primitive)));
            }
            if settings.list_like_types.iter().any(|l| l == name.as_str()) && args.len() <= 1 {
                let element = match args.first() {
                    Some(arg) => ctx.resolve_element(arg)?,
                    None => Resolution::new(TargetType::any()),
                };
                return Ok(Resolved::Type(Resolution::with_discovered(
                    TargetType::array(element.ty),
                    element.discovered,
                )));
            }
            if settings.map_like_types.iter().any(|m| m == name.as_str()) && args.len() == 2 {
                return key_value(&args[0], &args[1], ctx);
            }

            let universe = ctx.universe;
            if universe.get(name).is_none() {
                return Ok(Resolved::Pass);
            }
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
        RawType::Variable { name } => Ok(resolved(TargetType::variable(name.clone()))),
        RawType::Array { element } => {
            let element = ctx.resolve_element(element)?;
            Ok(Resolved::Type(Resolution::with_discovered(
                TargetType::array(element.ty),
                element.discovered,
            )))
        }
        RawType::Union { members } => {
            let mut discovered = Vec::new();
            let mut types = Vec::with_capacity(members.len());
            for member in members {
                let resolved = ctx.resolve(member)?;
                discovered.extend(resolved.discovered);
                types.push(resolved.ty);
            }
            Ok(Resolved::Type(Resolution::with_discovered(
                TargetType::union(types),
                discovered,
            )))
        }
        RawType::Wildcard => Ok(resolved(TargetType::unknown())),
        RawType::Opaque { .. } => Ok(Resolved::Pass),
    }
}

fn resolved(ty: TargetType) -> Resolved {
    Resolved::Type(Resolution::new(ty))
}

/// Index signature keys must be string or number; anything else widens to string.
pub fn map_key(key: TargetType) -> TargetType {
    match key {
        TargetType::Primitive {
            primitive: Primitive::String | Primitive::Number,
        } => key,
        TargetType::Literal {
            value: Literal::String(_),
        } => key,
        _ => TargetType::string(),
    }
}
