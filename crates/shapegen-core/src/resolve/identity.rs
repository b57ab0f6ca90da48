//! Object identity rewriting.
//!
//! A property whose type (or the property itself) carries identity metadata
//! may serialize either the full object or just its id. The type becomes
//! `T | Id`, or plain `Id` when the object is always written as its id.

use super::chain::{ResolveContext, Resolution, Resolved, Resolver};
use crate::error::ResolveError;
use crate::model::TargetType;
use crate::universe::{IdGenerator, IdentityInfo, RawType};

pub fn resolver() -> Resolver {
    Resolver::new("identity", resolve_identity)
}

fn resolve_identity(raw: &RawType, ctx: &mut ResolveContext<'_>) -> Result<Resolved, ResolveError> {
    if ctx.settings.disable_object_identity {
        return Ok(Resolved::Pass);
    }
    let Some(property) = ctx.property() else {
        return Ok(Resolved::Pass);
    };
    let Some(id) = raw.class_id() else {
        return Ok(Resolved::Pass);
    };
    let universe = ctx.universe;
    let Some(desc) = universe.get(id) else {
        return Ok(Resolved::Pass);
    };
    if desc.is_enum() {
        return Ok(Resolved::Pass);
    }

    let inherited: Option<IdentityInfo> = universe
        .search_hierarchy(id, true, |d| d.identity.clone())
        .map(|(_, info)| info);
    let Some(identity) = property.identity.clone().or_else(|| inherited.clone()) else {
        return Ok(Resolved::Pass);
    };
    let always_as_id = property
        .identity
        .as_ref()
        .and_then(|i| i.always_as_id)
        .or_else(|| inherited.as_ref().and_then(|i| i.always_as_id))
        .unwrap_or(false);

    let id_resolution = match &identity.generator {
        IdGenerator::None => return Ok(Resolved::Pass),
        IdGenerator::Property { property: id_property } => {
            let found = universe.search_hierarchy(id, true, |d| d.property(id_property).cloned());
            match found {
                Some((_, descriptor)) => ctx.resolve_detached(&descriptor.ty)?,
                None => {
                    tracing::debug!(type_id = %id, property = %id_property, "identity property not found");
                    return Ok(Resolved::Pass);
                }
            }
        }
        IdGenerator::IntSequence => Resolution::new(TargetType::number()),
        IdGenerator::Uuid | IdGenerator::StringId => Resolution::new(TargetType::string()),
        IdGenerator::Custom => Resolution::new(TargetType::any()),
    };

    if always_as_id {
        return Ok(Resolved::Type(id_resolution));
    }

    // property context cleared, so this stage passes on the nested call
    let object = ctx.resolve_detached(raw)?;
    let mut discovered = object.discovered;
    discovered.extend(id_resolution.discovered);
    Ok(Resolved::Type(Resolution::with_discovered(
        TargetType::union(vec![object.ty, id_resolution.ty]),
        discovered,
    )))
}
