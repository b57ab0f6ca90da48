//! Declaration parsing.
//!
//! A [`ModelParser`] turns one source type reference into a declaration plus the
//! references it discovered. Tagged-union handling and member ordering are
//! applied afterwards by the closure, so parsers only report what the source
//! says.

use crate::diagnostics::{Category, Diagnostic, Diagnostics};
use crate::error::ParseError;
use crate::model::{
    BeanModel, DeclarationModel, EnumKind, EnumMemberModel, EnumModel, Literal, OrderingHints,
    PropertyModel, PullProperties, TargetType,
};
use crate::resolve::ResolveContext;
use crate::settings::{OptionalProperties, Settings, UnsupportedProperties};
use crate::universe::{ClassDescriptor, PropertyDescriptor, Role, Shape, SourceTypeRef};

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDeclaration {
    pub declaration: DeclarationModel,
    pub discovered: Vec<SourceTypeRef>,
}

pub trait ModelParser {
    fn parse_declaration(
        &self,
        source: &SourceTypeRef,
        ctx: &mut ResolveContext<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Result<ParsedDeclaration, ParseError>;
}

/// Reads declarations from the context's [`TypeUniverse`](crate::universe::TypeUniverse).
#[derive(Debug, Clone, Copy, Default)]
pub struct UniverseParser;

impl ModelParser for UniverseParser {
    fn parse_declaration(
        &self,
        source: &SourceTypeRef,
        ctx: &mut ResolveContext<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Result<ParsedDeclaration, ParseError> {
        let id = source.identity().ok_or_else(|| ParseError::NotADeclaration {
            raw: source.raw.to_string(),
        })?;
        let universe = ctx.universe;
        let desc = universe
            .get(id)
            .ok_or_else(|| ParseError::UnknownType(id.clone()))?;

        ctx.set_origin(Some(id.clone()));
        let parsed = if desc.is_enum() {
            parse_enum(desc, ctx, diagnostics)
        } else {
            parse_bean(desc, ctx, diagnostics)
        };
        ctx.set_property(None);
        Ok(parsed)
    }
}

fn parse_bean<'a>(
    desc: &'a ClassDescriptor,
    ctx: &mut ResolveContext<'a>,
    diagnostics: &mut Diagnostics,
) -> ParsedDeclaration {
    let symbol = ctx.symbol_for(&desc.id);
    let (properties, mut discovered) = parse_properties(desc, ctx, diagnostics);

    let mut bean = BeanModel::new(symbol, desc.id.clone());
    bean.type_params = desc.type_params.clone();
    bean.is_abstract = desc.is_abstract();
    bean.properties = properties;
    bean.comments = comment_lines(desc.description.as_deref());

    ctx.set_property(None);
    if let Some(superclass) = &desc.superclass {
        ctx.set_role(Role::Superclass);
        bean.parent = resolve_supertype(desc, superclass, ctx, diagnostics, &mut discovered);
    }
    for interface in &desc.interfaces {
        ctx.set_role(Role::Interface);
        if let Some(ty) = resolve_supertype(desc, interface, ctx, diagnostics, &mut discovered) {
            bean.interfaces.push(ty);
        }
    }

    ParsedDeclaration {
        declaration: DeclarationModel::Bean(bean),
        discovered,
    }
}

/// Supertypes that do not resolve to a declaration reference (excluded types,
/// `Object`) are dropped from the hierarchy.
fn resolve_supertype(
    desc: &ClassDescriptor,
    raw: &crate::universe::RawType,
    ctx: &mut ResolveContext<'_>,
    diagnostics: &mut Diagnostics,
    discovered: &mut Vec<SourceTypeRef>,
) -> Option<TargetType> {
    match ctx.resolve(raw) {
        Ok(resolution) => {
            discovered.extend(resolution.discovered);
            match resolution.ty {
                ty @ TargetType::Reference { .. } => Some(ty),
                _ => None,
            }
        }
        Err(err) => {
            diagnostics.push(
                Diagnostic::warning(Category::UnsupportedType, err.to_string())
                    .with_type(desc.id.clone())
                    .with_role(ctx.role().clone()),
            );
            None
        }
    }
}

fn parse_enum<'a>(
    desc: &'a ClassDescriptor,
    ctx: &mut ResolveContext<'a>,
    diagnostics: &mut Diagnostics,
) -> ParsedDeclaration {
    let symbol = ctx.symbol_for(&desc.id);
    let mut members = Vec::with_capacity(desc.constants.len());
    for constant in &desc.constants {
        let value = match &constant.value {
            None => Literal::String(constant.name.clone()),
            Some(serde_json::Value::String(s)) => Literal::String(s.clone()),
            Some(serde_json::Value::Number(n)) => Literal::Number(n.clone()),
            Some(other) => {
                diagnostics.push(
                    Diagnostic::warning(
                        Category::IgnoredEnumValue,
                        format!("constant `{}` has non-literal value {other}", constant.name),
                    )
                    .with_type(desc.id.clone()),
                );
                continue;
            }
        };
        members.push(EnumMemberModel {
            name: constant.name.clone(),
            value,
            comments: comment_lines(constant.description.as_deref()),
        });
    }

    let (kind, properties, discovered) = match desc.shape {
        Shape::Object => {
            let (properties, discovered) = parse_properties(desc, ctx, diagnostics);
            (EnumKind::Object, properties, discovered)
        }
        Shape::Number => (EnumKind::NumberBased, Vec::new(), Vec::new()),
        Shape::Default | Shape::String => (EnumKind::StringBased, Vec::new(), Vec::new()),
    };

    // ordinal-serialized enums emit their position, not their name
    if kind == EnumKind::NumberBased {
        for (ordinal, member) in members.iter_mut().enumerate() {
            if matches!(member.value, Literal::String(_)) {
                member.value = Literal::Number(serde_json::Number::from(ordinal));
            }
        }
    }

    ParsedDeclaration {
        declaration: DeclarationModel::Enum(EnumModel {
            symbol,
            origin: desc.id.clone(),
            kind,
            members,
            properties,
            comments: comment_lines(desc.description.as_deref()),
        }),
        discovered,
    }
}

fn parse_properties<'a>(
    desc: &'a ClassDescriptor,
    ctx: &mut ResolveContext<'a>,
    diagnostics: &mut Diagnostics,
) -> (Vec<PropertyModel>, Vec<SourceTypeRef>) {
    let settings = ctx.settings;
    let mut properties = Vec::with_capacity(desc.properties.len());
    let mut discovered = Vec::new();

    for property in &desc.properties {
        if !is_included(property, settings) {
            continue;
        }
        ctx.set_property(Some(property));
        ctx.set_role(Role::Property(property.name.clone()));
        let ty = match ctx.resolve(&property.ty) {
            Ok(resolution) => {
                discovered.extend(resolution.discovered);
                resolution.ty
            }
            Err(err) => {
                diagnostics.push(
                    Diagnostic::warning(
                        Category::UnsupportedType,
                        format!("property `{}`: {err}", property.name),
                    )
                    .with_type(desc.id.clone())
                    .with_role(Role::Property(property.name.clone())),
                );
                match settings.unsupported_properties {
                    UnsupportedProperties::Omit => continue,
                    UnsupportedProperties::Placeholder => TargetType::unknown(),
                }
            }
        };

        properties.push(PropertyModel {
            name: property.name.clone(),
            ty,
            optional: is_optional(property, settings),
            access: property.access,
            pull: property.unwrapped.as_ref().map(|u| PullProperties {
                prefix: u.prefix.clone(),
                suffix: u.suffix.clone(),
            }),
            comments: comment_lines(property.description.as_deref()),
            ordering: OrderingHints {
                serialization_index: property.serialization_index,
                index: property.index,
                field_index: property.field_index,
            },
        });
    }
    ctx.set_property(None);
    (properties, discovered)
}

fn is_included(property: &PropertyDescriptor, settings: &Settings) -> bool {
    let has_any = |list: &[String]| property.annotations.iter().any(|a| list.contains(a));
    if !settings.include_property_annotations.is_empty()
        && !has_any(&settings.include_property_annotations)
    {
        return false;
    }
    !has_any(&settings.exclude_property_annotations)
}

fn is_optional(property: &PropertyDescriptor, settings: &Settings) -> bool {
    match settings.optional_properties {
        OptionalProperties::UseLibraryDefinition => !property.required,
        OptionalProperties::UseSpecifiedAnnotations => property
            .annotations
            .iter()
            .any(|a| settings.optional_annotations.contains(a)),
        OptionalProperties::All => true,
    }
}

fn comment_lines(text: Option<&str>) -> Vec<String> {
    text.map(|t| t.lines().map(|l| l.trim_end().to_string()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::SymbolTable;
    use crate::resolve::ResolverChain;
    use crate::universe::{EnumConstant, RawType, TypeUniverse};
    use serde_json::json;

    fn parse(universe: &TypeUniverse, settings: &Settings, id: &str) -> (ParsedDeclaration, Diagnostics) {
        let chain = ResolverChain::standard(settings, &[]).unwrap();
        let mut symbols = SymbolTable::new();
        let mut diagnostics = Diagnostics::new();
        let mut ctx = ResolveContext::new(&chain, universe, settings, &mut symbols);
        let parsed = UniverseParser
            .parse_declaration(&SourceTypeRef::root(id), &mut ctx, &mut diagnostics)
            .unwrap();
        (parsed, diagnostics)
    }

    #[test]
    fn test_enum_values_and_ignored_constant() {
        let universe = TypeUniverse::new().with_type(ClassDescriptor::enumeration(
            "a.Level",
            vec![
                EnumConstant::named("LOW"),
                EnumConstant::valued("HIGH", json!("high")),
                EnumConstant::valued("WEIRD", json!({"x": 1})),
            ],
        ));
        let (parsed, diagnostics) = parse(&universe, &Settings::default(), "a.Level");
        let e = parsed.declaration.as_enum().unwrap();
        assert_eq!(e.kind, EnumKind::StringBased);
        let values: Vec<_> = e.members.iter().map(|m| m.value.clone()).collect();
        assert_eq!(values, vec![Literal::string("LOW"), Literal::string("high")]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.iter().next().unwrap().category, Category::IgnoredEnumValue);
    }

    #[test]
    fn test_number_enum_uses_ordinals() {
        let universe = TypeUniverse::new().with_type(
            ClassDescriptor::enumeration(
                "a.Rank",
                vec![EnumConstant::named("FIRST"), EnumConstant::named("SECOND")],
            )
            .with_shape(Shape::Number),
        );
        let (parsed, _) = parse(&universe, &Settings::default(), "a.Rank");
        let e = parsed.declaration.as_enum().unwrap();
        assert_eq!(e.kind, EnumKind::NumberBased);
        assert_eq!(e.members[1].value, Literal::Number(serde_json::Number::from(1u64)));
    }

    #[test]
    fn test_unsupported_property_placeholder_and_omit() {
        let universe = TypeUniverse::new().with_type(
            ClassDescriptor::class("a.Holder")
                .with_property(PropertyDescriptor::new("callback", RawType::opaque("fn() -> ()")))
                .with_property(PropertyDescriptor::new("name", RawType::class("String"))),
        );

        let (parsed, diagnostics) = parse(&universe, &Settings::default(), "a.Holder");
        let bean = parsed.declaration.as_bean().unwrap();
        assert_eq!(bean.properties.len(), 2);
        assert_eq!(bean.properties[0].ty, TargetType::unknown());
        assert_eq!(diagnostics.len(), 1);

        let settings = Settings {
            unsupported_properties: UnsupportedProperties::Omit,
            ..Settings::default()
        };
        let (parsed, _) = parse(&universe, &settings, "a.Holder");
        let names: Vec<_> = parsed
            .declaration
            .properties()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["name"]);
    }

    #[test]
    fn test_optional_modes() {
        let universe = TypeUniverse::new().with_type(
            ClassDescriptor::class("a.Form")
                .with_property(PropertyDescriptor::new("id", RawType::class("long")).required())
                .with_property(
                    PropertyDescriptor::new("note", RawType::class("String"))
                        .with_annotation("Nullable"),
                ),
        );
        let (parsed, _) = parse(&universe, &Settings::default(), "a.Form");
        let flags: Vec<_> = parsed.declaration.properties().iter().map(|p| p.optional).collect();
        assert_eq!(flags, vec![false, true]);

        let settings = Settings {
            optional_properties: OptionalProperties::UseSpecifiedAnnotations,
            optional_annotations: vec!["Nullable".into()],
            ..Settings::default()
        };
        let (parsed, _) = parse(&universe, &settings, "a.Form");
        let flags: Vec<_> = parsed.declaration.properties().iter().map(|p| p.optional).collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[test]
    fn test_excluded_superclass_is_dropped() {
        let universe = TypeUniverse::new()
            .with_type(ClassDescriptor::class("a.Base"))
            .with_type(ClassDescriptor::class("a.Child").with_superclass(RawType::class("a.Base")));
        let settings = Settings {
            exclude: vec!["a.Base".into()],
            ..Settings::default()
        };
        let (parsed, _) = parse(&universe, &settings, "a.Child");
        assert_eq!(parsed.declaration.as_bean().unwrap().parent, None);
        assert!(parsed.discovered.is_empty());
    }

    #[test]
    fn test_unknown_type_is_a_parse_error() {
        let universe = TypeUniverse::new();
        let settings = Settings::default();
        let chain = ResolverChain::standard(&settings, &[]).unwrap();
        let mut symbols = SymbolTable::new();
        let mut ctx = ResolveContext::new(&chain, &universe, &settings, &mut symbols);
        let err = UniverseParser
            .parse_declaration(&SourceTypeRef::root("a.Gone"), &mut ctx, &mut Diagnostics::new())
            .unwrap_err();
        assert!(matches!(err, ParseError::UnknownType(_)));
    }
}
