//! Tagged (discriminated) unions.
//!
//! An anchor is a declaration with polymorphic type info that writes its type
//! id as a property (`include` of property/existing-property) using a name or
//! class identifier. The anchor and every subtype carry the discriminant
//! property name; concrete types also carry their discriminant literal.

use crate::diagnostics::{Category, Diagnostic, Diagnostics};
use crate::model::BeanModel;
use crate::naming::SymbolTable;
use crate::settings::{Settings, SubtypeDiscovery};
use crate::universe::{
    ClassDescriptor, RawType, Role, SourceTypeRef, TypeId, TypeIdInclusion, TypeIdKind, TypeInfo,
    TypeUniverse,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscriminantInfo {
    pub property: String,
    /// Written by the serializer rather than declared by the type.
    pub synthetic: bool,
    /// `None` for abstract types, which are never instantiated.
    pub literal: Option<String>,
    pub anchor: TypeId,
}

pub struct TaggedUnionResolver<'a> {
    universe: &'a TypeUniverse,
    settings: &'a Settings,
}

impl<'a> TaggedUnionResolver<'a> {
    pub fn new(universe: &'a TypeUniverse, settings: &'a Settings) -> Self {
        Self { universe, settings }
    }

    /// Type info of `desc` when it anchors a tagged union.
    pub fn anchor_info(&self, desc: &ClassDescriptor) -> Option<TypeInfo> {
        if self.settings.disable_tagged_unions
            || self
                .settings
                .disable_tagged_union_types
                .iter()
                .any(|t| t == desc.id.as_str())
        {
            return None;
        }
        let info = desc.type_info.as_ref()?;
        let included = matches!(
            info.include,
            TypeIdInclusion::Property | TypeIdInclusion::ExistingProperty
        );
        let identified = matches!(info.id_kind, TypeIdKind::Name | TypeIdKind::Class);
        (included && identified).then(|| info.clone())
    }

    /// Discriminant of `id`: its own anchor info, else the first anchor found
    /// depth-first among its ancestors (superclass before interfaces).
    pub fn discriminant_of(&self, id: &TypeId) -> Option<DiscriminantInfo> {
        let desc = self.universe.get(id)?;
        let (anchor, info) = match self.anchor_info(desc) {
            Some(info) => (desc.id.clone(), info),
            None => {
                let (anchor, info) =
                    self.universe
                        .search_hierarchy(id, false, |d| self.anchor_info(d))?;
                (anchor.id.clone(), info)
            }
        };
        Some(DiscriminantInfo {
            property: self.property_name(&info),
            synthetic: info.include == TypeIdInclusion::Property,
            literal: self.literal_for(desc, info.id_kind),
            anchor,
        })
    }

    fn property_name(&self, info: &TypeInfo) -> String {
        match info.property.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => match info.id_kind {
                TypeIdKind::Class => self.settings.discriminant.class_property.clone(),
                _ => self.settings.discriminant.name_property.clone(),
            },
        }
    }

    /// Name mode uses the registered name and falls back to the simple name.
    /// An ancestor's explicit subtype entry wins over the type's own name,
    /// which wins over the global registry. Class mode uses the full identity.
    pub fn literal_for(&self, desc: &ClassDescriptor, kind: TypeIdKind) -> Option<String> {
        if desc.is_abstract() {
            return None;
        }
        match kind {
            TypeIdKind::Class => Some(desc.id.to_string()),
            TypeIdKind::Name => Some(
                self.registered_name(desc)
                    .unwrap_or_else(|| desc.id.simple_name().to_string()),
            ),
            _ => None,
        }
    }

    fn registered_name(&self, desc: &ClassDescriptor) -> Option<String> {
        let from_ancestor = self.universe.search_hierarchy(&desc.id, false, |d| {
            d.subtypes
                .iter()
                .flatten()
                .find(|s| s.id == desc.id)
                .and_then(|s| s.name.clone())
        });
        if let Some((_, name)) = from_ancestor {
            return Some(name);
        }
        if let Some(name) = &desc.type_name {
            return Some(name.clone());
        }
        self.universe
            .registered_subtypes()
            .iter()
            .find(|s| s.id == desc.id)
            .and_then(|s| s.name.clone())
    }

    /// Variants of `desc`: its explicit subtype list, else (for anchors) the
    /// registry filtered to actual subtypes. First-seen order, no duplicates,
    /// never the type itself.
    pub fn variants_of(&self, desc: &ClassDescriptor) -> Option<Vec<TypeId>> {
        let candidates: Vec<TypeId> = match &desc.subtypes {
            Some(explicit) => explicit.iter().map(|s| s.id.clone()).collect(),
            None => {
                if self.settings.subtype_discovery != SubtypeDiscovery::ExplicitThenRegistry
                    || self.anchor_info(desc).is_none()
                {
                    return None;
                }
                self.universe
                    .registered_subtypes()
                    .iter()
                    .filter(|s| self.universe.is_subtype_of(&s.id, &desc.id))
                    .map(|s| s.id.clone())
                    .collect()
            }
        };

        let mut variants: Vec<TypeId> = Vec::with_capacity(candidates.len());
        for id in candidates {
            if id != desc.id && !variants.contains(&id) {
                variants.push(id);
            }
        }
        (!variants.is_empty()).then_some(variants)
    }

    /// Annotate a parsed bean with its discriminant and variants. Returns the
    /// variant references to enqueue.
    pub fn apply(
        &self,
        bean: &mut BeanModel,
        desc: &ClassDescriptor,
        symbols: &mut SymbolTable,
        diagnostics: &mut Diagnostics,
    ) -> Vec<SourceTypeRef> {
        if let Some(info) = self.discriminant_of(&desc.id) {
            drop_duplicate_discriminant(bean, &info, diagnostics);
            bean.discriminant_property = Some(info.property);
            bean.discriminant_literal = info.literal;
            bean.synthetic_discriminant = info.synthetic;
        }

        let Some(variants) = self.variants_of(desc) else {
            return Vec::new();
        };
        bean.variants = Some(variants.iter().map(|v| symbols.symbol_for(v)).collect());
        variants
            .into_iter()
            .map(|v| SourceTypeRef::new(RawType::class(v), Some(desc.id.clone()), Role::Subclass))
            .collect()
    }
}

/// A single property named like the discriminant is removed: the union member
/// type carries the discriminant itself. Several such properties are left alone.
fn drop_duplicate_discriminant(
    bean: &mut BeanModel,
    info: &DiscriminantInfo,
    diagnostics: &mut Diagnostics,
) {
    let matching: Vec<usize> = bean
        .properties
        .iter()
        .enumerate()
        .filter(|(_, p)| p.name == info.property)
        .map(|(i, _)| i)
        .collect();
    match matching.as_slice() {
        [] => {}
        [single] => {
            bean.properties.remove(*single);
            if info.synthetic {
                diagnostics.push(
                    Diagnostic::info(
                        Category::DuplicateDiscriminant,
                        format!(
                            "declared property `{}` duplicates the synthetic discriminant and was dropped",
                            info.property
                        ),
                    )
                    .with_type(bean.origin.clone())
                    .with_origin(Some(info.anchor.clone())),
                );
            }
        }
        _ => diagnostics.push(
            Diagnostic::warning(
                Category::AmbiguousDiscriminant,
                format!(
                    "{} properties are named like discriminant `{}`",
                    matching.len(),
                    info.property
                ),
            )
            .with_type(bean.origin.clone())
            .with_origin(Some(info.anchor.clone())),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::NamedType;

    fn shapes(include: TypeIdInclusion, kind: TypeIdKind) -> TypeUniverse {
        TypeUniverse::new()
            .with_type(
                ClassDescriptor::abstract_class("geo.Shape")
                    .with_type_info(TypeInfo::new(include, kind))
                    .with_subtypes(vec![
                        NamedType::named("geo.Circle", "circle"),
                        NamedType::new("geo.Square"),
                    ]),
            )
            .with_type(ClassDescriptor::class("geo.Circle").with_superclass(RawType::class("geo.Shape")))
            .with_type(ClassDescriptor::class("geo.Square").with_superclass(RawType::class("geo.Shape")))
    }

    #[test]
    fn test_name_mode_literals() {
        let universe = shapes(TypeIdInclusion::Property, TypeIdKind::Name);
        let settings = Settings::default();
        let unions = TaggedUnionResolver::new(&universe, &settings);

        let anchor = unions.discriminant_of(&"geo.Shape".into()).unwrap();
        assert_eq!(anchor.property, "@type");
        assert!(anchor.synthetic);
        assert_eq!(anchor.literal, None);

        let circle = unions.discriminant_of(&"geo.Circle".into()).unwrap();
        assert_eq!(circle.literal.as_deref(), Some("circle"));
        let square = unions.discriminant_of(&"geo.Square".into()).unwrap();
        assert_eq!(square.literal.as_deref(), Some("Square"));
    }

    #[test]
    fn test_subtype_entry_name_beats_own_name() {
        let universe = shapes(TypeIdInclusion::Property, TypeIdKind::Name)
            .with_type(
                ClassDescriptor::class("geo.Circle")
                    .with_superclass(RawType::class("geo.Shape"))
                    .with_type_name("round"),
            )
            .with_type(
                ClassDescriptor::class("geo.Square")
                    .with_superclass(RawType::class("geo.Shape"))
                    .with_type_name("box"),
            );
        let settings = Settings::default();
        let unions = TaggedUnionResolver::new(&universe, &settings);

        let circle = unions.discriminant_of(&"geo.Circle".into()).unwrap();
        assert_eq!(circle.literal.as_deref(), Some("circle"));
        // the entry for Square carries no name, so its own applies
        let square = unions.discriminant_of(&"geo.Square".into()).unwrap();
        assert_eq!(square.literal.as_deref(), Some("box"));
    }

    #[test]
    fn test_class_mode_uses_identity() {
        let universe = shapes(TypeIdInclusion::ExistingProperty, TypeIdKind::Class);
        let settings = Settings::default();
        let unions = TaggedUnionResolver::new(&universe, &settings);
        let circle = unions.discriminant_of(&"geo.Circle".into()).unwrap();
        assert_eq!(circle.property, "@class");
        assert!(!circle.synthetic);
        assert_eq!(circle.literal.as_deref(), Some("geo.Circle"));
    }

    #[test]
    fn test_wrapper_inclusion_is_not_an_anchor() {
        let universe = shapes(TypeIdInclusion::WrapperObject, TypeIdKind::Name);
        let settings = Settings::default();
        let unions = TaggedUnionResolver::new(&universe, &settings);
        assert!(unions.discriminant_of(&"geo.Circle".into()).is_none());
    }

    #[test]
    fn test_disabled_per_type() {
        let universe = shapes(TypeIdInclusion::Property, TypeIdKind::Name);
        let settings = Settings {
            disable_tagged_union_types: vec!["geo.Shape".into()],
            ..Settings::default()
        };
        let unions = TaggedUnionResolver::new(&universe, &settings);
        assert!(unions.discriminant_of(&"geo.Circle".into()).is_none());
    }

    #[test]
    fn test_registry_discovery_filters_unrelated() {
        let universe = TypeUniverse::new()
            .with_type(
                ClassDescriptor::interface("zoo.Animal")
                    .with_type_info(TypeInfo::new(TypeIdInclusion::Property, TypeIdKind::Name).with_property("species")),
            )
            .with_type(ClassDescriptor::class("zoo.Cat").with_interface(RawType::class("zoo.Animal")))
            .with_type(ClassDescriptor::class("zoo.Rock"))
            .with_registered_subtype(NamedType::named("zoo.Cat", "cat"))
            .with_registered_subtype(NamedType::new("zoo.Rock"))
            .with_registered_subtype(NamedType::named("zoo.Cat", "kitty"))
            .with_registered_subtype(NamedType::new("zoo.Animal"));
        let settings = Settings::default();
        let unions = TaggedUnionResolver::new(&universe, &settings);

        let animal = universe.get(&"zoo.Animal".into()).unwrap();
        assert_eq!(unions.variants_of(animal), Some(vec![TypeId::new("zoo.Cat")]));

        let cat = unions.discriminant_of(&"zoo.Cat".into()).unwrap();
        assert_eq!(cat.property, "species");
        assert_eq!(cat.literal.as_deref(), Some("cat"));

        let explicit_only = Settings {
            subtype_discovery: SubtypeDiscovery::ExplicitOnly,
            ..Settings::default()
        };
        let unions = TaggedUnionResolver::new(&universe, &explicit_only);
        assert_eq!(unions.variants_of(animal), None);
    }
}
