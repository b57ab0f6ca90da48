//! Compiler settings.
//!
//! `Settings` is the in-memory form; the file formats that produce it live in
//! `shapegen-common`. Construction never fails, while [`Settings::validate`]
//! surfaces malformed mappings and patterns before any compilation starts.

use crate::error::ConfigError;
use crate::model::Primitive;
use crate::resolve::custom::CustomMappings;
use crate::resolve::exclusion::ExclusionFilter;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What to do when two declared types derive the same output name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionStrategy {
    #[default]
    Fail,
    /// Prefix with the last namespace segment (`billing.Item` -> `BillingItem`).
    Qualify,
    /// Append `2`, `3`, ... in allocation order.
    NumericSuffix,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "kebab-case")]
pub struct NamingSettings {
    pub remove_type_name_prefix: Option<String>,
    pub remove_type_name_suffix: Option<String>,
    pub add_type_name_prefix: Option<String>,
    pub add_type_name_suffix: Option<String>,
    /// Explicit output names keyed by type identity.
    pub custom_type_naming: IndexMap<String, String>,
    pub collision_strategy: CollisionStrategy,
}

/// Where tagged-union variants come from when the anchor lists none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SubtypeDiscovery {
    /// Explicit subtype list first, then the global registry.
    #[default]
    ExplicitThenRegistry,
    ExplicitOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "kebab-case")]
pub struct DiscriminantDefaults {
    /// Property name used with name-based type ids.
    pub name_property: String,
    /// Property name used with class-based type ids.
    pub class_property: String,
}

impl Default for DiscriminantDefaults {
    fn default() -> Self {
        Self {
            name_property: "@type".to_string(),
            class_property: "@class".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingPreference {
    /// Explicit serialization order, then index, then field position.
    #[default]
    SerializationOrder,
    /// Ignore serialization order; explicit index, then field position.
    DeclaredIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OptionalProperties {
    /// Optional unless the host marks the property required.
    #[default]
    UseLibraryDefinition,
    /// Optional only when carrying one of `optional-annotations`.
    UseSpecifiedAnnotations,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum UnsupportedProperties {
    /// Keep the property with type `unknown`.
    #[default]
    Placeholder,
    Omit,
}

/// Model transformers that ship with the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinTransformer {
    InlinePulledProperties,
    PruneUnreferenced,
    FoldOptionalWrappers,
    SortDeclarations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Type identities resolved to `any` and never parsed.
    pub exclude: Vec<String>,
    /// Glob patterns over type identities: `*` stays within a segment, `**` spans segments.
    pub exclude_patterns: Vec<String>,
    pub naming: NamingSettings,
    pub subtype_discovery: SubtypeDiscovery,
    pub discriminant: DiscriminantDefaults,
    pub ordering: OrderingPreference,
    pub optional_properties: OptionalProperties,
    pub optional_annotations: Vec<String>,
    /// When non-empty, only properties carrying one of these are emitted.
    pub include_property_annotations: Vec<String>,
    pub exclude_property_annotations: Vec<String>,
    pub disable_tagged_unions: bool,
    /// Anchors (by identity) that should not become tagged unions.
    pub disable_tagged_union_types: Vec<String>,
    pub disable_object_identity: bool,
    /// `"Source<T>" = "Target<T>"`: replace a source type with an external target.
    pub custom_type_mappings: IndexMap<String, String>,
    /// Serializer class -> verbatim target type.
    pub serializer_type_mappings: IndexMap<String, String>,
    pub deserializer_type_mappings: IndexMap<String, String>,
    pub primitive_aliases: IndexMap<String, Primitive>,
    pub list_like_types: Vec<String>,
    pub map_like_types: Vec<String>,
    pub pair_like_types: Vec<String>,
    pub optional_like_types: Vec<String>,
    pub unsupported_properties: UnsupportedProperties,
    pub transformers: Vec<BuiltinTransformer>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            exclude_patterns: Vec::new(),
            naming: NamingSettings::default(),
            subtype_discovery: SubtypeDiscovery::default(),
            discriminant: DiscriminantDefaults::default(),
            ordering: OrderingPreference::default(),
            optional_properties: OptionalProperties::default(),
            optional_annotations: Vec::new(),
            include_property_annotations: Vec::new(),
            exclude_property_annotations: Vec::new(),
            disable_tagged_unions: false,
            disable_tagged_union_types: Vec::new(),
            disable_object_identity: false,
            custom_type_mappings: IndexMap::new(),
            serializer_type_mappings: IndexMap::new(),
            deserializer_type_mappings: IndexMap::new(),
            primitive_aliases: default_primitive_aliases(),
            list_like_types: strings(&[
                "List",
                "ArrayList",
                "LinkedList",
                "Set",
                "HashSet",
                "TreeSet",
                "Collection",
                "Iterable",
                "java.util.List",
                "java.util.Set",
                "java.util.Collection",
            ]),
            map_like_types: strings(&["Map", "HashMap", "TreeMap", "Dictionary", "java.util.Map"]),
            pair_like_types: strings(&["Map.Entry", "java.util.Map$Entry", "Pair"]),
            optional_like_types: strings(&["Optional", "java.util.Optional"]),
            unsupported_properties: UnsupportedProperties::default(),
            transformers: vec![
                BuiltinTransformer::InlinePulledProperties,
                BuiltinTransformer::FoldOptionalWrappers,
            ],
        }
    }
}

impl Settings {
    /// Check everything that can be checked without a universe: mapping
    /// syntax, parameter bindings and exclusion patterns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        CustomMappings::from_settings(self)?;
        ExclusionFilter::from_settings(self)?;
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_primitive_aliases() -> IndexMap<String, Primitive> {
    let groups: [(&[&str], Primitive); 5] = [
        (
            &[
                "String",
                "java.lang.String",
                "string",
                "char",
                "Character",
                "CharSequence",
                "UUID",
                "java.util.UUID",
                "Date",
                "java.util.Date",
                "Instant",
                "LocalDate",
                "LocalDateTime",
                "OffsetDateTime",
                "ZonedDateTime",
            ],
            Primitive::String,
        ),
        (
            &[
                "byte",
                "short",
                "int",
                "long",
                "float",
                "double",
                "Byte",
                "Short",
                "Integer",
                "Long",
                "Float",
                "Double",
                "Number",
                "BigDecimal",
                "BigInteger",
                "java.lang.Integer",
                "java.lang.Long",
                "java.lang.Double",
            ],
            Primitive::Number,
        ),
        (
            &["boolean", "Boolean", "java.lang.Boolean"],
            Primitive::Boolean,
        ),
        (&["Object", "java.lang.Object"], Primitive::Any),
        (&["void", "Void"], Primitive::Void),
    ];

    let mut aliases = IndexMap::new();
    for (names, primitive) in groups {
        for name in names {
            aliases.insert(name.to_string(), primitive);
        }
    }
    aliases
}
