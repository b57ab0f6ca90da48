use super::model::{InputSection, OutputSection, ShapegenConfig, default_pretty};
use anyhow::anyhow;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shapegen_core::Settings;
use shapegen_core::settings::OptionalProperties;
use std::path::PathBuf;

/// Legacy `shapegen.json` configuration: one flat camelCase object.
///
/// Mappings and renames are `"source:target"` strings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LegacyConfig {
    pub universe: Option<PathBuf>,
    #[serde(default)]
    pub classes: Vec<String>,
    pub output_file: Option<PathBuf>,
    #[serde(default)]
    pub exclude_classes: Vec<String>,
    #[serde(default)]
    pub exclude_class_patterns: Vec<String>,
    #[serde(default)]
    pub include_property_annotations: Vec<String>,
    #[serde(default)]
    pub exclude_property_annotations: Vec<String>,
    pub optional_properties: Option<LegacyOptionalProperties>,
    #[serde(default)]
    pub optional_annotations: Vec<String>,
    pub remove_type_name_prefix: Option<String>,
    pub remove_type_name_suffix: Option<String>,
    pub add_type_name_prefix: Option<String>,
    pub add_type_name_suffix: Option<String>,
    #[serde(default)]
    pub custom_type_naming: Vec<String>,
    #[serde(default)]
    pub custom_type_mappings: Vec<String>,
    #[serde(default)]
    pub disable_tagged_unions: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegacyOptionalProperties {
    UseSpecifiedAnnotations,
    UseLibraryDefinition,
    All,
}

impl From<LegacyOptionalProperties> for OptionalProperties {
    fn from(value: LegacyOptionalProperties) -> Self {
        match value {
            LegacyOptionalProperties::UseSpecifiedAnnotations => OptionalProperties::UseSpecifiedAnnotations,
            LegacyOptionalProperties::UseLibraryDefinition => OptionalProperties::UseLibraryDefinition,
            LegacyOptionalProperties::All => OptionalProperties::All,
        }
    }
}

fn split_pairs(entries: &[String], field: &str) -> crate::Result<IndexMap<String, String>> {
    let mut pairs = IndexMap::with_capacity(entries.len());
    for entry in entries {
        let (source, target) = entry
            .split_once(':')
            .ok_or_else(|| anyhow!("{field}: expected `source:target`, found `{entry}`"))?;
        pairs.insert(source.trim().to_string(), target.trim().to_string());
    }
    Ok(pairs)
}

impl TryFrom<LegacyConfig> for ShapegenConfig {
    type Error = anyhow::Error;

    fn try_from(legacy: LegacyConfig) -> crate::Result<Self> {
        let mut compiler = Settings {
            exclude: legacy.exclude_classes,
            exclude_patterns: legacy.exclude_class_patterns,
            include_property_annotations: legacy.include_property_annotations,
            exclude_property_annotations: legacy.exclude_property_annotations,
            optional_annotations: legacy.optional_annotations,
            disable_tagged_unions: legacy.disable_tagged_unions,
            custom_type_mappings: split_pairs(&legacy.custom_type_mappings, "customTypeMappings")?,
            ..Settings::default()
        };
        if let Some(optional) = legacy.optional_properties {
            compiler.optional_properties = optional.into();
        }
        compiler.naming.remove_type_name_prefix = legacy.remove_type_name_prefix;
        compiler.naming.remove_type_name_suffix = legacy.remove_type_name_suffix;
        compiler.naming.add_type_name_prefix = legacy.add_type_name_prefix;
        compiler.naming.add_type_name_suffix = legacy.add_type_name_suffix;
        compiler.naming.custom_type_naming = split_pairs(&legacy.custom_type_naming, "customTypeNaming")?;

        Ok(ShapegenConfig {
            compiler,
            input: InputSection {
                universe: legacy.universe,
                roots: legacy.classes,
            },
            output: OutputSection {
                path: legacy.output_file,
                pretty: default_pretty(),
            },
        })
    }
}
