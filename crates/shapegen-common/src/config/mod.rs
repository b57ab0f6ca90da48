//! Configuration module
//!
//! Handles loading and parsing of shapegen configuration files (shapegen.toml,
//! legacy shapegen.json).

pub mod legacy;
pub mod model;

use self::legacy::LegacyConfig;
use crate::vfs::{OsVfs, Vfs};
use anyhow::Context;
use std::path::{Path, PathBuf};

pub use self::model::*;

/// File names probed by [`discover_config`], in priority order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["shapegen.toml", "shapegen.json"];

impl ShapegenConfig {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> crate::Result<Self> {
        Self::load_from(&OsVfs, path)
    }

    /// Load configuration through a [`Vfs`]. Relative input/output paths are
    /// rebased onto the configuration file's directory.
    pub fn load_from(vfs: &impl Vfs, path: &Path) -> crate::Result<Self> {
        let content = vfs
            .read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config = if path.extension().is_some_and(|ext| ext == "json") {
            let deserializer = &mut serde_json::Deserializer::from_str(&content);
            let legacy: LegacyConfig = serde_path_to_error::deserialize(deserializer)
                .with_context(|| format!("Failed to parse legacy config: {}", path.display()))?;
            ShapegenConfig::try_from(legacy)
                .with_context(|| format!("Invalid legacy config: {}", path.display()))?
        } else {
            toml::from_str::<ShapegenConfig>(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        if let Some(base_dir) = path.parent() {
            config.resolve_paths(base_dir);
        }
        tracing::debug!(path = %path.display(), roots = config.input.roots.len(), "loaded config");
        Ok(config)
    }
}

/// Walk up the directory tree to find shapegen.toml or shapegen.json
pub fn discover_config(vfs: &impl Vfs, start_dir: &Path) -> Option<PathBuf> {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if vfs.exists(&candidate) && !vfs.is_dir(&candidate) {
                return Some(candidate);
            }
        }
        current = dir.parent();
    }
    None
}
