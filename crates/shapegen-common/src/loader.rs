//! Loading type universes from JSON documents.

use crate::vfs::Vfs;
use anyhow::{Context, Result};
use shapegen_core::universe::UniverseDocument;
use shapegen_core::TypeUniverse;
use std::path::Path;

/// Parse a universe document. Errors carry the JSON path of the offending
/// value (`types[3].properties[0].type`).
pub fn parse_universe(content: &str) -> Result<TypeUniverse> {
    let deserializer = &mut serde_json::Deserializer::from_str(content);
    let document: UniverseDocument =
        serde_path_to_error::deserialize(deserializer).context("Failed to parse type universe")?;
    Ok(TypeUniverse::from(document))
}

pub fn load_universe(vfs: &impl Vfs, path: &Path) -> Result<TypeUniverse> {
    let content = vfs
        .read_to_string(path)
        .with_context(|| format!("Failed to read universe: {}", path.display()))?;
    let universe = parse_universe(&content).with_context(|| format!("In {}", path.display()))?;
    tracing::debug!(path = %path.display(), types = universe.len(), "loaded universe");
    Ok(universe)
}
