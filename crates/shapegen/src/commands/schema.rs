use crate::error::CliError;
use anyhow::Context;
use schemars::schema_for;
use shapegen_common::vfs::{OsVfs, Vfs};
use shapegen_core::Settings;
use shapegen_core::universe::UniverseDocument;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SchemaKind {
    /// The type universe input document
    #[default]
    Universe,
    /// The `[compiler]` settings table
    Settings,
}

pub fn run_schema(kind: SchemaKind, output: Option<PathBuf>) -> Result<(), CliError> {
    let schema = match kind {
        SchemaKind::Universe => schema_for!(UniverseDocument),
        SchemaKind::Settings => schema_for!(Settings),
    };
    let schema_json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;

    match output {
        Some(path) => OsVfs
            .write_from_string(&path, &schema_json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?,
        None => println!("{schema_json}"),
    }
    Ok(())
}
