//! Compile command: type universe in, declaration model JSON out.

use super::{load_config, locate_config};
use crate::error::CliError;
use anyhow::Context;
use owo_colors::OwoColorize;
use shapegen_common::config::ShapegenConfig;
use shapegen_common::loader::load_universe;
use shapegen_common::vfs::{OsVfs, Vfs};
use shapegen_core::{Compiler, Severity, TypeId};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct CompileArgs {
    pub config: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub roots: Vec<String>,
    pub output: Option<PathBuf>,
    pub compact: bool,
}

/// Run the compile command.
///
/// Command line values override the configuration file. Without `--config`
/// the nearest configuration above `start_dir` is used if there is one; with
/// both `--input` and `--root` no configuration is required.
pub fn run_compile(args: CompileArgs, start_dir: &Path) -> Result<(), CliError> {
    let config = match locate_config(args.config.clone(), start_dir) {
        Some(path) => load_config(&path)?,
        None if args.input.is_some() && !args.roots.is_empty() => ShapegenConfig::default(),
        None => return Err(CliError::ConfigNotFound(start_dir.to_path_buf())),
    };

    let universe_path = args
        .input
        .or(config.input.universe.clone())
        .ok_or(CliError::MissingUniverse)?;
    let roots: Vec<TypeId> = if args.roots.is_empty() {
        config.roots()
    } else {
        args.roots.iter().map(TypeId::new).collect()
    };
    if roots.is_empty() {
        return Err(CliError::MissingRoots);
    }

    let universe = load_universe(&OsVfs, &universe_path)?;
    let compiler = Compiler::new(config.compiler)?;
    let output = compiler.compile(&universe, &roots)?;

    for diagnostic in &output.diagnostics {
        match diagnostic.severity {
            Severity::Error => eprintln!("{}", diagnostic.red()),
            Severity::Warning => eprintln!("{}", diagnostic.yellow()),
            Severity::Info => eprintln!("{diagnostic}"),
        }
    }

    let document = output.document();
    let json = if args.compact || !config.output.pretty {
        serde_json::to_string(&document)
    } else {
        serde_json::to_string_pretty(&document)
    }
    .context("Failed to serialize compiled model")?;

    match args.output.or(config.output.path) {
        Some(path) => {
            OsVfs
                .write_from_string(&path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), declarations = output.model.len(), "wrote model");
        }
        None => println!("{json}"),
    }
    Ok(())
}
