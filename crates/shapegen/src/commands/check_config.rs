use super::{load_config, locate_config};
use crate::error::CliError;
use owo_colors::OwoColorize;
use shapegen_core::Compiler;
use std::path::{Path, PathBuf};

/// Load a configuration file and validate its compiler settings without
/// compiling anything.
pub fn run_check_config(config: Option<PathBuf>, start_dir: &Path) -> Result<(), CliError> {
    let path = locate_config(config, start_dir)
        .ok_or_else(|| CliError::ConfigNotFound(start_dir.to_path_buf()))?;
    let config = load_config(&path)?;
    Compiler::new(config.compiler.clone())?;

    println!("{} {}", "ok".green().bold(), path.display());
    println!("  roots: {}", config.input.roots.len());
    match &config.input.universe {
        Some(universe) => println!("  universe: {}", universe.display()),
        None => println!("  universe: {}", "not set".yellow()),
    }
    println!(
        "  custom type mappings: {}",
        config.compiler.custom_type_mappings.len()
    );
    Ok(())
}
