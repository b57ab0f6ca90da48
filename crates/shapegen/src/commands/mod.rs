pub mod check_config;
pub mod compile;
pub mod schema;

pub use check_config::*;
pub use compile::*;
pub use schema::*;

use crate::error::CliError;
use shapegen_common::config::{ShapegenConfig, discover_config};
use shapegen_common::vfs::OsVfs;
use std::path::{Path, PathBuf};

/// An explicit configuration path, or the nearest one above `start_dir`.
pub(crate) fn locate_config(explicit: Option<PathBuf>, start_dir: &Path) -> Option<PathBuf> {
    explicit.or_else(|| discover_config(&OsVfs, start_dir))
}

pub(crate) fn load_config(path: &Path) -> Result<ShapegenConfig, CliError> {
    Ok(ShapegenConfig::load(path)?)
}
