//! Minimal file system abstraction so configuration and universe loading can
//! be exercised in memory.

use std::io::Result;
use std::path::Path;

/// Virtual File System trait
///
/// - **`exists(path)`**: `true` for a file or a directory.
/// - **`is_dir(path)`**: `true` only for a directory.
/// - **`write_from_string(path, content)`**: creates parent directories as needed.
pub trait Vfs {
    /// Read a file to a string. Fails for missing paths and directories.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write a string to a file, overwriting it.
    fn write_from_string(&self, path: &Path, content: &str) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;
}

pub use memory::MemoryVfs;
pub use os::OsVfs;

mod memory;
mod os;
