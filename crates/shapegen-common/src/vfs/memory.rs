use super::Vfs;
use std::collections::HashMap;
use std::io::{Error, ErrorKind, Result};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// In-Memory File System implementation (for testing)
#[derive(Clone, Default, Debug)]
pub struct MemoryVfs {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemoryVfs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding for tests.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        if let Ok(mut files) = self.files.lock() {
            files.insert(Self::normalize_path(path.as_ref()), content.to_string());
        }
        self
    }

    fn normalize_path(path: &Path) -> PathBuf {
        let normalized: PathBuf = path
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        if normalized.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            normalized
        }
    }

    fn files(&self) -> Result<MutexGuard<'_, HashMap<PathBuf, String>>> {
        self.files
            .lock()
            .map_err(|_| Error::other("memory vfs lock poisoned"))
    }

    fn has_children(files: &HashMap<PathBuf, String>, path: &Path) -> bool {
        if path == Path::new(".") || path == Path::new("/") {
            return !files.is_empty();
        }
        files.keys().any(|k| k.starts_with(path) && k != path)
    }
}

impl Vfs for MemoryVfs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = Self::normalize_path(path);
        self.files()?.get(&path).cloned().ok_or_else(|| {
            Error::new(ErrorKind::NotFound, format!("File not found: {}", path.display()))
        })
    }

    fn write_from_string(&self, path: &Path, content: &str) -> Result<()> {
        let path = Self::normalize_path(path);
        self.files()?.insert(path, content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let path = Self::normalize_path(path);
        self.files()
            .map(|files| files.contains_key(&path) || Self::has_children(&files, &path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = Self::normalize_path(path);
        self.files()
            .map(|files| !files.contains_key(&path) && Self::has_children(&files, &path))
            .unwrap_or(false)
    }
}
