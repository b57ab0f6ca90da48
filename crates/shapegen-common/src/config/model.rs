use serde::{Deserialize, Serialize};
use shapegen_core::{Settings, TypeId};
use std::path::{Path, PathBuf};

/// Root configuration from shapegen.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShapegenConfig {
    /// Compiler settings
    #[serde(default)]
    pub compiler: Settings,

    /// Where the type universe comes from
    #[serde(default)]
    pub input: InputSection,

    /// Where the compiled model goes
    #[serde(default)]
    pub output: OutputSection,
}

impl ShapegenConfig {
    /// Root type identities, in configured order.
    pub fn roots(&self) -> Vec<TypeId> {
        self.input.roots.iter().map(TypeId::new).collect()
    }

    /// Rebase relative input/output paths onto the directory holding the
    /// configuration file.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        if let Some(universe) = &mut self.input.universe {
            if universe.is_relative() {
                *universe = base_dir.join(&*universe);
            }
        }
        if let Some(path) = &mut self.output.path {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        }
    }
}

/// [input] section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InputSection {
    /// Universe JSON file
    pub universe: Option<PathBuf>,
    /// Root type identities
    #[serde(default)]
    pub roots: Vec<String>,
}

/// [output] section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Output file; stdout when absent
    pub path: Option<PathBuf>,
    /// Pretty-print the JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: None,
            pretty: default_pretty(),
        }
    }
}

pub(crate) fn default_pretty() -> bool {
    true
}
