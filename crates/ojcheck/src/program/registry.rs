use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{Config, InterpreterSelection, ToolchainOverride};
use crate::program::{Program, Toolchain};

/// Maps source files to programs.
///
/// Holds the interpreter selection and command overrides so that every
/// program it hands out is configured the same way.
#[derive(Debug, Clone, Default)]
pub struct ToolchainRegistry {
    selection: InterpreterSelection,
    overrides: HashMap<String, ToolchainOverride>,
}

impl ToolchainRegistry {
    pub fn new(
        selection: InterpreterSelection,
        overrides: HashMap<String, ToolchainOverride>,
    ) -> Self {
        Self {
            selection,
            overrides,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.interpreters.clone(), config.toolchains.clone())
    }

    pub fn selection(&self) -> &InterpreterSelection {
        &self.selection
    }

    /// Pick the toolchain for a source file from its extension
    pub fn resolve(&self, source: &Path) -> Toolchain {
        let extension = source.extension().and_then(|ext| ext.to_str());
        Toolchain::detect(extension, &self.selection)
    }

    /// Build the program for `source`, with artifacts placed in `work_dir`
    pub fn program(&self, source: &Path, work_dir: impl Into<PathBuf>) -> Program {
        let toolchain = self.resolve(source);
        debug!(source = %source.display(), toolchain = toolchain.id(), "resolved toolchain");
        Program::new(
            source,
            work_dir,
            toolchain,
            self.selection.clone(),
            self.overrides.get(toolchain.id()).cloned(),
        )
    }

    /// Every toolchain with the configured runtimes
    pub fn toolchains(&self) -> Vec<Toolchain> {
        Toolchain::all(&self.selection)
    }

    /// Check if a toolchain's built-in commands are overridden
    pub fn is_overridden(&self, toolchain: Toolchain) -> bool {
        self.overrides.contains_key(toolchain.id())
    }
}
