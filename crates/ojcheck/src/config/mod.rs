use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

pub use crate::config::toolchain::{
    CommandVars, InterpreterSelection, PythonRuntime, RubyRuntime, ToolchainOverride,
};

mod loader;
pub mod toolchain;

/// Example configuration embedded at compile time.
///
/// Written out by `ojcheck init` as a starter config file.
pub const EXAMPLE_CONFIG: &str = include_str!("../../ojcheck.example.toml");

/// Name of the per-directory configuration file
pub const LOCAL_CONFIG_NAME: &str = "ojcheck.toml";

/// Name of the configuration file looked up in `$HOME`
pub const HOME_CONFIG_NAME: &str = ".ojcheck.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] config::ConfigError),

    #[error("unknown toolchain '{0}' in overrides")]
    UnknownToolchain(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How expected and actual output are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ComparatorConfig {
    /// Line diff through the external diff program
    #[default]
    Exact,

    /// Line by line numeric comparison
    FloatingPoint {
        /// Absolute and relative error bound
        tolerance: f64,
    },
}

/// Config for ojcheck
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding the `.in.txt` / `.out.txt` case files
    #[serde(default = "default_testcase_directory")]
    pub testcase_directory: PathBuf,

    /// File receiving the standard output of the latest case
    #[serde(default = "default_scratch_output")]
    pub scratch_output: PathBuf,

    /// Highest number of case indices scanned
    #[serde(default = "default_max_cases")]
    pub max_cases: u32,

    /// Path to the diff binary (uses PATH if not absolute)
    #[serde(default = "default_diff_program")]
    pub diff_program: PathBuf,

    /// Exit with a non-zero status on WrongAnswer as well
    #[serde(default)]
    pub strict_exit: bool,

    #[serde(default)]
    pub comparator: ComparatorConfig,

    #[serde(default)]
    pub interpreters: InterpreterSelection,

    /// Command overrides keyed by toolchain ID
    #[serde(default)]
    pub toolchains: HashMap<String, ToolchainOverride>,
}

impl Config {
    /// Create a new config from the embedded example
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with built-in defaults and no overrides
    pub fn empty() -> Self {
        Self {
            testcase_directory: default_testcase_directory(),
            scratch_output: default_scratch_output(),
            max_cases: default_max_cases(),
            diff_program: default_diff_program(),
            strict_exit: false,
            comparator: ComparatorConfig::default(),
            interpreters: InterpreterSelection::default(),
            toolchains: HashMap::new(),
        }
    }

    /// Get the command override for a toolchain, if any
    pub fn toolchain_override(&self, id: &str) -> Option<&ToolchainOverride> {
        self.toolchains.get(id)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_toml(EXAMPLE_CONFIG).expect("embedded default config should be valid")
    }
}

fn default_testcase_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_scratch_output() -> PathBuf {
    PathBuf::from("out.txt")
}

fn default_max_cases() -> u32 {
    100
}

fn default_diff_program() -> PathBuf {
    PathBuf::from("diff")
}
