//! Output comparison
//!
//! Decides whether a solution's output matches the expected output, either
//! through an external line diff or by numeric comparison with a tolerance.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use crate::compare::diff::DiffComparator;
pub use crate::compare::float::FloatComparator;

use crate::config::{ComparatorConfig, Config};

mod diff;
mod float;

/// Errors that occur while comparing outputs
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to spawn diff program '{program}': {source}")]
    DiffSpawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("diff exited with status {status:?}: {stderr}")]
    DiffFailed { status: Option<i32>, stderr: String },

    #[error("{path}:{line}: '{value}' is not a floating-point number")]
    InvalidFloat {
        path: PathBuf,
        line: usize,
        value: String,
    },
}

/// Result of one comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Whether the outputs are considered equal
    pub passed: bool,

    /// Human readable diagnostic (diff output or per-line table)
    pub report: String,
}

/// Comparison policy, chosen once per run
#[derive(Debug, Clone)]
pub enum Comparator {
    Exact(DiffComparator),
    FloatingPoint(FloatComparator),
}

impl Comparator {
    pub fn from_config(config: &Config) -> Self {
        match config.comparator {
            ComparatorConfig::Exact => {
                Comparator::Exact(DiffComparator::new(config.diff_program.clone()))
            }
            ComparatorConfig::FloatingPoint { tolerance } => {
                Comparator::FloatingPoint(FloatComparator::new(tolerance))
            }
        }
    }

    /// Compare the expected output file against the actual output file
    pub async fn validate(&self, expected: &Path, actual: &Path) -> Result<Comparison, CompareError> {
        match self {
            Comparator::Exact(diff) => diff.validate(expected, actual).await,
            Comparator::FloatingPoint(float) => float.validate(expected, actual).await,
        }
    }
}
