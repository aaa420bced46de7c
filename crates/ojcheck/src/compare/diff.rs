use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, instrument};

use crate::compare::{CompareError, Comparison};

/// Side-by-side diff arguments.
///
/// Carriage returns and trailing whitespace are ignored, as are changes
/// consisting only of blank lines. Columns are limited to 79 characters.
const DIFF_ARGS: [&str; 8] = [
    "-y",
    "--strip-trailing-cr",
    "--ignore-trailing-space",
    "--ignore-blank-lines",
    "-W",
    "79",
    "-a",
    "-d",
];

/// Exact comparison through an external line diff
#[derive(Debug, Clone)]
pub struct DiffComparator {
    program: PathBuf,
}

impl DiffComparator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments passed to the diff program
    pub fn args(expected: &Path, actual: &Path) -> Vec<String> {
        let mut args = vec![
            expected.to_string_lossy().into_owned(),
            actual.to_string_lossy().into_owned(),
        ];
        args.extend(DIFF_ARGS.iter().map(|s| (*s).to_owned()));
        args
    }

    /// Passes iff diff reports no differing line (exit status 0)
    #[instrument(skip(self))]
    pub async fn validate(&self, expected: &Path, actual: &Path) -> Result<Comparison, CompareError> {
        let output = Command::new(&self.program)
            .args(Self::args(expected, actual))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| CompareError::DiffSpawn {
                program: self.program.clone(),
                source,
            })?;

        let passed = match output.status.code() {
            Some(0) => true,
            Some(1) => false,
            status => {
                return Err(CompareError::DiffFailed {
                    status,
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
                });
            }
        };

        debug!(passed, "diff complete");

        Ok(Comparison {
            passed,
            report: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
