//! Check harness
//!
//! Compiles a solution once, runs it against every contiguous test case of a
//! problem and aggregates the comparison results into a [`Verdict`].

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::compare::{CompareError, Comparator};
use crate::config::Config;
use crate::judge::JudgeAdapter;
use crate::program::{ProgramError, ToolchainRegistry};
use crate::types::Verdict;

/// Errors that abort a check run
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("compilation failed ({toolchain}) with exit code {exit_code:?}")]
    Compile {
        toolchain: &'static str,
        exit_code: Option<i32>,
        output: String,
    },

    #[error("runtime error on case #{case}: exit code {exit_code:?}, signal {signal:?}")]
    Runtime {
        case: u32,
        exit_code: Option<i32>,
        signal: Option<i32>,
    },

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| HarnessError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Compile-once, run-many, compare-each orchestrator
#[derive(Debug, Clone)]
pub struct Harness {
    registry: ToolchainRegistry,
    comparator: Comparator,
    work_dir: PathBuf,
    scratch_output: PathBuf,
    max_cases: u32,
}

impl Harness {
    /// Create a harness from configuration; artifacts and the scratch file go in `work_dir`
    pub fn new(config: &Config, work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        Self {
            registry: ToolchainRegistry::from_config(config),
            comparator: Comparator::from_config(config),
            scratch_output: work_dir.join(&config.scratch_output),
            work_dir,
            max_cases: config.max_cases,
        }
    }

    /// Replace the comparison policy
    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn scratch_output(&self) -> &Path {
        &self.scratch_output
    }

    /// Check `source` against the cases provided by `judge`.
    ///
    /// Compile and runtime failures abort the run immediately. Cases are
    /// scanned from index 0 and the scan stops at the first missing input
    /// file. A case with no expected output file gets one, copied from this
    /// run's output, and is not counted as a mismatch.
    #[instrument(skip(self, judge), fields(judge = judge.name(), source = %source.display()))]
    pub async fn check(&self, judge: &dyn JudgeAdapter, source: &Path) -> Result<Verdict, HarnessError> {
        println!("compiling...");
        let program = self.registry.program(source, &self.work_dir);
        let compiled = program.compile().await?;
        if !compiled.success {
            println!("CompileError");
            if !compiled.output.is_empty() {
                println!("{}", compiled.output.trim_end());
            }
            return Err(HarnessError::Compile {
                toolchain: program.toolchain().id(),
                exit_code: compiled.exit_code,
                output: compiled.output,
            });
        }

        if !exists(&judge.input_path(0)).await? || !exists(&judge.output_path(0)).await? {
            println!("downloading...");
            match judge.download().await {
                Ok(written) => debug!(written, "download finished"),
                Err(e) => warn!("download failed: {e}"),
            }
        }

        let mut verdict = Verdict::default();

        for index in 0..self.max_cases {
            let input = judge.input_path(index);
            if !exists(&input).await? {
                debug!(index, "no more input files");
                break;
            }

            println!("----- Case #{index} -----");

            let result = program.execute(&input, &self.scratch_output).await?;
            if !result.is_success() {
                match (result.exit_code, result.signal) {
                    (_, Some(signal)) => println!("RuntimeError? case #{index} killed by signal {signal}"),
                    (code, None) => println!("RuntimeError? case #{index} exited with status {code:?}"),
                }
                return Err(HarnessError::Runtime {
                    case: index,
                    exit_code: result.exit_code,
                    signal: result.signal,
                });
            }
            let secs = result.wall_time.as_secs_f64();

            let expected = judge.output_path(index);
            if exists(&expected).await? {
                let comparison = self
                    .comparator
                    .validate(&expected, &self.scratch_output)
                    .await?;
                if !comparison.report.is_empty() {
                    print!("{}", comparison.report);
                }
                if comparison.passed {
                    println!("ok ({secs:.6} sec)");
                } else {
                    println!("WA ({secs:.6} sec)");
                }
                verdict.record(result.wall_time, Some(comparison.passed));
            } else {
                tokio::fs::copy(&self.scratch_output, &expected)
                    .await
                    .map_err(HarnessError::io(&expected))?;
                let output = tokio::fs::read(&expected)
                    .await
                    .map_err(HarnessError::io(&expected))?;
                print!("{}", String::from_utf8_lossy(&output));
                println!("seeded {} ({secs:.6} sec)", expected.display());
                verdict.record(result.wall_time, None);
            }
        }

        println!("{}", verdict.summary());
        info!(
            outcome = %verdict.outcome(),
            total = verdict.total,
            mismatches = verdict.mismatches,
            seeded = verdict.seeded,
            max_time = ?verdict.max_time,
            "check complete"
        );

        Ok(verdict)
    }
}

async fn exists(path: &Path) -> Result<bool, HarnessError> {
    tokio::fs::try_exists(path)
        .await
        .map_err(HarnessError::io(path))
}
