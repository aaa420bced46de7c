//! Solution programs
//!
//! A [`Program`] is a solution source file bound to a [`Toolchain`]. It knows
//! how to build a runnable artifact and how to invoke it with redirected I/O.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, instrument};

pub use crate::program::registry::ToolchainRegistry;
pub use crate::program::toolchain::Toolchain;

use crate::config::{CommandVars, InterpreterSelection, ToolchainOverride};
use crate::types::{CompileResult, ExecutionResult};

mod registry;
mod toolchain;

/// File name of the build artifact in the work directory
pub const ARTIFACT_NAME: &str = if cfg!(windows) { "a.exe" } else { "a.out" };

/// Errors that occur while running a program
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("{toolchain} has an empty run command")]
    EmptyCommand { toolchain: &'static str },

    #[error("failed to open input file {path}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output file {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to spawn '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A solution that can be turned into something runnable
#[derive(Debug, Clone)]
pub struct Program {
    source: PathBuf,
    work_dir: PathBuf,
    toolchain: Toolchain,
    selection: InterpreterSelection,
    overrides: Option<ToolchainOverride>,
}

/// Owned values behind [`CommandVars`]
struct ProgramPaths {
    source: String,
    binary: String,
    class: String,
    dir: String,
}

impl ProgramPaths {
    fn vars(&self) -> CommandVars<'_> {
        CommandVars {
            source: &self.source,
            binary: &self.binary,
            class: &self.class,
            dir: &self.dir,
        }
    }
}

impl Program {
    /// Create a program for `source`, building into `work_dir`.
    ///
    /// Relative source paths are taken relative to `work_dir`.
    pub fn new(
        source: impl AsRef<Path>,
        work_dir: impl Into<PathBuf>,
        toolchain: Toolchain,
        selection: InterpreterSelection,
        overrides: Option<ToolchainOverride>,
    ) -> Self {
        let work_dir = work_dir.into();
        let source = work_dir.join(source.as_ref());
        Self {
            source,
            work_dir,
            toolchain,
            selection,
            overrides,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn toolchain(&self) -> Toolchain {
        self.toolchain
    }

    /// Path of the compiled artifact (only meaningful for compiled toolchains)
    pub fn artifact_path(&self) -> PathBuf {
        self.work_dir.join(ARTIFACT_NAME)
    }

    fn paths(&self) -> ProgramPaths {
        let class = self
            .source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        ProgramPaths {
            source: self.source.to_string_lossy().into_owned(),
            binary: self.artifact_path().to_string_lossy().into_owned(),
            class,
            dir: self.work_dir.to_string_lossy().into_owned(),
        }
    }

    /// The build command, `None` when there is nothing to build
    pub fn compile_command(&self) -> Option<Vec<String>> {
        let paths = self.paths();
        let vars = paths.vars();
        match self.overrides.as_ref().and_then(|o| o.compile.as_ref()) {
            Some(template) => Some(ToolchainOverride::expand_command(template, &vars)),
            None => self.toolchain.compile_command(&vars),
        }
    }

    /// The argv used to invoke the runnable artifact
    pub fn execute_command(&self) -> Vec<String> {
        let paths = self.paths();
        let vars = paths.vars();
        match self.overrides.as_ref().and_then(|o| o.run.as_ref()) {
            Some(template) => ToolchainOverride::expand_command(template, &vars),
            None => self.toolchain.run_command(&vars),
        }
    }

    /// Process environment for the build and run steps.
    ///
    /// Inherits the current environment, then applies version pins and
    /// override variables.
    pub fn execution_environment(&self) -> HashMap<OsString, OsString> {
        let mut env: HashMap<OsString, OsString> = std::env::vars_os().collect();
        for (key, value) in self.toolchain.version_pins(&self.selection) {
            env.insert(key.into(), value.into());
        }
        if let Some(ref overrides) = self.overrides {
            for (key, value) in &overrides.env {
                env.insert(key.into(), value.into());
            }
        }
        env
    }

    fn command(&self, argv: &[String]) -> Result<Command, ProgramError> {
        let (program, args) = argv.split_first().ok_or(ProgramError::EmptyCommand {
            toolchain: self.toolchain.id(),
        })?;
        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(&self.work_dir)
            .env_clear()
            .envs(self.execution_environment());
        Ok(command)
    }

    /// Build the runnable artifact.
    ///
    /// Interpreted toolchains succeed without spawning anything. A compiler
    /// that cannot be spawned is reported as a failed compilation.
    #[instrument(skip(self), fields(toolchain = self.toolchain.id(), source = %self.source.display()))]
    pub async fn compile(&self) -> Result<CompileResult, ProgramError> {
        let Some(argv) = self.compile_command() else {
            debug!("nothing to compile");
            return Ok(CompileResult::skipped());
        };

        debug!(?argv, "running compiler");

        let output = match self
            .command(&argv)?
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                return Ok(CompileResult {
                    success: false,
                    exit_code: None,
                    output: format!("failed to run '{}': {e}", argv[0]),
                });
            }
        };

        // Combine stdout and stderr for compiler output
        let mut compiler_output = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !compiler_output.is_empty() && !stderr.is_empty() {
            compiler_output.push('\n');
        }
        compiler_output.push_str(&stderr);

        let success = output.status.success();
        debug!(success, exit_code = ?output.status.code(), "compilation complete");

        Ok(CompileResult {
            success,
            exit_code: output.status.code(),
            output: compiler_output,
        })
    }

    /// Run the program with stdin from `input` and stdout into `output`.
    ///
    /// Stderr is inherited. There is no time limit; the call returns when
    /// the child exits.
    #[instrument(skip(self), fields(toolchain = self.toolchain.id()))]
    pub async fn execute(&self, input: &Path, output: &Path) -> Result<ExecutionResult, ProgramError> {
        let stdin = tokio::fs::File::open(input)
            .await
            .map_err(|source| ProgramError::OpenInput {
                path: input.to_path_buf(),
                source,
            })?
            .into_std()
            .await;
        let stdout = tokio::fs::File::create(output)
            .await
            .map_err(|source| ProgramError::CreateOutput {
                path: output.to_path_buf(),
                source,
            })?
            .into_std()
            .await;

        let argv = self.execute_command();
        debug!(?argv, "executing program");

        let start = Instant::now();
        let mut child = self
            .command(&argv)?
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ProgramError::SpawnFailed {
                program: argv[0].clone(),
                source,
            })?;
        let status = child.wait().await?;
        let wall_time = start.elapsed();

        let result = ExecutionResult {
            wall_time,
            exit_code: status.code(),
            signal: exit_signal(&status),
        };

        debug!(
            wall_time = ?result.wall_time,
            exit_code = ?result.exit_code,
            signal = ?result.signal,
            "execution complete"
        );

        Ok(result)
    }
}

#[cfg(unix)]
fn exit_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}
