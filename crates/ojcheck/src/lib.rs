//! A helper for checking competitive-programming solutions.
//!
//! ojcheck compiles a solution written in any of a fixed set of languages,
//! runs it against the sample cases of a judge problem and compares the
//! output with the expected output.
//!
//! # Features
//!
//! - **Many toolchains**: C, C++, Java, Python, Ruby, Haskell, Go and more, picked by file extension.
//! - **Two comparison policies**: external line diff, or floating-point comparison with a tolerance.
//! - **Self-seeding**: cases without expected output record the first run as the baseline.
//! - **TOML configuration**: interpreter selection and per-toolchain command overrides.

pub use compare::{CompareError, Comparator, Comparison, DiffComparator, FloatComparator};
pub use config::{
    ComparatorConfig, Config, ConfigError, EXAMPLE_CONFIG, InterpreterSelection, PythonRuntime,
    RubyRuntime, ToolchainOverride,
};
pub use harness::{Harness, HarnessError};
pub use judge::{
    CaseLayout, JudgeAdapter, JudgeError, LocalJudge, TemplateCopy, add_case_template,
    create_solution_template,
};
pub use program::{Program, ProgramError, Toolchain, ToolchainRegistry};
pub use types::{CompileResult, ExecutionResult, Outcome, Verdict};

pub mod compare;
pub mod config;
pub mod harness;
pub mod judge;
pub mod program;
pub mod types;
