use std::fmt;
use std::time::Duration;

/// Result of running a solution against one test case
#[derive(Debug, Clone, Default)]
pub struct ExecutionResult {
    /// Wall clock time from spawn to exit
    pub wall_time: Duration,

    /// Exit code if the program exited normally
    pub exit_code: Option<i32>,

    /// Signal number if the program was killed by a signal
    pub signal: Option<i32>,
}

impl ExecutionResult {
    /// Check if the execution was successful (exited with code 0)
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Result of a compilation
#[derive(Debug, Clone, Default)]
pub struct CompileResult {
    /// Whether compilation succeeded
    pub success: bool,

    /// Exit code of the compiler, if one was spawned and exited normally
    pub exit_code: Option<i32>,

    /// Compiler output (stdout followed by stderr)
    pub output: String,
}

impl CompileResult {
    /// Result for toolchains with no build step
    pub fn skipped() -> Self {
        Self {
            success: true,
            exit_code: None,
            output: String::new(),
        }
    }
}

/// Overall outcome of a check run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No test case files were found
    NoInputFiles,

    /// Every compared case matched
    Ok,

    /// At least one compared case did not match
    WrongAnswer,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::NoInputFiles => "No input files",
            Outcome::Ok => "OK",
            Outcome::WrongAnswer => "WrongAnswer",
        };
        write!(f, "{s}")
    }
}

/// Aggregate of per-case comparator outcomes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Verdict {
    /// Number of cases executed
    pub total: u32,

    /// Number of cases whose output did not match the expected output
    pub mismatches: u32,

    /// Number of cases whose expected output was recorded from this run
    pub seeded: u32,

    /// Longest wall clock time observed across all cases
    pub max_time: Duration,
}

impl Verdict {
    /// Fold one executed case into the aggregate.
    ///
    /// `matched` is `None` for cases without an expected output file.
    pub fn record(&mut self, wall_time: Duration, matched: Option<bool>) {
        self.total += 1;
        self.max_time = self.max_time.max(wall_time);
        match matched {
            Some(true) => {}
            Some(false) => self.mismatches += 1,
            None => self.seeded += 1,
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.total == 0 {
            Outcome::NoInputFiles
        } else if self.mismatches == 0 {
            Outcome::Ok
        } else {
            Outcome::WrongAnswer
        }
    }

    /// Summary line printed at the end of a run
    pub fn summary(&self) -> String {
        let max = self.max_time.as_secs_f64();
        match self.outcome() {
            Outcome::NoInputFiles => "No input files...".to_owned(),
            Outcome::Ok => format!("OK ({} cases) (max {max:.6} sec)", self.total),
            Outcome::WrongAnswer => format!(
                "WrongAnswer ({} WAs in {} cases) (max {max:.6} sec)",
                self.mismatches, self.total
            ),
        }
    }
}
