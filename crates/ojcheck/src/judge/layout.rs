use std::path::{Path, PathBuf};

/// Naming convention for test case files of one problem.
///
/// Files live in `directory` as `<judge>.<problem>.<index>.in.txt` and
/// `<judge>.<problem>.<index>.out.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseLayout {
    directory: PathBuf,
    judge: String,
    problem: String,
}

impl CaseLayout {
    pub fn new(
        directory: impl Into<PathBuf>,
        judge: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            judge: judge.into(),
            problem: problem.into(),
        }
    }

    /// Layout for a problem inside a contest; the contest ID prefixes the problem ID
    pub fn for_contest(
        directory: impl Into<PathBuf>,
        judge: impl Into<String>,
        contest: Option<&str>,
        problem: &str,
    ) -> Self {
        let problem = match contest {
            Some(contest) => format!("{contest}{problem}"),
            None => problem.to_owned(),
        };
        Self::new(directory, judge, problem)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn judge(&self) -> &str {
        &self.judge
    }

    pub fn problem(&self) -> &str {
        &self.problem
    }

    pub fn input_file_name(&self, index: u32) -> String {
        format!("{}.{}.{index}.in.txt", self.judge, self.problem)
    }

    pub fn output_file_name(&self, index: u32) -> String {
        format!("{}.{}.{index}.out.txt", self.judge, self.problem)
    }

    pub fn input_path(&self, index: u32) -> PathBuf {
        self.directory.join(self.input_file_name(index))
    }

    pub fn output_path(&self, index: u32) -> PathBuf {
        self.directory.join(self.output_file_name(index))
    }

    /// Source file used when none is given explicitly
    pub fn default_source(&self) -> PathBuf {
        PathBuf::from(format!("{}.cpp", self.problem))
    }
}
