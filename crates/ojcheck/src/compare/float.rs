use std::fmt::Write as _;
use std::path::Path;

use tracing::{debug, instrument};

use crate::compare::{CompareError, Comparison};

/// Relative difference reported when the actual value is zero
const ZERO_RELDIFF: f64 = 1e9;

/// Line by line numeric comparison.
///
/// Each line of both files holds one floating-point literal. A pair passes
/// when the absolute difference or the relative difference (against the
/// actual value) is below the tolerance. Files with different line counts
/// fail to parse, since the shorter side reads as an empty line.
#[derive(Debug, Clone, Copy)]
pub struct FloatComparator {
    tolerance: f64,
}

impl FloatComparator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Check a single pair of values
    pub fn accepts(&self, expected: f64, actual: f64) -> bool {
        let (diff, reldiff) = differences(expected, actual);
        diff.abs() < self.tolerance || reldiff.abs() < self.tolerance
    }

    #[instrument(skip(self))]
    pub async fn validate(&self, expected: &Path, actual: &Path) -> Result<Comparison, CompareError> {
        let expected_text = read(expected).await?;
        let actual_text = read(actual).await?;
        self.compare(expected, &expected_text, actual, &actual_text)
    }

    /// Compare file contents; paths are used for error locations
    pub fn compare(
        &self,
        expected_path: &Path,
        expected: &str,
        actual_path: &Path,
        actual: &str,
    ) -> Result<Comparison, CompareError> {
        let mut report = format!(
            "{:<25} {:<25}   {:<15} {}\n",
            "answer", "output", "diff", "reldiff"
        );
        let mut passed = true;

        let mut expected_lines = expected.lines();
        let mut actual_lines = actual.lines();
        let mut line = 0;
        loop {
            let (e, a) = match (expected_lines.next(), actual_lines.next()) {
                (None, None) => break,
                (e, a) => (e.unwrap_or("").trim(), a.unwrap_or("").trim()),
            };
            line += 1;

            let expected_value = parse(expected_path, line, e)?;
            let actual_value = parse(actual_path, line, a)?;
            let (diff, reldiff) = differences(expected_value, actual_value);

            let ok = self.accepts(expected_value, actual_value);
            if !ok {
                passed = false;
            }
            let separator = if ok { ' ' } else { '|' };
            let _ = writeln!(
                report,
                "{e:<25} {a:<25} {separator} {diff:<15.6e} {reldiff:.6e}"
            );
        }

        debug!(passed, lines = line, "float comparison complete");

        Ok(Comparison { passed, report })
    }
}

fn differences(expected: f64, actual: f64) -> (f64, f64) {
    let diff = actual - expected;
    let reldiff = if actual != 0.0 {
        diff / actual
    } else {
        ZERO_RELDIFF
    };
    (diff, reldiff)
}

fn parse(path: &Path, line: usize, value: &str) -> Result<f64, CompareError> {
    value.parse().map_err(|_| CompareError::InvalidFloat {
        path: path.to_path_buf(),
        line,
        value: value.to_owned(),
    })
}

async fn read(path: &Path) -> Result<String, CompareError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CompareError::Read {
            path: path.to_path_buf(),
            source,
        })
}
