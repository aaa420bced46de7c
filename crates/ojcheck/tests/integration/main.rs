//! Integration tests for ojcheck
//!
//! Solutions are `/bin/sh` scripts run through the generic toolchain, so
//! these tests only need a POSIX shell and GNU diff. Tests that need a real
//! compiler are marked `#[ignore]`. To include them:
//!   cargo test -p ojcheck -- --include-ignored

#![cfg(unix)]

use std::fs;
use std::path::PathBuf;

use ojcheck::{CaseLayout, Config, Harness, LocalJudge, ToolchainOverride};
use tempfile::TempDir;

mod check_outcomes;
mod execution;

const FIXTURES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

/// A temporary work directory with one problem's case files
pub(crate) struct Workspace {
    dir: TempDir,
    layout: CaseLayout,
}

impl Workspace {
    pub(crate) fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let cases = dir.path().join("cases");
        fs::create_dir(&cases).expect("Failed to create cases dir");
        let layout = CaseLayout::new(cases, "local", "1000");
        Self { dir, layout }
    }

    pub(crate) fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub(crate) fn layout(&self) -> &CaseLayout {
        &self.layout
    }

    pub(crate) fn judge(&self) -> LocalJudge {
        LocalJudge::new(self.layout.clone())
    }

    /// Write a shell solution; `.sh` resolves to the generic toolchain
    pub(crate) fn solution(&self, body: &str) -> PathBuf {
        let path = self.dir.path().join("solution.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write solution");
        path
    }

    /// Write case `index`; `expected` of `None` leaves the output file absent
    pub(crate) fn case(&self, index: u32, input: &str, expected: Option<&str>) {
        fs::write(self.layout.input_path(index), input).expect("Failed to write input");
        if let Some(expected) = expected {
            fs::write(self.layout.output_path(index), expected).expect("Failed to write output");
        }
    }

    pub(crate) fn harness(&self, config: &Config) -> Harness {
        Harness::new(config, self.dir.path())
    }
}

/// Config that runs generic solutions through `/bin/sh`.
///
/// Avoids executing a file that was just written, which can fail with
/// ETXTBSY while other test threads are spawning.
pub(crate) fn test_config() -> Config {
    let mut config = Config::empty();
    config.toolchains.insert(
        "generic".to_owned(),
        ToolchainOverride {
            run: Some(vec!["/bin/sh".to_owned(), "{source}".to_owned()]),
            ..Default::default()
        },
    );
    config
}

/// Echo the first input line back
pub(crate) const ECHO: &str = "read x\necho \"$x\"";
