//! Judge site adapters
//!
//! An adapter owns the case files of one problem: it names them and can be
//! asked to fetch the ones that are missing. Scraping and submission for
//! particular sites live outside this crate and plug in through
//! [`JudgeAdapter`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

pub use crate::judge::layout::CaseLayout;
pub use crate::judge::local::LocalJudge;
pub use crate::judge::template::{TemplateCopy, add_case_template, create_solution_template};

mod layout;
mod local;
mod template;

/// Errors reported by judge adapters
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("{judge} does not support {operation}")]
    Unsupported {
        judge: String,
        operation: &'static str,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of test case files for one problem
#[async_trait]
pub trait JudgeAdapter: Send + Sync {
    /// Adapter identity, used in case file names
    fn name(&self) -> &str;

    fn layout(&self) -> &CaseLayout;

    fn input_path(&self, index: u32) -> PathBuf {
        self.layout().input_path(index)
    }

    fn output_path(&self, index: u32) -> PathBuf {
        self.layout().output_path(index)
    }

    /// Populate missing case files.
    ///
    /// Returns whether any files were written. Failure is not fatal to a
    /// check run; it just leaves fewer cases to find.
    async fn download(&self) -> Result<bool, JudgeError>;

    /// Submit a solution to the judge
    async fn submit(&self, source: &Path) -> Result<(), JudgeError> {
        let _ = source;
        Err(JudgeError::Unsupported {
            judge: self.name().to_owned(),
            operation: "submission",
        })
    }
}
