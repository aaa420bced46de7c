use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::judge::{CaseLayout, JudgeError};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> JudgeError + '_ {
    move |source| JudgeError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Create empty input and output files at the first free case index.
///
/// Returns the index used, or `None` if all `max_cases` slots are taken.
#[instrument(skip(layout), fields(problem = layout.problem()))]
pub async fn add_case_template(
    layout: &CaseLayout,
    max_cases: u32,
) -> Result<Option<u32>, JudgeError> {
    let directory = layout.directory();
    tokio::fs::create_dir_all(directory)
        .await
        .map_err(io_error(directory))?;

    for index in 0..max_cases {
        let input = layout.input_path(index);
        if tokio::fs::try_exists(&input)
            .await
            .map_err(io_error(&input))?
        {
            continue;
        }
        let output = layout.output_path(index);
        tokio::fs::write(&input, b"")
            .await
            .map_err(io_error(&input))?;
        tokio::fs::write(&output, b"")
            .await
            .map_err(io_error(&output))?;
        debug!(index, "created case template");
        return Ok(Some(index));
    }

    Ok(None)
}

/// Copies made by [`create_solution_template`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCopy {
    /// Where the previous source was saved, if there was one
    pub backup: Option<PathBuf>,
}

/// Replace `source` with a copy of `template`, saving the old source as `<source>.bak`
#[instrument]
pub async fn create_solution_template(
    source: &Path,
    template: &Path,
) -> Result<TemplateCopy, JudgeError> {
    let backup = if tokio::fs::try_exists(source)
        .await
        .map_err(io_error(source))?
    {
        let mut name = source.as_os_str().to_owned();
        name.push(".bak");
        let backup = PathBuf::from(name);
        tokio::fs::copy(source, &backup)
            .await
            .map_err(io_error(&backup))?;
        Some(backup)
    } else {
        None
    };

    tokio::fs::copy(template, source)
        .await
        .map_err(io_error(template))?;

    Ok(TemplateCopy { backup })
}
