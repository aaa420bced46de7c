use async_trait::async_trait;
use tracing::{info, instrument};

use crate::judge::{CaseLayout, JudgeAdapter, JudgeError};

/// Adapter for hand-written cases with no remote judge behind them
#[derive(Debug, Clone)]
pub struct LocalJudge {
    layout: CaseLayout,
}

impl LocalJudge {
    pub fn new(layout: CaseLayout) -> Self {
        Self { layout }
    }
}

#[async_trait]
impl JudgeAdapter for LocalJudge {
    fn name(&self) -> &str {
        self.layout.judge()
    }

    fn layout(&self) -> &CaseLayout {
        &self.layout
    }

    /// Nothing to fetch; reports `false` so callers fall through to whatever exists
    #[instrument(skip(self), fields(judge = self.name(), problem = self.layout.problem()))]
    async fn download(&self) -> Result<bool, JudgeError> {
        info!(
            directory = %self.layout.directory().display(),
            "no remote judge to download from, add cases with `add-case`"
        );
        Ok(false)
    }
}
