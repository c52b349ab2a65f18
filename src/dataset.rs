use crate::cli::CommonArgs;
use crate::commits::process_commits;
use crate::loader::load_records;
use crate::model::{CommitSummary, LineRecord};
use anyhow::Context;

/// Loaded rows plus their commit summaries.
pub struct Dataset {
    pub source: String,
    pub records: Vec<LineRecord>,
    pub commits: Vec<CommitSummary>,
}

impl Dataset {
    pub fn load(common: &CommonArgs, show_progress: bool) -> anyhow::Result<Self> {
        let records = load_records(&common.data, common.timeout.into(), show_progress)
            .with_context(|| format!("Failed to load dataset from {}", common.data))?;
        Ok(Self::from_records(common.data.clone(), records, &common.repo_url))
    }

    pub fn from_records(source: String, records: Vec<LineRecord>, repo_url: &str) -> Self {
        let commits = process_commits(&records, repo_url);
        Self {
            source,
            records,
            commits,
        }
    }
}
