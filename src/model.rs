use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::{CodebaseStats, SelectionStats, TypeShare};

pub const SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_DATA: &str = "loc.csv";
pub const DEFAULT_REPO_URL: &str = "https://github.com/YOUR_REPO/commit/";
pub const DEFAULT_WIDTH: f64 = 1000.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

/// One row of `loc.csv`: a single line of source at a given commit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRecord {
    pub commit: String,
    pub file: String,
    pub line: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub length: u32,
    pub depth: u32,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
}

/// Per-commit summary built from every [`LineRecord`] sharing a commit id.
///
/// The constituent rows are referenced by their position in the loaded
/// dataset and never serialized; use [`CommitSummary::lines`] to drill down.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitSummary {
    pub id: String,
    pub url: String,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    #[serde(skip)]
    rows: Vec<usize>,
}

impl CommitSummary {
    pub(crate) fn new(id: String, url: String, first: &LineRecord, rows: Vec<usize>) -> Self {
        Self {
            id,
            url,
            author: first.author.clone(),
            date: first.date,
            time: first.time.clone(),
            timezone: first.timezone.clone(),
            datetime: first.datetime,
            hour_frac: crate::util::hour_frac(&first.datetime),
            total_lines: rows.len(),
            rows,
        }
    }

    /// Constituent rows of this commit, resolved against the dataset it was
    /// aggregated from.
    pub fn lines<'a>(&'a self, records: &'a [LineRecord]) -> impl Iterator<Item = &'a LineRecord> + 'a {
        self.rows.iter().filter_map(move |&i| records.get(i))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

impl Stat {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub stats: CodebaseStats,
    pub types: Vec<TypeShare>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub commits: Vec<CommitSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitLinesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub commit: CommitSummary,
    pub lines: Vec<LineRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub rect: Option<[f64; 4]>,
    pub label: String,
    pub selected: Vec<String>,
    pub types: Vec<TypeShare>,
    pub stats: SelectionStats,
}
