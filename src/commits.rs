use crate::model::{CommitSummary, LineRecord};
use std::collections::HashMap;
use tracing::debug;

/// Permalink for a commit: the repository base URL with the id appended.
pub fn commit_url(base: &str, id: &str) -> String {
    format!("{base}{id}")
}

/// Group line records by commit id, in order of first appearance.
///
/// Author, date, time, timezone and timestamp come from the first row of each
/// group. Later rows are not compared against it.
pub fn process_commits(records: &[LineRecord], repo_url: &str) -> Vec<CommitSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();

    for (idx, record) in records.iter().enumerate() {
        groups
            .entry(record.commit.as_str())
            .or_insert_with(|| {
                order.push(record.commit.as_str());
                Vec::new()
            })
            .push(idx);
    }

    let commits: Vec<CommitSummary> = order
        .into_iter()
        .filter_map(|id| {
            let rows = groups.remove(id)?;
            let first = &records[*rows.first()?];
            Some(CommitSummary::new(
                id.to_string(),
                commit_url(repo_url, id),
                first,
                rows,
            ))
        })
        .collect();

    debug!(rows = records.len(), commits = commits.len(), "aggregated commits");
    commits
}

pub fn find_commit<'a>(commits: &'a [CommitSummary], id: &str) -> Option<&'a CommitSummary> {
    commits
        .iter()
        .find(|c| c.id == id)
        .or_else(|| {
            let mut prefixed = commits.iter().filter(|c| c.id.starts_with(id));
            match (prefixed.next(), prefixed.next()) {
                (Some(only), None) => Some(only),
                _ => None,
            }
        })
}
