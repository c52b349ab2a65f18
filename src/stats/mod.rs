pub mod exec;
pub mod output;

pub use exec::exec;
pub use output::{output_console, output_json, output_ndjson};

use crate::model::{CommitSummary, LineRecord, Stat};
use crate::util::format_percent;
use serde::Serialize;
use std::collections::HashMap;

/// Aggregate figures over the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CodebaseStats {
    pub total_lines: usize,
    pub total_commits: usize,
    pub total_files: usize,
    pub avg_file_length: u64,
    pub avg_line_length: u64,
    pub longest_file: Option<String>,
    pub max_file_length: usize,
    pub longest_line: u32,
    pub max_depth: u32,
}

struct FileAccum {
    rows: usize,
    max_line: u32,
}

/// Compute the dataset statistics. Means are rounded to the nearest integer;
/// an empty dataset yields all zeros.
pub fn summarize(records: &[LineRecord], commits: &[CommitSummary]) -> CodebaseStats {
    let mut order: Vec<&str> = Vec::new();
    let mut files: HashMap<&str, FileAccum> = HashMap::new();

    for record in records {
        let entry = files.entry(record.file.as_str()).or_insert_with(|| {
            order.push(record.file.as_str());
            FileAccum { rows: 0, max_line: 0 }
        });
        entry.rows += 1;
        entry.max_line = entry.max_line.max(record.line);
    }

    // First file reaching the maximum row count wins ties.
    let mut longest: Option<(&str, usize)> = None;
    for &name in &order {
        let rows = files[name].rows;
        if longest.map_or(true, |(_, best)| rows > best) {
            longest = Some((name, rows));
        }
    }

    let file_length_sum: u64 = files.values().map(|f| f.max_line as u64).sum();
    let line_length_sum: u64 = records.iter().map(|r| r.length as u64).sum();

    CodebaseStats {
        total_lines: records.len(),
        total_commits: commits.len(),
        total_files: files.len(),
        avg_file_length: rounded_mean(file_length_sum, files.len()),
        avg_line_length: rounded_mean(line_length_sum, records.len()),
        longest_file: longest.map(|(name, _)| name.to_string()),
        max_file_length: longest.map_or(0, |(_, rows)| rows),
        longest_line: records.iter().map(|r| r.length).max().unwrap_or(0),
        max_depth: records.iter().map(|r| r.depth).max().unwrap_or(0),
    }
}

impl CodebaseStats {
    /// Ordered label/value pairs for display.
    pub fn pairs(&self) -> Vec<Stat> {
        vec![
            Stat::new("Total LOC", self.total_lines),
            Stat::new("Total commits", self.total_commits),
            Stat::new("Number of files", self.total_files),
            Stat::new("Average file length (lines)", self.avg_file_length),
            Stat::new("Average line length", self.avg_line_length),
            Stat::new("Longest file", self.longest_file.as_deref().unwrap_or("-")),
            Stat::new("Maximum file length (lines)", self.max_file_length),
            Stat::new("Longest line length", self.longest_line),
            Stat::new("Maximum depth", self.max_depth),
        ]
    }
}

fn rounded_mean(sum: u64, count: usize) -> u64 {
    if count == 0 {
        0
    } else {
        (sum as f64 / count as f64).round() as u64
    }
}

/// Line count of one `type` value within a set of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeShare {
    #[serde(rename = "type")]
    pub kind: String,
    pub lines: usize,
    pub share: f64,
}

impl TypeShare {
    pub fn display(&self) -> String {
        format!("{} lines ({})", self.lines, format_percent(self.share))
    }
}

/// Count rows per `type`, ordered by first appearance.
pub fn type_breakdown<'a, I>(lines: I) -> Vec<TypeShare>
where
    I: IntoIterator<Item = &'a LineRecord>,
{
    let mut shares: Vec<TypeShare> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut total = 0usize;

    for line in lines {
        total += 1;
        let slot = *index.entry(line.kind.as_str()).or_insert_with(|| {
            shares.push(TypeShare {
                kind: line.kind.clone(),
                lines: 0,
                share: 0.0,
            });
            shares.len() - 1
        });
        shares[slot].lines += 1;
    }

    for share in &mut shares {
        share.share = share.lines as f64 / total as f64;
    }
    shares
}

/// Statistics scoped to a brushed subset of commits.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionStats {
    pub commits: usize,
    pub total_lines: usize,
    pub avg_line_length: u64,
}

impl SelectionStats {
    pub fn pairs(&self) -> Vec<Stat> {
        vec![
            Stat::new("Commits", self.commits),
            Stat::new("Total lines", self.total_lines),
            Stat::new("Average line length", self.avg_line_length),
        ]
    }
}

pub fn selection_stats(selected: &[&CommitSummary], records: &[LineRecord]) -> SelectionStats {
    let total_lines: usize = selected.iter().map(|c| c.total_lines).sum();
    let length_sum: u64 = selected
        .iter()
        .flat_map(|c| c.lines(records))
        .map(|r| r.length as u64)
        .sum();
    SelectionStats {
        commits: selected.len(),
        total_lines,
        avg_line_length: rounded_mean(length_sum, total_lines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commits::process_commits;
    use crate::commits::tests::record;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<LineRecord> {
        vec![
            record("a", "index.js", 1, "js", 10, "2025-02-10T14:30:00-08:00"),
            record("a", "index.js", 2, "js", 20, "2025-02-10T14:30:00-08:00"),
            record("b", "style.css", 1, "css", 5, "2025-02-11T09:00:00-08:00"),
        ]
    }

    #[test]
    fn three_row_example() {
        let records = sample();
        let commits = process_commits(&records, "");
        let stats = summarize(&records, &commits);
        assert_eq!(stats.total_lines, 3);
        assert_eq!(stats.total_commits, 2);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.longest_file.as_deref(), Some("index.js"));
        assert_eq!(stats.max_file_length, 2);
        assert_eq!(stats.longest_line, 20);
        // (10 + 20 + 5) / 3 = 11.67
        assert_eq!(stats.avg_line_length, 12);
        // index.js -> 2, style.css -> 1
        assert_eq!(stats.avg_file_length, 2);

        let pairs = stats.pairs();
        assert_eq!(pairs[0].label, "Total LOC");
        assert_eq!(pairs[0].value, "3");
        assert_eq!(pairs[1].label, "Total commits");
        assert_eq!(pairs[1].value, "2");
    }

    #[test]
    fn file_length_uses_highest_line_number() {
        let records = vec![
            record("a", "big.js", 40, "js", 1, "2025-02-10T08:00:00Z"),
            record("a", "big.js", 3, "js", 1, "2025-02-10T08:00:00Z"),
        ];
        let stats = summarize(&records, &process_commits(&records, ""));
        assert_eq!(stats.avg_file_length, 40);
        assert_eq!(stats.max_file_length, 2);
    }

    #[test]
    fn empty_dataset_is_all_zero() {
        let stats = summarize(&[], &[]);
        assert_eq!(stats, CodebaseStats::default());
        assert_eq!(stats.pairs()[5].value, "-");
    }

    #[test]
    fn breakdown_percentages_sum_to_one_hundred() {
        let records = vec![
            record("a", "x.js", 1, "js", 1, "2025-02-10T08:00:00Z"),
            record("a", "x.css", 1, "css", 1, "2025-02-10T08:00:00Z"),
            record("a", "x.html", 1, "html", 1, "2025-02-10T08:00:00Z"),
        ];
        let shares = type_breakdown(&records);
        let kinds: Vec<&str> = shares.iter().map(|s| s.kind.as_str()).collect();
        assert_eq!(kinds, vec!["js", "css", "html"]);
        let total: f64 = shares.iter().map(|s| (s.share * 1000.0).round() / 10.0).sum();
        assert!((total - 100.0).abs() <= 0.15, "sum was {total}");
        assert_eq!(shares[0].display(), "1 lines (33.3%)");
    }

    #[test]
    fn breakdown_of_nothing_is_empty() {
        assert!(type_breakdown(std::iter::empty()).is_empty());
    }

    #[test]
    fn selection_stats_scope_to_selected_commits() {
        let records = sample();
        let commits = process_commits(&records, "");
        let selected: Vec<&CommitSummary> = commits.iter().take(1).collect();
        let stats = selection_stats(&selected, &records);
        assert_eq!(stats, SelectionStats { commits: 1, total_lines: 2, avg_line_length: 15 });
        assert_eq!(selection_stats(&[], &records), SelectionStats::default());
    }
}
