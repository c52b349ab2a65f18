use crate::cli::CommonArgs;
use crate::commits::find_commit;
use crate::dataset::Dataset;
use crate::model::{CommitLinesOutput, CommitSummary, CommitsOutput, LineRecord, SCHEMA_VERSION};
use anyhow::{anyhow, Result};
use chrono::Utc;
use console::style;
use std::collections::HashSet;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool, id: Option<String>) -> Result<()> {
    let dataset = Dataset::load(&common, !(json || ndjson))?;

    if let Some(id) = id {
        let commit = find_commit(&dataset.commits, &id)
            .ok_or_else(|| anyhow!("No unique commit matches '{id}'"))?;
        return output_commit_lines(commit, &dataset, json, ndjson);
    }

    if json {
        output_json(&dataset)?;
    } else if ndjson {
        output_ndjson(&dataset.commits)?;
    } else {
        output_summary(&dataset.commits)?;
    }

    Ok(())
}

fn output_json(dataset: &Dataset) -> Result<()> {
    let output = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: dataset.source.clone(),
        commits: dataset.commits.clone(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(commits: &[CommitSummary]) -> Result<()> {
    for commit in commits {
        println!("{}", serde_json::to_string(commit)?);
    }
    Ok(())
}

fn output_summary(commits: &[CommitSummary]) -> Result<()> {
    println!("{}", style("Commit Summary").bold());
    println!("{}", "─".repeat(50));

    if commits.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    for commit in commits {
        println!(
            "{} {} {:>5.2}h {:>6} lines  {}",
            style(crate::util::truncate(&commit.id, 12)).yellow(),
            style(commit.datetime.format("%Y-%m-%d")).dim(),
            commit.hour_frac,
            commit.total_lines,
            commit.author
        );
    }

    let unique_authors: HashSet<_> = commits.iter().map(|c| &c.author).collect();
    let total_lines: usize = commits.iter().map(|c| c.total_lines).sum();

    println!();
    println!("Total commits: {}", style(commits.len()).cyan());
    println!("Total lines: {}", style(total_lines).green());
    println!("Unique authors: {}", style(unique_authors.len()).yellow());

    if let (Some(first), Some(last)) = (
        commits.iter().map(|c| c.datetime).min(),
        commits.iter().map(|c| c.datetime).max(),
    ) {
        println!(
            "Date range: {} to {}",
            style(first.format("%Y-%m-%d")).dim(),
            style(last.format("%Y-%m-%d")).dim()
        );
    }

    println!("\nUse --json or --ndjson flags to export the raw data.");
    Ok(())
}

fn output_commit_lines(commit: &CommitSummary, dataset: &Dataset, json: bool, ndjson: bool) -> Result<()> {
    let lines: Vec<&LineRecord> = commit.lines(&dataset.records).collect();

    if json {
        let output = CommitLinesOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: dataset.source.clone(),
            commit: commit.clone(),
            lines: lines.into_iter().cloned().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if ndjson {
        for line in lines {
            println!("{}", serde_json::to_string(line)?);
        }
        return Ok(());
    }

    println!("{} {}", style("Commit").bold(), style(&commit.id).yellow());
    println!("{}", commit.url);
    println!(
        "{} by {}, {} lines",
        style(crate::util::full_date(&commit.datetime)).dim(),
        commit.author,
        commit.total_lines
    );
    println!("{}", "─".repeat(50));
    for line in lines {
        println!(
            "{:<40} {:>5}  {:<6} len {:>4}  depth {:>2}",
            crate::util::truncate(&line.file, 40),
            line.line,
            line.kind,
            line.length,
            line.depth
        );
    }
    Ok(())
}
