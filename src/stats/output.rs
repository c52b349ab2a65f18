use super::{CodebaseStats, TypeShare};
use crate::model::{StatsOutput, SCHEMA_VERSION};
use anyhow::Result;
use chrono::Utc;
use console::style;

pub fn output_json(stats: &CodebaseStats, types: &[TypeShare], source: &str) -> Result<()> {
    let output = StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        stats: stats.clone(),
        types: types.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(stats: &CodebaseStats) -> Result<()> {
    for pair in stats.pairs() {
        println!("{}", serde_json::to_string(&pair)?);
    }
    Ok(())
}

pub fn output_console(stats: &CodebaseStats, types: &[TypeShare]) -> Result<()> {
    println!("{}", style("Codebase Statistics").bold());
    println!("{}", "─".repeat(50));

    for pair in stats.pairs() {
        println!("{:<30} {}", pair.label, style(pair.value).cyan());
    }

    if types.is_empty() {
        println!("\nNo data to display");
        return Ok(());
    }

    println!("\n{}", style("Lines by type").bold());
    for share in types {
        println!("{:<30} {}", share.kind, style(share.display()).green());
    }

    Ok(())
}
