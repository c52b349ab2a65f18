use super::{render_html_report, render_svg, PlotArea, RadiusRange};
use crate::cli::CommonArgs;
use crate::dataset::Dataset;
use crate::model::{SelectionOutput, SCHEMA_VERSION};
use crate::page::CommitPage;
use crate::selection::Rect;
use crate::util::parse_rect;
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::path::PathBuf;
use tracing::info;

pub struct PlotOptions {
    pub output: Option<PathBuf>,
    pub width: f64,
    pub height: f64,
    pub html: bool,
    pub select: Option<String>,
}

pub fn exec(common: CommonArgs, opts: PlotOptions) -> anyhow::Result<()> {
    let dataset = Dataset::load(&common, opts.output.is_some())?;
    let mut page = CommitPage::new(
        dataset,
        PlotArea::new(opts.width, opts.height),
        RadiusRange::default(),
    );

    if let Some(rect) = opts.select.as_deref() {
        let rect = parse_rect(rect).context("Failed to parse --select rectangle")?;
        page.select_rect(Some(Rect::from_array(rect)));
    }

    let document = if opts.html {
        render_html_report(&page)
    } else {
        render_svg(
            page.plot(),
            page.commits(),
            Some(page.report()),
            page.brush().rect().as_ref(),
        )
    };

    match opts.output {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), marks = page.plot().marks().len(), "wrote plot");
            eprintln!(
                "{} {} commits plotted to {}",
                style("✓").green(),
                page.commits().len(),
                style(path.display()).cyan()
            );
            if opts.select.is_some() {
                eprintln!("{}", page.report().label);
            }
        }
        None => print!("{document}"),
    }

    Ok(())
}

pub fn exec_select(common: CommonArgs, rect: &str, width: f64, height: f64, json: bool) -> anyhow::Result<()> {
    let rect = parse_rect(rect).context("Failed to parse --rect")?;
    let dataset = Dataset::load(&common, !json)?;
    let mut page = CommitPage::new(dataset, PlotArea::new(width, height), RadiusRange::default());
    page.select_rect(Some(Rect::from_array(rect)));

    let report = page.report();
    if json {
        let output = SelectionOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: page.source().to_string(),
            rect: page.brush().rect().map(Rect::to_array),
            label: report.label.clone(),
            selected: report
                .selected
                .iter()
                .filter_map(|&i| page.commits().get(i))
                .map(|c| c.id.clone())
                .collect(),
            types: report.types.clone(),
            stats: report.stats.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", style(&report.label).bold());
    if report.selected.is_empty() {
        return Ok(());
    }
    println!("{}", "─".repeat(50));
    for &idx in &report.selected {
        if let Some(commit) = page.commits().get(idx) {
            println!(
                "{} {} {:>5} lines  {}",
                style(&commit.id).yellow(),
                style(commit.datetime.format("%Y-%m-%d %H:%M")).dim(),
                commit.total_lines,
                commit.author
            );
        }
    }
    println!("\n{}", style("Lines by type").bold());
    for share in &report.types {
        println!("{:<30} {}", share.kind, style(share.display()).green());
    }
    println!("\n{}", style("Selection").bold());
    for pair in report.stats.pairs() {
        println!("{:<30} {}", pair.label, style(pair.value).cyan());
    }
    Ok(())
}
