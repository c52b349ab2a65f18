use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::model::{DEFAULT_DATA, DEFAULT_HEIGHT, DEFAULT_REPO_URL, DEFAULT_WIDTH};
use crate::projects::DEFAULT_PROJECTS;

#[derive(Parser)]
#[command(name = "locviz")]
#[command(about = "Commit history statistics, scatter plots and brush selection over a loc.csv dataset")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, default_value = DEFAULT_DATA, help = "Path or http(s) URL of the line-level CSV dataset")]
    pub data: String,

    #[arg(long, global = true, env = "LOCVIZ_REPO_URL", default_value = DEFAULT_REPO_URL, help = "Base URL commit ids are appended to")]
    pub repo_url: String,

    #[arg(long, global = true, default_value = "30s", help = "Network fetch timeout (e.g. 10s, 1m)")]
    pub timeout: humantime::Duration,

    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate statistics for the whole dataset
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Per-commit summaries
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Show the line records of one commit (id or unique prefix)")]
        id: Option<String>,
    },
    /// Render the commit scatter plot as SVG or an HTML report
    Plot {
        #[arg(short, long, help = "Output file (stdout when omitted)")]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_WIDTH, help = "Canvas width in pixels")]
        width: f64,

        #[arg(long, default_value_t = DEFAULT_HEIGHT, help = "Canvas height in pixels")]
        height: f64,

        #[arg(long, help = "Write a full HTML report instead of a bare SVG")]
        html: bool,

        #[arg(long, value_name = "X0,Y0,X1,Y1", help = "Brush rectangle to apply before rendering")]
        select: Option<String>,
    },
    /// Report the commits inside a brush rectangle
    Select {
        #[arg(long, value_name = "X0,Y0,X1,Y1", help = "Brush rectangle in plot pixels")]
        rect: String,

        #[arg(long, default_value_t = DEFAULT_WIDTH, help = "Canvas width in pixels")]
        width: f64,

        #[arg(long, default_value_t = DEFAULT_HEIGHT, help = "Canvas height in pixels")]
        height: f64,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Interactive terminal dashboard with mouse brushing
    #[command(alias = "tui", alias = "ui")]
    Explore,
    /// GitHub profile counters (followers, following, repos, gists)
    Profile {
        #[arg(help = "GitHub user name")]
        user: Option<String>,

        #[arg(long, help = "Path or http(s) URL of a GitHub user document instead of the API")]
        source: Option<String>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// List portfolio projects
    Projects {
        #[arg(long, default_value = DEFAULT_PROJECTS, help = "Path or http(s) URL of projects.json")]
        source: String,

        #[arg(long, help = "Case-insensitive search across all project fields")]
        query: Option<String>,

        #[arg(long, help = "Only show projects from this year")]
        year: Option<String>,

        #[arg(long, help = "Only consider the first N projects")]
        latest: Option<usize>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let interactive = matches!(self.command, Commands::Explore);
        init_logging(self.common.verbose, interactive);

        match self.command {
            Commands::Stats { json, ndjson } => crate::stats::exec(self.common, json, ndjson),
            Commands::Commits { json, ndjson, id } => {
                crate::export::exec(self.common, json, ndjson, id)
            }
            Commands::Plot {
                output,
                width,
                height,
                html,
                select,
            } => crate::plot::exec(
                self.common,
                crate::plot::exec::PlotOptions {
                    output,
                    width,
                    height,
                    html,
                    select,
                },
            ),
            Commands::Select {
                rect,
                width,
                height,
                json,
            } => crate::plot::exec::exec_select(self.common, &rect, width, height, json),
            Commands::Explore => crate::tui::run(&self.common),
            Commands::Profile { user, source, json } => {
                crate::profile::exec(self.common, user, source, json)
            }
            Commands::Projects {
                source,
                query,
                year,
                latest,
                json,
            } => crate::projects::exec(
                self.common,
                crate::projects::ProjectsQuery {
                    source,
                    query,
                    year,
                    latest,
                    json,
                },
            ),
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level. The dashboard draws on
/// the same terminal, so it never logs.
fn init_logging(verbose: bool, interactive: bool) {
    let directive = log_directive(verbose, interactive, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn log_directive(verbose: bool, interactive: bool, rust_log: Option<String>) -> String {
    if interactive {
        return "off".to_string();
    }
    match rust_log {
        Some(env) if !env.trim().is_empty() => env,
        _ if verbose => "locviz=debug".to_string(),
        _ => "warn".to_string(),
    }
}
