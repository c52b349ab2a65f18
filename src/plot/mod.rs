pub mod axis;
pub mod exec;
pub mod svg;

pub use axis::{hour_ticks, time_ticks, Tick};
pub use exec::exec;
pub use svg::{render_html_report, render_svg};

use crate::model::CommitSummary;
use crate::scale::{LinearScale, SqrtScale, TimeScale};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Hour-of-day axis bounds. Fixed so plots stay comparable across datasets.
pub const HOUR_DOMAIN: (f64, f64) = (0.0, 24.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

/// Canvas size plus the inner rectangle marks are drawn in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl PlotArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: Margin::default(),
        }
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn left(&self) -> f64 {
        self.margin.left
    }

    pub fn right(&self) -> f64 {
        (self.width - self.margin.right).max(self.left())
    }

    pub fn top(&self) -> f64 {
        self.margin.top
    }

    pub fn bottom(&self) -> f64 {
        (self.height - self.margin.bottom).max(self.top())
    }

    pub fn usable_width(&self) -> f64 {
        self.right() - self.left()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusRange {
    pub min: f64,
    pub max: f64,
}

impl Default for RadiusRange {
    fn default() -> Self {
        Self { min: 2.0, max: 30.0 }
    }
}

/// One drawn circle; `commit` indexes the commit list the plot was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mark {
    pub commit: usize,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Mark {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (x - self.cx, y - self.cy);
        dx * dx + dy * dy <= self.r * self.r
    }
}

/// Commit scatter plot geometry: time on x, hour of day on y, area by line count.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub area: PlotArea,
    pub x: TimeScale,
    pub y: LinearScale,
    pub r: SqrtScale,
    marks: Vec<Mark>,
}

impl ScatterPlot {
    pub fn build(commits: &[CommitSummary], area: PlotArea, radius: RadiusRange) -> Self {
        let epoch = DateTime::<Utc>::default();
        let start = commits
            .iter()
            .map(|c| c.datetime.with_timezone(&Utc))
            .min()
            .unwrap_or(epoch);
        let end = commits
            .iter()
            .map(|c| c.datetime.with_timezone(&Utc))
            .max()
            .unwrap_or(epoch);

        let min_lines = commits.iter().map(|c| c.total_lines).min().unwrap_or(0);
        let max_lines = commits.iter().map(|c| c.total_lines).max().unwrap_or(0);

        let x = TimeScale::new(&start, &end, (area.left(), area.right()));
        let y = LinearScale::new(HOUR_DOMAIN, (area.bottom(), area.top()));
        let r = SqrtScale::new((min_lines as f64, max_lines as f64), (radius.min, radius.max));

        let marks = commits
            .iter()
            .enumerate()
            .map(|(idx, commit)| Mark {
                commit: idx,
                cx: x.apply(&commit.datetime),
                cy: y.apply(commit.hour_frac),
                r: r.apply(commit.total_lines as f64),
            })
            .collect::<Vec<_>>();

        debug!(
            width = area.width,
            height = area.height,
            marks = marks.len(),
            "built scatter plot"
        );

        Self { area, x, y, r, marks }
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Plotted pixel position of a commit.
    pub fn position(&self, commit: &CommitSummary) -> (f64, f64) {
        (self.x.apply(&commit.datetime), self.y.apply(commit.hour_frac))
    }

    /// Topmost mark under the point; later marks are drawn over earlier ones.
    pub fn mark_at(&self, x: f64, y: f64) -> Option<&Mark> {
        self.marks.iter().rev().find(|m| m.contains(x, y))
    }
}
