use crate::dataset::Dataset;
use crate::model::{CommitSummary, LineRecord};
use crate::plot::{PlotArea, RadiusRange, ScatterPlot};
use crate::selection::{compute_selection, Brush, Point, Rect, SelectionReport};
use crate::stats::{summarize, CodebaseStats};
use crate::tooltip::Tooltip;
use tracing::debug;

/// State of the commit visualization page: loaded data, plot geometry, the
/// active brush, the tooltip and the derived selection report.
pub struct CommitPage {
    source: String,
    records: Vec<LineRecord>,
    commits: Vec<CommitSummary>,
    stats: CodebaseStats,
    radius: RadiusRange,
    plot: ScatterPlot,
    brush: Brush,
    tooltip: Tooltip,
    hovered: Option<usize>,
    report: SelectionReport,
}

impl CommitPage {
    pub fn new(dataset: Dataset, area: PlotArea, radius: RadiusRange) -> Self {
        let Dataset {
            source,
            records,
            commits,
        } = dataset;
        let stats = summarize(&records, &commits);
        let plot = ScatterPlot::build(&commits, area, radius);
        let report = compute_selection(None, &commits, &records, &plot);
        Self {
            source,
            records,
            commits,
            stats,
            radius,
            plot,
            brush: Brush::default(),
            tooltip: Tooltip::default(),
            hovered: None,
            report,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[LineRecord] {
        &self.records
    }

    pub fn commits(&self) -> &[CommitSummary] {
        &self.commits
    }

    pub fn stats(&self) -> &CodebaseStats {
        &self.stats
    }

    pub fn plot(&self) -> &ScatterPlot {
        &self.plot
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn report(&self) -> &SelectionReport {
        &self.report
    }

    pub fn hovered(&self) -> Option<&CommitSummary> {
        self.hovered.and_then(|i| self.commits.get(i))
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered
    }

    /// Discard the plot and every piece of interaction state, then rebuild
    /// for the new canvas size.
    pub fn resize(&mut self, width: f64, height: f64) {
        let area = PlotArea {
            width,
            height,
            ..self.plot.area
        };
        if area == self.plot.area {
            return;
        }
        debug!(width, height, "rebuilding plot");
        self.plot = ScatterPlot::build(&self.commits, area, self.radius);
        self.brush.clear();
        self.tooltip.hide();
        self.hovered = None;
        self.recompute();
    }

    pub fn brush_start(&mut self, at: Point) {
        self.brush.start(at);
        self.recompute();
    }

    pub fn brush_move(&mut self, to: Point) {
        if self.brush.is_dragging() {
            self.brush.drag(to);
            self.recompute();
        }
    }

    pub fn brush_end(&mut self, at: Point) {
        if self.brush.is_dragging() {
            self.brush.end(at);
            self.recompute();
        }
    }

    pub fn select_rect(&mut self, rect: Option<Rect>) {
        self.brush.set(rect);
        self.recompute();
    }

    pub fn clear_selection(&mut self) {
        self.brush.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        let rect = self.brush.rect();
        self.report = compute_selection(rect.as_ref(), &self.commits, &self.records, &self.plot);
    }

    /// Pointer moved over the plot: show the tooltip for the mark under it,
    /// or hide it when there is none.
    pub fn hover(&mut self, at: Point) -> Option<&CommitSummary> {
        match self.plot.mark_at(at.x, at.y).map(|m| m.commit) {
            Some(idx) => {
                self.hovered = Some(idx);
                self.tooltip.show(&self.commits[idx]);
                self.tooltip.position(at.x, at.y);
                self.commits.get(idx)
            }
            None => {
                self.leave();
                None
            }
        }
    }

    pub fn leave(&mut self) {
        self.hovered = None;
        self.tooltip.hide();
    }
}
