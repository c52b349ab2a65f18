use crate::model::{CommitSummary, LineRecord};
use crate::plot::ScatterPlot;
use crate::stats::{selection_stats, type_breakdown, SelectionStats, TypeShare};
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in plot pixel coordinates, normalized so
/// `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        }
    }

    pub fn from_array([x0, y0, x1, y1]: [f64; 4]) -> Self {
        Self::from_corners(Point::new(x0, y0), Point::new(x1, y1))
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }

    /// Zero width or zero height.
    pub fn is_empty(&self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }

    /// Inclusive of the boundary.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushState {
    Idle,
    Dragging { origin: Point },
}

/// One brush gesture at a time: pointer down starts it, moves resize the
/// rectangle, pointer up ends it. While dragging the rectangle may be a line
/// or a point. A gesture that ends with no area clears the selection;
/// otherwise the rectangle stays until the next gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    state: BrushState,
    rect: Option<Rect>,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            state: BrushState::Idle,
            rect: None,
        }
    }
}

impl Brush {
    pub fn state(&self) -> BrushState {
        self.state
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, BrushState::Dragging { .. })
    }

    pub fn start(&mut self, at: Point) -> Option<Rect> {
        self.state = BrushState::Dragging { origin: at };
        self.rect = Some(Rect::from_corners(at, at));
        self.rect
    }

    pub fn drag(&mut self, to: Point) -> Option<Rect> {
        if let BrushState::Dragging { origin } = self.state {
            self.rect = Some(Rect::from_corners(origin, to));
        }
        self.rect
    }

    pub fn end(&mut self, at: Point) -> Option<Rect> {
        if self.is_dragging() {
            self.drag(at);
            self.rect = self.rect.filter(|r| !r.is_empty());
        }
        self.state = BrushState::Idle;
        self.rect
    }

    /// Set a finished rectangle directly, as if a gesture had drawn it.
    pub fn set(&mut self, rect: Option<Rect>) -> Option<Rect> {
        self.state = BrushState::Idle;
        self.rect = rect.filter(|r| !r.is_empty());
        self.rect
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub fn is_commit_selected(rect: Option<&Rect>, commit: &CommitSummary, plot: &ScatterPlot) -> bool {
    let Some(rect) = rect else {
        return false;
    };
    let (x, y) = plot.position(commit);
    rect.contains(x, y)
}

/// Everything the page shows about the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionReport {
    pub selected: Vec<usize>,
    pub label: String,
    pub types: Vec<TypeShare>,
    pub stats: SelectionStats,
}

impl SelectionReport {
    pub fn is_selected(&self, commit: usize) -> bool {
        self.selected.binary_search(&commit).is_ok()
    }
}

pub fn selection_label(count: usize) -> String {
    if count == 0 {
        "No commits selected".to_string()
    } else {
        format!("{count} commits selected")
    }
}

/// Linear scan over all commits.
pub fn compute_selection(
    rect: Option<&Rect>,
    commits: &[CommitSummary],
    records: &[LineRecord],
    plot: &ScatterPlot,
) -> SelectionReport {
    let selected: Vec<usize> = commits
        .iter()
        .enumerate()
        .filter(|(_, c)| is_commit_selected(rect, c, plot))
        .map(|(i, _)| i)
        .collect();

    let chosen: Vec<&CommitSummary> = selected.iter().map(|&i| &commits[i]).collect();
    let types = type_breakdown(chosen.iter().flat_map(|c| c.lines(records)));
    let stats = selection_stats(&chosen, records);

    trace!(selected = selected.len(), "selection recomputed");

    SelectionReport {
        label: selection_label(selected.len()),
        selected,
        types,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commits::process_commits;
    use crate::commits::tests::record;
    use crate::plot::{PlotArea, RadiusRange};
    use pretty_assertions::assert_eq;

    fn fixture() -> (Vec<LineRecord>, Vec<CommitSummary>, ScatterPlot) {
        let records = vec![
            record("a", "x.js", 1, "js", 10, "2025-02-10T06:00:00Z"),
            record("a", "x.css", 1, "css", 20, "2025-02-10T06:00:00Z"),
            record("b", "y.js", 1, "js", 30, "2025-02-12T18:00:00Z"),
        ];
        let commits = process_commits(&records, "");
        let plot = ScatterPlot::build(&commits, PlotArea::new(1000.0, 600.0), RadiusRange::default());
        (records, commits, plot)
    }

    #[test]
    fn no_rectangle_selects_nothing() {
        let (records, commits, plot) = fixture();
        let report = compute_selection(None, &commits, &records, &plot);
        assert!(report.selected.is_empty());
        assert_eq!(report.label, "No commits selected");
        assert!(report.types.is_empty());
        assert_eq!(report.stats, SelectionStats::default());
    }

    #[test]
    fn boundary_pixels_are_inclusive() {
        let (records, commits, plot) = fixture();
        let m = plot.marks()[0];
        let rect = Rect::from_corners(Point::new(m.cx, m.cy), Point::new(m.cx + 50.0, m.cy + 50.0));
        let report = compute_selection(Some(&rect), &commits, &records, &plot);
        assert_eq!(report.selected, vec![0]);
        assert_eq!(report.label, "1 commits selected");
    }

    #[test]
    fn breakdown_covers_selected_lines() {
        let (records, commits, plot) = fixture();
        let rect = Rect::from_array([0.0, 0.0, 1000.0, 600.0]);
        let report = compute_selection(Some(&rect), &commits, &records, &plot);
        assert_eq!(report.selected, vec![0, 1]);
        assert_eq!(report.label, "2 commits selected");
        let shown: Vec<(String, String)> = report
            .types
            .iter()
            .map(|t| (t.kind.clone(), t.display()))
            .collect();
        assert_eq!(
            shown,
            vec![
                ("js".to_string(), "2 lines (66.7%)".to_string()),
                ("css".to_string(), "1 lines (33.3%)".to_string()),
            ]
        );
        assert_eq!(report.stats.total_lines, 3);
        assert_eq!(report.stats.avg_line_length, 20);
        assert!(report.is_selected(1));
    }

    #[test]
    fn brush_gesture_lifecycle() {
        let mut brush = Brush::default();
        assert_eq!(brush.state(), BrushState::Idle);

        let origin = brush.start(Point::new(10.0, 10.0)).unwrap();
        assert!(origin.is_empty());
        assert!(brush.is_dragging());
        let thin = brush.drag(Point::new(10.0, 40.0)).unwrap();
        assert_eq!(thin.to_array(), [10.0, 10.0, 10.0, 40.0]);
        let grown = brush.drag(Point::new(5.0, 40.0)).unwrap();
        assert_eq!(grown, Rect { x0: 5.0, y0: 10.0, x1: 10.0, y1: 40.0 });
        let done = brush.end(Point::new(60.0, 40.0)).unwrap();
        assert_eq!(done.to_array(), [10.0, 10.0, 60.0, 40.0]);
        assert!(!brush.is_dragging());
        assert_eq!(brush.rect(), Some(done));

        // a click without movement clears the previous rectangle
        brush.start(Point::new(30.0, 30.0));
        assert_eq!(brush.end(Point::new(30.0, 30.0)), None);
        assert_eq!(brush.rect(), None);
    }

    #[test]
    fn drag_without_start_is_ignored() {
        let mut brush = Brush::default();
        assert_eq!(brush.drag(Point::new(5.0, 5.0)), None);
        assert_eq!(brush.set(Some(Rect::from_array([1.0, 1.0, 1.0, 9.0]))), None);
    }
}
