use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::plot::{Margin, RadiusRange};
use crate::selection::Point;

/// Braille canvas resolution: dots per terminal cell.
pub const DOTS_X: f64 = 2.0;
pub const DOTS_Y: f64 = 4.0;

/// Plot margins in dots, leaving room for hour labels on the left.
pub const TUI_MARGIN: Margin = Margin {
    top: 4.0,
    right: 4.0,
    bottom: 8.0,
    left: 14.0,
};

pub const TUI_RADIUS: RadiusRange = RadiusRange { min: 1.0, max: 6.0 };

pub struct Screen {
    pub tabs: Rect,
    pub body: Rect,
    pub status: Rect,
}

pub fn screen_layout(size: Rect) -> Screen {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);
    Screen {
        tabs: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

/// Split the plot tab into the chart block and the selection side panel.
pub fn plot_layout(body: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(body);
    (chunks[0], chunks[1])
}

/// Inside of the bordered chart block.
pub fn chart_inner(chart: Rect) -> Rect {
    Rect {
        x: chart.x.saturating_add(1),
        y: chart.y.saturating_add(1),
        width: chart.width.saturating_sub(2),
        height: chart.height.saturating_sub(2),
    }
}

pub fn plot_inner(size: Rect) -> Rect {
    let (chart, _) = plot_layout(screen_layout(size).body);
    chart_inner(chart)
}

pub fn canvas_size(inner: Rect) -> (f64, f64) {
    (inner.width as f64 * DOTS_X, inner.height as f64 * DOTS_Y)
}

fn contains(inner: Rect, col: u16, row: u16) -> bool {
    col >= inner.x && col < inner.x + inner.width && row >= inner.y && row < inner.y + inner.height
}

/// Cell under the pointer to plot coordinates (origin top-left, y down).
pub fn cell_to_point(inner: Rect, col: u16, row: u16) -> Option<Point> {
    contains(inner, col, row).then(|| {
        Point::new(
            ((col - inner.x) as f64 + 0.5) * DOTS_X,
            ((row - inner.y) as f64 + 0.5) * DOTS_Y,
        )
    })
}

/// Like [`cell_to_point`] but clamps to the chart edge, so a drag that leaves
/// the chart keeps brushing up to its border.
pub fn cell_to_point_clamped(inner: Rect, col: u16, row: u16) -> Point {
    let (w, h) = canvas_size(inner);
    let x = ((col.saturating_sub(inner.x)) as f64 + 0.5) * DOTS_X;
    let y = ((row.saturating_sub(inner.y)) as f64 + 0.5) * DOTS_Y;
    Point::new(x.min(w), y.min(h))
}

/// Plot coordinates back to the terminal cell that holds them.
pub fn point_to_cell(inner: Rect, (x, y): (f64, f64)) -> (u16, u16) {
    let col = (x.max(0.0) / DOTS_X).floor() as u16;
    let row = (y.max(0.0) / DOTS_Y).floor() as u16;
    (
        inner.x + col.min(inner.width.saturating_sub(1)),
        inner.y + row.min(inner.height.saturating_sub(1)),
    )
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Box of `width` x `height` next to the pointer, kept inside `bounds`.
pub fn tooltip_rect(bounds: Rect, col: u16, row: u16, width: u16, height: u16) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let max_x = bounds.x + bounds.width - width;
    let max_y = bounds.y + bounds.height - height;
    let x = col.saturating_add(2).clamp(bounds.x, max_x);
    let y = row.saturating_add(1).clamp(bounds.y, max_y);
    Rect { x, y, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_map_to_dot_centres() {
        let inner = Rect::new(10, 5, 20, 10);
        assert_eq!(cell_to_point(inner, 10, 5), Some(Point::new(1.0, 2.0)));
        assert_eq!(cell_to_point(inner, 29, 14), Some(Point::new(39.0, 38.0)));
        assert_eq!(cell_to_point(inner, 30, 5), None);
        assert_eq!(cell_to_point(inner, 9, 5), None);
    }

    #[test]
    fn points_map_back_to_their_cell() {
        let inner = Rect::new(10, 5, 20, 10);
        for (col, row) in [(10, 5), (17, 9), (29, 14)] {
            let p = cell_to_point(inner, col, row).unwrap();
            assert_eq!(point_to_cell(inner, (p.x, p.y)), (col, row));
        }
        assert_eq!(point_to_cell(inner, (-3.0, 500.0)), (10, 14));
    }

    #[test]
    fn clamped_points_stay_on_canvas() {
        let inner = Rect::new(10, 5, 20, 10);
        assert_eq!(cell_to_point_clamped(inner, 0, 0), Point::new(1.0, 2.0));
        assert_eq!(cell_to_point_clamped(inner, 200, 200), Point::new(40.0, 40.0));
    }

    #[test]
    fn tooltip_stays_inside_bounds() {
        let bounds = Rect::new(0, 0, 80, 24);
        let r = tooltip_rect(bounds, 78, 23, 30, 5);
        assert_eq!(r, Rect::new(50, 19, 30, 5));
        let r = tooltip_rect(bounds, 3, 3, 30, 5);
        assert_eq!(r, Rect::new(5, 4, 30, 5));
    }
}
