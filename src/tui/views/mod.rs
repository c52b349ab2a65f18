use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

mod help;
mod plot;
mod statistics;

pub use help::draw_help_overlay;
pub use plot::{draw_plot_view, draw_side_panel};
pub use statistics::draw_statistics_view;

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}
