use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Row, Sparkline, Table};
use ratatui::Frame;

use crate::page::CommitPage;
use crate::stats::type_breakdown;

use super::super::draw::share_bar;
use super::header_cell;

/// Render the whole-codebase summary, the type mix and a per-commit size trend.
pub fn draw_statistics_view(f: &mut Frame, area: Rect, page: &CommitPage) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(4), Constraint::Length(6)])
        .split(area);

    let summary: Vec<Row> = page
        .stats()
        .pairs()
        .into_iter()
        .map(|pair| Row::new(vec![pair.label, pair.value]).style(Style::default().fg(Color::White)))
        .collect();
    let summary = Table::new(summary, [Constraint::Length(24), Constraint::Min(10)])
        .block(Block::default().borders(Borders::ALL).title("Summary"))
        .column_spacing(2);
    f.render_widget(summary, chunks[0]);

    let types: Vec<Row> = type_breakdown(page.records())
        .into_iter()
        .map(|share| {
            let display = share.display();
            Row::new(vec![share.kind, display, share_bar(share.share, 12)])
        })
        .collect();
    let types = Table::new(
        types,
        [Constraint::Length(12), Constraint::Length(22), Constraint::Min(12)],
    )
    .header(Row::new(vec![
        header_cell("Type", Color::Yellow),
        header_cell("Lines", Color::Yellow),
        header_cell("Share", Color::Yellow),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Lines by type"));
    f.render_widget(types, chunks[1]);

    let sizes: Vec<u64> = page.commits().iter().map(|c| c.total_lines as u64).collect();
    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title("Lines per commit"))
        .data(&sizes)
        .style(Style::default().fg(Color::Green));
    f.render_widget(sparkline, chunks[2]);
}
