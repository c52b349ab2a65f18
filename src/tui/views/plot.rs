use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Rectangle};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};
use ratatui::Frame;

use crate::page::CommitPage;
use crate::plot::{hour_ticks, time_ticks};
use crate::util::truncate;

use super::super::draw::{label_style, mark_color, share_bar, value_style};
use super::super::layout::{chart_inner, plot_layout, point_to_cell, tooltip_rect};
use super::header_cell;

/// Render the commit scatter plot with the selection panel beside it.
pub fn draw_plot_view(f: &mut Frame, area: Rect, page: &CommitPage) {
    let (chart, side) = plot_layout(area);
    draw_chart(f, chart, page);
    draw_side_panel(f, side, page);

    if let Some(content) = page.tooltip().content() {
        let (col, row) = point_to_cell(chart_inner(chart), page.tooltip().anchor());
        let lines = vec![
            Line::from(vec![
                Span::styled("Commit ", label_style()),
                Span::styled(truncate(&content.id, 12), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(vec![Span::styled("Date   ", label_style()), Span::raw(content.date.clone())]),
            Line::from(vec![Span::styled("Author ", label_style()), Span::raw(content.author.clone())]),
            Line::from(vec![
                Span::styled("Lines  ", label_style()),
                Span::styled(content.lines.to_string(), value_style()),
            ]),
        ];
        let width = lines.iter().map(Line::width).max().unwrap_or(0) as u16 + 2;
        let popup = tooltip_rect(chart, col, row, width, lines.len() as u16 + 2);
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
            popup,
        );
    }
}

fn draw_chart(f: &mut Frame, area: Rect, page: &CommitPage) {
    let plot = page.plot();
    let (w, h) = (plot.area.width, plot.area.height);
    let report = page.report();
    let hovered = page.hovered_index();
    let rect = page.brush().rect();

    let y_ticks = hour_ticks(&plot.y, 6);
    let x_count = ((plot.area.usable_width() / 40.0).round() as usize).max(2);
    let x_ticks = time_ticks(&plot.x, x_count);
    let bottom = plot.area.bottom();

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("Commits by time of day"))
        .marker(Marker::Braille)
        .x_bounds([0.0, w])
        .y_bounds([0.0, h])
        .paint(move |ctx| {
            // canvas y grows upwards, plot y grows downwards
            for tick in &y_ticks {
                ctx.print(0.0, h - tick.position, Span::styled(tick.label.clone(), label_style()));
            }
            for tick in &x_ticks {
                ctx.print(tick.position, h - bottom - 4.0, Span::styled(tick.label.clone(), label_style()));
            }
            ctx.layer();

            for mark in plot.marks() {
                ctx.draw(&Circle {
                    x: mark.cx,
                    y: h - mark.cy,
                    radius: mark.r,
                    color: mark_color(report.is_selected(mark.commit), hovered == Some(mark.commit)),
                });
            }

            if let Some(rect) = rect {
                ctx.layer();
                ctx.draw(&Rectangle {
                    x: rect.x0,
                    y: h - rect.y1,
                    width: rect.x1 - rect.x0,
                    height: rect.y1 - rect.y0,
                    color: Color::Gray,
                });
            }
        });
    f.render_widget(canvas, area);
}

/// Selection count, per-type breakdown and selection statistics.
pub fn draw_side_panel(f: &mut Frame, area: Rect, page: &CommitPage) {
    let report = page.report();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4), Constraint::Length(5)])
        .split(area);

    let label_color = if report.selected.is_empty() { Color::Gray } else { Color::LightRed };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            report.label.clone(),
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title("Selection")),
        chunks[0],
    );

    let rows: Vec<Row> = report
        .types
        .iter()
        .map(|share| {
            Row::new(vec![
                share.kind.clone(),
                share.display(),
                share_bar(share.share, 6),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [Constraint::Length(8), Constraint::Min(14), Constraint::Length(6)],
    )
    .header(Row::new(vec![
        header_cell("Type", Color::Yellow),
        header_cell("Lines", Color::Yellow),
        header_cell("", Color::Yellow),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Lines by type"));
    f.render_widget(table, chunks[1]);

    let stats: Vec<Line> = if report.selected.is_empty() {
        vec![Line::from(Span::styled("Drag across the plot to select", label_style()))]
    } else {
        report
            .stats
            .pairs()
            .into_iter()
            .map(|pair| {
                Line::from(vec![
                    Span::styled(format!("{}: ", pair.label), label_style()),
                    Span::styled(pair.value, value_style()),
                ])
            })
            .collect()
    };
    f.render_widget(
        Paragraph::new(stats).block(Block::default().borders(Borders::ALL)),
        chunks[2],
    );
}
