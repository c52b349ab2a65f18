use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Terminal;

use crate::cli::CommonArgs;
use crate::dataset::Dataset;
use crate::page::CommitPage;
use crate::plot::PlotArea;

use super::events::{handle_key_events, handle_mouse_event};
use super::layout::{canvas_size, plot_inner, screen_layout, TUI_MARGIN, TUI_RADIUS};
use super::state::{TuiState, ViewMode, TAB_TITLES};
use super::views::{draw_help_overlay, draw_plot_view, draw_statistics_view};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub fn run(common: &CommonArgs) -> anyhow::Result<()> {
    let dataset = Dataset::load(common, true)?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter the alternate screen");
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, dataset);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(terminal: &mut Term, dataset: Dataset) -> anyhow::Result<()> {
    let size = terminal.size()?;
    let (w, h) = canvas_size(plot_inner(size));
    let mut page = CommitPage::new(dataset, PlotArea::new(w, h).with_margin(TUI_MARGIN), TUI_RADIUS);
    let mut state = TuiState::default();

    loop {
        let size = terminal.size()?;
        let inner = plot_inner(size);
        let (w, h) = canvas_size(inner);
        page.resize(w, h);
        state.expire_status();

        terminal.draw(|f| {
            let size = f.size();
            let screen = screen_layout(size);

            let tabs = Tabs::new(TAB_TITLES.to_vec())
                .block(Block::default().borders(Borders::ALL).title(format!("locviz: {}", page.source())))
                .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .select(state.tab_index);
            f.render_widget(tabs, screen.tabs);

            match state.view_mode {
                ViewMode::Plot => draw_plot_view(f, screen.body, &page),
                ViewMode::Statistics => draw_statistics_view(f, screen.body, &page),
            }

            let status = match &state.status_message {
                Some((message, _)) => Line::from(message.as_str()),
                None => Line::from("drag: select  esc: clear  c: copy link  tab: switch view  h: help  q: quit"),
            };
            f.render_widget(
                Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
                screen.status,
            );

            if state.show_help {
                draw_help_overlay(f, size);
            }
        })?;

        if poll(Duration::from_millis(200))? {
            match read()? {
                Event::Key(key_event) => {
                    if handle_key_events(key_event, &mut state, &mut page) {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => {
                    handle_mouse_event(mouse_event, &mut state, &mut page, inner);
                }
                _ => {}
            }
        }
    }

    Ok(())
}
