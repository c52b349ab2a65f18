use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::page::CommitPage;

use super::input::copy_to_clipboard;
use super::layout::{cell_to_point, cell_to_point_clamped};
use super::state::{TuiState, ViewMode};

/// Handle a keyboard event, mutating TUI state and returning `true` if the loop should exit.
pub fn handle_key_events(key_event: KeyEvent, state: &mut TuiState, page: &mut CommitPage) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if state.show_help {
        if matches!(
            key_event.code,
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::F(1)
        ) {
            state.show_help = false;
        }
        return matches!(key_event.code, KeyCode::Char('q'));
    }

    match key_event.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Tab => state.next_tab(),
        KeyCode::BackTab => state.prev_tab(),
        KeyCode::Esc => {
            if page.brush().rect().is_some() {
                page.clear_selection();
                state.set_status("Selection cleared");
            }
        }
        KeyCode::Char('c') => match page.hovered().map(|c| c.url.clone()) {
            Some(url) => match copy_to_clipboard(&url) {
                Ok(()) => state.set_status(format!("Copied: {url}")),
                Err(e) => state.set_status(format!("Clipboard error: {e}")),
            },
            None => state.set_status("Hover a commit to copy its link"),
        },
        _ => {}
    }
    false
}

/// Mouse input on the plot tab: left button brushes, plain motion hovers.
/// `inner` is the chart area inside its border.
pub fn handle_mouse_event(mouse_event: MouseEvent, state: &mut TuiState, page: &mut CommitPage, inner: Rect) {
    if state.show_help || state.view_mode != ViewMode::Plot {
        return;
    }
    let (col, row) = (mouse_event.column, mouse_event.row);

    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(at) = cell_to_point(inner, col, row) {
                page.leave();
                page.brush_start(at);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            page.brush_move(cell_to_point_clamped(inner, col, row));
        }
        MouseEventKind::Up(MouseButton::Left) => {
            page.brush_end(cell_to_point_clamped(inner, col, row));
        }
        MouseEventKind::Moved => match cell_to_point(inner, col, row) {
            Some(at) => {
                page.hover(at);
            }
            None => page.leave(),
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commits::tests::record;
    use crate::dataset::Dataset;
    use crate::plot::PlotArea;
    use crate::tui::layout::{canvas_size, point_to_cell, TUI_MARGIN, TUI_RADIUS};
    use crossterm::event::KeyModifiers;

    fn page(inner: Rect) -> CommitPage {
        let records = vec![
            record("a", "x.js", 1, "js", 10, "2025-02-10T06:00:00Z"),
            record("b", "y.css", 1, "css", 30, "2025-02-12T18:00:00Z"),
        ];
        let dataset = Dataset::from_records("mem".to_string(), records, "https://example.com/c/");
        let (w, h) = canvas_size(inner);
        CommitPage::new(dataset, PlotArea::new(w, h).with_margin(TUI_MARGIN), TUI_RADIUS)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn drag_across_the_chart_selects_everything() {
        let inner = Rect::new(1, 4, 60, 20);
        let mut page = page(inner);
        let mut state = TuiState::default();

        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 1, 4), &mut state, &mut page, inner);
        handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 100, 100), &mut state, &mut page, inner);
        assert_eq!(page.report().label, "2 commits selected");
        handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 100, 100), &mut state, &mut page, inner);
        assert_eq!(page.report().selected, vec![0, 1]);

        assert!(!handle_key_events(key(KeyCode::Esc), &mut state, &mut page));
        assert!(page.report().selected.is_empty());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn hover_pins_tooltip_to_the_pointer_cell() {
        let inner = Rect::new(1, 4, 60, 20);
        let mut page = page(inner);
        let mut state = TuiState::default();
        let m = page.plot().marks()[1];
        let (col, row) = point_to_cell(inner, (m.cx, m.cy));

        handle_mouse_event(mouse(MouseEventKind::Moved, col, row), &mut state, &mut page, inner);
        assert_eq!(page.tooltip().content().map(|c| c.id.as_str()), Some("b"));
        assert_eq!(point_to_cell(inner, page.tooltip().anchor()), (col, row));

        handle_mouse_event(mouse(MouseEventKind::Moved, 0, 0), &mut state, &mut page, inner);
        assert!(!page.tooltip().is_visible());
    }

    #[test]
    fn clicks_outside_the_chart_do_not_brush() {
        let inner = Rect::new(1, 4, 60, 20);
        let mut page = page(inner);
        let mut state = TuiState::default();
        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 70, 2), &mut state, &mut page, inner);
        assert!(!page.brush().is_dragging());
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let inner = Rect::new(1, 4, 60, 20);
        let mut page = page(inner);
        let mut state = TuiState::default();
        assert!(!handle_key_events(key(KeyCode::F(1)), &mut state, &mut page));
        assert!(state.show_help);
        assert!(!handle_key_events(key(KeyCode::Tab), &mut state, &mut page));
        assert_eq!(state.view_mode, ViewMode::Plot);
        handle_key_events(key(KeyCode::Esc), &mut state, &mut page);
        assert!(!state.show_help);
        assert!(handle_key_events(key(KeyCode::Char('q')), &mut state, &mut page));
    }
}
