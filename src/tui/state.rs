use std::time::{Duration, Instant};

pub const STATUS_TTL: Duration = Duration::from_secs(3);

pub struct TuiState {
    pub view_mode: ViewMode,
    pub tab_index: usize,
    pub show_help: bool,
    pub status_message: Option<(String, Instant)>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ViewMode {
    Plot,
    Statistics,
}

pub const TAB_TITLES: [&str; 2] = ["Plot", "Stats"];

impl TuiState {
    pub fn set_tab(&mut self, index: usize) {
        self.tab_index = index % TAB_TITLES.len();
        self.view_mode = match self.tab_index {
            0 => ViewMode::Plot,
            _ => ViewMode::Statistics,
        };
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.tab_index + 1);
    }

    pub fn prev_tab(&mut self) {
        self.set_tab(self.tab_index + TAB_TITLES.len() - 1);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Drop the status message once it has been shown long enough.
    pub fn expire_status(&mut self) {
        if let Some((_, at)) = &self.status_message {
            if at.elapsed() > STATUS_TTL {
                self.status_message = None;
            }
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Plot,
            tab_index: 0,
            show_help: false,
            status_message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_wrap_both_ways() {
        let mut state = TuiState::default();
        state.prev_tab();
        assert_eq!(state.view_mode, ViewMode::Statistics);
        state.next_tab();
        assert_eq!(state.view_mode, ViewMode::Plot);
        assert_eq!(state.tab_index, 0);
    }
}
