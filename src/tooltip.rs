use crate::model::CommitSummary;
use crate::util::full_date;

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub id: String,
    pub url: String,
    pub date: String,
    pub author: String,
    pub lines: usize,
}

/// Hover detail panel for a single commit mark.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    visible: bool,
    content: Option<TooltipContent>,
    position: (f64, f64),
}

impl Tooltip {
    pub fn show(&mut self, commit: &CommitSummary) {
        self.content = Some(TooltipContent {
            id: commit.id.clone(),
            url: commit.url.clone(),
            date: full_date(&commit.datetime),
            author: commit.author.clone(),
            lines: commit.total_lines,
        });
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Pin the panel next to the pointer.
    pub fn position(&mut self, x: f64, y: f64) {
        self.position = (x, y);
    }

    pub fn is_visible(&self) -> bool {
        self.visible && self.content.is_some()
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref().filter(|_| self.visible)
    }

    pub fn anchor(&self) -> (f64, f64) {
        self.position
    }
}
