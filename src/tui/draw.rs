use ratatui::style::{Color, Modifier, Style};

const LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Fixed-width share bar for a fraction in [0, 1].
pub fn share_bar(share: f64, width: usize) -> String {
    let share = if share.is_finite() { share.clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((share * width as f64).round() as usize).min(width);
    let level = ((share * (LEVELS.len() - 1) as f64).round() as usize).min(LEVELS.len() - 1);
    LEVELS[level].repeat(filled) + &"░".repeat(width - filled)
}

/// Colour of a plotted commit.
pub fn mark_color(selected: bool, hovered: bool) -> Color {
    match (selected, hovered) {
        (_, true) => Color::Yellow,
        (true, false) => Color::LightRed,
        (false, false) => Color::LightBlue,
    }
}

pub fn label_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn value_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}
