use chrono::{DateTime, FixedOffset, Timelike};

/// Fractional hour of day in the timestamp's own offset, minute precision.
pub fn hour_frac(timestamp: &DateTime<FixedOffset>) -> f64 {
    timestamp.hour() as f64 + timestamp.minute() as f64 / 60.0
}

/// Long-form date such as `Monday, February 10, 2025`.
pub fn full_date(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%A, %B %-d, %Y").to_string()
}

/// Percentage with one decimal and a trailing `.0` trimmed: `0.5` -> `50%`, `1/3` -> `33.3%`.
pub fn format_percent(share: f64) -> String {
    let text = format!("{:.1}", share * 100.0);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}%")
}

pub fn is_url(locator: &str) -> bool {
    let lower = locator.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Parse a `x0,y0,x1,y1` rectangle argument.
pub fn parse_rect(text: &str) -> crate::error::Result<[f64; 4]> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(crate::error::VizError::InvalidRect(format!(
            "expected x0,y0,x1,y1 but got '{text}'"
        )));
    }
    let mut out = [0.0; 4];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| crate::error::VizError::InvalidRect(format!("'{part}' is not a number")))?;
    }
    Ok(out)
}

/// Truncate a string to `max` chars with an ellipsis when necessary.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}
