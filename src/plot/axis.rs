use crate::scale::{LinearScale, TimeScale};
use chrono::{Datelike, Months, NaiveDate, TimeZone, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Round step sizes (1, 2, 5 times a power of ten) giving about `count` ticks.
pub fn nice_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    if lo == hi || count == 0 {
        return vec![lo];
    }
    let raw = (hi - lo) / count as f64;
    let mut step = 10f64.powf(raw.log10().floor());
    let error = raw / step;
    if error >= 50f64.sqrt() {
        step *= 10.0;
    } else if error >= 10f64.sqrt() {
        step *= 5.0;
    } else if error >= 2f64.sqrt() {
        step *= 2.0;
    }

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Ticks for the hour-of-day axis, labelled `HH:00`.
pub fn hour_ticks(y: &LinearScale, count: usize) -> Vec<Tick> {
    let (d0, d1) = y.domain();
    nice_ticks(d0, d1, count)
        .into_iter()
        .map(|hour| Tick {
            position: y.apply(hour),
            label: format!("{:02}:00", (hour as i64).rem_euclid(24)),
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum Interval {
    Seconds(i64, &'static str),
    Months(u32, &'static str),
}

const HOUR: i64 = 3600;
const DAY: i64 = 24 * HOUR;

const INTERVALS: [Interval; 14] = [
    Interval::Seconds(HOUR, "%H:%M"),
    Interval::Seconds(3 * HOUR, "%H:%M"),
    Interval::Seconds(6 * HOUR, "%H:%M"),
    Interval::Seconds(12 * HOUR, "%b %d %H:%M"),
    Interval::Seconds(DAY, "%a %d"),
    Interval::Seconds(2 * DAY, "%b %d"),
    Interval::Seconds(7 * DAY, "%b %d"),
    Interval::Seconds(14 * DAY, "%b %d"),
    Interval::Months(1, "%B"),
    Interval::Months(3, "%b %Y"),
    Interval::Months(6, "%b %Y"),
    Interval::Months(12, "%Y"),
    Interval::Months(24, "%Y"),
    Interval::Months(60, "%Y"),
];

/// Calendar-aligned ticks (UTC) for the commit time axis.
pub fn time_ticks(x: &TimeScale, count: usize) -> Vec<Tick> {
    let (start, end) = x.domain_secs();
    let span = (end - start).max(0);
    let count = count.max(1) as i64;

    let interval = INTERVALS
        .iter()
        .copied()
        .find(|iv| match iv {
            Interval::Seconds(secs, _) => span / secs <= count,
            Interval::Months(months, _) => span / (*months as i64 * 30 * DAY) <= count,
        })
        .unwrap_or(Interval::Months(120, "%Y"));

    let mut ticks = Vec::new();
    match interval {
        Interval::Seconds(secs, fmt) => {
            let mut at = start.div_euclid(secs) * secs;
            if at < start {
                at += secs;
            }
            while at <= end {
                if let Some(dt) = Utc.timestamp_opt(at, 0).single() {
                    ticks.push(Tick {
                        position: x.apply_secs(at),
                        label: dt.format(fmt).to_string(),
                    });
                }
                at += secs;
            }
        }
        Interval::Months(months, fmt) => {
            let Some(first) = Utc.timestamp_opt(start, 0).single() else {
                return ticks;
            };
            let month0 = first.month0() / months.min(12) * months.min(12);
            let Some(mut day) = NaiveDate::from_ymd_opt(first.year(), month0 + 1, 1) else {
                return ticks;
            };
            loop {
                let Some(midnight) = day.and_hms_opt(0, 0, 0) else { break };
                let at = midnight.and_utc().timestamp();
                if at > end {
                    break;
                }
                if at >= start {
                    ticks.push(Tick {
                        position: x.apply_secs(at),
                        label: midnight.format(fmt).to_string(),
                    });
                }
                match day.checked_add_months(Months::new(months)) {
                    Some(next) => day = next,
                    None => break,
                }
            }
        }
    }
    ticks
}
