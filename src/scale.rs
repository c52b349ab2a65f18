use chrono::{DateTime, TimeZone, Utc};

/// Linear map from a numeric domain onto a pixel range.
///
/// A degenerate domain maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r0 == r1 {
            return (d0 + d1) / 2.0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// Linear scale over timestamps, stored as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>, range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new(
                (start.timestamp_millis() as f64, end.timestamp_millis() as f64),
                range,
            ),
        }
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    /// Domain bounds in epoch seconds.
    pub fn domain_secs(&self) -> (i64, i64) {
        let (d0, d1) = self.inner.domain();
        ((d0 / 1000.0).floor() as i64, (d1 / 1000.0).ceil() as i64)
    }

    pub fn apply<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> f64 {
        self.inner.apply(at.timestamp_millis() as f64)
    }

    pub fn apply_secs(&self, secs: i64) -> f64 {
        self.inner.apply(secs as f64 * 1000.0)
    }

    pub fn invert(&self, px: f64) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.inner.invert(px).round() as i64).single()
    }
}

/// Square-root scale: output grows with the square root of the input, so a
/// circle's area tracks the value rather than its radius.
///
/// When the domain collapses to one value every input maps to the middle of
/// the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    inner: LinearScale,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((domain.0.max(0.0).sqrt(), domain.1.max(0.0).sqrt()), range),
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        self.inner.apply(value.max(0.0).sqrt())
    }
}
