use time::Duration;

/// One observation of a chronological price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Unix seconds.
    pub timestamp: i64,
    pub value: f64,
}

impl PricePoint {
    pub const fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Percent change from `base` to `current`; zero when `base` is zero.
pub fn percent_change(current: f64, base: f64) -> f64 {
    if base == 0.0 {
        return 0.0;
    }
    (current - base) / base * 100.0
}

/// Change from the point `lookback` before the latest one to the latest one.
///
/// `points` must be in ascending timestamp order. The base is the latest
/// point at or before the target timestamp, or the earliest point when the
/// series does not reach back that far.
pub fn change_over(points: &[PricePoint], lookback: Duration) -> Option<f64> {
    let (current, earliest) = (points.last()?, points.first()?);
    let target = current
        .timestamp
        .saturating_sub(lookback.whole_seconds());

    let base = points
        .iter()
        .rev()
        .find(|point| point.timestamp <= target)
        .unwrap_or(earliest);

    Some(percent_change(current.value, base.value))
}

/// Change between the last two values, for sources that only give closes.
pub fn last_two_change(values: &[f64]) -> Option<f64> {
    match values {
        [.., previous, last] if *previous != 0.0 => Some(percent_change(*last, *previous)),
        _ => None,
    }
}
