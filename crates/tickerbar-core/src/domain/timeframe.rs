use time::Duration;

use crate::ValidationError;

const MINUTE_SECS: i64 = 60;
const HOUR_SECS: i64 = 60 * MINUTE_SECS;
const DAY_SECS: i64 = 24 * HOUR_SECS;
const WEEK_SECS: i64 = 7 * DAY_SECS;
/// Months are a flat 30 days.
const MONTH_SECS: i64 = 30 * DAY_SECS;
const YEAR_SECS: i64 = 365 * DAY_SECS;

/// Parses a timeframe token such as `15m`, `4h`, `3D`, `1W`, `1M` or `1Y`.
///
/// Suffixes are case-insensitive with one exception: a single lowercase `m`
/// means minutes and a single uppercase `M` means months. `mm` and `min` are
/// always minutes. An empty token is one day and a bare integer is a day
/// count.
pub fn parse_timeframe(token: &str) -> Result<Duration, ValidationError> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(Duration::seconds(DAY_SECS));
    }

    let unknown = || ValidationError::UnknownTimeframe {
        value: token.to_owned(),
    };
    let lower = token.to_ascii_lowercase();

    let (count, unit_secs) = if lower.ends_with("min") {
        (&token[..token.len() - 3], MINUTE_SECS)
    } else if lower.ends_with("mm") {
        (&token[..token.len() - 2], MINUTE_SECS)
    } else if token.ends_with('m') {
        (&token[..token.len() - 1], MINUTE_SECS)
    } else if token.ends_with('M') {
        (&token[..token.len() - 1], MONTH_SECS)
    } else if let Some(unit_secs) = lower.chars().last().and_then(letter_unit) {
        (&token[..token.len() - 1], unit_secs)
    } else {
        (token, DAY_SECS)
    };

    let count = if count.is_empty() {
        1
    } else if count.chars().all(|ch| ch.is_ascii_digit()) {
        count.parse::<u32>().map_err(|_| unknown())?
    } else {
        return Err(unknown());
    };

    i64::from(count)
        .checked_mul(unit_secs)
        .map(Duration::seconds)
        .ok_or_else(unknown)
}

fn letter_unit(ch: char) -> Option<i64> {
    match ch {
        'h' => Some(HOUR_SECS),
        'd' => Some(DAY_SECS),
        'w' => Some(WEEK_SECS),
        'y' => Some(YEAR_SECS),
        _ => None,
    }
}

/// How an adapter with native history should compute the change percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeWindow {
    /// Use the provider's own daily change field.
    Daily,
    /// Compute the change over this lookback from a price series.
    Lookback(Duration),
    /// Token did not parse; the change degrades to zero.
    Unparseable,
}

impl ChangeWindow {
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if token.eq_ignore_ascii_case("daily") {
            return Self::Daily;
        }

        match parse_timeframe(token) {
            Ok(lookback) if lookback.whole_seconds() == DAY_SECS => Self::Daily,
            Ok(lookback) => Self::Lookback(lookback),
            Err(error) => {
                tracing::warn!(timeframe = token, %error, "reporting zero change");
                Self::Unparseable
            }
        }
    }
}
