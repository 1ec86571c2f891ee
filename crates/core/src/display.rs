//! Calendar strings for presentation.
//!
//! Timestamps themselves are never shown; these helpers re-derive the
//! calendar text a reader expects.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike};

use crate::config::EngineConfig;
use crate::dates::DateNormalizer;
use crate::types::CanonicalTimestamp;

/// `M/D/YYYY` without zero padding, or `None` for unparseable timestamps.
#[must_use]
pub fn month_day_year(ts: CanonicalTimestamp) -> Option<String> {
    let dt = DateTime::from_timestamp_millis(ts.millis()?)?;
    Some(dt.format("%-m/%-d/%Y").to_string())
}

/// Naive wall-clock layouts accepted for the last-updated stamp.
const WALL_CLOCK_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Read a last-updated stamp as a moment in the display zone.
///
/// Stamps with an explicit offset are converted; naive stamps are taken as
/// wall-clock time in the display zone; date-only stamps mean midnight there.
fn updated_at(raw: &str, offset: FixedOffset, dates: &DateNormalizer) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&offset));
    }

    let t_separated = raw.replacen(' ', "T", 1);
    for fmt in WALL_CLOCK_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&t_separated, fmt) {
            return offset.from_local_datetime(&naive).single();
        }
    }

    let millis = dates.parse_str(raw).millis()?;
    let naive = DateTime::from_timestamp_millis(millis)?.naive_utc();
    offset.from_local_datetime(&naive).single()
}

/// Format the document's last-updated stamp, e.g. `11/19/2025 5:43 p.m (EST)`.
///
/// Returns `None` when the stamp is absent or cannot be read.
#[must_use]
pub fn last_updated(raw: Option<&str>, config: &EngineConfig, dates: &DateNormalizer) -> Option<String> {
    let dt = updated_at(raw?, config.display_offset(), dates)?;
    let (is_pm, hour12) = dt.hour12();
    let meridiem = if is_pm { "p.m" } else { "a.m" };
    Some(format!(
        "{} {}:{:02} {} ({})",
        dt.format("%m/%d/%Y"),
        hour12,
        dt.minute(),
        meridiem,
        config.zone_label
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(raw: &str) -> Option<String> {
        last_updated(Some(raw), &EngineConfig::default(), &DateNormalizer::new())
    }

    #[test]
    fn test_month_day_year_unpadded() {
        let ts = CanonicalTimestamp::Millis(1_735_776_000_000); // 2025-01-02
        assert_eq!(month_day_year(ts).as_deref(), Some("1/2/2025"));
        assert_eq!(month_day_year(CanonicalTimestamp::Unparseable), None);
    }

    #[test]
    fn test_naive_stamp_is_wall_clock() {
        assert_eq!(
            fmt("2025-11-19 17:43:20").as_deref(),
            Some("11/19/2025 5:43 p.m (EST)")
        );
        assert_eq!(
            fmt("2025-11-19T09:05").as_deref(),
            Some("11/19/2025 9:05 a.m (EST)")
        );
    }

    #[test]
    fn test_zoned_stamp_is_converted() {
        assert_eq!(
            fmt("2025-11-19T17:43:20Z").as_deref(),
            Some("11/19/2025 12:43 p.m (EST)")
        );
    }

    #[test]
    fn test_midnight_is_twelve_am() {
        assert_eq!(fmt("11/19/2025").as_deref(), Some("11/19/2025 12:00 a.m (EST)"));
    }

    #[test]
    fn test_absent_or_garbage() {
        assert_eq!(
            last_updated(None, &EngineConfig::default(), &DateNormalizer::new()),
            None
        );
        assert_eq!(fmt("whenever"), None);
    }
}
