//! Numeric date cells: bare years, spreadsheet serial days and epoch values.
//!
//! Ranges are disjoint, so a value never has more than one reading.

use chrono::{Days, NaiveDate};

use crate::shape::{midnight_millis, ShapeMatch};
use crate::types::ParsedDate;

/// Bare four-digit years.
const MIN_YEAR: i64 = 1900;
const MAX_YEAR: i64 = 2100;

/// Spreadsheet serial days (base 1899-12-30), limited to 1950-01-01..2100-01-01.
const MIN_SERIAL_DAYS: i64 = 18_264;
const MAX_SERIAL_DAYS: i64 = 73_051;

/// Reasonable epoch range: 2000-01-01 to 2100-01-01
pub(crate) const MIN_EPOCH_SECONDS: i64 = 946_684_800;
pub(crate) const MAX_EPOCH_SECONDS: i64 = 4_102_444_800;

/// For milliseconds, multiply by 1000
pub(crate) const MIN_EPOCH_MILLIS: i64 = MIN_EPOCH_SECONDS * 1000;
pub(crate) const MAX_EPOCH_MILLIS: i64 = MAX_EPOCH_SECONDS * 1000;

fn serial_base() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

/// Read an integer cell.
pub(crate) fn parse_int(value: i64) -> ShapeMatch {
    let parsed = if (MIN_YEAR..=MAX_YEAR).contains(&value) {
        i32::try_from(value)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .and_then(midnight_millis)
            .map(|ms| ParsedDate::new(ms, "year"))
    } else if (MIN_SERIAL_DAYS..=MAX_SERIAL_DAYS).contains(&value) {
        serial_days(value.unsigned_abs())
    } else if (MIN_EPOCH_SECONDS..=MAX_EPOCH_SECONDS).contains(&value) {
        Some(ParsedDate::new(value * 1000, "epoch-seconds"))
    } else if (MIN_EPOCH_MILLIS..=MAX_EPOCH_MILLIS).contains(&value) {
        Some(ParsedDate::new(value, "epoch-millis"))
    } else {
        return ShapeMatch::NoMatch;
    };
    ShapeMatch::matched(parsed)
}

/// Read a float cell. Integral floats follow the integer rules; fractional
/// values are only meaningful as serial days (time of day is dropped).
pub(crate) fn parse_float(value: f64) -> ShapeMatch {
    if !value.is_finite() {
        return ShapeMatch::NoMatch;
    }
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        return parse_int(value as i64);
    }
    let days = value.trunc() as i64;
    if (MIN_SERIAL_DAYS..=MAX_SERIAL_DAYS).contains(&days) {
        ShapeMatch::matched(serial_days(days.unsigned_abs()))
    } else {
        ShapeMatch::NoMatch
    }
}

fn serial_days(days: u64) -> Option<ParsedDate> {
    let date = serial_base()?.checked_add_days(Days::new(days))?;
    midnight_millis(date).map(|ms| ParsedDate::new(ms, "serial-days"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(m: ShapeMatch) -> i64 {
        match m {
            ShapeMatch::Parsed(p) => p.millis,
            other => panic!("expected parsed date, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_year() {
        assert_eq!(millis(parse_int(2025)), 1_735_689_600_000);
    }

    #[test]
    fn test_serial_days() {
        // 45000 days after 1899-12-30 is 2023-03-15
        let m = parse_int(45_000);
        assert_eq!(millis(m), 1_678_838_400_000);
        assert!(matches!(m, ShapeMatch::Parsed(p) if p.shape == "serial-days"));
    }

    #[test]
    fn test_fractional_serial_days_drop_time() {
        assert_eq!(parse_float(45_000.75), parse_int(45_000));
    }

    #[test]
    fn test_epoch_seconds_and_millis() {
        assert_eq!(millis(parse_int(1_735_689_600)), 1_735_689_600_000);
        assert_eq!(millis(parse_int(1_735_689_600_000)), 1_735_689_600_000);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(parse_int(7), ShapeMatch::NoMatch);
        assert_eq!(parse_int(-1_000), ShapeMatch::NoMatch);
        assert_eq!(parse_float(f64::NAN), ShapeMatch::NoMatch);
        assert_eq!(parse_float(3.5), ShapeMatch::NoMatch);
    }
}
