//! General calendar-string fallback.
//!
//! Tried last, after the strict shapes. Handles the looser layouts that show
//! up in exported sheets and feed timestamps:
//! - RFC 3339 / RFC 2822 datetimes
//! - `Dec 28, 2025`, `December 28 2025`
//! - `28 Dec 2025`
//! - `2025/12/28`
//! - `28.12.2025`
//! - `12/28/2025 @ 10:41am`
//! - all-digit strings, read with the numeric cell rules (`2025`, `45000`)

use chrono::{DateTime, NaiveDate};

use crate::dates::numeric;
use crate::shape::{calendar_date, midnight_millis, DateShape, ShapeInfo, ShapeMatch};
use crate::types::ParsedDate;

const MONTHS: [(&str, u32); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

fn month_from_prefix(word: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(prefix, _)| word.starts_with(prefix))
        .map(|(_, num)| *num)
}

pub struct GeneralShape;

impl GeneralShape {
    /// Try to parse "Dec 28, 2025" or "December 28, 2025" format.
    fn parse_month_day_year(input: &str) -> Option<NaiveDate> {
        let lower = input.to_lowercase();
        let month = month_from_prefix(&lower)?;
        // Skip any remaining month name letters and spaces
        let rest = lower
            .trim_start_matches(|c: char| c.is_alphabetic())
            .trim();
        let parts: Vec<&str> = rest
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        if parts.len() < 2 {
            return None;
        }
        let day: u32 = parts[0].parse().ok()?;
        let year: i32 = parts[1].parse().ok()?;
        calendar_date(year, month, day)
    }

    /// Try to parse "28 Dec 2025" or "28 December 2025" format.
    fn parse_day_month_year(input: &str) -> Option<NaiveDate> {
        let lower = input.to_lowercase();
        let parts: Vec<&str> = lower.split_whitespace().collect();
        if parts.len() < 3 {
            return None;
        }
        let day: u32 = parts[0].parse().ok()?;
        let month = month_from_prefix(parts[1])?;
        let year: i32 = parts[2].parse().ok()?;
        calendar_date(year, month, day)
    }

    /// Try to parse year-first slash format: YYYY/MM/DD
    fn parse_year_first(input: &str) -> Option<NaiveDate> {
        let parts: Vec<&str> = input.split('/').collect();
        if parts.len() != 3 || parts[0].len() != 4 {
            return None;
        }
        let year: i32 = parts[0].parse().ok()?;
        let month: u32 = parts[1].parse().ok()?;
        let day: u32 = parts[2].parse().ok()?;
        calendar_date(year, month, day)
    }

    /// Try to parse dotted day-first format: DD.MM.YYYY
    fn parse_dotted(input: &str) -> Option<NaiveDate> {
        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() != 3 {
            return None;
        }
        let day: u32 = parts[0].parse().ok()?;
        let month: u32 = parts[1].parse().ok()?;
        let year: i32 = parts[2].parse().ok()?;
        calendar_date(year, month, day)
    }

    /// Try to parse "12/28/2025 @ 10:41am" (US date with @ and time).
    fn parse_us_at_format(input: &str) -> Option<i64> {
        let (date_part, time_part) = input.split_once('@')?;
        let time_part = time_part.trim().to_lowercase();

        let date_parts: Vec<&str> = date_part.trim().split('/').collect();
        if date_parts.len() != 3 {
            return None;
        }
        let month: u32 = date_parts[0].parse().ok()?;
        let day: u32 = date_parts[1].parse().ok()?;
        let year: i32 = date_parts[2].parse().ok()?;

        let (time_str, is_pm) = if let Some(t) = time_part.strip_suffix("pm") {
            (t, true)
        } else if let Some(t) = time_part.strip_suffix("am") {
            (t, false)
        } else {
            (time_part.as_str(), false)
        };

        let time_parts: Vec<&str> = time_str.trim().split(':').collect();
        let mut hour: u32 = time_parts.first()?.parse().ok()?;
        let minute: u32 = time_parts.get(1).unwrap_or(&"0").parse().ok()?;

        if is_pm && hour < 12 {
            hour += 12;
        } else if !is_pm && hour == 12 && time_part.ends_with("am") {
            hour = 0;
        }

        calendar_date(year, month, day)?
            .and_hms_opt(hour, minute, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
    }

    fn parse_digits(input: &str) -> Option<ParsedDate> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match numeric::parse_int(input.parse().ok()?) {
            ShapeMatch::Parsed(parsed) => Some(parsed),
            _ => None,
        }
    }

    fn parse_any(&self, input: &str) -> Option<ParsedDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(ParsedDate::new(dt.timestamp_millis(), self.id()));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
            return Some(ParsedDate::new(dt.timestamp_millis(), self.id()));
        }
        if let Some(ms) = Self::parse_us_at_format(input) {
            return Some(ParsedDate::new(ms, self.id()));
        }
        if let Some(parsed) = Self::parse_digits(input) {
            return Some(parsed);
        }

        let date = Self::parse_month_day_year(input)
            .or_else(|| Self::parse_day_month_year(input))
            .or_else(|| Self::parse_year_first(input))
            .or_else(|| Self::parse_dotted(input))?;
        midnight_millis(date).map(|ms| ParsedDate::new(ms, self.id()))
    }
}

impl DateShape for GeneralShape {
    fn id(&self) -> &'static str {
        "general"
    }

    fn name(&self) -> &'static str {
        "General calendar text"
    }

    fn info(&self) -> ShapeInfo {
        ShapeInfo {
            id: self.id(),
            name: self.name(),
            description: "RFC 2822/3339, month names, YYYY/MM/DD, DD.MM.YYYY, bare years",
            examples: &["Dec 28, 2025", "28 Dec 2025", "Sun, 28 Dec 2025 10:00:00 +0000"],
        }
    }

    fn parse(&self, input: &str) -> ShapeMatch {
        self.parse_any(input)
            .map_or(ShapeMatch::NoMatch, ShapeMatch::Parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEC_28_2025: i64 = 1_766_880_000_000;

    fn millis(input: &str) -> Option<i64> {
        match GeneralShape.parse(input) {
            ShapeMatch::Parsed(p) => Some(p.millis),
            _ => None,
        }
    }

    #[test]
    fn test_month_names() {
        assert_eq!(millis("Dec 28, 2025"), Some(DEC_28_2025));
        assert_eq!(millis("December 28 2025"), Some(DEC_28_2025));
        assert_eq!(millis("28 Dec 2025"), Some(DEC_28_2025));
        assert_eq!(millis("28 december 2025"), Some(DEC_28_2025));
    }

    #[test]
    fn test_year_first_and_dotted() {
        assert_eq!(millis("2025/12/28"), Some(DEC_28_2025));
        assert_eq!(millis("28.12.2025"), Some(DEC_28_2025));
    }

    #[test]
    fn test_rfc2822() {
        assert_eq!(
            millis("Sun, 28 Dec 2025 00:00:00 +0000"),
            Some(DEC_28_2025)
        );
    }

    #[test]
    fn test_us_at_format() {
        // 10:41pm is 22:41 UTC
        let expected = DEC_28_2025 + (22 * 60 + 41) * 60_000;
        assert_eq!(millis("12/28/2025 @ 10:41pm"), Some(expected));
        assert_eq!(millis("12/28/2025 @ 12:00am"), Some(DEC_28_2025));
    }

    #[test]
    fn test_digit_strings_follow_numeric_rules() {
        assert_eq!(millis("2025"), Some(1_735_689_600_000));
        let ShapeMatch::Parsed(p) = GeneralShape.parse("45000") else {
            panic!("serial days should parse");
        };
        assert_eq!(p.shape, "serial-days");
    }

    #[test]
    fn test_garbage() {
        assert_eq!(millis("bad"), None);
        assert_eq!(millis(""), None);
        assert_eq!(millis("Dec 40, 2025"), None);
        assert_eq!(millis("12345"), None);
    }
}
