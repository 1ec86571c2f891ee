//! Month-first slash dates as they appear in hand-entered history sheets.
//!
//! - `9/17/2025`, `09/17/25` (full slash form)
//! - `9/17 2025` (space instead of the second slash)
//! - `9/172025` (year run straight into the day, no separator)

use regex::Regex;
use std::sync::OnceLock;

use crate::shape::{calendar_date, expand_year, midnight_millis, DateShape, ShapeInfo, ShapeMatch};
use crate::types::ParsedDate;

/// Plausible years when weighing alternative readings of a run-on date.
const PLAUSIBLE_YEARS: std::ops::RangeInclusive<i32> = 1900..=2100;

fn patterns() -> &'static SlashPatterns {
    static PATTERNS: OnceLock<SlashPatterns> = OnceLock::new();
    PATTERNS.get_or_init(SlashPatterns::new)
}

struct SlashPatterns {
    full: Regex,
    spaced_year: Regex,
    run_on_year: Regex,
}

impl SlashPatterns {
    fn new() -> Self {
        Self {
            // 9/17/2025, 09/17/25
            full: Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{2,4})$").unwrap(),
            // 9/17 2025
            spaced_year: Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})\s+([0-9]{2,4})$").unwrap(),
            // 9/172025: day is greedy, year takes the trailing 2-4 digits
            run_on_year: Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})([0-9]{2,4})$").unwrap(),
        }
    }
}

/// Parse month, day and (possibly short) year text into UTC midnight millis.
fn month_day_year(month: &str, day: &str, year: &str) -> Option<i64> {
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    let year = expand_year(year.parse().ok()?);
    midnight_millis(calendar_date(year, month, day)?)
}

fn match_with(regex: &Regex, input: &str, shape: &'static str) -> ShapeMatch {
    let Some(caps) = regex.captures(input) else {
        return ShapeMatch::NoMatch;
    };
    ShapeMatch::matched(
        month_day_year(&caps[1], &caps[2], &caps[3]).map(|ms| ParsedDate::new(ms, shape)),
    )
}

pub struct SlashDateShape;

impl DateShape for SlashDateShape {
    fn id(&self) -> &'static str {
        "slash"
    }

    fn name(&self) -> &'static str {
        "Month/Day/Year"
    }

    fn info(&self) -> ShapeInfo {
        ShapeInfo {
            id: self.id(),
            name: self.name(),
            description: "MM/DD/YYYY or MM/DD/YY (two-digit years are 20xx)",
            examples: &["9/17/2025", "09/17/25"],
        }
    }

    fn parse(&self, input: &str) -> ShapeMatch {
        match_with(&patterns().full, input, self.id())
    }
}

pub struct SpacedYearShape;

impl DateShape for SpacedYearShape {
    fn id(&self) -> &'static str {
        "slash-space-year"
    }

    fn name(&self) -> &'static str {
        "Month/Day Year"
    }

    fn info(&self) -> ShapeInfo {
        ShapeInfo {
            id: self.id(),
            name: self.name(),
            description: "MM/DD YYYY with a space before the year",
            examples: &["9/17 2025", "12/1 25"],
        }
    }

    fn parse(&self, input: &str) -> ShapeMatch {
        match_with(&patterns().spaced_year, input, self.id())
    }
}

/// `MM/DDYYYY`: the day and year digits are run together.
///
/// The split is taken from the regex (day greedy, year the trailing run), so
/// `9/12025` reads as September 12, 2025 even though September 1, 2025 fits
/// the same digits. Such inputs come back with `ambiguous` set.
pub struct RunOnYearShape;

impl RunOnYearShape {
    /// Count the readings of `digits` (day followed by year) that are real dates.
    fn valid_readings(month: u32, digits: &str) -> usize {
        (1..=2)
            .filter_map(|day_len| {
                let year_len = digits.len().checked_sub(day_len)?;
                if !(2..=4).contains(&year_len) {
                    return None;
                }
                let day: u32 = digits[..day_len].parse().ok()?;
                let year = expand_year(digits[day_len..].parse().ok()?);
                if !PLAUSIBLE_YEARS.contains(&year) {
                    return None;
                }
                calendar_date(year, month, day)
            })
            .count()
    }
}

impl DateShape for RunOnYearShape {
    fn id(&self) -> &'static str {
        "slash-run-on-year"
    }

    fn name(&self) -> &'static str {
        "Month/DayYear"
    }

    fn info(&self) -> ShapeInfo {
        ShapeInfo {
            id: self.id(),
            name: self.name(),
            description: "MM/DD immediately followed by the year (ambiguous for some digit counts)",
            examples: &["9/172025", "10/0325"],
        }
    }

    fn parse(&self, input: &str) -> ShapeMatch {
        let Some(caps) = patterns().run_on_year.captures(input) else {
            return ShapeMatch::NoMatch;
        };
        let Some(millis) = month_day_year(&caps[1], &caps[2], &caps[3]) else {
            return ShapeMatch::Invalid;
        };

        let digits = format!("{}{}", &caps[2], &caps[3]);
        let ambiguous = caps[1]
            .parse()
            .map(|month| Self::valid_readings(month, &digits) > 1)
            .unwrap_or(false);
        if ambiguous {
            tracing::debug!(input, "run-on year date has more than one valid reading");
        }

        ShapeMatch::Parsed(ParsedDate {
            millis,
            shape: self.id(),
            ambiguous,
        })
    }
}
