//! Date shape trait definition.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::ParsedDate;

/// Metadata about a date shape for help/documentation.
#[derive(Debug, Clone, Serialize)]
pub struct ShapeInfo {
    /// Unique identifier (e.g., "slash")
    pub id: &'static str,
    /// Human-readable name (e.g., "Month/Day/Year")
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Example input strings
    pub examples: &'static [&'static str],
}

/// One textual date layout the normalizer knows how to read.
///
/// Shapes are tried in priority order; the first one whose layout matches wins.
pub trait DateShape: Send + Sync {
    /// Unique identifier for this shape (e.g., "slash", "iso-date").
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Get shape metadata for help/documentation.
    fn info(&self) -> ShapeInfo {
        ShapeInfo {
            id: self.id(),
            name: self.name(),
            description: "",
            examples: &[],
        }
    }

    /// Try to read a trimmed input string.
    fn parse(&self, input: &str) -> ShapeMatch;
}

/// Outcome of offering an input to a single shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeMatch {
    /// The input does not have this shape; try the next one.
    NoMatch,
    /// The input has this shape but names no real calendar date (e.g. month 13).
    Invalid,
    Parsed(ParsedDate),
}

impl ShapeMatch {
    /// Wrap an optional parse from a shape whose layout already matched.
    pub(crate) fn matched(parsed: Option<ParsedDate>) -> Self {
        parsed.map_or(Self::Invalid, Self::Parsed)
    }
}

/// Epoch milliseconds of UTC midnight on the given date.
pub(crate) fn midnight_millis(date: NaiveDate) -> Option<i64> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Source convention for short years: anything below 100 is in the 2000s.
pub(crate) fn expand_year(year: i32) -> i32 {
    if year < 100 {
        year + 2000
    } else {
        year
    }
}

/// Build a date from 1-indexed month/day text components.
pub(crate) fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}
