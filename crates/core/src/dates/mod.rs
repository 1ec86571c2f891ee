//! Date normalization: any date-like cell to a [`CanonicalTimestamp`].
//!
//! Text is offered to each [`DateShape`] in priority order and the first shape
//! whose layout matches decides the outcome, even if the date it names is not
//! real. Numbers go through the numeric cell rules instead.

mod fallback;
mod iso;
mod numeric;
mod slash;

pub use fallback::GeneralShape;
pub use iso::IsoDateShape;
pub use slash::{RunOnYearShape, SlashDateShape, SpacedYearShape};

use crate::shape::{DateShape, ShapeInfo, ShapeMatch};
use crate::types::{CanonicalTimestamp, ParsedDate, RawValue};

/// Parses date-like cells into canonical timestamps.
///
/// Parsing is pure and total: anything that cannot be read becomes
/// [`CanonicalTimestamp::Unparseable`].
pub struct DateNormalizer {
    shapes: Vec<Box<dyn DateShape>>,
}

impl DateNormalizer {
    /// Create a normalizer with all built-in shapes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shapes: Self::create_shape_list(),
        }
    }

    /// Create a normalizer without the shapes whose ids are listed.
    #[must_use]
    pub fn without(disabled: &[String]) -> Self {
        let shapes = Self::create_shape_list()
            .into_iter()
            .filter(|shape| !disabled.iter().any(|id| id == shape.id()))
            .collect();
        Self { shapes }
    }

    /// Built-in shapes, highest priority first.
    fn create_shape_list() -> Vec<Box<dyn DateShape>> {
        vec![
            Box::new(SlashDateShape),
            Box::new(SpacedYearShape),
            Box::new(RunOnYearShape),
            Box::new(IsoDateShape),
            Box::new(GeneralShape),
        ]
    }

    /// Parse a raw cell.
    #[must_use]
    pub fn parse(&self, value: &RawValue) -> CanonicalTimestamp {
        self.parse_detailed(value)
            .map_or(CanonicalTimestamp::Unparseable, |p| p.timestamp())
    }

    /// Parse a text value.
    #[must_use]
    pub fn parse_str(&self, input: &str) -> CanonicalTimestamp {
        self.parse_str_detailed(input)
            .map_or(CanonicalTimestamp::Unparseable, |p| p.timestamp())
    }

    /// Parse a raw cell, reporting which shape matched.
    #[must_use]
    pub fn parse_detailed(&self, value: &RawValue) -> Option<ParsedDate> {
        let outcome = match value {
            RawValue::Text(s) => return self.parse_str_detailed(s),
            RawValue::Int(n) => numeric::parse_int(*n),
            RawValue::Float(f) => numeric::parse_float(*f),
            RawValue::Missing | RawValue::Bool(_) | RawValue::Other(_) => ShapeMatch::NoMatch,
        };
        match outcome {
            ShapeMatch::Parsed(parsed) => Some(parsed),
            _ => {
                tracing::trace!(kind = value.type_name(), "numeric date cell not recognized");
                None
            }
        }
    }

    /// Parse a text value, reporting which shape matched.
    #[must_use]
    pub fn parse_str_detailed(&self, input: &str) -> Option<ParsedDate> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        for shape in &self.shapes {
            match shape.parse(trimmed) {
                ShapeMatch::NoMatch => continue,
                ShapeMatch::Invalid => {
                    tracing::debug!(input = trimmed, shape = shape.id(), "not a calendar date");
                    return None;
                }
                ShapeMatch::Parsed(parsed) => {
                    tracing::trace!(input = trimmed, shape = shape.id(), "parsed date");
                    return Some(parsed);
                }
            }
        }

        tracing::debug!(input = trimmed, "no date shape matched");
        None
    }

    /// Get info about all active shapes, in priority order.
    #[must_use]
    pub fn shape_infos(&self) -> Vec<ShapeInfo> {
        self.shapes.iter().map(|s| s.info()).collect()
    }

    /// Ids of all active shapes, in priority order.
    #[must_use]
    pub fn shape_ids(&self) -> Vec<&'static str> {
        self.shapes.iter().map(|s| s.id()).collect()
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Datelike};

    fn ymd(ts: CanonicalTimestamp) -> (i32, u32, u32) {
        let dt = DateTime::from_timestamp_millis(ts.millis().expect("parsed")).unwrap();
        (dt.year(), dt.month(), dt.day())
    }

    #[test]
    fn test_priority_order() {
        let dates = DateNormalizer::new();
        assert_eq!(
            dates.shape_ids(),
            vec!["slash", "slash-space-year", "slash-run-on-year", "iso-date", "general"]
        );
    }

    #[test]
    fn test_each_shape() {
        let dates = DateNormalizer::new();
        assert_eq!(ymd(dates.parse_str("09/17/2025")), (2025, 9, 17));
        assert_eq!(ymd(dates.parse_str("9/17 2025")), (2025, 9, 17));
        assert_eq!(ymd(dates.parse_str("9/172025")), (2025, 9, 17));
        assert_eq!(ymd(dates.parse_str("2025-09-17T08:00:00Z")), (2025, 9, 17));
        assert_eq!(ymd(dates.parse_str("Sep 17, 2025")), (2025, 9, 17));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let dates = DateNormalizer::new();
        assert_eq!(dates.parse_str("  1/2/2025 "), dates.parse_str("1/2/2025"));
    }

    #[test]
    fn test_invalid_calendar_stops_search() {
        let dates = DateNormalizer::new();
        assert_eq!(dates.parse_str("13/40/2025"), CanonicalTimestamp::Unparseable);
    }

    #[test]
    fn test_non_text_cells() {
        let dates = DateNormalizer::new();
        assert_eq!(dates.parse(&RawValue::Missing), CanonicalTimestamp::Unparseable);
        assert_eq!(dates.parse(&RawValue::Bool(true)), CanonicalTimestamp::Unparseable);
        assert_eq!(ymd(dates.parse(&RawValue::Int(45_000))), (2023, 3, 15));
        assert_eq!(ymd(dates.parse(&RawValue::Float(2025.0))), (2025, 1, 1));
    }

    #[test]
    fn test_detailed_reports_shape() {
        let dates = DateNormalizer::new();
        let parsed = dates.parse_str_detailed("9/12025").unwrap();
        assert_eq!(parsed.shape, "slash-run-on-year");
        assert!(parsed.ambiguous);
    }

    #[test]
    fn test_disabled_shape_falls_through() {
        let dates = DateNormalizer::without(&["slash-run-on-year".to_string()]);
        assert!(!dates.shape_ids().contains(&"slash-run-on-year"));
        assert_eq!(dates.parse_str("9/172025"), CanonicalTimestamp::Unparseable);
    }
}
