//! ISO date prefix: `YYYY-MM-DD`, anything after the day is ignored.

use regex::Regex;
use std::sync::OnceLock;

use crate::shape::{calendar_date, midnight_millis, DateShape, ShapeInfo, ShapeMatch};
use crate::types::ParsedDate;

fn iso_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})").unwrap())
}

pub struct IsoDateShape;

impl DateShape for IsoDateShape {
    fn id(&self) -> &'static str {
        "iso-date"
    }

    fn name(&self) -> &'static str {
        "ISO 8601 date"
    }

    fn info(&self) -> ShapeInfo {
        ShapeInfo {
            id: self.id(),
            name: self.name(),
            description: "YYYY-MM-DD prefix; a trailing time or zone is ignored",
            examples: &["2025-09-17", "2025-09-17T21:30:00Z"],
        }
    }

    fn parse(&self, input: &str) -> ShapeMatch {
        let Some(caps) = iso_prefix().captures(input) else {
            return ShapeMatch::NoMatch;
        };

        let parsed = (|| {
            let year: i32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            let day: u32 = caps[3].parse().ok()?;
            midnight_millis(calendar_date(year, month, day)?)
        })();

        ShapeMatch::matched(parsed.map(|ms| ParsedDate::new(ms, self.id())))
    }
}
