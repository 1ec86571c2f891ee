//! Draw history rows and their merged ordering.
//!
//! Rows whose date can be read come first, most recent at the top. Rows whose
//! date cannot be read follow in the order they arrived. Nothing is dropped.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::code::CodeNormalizer;
use crate::dates::DateNormalizer;
use crate::display;
use crate::session;
use crate::types::{CanonicalTimestamp, Code3, DrawSession, RawValue};

/// A history row exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    /// `[date, p1, p2, p3, draw, code, ordinal]`
    Positional(Vec<RawValue>),
    /// Named fields (`Date`, `P1`, `Draw`, `Combined`, ...).
    Keyed(BTreeMap<String, RawValue>),
}

/// Field positions of the positional schema.
const DATE: usize = 0;
const P1: usize = 1;
const P2: usize = 2;
const P3: usize = 3;
const DRAW: usize = 4;
const CODE: usize = 5;
const ORDINAL: usize = 6;

/// Accepted key spellings of the named schema, first match wins.
const DATE_KEYS: &[&str] = &["Date", "date"];
const P1_KEYS: &[&str] = &["P1", "p1"];
const P2_KEYS: &[&str] = &["P2", "p2"];
const P3_KEYS: &[&str] = &["P3", "p3"];
const DRAW_KEYS: &[&str] = &["Draw", "draw"];
const CODE_KEYS: &[&str] = &["Combined", "combined", "Prediction", "3-Digit"];
const ORDINAL_KEYS: &[&str] = &["#", "ordinal"];

/// A history row mapped onto the known schema. Values are still untyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryRow {
    pub date: RawValue,
    pub p1: RawValue,
    pub p2: RawValue,
    pub p3: RawValue,
    pub draw: RawValue,
    /// Precomputed display code, if the producer supplied one.
    pub code: RawValue,
    pub ordinal: RawValue,
}

impl From<RawRecord> for HistoryRow {
    fn from(record: RawRecord) -> Self {
        match record {
            RawRecord::Positional(cells) => {
                let at = |i: usize| cells.get(i).cloned().unwrap_or_default();
                Self {
                    date: at(DATE),
                    p1: at(P1),
                    p2: at(P2),
                    p3: at(P3),
                    draw: at(DRAW),
                    code: at(CODE),
                    ordinal: at(ORDINAL),
                }
            }
            RawRecord::Keyed(fields) => {
                let get = |keys: &[&str]| {
                    keys.iter()
                        .find_map(|k| fields.get(*k))
                        .cloned()
                        .unwrap_or_default()
                };
                Self {
                    date: get(DATE_KEYS),
                    p1: get(P1_KEYS),
                    p2: get(P2_KEYS),
                    p3: get(P3_KEYS),
                    draw: get(DRAW_KEYS),
                    code: get(CODE_KEYS),
                    ordinal: get(ORDINAL_KEYS),
                }
            }
        }
    }
}

impl HistoryRow {
    /// Draw label as text, `None` when the cell is missing.
    #[must_use]
    pub fn draw_label(&self) -> Option<String> {
        match &self.draw {
            RawValue::Missing => None,
            other => Some(other.display()),
        }
    }

    /// Code for this row: the supplied display code when present, otherwise
    /// the three position values joined, provided each is a single digit.
    #[must_use]
    pub fn code(&self, codes: &CodeNormalizer) -> Option<Code3> {
        if !self.code.is_blank() {
            return codes.normalize(&self.code).ok();
        }

        let mut joined = String::with_capacity(3);
        for position in [&self.p1, &self.p2, &self.p3] {
            let text = position.display();
            let mut digits = text.trim().chars().filter(char::is_ascii_digit);
            match (digits.next(), digits.next()) {
                (Some(d), None) => joined.push(d),
                _ => return None,
            }
        }
        codes.normalize_str(&joined).ok()
    }
}

/// One merged history row with everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub row: HistoryRow,
    pub timestamp: CanonicalTimestamp,
    /// `M/D/YYYY` when the date parsed, otherwise the original text.
    pub display_date: String,
    pub session: DrawSession,
    pub code: Option<Code3>,
}

/// Merged history: dated prefix (descending) followed by the undated suffix.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderedHistory {
    entries: Vec<HistoryEntry>,
    dated_len: usize,
}

impl OrderedHistory {
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of leading entries whose date parsed.
    #[must_use]
    pub fn dated_len(&self) -> usize {
        self.dated_len
    }

    #[must_use]
    pub fn undated(&self) -> &[HistoryEntry] {
        &self.entries[self.dated_len..]
    }

    /// The most recent entry.
    #[must_use]
    pub fn head(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    /// The first `limit` entries.
    #[must_use]
    pub fn recent(&self, limit: usize) -> &[HistoryEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// Session of the most recent draw.
    #[must_use]
    pub fn session(&self) -> DrawSession {
        let label = self.head().and_then(|entry| entry.row.draw_label());
        session::classify(label.as_deref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stable partition by timestamp: parsed items sorted newest first, then the
/// unparsed items in input order. Returns the ordered items and how many of
/// them were parsed.
pub fn order_by_timestamp<T>(
    items: Vec<T>,
    timestamp: impl Fn(&T) -> CanonicalTimestamp,
) -> (Vec<T>, usize) {
    let mut dated = Vec::new();
    let mut undated = Vec::new();
    for item in items {
        match timestamp(&item).millis() {
            Some(ms) => dated.push((ms, item)),
            None => undated.push(item),
        }
    }

    // sort_by is stable, so equal timestamps keep their input order
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let dated_len = dated.len();
    let mut ordered: Vec<T> = dated.into_iter().map(|(_, item)| item).collect();
    ordered.extend(undated);
    (ordered, dated_len)
}

/// Assembles raw history rows into an [`OrderedHistory`].
pub struct HistoryMerger<'a> {
    dates: &'a DateNormalizer,
    codes: CodeNormalizer,
}

impl<'a> HistoryMerger<'a> {
    #[must_use]
    pub fn new(dates: &'a DateNormalizer, codes: CodeNormalizer) -> Self {
        Self { dates, codes }
    }

    fn entry(&self, row: HistoryRow) -> HistoryEntry {
        let timestamp = self.dates.parse(&row.date);
        let display_date =
            display::month_day_year(timestamp).unwrap_or_else(|| row.date.display());
        let session = session::classify(row.draw_label().as_deref());
        let code = row.code(&self.codes);
        HistoryEntry {
            row,
            timestamp,
            display_date,
            session,
            code,
        }
    }

    /// Merge rows: newest dated rows first, undated rows after, none dropped.
    #[must_use]
    pub fn merge(&self, rows: Vec<HistoryRow>) -> OrderedHistory {
        let entries: Vec<HistoryEntry> = rows.into_iter().map(|row| self.entry(row)).collect();
        let (entries, dated_len) = order_by_timestamp(entries, |e| e.timestamp);

        tracing::debug!(
            dated = dated_len,
            undated = entries.len() - dated_len,
            "merged history"
        );

        OrderedHistory { entries, dated_len }
    }
}
