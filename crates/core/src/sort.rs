//! Numeric ordering of code-like strings.
//!
//! Strings compare by the integer value of their digits. Strings without any
//! digits sort after every numeric one, and equal values keep their input
//! order.

use std::cmp::Ordering;

use crate::code::strip_non_digits;

/// Sort key for one string: its significant digits, or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericKey {
    /// Digits with leading zeros removed (`"0"` for zero).
    Value(String),
    /// No digits at all; sorts as positive infinity.
    NonNumeric,
}

impl NumericKey {
    #[must_use]
    pub fn of(input: &str) -> Self {
        let digits = strip_non_digits(input);
        if digits.is_empty() {
            return Self::NonNumeric;
        }
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            Self::Value("0".to_string())
        } else {
            Self::Value(significant.to_string())
        }
    }
}

impl Ord for NumericKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Value(_), Self::NonNumeric) => Ordering::Less,
            (Self::NonNumeric, Self::Value(_)) => Ordering::Greater,
            (Self::NonNumeric, Self::NonNumeric) => Ordering::Equal,
        }
    }
}

impl PartialOrd for NumericKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two strings by numeric value.
#[must_use]
pub fn numeric_cmp(a: &str, b: &str) -> Ordering {
    NumericKey::of(a).cmp(&NumericKey::of(b))
}

/// Stable ascending sort by numeric value.
///
/// # Examples
///
/// ```
/// use pickline_core::sort::sort_ascending;
///
/// let sorted = sort_ascending(vec!["050", "007", "999", "abc"]);
/// assert_eq!(sorted, vec!["007", "050", "999", "abc"]);
/// ```
#[must_use]
pub fn sort_ascending<S: AsRef<str>>(mut items: Vec<S>) -> Vec<S> {
    items.sort_by_cached_key(|item| NumericKey::of(item.as_ref()));
    items
}
