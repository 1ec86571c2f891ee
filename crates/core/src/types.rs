//! Core types for Pickline.
//!
//! Raw cells arrive untyped from the source document and stay [`RawValue`]s
//! until one of the normalizers turns them into a canonical type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// One untyped cell exactly as it appeared in the source document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Missing,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Other(JsonValue),
}

impl RawValue {
    /// Returns the type name as a string.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Other(_) => "other",
        }
    }

    /// String form used for display and digit extraction.
    ///
    /// Missing cells become the empty string and integral floats drop their
    /// fractional part (`7.0` → `"7"`).
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Missing => String::new(),
            Self::Text(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Other(v) => v.to_string(),
        }
    }

    /// True for cells that carry nothing worth normalizing (missing or empty text).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<&JsonValue> for RawValue {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Missing,
            JsonValue::String(s) => Self::Text(s.clone()),
            JsonValue::Bool(b) => Self::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    Self::Other(value.clone())
                }
            }
            other => Self::Other(other.clone()),
        }
    }
}

impl From<JsonValue> for RawValue {
    fn from(value: JsonValue) -> Self {
        Self::from(&value)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Epoch-millisecond timestamp used only for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "millis", rename_all = "lowercase")]
pub enum CanonicalTimestamp {
    Millis(i64),
    Unparseable,
}

impl CanonicalTimestamp {
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Millis(_))
    }

    #[must_use]
    pub fn millis(&self) -> Option<i64> {
        match self {
            Self::Millis(ms) => Some(*ms),
            Self::Unparseable => None,
        }
    }
}

impl From<Option<i64>> for CanonicalTimestamp {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Unparseable, Self::Millis)
    }
}

/// A successful date parse with the shape that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedDate {
    pub millis: i64,
    /// Id of the [`DateShape`](crate::shape::DateShape) that matched.
    pub shape: &'static str,
    /// Set when another reading of the same digits is also a valid date.
    pub ambiguous: bool,
}

impl ParsedDate {
    #[must_use]
    pub fn new(millis: i64, shape: &'static str) -> Self {
        Self {
            millis,
            shape,
            ambiguous: false,
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> CanonicalTimestamp {
        CanonicalTimestamp::Millis(self.millis)
    }
}

/// Canonical three-digit code, leading zeros preserved.
///
/// Only [`CodeNormalizer`](crate::code::CodeNormalizer) and
/// [`Code3::with_leading`] construct values, so the width invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code3(String);

impl Code3 {
    /// Build from a string already known to be exactly three ASCII digits.
    pub(crate) fn from_digits(digits: String) -> Option<Self> {
        (digits.len() == 3 && digits.bytes().all(|b| b.is_ascii_digit())).then_some(Self(digits))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Copy of this code with the first digit replaced.
    #[must_use]
    pub fn with_leading(&self, digit: TargetDigit) -> Self {
        let mut s = String::with_capacity(3);
        s.push(digit.as_char());
        s.push_str(&self.0[1..]);
        Self(s)
    }
}

impl fmt::Display for Code3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code3 {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Code3 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A leading digit chosen by the user, always `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub struct TargetDigit(u8);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetDigitError {
    #[error("target digit must be 0-9, got {0}")]
    OutOfRange(u8),

    #[error("target digit must be a single digit, got '{0}'")]
    NotADigit(String),
}

impl TargetDigit {
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<u8> for TargetDigit {
    type Error = TargetDigitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= 9 {
            Ok(Self(value))
        } else {
            Err(TargetDigitError::OutOfRange(value))
        }
    }
}

impl FromStr for TargetDigit {
    type Err = TargetDigitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.as_bytes() {
            [b @ b'0'..=b'9'] => Ok(Self(b - b'0')),
            _ => Err(TargetDigitError::NotADigit(trimmed.to_string())),
        }
    }
}

impl From<TargetDigit> for u8 {
    fn from(digit: TargetDigit) -> Self {
        digit.0
    }
}

impl fmt::Display for TargetDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Same-day drawing instance a history row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DrawSession {
    Midday,
    Evening,
    #[default]
    Unknown,
}

impl DrawSession {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Midday => "Midday",
            Self::Evening => "Evening",
            Self::Unknown => "Unknown",
        }
    }

    /// Heading shown above the prediction lists.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Midday => "Midday Predictions",
            Self::Evening => "Evening Predictions",
            Self::Unknown => "Today's Predictions",
        }
    }

    /// Short per-row badge text.
    #[must_use]
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Midday => "Mid",
            Self::Evening => "Eve",
            Self::Unknown => "",
        }
    }
}

impl fmt::Display for DrawSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_value_from_json() {
        assert_eq!(RawValue::from(&json!(null)), RawValue::Missing);
        assert_eq!(RawValue::from(&json!("9/17/2025")), RawValue::Text("9/17/2025".into()));
        assert_eq!(RawValue::from(&json!(7)), RawValue::Int(7));
        assert_eq!(RawValue::from(&json!(7.5)), RawValue::Float(7.5));
        assert_eq!(RawValue::from(&json!(true)), RawValue::Bool(true));
        assert_eq!(RawValue::from(&json!([1, 2])).type_name(), "other");
    }

    #[test]
    fn test_raw_value_display() {
        assert_eq!(RawValue::Missing.display(), "");
        assert_eq!(RawValue::Float(7.0).display(), "7");
        assert_eq!(RawValue::Float(7.5).display(), "7.5");
        assert_eq!(RawValue::Int(42).display(), "42");
    }

    #[test]
    fn test_code3_leading() {
        let code = Code3::from_digits("050".to_string()).unwrap();

        let nine = TargetDigit::try_from(9).unwrap();
        assert_eq!(code.with_leading(nine).as_str(), "950");
        assert_eq!(code.as_str(), "050");
    }

    #[test]
    fn test_code3_rejects_bad_width() {
        assert!(Code3::from_digits("12".to_string()).is_none());
        assert!(Code3::from_digits("1234".to_string()).is_none());
        assert!(Code3::from_digits("1a3".to_string()).is_none());
    }

    #[test]
    fn test_target_digit_parsing() {
        assert_eq!("7".parse::<TargetDigit>().unwrap().get(), 7);
        assert_eq!(" 0 ".parse::<TargetDigit>().unwrap().get(), 0);
        assert!("10".parse::<TargetDigit>().is_err());
        assert!("x".parse::<TargetDigit>().is_err());
        assert_eq!(
            TargetDigit::try_from(12),
            Err(TargetDigitError::OutOfRange(12))
        );
    }

    #[test]
    fn test_session_titles() {
        assert_eq!(DrawSession::Midday.title(), "Midday Predictions");
        assert_eq!(DrawSession::Evening.badge(), "Eve");
        assert_eq!(DrawSession::Unknown.title(), "Today's Predictions");
    }

    #[test]
    fn test_timestamp_serializes_tagged() {
        let ts = CanonicalTimestamp::Millis(1_735_689_600_000);
        assert_eq!(
            serde_json::to_value(ts).unwrap(),
            json!({"kind": "millis", "millis": 1_735_689_600_000_i64})
        );
    }
}
