//! Three-digit code normalization.
//!
//! Cells arrive as numbers (`7`), short strings (`"42"`), padded strings
//! (`"007"`) or decorated text (`"4-3-2"`). All of them reduce to a [`Code3`]
//! by keeping only the digits and left-padding with zeros.

use serde::{Deserialize, Serialize};

use crate::types::{Code3, RawValue};

/// What to do with inputs carrying more than three digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Treat as malformed.
    #[default]
    Reject,
    /// Keep the last three digits.
    KeepLast,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("no digits in {0:?}")]
    NoDigits(String),

    #[error("{digits} has more than three digits")]
    TooLong { digits: String },
}

/// Keep only ASCII digits.
#[must_use]
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Converts digit-bearing cells into [`Code3`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeNormalizer {
    overflow: OverflowPolicy,
}

impl CodeNormalizer {
    #[must_use]
    pub fn new(overflow: OverflowPolicy) -> Self {
        Self { overflow }
    }

    /// Normalize a raw cell.
    pub fn normalize(&self, value: &RawValue) -> Result<Code3, CodeError> {
        self.normalize_str(&value.display())
    }

    /// Normalize a text value.
    ///
    /// # Examples
    ///
    /// ```
    /// use pickline_core::code::CodeNormalizer;
    ///
    /// let codes = CodeNormalizer::default();
    /// assert_eq!(codes.normalize_str("42").unwrap().as_str(), "042");
    /// assert!(codes.normalize_str("abc").is_err());
    /// ```
    pub fn normalize_str(&self, input: &str) -> Result<Code3, CodeError> {
        let digits = strip_non_digits(input);
        if digits.is_empty() {
            return Err(CodeError::NoDigits(input.to_string()));
        }

        let digits = if digits.len() > 3 {
            match self.overflow {
                OverflowPolicy::Reject => return Err(CodeError::TooLong { digits }),
                OverflowPolicy::KeepLast => digits[digits.len() - 3..].to_string(),
            }
        } else {
            format!("{digits:0>3}")
        };

        Code3::from_digits(digits.clone()).ok_or(CodeError::TooLong { digits })
    }
}
