//! Prediction sets: flatten, normalize, sort.
//!
//! A game's predictions arrive as a list of sets. The sets are flattened
//! into one list before sorting, so the display order never depends on where
//! the set boundaries fell.

use serde::Serialize;

use crate::code::CodeNormalizer;
use crate::sort;
use crate::target;
use crate::types::{Code3, RawValue, TargetDigit};

/// One game's predictions in ascending numeric order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionSet {
    codes: Vec<Code3>,
    /// Cells that carried no usable code, in input order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<RawValue>,
}

impl PredictionSet {
    /// Flatten `sets`, normalize every non-blank cell and sort the result.
    #[must_use]
    pub fn from_sets(sets: &[Vec<RawValue>], codes: &CodeNormalizer) -> Self {
        Self::from_cells(sets.iter().flatten(), codes)
    }

    /// Normalize and sort an already flat sequence of cells.
    #[must_use]
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a RawValue>, codes: &CodeNormalizer) -> Self {
        let mut normalized = Vec::new();
        let mut rejected = Vec::new();

        for cell in cells {
            if cell.is_blank() {
                continue;
            }
            match codes.normalize(cell) {
                Ok(code) => normalized.push(code),
                Err(err) => {
                    tracing::debug!(%err, "skipping prediction cell");
                    rejected.push(cell.clone());
                }
            }
        }

        Self {
            codes: sort::sort_ascending(normalized),
            rejected,
        }
    }

    #[must_use]
    pub fn codes(&self) -> &[Code3] {
        &self.codes
    }

    #[must_use]
    pub fn rejected(&self) -> &[RawValue] {
        &self.rejected
    }

    /// Codes with the leading digit replaced; order is unchanged.
    #[must_use]
    pub fn targeted(&self, digit: Option<TargetDigit>) -> Vec<Code3> {
        target::apply(&self.codes, digit)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
