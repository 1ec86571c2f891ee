//! Ingestion boundary: raw JSON to a [`Document`].
//!
//! The producer has written several document layouts over time. All of them
//! are accepted here and nothing past this module looks at JSON again.
//! Missing or wrong-typed keys degrade to empty lists; nothing here fails.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::history::{HistoryRow, RawRecord};
use crate::types::RawValue;

const HISTORY_KEYS: &[&str] = &["History", "history", "rows"];
const GAME1_KEYS: &[&str] = &["Game 1", "Results"];
const GAME2_KEYS: &[&str] = &["Game 2", "Pairs"];
const UPDATED_KEYS: &[&str] = &["last_updated", "updated"];

/// A snapshot of the raw document, validated into typed-but-untrusted parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub history: Vec<RawRecord>,
    pub game1: Vec<Vec<RawValue>>,
    pub game2: Vec<Vec<RawValue>>,
    pub last_updated: Option<String>,
}

impl Document {
    /// Parse document text. Invalid JSON yields an empty document.
    #[must_use]
    pub fn from_json_str(text: &str) -> Self {
        match serde_json::from_str::<JsonValue>(text) {
            Ok(value) => Self::from_value(value),
            Err(err) => {
                tracing::warn!(%err, "document is not valid JSON, treating as empty");
                Self::default()
            }
        }
    }

    /// Read a parsed JSON value.
    #[must_use]
    pub fn from_value(value: JsonValue) -> Self {
        match value {
            JsonValue::Array(rows) => Self {
                history: rows.iter().map(record).collect(),
                ..Self::default()
            },
            JsonValue::Object(map) => {
                let lookup = |keys: &[&str]| keys.iter().find_map(|k| map.get(*k));
                Self {
                    history: lookup(HISTORY_KEYS)
                        .map(|v| list_of(v, "history").iter().map(record).collect())
                        .unwrap_or_default(),
                    game1: lookup(GAME1_KEYS)
                        .map(|v| prediction_sets(v, "game 1"))
                        .unwrap_or_default(),
                    game2: lookup(GAME2_KEYS)
                        .map(|v| prediction_sets(v, "game 2"))
                        .unwrap_or_default(),
                    last_updated: lookup(UPDATED_KEYS).and_then(updated_stamp),
                }
            }
            other => {
                tracing::warn!(kind = json_kind(&other), "unexpected document root, treating as empty");
                Self::default()
            }
        }
    }

    /// History rows mapped onto the known schema.
    #[must_use]
    pub fn history_rows(&self) -> Vec<HistoryRow> {
        self.history.iter().cloned().map(HistoryRow::from).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.game1.is_empty() && self.game2.is_empty()
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn list_of<'a>(value: &'a JsonValue, what: &str) -> &'a [JsonValue] {
    match value {
        JsonValue::Array(items) => items,
        other => {
            tracing::warn!(what, kind = json_kind(other), "expected a list, ignoring");
            &[]
        }
    }
}

/// One history row. Scalars become empty positional rows so they still
/// show up (undated) instead of vanishing.
fn record(value: &JsonValue) -> RawRecord {
    match value {
        JsonValue::Array(cells) => RawRecord::Positional(cells.iter().map(RawValue::from).collect()),
        JsonValue::Object(fields) => RawRecord::Keyed(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), RawValue::from(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
        other => {
            tracing::debug!(kind = json_kind(other), "history row is not a list or object");
            RawRecord::Positional(Vec::new())
        }
    }
}

/// A list of sets; a scalar element counts as a set of one.
fn prediction_sets(value: &JsonValue, what: &str) -> Vec<Vec<RawValue>> {
    list_of(value, what)
        .iter()
        .map(|set| match set {
            JsonValue::Array(cells) => cells.iter().map(RawValue::from).collect(),
            scalar => vec![RawValue::from(scalar)],
        })
        .collect()
}

fn updated_stamp(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
        JsonValue::Null | JsonValue::String(_) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_primary_layout() {
        let doc = Document::from_value(json!({
            "History": [["9/17/2025", "4", "3", "2", "Eve", "432", 1]],
            "Game 1": [["5", "12"], ["999"]],
            "Game 2": [["1", "2"]],
            "last_updated": "2025-09-17 21:05:00"
        }));
        assert_eq!(doc.history.len(), 1);
        assert_eq!(doc.game1.len(), 2);
        assert_eq!(doc.game2[0], vec![RawValue::from("1"), RawValue::from("2")]);
        assert_eq!(doc.last_updated.as_deref(), Some("2025-09-17 21:05:00"));
    }

    #[test]
    fn test_alternate_keys_match_primary() {
        let primary = Document::from_value(json!({
            "History": [["1/1/2025"]],
            "Game 1": [["5"]],
            "Game 2": [["6"]],
            "last_updated": "2025-01-01"
        }));
        let alternate = Document::from_value(json!({
            "history": [["1/1/2025"]],
            "Results": [["5"]],
            "Pairs": [["6"]],
            "updated": "2025-01-01"
        }));
        assert_eq!(primary, alternate);
    }

    #[test]
    fn test_bare_array_is_history() {
        let doc = Document::from_value(json!([
            {"Date": "9/17/2025", "Draw": "Mid", "P1": "1", "P2": "2", "P3": "3"}
        ]));
        assert_eq!(doc.history.len(), 1);
        assert!(matches!(doc.history[0], RawRecord::Keyed(_)));
        assert!(doc.game1.is_empty());
    }

    #[test]
    fn test_scalar_elements_are_single_sets() {
        let doc = Document::from_value(json!({"Game 2": ["12", ["34", "56"]]}));
        assert_eq!(
            doc.game2,
            vec![
                vec![RawValue::from("12")],
                vec![RawValue::from("34"), RawValue::from("56")]
            ]
        );
    }

    #[test]
    fn test_malformed_inputs_are_empty() {
        assert_eq!(Document::from_json_str("{not json"), Document::default());
        assert_eq!(Document::from_json_str("42"), Document::default());
        let doc = Document::from_value(json!({"History": "nope", "Game 1": 5}));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_scalar_history_row_kept() {
        let doc = Document::from_value(json!({"History": ["junk", ["1/1/2025"]]}));
        assert_eq!(doc.history[0], RawRecord::Positional(vec![]));
        assert_eq!(doc.history_rows().len(), 2);
    }

    #[test]
    fn test_blank_updated_is_absent() {
        let doc = Document::from_value(json!({"last_updated": "  "}));
        assert_eq!(doc.last_updated, None);
    }
}
