//! Code lookup across a dashboard.
//!
//! A full three-digit query matches codes exactly. Shorter queries match any
//! code containing the digits, which narrows results while a query is typed.

use serde::Serialize;

use crate::code::strip_non_digits;
use crate::types::Code3;
use crate::Dashboard;

/// Positions of matching codes in each dashboard list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchHits {
    /// The digits that were searched for.
    pub query: String,
    /// Indices into `Dashboard::history` entries.
    pub history: Vec<usize>,
    /// Indices into the Game 1 codes.
    pub game1: Vec<usize>,
    /// Indices into the Game 2 list as displayed (targeted when a target is set).
    pub game2: Vec<usize>,
}

impl SearchHits {
    #[must_use]
    pub fn total(&self) -> usize {
        self.history.len() + self.game1.len() + self.game2.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn matches(code: &Code3, query: &str) -> bool {
    if query.len() >= 3 {
        code.as_str() == query
    } else {
        code.as_str().contains(query)
    }
}

fn positions<'a>(codes: impl IntoIterator<Item = &'a Code3>, query: &str) -> Vec<usize> {
    codes
        .into_iter()
        .enumerate()
        .filter(|(_, code)| matches(code, query))
        .map(|(i, _)| i)
        .collect()
}

/// Find `query` in a dashboard. Non-digits in the query are ignored; a query
/// without digits returns `None`. Queries longer than three digits can never
/// match and yield empty hits.
#[must_use]
pub fn find(dashboard: &Dashboard, query: &str) -> Option<SearchHits> {
    let digits = strip_non_digits(query);
    if digits.is_empty() {
        return None;
    }

    let history = dashboard
        .history
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.code.as_ref().is_some_and(|c| matches(c, &digits)))
        .map(|(i, _)| i)
        .collect();

    let hits = SearchHits {
        history,
        game1: positions(dashboard.game1.codes(), &digits),
        game2: positions(dashboard.game2_display(), &digits),
        query: digits,
    };
    tracing::debug!(query = %hits.query, total = hits.total(), "search");
    Some(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::types::TargetDigit;
    use crate::Pickline;
    use serde_json::json;

    fn dashboard(target: Option<u8>) -> Dashboard {
        let doc = Document::from_value(json!({
            "History": [
                ["9/17/2025", "4", "3", "2", "Eve"],
                ["9/16/2025", "1", "2", "3", "Mid"]
            ],
            "Game 1": [["432", "12"]],
            "Game 2": [["532", "123"]]
        }));
        let target = target.map(|d| TargetDigit::try_from(d).unwrap());
        Pickline::new().process(&doc, target)
    }

    #[test]
    fn test_exact_three_digit_match() {
        let hits = find(&dashboard(None), "432").unwrap();
        assert_eq!(hits.history, vec![0]);
        assert_eq!(hits.game1, vec![1]);
        assert!(hits.game2.is_empty());
    }

    #[test]
    fn test_partial_match_narrows() {
        let hits = find(&dashboard(None), "12").unwrap();
        // history 123, game1 012, game2 123
        assert_eq!(hits.history, vec![1]);
        assert_eq!(hits.game1, vec![0]);
        assert_eq!(hits.game2, vec![0]);
    }

    #[test]
    fn test_searches_targeted_game2() {
        let hits = find(&dashboard(Some(4)), "432").unwrap();
        // 123 -> 423, 532 -> 432
        assert_eq!(hits.game2, vec![1]);
    }

    #[test]
    fn test_no_digits_is_none() {
        assert_eq!(find(&dashboard(None), ""), None);
        assert_eq!(find(&dashboard(None), "abc"), None);
    }

    #[test]
    fn test_long_query_never_matches() {
        let hits = find(&dashboard(None), "4321").unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_punctuation_ignored() {
        assert_eq!(find(&dashboard(None), "4-3-2"), find(&dashboard(None), "432"));
    }
}
