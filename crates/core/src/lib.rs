//! Pickline Core
//!
//! Normalizes a Pick 3 prediction document into display-ready data: dates of
//! any shape to sortable timestamps, messy codes to three digits, history
//! merged newest first, prediction sets flattened and sorted.
//!
//! # Quick Start
//!
//! ```
//! use pickline_core::{Document, Pickline};
//! use serde_json::json;
//!
//! let doc = Document::from_value(json!({
//!     "History": [
//!         ["9/16/2025", "1", "2", "3", "Mid"],
//!         ["9/172025", "4", "3", "2", "Eve"]
//!     ],
//!     "Game 1": [["5", "12"], ["999"]],
//!     "Game 2": [["123", "50"]]
//! }));
//!
//! let dashboard = Pickline::new().process(&doc, None);
//!
//! // Newest draw first, even when the date was written without a slash
//! assert_eq!(dashboard.history.entries()[0].display_date, "9/17/2025");
//! assert_eq!(dashboard.title, "Evening Predictions");
//!
//! let game1: Vec<&str> = dashboard.game1.codes().iter().map(|c| c.as_str()).collect();
//! assert_eq!(game1, ["005", "012", "999"]);
//! ```
//!
//! # Target Digit
//!
//! ```
//! use pickline_core::{Document, Pickline, TargetDigit};
//! use serde_json::json;
//!
//! let doc = Document::from_value(json!({"Game 2": [["123", "50"]]}));
//! let target: TargetDigit = "9".parse().unwrap();
//!
//! let dashboard = Pickline::new().process(&doc, Some(target));
//! let shown: Vec<String> = dashboard.game2_display().iter().map(ToString::to_string).collect();
//! assert_eq!(shown, ["950", "923"]);
//! ```

pub mod code;
pub mod config;
pub mod dates;
pub mod display;
pub mod document;
pub mod history;
pub mod prediction;
pub mod search;
pub mod session;
pub mod shape;
pub mod sort;
pub mod source;
pub mod target;
pub mod types;

pub use code::{CodeError, CodeNormalizer, OverflowPolicy};
pub use config::EngineConfig;
pub use dates::DateNormalizer;
pub use document::Document;
pub use history::{HistoryEntry, HistoryMerger, HistoryRow, OrderedHistory, RawRecord};
pub use prediction::PredictionSet;
pub use search::SearchHits;
pub use shape::{DateShape, ShapeInfo};
pub use types::*;

use serde::Serialize;

/// Everything derived from one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub last_updated: CanonicalTimestamp,
    /// e.g. `11/19/2025 5:43 p.m (EST)`
    pub last_updated_display: Option<String>,
    pub history: OrderedHistory,
    /// Session of the most recent draw.
    pub session: DrawSession,
    pub title: &'static str,
    pub game1: PredictionSet,
    pub game2: PredictionSet,
    pub target: Option<TargetDigit>,
    /// Game 2 with the target digit applied; equal to `game2` without one.
    pub game2_targeted: Vec<Code3>,
    #[serde(skip)]
    recent_limit: usize,
}

impl Dashboard {
    /// The configured window of most recent history entries.
    #[must_use]
    pub fn recent(&self) -> &[HistoryEntry] {
        self.history.recent(self.recent_limit)
    }

    /// Game 2 codes as they should be shown.
    #[must_use]
    pub fn game2_display(&self) -> &[Code3] {
        &self.game2_targeted
    }

    /// Look up a code across all lists. See [`search::find`].
    #[must_use]
    pub fn find(&self, query: &str) -> Option<SearchHits> {
        search::find(self, query)
    }
}

/// Main entry point - a configured engine instance.
///
/// The engine holds no per-run state; one instance can process any number of
/// documents, from any number of threads.
pub struct Pickline {
    dates: DateNormalizer,
    codes: CodeNormalizer,
    config: EngineConfig,
}

impl Pickline {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with custom configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use pickline_core::{EngineConfig, OverflowPolicy, Pickline};
    ///
    /// let engine = Pickline::with_config(EngineConfig {
    ///     overflow: OverflowPolicy::KeepLast,
    ///     ..EngineConfig::default()
    /// });
    /// assert_eq!(engine.normalize_code("1234").unwrap().as_str(), "234");
    /// ```
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            dates: DateNormalizer::without(&config.disabled_shapes),
            codes: CodeNormalizer::new(config.overflow),
            config,
        }
    }

    /// Parse one date string, reporting which shape matched.
    ///
    /// # Examples
    ///
    /// ```
    /// use pickline_core::Pickline;
    ///
    /// let parsed = Pickline::new().parse_date("9/172025").unwrap();
    /// assert_eq!(parsed.shape, "slash-run-on-year");
    /// assert_eq!(parsed.millis, 1_758_067_200_000);
    /// ```
    #[must_use]
    pub fn parse_date(&self, input: &str) -> Option<ParsedDate> {
        self.dates.parse_str_detailed(input)
    }

    /// Normalize one code using the configured overflow policy.
    pub fn normalize_code(&self, input: &str) -> Result<Code3, CodeError> {
        self.codes.normalize_str(input)
    }

    /// Get info about the active date shapes, in priority order.
    #[must_use]
    pub fn shape_infos(&self) -> Vec<ShapeInfo> {
        self.dates.shape_infos()
    }

    /// Derive the full dashboard for a document.
    #[must_use]
    pub fn process(&self, document: &Document, target: Option<TargetDigit>) -> Dashboard {
        let history = HistoryMerger::new(&self.dates, self.codes).merge(document.history_rows());
        let session = history.session();

        let game1 = PredictionSet::from_sets(&document.game1, &self.codes);
        let game2 = PredictionSet::from_sets(&document.game2, &self.codes);
        let game2_targeted = game2.targeted(target);

        let updated = document.last_updated.as_deref();

        tracing::debug!(
            history = history.len(),
            game1 = game1.len(),
            game2 = game2.len(),
            ?session,
            "processed document"
        );

        Dashboard {
            last_updated: updated.map_or(CanonicalTimestamp::Unparseable, |raw| self.dates.parse_str(raw)),
            last_updated_display: display::last_updated(updated, &self.config, &self.dates),
            history,
            session,
            title: session.title(),
            game1,
            game2,
            target,
            game2_targeted,
            recent_limit: self.config.recent_limit,
        }
    }

    /// Parse document text and process it. Invalid text yields an empty dashboard.
    #[must_use]
    pub fn process_json(&self, text: &str, target: Option<TargetDigit>) -> Dashboard {
        self.process(&Document::from_json_str(text), target)
    }
}

impl Default for Pickline {
    fn default() -> Self {
        Self::new()
    }
}
