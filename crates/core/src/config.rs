//! Engine configuration.
//!
//! Every field has a default, so an empty TOML table or JSON object is a
//! valid configuration.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::code::OverflowPolicy;

/// Default number of history rows in the "recent draws" window.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// US Eastern standard time, as a fixed offset.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -5 * 60;

/// Settings that change how the engine normalizes and presents a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Handling of codes with more than three digits.
    pub overflow: OverflowPolicy,
    /// Rows returned by [`OrderedHistory::recent`](crate::history::OrderedHistory::recent).
    pub recent_limit: usize,
    /// Offset of the display zone used for the last-updated line.
    pub utc_offset_minutes: i32,
    /// Zone name appended to the last-updated line.
    pub zone_label: String,
    /// Date shape ids to switch off (see `Pickline::shape_infos`).
    pub disabled_shapes: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            zone_label: "EST".to_string(),
            disabled_shapes: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Display zone offset. Out-of-range values fall back to UTC.
    #[must_use]
    pub fn display_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| {
            tracing::warn!(
                minutes = self.utc_offset_minutes,
                "display offset out of range, using UTC"
            );
            Utc.fix()
        })
    }
}
