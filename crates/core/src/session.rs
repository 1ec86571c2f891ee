//! Draw session classification from free-form labels.

use crate::types::DrawSession;

/// Classify a draw-session label by case-insensitive prefix.
///
/// `"Midday"`, `"mid"` and `"MID-DAY"` are midday; `"Evening"` and `"EVE"`
/// are evening; anything else, including an absent label, is unknown.
#[must_use]
pub fn classify(label: Option<&str>) -> DrawSession {
    let Some(label) = label else {
        return DrawSession::Unknown;
    };
    let lower = label.to_lowercase();
    if lower.starts_with("mid") {
        DrawSession::Midday
    } else if lower.starts_with("eve") {
        DrawSession::Evening
    } else {
        DrawSession::Unknown
    }
}
