//! Attention status vocabulary and classifier state

use serde::{Deserialize, Serialize};

/// Discrete attention status
///
/// `Restroom` and `Activity` are student-initiated: they bypass the
/// classifier and are set by explicit user action only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttentionStatus {
    Focus,
    Unfocus,
    Sleeping,
    Away,
    Restroom,
    Activity,
}

impl AttentionStatus {
    /// Whether this status can only be set by explicit user action
    pub fn is_manual(&self) -> bool {
        matches!(self, AttentionStatus::Restroom | AttentionStatus::Activity)
    }
}

/// Classifier state tracked across frames
#[derive(Debug, Clone, Default)]
pub struct ClassifierState {
    /// Consecutive frames without a detected face
    pub face_missing_count: u32,

    /// Frame timestamp at which eyes transitioned open -> closed (ms)
    pub eyes_closed_since: Option<u64>,
}

impl ClassifierState {
    /// Reset to session start
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_screaming_snake() {
        let json = serde_json::to_string(&AttentionStatus::Unfocus).unwrap();
        assert_eq!(json, "\"UNFOCUS\"");
        let parsed: AttentionStatus = serde_json::from_str("\"SLEEPING\"").unwrap();
        assert_eq!(parsed, AttentionStatus::Sleeping);
    }

    #[test]
    fn test_manual_statuses() {
        assert!(AttentionStatus::Restroom.is_manual());
        assert!(AttentionStatus::Activity.is_manual());
        assert!(!AttentionStatus::Focus.is_manual());
        assert!(!AttentionStatus::Away.is_manual());
    }
}
