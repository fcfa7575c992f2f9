//! Status ledger
//!
//! Deduplicates the classifier's level-triggered output into edge-triggered
//! status changes, and carries the manual-status hold: a student-initiated
//! `Restroom`/`Activity` suspends automatic status flow entirely until an
//! explicit return to focus.

use attention::AttentionStatus;
use tracing::debug;

/// Edge-trigger and manual-hold state for one student session
#[derive(Debug, Clone, Default)]
pub struct StatusLedger {
    previous_emitted: Option<AttentionStatus>,
    hold: Option<AttentionStatus>,
}

impl StatusLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// The status a UI should currently display
    pub fn displayed(&self) -> Option<AttentionStatus> {
        self.hold.or(self.previous_emitted)
    }

    /// Whether a manual hold is active
    pub fn is_held(&self) -> bool {
        self.hold.is_some()
    }

    /// Feed one classifier result
    ///
    /// Returns `Some(status)` only when it differs from the previously
    /// emitted status and no manual hold is active. Everything else is
    /// swallowed.
    pub fn observe(&mut self, status: AttentionStatus) -> Option<AttentionStatus> {
        if self.hold.is_some() {
            return None;
        }
        if self.previous_emitted == Some(status) {
            return None;
        }
        self.previous_emitted = Some(status);
        Some(status)
    }

    /// Engage a student-initiated status
    ///
    /// Only `Restroom`/`Activity` are accepted. Returns the status to emit,
    /// deduplicated against an identical active hold.
    pub fn set_manual(&mut self, status: AttentionStatus) -> Option<AttentionStatus> {
        if !status.is_manual() {
            debug!(?status, "Ignoring non-manual status for hold");
            return None;
        }
        if self.hold == Some(status) {
            return None;
        }
        self.hold = Some(status);
        Some(status)
    }

    /// Explicit return to focus: clears the hold and forgets the previously
    /// emitted status, so the next classifier tick is treated as a
    /// transition
    pub fn resume(&mut self) {
        self.hold = None;
        self.previous_emitted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_triggered_idempotence() {
        let mut ledger = StatusLedger::new();
        let emitted: Vec<_> = (0..100)
            .filter_map(|_| ledger.observe(AttentionStatus::Focus))
            .collect();
        assert_eq!(emitted, vec![AttentionStatus::Focus]);
    }

    #[test]
    fn test_transitions_emit() {
        let mut ledger = StatusLedger::new();
        let stream = [
            AttentionStatus::Focus,
            AttentionStatus::Unfocus,
            AttentionStatus::Unfocus,
            AttentionStatus::Focus,
        ];
        let emitted: Vec<_> = stream.iter().filter_map(|s| ledger.observe(*s)).collect();
        assert_eq!(
            emitted,
            vec![
                AttentionStatus::Focus,
                AttentionStatus::Unfocus,
                AttentionStatus::Focus,
            ]
        );
    }

    #[test]
    fn test_pause_bypass() {
        let mut ledger = StatusLedger::new();
        assert_eq!(
            ledger.set_manual(AttentionStatus::Restroom),
            Some(AttentionStatus::Restroom)
        );

        // 50 frames that would classify as unfocused change nothing
        for _ in 0..50 {
            assert_eq!(ledger.observe(AttentionStatus::Unfocus), None);
        }
        assert_eq!(ledger.displayed(), Some(AttentionStatus::Restroom));

        ledger.resume();
        assert_eq!(
            ledger.observe(AttentionStatus::Unfocus),
            Some(AttentionStatus::Unfocus)
        );
    }

    #[test]
    fn test_resume_forces_retransition() {
        let mut ledger = StatusLedger::new();
        assert!(ledger.observe(AttentionStatus::Focus).is_some());

        ledger.set_manual(AttentionStatus::Activity);
        ledger.resume();

        // Same status as before the hold still re-emits
        assert_eq!(
            ledger.observe(AttentionStatus::Focus),
            Some(AttentionStatus::Focus)
        );
    }

    #[test]
    fn test_manual_hold_dedup() {
        let mut ledger = StatusLedger::new();
        assert!(ledger.set_manual(AttentionStatus::Restroom).is_some());
        assert_eq!(ledger.set_manual(AttentionStatus::Restroom), None);

        // Switching to a different manual status emits again
        assert_eq!(
            ledger.set_manual(AttentionStatus::Activity),
            Some(AttentionStatus::Activity)
        );
    }

    #[test]
    fn test_automatic_status_cannot_hold() {
        let mut ledger = StatusLedger::new();
        assert_eq!(ledger.set_manual(AttentionStatus::Focus), None);
        assert!(!ledger.is_held());
    }
}
