use crate::domain::model::CardIdentifier;

/// A card held on the reader is reported again once this many identical
/// reads followed its last report.
pub const REAFFIRM_AFTER: u32 = 5;

/// Repeat suppression for a card that stays in the reader's field and is
/// re-read on every poll.
#[derive(Debug, Default, Clone)]
pub struct DebounceEngine {
    previous: Option<CardIdentifier>,
    // reads of `previous` since its last report, the reported read included
    repeat_count: u32,
}

impl DebounceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one valid read; returns whether it should be reported.
    pub fn observe(&mut self, identifier: &CardIdentifier) -> bool {
        let report_worthy =
            self.previous.as_ref() != Some(identifier) || self.repeat_count > REAFFIRM_AFTER;

        if report_worthy {
            self.repeat_count = 0;
        }
        self.repeat_count += 1;
        self.previous = Some(identifier.clone());

        report_worthy
    }

    pub fn previous(&self) -> Option<&CardIdentifier> {
        self.previous.as_ref()
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }
}
