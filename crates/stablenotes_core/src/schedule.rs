//! Debounced save scheduling.
//!
//! # Responsibility
//! - Coalesce bursts of edits into one persistence call per logical slot.
//!
//! # Invariants
//! - One pending deadline per slot; a new edit restarts the timer, so only
//!   the most recent edit inside a window is ever saved.
//! - Slots expire independently; firing one leaves the other pending.

/// Quiet period for title edits.
pub const TITLE_SAVE_DEBOUNCE_MS: i64 = 300;
/// Quiet period for content edits.
pub const CONTENT_SAVE_DEBOUNCE_MS: i64 = 500;

/// Logical operation a debounced save belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveSlot {
    Title,
    Content,
}

impl SaveSlot {
    pub fn debounce_ms(self) -> i64 {
        match self {
            Self::Title => TITLE_SAVE_DEBOUNCE_MS,
            Self::Content => CONTENT_SAVE_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    slot: SaveSlot,
    deadline_ms: i64,
}

/// Poll-driven debounce timers keyed by [`SaveSlot`].
///
/// Deadlines are epoch milliseconds supplied by the caller, which keeps the
/// scheduler deterministic under test.
#[derive(Debug, Default)]
pub struct DebounceScheduler {
    pending: Vec<Pending>,
}

impl DebounceScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)starts the timer for `slot`.
    pub fn schedule(&mut self, slot: SaveSlot, now_ms: i64) {
        self.cancel(slot);
        self.pending.push(Pending {
            slot,
            deadline_ms: now_ms + slot.debounce_ms(),
        });
    }

    /// Drops the pending timer for `slot`, if any.
    pub fn cancel(&mut self, slot: SaveSlot) {
        self.pending.retain(|pending| pending.slot != slot);
    }

    /// Drops every pending timer. Returns whether any was pending.
    pub fn cancel_all(&mut self) -> bool {
        let had_pending = !self.pending.is_empty();
        self.pending.clear();
        had_pending
    }

    pub fn is_pending(&self, slot: SaveSlot) -> bool {
        self.pending.iter().any(|pending| pending.slot == slot)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Earliest pending deadline, for shells that want to sleep until it.
    pub fn next_deadline(&self) -> Option<i64> {
        self.pending.iter().map(|pending| pending.deadline_ms).min()
    }

    /// Removes and returns every slot whose deadline has passed.
    pub fn take_due(&mut self, now_ms: i64) -> Vec<SaveSlot> {
        let (due, rest): (Vec<Pending>, Vec<Pending>) = self
            .pending
            .drain(..)
            .partition(|pending| pending.deadline_ms <= now_ms);
        self.pending = rest;
        due.into_iter().map(|pending| pending.slot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{DebounceScheduler, SaveSlot, CONTENT_SAVE_DEBOUNCE_MS, TITLE_SAVE_DEBOUNCE_MS};

    #[test]
    fn fires_only_after_the_quiet_period() {
        let mut scheduler = DebounceScheduler::new();
        scheduler.schedule(SaveSlot::Title, 1_000);

        assert!(scheduler.take_due(1_000 + TITLE_SAVE_DEBOUNCE_MS - 1).is_empty());
        assert_eq!(
            scheduler.take_due(1_000 + TITLE_SAVE_DEBOUNCE_MS),
            vec![SaveSlot::Title]
        );
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn new_input_restarts_the_timer() {
        let mut scheduler = DebounceScheduler::new();
        scheduler.schedule(SaveSlot::Content, 0);
        scheduler.schedule(SaveSlot::Content, 400);

        assert!(scheduler.take_due(CONTENT_SAVE_DEBOUNCE_MS).is_empty());
        assert_eq!(
            scheduler.take_due(400 + CONTENT_SAVE_DEBOUNCE_MS),
            vec![SaveSlot::Content]
        );
    }

    #[test]
    fn slots_expire_independently() {
        let mut scheduler = DebounceScheduler::new();
        scheduler.schedule(SaveSlot::Title, 0);
        scheduler.schedule(SaveSlot::Content, 0);

        assert_eq!(
            scheduler.take_due(TITLE_SAVE_DEBOUNCE_MS),
            vec![SaveSlot::Title]
        );
        assert!(scheduler.is_pending(SaveSlot::Content));
    }

    #[test]
    fn cancel_all_reports_whether_work_was_dropped() {
        let mut scheduler = DebounceScheduler::new();
        assert!(!scheduler.cancel_all());

        scheduler.schedule(SaveSlot::Title, 0);
        assert!(scheduler.cancel_all());
        assert!(scheduler.next_deadline().is_none());
    }
}
