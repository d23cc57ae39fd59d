//! Incremental reveal for the card layout.
//!
//! The card view shows results in chunks. A sentinel sits after the last
//! revealed card; when it scrolls into view the presenter signals it and the
//! next chunk is pulled. Each sentinel carries the epoch it was created in,
//! and the epoch moves whenever the item list or the layout changes, so a
//! signal from a sentinel that no longer exists is ignored.

use std::ops::Range;

/// Cards revealed per chunk, and the initial count.
pub const REVEAL_CHUNK: usize = 10;

/// Identity of one sentinel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentinelEpoch(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealCursor {
    total: usize,
    revealed: usize,
    epoch: u64,
    active: bool,
}

impl Default for RevealCursor {
    fn default() -> Self {
        Self {
            total: 0,
            revealed: REVEAL_CHUNK,
            epoch: 0,
            active: false,
        }
    }
}

impl RevealCursor {
    /// Starts a fresh sequence over `total` items and re-creates the sentinel.
    pub fn restart(&mut self, total: usize) {
        self.total = total;
        self.revealed = REVEAL_CHUNK;
        self.epoch += 1;
        self.active = true;
    }

    /// Disposes the sentinel; signals carrying its epoch become stale.
    pub fn dispose(&mut self) {
        self.epoch += 1;
        self.active = false;
    }

    /// Number of items currently shown, capped at the total.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.revealed.min(self.total)
    }

    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        0..self.visible_count()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.revealed >= self.total
    }

    /// The live sentinel, if there is anything left to reveal.
    #[must_use]
    pub fn sentinel(&self) -> Option<SentinelEpoch> {
        (self.active && !self.is_exhausted()).then_some(SentinelEpoch(self.epoch))
    }

    /// Pulls the next chunk in response to a sentinel becoming visible.
    ///
    /// Returns the newly revealed index range, or `None` when the signal is
    /// stale or the sequence is exhausted.
    pub fn on_sentinel_visible(&mut self, sentinel: SentinelEpoch) -> Option<Range<usize>> {
        if sentinel != SentinelEpoch(self.epoch) || !self.active || self.is_exhausted() {
            tracing::debug!(epoch = sentinel.0, current = self.epoch, "ignoring stale sentinel");
            return None;
        }
        let start = self.visible_count();
        self.revealed = (self.revealed + REVEAL_CHUNK).min(self.total);
        Some(start..self.visible_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reveals_in_chunks_up_to_total() {
        let mut cursor = RevealCursor::default();
        cursor.restart(25);
        assert_eq!(cursor.visible_count(), 10);

        let sentinel = cursor.sentinel().unwrap();
        assert_eq!(cursor.on_sentinel_visible(sentinel), Some(10..20));
        let sentinel = cursor.sentinel().unwrap();
        assert_eq!(cursor.on_sentinel_visible(sentinel), Some(20..25));
        assert!(cursor.sentinel().is_none());
        assert_eq!(cursor.on_sentinel_visible(sentinel), None);
    }

    #[test]
    fn small_sets_have_no_sentinel() {
        let mut cursor = RevealCursor::default();
        cursor.restart(4);
        assert_eq!(cursor.visible_count(), 4);
        assert!(cursor.sentinel().is_none());
    }

    #[test]
    fn restart_invalidates_old_sentinel() {
        let mut cursor = RevealCursor::default();
        cursor.restart(40);
        let old = cursor.sentinel().unwrap();
        cursor.restart(40);
        assert_eq!(cursor.on_sentinel_visible(old), None);
        assert_eq!(cursor.visible_count(), 10);
    }

    #[test]
    fn disposed_cursor_ignores_signals() {
        let mut cursor = RevealCursor::default();
        cursor.restart(40);
        let sentinel = cursor.sentinel().unwrap();
        cursor.dispose();
        assert_eq!(cursor.on_sentinel_visible(sentinel), None);
        assert!(cursor.sentinel().is_none());
    }
}
