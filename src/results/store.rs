//! The accepted result set and its derived views.
//!
//! [`ResultStore`] only ever displays the response to the most recently
//! issued request: [`expect`](ResultStore::expect) records that id and
//! responses carrying any other id are dropped. Results are de-duplicated on
//! arrival and never re-sorted locally; ordering is the server's.

use super::reveal::{RevealCursor, SentinelEpoch};
use crate::domain::{Journal, ScoutError};
use crate::search::RequestId;
use std::collections::HashSet;
use std::ops::Range;

/// Rows per table page.
pub const PAGE_SIZE: usize = 10;

/// Result layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}

impl ViewMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Table => Self::Cards,
            Self::Cards => Self::Table,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Table => "Table",
            Self::Cards => "Cards",
        }
    }
}

/// Drops records whose `(issn, title)` key was already seen. First
/// occurrence wins and arrival order is kept.
#[must_use]
pub fn dedup(journals: Vec<Journal>) -> Vec<Journal> {
    let mut seen = HashSet::with_capacity(journals.len());
    journals
        .into_iter()
        .filter(|journal| seen.insert(journal.key()))
        .collect()
}

#[derive(Debug, Clone)]
pub struct ResultStore {
    latest: Option<RequestId>,
    results: Vec<Journal>,
    loading: bool,
    has_searched: bool,
    error: Option<String>,
    page: usize,
    view_mode: ViewMode,
    reveal: RevealCursor,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self {
            latest: None,
            results: Vec::new(),
            loading: false,
            has_searched: false,
            error: None,
            page: 1,
            view_mode: ViewMode::default(),
            reveal: RevealCursor::default(),
        }
    }
}

impl ResultStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as the only response worth displaying and starts loading.
    pub fn expect(&mut self, id: RequestId) {
        self.latest = Some(id);
        self.loading = true;
    }

    /// Applies a result set if `id` is the latest expected request.
    ///
    /// Returns `false` for a stale response, which leaves the store untouched.
    pub fn accept(&mut self, id: RequestId, results: Vec<Journal>) -> bool {
        if self.latest != Some(id) {
            tracing::debug!(%id, latest = ?self.latest.map(RequestId::get), "discarding stale results");
            return false;
        }
        let raw = results.len();
        self.results = dedup(results);
        tracing::debug!(%id, raw, unique = self.results.len(), "results accepted");
        self.finish(None);
        true
    }

    /// Records a failed search if `id` is the latest expected request.
    pub fn fail(&mut self, id: RequestId, error: &ScoutError) -> bool {
        if self.latest != Some(id) {
            tracing::debug!(%id, "discarding stale failure");
            return false;
        }
        self.results.clear();
        self.finish(Some(error.to_string()));
        true
    }

    fn finish(&mut self, error: Option<String>) {
        self.loading = false;
        self.has_searched = true;
        self.error = error;
        self.page = 1;
        if self.view_mode == ViewMode::Cards {
            self.reveal.restart(self.results.len());
        }
    }

    #[must_use]
    pub fn results(&self) -> &[Journal] {
        &self.results
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn has_searched(&self) -> bool {
        self.has_searched
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switches layout. Entering cards starts a fresh reveal; leaving cards
    /// disposes the sentinel.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode == mode {
            return;
        }
        self.view_mode = mode;
        match mode {
            ViewMode::Cards => self.reveal.restart(self.results.len()),
            ViewMode::Table => self.reveal.dispose(),
        }
    }

    /// Current 1-based page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        ((self.results.len() + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
    }

    /// Index range of the current page within [`results`](Self::results).
    #[must_use]
    pub fn page_range(&self) -> Range<usize> {
        let start = ((self.page - 1) * PAGE_SIZE).min(self.results.len());
        let end = (start + PAGE_SIZE).min(self.results.len());
        start..end
    }

    #[must_use]
    pub fn page_items(&self) -> &[Journal] {
        &self.results[self.page_range()]
    }

    /// Moves to a 1-based page, clamped into range. Returns `true` on change.
    pub fn set_page(&mut self, page: usize) -> bool {
        let page = page.clamp(1, self.page_count());
        let changed = page != self.page;
        self.page = page;
        changed
    }

    #[must_use]
    pub fn visible_cards(&self) -> &[Journal] {
        &self.results[self.reveal.visible_range()]
    }

    #[must_use]
    pub fn sentinel(&self) -> Option<SentinelEpoch> {
        if self.view_mode == ViewMode::Cards {
            self.reveal.sentinel()
        } else {
            None
        }
    }

    /// Reveals the next chunk of cards for a visible sentinel.
    pub fn reveal_more(&mut self, sentinel: SentinelEpoch) -> bool {
        self.reveal.on_sentinel_visible(sentinel).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn journals(n: usize) -> Vec<Journal> {
        (0..n)
            .map(|i| Journal {
                title: format!("Journal {i}"),
                issn: format!("0000-{i:04}"),
                ..Journal::default()
            })
            .collect()
    }

    fn loaded(n: usize) -> ResultStore {
        let mut store = ResultStore::new();
        store.expect(RequestId::new(1));
        assert!(store.accept(RequestId::new(1), journals(n)));
        store
    }

    #[test]
    fn dedup_keeps_first_and_is_idempotent() {
        let mut input = journals(3);
        input.push(Journal { publisher: "dup".into(), ..input[1].clone() });
        input.push(Journal { title: "Different".into(), ..input[0].clone() });

        let once = dedup(input);
        assert_eq!(once.len(), 4);
        assert_eq!(once[1].publisher, "");
        assert_eq!(dedup(once.clone()), once);
    }

    #[test]
    fn pages_of_ten() {
        let mut store = loaded(25);
        assert_eq!(store.page_count(), 3);
        let sizes: Vec<usize> = (1..=3)
            .map(|p| {
                store.set_page(p);
                store.page_items().len()
            })
            .collect();
        assert_eq!(sizes, vec![10, 10, 5]);
        assert!(!store.set_page(9));
        assert_eq!(store.page(), 3);
    }

    #[test]
    fn switching_to_cards_resets_reveal() {
        let mut store = loaded(25);
        store.set_page(3);
        store.set_view_mode(ViewMode::Cards);
        assert_eq!(store.visible_cards().len(), 10);

        let sentinel = store.sentinel().unwrap();
        assert!(store.reveal_more(sentinel));
        assert_eq!(store.visible_cards().len(), 20);

        store.set_view_mode(ViewMode::Table);
        assert!(store.sentinel().is_none());
        store.set_view_mode(ViewMode::Cards);
        assert_eq!(store.visible_cards().len(), 10);
    }

    #[test]
    fn new_results_reset_page() {
        let mut store = loaded(25);
        store.set_page(2);
        store.expect(RequestId::new(2));
        assert!(store.is_loading());
        store.accept(RequestId::new(2), journals(12));
        assert_eq!(store.page(), 1);
        assert!(!store.is_loading());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut store = ResultStore::new();
        store.expect(RequestId::new(1));
        store.expect(RequestId::new(2));

        assert!(!store.accept(RequestId::new(1), journals(3)));
        assert!(store.is_loading());
        assert!(!store.has_searched());

        assert!(store.accept(RequestId::new(2), journals(1)));
        assert_eq!(store.total(), 1);
    }

    #[test]
    fn failure_empties_results_and_stops_loading() {
        let mut store = loaded(5);
        store.expect(RequestId::new(2));
        assert!(store.fail(RequestId::new(2), &ScoutError::Protocol("data is not an array".into())));
        assert_eq!(store.total(), 0);
        assert!(!store.is_loading());
        assert!(store.has_searched());
        assert_eq!(store.error(), Some("Invalid response format: data is not an array"));
    }

    #[test]
    fn empty_store_has_one_empty_page() {
        let store = ResultStore::new();
        assert_eq!(store.page_count(), 1);
        assert!(store.page_items().is_empty());
    }
}
