//! Row selection for the table layout.

use crate::domain::{Journal, JournalKey};
use std::collections::BTreeSet;

/// Tri-state of the "select all" checkbox for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    None,
    Indeterminate,
    All,
}

impl SelectAllState {
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::None => "[ ]",
            Self::Indeterminate => "[-]",
            Self::All => "[x]",
        }
    }
}

/// Selected rows, keyed by journal identity so selection survives paging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: BTreeSet<JournalKey>,
}

impl Selection {
    #[must_use]
    pub fn is_selected(&self, journal: &Journal) -> bool {
        self.keys.contains(&journal.key())
    }

    /// Flips one row. Returns the new selected state.
    pub fn toggle(&mut self, journal: &Journal) -> bool {
        let key = journal.key();
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    #[must_use]
    pub fn state_for(&self, page: &[Journal]) -> SelectAllState {
        let selected = page.iter().filter(|j| self.is_selected(j)).count();
        match selected {
            0 => SelectAllState::None,
            n if n == page.len() => SelectAllState::All,
            _ => SelectAllState::Indeterminate,
        }
    }

    /// Select-all over exactly the given page: clears the page when it is
    /// fully selected, otherwise selects every row on it.
    pub fn toggle_page(&mut self, page: &[Journal]) {
        if self.state_for(page) == SelectAllState::All {
            for journal in page {
                self.keys.remove(&journal.key());
            }
        } else {
            self.keys.extend(page.iter().map(Journal::key));
        }
    }

    /// Selected records in result order.
    #[must_use]
    pub fn collect<'a>(&self, results: &'a [Journal]) -> Vec<&'a Journal> {
        results.iter().filter(|j| self.is_selected(j)).collect()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page() -> Vec<Journal> {
        (0..3)
            .map(|i| Journal { title: format!("J{i}"), issn: format!("{i}"), ..Journal::default() })
            .collect()
    }

    #[test]
    fn select_all_state_tracks_page() {
        let rows = page();
        let mut selection = Selection::default();
        assert_eq!(selection.state_for(&rows), SelectAllState::None);

        selection.toggle(&rows[1]);
        assert_eq!(selection.state_for(&rows), SelectAllState::Indeterminate);

        selection.toggle_page(&rows);
        assert_eq!(selection.state_for(&rows), SelectAllState::All);

        selection.toggle_page(&rows);
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_only_touches_given_page() {
        let rows = page();
        let mut selection = Selection::default();
        selection.toggle_page(&rows[..2]);
        assert_eq!(selection.len(), 2);
        assert!(!selection.is_selected(&rows[2]));
    }

    #[test]
    fn collect_keeps_result_order() {
        let rows = page();
        let mut selection = Selection::default();
        selection.toggle(&rows[2]);
        selection.toggle(&rows[0]);
        let titles: Vec<&str> = selection.collect(&rows).iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["J0", "J2"]);
    }
}
