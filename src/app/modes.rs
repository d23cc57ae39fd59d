//! Focus state for keyboard input.
//!
//! The plugin has four focusable regions. Which one holds focus decides how
//! the shim maps keys into events and which footer hints are shown.

/// Region receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Query text entry. Printable keys are typed into the query.
    #[default]
    SearchBar,
    /// The expandable filter panel (fields, publishers, databases, facets).
    FilterPanel,
    /// The selected-filters strip.
    Chips,
    /// The result table or card list.
    Results,
}

impl Focus {
    const ORDER: [Self; 4] = [Self::SearchBar, Self::FilterPanel, Self::Chips, Self::Results];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// The region after this one in tab order.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// The region before this one in tab order.
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::SearchBar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_order_wraps_both_ways() {
        assert_eq!(Focus::Results.next(), Focus::SearchBar);
        assert_eq!(Focus::SearchBar.prev(), Focus::Results);
        assert_eq!(Focus::FilterPanel.next().prev(), Focus::FilterPanel);
    }
}
