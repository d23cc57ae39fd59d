//! Filter editing operations.
//!
//! [`FilterEditor`] owns the [`FilterCriteria`] and is the only thing that
//! mutates it. Besides the criteria it keeps two pieces of editor-only state:
//!
//! - the "include Aims & Scope in match" sub-option, which is folded into the
//!   outgoing search fields at normalization time and never shown as a chip
//! - the quartile values entered before the quartile facet was switched off,
//!   so switching it back on restores them
//!
//! Range facets deliberately do not retain their values: switching a range on
//! always populates the documented default interval.

use super::model::{
    Facet, FilterCriteria, FilterPatch, Quartile, RangeFacet, ScoreRange, SearchField,
};
use std::collections::BTreeSet;

/// Optional facets that can be switched on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalFacet {
    Quartiles,
    CiteScore,
    ImpactFactor,
}

impl OptionalFacet {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quartiles => "Quartiles",
            Self::CiteScore => "CiteScore",
            Self::ImpactFactor => "Impact Factor",
        }
    }

    const fn as_range(self) -> Option<RangeFacet> {
        match self {
            Self::Quartiles => None,
            Self::CiteScore => Some(RangeFacet::CiteScore),
            Self::ImpactFactor => Some(RangeFacet::ImpactFactor),
        }
    }
}

impl From<RangeFacet> for OptionalFacet {
    fn from(facet: RangeFacet) -> Self {
        match facet {
            RangeFacet::CiteScore => Self::CiteScore,
            RangeFacet::ImpactFactor => Self::ImpactFactor,
        }
    }
}

/// A single value inside a set-like facet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FacetValue {
    SearchField(SearchField),
    Publisher(String),
    Database(String),
    Quartile(Quartile),
}

/// Which end of a range a nudge applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeBound {
    Lower,
    Upper,
}

/// What a selected-filter chip stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChipKind {
    Field(SearchField),
    Publisher(String),
    Database(String),
    Quartiles,
    Range(RangeFacet),
}

/// One entry of the selected-filters strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub kind: ChipKind,
    pub label: String,
    pub removable: bool,
}

/// Mutates a [`FilterCriteria`] in response to user input.
#[derive(Debug, Clone, Default)]
pub struct FilterEditor {
    criteria: FilterCriteria,
    include_aims_and_scope: bool,
    retained_quartiles: BTreeSet<Quartile>,
}

impl FilterEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn include_aims_and_scope(&self) -> bool {
        self.include_aims_and_scope
    }

    /// Whether the Aims & Scope sub-option is currently offered.
    #[must_use]
    pub fn aims_and_scope_option_visible(&self) -> bool {
        self.criteria.title_selected()
    }

    /// Shallow structural merge, one key at a time.
    ///
    /// An active quartile set arriving through a patch becomes the retained
    /// value for later re-enabling.
    pub fn update_filters(&mut self, patch: FilterPatch) {
        if let Some(Facet::Active(quartiles)) = &patch.quartiles {
            self.retained_quartiles.clone_from(quartiles);
        }
        self.criteria.merge(patch);
    }

    #[must_use]
    pub const fn is_facet_enabled(&self, facet: OptionalFacet) -> bool {
        match facet {
            OptionalFacet::Quartiles => self.criteria.quartiles.is_active(),
            OptionalFacet::CiteScore => self.criteria.cite_score_range.is_active(),
            OptionalFacet::ImpactFactor => self.criteria.impact_factor_range.is_active(),
        }
    }

    /// Switches an optional facet on or off. Returns `true` if anything changed.
    ///
    /// Off removes the facet from the criteria entirely. On restores retained
    /// quartiles, or the default interval for ranges.
    pub fn toggle_facet(&mut self, facet: OptionalFacet, enabled: bool) -> bool {
        if self.is_facet_enabled(facet) == enabled {
            return false;
        }

        tracing::debug!(facet = facet.label(), enabled, "toggling facet");

        match (facet.as_range(), enabled) {
            (None, true) => {
                self.criteria.quartiles = Facet::Active(self.retained_quartiles.clone());
            }
            (None, false) => {
                if let Facet::Active(quartiles) = std::mem::take(&mut self.criteria.quartiles) {
                    self.retained_quartiles = quartiles;
                }
            }
            (Some(range), true) => {
                *self.criteria.range_mut(range) = Facet::Active(range.default_range());
            }
            (Some(range), false) => {
                *self.criteria.range_mut(range) = Facet::Inactive;
            }
        }
        true
    }

    #[must_use]
    pub fn contains_value(&self, value: &FacetValue) -> bool {
        match value {
            FacetValue::SearchField(field) => self.criteria.search_fields.contains(field),
            FacetValue::Publisher(name) => self.criteria.publishers.contains(name),
            FacetValue::Database(name) => self.criteria.databases.contains(name),
            FacetValue::Quartile(q) => self
                .criteria
                .quartiles
                .as_active()
                .is_some_and(|set| set.contains(q)),
        }
    }

    /// Adds a value. Adding a quartile activates the quartile facet.
    pub fn add_value(&mut self, value: FacetValue) -> bool {
        match value {
            FacetValue::SearchField(field) => {
                if self.criteria.search_fields.contains(&field) {
                    false
                } else {
                    self.criteria.search_fields.push(field);
                    true
                }
            }
            FacetValue::Publisher(name) => self.criteria.publishers.insert(name),
            FacetValue::Database(name) => self.criteria.databases.insert(name),
            FacetValue::Quartile(q) => {
                self.toggle_facet(OptionalFacet::Quartiles, true);
                let added = self
                    .criteria
                    .quartiles
                    .as_active_mut()
                    .is_some_and(|set| set.insert(q));
                if added {
                    self.retained_quartiles.insert(q);
                }
                added
            }
        }
    }

    /// Removes a value through its chip or list entry.
    ///
    /// Title is the structural default and is never removed this way.
    pub fn remove_value(&mut self, value: &FacetValue) -> bool {
        if matches!(value, FacetValue::SearchField(SearchField::Title)) {
            tracing::debug!("refusing to remove structural Title field");
            return false;
        }
        self.remove_unchecked(value)
    }

    /// Checkbox semantics for the filter panel.
    ///
    /// Unlike [`remove_value`](Self::remove_value), an explicitly listed Title
    /// may be unchecked here; an empty field list falls back to Title anyway.
    pub fn toggle_value(&mut self, value: FacetValue) -> bool {
        if self.contains_value(&value) {
            self.remove_unchecked(&value)
        } else {
            self.add_value(value)
        }
    }

    fn remove_unchecked(&mut self, value: &FacetValue) -> bool {
        match value {
            FacetValue::SearchField(field) => {
                let before = self.criteria.search_fields.len();
                self.criteria.search_fields.retain(|f| f != field);
                before != self.criteria.search_fields.len()
            }
            FacetValue::Publisher(name) => self.criteria.publishers.remove(name),
            FacetValue::Database(name) => self.criteria.databases.remove(name),
            FacetValue::Quartile(q) => {
                let removed = self
                    .criteria
                    .quartiles
                    .as_active_mut()
                    .is_some_and(|set| set.remove(q));
                if removed {
                    self.retained_quartiles.remove(q);
                }
                removed
            }
        }
    }

    /// Sets a range, snapping to the facet grid and ordering the ends.
    /// The facet is activated if it was off.
    pub fn set_range(&mut self, facet: RangeFacet, lo: f64, hi: f64) {
        let (lo, hi) = (facet.snap(lo), facet.snap(hi));
        let range = if lo <= hi {
            ScoreRange::new(lo, hi)
        } else {
            ScoreRange::new(hi, lo)
        };
        *self.criteria.range_mut(facet) = Facet::Active(range);
    }

    /// Moves one end of an active range by `steps` facet steps, the keyboard
    /// analogue of dragging a slider handle. No-op on an inactive facet.
    pub fn nudge_range(&mut self, facet: RangeFacet, bound: RangeBound, steps: i32) -> bool {
        let Some(current) = self.criteria.range(facet).as_active().copied() else {
            return false;
        };
        let delta = facet.step() * f64::from(steps);
        let next = match bound {
            RangeBound::Lower => ScoreRange::new(facet.snap(current.lo + delta).min(current.hi), current.hi),
            RangeBound::Upper => ScoreRange::new(current.lo, facet.snap(current.hi + delta).max(current.lo)),
        };
        if next == current {
            return false;
        }
        *self.criteria.range_mut(facet) = Facet::Active(next);
        true
    }

    pub fn set_include_aims_and_scope(&mut self, include: bool) {
        self.include_aims_and_scope = include;
    }

    /// Resets every facet: baseline fields, no publishers or databases, all
    /// optional facets off, retained quartiles forgotten.
    pub fn clear_all(&mut self) {
        tracing::debug!("clearing all filters");
        self.criteria = FilterCriteria::default();
        self.include_aims_and_scope = false;
        self.retained_quartiles.clear();
    }

    /// Builds the selected-filters strip.
    ///
    /// The Aims & Scope sub-option never appears here even when it will be part
    /// of the outgoing request.
    #[must_use]
    pub fn chips(&self) -> Vec<FilterChip> {
        let c = &self.criteria;
        let mut chips: Vec<FilterChip> = c
            .search_fields
            .iter()
            .map(|field| FilterChip {
                kind: ChipKind::Field(*field),
                label: format!("Field: {field}"),
                removable: *field != SearchField::Title,
            })
            .collect();

        chips.extend(c.publishers.iter().map(|p| FilterChip {
            kind: ChipKind::Publisher(p.clone()),
            label: format!("Publisher: {p}"),
            removable: true,
        }));
        chips.extend(c.databases.iter().map(|d| FilterChip {
            kind: ChipKind::Database(d.clone()),
            label: format!("Database: {d}"),
            removable: true,
        }));

        if let Some(quartiles) = c.quartiles.as_active() {
            let label = if quartiles.is_empty() {
                "Quartiles: any".to_string()
            } else {
                let names: Vec<&str> = quartiles.iter().map(|q| q.label()).collect();
                format!("Quartiles: {}", names.join(","))
            };
            chips.push(FilterChip { kind: ChipKind::Quartiles, label, removable: true });
        }

        for facet in [RangeFacet::CiteScore, RangeFacet::ImpactFactor] {
            if let Some(range) = c.range(facet).as_active() {
                chips.push(FilterChip {
                    kind: ChipKind::Range(facet),
                    label: format!("{}: {range}", facet.label()),
                    removable: true,
                });
            }
        }

        chips
    }

    /// Removes whatever a chip stands for.
    pub fn remove_chip(&mut self, kind: &ChipKind) -> bool {
        match kind {
            ChipKind::Field(field) => self.remove_value(&FacetValue::SearchField(*field)),
            ChipKind::Publisher(p) => self.remove_value(&FacetValue::Publisher(p.clone())),
            ChipKind::Database(d) => self.remove_value(&FacetValue::Database(d.clone())),
            ChipKind::Quartiles => self.toggle_facet(OptionalFacet::Quartiles, false),
            ChipKind::Range(facet) => self.toggle_facet((*facet).into(), false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggling_quartiles_off_and_on_restores_values() {
        let mut editor = FilterEditor::new();
        editor.add_value(FacetValue::Quartile(Quartile::Q1));
        editor.add_value(FacetValue::Quartile(Quartile::Q3));

        assert!(editor.toggle_facet(OptionalFacet::Quartiles, false));
        assert_eq!(editor.criteria().quartiles, Facet::Inactive);

        assert!(editor.toggle_facet(OptionalFacet::Quartiles, true));
        assert_eq!(
            editor.criteria().quartiles,
            Facet::Active(BTreeSet::from([Quartile::Q1, Quartile::Q3]))
        );
    }

    #[test]
    fn toggling_range_on_restores_default_not_previous_value() {
        let mut editor = FilterEditor::new();
        editor.set_range(RangeFacet::ImpactFactor, 2.0, 8.0);
        editor.toggle_facet(OptionalFacet::ImpactFactor, false);
        editor.toggle_facet(OptionalFacet::ImpactFactor, true);

        assert_eq!(
            editor.criteria().impact_factor_range,
            Facet::Active(ScoreRange::new(0.0, 300.0))
        );
    }

    #[test]
    fn first_enable_of_quartiles_is_active_empty() {
        let mut editor = FilterEditor::new();
        editor.toggle_facet(OptionalFacet::Quartiles, true);
        assert_eq!(editor.criteria().quartiles, Facet::Active(BTreeSet::new()));
    }

    #[test]
    fn title_chip_cannot_be_removed() {
        let mut editor = FilterEditor::new();
        editor.add_value(FacetValue::SearchField(SearchField::Title));
        editor.add_value(FacetValue::SearchField(SearchField::Issn));

        assert!(!editor.remove_chip(&ChipKind::Field(SearchField::Title)));
        assert!(editor.remove_chip(&ChipKind::Field(SearchField::Issn)));
        assert_eq!(editor.criteria().search_fields, vec![SearchField::Title]);

        let chips = editor.chips();
        assert_eq!(chips.len(), 1);
        assert!(!chips[0].removable);
    }

    #[test]
    fn aims_and_scope_sub_option_is_never_a_chip() {
        let mut editor = FilterEditor::new();
        editor.add_value(FacetValue::SearchField(SearchField::Title));
        editor.set_include_aims_and_scope(true);

        let labels: Vec<String> = editor.chips().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Field: Title".to_string()]);
    }

    #[test]
    fn set_range_orders_and_clamps() {
        let mut editor = FilterEditor::new();
        editor.set_range(RangeFacet::CiteScore, 2000.0, 40.0);
        assert_eq!(
            editor.criteria().cite_score_range,
            Facet::Active(ScoreRange::new(40.0, 1000.0))
        );
    }

    #[test]
    fn nudge_never_crosses_the_other_bound() {
        let mut editor = FilterEditor::new();
        editor.set_range(RangeFacet::ImpactFactor, 1.0, 1.1);
        assert!(editor.nudge_range(RangeFacet::ImpactFactor, RangeBound::Lower, 1));
        assert!(!editor.nudge_range(RangeFacet::ImpactFactor, RangeBound::Lower, 1));
        assert_eq!(
            editor.criteria().impact_factor_range,
            Facet::Active(ScoreRange::new(1.1, 1.1))
        );
    }

    #[test]
    fn nudge_on_inactive_range_is_noop() {
        let mut editor = FilterEditor::new();
        assert!(!editor.nudge_range(RangeFacet::CiteScore, RangeBound::Upper, -1));
        assert!(editor.criteria().cite_score_range.is_inactive());
    }

    #[test]
    fn clear_all_resets_everything() {
        let mut editor = FilterEditor::new();
        editor.add_value(FacetValue::Publisher("Wiley".into()));
        editor.add_value(FacetValue::Quartile(Quartile::Q2));
        editor.toggle_facet(OptionalFacet::CiteScore, true);
        editor.set_include_aims_and_scope(true);

        editor.clear_all();

        assert_eq!(editor.criteria(), &FilterCriteria::default());
        assert!(!editor.include_aims_and_scope());
        editor.toggle_facet(OptionalFacet::Quartiles, true);
        assert_eq!(editor.criteria().quartiles, Facet::Active(BTreeSet::new()));
    }

    #[test]
    fn update_filters_is_shallow() {
        let mut editor = FilterEditor::new();
        editor.add_value(FacetValue::Database("Scopus".into()));
        editor.update_filters(FilterPatch {
            publishers: Some(BTreeSet::from(["SAGE".to_string()])),
            ..FilterPatch::default()
        });
        assert!(editor.criteria().databases.contains("Scopus"));
        assert!(editor.criteria().publishers.contains("SAGE"));
    }
}
