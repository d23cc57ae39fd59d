//! Rows of the filter panel.
//!
//! The panel is a flat, keyboard-navigable list derived from the editor each
//! time it is shown. Dependent rows appear only while their parent is on:
//! the Aims & Scope sub-option follows Title, quartile checkboxes follow the
//! quartile facet, and range bounds follow their range facet.

use crate::filter::catalog::{DATABASES, PUBLISHERS};
use crate::filter::{
    FacetValue, FilterEditor, OptionalFacet, Quartile, RangeBound, RangeFacet, SearchField,
};

/// Multiplier applied to a nudge when the larger step is requested.
pub const COARSE_STEPS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRow {
    Field(SearchField),
    AimsAndScope,
    Publisher(&'static str),
    Database(&'static str),
    FacetSwitch(OptionalFacet),
    Quartile(Quartile),
    Bound(RangeFacet, RangeBound),
}

impl PanelRow {
    /// Section heading shown before the first row of each group.
    #[must_use]
    pub const fn section(self) -> &'static str {
        match self {
            Self::Field(_) | Self::AimsAndScope => "Search in",
            Self::Publisher(_) => "Publisher",
            Self::Database(_) => "Indexed in",
            Self::FacetSwitch(_) | Self::Quartile(_) | Self::Bound(..) => "Metrics",
        }
    }

    /// Whether the row reacts to left/right adjustment.
    #[must_use]
    pub const fn is_adjustable(self) -> bool {
        matches!(self, Self::Bound(..))
    }
}

/// Builds the visible rows for the current editor state.
#[must_use]
pub fn rows(editor: &FilterEditor) -> Vec<PanelRow> {
    let mut rows: Vec<PanelRow> = SearchField::ALL.iter().map(|f| PanelRow::Field(*f)).collect();
    if editor.aims_and_scope_option_visible() {
        if let Some(pos) = rows.iter().position(|r| *r == PanelRow::Field(SearchField::Title)) {
            rows.insert(pos + 1, PanelRow::AimsAndScope);
        }
    }

    rows.extend(PUBLISHERS.iter().map(|p| PanelRow::Publisher(p)));
    rows.extend(DATABASES.iter().map(|d| PanelRow::Database(d)));

    rows.push(PanelRow::FacetSwitch(OptionalFacet::Quartiles));
    if editor.is_facet_enabled(OptionalFacet::Quartiles) {
        rows.extend(Quartile::ALL.iter().map(|q| PanelRow::Quartile(*q)));
    }
    for facet in [RangeFacet::CiteScore, RangeFacet::ImpactFactor] {
        rows.push(PanelRow::FacetSwitch(facet.into()));
        if editor.is_facet_enabled(facet.into()) {
            rows.push(PanelRow::Bound(facet, RangeBound::Lower));
            rows.push(PanelRow::Bound(facet, RangeBound::Upper));
        }
    }
    rows
}

/// Checkbox state of a row, `None` for rows without a checkbox.
#[must_use]
pub fn checked(editor: &FilterEditor, row: PanelRow) -> Option<bool> {
    match row {
        PanelRow::Field(SearchField::Title) => Some(editor.criteria().title_selected()),
        PanelRow::Field(field) => Some(editor.contains_value(&FacetValue::SearchField(field))),
        PanelRow::AimsAndScope => Some(editor.include_aims_and_scope()),
        PanelRow::Publisher(p) => Some(editor.contains_value(&FacetValue::Publisher(p.to_string()))),
        PanelRow::Database(d) => Some(editor.contains_value(&FacetValue::Database(d.to_string()))),
        PanelRow::FacetSwitch(facet) => Some(editor.is_facet_enabled(facet)),
        PanelRow::Quartile(q) => Some(editor.contains_value(&FacetValue::Quartile(q))),
        PanelRow::Bound(..) => None,
    }
}

/// Display text of a row, without its checkbox.
#[must_use]
pub fn label(editor: &FilterEditor, row: PanelRow) -> String {
    match row {
        PanelRow::Field(field) => field.label().to_string(),
        PanelRow::AimsAndScope => "  also match Aims & Scope".to_string(),
        PanelRow::Publisher(name) | PanelRow::Database(name) => name.to_string(),
        PanelRow::FacetSwitch(facet) => format!("Filter by {}", facet.label()),
        PanelRow::Quartile(q) => format!("  {}", q.label()),
        PanelRow::Bound(facet, bound) => {
            let range = editor
                .criteria()
                .range(facet)
                .as_active()
                .copied()
                .unwrap_or_else(|| facet.default_range());
            let (name, value) = match bound {
                RangeBound::Lower => ("min", range.lo),
                RangeBound::Upper => ("max", range.hi),
            };
            let limits = facet.bounds();
            format!("  {name} {value}  ({}-{}, ←/→)", limits.lo, limits.hi)
        }
    }
}

/// Flips the checkbox of a row. Returns `true` if the criteria changed.
///
/// Title shown as the implicit baseline (no field listed) has nothing to
/// uncheck.
pub fn toggle(editor: &mut FilterEditor, row: PanelRow) -> bool {
    let title = FacetValue::SearchField(SearchField::Title);
    match row {
        PanelRow::Field(SearchField::Title)
            if editor.criteria().search_fields.is_empty() && !editor.contains_value(&title) =>
        {
            false
        }
        PanelRow::Field(field) => editor.toggle_value(FacetValue::SearchField(field)),
        PanelRow::AimsAndScope => {
            let next = !editor.include_aims_and_scope();
            editor.set_include_aims_and_scope(next);
            true
        }
        PanelRow::Publisher(p) => editor.toggle_value(FacetValue::Publisher(p.to_string())),
        PanelRow::Database(d) => editor.toggle_value(FacetValue::Database(d.to_string())),
        PanelRow::FacetSwitch(facet) => {
            let enabled = editor.is_facet_enabled(facet);
            editor.toggle_facet(facet, !enabled)
        }
        PanelRow::Quartile(q) => editor.toggle_value(FacetValue::Quartile(q)),
        PanelRow::Bound(..) => false,
    }
}

/// Moves a range bound. Returns `true` if the criteria changed.
pub fn adjust(editor: &mut FilterEditor, row: PanelRow, steps: i32) -> bool {
    match row {
        PanelRow::Bound(facet, bound) => editor.nudge_range(facet, bound, steps),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn aims_row_follows_title() {
        let mut editor = FilterEditor::new();
        assert!(rows(&editor).contains(&PanelRow::AimsAndScope));

        editor.add_value(FacetValue::SearchField(SearchField::Issn));
        assert!(!rows(&editor).contains(&PanelRow::AimsAndScope));
    }

    #[test]
    fn dependent_rows_follow_facet_switches() {
        let mut editor = FilterEditor::new();
        let base = rows(&editor).len();

        assert!(toggle(&mut editor, PanelRow::FacetSwitch(OptionalFacet::CiteScore)));
        let with_range = rows(&editor);
        assert_eq!(with_range.len(), base + 2);
        assert!(with_range.contains(&PanelRow::Bound(RangeFacet::CiteScore, RangeBound::Upper)));

        assert!(toggle(&mut editor, PanelRow::FacetSwitch(OptionalFacet::Quartiles)));
        assert_eq!(rows(&editor).len(), base + 2 + Quartile::ALL.len());
    }

    #[test]
    fn adjusting_bound_nudges_range() {
        let mut editor = FilterEditor::new();
        toggle(&mut editor, PanelRow::FacetSwitch(OptionalFacet::CiteScore));
        let row = PanelRow::Bound(RangeFacet::CiteScore, RangeBound::Upper);

        assert!(adjust(&mut editor, row, -COARSE_STEPS));
        assert_eq!(label(&editor, row), "  max 990  (0-1000, ←/→)");
        assert!(!adjust(&mut editor, PanelRow::Publisher("SAGE"), 1));
    }

    #[test]
    fn baseline_title_is_checked_and_fixed() {
        let mut editor = FilterEditor::new();
        let row = PanelRow::Field(SearchField::Title);
        assert_eq!(checked(&editor, row), Some(true));
        assert!(!toggle(&mut editor, row));

        toggle(&mut editor, PanelRow::Field(SearchField::Issn));
        assert_eq!(checked(&editor, row), Some(false));
    }

    #[test]
    fn toggling_publisher_checks_it() {
        let mut editor = FilterEditor::new();
        let row = PanelRow::Publisher("Wiley");
        assert_eq!(checked(&editor, row), Some(false));
        toggle(&mut editor, row);
        assert_eq!(checked(&editor, row), Some(true));
    }
}
