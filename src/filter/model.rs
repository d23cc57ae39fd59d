//! Typed filter criteria.
//!
//! [`FilterCriteria`] is the single description of what the user wants to
//! restrict a search to. Optional facets use [`Facet`] so that "not
//! participating" and "participating with no values yet" are different states
//! instead of an empty collection doing double duty.
//!
//! The serialized form is the wire form: inactive facets are omitted, active
//! facets are always present (an active-empty quartile set serializes as
//! `"quartiles": []`).

use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// A field the free-text query is matched against.
///
/// Serialized with the display names the search service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SearchField {
    #[serde(rename = "Title")]
    Title,
    #[serde(rename = "Link")]
    Link,
    #[serde(rename = "Impact Factor")]
    ImpactFactor,
    #[serde(rename = "ISSN")]
    Issn,
    #[serde(rename = "Aims & Scope")]
    AimsAndScope,
    #[serde(rename = "Indexed")]
    Indexed,
    #[serde(rename = "CiteScore")]
    CiteScore,
}

impl SearchField {
    /// Every search field in panel order.
    pub const ALL: [Self; 7] = [
        Self::Title,
        Self::Link,
        Self::ImpactFactor,
        Self::Issn,
        Self::AimsAndScope,
        Self::Indexed,
        Self::CiteScore,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Link => "Link",
            Self::ImpactFactor => "Impact Factor",
            Self::Issn => "ISSN",
            Self::AimsAndScope => "Aims & Scope",
            Self::Indexed => "Indexed",
            Self::CiteScore => "CiteScore",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Journal ranking quartile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Quartile {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quartile {
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }
}

/// Participation state of an optional facet.
///
/// `Active` with an empty value is a real state ("enabled, nothing chosen
/// yet") and is sent to the service as such.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet<T> {
    Inactive,
    Active(T),
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Self::Inactive
    }
}

impl<T> Facet<T> {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    #[must_use]
    pub const fn is_inactive(&self) -> bool {
        !self.is_active()
    }

    #[must_use]
    pub const fn as_active(&self) -> Option<&T> {
        match self {
            Self::Active(value) => Some(value),
            Self::Inactive => None,
        }
    }

    pub fn as_active_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Active(value) => Some(value),
            Self::Inactive => None,
        }
    }
}

impl<T: Serialize> Serialize for Facet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Active(value) => value.serialize(serializer),
            Self::Inactive => serializer.serialize_none(),
        }
    }
}

/// Closed numeric interval `[lo, hi]`, serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    pub lo: f64,
    pub hi: f64,
}

impl ScoreRange {
    #[must_use]
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }
}

impl Serialize for ScoreRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lo, self.hi].serialize(serializer)
    }
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

/// The two numeric range facets and their slider parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeFacet {
    CiteScore,
    ImpactFactor,
}

impl RangeFacet {
    /// Outer limits a range may be set to.
    #[must_use]
    pub const fn bounds(self) -> ScoreRange {
        match self {
            Self::CiteScore => ScoreRange::new(0.0, 1000.0),
            Self::ImpactFactor => ScoreRange::new(0.0, 300.0),
        }
    }

    /// Interval populated when the facet is switched on.
    #[must_use]
    pub const fn default_range(self) -> ScoreRange {
        self.bounds()
    }

    #[must_use]
    pub const fn step(self) -> f64 {
        match self {
            Self::CiteScore => 1.0,
            Self::ImpactFactor => 0.1,
        }
    }

    const fn decimals(self) -> i32 {
        match self {
            Self::CiteScore => 0,
            Self::ImpactFactor => 1,
        }
    }

    /// Snaps a value to the facet's step grid and clamps it into bounds.
    #[must_use]
    pub fn snap(self, value: f64) -> f64 {
        let bounds = self.bounds();
        let scale = 10f64.powi(self.decimals());
        let snapped = (value * scale).round() / scale;
        snapped.clamp(bounds.lo, bounds.hi)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CiteScore => "CiteScore",
            Self::ImpactFactor => "Impact Factor",
        }
    }
}

/// The user's current query criteria.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Fields the query text is matched against, in selection order.
    pub search_fields: Vec<SearchField>,
    pub publishers: BTreeSet<String>,
    pub databases: BTreeSet<String>,
    #[serde(skip_serializing_if = "Facet::is_inactive")]
    pub quartiles: Facet<BTreeSet<Quartile>>,
    #[serde(skip_serializing_if = "Facet::is_inactive")]
    pub cite_score_range: Facet<ScoreRange>,
    #[serde(skip_serializing_if = "Facet::is_inactive")]
    pub impact_factor_range: Facet<ScoreRange>,
}

/// Shallow per-key override of [`FilterCriteria`].
///
/// `None` leaves a key untouched; `Some` replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct FilterPatch {
    pub search_fields: Option<Vec<SearchField>>,
    pub publishers: Option<BTreeSet<String>>,
    pub databases: Option<BTreeSet<String>>,
    pub quartiles: Option<Facet<BTreeSet<Quartile>>>,
    pub cite_score_range: Option<Facet<ScoreRange>>,
    pub impact_factor_range: Option<Facet<ScoreRange>>,
}

impl FilterCriteria {
    /// Applies a patch key by key.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(fields) = patch.search_fields {
            self.search_fields = fields;
        }
        if let Some(publishers) = patch.publishers {
            self.publishers = publishers;
        }
        if let Some(databases) = patch.databases {
            self.databases = databases;
        }
        if let Some(quartiles) = patch.quartiles {
            self.quartiles = quartiles;
        }
        if let Some(range) = patch.cite_score_range {
            self.cite_score_range = range;
        }
        if let Some(range) = patch.impact_factor_range {
            self.impact_factor_range = range;
        }
    }

    /// Title counts as selected when listed explicitly or when no field is
    /// listed at all (it is the baseline the request falls back to).
    #[must_use]
    pub fn title_selected(&self) -> bool {
        self.search_fields.is_empty() || self.search_fields.contains(&SearchField::Title)
    }

    #[must_use]
    pub const fn range(&self, facet: RangeFacet) -> &Facet<ScoreRange> {
        match facet {
            RangeFacet::CiteScore => &self.cite_score_range,
            RangeFacet::ImpactFactor => &self.impact_factor_range,
        }
    }

    pub fn range_mut(&mut self, facet: RangeFacet) -> &mut Facet<ScoreRange> {
        match facet {
            RangeFacet::CiteScore => &mut self.cite_score_range,
            RangeFacet::ImpactFactor => &mut self.impact_factor_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn inactive_facets_are_omitted_from_wire_form() {
        let criteria = FilterCriteria::default();
        let value = serde_json::to_value(&criteria).unwrap();
        assert_eq!(
            value,
            json!({ "searchFields": [], "publishers": [], "databases": [] })
        );
    }

    #[test]
    fn active_empty_facet_is_distinct_from_inactive() {
        let criteria = FilterCriteria {
            quartiles: Facet::Active(BTreeSet::new()),
            ..FilterCriteria::default()
        };
        let value = serde_json::to_value(&criteria).unwrap();
        assert_eq!(value["quartiles"], json!([]));
    }

    #[test]
    fn ranges_serialize_as_pairs() {
        let criteria = FilterCriteria {
            impact_factor_range: Facet::Active(ScoreRange::new(1.5, 20.0)),
            ..FilterCriteria::default()
        };
        let value = serde_json::to_value(&criteria).unwrap();
        assert_eq!(value["impactFactorRange"], json!([1.5, 20.0]));
        assert!(value.get("citeScoreRange").is_none());
    }

    #[test]
    fn merge_overrides_only_present_keys() {
        let mut criteria = FilterCriteria {
            publishers: BTreeSet::from(["Wiley".to_string()]),
            ..FilterCriteria::default()
        };
        criteria.merge(FilterPatch {
            databases: Some(BTreeSet::from(["Scopus".to_string()])),
            ..FilterPatch::default()
        });
        assert!(criteria.publishers.contains("Wiley"));
        assert!(criteria.databases.contains("Scopus"));
    }

    #[test]
    fn snap_respects_step_and_bounds() {
        assert!((RangeFacet::ImpactFactor.snap(0.30000000000000004) - 0.3).abs() < f64::EPSILON);
        assert!((RangeFacet::CiteScore.snap(1200.0) - 1000.0).abs() < f64::EPSILON);
        assert!(RangeFacet::CiteScore.snap(-3.0).abs() < f64::EPSILON);
    }
}
