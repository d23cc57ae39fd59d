//! Normalized search requests and their canonical cache keys.

use crate::domain::Result;
use crate::filter::{FilterCriteria, SearchField};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Column the service sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    ImpactFactor,
    CiteScore,
    Issn,
    Publisher,
}

impl SortField {
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::ImpactFactor,
        Self::CiteScore,
        Self::Issn,
        Self::Publisher,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::ImpactFactor => "Impact Factor",
            Self::CiteScore => "CiteScore",
            Self::Issn => "ISSN",
            Self::Publisher => "Publisher",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

/// Cycles the sort column: relevance, then each field in turn, then back to
/// relevance. The order survives the cycle.
#[must_use]
pub fn next_sort(current: Option<SortSpec>) -> Option<SortSpec> {
    match current {
        None => Some(SortSpec { field: SortField::Title, order: SortOrder::Asc }),
        Some(spec) => {
            let pos = SortField::ALL.iter().position(|f| *f == spec.field).unwrap_or(0);
            SortField::ALL
                .get(pos + 1)
                .map(|field| SortSpec { field: *field, order: spec.order })
        }
    }
}

/// A request ready to be keyed, cached, and sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query_text: String,
    pub filters: FilterCriteria,
    pub sort: Option<SortSpec>,
}

/// Canonical identity of a [`SearchRequest`].
///
/// Built by serializing the request through `serde_json::Value`, whose object
/// maps are ordered, so equal requests yield equal keys whatever order the
/// user picked their filters in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Rebuilds a key carried through the host request context.
    #[must_use]
    pub const fn from_raw(raw: String) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize)]
struct KeyMaterial<'a> {
    query: &'a str,
    filters: &'a FilterCriteria,
    sort: Option<&'a SortSpec>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireFilters<'a> {
    #[serde(flatten)]
    criteria: &'a FilterCriteria,
    search_text: &'a str,
}

#[derive(Serialize)]
struct WireBody<'a> {
    filters: WireFilters<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sorting: Option<&'a SortSpec>,
}

impl SearchRequest {
    /// Builds the outgoing request from editor state.
    ///
    /// Returns `None` for an empty or whitespace-only query. Search fields are
    /// de-duplicated into panel order, fall back to `[Title]` when none are
    /// listed, and gain Aims & Scope when Title is selected and the sub-option
    /// is on.
    #[must_use]
    pub fn normalize(
        raw_query: &str,
        criteria: &FilterCriteria,
        include_aims_and_scope: bool,
        sort: Option<SortSpec>,
    ) -> Option<Self> {
        let query_text = raw_query.trim();
        if query_text.is_empty() {
            return None;
        }

        let mut fields: BTreeSet<SearchField> = criteria.search_fields.iter().copied().collect();
        if fields.is_empty() {
            fields.insert(SearchField::Title);
        }
        if include_aims_and_scope && fields.contains(&SearchField::Title) {
            fields.insert(SearchField::AimsAndScope);
        }

        let mut filters = criteria.clone();
        filters.search_fields = fields.into_iter().collect();

        Some(Self {
            query_text: query_text.to_string(),
            filters,
            sort,
        })
    }

    /// # Errors
    ///
    /// Returns `ScoutError::Serialization` if the request cannot be encoded.
    pub fn cache_key(&self) -> Result<CacheKey> {
        let value = serde_json::to_value(KeyMaterial {
            query: &self.query_text,
            filters: &self.filters,
            sort: self.sort.as_ref(),
        })?;
        Ok(CacheKey(value.to_string()))
    }

    /// JSON body posted to the search endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ScoutError::Serialization` if the request cannot be encoded.
    pub fn wire_body(&self) -> Result<Vec<u8>> {
        let body = WireBody {
            filters: WireFilters {
                criteria: &self.filters,
                search_text: &self.query_text,
            },
            sorting: self.sort.as_ref(),
        };
        Ok(serde_json::to_vec(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Facet, FilterEditor, OptionalFacet, Quartile};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn body_of(request: &SearchRequest) -> Value {
        serde_json::from_slice(&request.wire_body().unwrap()).unwrap()
    }

    #[test]
    fn blank_query_is_skipped() {
        assert!(SearchRequest::normalize("   ", &FilterCriteria::default(), false, None).is_none());
        assert!(SearchRequest::normalize("", &FilterCriteria::default(), true, None).is_none());
    }

    #[test]
    fn bare_query_uses_title_baseline_and_omits_inactive_facets() {
        let request =
            SearchRequest::normalize("machine learning", &FilterCriteria::default(), false, None)
                .unwrap();
        let body = body_of(&request);

        assert_eq!(body["filters"]["searchFields"], json!(["Title"]));
        assert_eq!(body["filters"]["searchText"], json!("machine learning"));
        for absent in ["citeScoreRange", "impactFactorRange", "quartiles"] {
            assert!(body["filters"].get(absent).is_none(), "{absent} should be omitted");
        }
        assert!(body.get("sorting").is_none());
    }

    #[test]
    fn enabling_cite_score_sends_default_range() {
        let mut editor = FilterEditor::new();
        editor.toggle_facet(OptionalFacet::CiteScore, true);

        let request = SearchRequest::normalize("ecology", editor.criteria(), false, None).unwrap();
        let body = body_of(&request);

        assert_eq!(body["filters"]["citeScoreRange"], json!([0.0, 1000.0]));
        assert!(body["filters"].get("impactFactorRange").is_none());
    }

    #[test]
    fn query_is_trimmed() {
        let request =
            SearchRequest::normalize("  optics \n", &FilterCriteria::default(), false, None).unwrap();
        assert_eq!(request.query_text, "optics");
    }

    #[test]
    fn aims_and_scope_follows_title() {
        let with_title = FilterCriteria {
            search_fields: vec![SearchField::Title, SearchField::Issn],
            ..FilterCriteria::default()
        };
        let request = SearchRequest::normalize("q", &with_title, true, None).unwrap();
        assert_eq!(
            request.filters.search_fields,
            vec![SearchField::Title, SearchField::Issn, SearchField::AimsAndScope]
        );

        let without_title = FilterCriteria {
            search_fields: vec![SearchField::Issn],
            ..FilterCriteria::default()
        };
        let request = SearchRequest::normalize("q", &without_title, true, None).unwrap();
        assert_eq!(request.filters.search_fields, vec![SearchField::Issn]);
    }

    #[test]
    fn aims_and_scope_is_never_duplicated() {
        let criteria = FilterCriteria {
            search_fields: vec![SearchField::AimsAndScope, SearchField::Title],
            ..FilterCriteria::default()
        };
        let request = SearchRequest::normalize("q", &criteria, true, None).unwrap();
        assert_eq!(
            request.filters.search_fields,
            vec![SearchField::Title, SearchField::AimsAndScope]
        );
    }

    #[test]
    fn cache_key_ignores_selection_order() {
        let a = FilterCriteria {
            search_fields: vec![SearchField::Issn, SearchField::Title],
            publishers: ["Wiley", "SAGE"].iter().map(|s| (*s).to_string()).collect(),
            quartiles: Facet::Active([Quartile::Q3, Quartile::Q1].into_iter().collect()),
            ..FilterCriteria::default()
        };
        let b = FilterCriteria {
            search_fields: vec![SearchField::Title, SearchField::Issn],
            publishers: ["SAGE", "Wiley"].iter().map(|s| (*s).to_string()).collect(),
            quartiles: Facet::Active([Quartile::Q1, Quartile::Q3].into_iter().collect()),
            ..FilterCriteria::default()
        };

        let key_a = SearchRequest::normalize("q", &a, false, None).unwrap().cache_key().unwrap();
        let key_b = SearchRequest::normalize("q", &b, false, None).unwrap().cache_key().unwrap();
        assert_eq!(key_a, key_b);
    }

    #[test]
    fn cache_key_distinguishes_sort() {
        let criteria = FilterCriteria::default();
        let plain = SearchRequest::normalize("q", &criteria, false, None).unwrap();
        let sorted = SearchRequest::normalize(
            "q",
            &criteria,
            false,
            Some(SortSpec { field: SortField::CiteScore, order: SortOrder::Desc }),
        )
        .unwrap();
        assert_ne!(plain.cache_key().unwrap(), sorted.cache_key().unwrap());
        assert_eq!(body_of(&sorted)["sorting"], json!({"field": "citeScore", "order": "desc"}));
    }

    #[test]
    fn sort_cycle_returns_to_relevance() {
        let mut sort = None;
        let mut seen = Vec::new();
        for _ in 0..SortField::ALL.len() {
            sort = next_sort(sort);
            seen.push(sort.map(|s| s.field));
        }
        assert_eq!(seen.last(), Some(&Some(SortField::Publisher)));
        assert_eq!(next_sort(sort), None);
    }
}
