//! Journal record returned by the search service.

use serde::{Deserialize, Deserializer, Serialize};

/// One journal in a search result set.
///
/// Deserialized from the camelCase records the search service returns. The
/// upstream catalogue is assembled from heterogeneous sources, so every field
/// is optional on the wire: strings default to empty, lists to empty, and the
/// two metrics accept numbers, numeric strings, or `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub impact_factor: f64,
    #[serde(default)]
    pub issn: String,
    #[serde(default)]
    pub aims_and_scope: String,
    #[serde(default)]
    pub indexed: Vec<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cite_score: f64,
    #[serde(default)]
    pub publisher: String,
}

/// Compound identity of a journal record.
///
/// An ISSN is expected but not guaranteed to be unique across sources, so the
/// title is part of the key. Used for de-duplication and row selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JournalKey {
    pub issn: String,
    pub title: String,
}

impl Journal {
    #[must_use]
    pub fn key(&self) -> JournalKey {
        JournalKey {
            issn: self.issn.clone(),
            title: self.title.clone(),
        }
    }

    /// Index memberships joined for display (`"Scopus, SCIE"`).
    #[must_use]
    pub fn indexed_label(&self) -> String {
        self.indexed.join(", ")
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => n,
        Some(Raw::Text(s)) => s.trim().parse().unwrap_or(0.0),
        None => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_record() {
        let json = r#"{
            "title": "Pattern Recognition",
            "link": "https://example.org/pr",
            "impactFactor": 7.5,
            "issn": "0031-3203",
            "aimsAndScope": "Theory and methods",
            "indexed": ["Scopus", "SCIE"],
            "citeScore": 15,
            "publisher": "Elsevier"
        }"#;

        let journal: Journal = serde_json::from_str(json).unwrap();
        assert_eq!(journal.title, "Pattern Recognition");
        assert!((journal.impact_factor - 7.5).abs() < f64::EPSILON);
        assert!((journal.cite_score - 15.0).abs() < f64::EPSILON);
        assert_eq!(journal.indexed_label(), "Scopus, SCIE");
    }

    #[test]
    fn tolerates_missing_and_textual_metrics() {
        let json = r#"{"title": "Sparse", "issn": "1", "impactFactor": null, "citeScore": "3.25"}"#;
        let journal: Journal = serde_json::from_str(json).unwrap();
        assert!(journal.impact_factor.abs() < f64::EPSILON);
        assert!((journal.cite_score - 3.25).abs() < f64::EPSILON);
        assert!(journal.indexed.is_empty());
    }

    #[test]
    fn key_combines_issn_and_title() {
        let a = Journal { issn: "1234-5678".into(), title: "A".into(), ..Journal::default() };
        let b = Journal { issn: "1234-5678".into(), title: "B".into(), ..Journal::default() };
        assert_ne!(a.key(), b.key());
    }
}
