//! Plain-text export of journal records.

use crate::domain::Journal;

/// Separator placed between records in a bulk export.
pub const BULK_DELIMITER: &str = "\n\n----------------------------------------\n\n";

/// Renders one record as `Field: value` lines.
#[must_use]
pub fn render_record(journal: &Journal) -> String {
    [
        format!("Title: {}", journal.title),
        format!("Link: {}", journal.link),
        format!("Impact Factor: {}", journal.impact_factor),
        format!("ISSN: {}", journal.issn),
        format!("Aims & Scope: {}", journal.aims_and_scope),
        format!("Indexed: {}", journal.indexed_label()),
        format!("CiteScore: {}", journal.cite_score),
        format!("Publisher: {}", journal.publisher),
    ]
    .join("\n")
}

/// Renders several records joined by [`BULK_DELIMITER`].
pub fn render_bulk<'a>(journals: impl IntoIterator<Item = &'a Journal>) -> String {
    journals
        .into_iter()
        .map(render_record)
        .collect::<Vec<_>>()
        .join(BULK_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Journal {
        Journal {
            title: "Journal of Hydrology".into(),
            link: "https://example.org/jh".into(),
            impact_factor: 6.4,
            issn: "0022-1694".into(),
            aims_and_scope: "Water".into(),
            indexed: vec!["Scopus".into(), "SCIE".into()],
            cite_score: 11.0,
            publisher: "Elsevier".into(),
        }
    }

    #[test]
    fn record_uses_field_value_lines() {
        assert_eq!(
            render_record(&sample()),
            "Title: Journal of Hydrology\n\
             Link: https://example.org/jh\n\
             Impact Factor: 6.4\n\
             ISSN: 0022-1694\n\
             Aims & Scope: Water\n\
             Indexed: Scopus, SCIE\n\
             CiteScore: 11\n\
             Publisher: Elsevier"
        );
    }

    #[test]
    fn bulk_joins_with_delimiter() {
        let a = sample();
        let b = Journal { title: "Other".into(), ..sample() };
        let text = render_bulk([&a, &b]);
        assert_eq!(text.matches(BULK_DELIMITER).count(), 1);
        assert!(text.starts_with("Title: Journal of Hydrology"));
        assert!(text.ends_with("Publisher: Elsevier"));
    }

    #[test]
    fn single_record_bulk_has_no_delimiter() {
        assert_eq!(render_bulk([&sample()]), render_record(&sample()));
    }
}
