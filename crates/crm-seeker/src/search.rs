//! Free-text search matcher.

use crate::traits::Record;

/// Tests whether `term` occurs in any of `fields`, ignoring case.
///
/// The term is trimmed first; an empty or whitespace-only term matches
/// everything. Missing and null fields read as empty strings, so they never
/// match a non-empty term and never fail.
///
/// ```
/// use crm_seeker::matches_search;
///
/// let lead = serde_json::json!({ "name": "Acme Corp", "email": "ops@acme.io" });
/// assert!(matches_search(&lead, &["name", "email"], "ACME"));
/// assert!(matches_search(&lead, &["name"], "   "));
/// assert!(!matches_search(&lead, &["phone"], "acme"));
/// ```
pub fn matches_search<R, S>(record: &R, fields: &[S], term: &str) -> bool
where
    R: Record + ?Sized,
    S: AsRef<str>,
{
    let needle = normalize_term(term);
    if needle.is_empty() {
        return true;
    }
    matches_normalized(record, fields, &needle)
}

/// Lower-cases and trims a search term.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Like [`matches_search`] but with a term already passed through
/// [`normalize_term`], so the pipeline folds the term once per call.
pub(crate) fn matches_normalized<R, S>(record: &R, fields: &[S], needle: &str) -> bool
where
    R: Record + ?Sized,
    S: AsRef<str>,
{
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        record
            .field_value(field.as_ref())
            .search_text()
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_term_matches_everything() {
        let record = json!({});
        assert!(matches_search(&record, &["title"], ""));
        assert!(matches_search(&record, &["title"], " \t "));
        assert!(matches_search(&record, &[] as &[&str], ""));
    }

    #[test]
    fn case_insensitive_substring() {
        let record = json!({ "title": "Quarterly Review" });
        assert!(matches_search(&record, &["title"], "review"));
        assert!(matches_search(&record, &["title"], "TERLY"));
        assert!(matches_search(&record, &["title"], "  quarterly  "));
        assert!(!matches_search(&record, &["title"], "weekly"));
    }

    #[test]
    fn typed_timestamps_search_as_utc_text() {
        use crate::value::{Timestamp, Value};

        struct Note(Timestamp);

        impl Record for Note {
            fn field_value(&self, path: &str) -> Value<'_> {
                match path {
                    "at" => Value::Timestamp(self.0),
                    _ => Value::None,
                }
            }
        }

        // 2024-05-10T08:00:00Z
        let note = Note(Timestamp(1_715_328_000_000));
        assert!(matches_search(&note, &["at"], "2024-05-10"));
        assert!(matches_search(&note, &["at"], "T08:00"));
        assert!(!matches_search(&note, &["at"], "2024-05-11"));
    }

    #[test]
    fn or_across_fields() {
        let record = json!({ "title": "Call", "description": "Discuss renewal", "city": null });
        assert!(matches_search(&record, &["title", "description", "city"], "renewal"));
        assert!(matches_search(&record, &["title", "description", "city"], "call"));
        assert!(!matches_search(&record, &["title", "city"], "renewal"));
    }

    #[test]
    fn numbers_and_nested_fields_are_searchable() {
        let record = json!({ "phone": 5551234, "owner": { "name": "Dana Scully" } });
        assert!(matches_search(&record, &["phone"], "5123"));
        assert!(matches_search(&record, &["owner.name"], "scully"));
    }

    #[test]
    fn missing_fields_do_not_match_non_empty_terms() {
        let record = json!({ "title": null });
        assert!(!matches_search(&record, &["title", "missing.path"], "x"));
    }

    #[test]
    fn no_fields_never_match_a_real_term() {
        let record = json!({ "title": "anything" });
        assert!(!matches_search(&record, &[] as &[&str], "any"));
    }
}
