//! Free-text and state filtering for the records table.

use incident_map_geography_models::StateFilter;
use incident_map_incident_models::IncidentRecord;

/// Returns the records that match both the search term and the state
/// filter, in input order.
///
/// The search term is matched case-insensitively as a literal substring
/// of the record's name or city, surrounding whitespace included. Absent
/// names and cities match as empty strings, so only an empty term matches
/// every record.
#[must_use]
pub fn filter(
    records: &[IncidentRecord],
    search_term: &str,
    state: &StateFilter,
) -> Vec<IncidentRecord> {
    let needle = search_term.to_lowercase();

    records
        .iter()
        .filter(|record| state.matches(record.state.as_deref()))
        .filter(|record| matches_search(record, &needle))
        .cloned()
        .collect()
}

/// Whether `record`'s name or city contains `needle`, which must already
/// be lower-cased.
#[must_use]
pub fn matches_search(record: &IncidentRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    contains_folded(record.name.as_deref(), needle) || contains_folded(record.city.as_deref(), needle)
}

fn contains_folded(haystack: Option<&str>, needle: &str) -> bool {
    haystack.unwrap_or_default().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: Option<&str>, city: Option<&str>, state: Option<&str>) -> IncidentRecord {
        let mut r = IncidentRecord::new(id);
        r.name = name.map(String::from);
        r.city = city.map(String::from);
        r.state = state.map(String::from);
        r
    }

    fn ids(records: &[IncidentRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn matches_name_case_insensitively() {
        let records = vec![
            record("1", Some("John Doe"), Some("Reno"), Some("NV")),
            record("2", Some("Jane"), Some("Austin"), Some("TX")),
        ];

        let result = filter(&records, "jo", &StateFilter::All);

        assert_eq!(ids(&result), ["1"]);
    }

    #[test]
    fn matches_city() {
        let records = vec![
            record("1", Some("John Doe"), Some("Reno"), Some("NV")),
            record("2", Some("Jane"), Some("Austin"), Some("TX")),
        ];

        assert_eq!(ids(&filter(&records, "AUST", &StateFilter::All)), ["2"]);
    }

    #[test]
    fn empty_term_and_all_is_identity() {
        let records = vec![
            record("3", None, None, None),
            record("1", Some("A"), Some("B"), Some("CA")),
            record("2", Some("C"), None, Some("TX")),
        ];

        assert_eq!(filter(&records, "", &StateFilter::All), records);
    }

    #[test]
    fn padded_term_is_a_literal_substring() {
        let records = vec![
            record("1", Some("Redondo"), Some("Reno"), Some("NV")),
            record("2", Some("John Doe"), Some("Austin"), Some("TX")),
        ];

        assert_eq!(ids(&filter(&records, " do", &StateFilter::All)), ["2"]);
        assert_eq!(ids(&filter(&records, "do", &StateFilter::All)), ["1", "2"]);
        assert_eq!(ids(&filter(&records, " ", &StateFilter::All)), ["2"]);
    }

    #[test]
    fn absent_fields_never_match_a_term() {
        let records = vec![record("1", None, None, Some("NV"))];

        assert!(filter(&records, "unknown", &StateFilter::All).is_empty());
        assert!(filter(&records, "rural", &StateFilter::All).is_empty());
    }

    #[test]
    fn state_filter_is_exact_and_composes_with_search() {
        let records = vec![
            record("1", Some("Joan"), Some("Reno"), Some("NV")),
            record("2", Some("Joel"), Some("Austin"), Some("TX")),
            record("3", Some("Mary"), Some("Vegas"), Some("NV")),
            record("4", Some("Jo"), None, None),
        ];
        let nv = StateFilter::State("NV".to_string());

        assert_eq!(ids(&filter(&records, "", &nv)), ["1", "3"]);
        assert_eq!(ids(&filter(&records, "jo", &nv)), ["1"]);
        assert_eq!(ids(&filter(&records, "jo", &StateFilter::All)), ["1", "2", "4"]);
    }

    #[test]
    fn preserves_input_order() {
        let records = vec![
            record("9", Some("Zed"), None, None),
            record("2", Some("Zoe"), None, None),
            record("5", Some("Liz"), None, None),
        ];

        assert_eq!(ids(&filter(&records, "z", &StateFilter::All)), ["9", "2", "5"]);
    }

    #[test]
    fn folds_non_ascii_case() {
        let records = vec![record("1", Some("ÉMILE"), None, None)];

        assert_eq!(ids(&filter(&records, "émile", &StateFilter::All)), ["1"]);
    }
}
