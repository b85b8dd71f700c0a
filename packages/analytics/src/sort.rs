//! Table sorting over typed per-key accessors.

use std::cmp::Ordering;

use chrono::NaiveDate;
use incident_map_analytics_models::{SortDirection, SortKey, SortSpec};
use incident_map_incident_models::IncidentRecord;

/// A comparable value extracted from a record for one [`SortKey`].
///
/// Values of different variants order as
/// `Absent < Flag < Number < Date < Text`. In practice a single key always
/// yields one defined variant, so the cross-variant order only decides
/// where absent values land.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    /// Field missing from the record.
    Absent,
    /// Boolean field.
    Flag(bool),
    /// Numeric field, compared with [`f64::total_cmp`].
    Number(f64),
    /// Calendar date.
    Date(NaiveDate),
    /// Text field, compared by Unicode code point.
    Text(&'a str),
}

impl SortValue<'_> {
    const fn rank(&self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Flag(_) => 1,
            Self::Number(_) => 2,
            Self::Date(_) => 3,
            Self::Text(_) => 4,
        }
    }

    /// Total order over sort values.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Flag(a), Self::Flag(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn text(value: Option<&str>) -> SortValue<'_> {
    value.map_or(SortValue::Absent, SortValue::Text)
}

fn number(value: Option<f64>) -> SortValue<'static> {
    value.map_or(SortValue::Absent, SortValue::Number)
}

/// Extracts the value `record` sorts by under `key`.
///
/// Integer identifiers sort numerically so that `"10"` follows `"9"`;
/// any other identifier sorts as text.
#[must_use]
pub fn sort_value(record: &IncidentRecord, key: SortKey) -> SortValue<'_> {
    match key {
        SortKey::Id => {
            #[allow(clippy::cast_precision_loss)]
            let numeric = record.id.as_number().map(|n| n as f64);
            numeric.map_or_else(|| SortValue::Text(record.id.as_str()), SortValue::Number)
        }
        SortKey::Name => text(record.name.as_deref()),
        SortKey::Date => record.date.map_or(SortValue::Absent, SortValue::Date),
        SortKey::Age => number(record.age),
        SortKey::Race => text(record.race.as_deref()),
        SortKey::City => text(record.city.as_deref()),
        SortKey::State => text(record.state.as_deref()),
        SortKey::ArmedWith => text(record.armed_with.as_deref()),
        SortKey::BodyCamera => record.body_camera.map_or(SortValue::Absent, SortValue::Flag),
        SortKey::Latitude => number(record.latitude),
        SortKey::Longitude => number(record.longitude),
    }
}

/// Compares two records under `spec`.
#[must_use]
pub fn compare(a: &IncidentRecord, b: &IncidentRecord, spec: SortSpec) -> Ordering {
    let ordering = sort_value(a, spec.key).compare(&sort_value(b, spec.key));
    match spec.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Sorts `records` in place. `None` leaves the order untouched.
///
/// The sort is stable in both directions: records with equal keys keep
/// their relative input order whether ascending or descending. Toggling
/// the direction therefore reverses the output exactly only when every
/// key is distinct; runs of tied records keep input order either way.
pub fn sort_in_place(records: &mut [IncidentRecord], spec: Option<SortSpec>) {
    if let Some(spec) = spec {
        records.sort_by(|a, b| compare(a, b, spec));
    }
}

/// Returns a sorted copy of `records`.
///
/// Ties keep input order in both directions, as in [`sort_in_place`].
#[must_use]
pub fn sort(records: &[IncidentRecord], spec: Option<SortSpec>) -> Vec<IncidentRecord> {
    let mut sorted = records.to_vec();
    sort_in_place(&mut sorted, spec);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: &str, name: Option<&str>) -> IncidentRecord {
        let mut record = IncidentRecord::new(id);
        record.name = name.map(String::from);
        record
    }

    fn ids(records: &[IncidentRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn desc(key: SortKey) -> SortSpec {
        SortSpec {
            key,
            direction: SortDirection::Descending,
        }
    }

    #[test]
    fn none_spec_is_pass_through() {
        let records = vec![named("2", Some("b")), named("1", Some("a"))];
        assert_eq!(sort(&records, None), records);
    }

    #[test]
    fn sorts_text_ascending_with_absent_first() {
        let records = vec![
            named("1", Some("Carol")),
            named("2", None),
            named("3", Some("Alice")),
            named("4", Some("Bob")),
        ];

        let sorted = sort(&records, Some(SortSpec::ascending(SortKey::Name)));

        assert_eq!(ids(&sorted), ["2", "3", "4", "1"]);
    }

    #[test]
    fn descending_reverses_distinct_keys() {
        let records = vec![
            named("1", Some("Carol")),
            named("2", Some("Alice")),
            named("3", Some("Bob")),
        ];

        let asc = sort(&records, Some(SortSpec::ascending(SortKey::Name)));
        let mut desc_sorted = sort(&records, Some(desc(SortKey::Name)));
        desc_sorted.reverse();

        assert_eq!(asc, desc_sorted);
    }

    #[test]
    fn is_stable_in_both_directions() {
        let records = vec![
            named("1", Some("Same")),
            named("2", Some("Other")),
            named("3", Some("Same")),
            named("4", Some("Same")),
        ];

        let asc = sort(&records, Some(SortSpec::ascending(SortKey::Name)));
        assert_eq!(ids(&asc), ["2", "1", "3", "4"]);

        let descending = sort(&records, Some(desc(SortKey::Name)));
        assert_eq!(ids(&descending), ["1", "3", "4", "2"]);
    }

    #[test]
    fn toggling_does_not_reverse_tied_records() {
        let records = vec![named("1", Some("Tie")), named("2", Some("Tie"))];

        let asc = sort(&records, Some(SortSpec::ascending(SortKey::Name)));
        let descending = sort(&records, Some(desc(SortKey::Name)));

        assert_eq!(ids(&asc), ["1", "2"]);
        assert_eq!(ids(&descending), ["1", "2"]);
    }

    #[test]
    fn text_comparison_is_case_sensitive_by_code_point() {
        let records = vec![named("1", Some("bob")), named("2", Some("Bob"))];

        let sorted = sort(&records, Some(SortSpec::ascending(SortKey::Name)));

        assert_eq!(ids(&sorted), ["2", "1"]);
    }

    #[test]
    fn numeric_ids_sort_numerically() {
        let records = vec![
            IncidentRecord::new("10"),
            IncidentRecord::new("9"),
            IncidentRecord::new("100"),
        ];

        let sorted = sort(&records, Some(SortSpec::ascending(SortKey::Id)));

        assert_eq!(ids(&sorted), ["9", "10", "100"]);
    }

    #[test]
    fn numbers_compare_numerically_with_absent_first() {
        let mut a = IncidentRecord::new("a");
        a.latitude = Some(-3.5);
        let b = IncidentRecord::new("b");
        let mut c = IncidentRecord::new("c");
        c.latitude = Some(40.0);
        let mut d = IncidentRecord::new("d");
        d.latitude = Some(-10.0);

        let sorted = sort(&[a, b, c, d], Some(SortSpec::ascending(SortKey::Latitude)));

        assert_eq!(ids(&sorted), ["b", "d", "a", "c"]);
    }

    #[test]
    fn flags_and_dates_sort() {
        let mut on = IncidentRecord::new("on");
        on.body_camera = Some(true);
        on.date = NaiveDate::from_ymd_opt(2020, 1, 1);
        let mut off = IncidentRecord::new("off");
        off.body_camera = Some(false);
        off.date = NaiveDate::from_ymd_opt(2015, 6, 30);
        let unknown = IncidentRecord::new("unknown");
        let records = vec![on, off, unknown];

        let by_camera = sort(&records, Some(SortSpec::ascending(SortKey::BodyCamera)));
        assert_eq!(ids(&by_camera), ["unknown", "off", "on"]);

        let by_date = sort(&records, Some(desc(SortKey::Date)));
        assert_eq!(ids(&by_date), ["on", "off", "unknown"]);
    }

    #[test]
    fn does_not_mutate_input() {
        let records = vec![named("2", Some("b")), named("1", Some("a"))];
        let snapshot = records.clone();

        let _ = sort(&records, Some(SortSpec::ascending(SortKey::Name)));

        assert_eq!(records, snapshot);
    }

    #[test]
    fn cross_variant_rank_is_total() {
        assert_eq!(SortValue::Absent.compare(&SortValue::Text("")), Ordering::Less);
        assert_eq!(SortValue::Number(1.0).compare(&SortValue::Flag(true)), Ordering::Greater);
        assert_eq!(SortValue::Absent.compare(&SortValue::Absent), Ordering::Equal);
    }
}
