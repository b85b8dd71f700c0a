//! Raw record → [`IncidentRecord`] normalization.

use incident_map_incident_models::{IncidentId, IncidentRecord};
use serde_json::Value;

use crate::parsing::{parse_bool, parse_date, parse_id, parse_number, parse_text};

/// Older exports of the dataset call the armed status column `armed`.
const LEGACY_ARMED_FIELD: &str = "armed";

/// Outcome of normalizing a batch of raw records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    /// Records that had a usable identifier, in input order.
    pub records: Vec<IncidentRecord>,
    /// Number of raw records dropped for a missing or invalid identifier.
    pub skipped: usize,
}

/// Normalizes a single raw record.
///
/// Returns `None` when `raw` is not an object or its `id` is structurally
/// invalid. Every other malformed field becomes `None` on the record; no
/// display placeholders are substituted here.
#[must_use]
pub fn normalize_record(raw: &Value) -> Option<IncidentRecord> {
    let object = raw.as_object()?;
    let field = |name: &str| object.get(name);

    let id = parse_id(field("id"))?;

    Some(IncidentRecord {
        id: IncidentId::new(id),
        name: parse_text(field("name")),
        date: parse_date(field("date")),
        armed_with: parse_text(field("armed_with")).or_else(|| parse_text(field(LEGACY_ARMED_FIELD))),
        age: parse_number(field("age")),
        gender: parse_text(field("gender")),
        race: parse_text(field("race")),
        city: parse_text(field("city")),
        state: parse_text(field("state")).map(|s| s.trim().to_uppercase()),
        threat_type: parse_text(field("threat_type")),
        flee_status: parse_text(field("flee_status")),
        body_camera: parse_bool(field("body_camera")),
        latitude: parse_number(field("latitude")),
        longitude: parse_number(field("longitude")),
    })
}

/// Normalizes a batch of raw records, dropping those without a valid id.
#[must_use]
pub fn normalize_records(raws: &[Value]) -> NormalizeReport {
    let records: Vec<IncidentRecord> = raws.iter().filter_map(normalize_record).collect();
    let skipped = raws.len() - records.len();

    if skipped > 0 {
        log::warn!(
            "Skipped {skipped} of {} raw records with a missing or invalid id",
            raws.len()
        );
    }

    NormalizeReport { records, skipped }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn normalizes_a_complete_record() {
        let raw = json!({
            "id": 3,
            "name": "Tim Elliot",
            "date": "2015-01-02",
            "armed_with": "gun",
            "age": "53",
            "gender": "male",
            "race": "A",
            "city": "Shelton",
            "state": "wa",
            "threat_type": "point",
            "flee_status": "not",
            "body_camera": "False",
            "latitude": 47.247,
            "longitude": "-123.122"
        });

        let record = normalize_record(&raw).unwrap();

        assert_eq!(record.id.as_str(), "3");
        assert_eq!(record.name.as_deref(), Some("Tim Elliot"));
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2015, 1, 2));
        assert_eq!(record.age, Some(53.0));
        assert_eq!(record.state.as_deref(), Some("WA"));
        assert_eq!(record.body_camera, Some(false));
        assert_eq!(record.latitude, Some(47.247));
        assert_eq!(record.longitude, Some(-123.122));
    }

    #[test]
    fn absent_fields_stay_absent() {
        let record = normalize_record(&json!({"id": "9", "name": "  ", "city": null})).unwrap();

        assert_eq!(record, IncidentRecord::new("9"));
    }

    #[test]
    fn text_keeps_its_value_but_state_is_trimmed() {
        let raw = json!({"id": "4", "name": " Ana Ruiz ", "city": "St. Paul ", "state": " mn "});

        let record = normalize_record(&raw).unwrap();

        assert_eq!(record.name.as_deref(), Some(" Ana Ruiz "));
        assert_eq!(record.city.as_deref(), Some("St. Paul "));
        assert_eq!(record.state.as_deref(), Some("MN"));
    }

    #[test]
    fn malformed_fields_degrade_to_absent() {
        let raw = json!({
            "id": "1",
            "latitude": "north",
            "longitude": [1, 2],
            "body_camera": "maybe",
            "date": "yesterday",
            "age": {}
        });

        let record = normalize_record(&raw).unwrap();

        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, None);
        assert_eq!(record.body_camera, None);
        assert_eq!(record.date, None);
        assert_eq!(record.age, None);
    }

    #[test]
    fn reads_legacy_armed_field() {
        let record = normalize_record(&json!({"id": "1", "armed": "knife"})).unwrap();

        assert_eq!(record.armed_with.as_deref(), Some("knife"));
    }

    #[test]
    fn invalid_ids_are_skipped_and_counted() {
        let raws = vec![
            json!({"id": "1"}),
            json!({"name": "no id"}),
            json!({"id": null}),
            json!({"id": -4}),
            json!({"id": 2.5}),
            json!("not an object"),
            json!({"id": 2}),
        ];

        let report = normalize_records(&raws);

        assert_eq!(report.skipped, 5);
        let ids: Vec<&str> = report.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn empty_batch() {
        assert_eq!(normalize_records(&[]), NormalizeReport::default());
    }
}
