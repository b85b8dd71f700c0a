#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record types and the race code taxonomy.
//!
//! This crate defines the canonical [`IncidentRecord`] shared by every
//! stage of the dashboard pipeline, plus the total mapping from raw race
//! codes to display labels. Absent text fields stay `None` inside records;
//! placeholder strings like `"UNKNOWN"` only appear through the `display_*`
//! accessors used at the presentation and export boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Placeholder shown for an absent victim name.
pub const UNKNOWN_NAME: &str = "UNKNOWN";

/// Placeholder shown for an absent city.
pub const RURAL_CITY: &str = "RURAL";

/// Placeholder shown for an absent armed status.
pub const UNKNOWN_ARMED: &str = "UNKNOWN";

/// Opaque incident identifier, unique within a dataset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(String);

impl IncidentId {
    /// Creates an identifier from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric value of the identifier, if it is an unsigned
    /// integer.
    #[must_use]
    pub fn as_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl std::fmt::Display for IncidentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One fatal police shooting incident.
///
/// Every optional field is `None` when the source value was missing, null,
/// blank, or malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Identifier from the source dataset.
    pub id: IncidentId,
    /// Victim name.
    pub name: Option<String>,
    /// Date of the incident.
    pub date: Option<NaiveDate>,
    /// What the victim was armed with (e.g. "gun", "unarmed").
    pub armed_with: Option<String>,
    /// Victim age in years.
    pub age: Option<f64>,
    /// Victim gender.
    pub gender: Option<String>,
    /// Raw race code as recorded by the source (e.g. "W", "B;H").
    pub race: Option<String>,
    /// City where the incident occurred.
    pub city: Option<String>,
    /// Two-letter state abbreviation, upper-cased.
    pub state: Option<String>,
    /// Threat classification.
    pub threat_type: Option<String>,
    /// Flee status of the victim.
    pub flee_status: Option<String>,
    /// Whether an officer body camera was recording.
    pub body_camera: Option<bool>,
    /// Latitude (WGS84). Not range-checked.
    pub latitude: Option<f64>,
    /// Longitude (WGS84). Not range-checked.
    pub longitude: Option<f64>,
}

impl IncidentRecord {
    /// Creates a record with the given identifier and every other field
    /// absent.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: IncidentId::new(id),
            name: None,
            date: None,
            armed_with: None,
            age: None,
            gender: None,
            race: None,
            city: None,
            state: None,
            threat_type: None,
            flee_status: None,
            body_camera: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Returns the race code mapped through the total [`RaceCode`] lookup.
    #[must_use]
    pub fn race_code(&self) -> RaceCode {
        RaceCode::from_raw(self.race.as_deref())
    }

    /// Name for display, falling back to [`UNKNOWN_NAME`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_NAME)
    }

    /// City for display, falling back to [`RURAL_CITY`].
    #[must_use]
    pub fn display_city(&self) -> &str {
        self.city.as_deref().unwrap_or(RURAL_CITY)
    }

    /// Armed status for display, falling back to [`UNKNOWN_ARMED`].
    #[must_use]
    pub fn display_armed(&self) -> &str {
        self.armed_with.as_deref().unwrap_or(UNKNOWN_ARMED)
    }

    /// `"ON"` when a body camera was recording, `"OFF"` otherwise
    /// (including when unknown).
    #[must_use]
    pub fn body_camera_label(&self) -> &'static str {
        if self.body_camera == Some(true) {
            "ON"
        } else {
            "OFF"
        }
    }
}

/// Race classification used for the distribution views.
///
/// The [`std::fmt::Display`] form is the human-readable label.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RaceCode {
    /// Code `W`
    #[strum(to_string = "White")]
    White,
    /// Code `B`
    #[strum(to_string = "Black")]
    Black,
    /// Code `H`
    #[strum(to_string = "Hispanic")]
    Hispanic,
    /// Code `A`
    #[strum(to_string = "Asian")]
    Asian,
    /// Code `N`
    #[strum(to_string = "Native American")]
    NativeAmerican,
    /// Code `O`
    #[strum(to_string = "Other")]
    Other,
    /// Compound codes such as `B;H`
    #[strum(to_string = "Multiracial")]
    Multiracial,
    /// Missing, sentinel, or unrecognized codes
    #[strum(to_string = "Unknown")]
    Unknown,
}

impl RaceCode {
    /// Maps a raw race code to its classification.
    ///
    /// This is total: absence sentinels (`None`, `"None"`, `"Unknown"`,
    /// blank) and unrecognized codes all resolve to [`Self::Unknown`].
    /// A `;`-separated compound of two or more recognized single codes
    /// resolves to [`Self::Multiracial`].
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Unknown;
        };

        if raw.contains(';') {
            let parts: Vec<Self> = raw
                .split(';')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(Self::from_single)
                .collect();
            return match parts.as_slice() {
                [] => Self::Unknown,
                [single] => *single,
                many if many.iter().all(|code| code.is_single_race()) => Self::Multiracial,
                _ => Self::Unknown,
            };
        }

        Self::from_single(raw)
    }

    fn from_single(code: &str) -> Self {
        match code {
            "W" => Self::White,
            "B" => Self::Black,
            "H" => Self::Hispanic,
            "A" => Self::Asian,
            "N" => Self::NativeAmerican,
            "O" => Self::Other,
            _ => Self::Unknown,
        }
    }

    const fn is_single_race(self) -> bool {
        !matches!(self, Self::Multiracial | Self::Unknown)
    }

    /// Returns the human-readable label (same as the `Display` form).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::Hispanic => "Hispanic",
            Self::Asian => "Asian",
            Self::NativeAmerican => "Native American",
            Self::Other => "Other",
            Self::Multiracial => "Multiracial",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the chart color for this label as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::White => "#3b82f6",
            Self::Black => "#1f2937",
            Self::Hispanic => "#f97316",
            Self::Asian => "#10b981",
            Self::NativeAmerican => "#eab308",
            Self::Multiracial => "#8b5cf6",
            Self::Other => "#ef4444",
            Self::Unknown => "#94a3b8",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::White,
            Self::Black,
            Self::Hispanic,
            Self::Asian,
            Self::NativeAmerican,
            Self::Other,
            Self::Multiracial,
            Self::Unknown,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_single_codes() {
        assert_eq!(RaceCode::from_raw(Some("W")), RaceCode::White);
        assert_eq!(RaceCode::from_raw(Some("B")), RaceCode::Black);
        assert_eq!(RaceCode::from_raw(Some("H")), RaceCode::Hispanic);
        assert_eq!(RaceCode::from_raw(Some("A")), RaceCode::Asian);
        assert_eq!(RaceCode::from_raw(Some("N")), RaceCode::NativeAmerican);
        assert_eq!(RaceCode::from_raw(Some("O")), RaceCode::Other);
    }

    #[test]
    fn absence_sentinels_collapse_to_unknown() {
        assert_eq!(RaceCode::from_raw(None), RaceCode::Unknown);
        assert_eq!(RaceCode::from_raw(Some("")), RaceCode::Unknown);
        assert_eq!(RaceCode::from_raw(Some("   ")), RaceCode::Unknown);
        assert_eq!(RaceCode::from_raw(Some("None")), RaceCode::Unknown);
        assert_eq!(RaceCode::from_raw(Some("Unknown")), RaceCode::Unknown);
        assert_eq!(RaceCode::from_raw(Some("ZZ")), RaceCode::Unknown);
    }

    #[test]
    fn compound_codes_are_multiracial() {
        assert_eq!(RaceCode::from_raw(Some("B;H")), RaceCode::Multiracial);
        assert_eq!(RaceCode::from_raw(Some("W;A")), RaceCode::Multiracial);
        assert_eq!(RaceCode::from_raw(Some("N; W")), RaceCode::Multiracial);
        assert_eq!(RaceCode::from_raw(Some("B;")), RaceCode::Black);
        assert_eq!(RaceCode::from_raw(Some("B;X")), RaceCode::Unknown);
    }

    #[test]
    fn display_matches_label() {
        for code in RaceCode::all() {
            assert_eq!(code.to_string(), code.label());
            assert!(code.color().starts_with('#'));
        }
    }

    #[test]
    fn display_placeholders_only_apply_when_absent() {
        let mut record = IncidentRecord::new("1");
        assert_eq!(record.display_name(), UNKNOWN_NAME);
        assert_eq!(record.display_city(), RURAL_CITY);
        assert_eq!(record.display_armed(), UNKNOWN_ARMED);
        assert_eq!(record.body_camera_label(), "OFF");
        assert!(record.name.is_none());

        record.name = Some("Jane Roe".to_string());
        record.city = Some("Reno".to_string());
        record.armed_with = Some("Unarmed".to_string());
        record.body_camera = Some(true);
        assert_eq!(record.display_name(), "Jane Roe");
        assert_eq!(record.display_city(), "Reno");
        assert_eq!(record.display_armed(), "Unarmed");
        assert_eq!(record.body_camera_label(), "ON");
    }

    #[test]
    fn numeric_ids_expose_their_value() {
        assert_eq!(IncidentId::new("42").as_number(), Some(42));
        assert_eq!(IncidentId::new("abc").as_number(), None);
    }

    #[test]
    fn record_serializes_camel_case() {
        let mut record = IncidentRecord::new("7");
        record.armed_with = Some("knife".to_string());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["armedWith"], "knife");
        assert!(json["bodyCamera"].is_null());
    }
}
