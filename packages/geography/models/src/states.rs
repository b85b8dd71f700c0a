//! US state code utilities.
//!
//! Provides the table of two-letter state abbreviations (50 states + DC),
//! their full names, and the [`StateFilter`] used by the categorical
//! filter, including the `"All"` sentinel.

use serde::{Deserialize, Serialize};

/// Sentinel string that selects every state.
pub const ALL_STATES: &str = "All";

/// Display name for the [`ALL_STATES`] sentinel.
pub const ALL_STATES_NAME: &str = "All States";

/// Two-letter codes for the 50 US states + DC, in alphabetical order of
/// the full state name.
pub const STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

/// Maps a two-letter state abbreviation (or the [`ALL_STATES`] sentinel)
/// to its full name.
///
/// Lookup is case-insensitive. Returns `"Unknown"` for unrecognized codes.
#[must_use]
pub fn state_name(code: &str) -> &'static str {
    if code.eq_ignore_ascii_case(ALL_STATES) {
        return ALL_STATES_NAME;
    }
    match code.to_uppercase().as_str() {
        "AL" => "Alabama",
        "AK" => "Alaska",
        "AZ" => "Arizona",
        "AR" => "Arkansas",
        "CA" => "California",
        "CO" => "Colorado",
        "CT" => "Connecticut",
        "DE" => "Delaware",
        "DC" => "District of Columbia",
        "FL" => "Florida",
        "GA" => "Georgia",
        "HI" => "Hawaii",
        "ID" => "Idaho",
        "IL" => "Illinois",
        "IN" => "Indiana",
        "IA" => "Iowa",
        "KS" => "Kansas",
        "KY" => "Kentucky",
        "LA" => "Louisiana",
        "ME" => "Maine",
        "MD" => "Maryland",
        "MA" => "Massachusetts",
        "MI" => "Michigan",
        "MN" => "Minnesota",
        "MS" => "Mississippi",
        "MO" => "Missouri",
        "MT" => "Montana",
        "NE" => "Nebraska",
        "NV" => "Nevada",
        "NH" => "New Hampshire",
        "NJ" => "New Jersey",
        "NM" => "New Mexico",
        "NY" => "New York",
        "NC" => "North Carolina",
        "ND" => "North Dakota",
        "OH" => "Ohio",
        "OK" => "Oklahoma",
        "OR" => "Oregon",
        "PA" => "Pennsylvania",
        "RI" => "Rhode Island",
        "SC" => "South Carolina",
        "SD" => "South Dakota",
        "TN" => "Tennessee",
        "TX" => "Texas",
        "UT" => "Utah",
        "VT" => "Vermont",
        "VA" => "Virginia",
        "WA" => "Washington",
        "WV" => "West Virginia",
        "WI" => "Wisconsin",
        "WY" => "Wyoming",
        _ => "Unknown",
    }
}

/// Whether `code` is one of the [`STATE_CODES`] (case-insensitive).
#[must_use]
pub fn is_state_code(code: &str) -> bool {
    STATE_CODES.iter().any(|c| c.eq_ignore_ascii_case(code))
}

/// Error returned when a string is neither a state code nor `"All"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown state code '{code}': expected a two-letter US state code or \"All\"")]
pub struct InvalidStateError {
    /// The rejected input.
    pub code: String,
}

/// Categorical state filter: everything, or exactly one state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StateFilter {
    /// Pass-through; matches every record.
    #[default]
    All,
    /// Exact match against an upper-case two-letter code.
    State(String),
}

impl StateFilter {
    /// Whether a record with the given state passes this filter.
    ///
    /// An absent state only passes [`Self::All`].
    #[must_use]
    pub fn matches(&self, state: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::State(code) => state == Some(code.as_str()),
        }
    }

    /// The filter's code form: `"All"` or the two-letter code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::All => ALL_STATES,
            Self::State(code) => code,
        }
    }

    /// Full display name (`"All States"`, `"California"`, ...).
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        state_name(self.code())
    }
}

impl std::fmt::Display for StateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for StateFilter {
    type Err = InvalidStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL_STATES) {
            Ok(Self::All)
        } else if is_state_code(trimmed) {
            Ok(Self::State(trimmed.to_uppercase()))
        } else {
            Err(InvalidStateError {
                code: s.to_string(),
            })
        }
    }
}

impl TryFrom<String> for StateFilter {
    type Error = InvalidStateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StateFilter> for String {
    fn from(filter: StateFilter) -> Self {
        filter.code().to_string()
    }
}
