#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived view types for the incident dashboard.
//!
//! Defines the outputs of the aggregation and pagination stages and the
//! sort specification the table header toggles. None of these values
//! outlive the pipeline invocation that produced them.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of table rows per page in the dashboard.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Count and share of records in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedStat {
    /// Display label of the category.
    pub label: String,
    /// Number of records in the category.
    pub count: u64,
    /// `count / total * 100`, where `total` is the size of the aggregated
    /// sequence.
    pub percentage: f64,
}

/// Attributes the table can be sorted by.
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
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortKey {
    /// Incident identifier (numeric when the id is an integer)
    Id,
    /// Victim name
    Name,
    /// Incident date
    Date,
    /// Victim age
    Age,
    /// Raw race code
    Race,
    /// City
    City,
    /// State abbreviation
    State,
    /// Armed status
    ArmedWith,
    /// Body camera flag
    BodyCamera,
    /// Latitude
    Latitude,
    /// Longitude
    Longitude,
}

/// Sort order.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    #[strum(to_string = "ascending", serialize = "asc")]
    Ascending,
    /// Largest first.
    #[strum(to_string = "descending", serialize = "desc")]
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The table's active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    /// Attribute to sort by.
    pub key: SortKey,
    /// Sort order.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort by `key`.
    #[must_use]
    pub const fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Returns the spec that results from requesting a sort on `key`.
    ///
    /// Requesting the key that is already active flips its direction; any
    /// other key starts ascending.
    #[must_use]
    pub fn toggle(current: Option<Self>, key: SortKey) -> Self {
        match current {
            Some(spec) if spec.key == key => Self {
                key,
                direction: spec.direction.flipped(),
            },
            _ => Self::ascending(key),
        }
    }
}

/// One page of a sequence plus the total page count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on the requested page (empty when out of range).
    pub items: Vec<T>,
    /// `ceil(total / page_size)`; `0` for an empty sequence.
    pub page_count: usize,
}

/// The caller's position in a paginated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    /// 1-based page index.
    pub page_index: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Number of items being paginated.
    pub total_items: usize,
}

impl PageWindow {
    /// Creates a window with `page_index` clamped into range.
    #[must_use]
    pub fn new(page_index: usize, page_size: usize, total_items: usize) -> Self {
        let mut window = Self {
            page_index,
            page_size,
            total_items,
        };
        window.page_index = clamp_page_index(page_index, window.page_count());
        window
    }

    /// `ceil(total_items / page_size)`, `0` when there is nothing to show.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        page_count(self.total_items, self.page_size)
    }

    /// Page count as shown to the user (never below 1).
    #[must_use]
    pub fn display_page_count(&self) -> usize {
        self.page_count().max(1)
    }

    /// Whether a PREV control should be enabled.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    /// Whether a NEXT control should be enabled.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_index < self.page_count()
    }
}

/// `ceil(total / page_size)`, or `0` when either is zero.
#[must_use]
pub const fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Clamps a 1-based page index into `[1, max(page_count, 1)]`.
#[must_use]
pub fn clamp_page_index(page_index: usize, page_count: usize) -> usize {
    page_index.clamp(1, page_count.max(1))
}
