#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! State codes and map viewport types.
//!
//! These types describe where the map should look. They carry no
//! rendering concerns beyond a few named presentation constants that the
//! map layer applies on top of the exact extremes.

pub mod states;

use serde::{Deserialize, Serialize};

pub use states::{ALL_STATES, STATE_CODES, StateFilter, state_name};

/// Center of the fallback view (roughly the continental US centroid).
pub const FALLBACK_CENTER: LatLng = LatLng {
    lat: 37.8,
    lng: -96.0,
};

/// Zoom level of the fallback view.
pub const FALLBACK_ZOOM: u8 = 4;

/// Pixel padding the map applies when fitting to a [`BoundingBox`].
pub const FIT_PADDING_PX: u32 = 50;

/// Maximum zoom the map may reach when fitting to a [`BoundingBox`].
pub const MAX_FIT_ZOOM: u8 = 7;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both values are finite and inside the WGS84 ranges
    /// (latitude in `[-90, 90]`, longitude in `[-180, 180]`).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern latitude boundary.
    pub south: f64,
    /// Western longitude boundary.
    pub west: f64,
    /// Northern latitude boundary.
    pub north: f64,
    /// Eastern longitude boundary.
    pub east: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given extremes.
    #[must_use]
    pub const fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Whether `point` lies inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        (self.south..=self.north).contains(&point.lat)
            && (self.west..=self.east).contains(&point.lng)
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            f64::midpoint(self.south, self.north),
            f64::midpoint(self.west, self.east),
        )
    }
}

/// What the map should show for a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Viewport {
    /// Fit the map to these exact extremes.
    Bounds(BoundingBox),
    /// No valid coordinates: show a fixed center and zoom.
    Fallback {
        /// Map center.
        center: LatLng,
        /// Zoom level.
        zoom: u8,
    },
}

impl Viewport {
    /// The fixed fallback view.
    #[must_use]
    pub const fn fallback() -> Self {
        Self::Fallback {
            center: FALLBACK_CENTER,
            zoom: FALLBACK_ZOOM,
        }
    }

    /// Returns the bounding box, if this viewport has one.
    #[must_use]
    pub const fn bounds(&self) -> Option<&BoundingBox> {
        match self {
            Self::Bounds(bbox) => Some(bbox),
            Self::Fallback { .. } => None,
        }
    }
}
