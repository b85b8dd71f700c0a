#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map viewport and marker computation over incident coordinates.
//!
//! Records whose coordinates are absent, non-finite, or outside the WGS84
//! ranges are excluded here and only here: they still count towards
//! statistics and still appear in the table and the CSV export.

use geo::{BoundingRect, MultiPoint, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, feature::Id};
use incident_map_geography_models::{BoundingBox, LatLng, Viewport};
use incident_map_incident_models::IncidentRecord;
use serde::Serialize;

/// Title shown on a marker whose record has no name.
pub const UNKNOWN_MARKER_TITLE: &str = "Unknown";

/// Returns the record's coordinates when both are present and valid.
#[must_use]
pub fn valid_coordinates(record: &IncidentRecord) -> Option<LatLng> {
    let point = LatLng::new(record.latitude?, record.longitude?);
    point.is_valid().then_some(point)
}

/// Computes what the map should show for `records`.
///
/// With at least one valid coordinate this is the exact extent of the
/// valid points. Otherwise it is [`Viewport::fallback`].
#[must_use]
pub fn compute_viewport(records: &[IncidentRecord]) -> Viewport {
    let points: Vec<Point<f64>> = records
        .iter()
        .filter_map(valid_coordinates)
        .map(|p| Point::new(p.lng, p.lat))
        .collect();
    let total = points.len();

    let viewport = MultiPoint::new(points).bounding_rect().map_or_else(Viewport::fallback, |rect| {
        Viewport::Bounds(BoundingBox::new(
            rect.min().y,
            rect.min().x,
            rect.max().y,
            rect.max().x,
        ))
    });

    log::debug!(
        "Computed viewport from {total} of {} records: {viewport:?}",
        records.len()
    );

    viewport
}

/// One map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerPoint {
    /// Identifier of the record behind the marker.
    pub id: String,
    /// Marker position.
    pub position: LatLng,
    /// Popup title.
    pub title: String,
    /// City of the incident, if known.
    pub city: Option<String>,
    /// Two-letter state code, if known.
    pub state: Option<String>,
}

impl MarkerPoint {
    /// `"City, ST"` popup subtitle, using whichever parts are present.
    #[must_use]
    pub fn subtitle(&self) -> String {
        [self.city.as_deref(), self.state.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Returns one marker per record with valid coordinates, in input order.
#[must_use]
pub fn marker_points(records: &[IncidentRecord]) -> Vec<MarkerPoint> {
    records
        .iter()
        .filter_map(|record| {
            let position = valid_coordinates(record)?;
            Some(MarkerPoint {
                id: record.id.to_string(),
                position,
                title: record
                    .name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_MARKER_TITLE.to_string()),
                city: record.city.clone(),
                state: record.state.clone(),
            })
        })
        .collect()
}

/// Serializes the markers for `records` as a `GeoJSON` feature collection.
///
/// Each feature is a `Point` whose id is the record id and whose
/// properties carry the popup `title` and `subtitle`.
#[must_use]
pub fn markers_geojson(records: &[IncidentRecord]) -> FeatureCollection {
    let features = marker_points(records)
        .into_iter()
        .map(|marker| {
            let point = Point::new(marker.position.lng, marker.position.lat);
            let mut properties = JsonObject::new();
            properties.insert("title".to_string(), JsonValue::from(marker.title.as_str()));
            properties.insert("subtitle".to_string(), JsonValue::from(marker.subtitle()));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&point))),
                id: Some(Id::String(marker.id)),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
