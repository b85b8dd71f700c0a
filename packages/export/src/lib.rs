#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV export of the filtered, sorted record sequence.
//!
//! The document layout is fixed: a header row, then one row per record,
//! rows joined by `\n` with no trailing newline. Text cells are always
//! double-quoted with embedded quotes doubled, so any RFC 4180 reader
//! recovers the original values. The body camera cell is a bare `ON` or
//! `OFF`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use incident_map_geography_models::StateFilter;
use incident_map_incident_models::IncidentRecord;
use strum_macros::{AsRefStr, Display, EnumString};

/// Errors that can occur while writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Writing the document to disk failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A column of the CSV export. The `Display` form is the header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum ExportColumn {
    /// Victim name, `UNKNOWN` when absent.
    #[strum(to_string = "Name", serialize = "name")]
    Name,
    /// City, `RURAL` when absent.
    #[strum(to_string = "City", serialize = "city")]
    City,
    /// State code, or the active filter code when absent.
    #[strum(to_string = "State", serialize = "state")]
    State,
    /// Armed status, `UNKNOWN` when absent.
    #[strum(to_string = "Armed Status", serialize = "armed_with")]
    ArmedWith,
    /// Unquoted `ON`/`OFF`.
    #[strum(to_string = "Body Camera", serialize = "body_camera")]
    BodyCamera,
    /// Race label (e.g. `Hispanic`).
    #[strum(to_string = "Race", serialize = "race")]
    Race,
    /// `YYYY-MM-DD`, empty when absent.
    #[strum(to_string = "Date", serialize = "date")]
    Date,
    /// Age in years, empty when absent.
    #[strum(to_string = "Age", serialize = "age")]
    Age,
}

/// Columns of the dashboard's export, in order.
pub const DEFAULT_COLUMNS: &[ExportColumn] = &[
    ExportColumn::Name,
    ExportColumn::City,
    ExportColumn::State,
    ExportColumn::ArmedWith,
    ExportColumn::BodyCamera,
];

/// Quotes a text cell, doubling any embedded `"`.
#[must_use]
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn cell(record: &IncidentRecord, column: ExportColumn, state_filter: &StateFilter) -> String {
    match column {
        ExportColumn::Name => quote(record.display_name()),
        ExportColumn::City => quote(record.display_city()),
        ExportColumn::State => quote(record.state.as_deref().unwrap_or_else(|| state_filter.code())),
        ExportColumn::ArmedWith => quote(record.display_armed()),
        ExportColumn::BodyCamera => record.body_camera_label().to_string(),
        ExportColumn::Race => quote(record.race_code().label()),
        ExportColumn::Date => record.date.map(|d| d.to_string()).unwrap_or_default(),
        ExportColumn::Age => record.age.map(|age| age.to_string()).unwrap_or_default(),
    }
}

/// Serializes `records` as a CSV document with the given `columns`.
///
/// Absent values render as the display placeholders (`UNKNOWN` name,
/// `RURAL` city, `UNKNOWN` armed status). An absent state renders as the
/// active `state_filter` code.
#[must_use]
pub fn export_csv(
    records: &[IncidentRecord],
    columns: &[ExportColumn],
    state_filter: &StateFilter,
) -> String {
    let mut document = columns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    for record in records {
        let row = columns
            .iter()
            .map(|column| cell(record, *column, state_filter))
            .collect::<Vec<_>>()
            .join(",");
        write!(document, "\n{row}").unwrap();
    }

    log::debug!("Exported {} records as CSV", records.len());

    document
}

/// [`export_csv`] with [`DEFAULT_COLUMNS`].
#[must_use]
pub fn export_default_csv(records: &[IncidentRecord], state_filter: &StateFilter) -> String {
    export_csv(records, DEFAULT_COLUMNS, state_filter)
}

/// Download filename for an export: `incidents_<state>_<YYYY-MM-DD>.csv`
/// with the state code lower-cased.
#[must_use]
pub fn export_filename(state_filter: &StateFilter, date: NaiveDate) -> String {
    format!("incidents_{}_{date}.csv", state_filter.code().to_lowercase())
}

/// Writes an export document to `path`.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be written.
pub fn write_csv_file(path: &Path, document: &str) -> Result<(), ExportError> {
    std::fs::write(path, document).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Wrote {} bytes to {}", document.len(), path.display());
    Ok(())
}
