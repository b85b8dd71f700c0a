#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident data sources and normalization.
//!
//! Each provider implements [`IncidentSource`] to fetch raw records as
//! JSON objects. [`load`] runs a source, normalizes what it returns, and
//! reports either the loaded records or a distinct [`DataState::NoData`]
//! so callers never confuse a failed fetch with an empty dataset.

pub mod file;
pub mod http;
pub mod normalize;
pub mod parsing;
pub mod progress;
pub mod raw;
pub mod retry;

use std::sync::Arc;

use async_trait::async_trait;
use incident_map_incident_models::IncidentRecord;

pub use file::FileSource;
pub use http::{HttpSource, WASHINGTON_POST_CSV_URL};
pub use normalize::{NormalizeReport, normalize_record, normalize_records};

use crate::progress::ProgressCallback;

/// Errors that can occur during data source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Response status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The body decoded but does not have the expected shape.
    #[error("Normalization error: {message}")]
    Normalization {
        /// Description of what went wrong.
        message: String,
    },
}

/// Options for one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Maximum number of raw records to read.
    pub limit: Option<u64>,
}

/// A provider of raw incident records.
#[async_trait]
pub trait IncidentSource: Send + Sync {
    /// Human-readable description used in log messages.
    fn name(&self) -> &str;

    /// Fetches raw records, one JSON object per incident.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the data cannot be retrieved or decoded.
    async fn fetch_raw(
        &self,
        options: &FetchOptions,
    ) -> Result<Vec<serde_json::Value>, SourceError>;
}

/// Result of loading a source.
#[derive(Debug, Clone, PartialEq)]
pub enum DataState {
    /// Records were retrieved (possibly zero of them).
    Loaded {
        /// Normalized records, in source order.
        records: Arc<[IncidentRecord]>,
        /// Raw records dropped for an invalid identifier.
        skipped: usize,
    },
    /// Retrieval failed; there is nothing to show.
    NoData {
        /// Why no data is available.
        reason: String,
    },
}

impl DataState {
    /// The loaded records, or an empty slice for [`Self::NoData`].
    #[must_use]
    pub fn records(&self) -> &[IncidentRecord] {
        match self {
            Self::Loaded { records, .. } => records,
            Self::NoData { .. } => &[],
        }
    }

    /// Shared handle to the loaded records (empty for [`Self::NoData`]).
    #[must_use]
    pub fn shared_records(&self) -> Arc<[IncidentRecord]> {
        match self {
            Self::Loaded { records, .. } => Arc::clone(records),
            Self::NoData { .. } => Arc::from(Vec::new()),
        }
    }

    /// Whether the fetch failed.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}

/// Fetches and normalizes records from `source`.
///
/// Fetch failures are logged and reported as [`DataState::NoData`] rather
/// than returned as errors.
pub async fn load(
    source: &dyn IncidentSource,
    options: &FetchOptions,
    progress: &Arc<dyn ProgressCallback>,
) -> DataState {
    progress.set_message(format!("Fetching {}", source.name()));

    let raws = match source.fetch_raw(options).await {
        Ok(raws) => raws,
        Err(e) => {
            log::error!("[{}] fetch failed: {e}", source.name());
            progress.finish(format!("{}: no data", source.name()));
            return DataState::NoData {
                reason: e.to_string(),
            };
        }
    };

    progress.set_total(raws.len() as u64);
    progress.set_message(format!("Normalizing {}", source.name()));

    let NormalizeReport { records, skipped } = normalize_records(&raws);
    progress.inc(raws.len() as u64);

    log::info!(
        "[{}] loaded {} records ({skipped} skipped)",
        source.name(),
        records.len()
    );
    progress.finish(format!("{}: {} records", source.name(), records.len()));

    DataState::Loaded {
        records: Arc::from(records),
        skipped,
    }
}
