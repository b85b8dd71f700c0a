//! Raw record decoding.
//!
//! Turns a downloaded or on-disk body into a list of JSON objects, one per
//! incident, keyed by column or field name. Normalization happens later;
//! nothing here interprets field values.

use serde_json::{Map, Value};

use crate::SourceError;

/// Parses a comma-delimited CSV document with a header row.
///
/// Every row becomes a JSON object of string values keyed by the trimmed
/// header names. Empty cells are left out so they read as absent. Rows
/// shorter or longer than the header are tolerated; extra cells are
/// dropped.
///
/// # Errors
///
/// Returns [`SourceError::Csv`] if the document is not valid CSV, or
/// [`SourceError::Normalization`] if it has no header row.
pub fn parse_csv(text: &str, limit: Option<u64>) -> Result<Vec<Value>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_owned())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(SourceError::Normalization {
            message: "CSV document contains no header row".to_owned(),
        });
    }

    let mut records = Vec::new();

    for result in reader.records() {
        if limit.is_some_and(|max| records.len() as u64 >= max) {
            break;
        }

        let row = result?;
        let mut object = Map::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            if header.is_empty() || cell.trim().is_empty() {
                continue;
            }
            object.insert(header.clone(), Value::String(cell.to_owned()));
        }
        records.push(Value::Object(object));
    }

    log::debug!("Parsed {} CSV rows with {} columns", records.len(), headers.len());

    Ok(records)
}

/// Parses a JSON array of record objects.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if the text is not valid JSON, or
/// [`SourceError::Normalization`] if it is not an array.
pub fn parse_json(text: &str, limit: Option<u64>) -> Result<Vec<Value>, SourceError> {
    let Value::Array(mut records) = serde_json::from_str(text)? else {
        return Err(SourceError::Normalization {
            message: "expected a JSON array of records".to_owned(),
        });
    };

    if let Some(max) = limit.and_then(|max| usize::try_from(max).ok()) {
        records.truncate(max);
    }

    Ok(records)
}

/// Decodes a body as JSON when it looks like a JSON array, as CSV
/// otherwise.
///
/// # Errors
///
/// Propagates the error of whichever decoder was chosen.
pub fn parse_body(text: &str, limit: Option<u64>) -> Result<Vec<Value>, SourceError> {
    if text.trim_start().starts_with('[') {
        parse_json(text, limit)
    } else {
        parse_csv(text, limit)
    }
}
