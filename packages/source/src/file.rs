//! Local file source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::raw::{parse_body, parse_csv, parse_json};
use crate::{FetchOptions, IncidentSource, SourceError};

/// Reads raw records from a CSV or JSON file on disk.
///
/// The format follows the extension (`.csv` or `.json`); any other
/// extension is sniffed from the content.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    /// Creates a source reading `path`. The file is not opened until
    /// records are fetched.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Path of the file being read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IncidentSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_raw(
        &self,
        options: &FetchOptions,
    ) -> Result<Vec<serde_json::Value>, SourceError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        log::debug!("Read {} bytes from {}", text.len(), self.name);

        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => parse_csv(&text, options.limit),
            Some("json") => parse_json(&text, options.limit),
            _ => parse_body(&text, options.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "incident_map_source_{}_{name}",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn reads_csv_file() {
        let path = temp_file("records.csv", "id,name,state\n1,Ann,nv\n2,Bob,TX\n");
        let source = FileSource::new(&path);

        let raws = source.fetch_raw(&FetchOptions::default()).await.unwrap();

        assert_eq!(raws.len(), 2);
        assert_eq!(raws[0]["state"], "nv");
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn reads_json_file_with_limit() {
        let path = temp_file("records.json", r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#);
        let source = FileSource::new(&path);

        let raws = source
            .fetch_raw(&FetchOptions { limit: Some(2) })
            .await
            .unwrap();

        assert_eq!(raws.len(), 2);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = FileSource::new("/definitely/not/here.csv");

        let result = source.fetch_raw(&FetchOptions::default()).await;

        assert!(matches!(result, Err(SourceError::Io(_))));
    }
}
