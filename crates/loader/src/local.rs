use crate::error::LoaderError;
use crate::parse::parse_csv;
use crate::provider::RecordProvider;
use async_trait::async_trait;
use core_types::PlayRecord;
use std::path::PathBuf;

/// Reads plays from a CSV file on local disk.
#[derive(Debug, Clone)]
pub struct LocalCsvProvider {
    path: PathBuf,
}

impl LocalCsvProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordProvider for LocalCsvProvider {
    async fn load(&self) -> Result<Vec<PlayRecord>, LoaderError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            LoaderError::SourceUnavailable(format!(
                "could not read {}: {e}",
                self.path.display()
            ))
        })?;
        let records = parse_csv(bytes.as_slice())?;
        tracing::debug!(path = %self.path.display(), plays = records.len(), "Loaded plays from file.");
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
