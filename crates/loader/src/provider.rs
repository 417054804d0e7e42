use crate::cache::CachedProvider;
use crate::error::LoaderError;
use crate::local::LocalCsvProvider;
use crate::sheet::PublishedSheetProvider;
use async_trait::async_trait;
use configuration::{CacheConfig, SourceConfig, SourceKind};
use core_types::PlayRecord;

/// The generic, abstract interface for a source of play records.
/// The dashboard only ever talks to this trait, allowing the underlying
/// source (file, spreadsheet, cache, fixture) to be swapped out.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// Loads the full, validated record set in source order.
    async fn load(&self) -> Result<Vec<PlayRecord>, LoaderError>;

    /// A short human-readable identity of the source, for logs and messages.
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: RecordProvider + ?Sized> RecordProvider for Box<T> {
    async fn load(&self) -> Result<Vec<PlayRecord>, LoaderError> {
        (**self).load().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// A fixed, in-memory record set.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    records: Vec<PlayRecord>,
}

impl StaticProvider {
    pub fn new(records: Vec<PlayRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordProvider for StaticProvider {
    async fn load(&self) -> Result<Vec<PlayRecord>, LoaderError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} plays)", self.records.len())
    }
}

/// Builds the configured source wrapped in a TTL cache.
pub fn provider_from_config(
    source: &SourceConfig,
    cache: &CacheConfig,
) -> CachedProvider<Box<dyn RecordProvider>> {
    let inner: Box<dyn RecordProvider> = match source.kind {
        SourceKind::Local => Box::new(LocalCsvProvider::new(source.path.clone())),
        SourceKind::Sheet => Box::new(PublishedSheetProvider::new(
            source.sheet_id.clone(),
            source.gid.clone(),
        )),
    };
    tracing::info!(source = %inner.describe(), ttl = ?cache.ttl, "Configured play source.");
    CachedProvider::new(inner, cache.ttl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[tokio::test]
    async fn static_provider_returns_its_records() {
        let provider = StaticProvider::new(Vec::new());
        assert!(provider.load().await.unwrap().is_empty());
        assert_eq!(provider.describe(), "in-memory (0 plays)");
    }

    #[test]
    fn builds_provider_for_configured_kind() {
        let cache = CacheConfig { ttl: Duration::from_secs(60) };

        let local = SourceConfig {
            kind: SourceKind::Local,
            path: PathBuf::from("plays.csv"),
            ..SourceConfig::default()
        };
        assert_eq!(provider_from_config(&local, &cache).describe(), "file plays.csv");

        let sheet = SourceConfig {
            kind: SourceKind::Sheet,
            sheet_id: "abc".to_string(),
            ..SourceConfig::default()
        };
        assert!(provider_from_config(&sheet, &cache).describe().starts_with("sheet abc"));
    }
}
