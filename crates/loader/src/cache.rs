use crate::error::LoaderError;
use crate::provider::RecordProvider;
use async_trait::async_trait;
use core_types::PlayRecord;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

struct CacheEntry {
    loaded_at: Instant,
    records: Arc<Vec<PlayRecord>>,
}

/// Reuses the last successful load of `inner` until the TTL expires.
///
/// A failed refresh clears the entry and returns the error; stale records are
/// never handed out in place of a failure.
pub struct CachedProvider<P> {
    inner: P,
    ttl: Duration,
    slot: RwLock<Option<CacheEntry>>,
}

impl<P: RecordProvider> CachedProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Drops the cached records so the next load goes to the source.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }

    fn fresh(&self, entry: &CacheEntry) -> Option<Arc<Vec<PlayRecord>>> {
        (entry.loaded_at.elapsed() < self.ttl).then(|| Arc::clone(&entry.records))
    }

    async fn load_shared(&self) -> Result<Arc<Vec<PlayRecord>>, LoaderError> {
        if let Some(records) = self.slot.read().await.as_ref().and_then(|e| self.fresh(e)) {
            return Ok(records);
        }

        let mut slot = self.slot.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(records) = slot.as_ref().and_then(|e| self.fresh(e)) {
            return Ok(records);
        }

        match self.inner.load().await {
            Ok(records) => {
                tracing::info!(source = %self.inner.describe(), plays = records.len(), "Refreshed play cache.");
                let records = Arc::new(records);
                *slot = Some(CacheEntry {
                    loaded_at: Instant::now(),
                    records: Arc::clone(&records),
                });
                Ok(records)
            }
            Err(e) => {
                tracing::warn!(source = %self.inner.describe(), error = %e, "Play source refresh failed.");
                *slot = None;
                Err(e)
            }
        }
    }
}

#[async_trait]
impl<P: RecordProvider> RecordProvider for CachedProvider<P> {
    async fn load(&self) -> Result<Vec<PlayRecord>, LoaderError> {
        let records = self.load_shared().await?;
        Ok(records.as_ref().clone())
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::PlayResult;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failing: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl RecordProvider for CountingProvider {
        async fn load(&self) -> Result<Vec<PlayRecord>, LoaderError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(LoaderError::SourceUnavailable("offline".to_string()));
            }
            Ok(vec![PlayRecord {
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                play: format!("load {call}"),
                odds: "-110".to_string(),
                member: "Dana".to_string(),
                result: PlayResult::Win,
                units_out: dec!(1),
                units_in: dec!(1.91),
            }])
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reuses_records_within_ttl() {
        let cache = CachedProvider::new(CountingProvider::new(), Duration::from_secs(300));

        let first = cache.load().await.unwrap();
        tokio::time::advance(Duration::from_secs(299)).await;
        let second = cache.load().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn refreshes_after_ttl_expires() {
        let cache = CachedProvider::new(CountingProvider::new(), Duration::from_secs(300));

        cache.load().await.unwrap();
        tokio::time::advance(Duration::from_secs(301)).await;
        let refreshed = cache.load().await.unwrap();

        assert_eq!(refreshed[0].play, "load 1");
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_does_not_serve_stale_records() {
        let cache = CachedProvider::new(CountingProvider::new(), Duration::from_secs(60));

        cache.load().await.unwrap();
        cache.inner.failing.store(true, Ordering::SeqCst);
        tokio::time::advance(Duration::from_secs(61)).await;

        assert!(matches!(
            cache.load().await,
            Err(LoaderError::SourceUnavailable(_))
        ));
        assert!(cache.slot.read().await.is_none());
    }

    #[tokio::test]
    async fn invalidate_forces_a_reload() {
        let cache = CachedProvider::new(CountingProvider::new(), Duration::from_secs(300));

        cache.load().await.unwrap();
        cache.invalidate().await;
        cache.load().await.unwrap();

        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
    }
}
