//! Process-wide resources — shared HTTP client and in-memory TTL cache.
//!
//! One `Resources` instance is created at startup and handed around behind
//! an `Arc`. `shutdown` drains the cache and marks the handle closed;
//! lookups after shutdown miss and writes are dropped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::CacheError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A cached value with its expiry time.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

struct Inner {
    titles: HashMap<String, Entry>,
    closed: bool,
}

/// Shared process-wide resources.
pub struct Resources {
    http: reqwest::Client,
    ttl: chrono::Duration,
    inner: RwLock<Inner>,
}

impl Resources {
    /// Initialize the shared resources. Call once at startup.
    pub fn init(ttl_secs: u64) -> Result<Arc<Self>, CacheError> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| CacheError::ClientBuild(e.to_string()))?;
        info!(ttl_secs, "Resources initialized");
        Ok(Arc::new(Self {
            http,
            ttl: chrono::Duration::seconds(ttl_secs as i64),
            inner: RwLock::new(Inner {
                titles: HashMap::new(),
                closed: false,
            }),
        }))
    }

    /// The shared HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Look up a cached link title, honoring TTL.
    pub async fn cached_title(&self, url: &str) -> Option<String> {
        let inner = self.inner.read().await;
        if inner.closed {
            return None;
        }
        inner
            .titles
            .get(url)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.value.clone())
    }

    /// Cache a link title for the configured TTL.
    pub async fn store_title(&self, url: &str, title: &str) {
        let mut inner = self.inner.write().await;
        if inner.closed {
            return;
        }
        inner.titles.insert(
            url.to_string(),
            Entry {
                value: title.to_string(),
                expires_at: Utc::now() + self.ttl,
            },
        );
    }

    /// Drop expired entries. Returns how many were removed.
    pub async fn sweep(&self) -> usize {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let before = inner.titles.len();
        inner.titles.retain(|_, entry| entry.expires_at > now);
        before - inner.titles.len()
    }

    /// Tear down: drain the cache and refuse further writes.
    pub async fn shutdown(&self) {
        let mut inner = self.inner.write().await;
        inner.titles.clear();
        inner.closed = true;
        info!("Resources shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_and_retrieve() {
        let resources = Resources::init(60).unwrap();
        resources.store_title("https://a", "A Title").await;
        assert_eq!(
            resources.cached_title("https://a").await,
            Some("A Title".to_string())
        );
        assert_eq!(resources.cached_title("https://b").await, None);
    }

    #[tokio::test]
    async fn zero_ttl_entries_are_stale_immediately() {
        let resources = Resources::init(0).unwrap();
        resources.store_title("https://a", "A Title").await;
        assert_eq!(resources.cached_title("https://a").await, None);
        assert_eq!(resources.sweep().await, 1);
    }

    #[tokio::test]
    async fn shutdown_closes_the_cache() {
        let resources = Resources::init(60).unwrap();
        resources.store_title("https://a", "A Title").await;
        resources.shutdown().await;
        assert_eq!(resources.cached_title("https://a").await, None);
        // Writes after shutdown are dropped, not queued.
        resources.store_title("https://b", "B Title").await;
        assert_eq!(resources.sweep().await, 0);
    }
}
