use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::modules::catalog::domain::{CatalogProvider, SeasonDetails, TvShowDetails};
use crate::shared::cache::{CacheEvent, CacheStats, TtlCache};
use crate::shared::errors::AppResult;
use crate::log_debug;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogCacheStats {
    pub shows: CacheStats,
    pub seasons: CacheStats,
}

/// Decorator that adds transparent TTL caching to any CatalogProvider
///
/// Show and season lookups are memoized for the configured TTL (5 minutes by
/// default). `refresh_tv_show_details` always goes to the inner provider and
/// pushes the fresh value to show-cache subscribers.
pub struct CachingCatalogProvider {
    inner: Arc<dyn CatalogProvider>,
    shows: TtlCache<i32, TvShowDetails>,
    seasons: TtlCache<(i32, i32), SeasonDetails>,
}

impl CachingCatalogProvider {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

    pub fn new(inner: Arc<dyn CatalogProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            shows: TtlCache::new(ttl),
            seasons: TtlCache::new(ttl),
        }
    }

    pub fn subscribe_shows(&self) -> broadcast::Receiver<CacheEvent<i32, TvShowDetails>> {
        self.shows.subscribe()
    }

    pub fn cache_stats(&self) -> CatalogCacheStats {
        CatalogCacheStats {
            shows: self.shows.stats(),
            seasons: self.seasons.stats(),
        }
    }

    /// Drop expired show and season entries; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        self.shows.purge_expired() + self.seasons.purge_expired()
    }

    /// Sweep expired entries once per TTL for as long as the provider lives
    pub fn start_cleanup_task(self: &Arc<Self>) -> JoinHandle<()> {
        let provider = Arc::downgrade(self);
        let period = self.shows.ttl().max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                let Some(provider) = provider.upgrade() else {
                    break;
                };

                let removed = provider.purge_expired();
                if removed > 0 {
                    log_debug!(
                        "Cleaned up {} expired catalog cache entries (show hit rate {:.2})",
                        removed,
                        provider.shows.stats().hit_rate()
                    );
                }
            }
        })
    }
}

#[async_trait]
impl CatalogProvider for CachingCatalogProvider {
    async fn get_tv_show_details(&self, show_id: i32) -> AppResult<TvShowDetails> {
        self.shows
            .get_or_fetch(show_id, || self.inner.get_tv_show_details(show_id))
            .await
    }

    async fn get_season_details(
        &self,
        show_id: i32,
        season_number: i32,
    ) -> AppResult<SeasonDetails> {
        self.seasons
            .get_or_fetch((show_id, season_number), || {
                self.inner.get_season_details(show_id, season_number)
            })
            .await
    }

    async fn refresh_tv_show_details(&self, show_id: i32) -> AppResult<TvShowDetails> {
        let fresh = self.inner.get_tv_show_details(show_id).await?;
        self.shows.invalidate(show_id, Some(fresh.clone()));
        Ok(fresh)
    }
}
