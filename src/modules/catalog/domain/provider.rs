use async_trait::async_trait;

use super::entities::{SeasonDetails, TvShowDetails};
use crate::shared::errors::AppResult;

/// Port to the external catalog metadata provider
///
/// Implementations may fail at any time; callers never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn get_tv_show_details(&self, show_id: i32) -> AppResult<TvShowDetails>;

    async fn get_season_details(&self, show_id: i32, season_number: i32)
        -> AppResult<SeasonDetails>;

    /// Fetch show details bypassing any cache. Defaults to a plain fetch.
    async fn refresh_tv_show_details(&self, show_id: i32) -> AppResult<TvShowDetails> {
        self.get_tv_show_details(show_id).await
    }
}
