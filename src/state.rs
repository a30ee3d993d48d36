use std::sync::Arc;

use crate::modules::{
    catalog::{CachingCatalogProvider, CatalogProvider, TmdbCatalogClient},
    reviews::{ReviewRepository, ReviewRepositoryImpl, ReviewService},
    tv_progress::{
        MarkAllEpisodesHandler, PendingBackfillHandler, ProgressRepository,
        ProgressRepositoryImpl, SeasonProgressHandler, ToggleEpisodeHandler, TrackedShowService,
    },
};
use crate::shared::{AppConfig, AppResult, Database};

/// Handlers and services shared by every request
#[derive(Clone)]
pub struct AppState {
    pub toggle_episode: Arc<ToggleEpisodeHandler>,
    pub mark_all_episodes: Arc<MarkAllEpisodesHandler>,
    pub season_progress: Arc<SeasonProgressHandler>,
    pub pending_backfill: Arc<PendingBackfillHandler>,
    pub tracked_shows: Arc<TrackedShowService>,
    pub reviews: Arc<ReviewService>,
    pub database: Option<Arc<Database>>,
    pub catalog_cache: Option<Arc<CachingCatalogProvider>>,
}

impl AppState {
    pub fn new(
        progress_repo: Arc<dyn ProgressRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        catalog: Arc<dyn CatalogProvider>,
    ) -> Self {
        Self {
            toggle_episode: Arc::new(ToggleEpisodeHandler::new(
                progress_repo.clone(),
                catalog.clone(),
            )),
            mark_all_episodes: Arc::new(MarkAllEpisodesHandler::new(
                progress_repo.clone(),
                catalog.clone(),
            )),
            season_progress: Arc::new(SeasonProgressHandler::new(
                progress_repo.clone(),
                catalog.clone(),
            )),
            pending_backfill: Arc::new(PendingBackfillHandler::new(
                progress_repo.clone(),
                catalog.clone(),
            )),
            tracked_shows: Arc::new(TrackedShowService::new(progress_repo, catalog)),
            reviews: Arc::new(ReviewService::new(review_repo)),
            database: None,
            catalog_cache: None,
        }
    }

    /// Wire Postgres repositories and the cached TMDB catalog
    pub fn from_config(config: &AppConfig, database: Arc<Database>) -> AppResult<Self> {
        let tmdb = TmdbCatalogClient::new(
            config.tmdb_api_key.clone(),
            config.catalog_requests_per_second,
        )?;
        let catalog = Arc::new(CachingCatalogProvider::new(
            Arc::new(tmdb),
            config.catalog_cache_ttl,
        ));
        catalog.start_cleanup_task();

        let mut state = Self::new(
            Arc::new(ProgressRepositoryImpl::new(database.clone())),
            Arc::new(ReviewRepositoryImpl::new(database.clone())),
            catalog.clone(),
        );
        state.database = Some(database);
        state.catalog_cache = Some(catalog);
        Ok(state)
    }
}
