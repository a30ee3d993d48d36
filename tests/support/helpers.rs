/// Builders for in-memory application state
use std::sync::Arc;

use super::fakes::FakeCatalog;
use watchlog_lib::modules::reviews::ReviewService;
use watchlog_lib::modules::tv_progress::{
    application::{MarkAllEpisodesCommand, ToggleEpisodeCommand},
    domain::EpisodeUpdate,
    InMemoryWatchStore,
};
use watchlog_lib::state::AppState;

pub const USER: &str = "user-1";
pub const OTHER_USER: &str = "user-2";

/// Ten-episode single-season show
pub const SHOW: i32 = 1399;
/// Two seasons of three episodes
pub const SHORT_SHOW: i32 = 2316;

pub struct TestApp {
    pub store: Arc<InMemoryWatchStore>,
    pub catalog: Arc<FakeCatalog>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let catalog = FakeCatalog::new()
            .with_show(SHOW, "Winter Falls", &[10])
            .with_show(SHORT_SHOW, "The Office Hours", &[3, 3]);
        Self::with_catalog(catalog)
    }

    pub fn with_catalog(catalog: FakeCatalog) -> Self {
        let store = Arc::new(InMemoryWatchStore::new());
        let catalog = Arc::new(catalog);
        let state = AppState::new(store.clone(), store.clone(), catalog.clone());
        Self {
            store,
            catalog,
            state,
        }
    }

    pub fn reviews(&self) -> Arc<ReviewService> {
        self.state.reviews.clone()
    }
}

pub fn toggle(user: &str, show: i32, season: i32, episode: i32, watched: bool) -> ToggleEpisodeCommand {
    ToggleEpisodeCommand::new(user.to_string(), show, season, episode, watched)
}

pub fn batch(user: &str, show: i32, season: i32, episodes: &[i32], watched: bool) -> MarkAllEpisodesCommand {
    MarkAllEpisodesCommand::new(
        user.to_string(),
        show,
        season,
        Some(
            episodes
                .iter()
                .map(|&episode_number| EpisodeUpdate {
                    episode_number,
                    episode_name: None,
                    runtime: None,
                })
                .collect(),
        ),
        watched,
    )
}
