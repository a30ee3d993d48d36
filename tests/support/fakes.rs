/// Hand-written catalog double
///
/// Integration tests can't reach the crate's mockall mocks, so this keeps
/// a small in-memory catalog with a failure switch and call counters.
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use watchlog_lib::modules::catalog::{
    CatalogEpisode, CatalogProvider, SeasonDetails, TvShowDetails,
};
use watchlog_lib::shared::{AppError, AppResult};

#[derive(Default)]
pub struct FakeCatalog {
    shows: Mutex<HashMap<i32, TvShowDetails>>,
    seasons: Mutex<HashMap<(i32, i32), SeasonDetails>>,
    failing: AtomicBool,
    show_calls: AtomicUsize,
    refresh_gate: Mutex<Option<RefreshGate>>,
}

/// Pauses `refresh_tv_show_details` after it has read the catalog
#[derive(Clone, Default)]
pub struct RefreshGate {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a show whose seasons have the given episode counts,
    /// numbered from season 1
    pub fn with_show(self, id: i32, name: &str, season_sizes: &[i32]) -> Self {
        let total: i32 = season_sizes.iter().sum();
        self.shows.lock().unwrap().insert(
            id,
            TvShowDetails {
                id,
                name: name.to_string(),
                total_episodes: Some(total),
                total_seasons: Some(season_sizes.len() as i32),
            },
        );

        let mut seasons = self.seasons.lock().unwrap();
        for (index, size) in season_sizes.iter().enumerate() {
            let season_number = index as i32 + 1;
            seasons.insert(
                (id, season_number),
                SeasonDetails {
                    show_id: id,
                    season_number,
                    episodes: (1..=*size)
                        .map(|n| CatalogEpisode {
                            episode_number: n,
                            name: format!("{} {}x{:02}", name, season_number, n),
                            runtime: Some(42),
                            air_date: None,
                            overview: None,
                            still_path: None,
                        })
                        .collect(),
                },
            );
        }
        drop(seasons);
        self
    }

    /// Change the catalog total without touching tracked snapshots
    pub fn set_total_episodes(&self, id: i32, total: Option<i32>) {
        if let Some(show) = self.shows.lock().unwrap().get_mut(&id) {
            show.total_episodes = total;
        }
    }

    /// Hold every later refresh until `release` is notified
    pub fn hold_refreshes(&self) -> RefreshGate {
        let gate = RefreshGate::default();
        *self.refresh_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn show_calls(&self) -> usize {
        self.show_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError(
                "catalog unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogProvider for FakeCatalog {
    async fn get_tv_show_details(&self, show_id: i32) -> AppResult<TvShowDetails> {
        self.show_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.shows
            .lock()
            .unwrap()
            .get(&show_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("TV show {}", show_id)))
    }

    async fn get_season_details(
        &self,
        show_id: i32,
        season_number: i32,
    ) -> AppResult<SeasonDetails> {
        self.check_available()?;
        self.seasons
            .lock()
            .unwrap()
            .get(&(show_id, season_number))
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("Season {} of TV show {}", season_number, show_id))
            })
    }

    async fn refresh_tv_show_details(&self, show_id: i32) -> AppResult<TvShowDetails> {
        let details = self.get_tv_show_details(show_id).await?;
        let gate = self.refresh_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }
        Ok(details)
    }
}
