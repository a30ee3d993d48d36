use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::modules::catalog::CatalogEpisode;

/// A catalog episode plus this user's watched state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeProgress {
    #[serde(flatten)]
    pub episode: CatalogEpisode,
    pub watched: bool,
    pub watched_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonProgressResult {
    pub tv_show_id: i32,
    pub season_number: i32,
    pub episodes: Vec<EpisodeProgress>,
}

impl SeasonProgressResult {
    pub fn watched_count(&self) -> usize {
        self.episodes.iter().filter(|e| e.watched).count()
    }
}
