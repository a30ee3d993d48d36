use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Show-level metadata needed to track progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvShowDetails {
    pub id: i32,
    pub name: String,
    pub total_episodes: Option<i32>,
    pub total_seasons: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEpisode {
    pub episode_number: i32,
    pub name: String,
    pub runtime: Option<i32>,
    pub air_date: Option<NaiveDate>,
    pub overview: Option<String>,
    pub still_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonDetails {
    pub show_id: i32,
    pub season_number: i32,
    pub episodes: Vec<CatalogEpisode>,
}

impl SeasonDetails {
    /// Episodes numbered strictly below `episode_number`, in catalog order
    pub fn episodes_before(&self, episode_number: i32) -> impl Iterator<Item = &CatalogEpisode> {
        self.episodes
            .iter()
            .filter(move |episode| episode.episode_number < episode_number)
    }
}
