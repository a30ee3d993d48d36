use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::modules::catalog::CatalogProvider;
use crate::modules::tv_progress::domain::ProgressRepository;
use crate::shared::{application::use_case::Query, errors::AppResult, utils::Validator};

use super::{
    query::SeasonProgressQuery,
    result::{EpisodeProgress, SeasonProgressResult},
};

pub struct SeasonProgressHandler {
    progress_repo: Arc<dyn ProgressRepository>,
    catalog: Arc<dyn CatalogProvider>,
}

impl SeasonProgressHandler {
    pub fn new(progress_repo: Arc<dyn ProgressRepository>, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            progress_repo,
            catalog,
        }
    }
}

#[async_trait]
impl Query<SeasonProgressQuery, SeasonProgressResult> for SeasonProgressHandler {
    async fn execute(&self, query: SeasonProgressQuery) -> AppResult<SeasonProgressResult> {
        Validator::validate_show_id(query.tv_show_id)?;
        Validator::validate_season_number(query.season_number)?;

        let season = self
            .catalog
            .get_season_details(query.tv_show_id, query.season_number)
            .await?;

        let records: HashMap<i32, _> = self
            .progress_repo
            .season_records(&query.user_id, query.tv_show_id, query.season_number)
            .await?
            .into_iter()
            .map(|record| (record.episode_number, record))
            .collect();

        let episodes = season
            .episodes
            .into_iter()
            .map(|episode| {
                let record = records.get(&episode.episode_number);
                EpisodeProgress {
                    watched: record.is_some_and(|r| r.watched),
                    watched_at: record.and_then(|r| r.watched_at),
                    episode,
                }
            })
            .collect();

        Ok(SeasonProgressResult {
            tv_show_id: query.tv_show_id,
            season_number: query.season_number,
            episodes,
        })
    }
}
