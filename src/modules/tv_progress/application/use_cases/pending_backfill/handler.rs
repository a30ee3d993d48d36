use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::modules::catalog::CatalogProvider;
use crate::modules::tv_progress::domain::ProgressRepository;
use crate::shared::{application::use_case::Query, errors::AppResult, utils::Validator};

use super::{query::PendingBackfillQuery, result::PendingBackfillResult};

/// Read-only: lists the gap, never writes it. The caller decides whether to
/// follow up with a batch mark.
pub struct PendingBackfillHandler {
    progress_repo: Arc<dyn ProgressRepository>,
    catalog: Arc<dyn CatalogProvider>,
}

impl PendingBackfillHandler {
    pub fn new(progress_repo: Arc<dyn ProgressRepository>, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            progress_repo,
            catalog,
        }
    }
}

#[async_trait]
impl Query<PendingBackfillQuery, PendingBackfillResult> for PendingBackfillHandler {
    async fn execute(&self, query: PendingBackfillQuery) -> AppResult<PendingBackfillResult> {
        Validator::validate_show_id(query.tv_show_id)?;
        Validator::validate_season_number(query.season_number)?;
        Validator::validate_episode_number(query.episode_number)?;

        let season = self
            .catalog
            .get_season_details(query.tv_show_id, query.season_number)
            .await?;

        let watched: HashSet<i32> = self
            .progress_repo
            .season_records(&query.user_id, query.tv_show_id, query.season_number)
            .await?
            .into_iter()
            .filter(|record| record.watched)
            .map(|record| record.episode_number)
            .collect();

        let pending = season
            .episodes_before(query.episode_number)
            .filter(|episode| !watched.contains(&episode.episode_number))
            .cloned()
            .collect();

        Ok(PendingBackfillResult {
            tv_show_id: query.tv_show_id,
            season_number: query.season_number,
            episode_number: query.episode_number,
            pending,
        })
    }
}
