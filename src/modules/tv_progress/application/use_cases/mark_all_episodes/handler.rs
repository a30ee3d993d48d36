use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::catalog::CatalogProvider;
use crate::modules::tv_progress::application::adoption::adoption_seed;
use crate::modules::tv_progress::domain::{
    EpisodeStatusReconciler, EpisodeUpdate, ProgressRepository, ReconcilePlan,
};
use crate::shared::{
    application::use_case::UseCase,
    errors::{AppError, AppResult},
};
use crate::{log_debug, log_info};

use super::{command::MarkAllEpisodesCommand, result::MarkAllEpisodesResult};

/// Writes a whole batch in one transaction; the show status rule runs once
/// for the batch, after every record is written.
pub struct MarkAllEpisodesHandler {
    progress_repo: Arc<dyn ProgressRepository>,
    catalog: Arc<dyn CatalogProvider>,
}

impl MarkAllEpisodesHandler {
    pub fn new(progress_repo: Arc<dyn ProgressRepository>, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            progress_repo,
            catalog,
        }
    }

    async fn resolve_episodes(&self, command: &MarkAllEpisodesCommand) -> AppResult<Vec<EpisodeUpdate>> {
        if let Some(episodes) = &command.episodes {
            return Ok(episodes.clone());
        }

        let season = self
            .catalog
            .get_season_details(command.tv_show_id, command.season_number)
            .await?;
        log_debug!(
            "Expanded season {} of show {} to {} catalog episodes",
            command.season_number,
            command.tv_show_id,
            season.episodes.len()
        );

        Ok(season
            .episodes
            .into_iter()
            .map(|episode| EpisodeUpdate {
                episode_number: episode.episode_number,
                episode_name: Some(episode.name),
                runtime: episode.runtime,
            })
            .collect())
    }
}

#[async_trait]
impl UseCase<MarkAllEpisodesCommand, MarkAllEpisodesResult> for MarkAllEpisodesHandler {
    async fn execute(&self, command: MarkAllEpisodesCommand) -> AppResult<MarkAllEpisodesResult> {
        command.validate()?;

        let episodes = self.resolve_episodes(&command).await?;
        if episodes.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Season {} has no episodes to mark",
                command.season_number
            )));
        }

        let adopt = adoption_seed(
            self.progress_repo.as_ref(),
            self.catalog.as_ref(),
            &command.user_id,
            command.tv_show_id,
            command.watched,
        )
        .await?;

        let episodes_updated = episodes.len();
        let plan = ReconcilePlan {
            user_id: command.user_id.clone(),
            tv_show_id: command.tv_show_id,
            season_number: command.season_number,
            episodes,
            watched: command.watched,
            adopt,
        };

        let outcome = self
            .progress_repo
            .run_in_transaction(Box::new(move |tx| EpisodeStatusReconciler::reconcile(tx, plan)))
            .await?;

        log_info!(
            "User {} marked {} episodes of show {} season {} as {} ({} changed)",
            command.user_id,
            episodes_updated,
            command.tv_show_id,
            command.season_number,
            if command.watched { "watched" } else { "unwatched" },
            outcome.episodes_changed
        );

        Ok(MarkAllEpisodesResult::new(episodes_updated, outcome))
    }
}
