use async_trait::async_trait;
use std::sync::Arc;

use crate::log_info;
use crate::modules::catalog::CatalogProvider;
use crate::modules::tv_progress::application::adoption::adoption_seed;
use crate::modules::tv_progress::domain::{
    EpisodeStatusReconciler, EpisodeUpdate, ProgressRepository, ReconcilePlan,
};
use crate::shared::{application::use_case::UseCase, errors::AppResult, utils::TimedOperation};

use super::{command::ToggleEpisodeCommand, result::EpisodeToggleResult};

/// Use case handler for toggling one episode
pub struct ToggleEpisodeHandler {
    progress_repo: Arc<dyn ProgressRepository>,
    catalog: Arc<dyn CatalogProvider>,
}

impl ToggleEpisodeHandler {
    pub fn new(progress_repo: Arc<dyn ProgressRepository>, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            progress_repo,
            catalog,
        }
    }
}

#[async_trait]
impl UseCase<ToggleEpisodeCommand, EpisodeToggleResult> for ToggleEpisodeHandler {
    async fn execute(&self, command: ToggleEpisodeCommand) -> AppResult<EpisodeToggleResult> {
        command.validate()?;
        let timer = TimedOperation::new("toggle_episode");

        let adopt = adoption_seed(
            self.progress_repo.as_ref(),
            self.catalog.as_ref(),
            &command.user_id,
            command.tv_show_id,
            command.watched,
        )
        .await?;

        let plan = ReconcilePlan {
            user_id: command.user_id.clone(),
            tv_show_id: command.tv_show_id,
            season_number: command.season_number,
            episodes: vec![EpisodeUpdate {
                episode_number: command.episode_number,
                episode_name: command.episode_name,
                runtime: command.runtime,
            }],
            watched: command.watched,
            adopt,
        };

        let outcome = self
            .progress_repo
            .run_in_transaction(Box::new(move |tx| EpisodeStatusReconciler::reconcile(tx, plan)))
            .await?;

        log_info!(
            "User {} marked {}x{:02} of show {} as {} ({} watched, status {})",
            command.user_id,
            command.season_number,
            command.episode_number,
            command.tv_show_id,
            if command.watched { "watched" } else { "unwatched" },
            outcome.watched_episodes,
            outcome.status
        );
        timer.finish();

        Ok(outcome.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::provider::MockCatalogProvider;
    use crate::modules::catalog::TvShowDetails;
    use crate::modules::tv_progress::domain::ShowStatus;
    use crate::modules::tv_progress::infrastructure::InMemoryWatchStore;
    use crate::shared::errors::AppError;

    fn catalog_with_total(total: i32) -> MockCatalogProvider {
        let mut catalog = MockCatalogProvider::new();
        catalog.expect_get_tv_show_details().returning(move |id| {
            Ok(TvShowDetails {
                id,
                name: "Severance".to_string(),
                total_episodes: Some(total),
                total_seasons: Some(1),
            })
        });
        catalog
    }

    fn handler(store: Arc<InMemoryWatchStore>, catalog: MockCatalogProvider) -> ToggleEpisodeHandler {
        ToggleEpisodeHandler::new(store, Arc::new(catalog))
    }

    #[tokio::test]
    async fn first_watch_adopts_show() {
        let store = Arc::new(InMemoryWatchStore::new());
        let handler = handler(store.clone(), catalog_with_total(9));

        let result = handler
            .execute(ToggleEpisodeCommand::new("user-1".to_string(), 95396, 1, 1, true))
            .await
            .unwrap();

        assert!(result.show_adopted);
        assert_eq!(result.watched_episodes, 1);
        assert_eq!(result.status, ShowStatus::Watching);
        let show = store.find_show("user-1", 95396).await.unwrap().unwrap();
        assert_eq!(show.total_episodes, Some(9));
    }

    #[tokio::test]
    async fn unwatch_of_untracked_show_is_not_found() {
        let store = Arc::new(InMemoryWatchStore::new());
        let mut catalog = MockCatalogProvider::new();
        catalog.expect_get_tv_show_details().never();
        let handler = handler(store.clone(), catalog);

        let err = handler
            .execute(ToggleEpisodeCommand::new("user-1".to_string(), 95396, 1, 1, false))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.find_show("user-1", 95396).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn catalog_failure_writes_nothing() {
        let store = Arc::new(InMemoryWatchStore::new());
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_get_tv_show_details()
            .returning(|_| Err(AppError::ExternalServiceError("TMDB unavailable".to_string())));
        let handler = handler(store.clone(), catalog);

        let err = handler
            .execute(ToggleEpisodeCommand::new("user-1".to_string(), 95396, 1, 1, true))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ExternalServiceError(_)));
        assert!(store.find_show("user-1", 95396).await.unwrap().is_none());
        assert!(store
            .season_records("user-1", 95396, 1)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn invalid_episode_number_is_rejected() {
        let store = Arc::new(InMemoryWatchStore::new());
        let handler = handler(store, MockCatalogProvider::new());

        let err = handler
            .execute(ToggleEpisodeCommand::new("user-1".to_string(), 95396, 1, 0, true))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
