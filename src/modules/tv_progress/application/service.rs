use std::sync::Arc;

use crate::modules::catalog::CatalogProvider;
use crate::modules::tv_progress::domain::{ProgressRepository, ShowStatus, TrackedShow};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, Validator};
use crate::{log_debug, log_info};

/// Explicit list management for tracked shows.
///
/// Manual status changes go straight to the aggregate; only episode writes
/// go through the reconciler and its transition rule.
pub struct TrackedShowService {
    progress_repo: Arc<dyn ProgressRepository>,
    catalog: Arc<dyn CatalogProvider>,
}

impl TrackedShowService {
    pub fn new(progress_repo: Arc<dyn ProgressRepository>, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            progress_repo,
            catalog,
        }
    }

    pub async fn add_show(
        &self,
        user_id: &str,
        tv_show_id: i32,
        status: Option<ShowStatus>,
    ) -> AppResult<TrackedShow> {
        Validator::validate_show_id(tv_show_id)?;

        if self.progress_repo.find_show(user_id, tv_show_id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "TV show {} is already in your list",
                tv_show_id
            )));
        }

        let details = self.catalog.get_tv_show_details(tv_show_id).await?;
        let show = TrackedShow::new(
            user_id.to_string(),
            &details,
            status.unwrap_or(ShowStatus::WantToWatch),
        );

        let saved = self.progress_repo.insert_show(&show).await?;
        log_info!(
            "User {} added show {} ({}) as {}",
            user_id,
            tv_show_id,
            details.name,
            saved.status
        );
        Ok(saved)
    }

    pub async fn get_show(&self, user_id: &str, tv_show_id: i32) -> AppResult<TrackedShow> {
        self.progress_repo
            .find_show(user_id, tv_show_id)
            .await?
            .ok_or_else(|| not_tracked(tv_show_id))
    }

    pub async fn list_shows(
        &self,
        user_id: &str,
        status: Option<ShowStatus>,
    ) -> AppResult<Vec<TrackedShow>> {
        let shows = self.progress_repo.list_shows(user_id, status).await?;
        log_debug!("User {} has {} tracked shows", user_id, shows.len());
        Ok(shows)
    }

    pub async fn set_status(
        &self,
        user_id: &str,
        tv_show_id: i32,
        status: ShowStatus,
    ) -> AppResult<TrackedShow> {
        let mut show = self.get_show(user_id, tv_show_id).await?;
        let previous = show.status;

        if !show.set_status(status) {
            return Ok(show);
        }

        let saved = self.progress_repo.update_show_status(show.id, status).await?;
        LogContext::status_transition(user_id, tv_show_id, &previous.to_string(), &status.to_string());
        Ok(saved)
    }

    pub async fn remove_show(&self, user_id: &str, tv_show_id: i32) -> AppResult<()> {
        if !self.progress_repo.delete_show(user_id, tv_show_id).await? {
            return Err(not_tracked(tv_show_id));
        }
        log_info!("User {} removed show {}", user_id, tv_show_id);
        Ok(())
    }

    /// Re-snapshot catalog totals. Status is left alone; the next episode
    /// write evaluates completion against the new total.
    pub async fn refresh_totals(&self, user_id: &str, tv_show_id: i32) -> AppResult<TrackedShow> {
        let show = self.get_show(user_id, tv_show_id).await?;
        let details = self.catalog.refresh_tv_show_details(tv_show_id).await?;

        if show.total_episodes != details.total_episodes {
            log_info!(
                "Show {} total episodes changed {:?} -> {:?}",
                tv_show_id,
                show.total_episodes,
                details.total_episodes
            );
        }

        self.progress_repo.update_show_totals(show.id, &details).await
    }
}

fn not_tracked(tv_show_id: i32) -> AppError {
    AppError::NotFound(format!("TV show {} is not in your list", tv_show_id))
}
