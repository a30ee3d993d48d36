use crate::log_debug;
use crate::modules::catalog::CatalogProvider;
use crate::modules::tv_progress::domain::{ProgressRepository, TrackedShow};
use crate::shared::errors::{AppError, AppResult};

/// Resolve the show row a progress write needs before opening a transaction.
///
/// Returns `None` when the user already tracks the show. When they don't, a
/// watched write fetches catalog totals and returns a `Watching` seed for the
/// reconciler to insert; an unwatched write is `NotFound` and nothing is
/// written. Catalog failures propagate unchanged.
pub async fn adoption_seed(
    progress_repo: &dyn ProgressRepository,
    catalog: &dyn CatalogProvider,
    user_id: &str,
    tv_show_id: i32,
    watched: bool,
) -> AppResult<Option<TrackedShow>> {
    if progress_repo.find_show(user_id, tv_show_id).await?.is_some() {
        return Ok(None);
    }

    if !watched {
        return Err(AppError::NotFound(format!(
            "TV show {} is not in your list",
            tv_show_id
        )));
    }

    let details = catalog.get_tv_show_details(tv_show_id).await?;
    log_debug!(
        "Adopting show {} ({:?} episodes) for user {}",
        tv_show_id,
        details.total_episodes,
        user_id
    );
    Ok(Some(TrackedShow::adopted(user_id.to_string(), &details)))
}
