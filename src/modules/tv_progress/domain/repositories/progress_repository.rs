/// Persistence ports for watch progress
///
/// `ProgressRepository` is the async, pool-backed entry point used by the
/// application layer. Multi-step mutations run through `run_in_transaction`,
/// which hands a synchronous `ProgressTx` to the work closure; everything the
/// closure writes commits together or not at all.
use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::catalog::TvShowDetails;
use crate::modules::reviews::domain::ReviewItemType;
use crate::modules::tv_progress::domain::{
    entities::{EpisodeRecord, TrackedShow},
    services::reconciler::ReconcileOutcome,
    value_objects::{EpisodeKey, ShowStatus},
};
use crate::shared::errors::AppResult;

/// Unit of work executed inside one database transaction
pub type ProgressWork =
    Box<dyn FnOnce(&mut dyn ProgressTx) -> AppResult<ReconcileOutcome> + Send + 'static>;

/// Operations available inside a progress transaction
pub trait ProgressTx {
    /// Load the show and lock it against concurrent progress writes
    fn lock_show(&mut self, user_id: &str, tv_show_id: i32) -> AppResult<Option<TrackedShow>>;

    /// Insert `show` unless (user, show) is already tracked; returns the stored row
    fn insert_show_if_absent(&mut self, show: &TrackedShow) -> AppResult<TrackedShow>;

    fn find_episode(&mut self, user_id: &str, key: EpisodeKey) -> AppResult<Option<EpisodeRecord>>;

    /// Insert or overwrite the record identified by (user, show, season, episode)
    fn save_episode(&mut self, record: &EpisodeRecord) -> AppResult<()>;

    /// Delete the user's review of an item; returns rows removed (0 or 1)
    fn delete_review(
        &mut self,
        user_id: &str,
        item_type: ReviewItemType,
        item_id: &str,
    ) -> AppResult<usize>;

    fn count_watched(&mut self, tracked_show_id: Uuid) -> AppResult<i32>;

    fn update_show_progress(
        &mut self,
        tracked_show_id: Uuid,
        watched_episodes: i32,
        status: ShowStatus,
    ) -> AppResult<()>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn find_show(&self, user_id: &str, tv_show_id: i32) -> AppResult<Option<TrackedShow>>;

    async fn list_shows(
        &self,
        user_id: &str,
        status: Option<ShowStatus>,
    ) -> AppResult<Vec<TrackedShow>>;

    /// Fails with `Conflict` when the user already tracks the show
    async fn insert_show(&self, show: &TrackedShow) -> AppResult<TrackedShow>;

    /// Manual status change; progress counters are left as stored
    async fn update_show_status(&self, show_id: Uuid, status: ShowStatus) -> AppResult<TrackedShow>;

    /// Overwrite name and catalog totals only
    async fn update_show_totals(
        &self,
        show_id: Uuid,
        details: &TvShowDetails,
    ) -> AppResult<TrackedShow>;

    /// Remove the show and its episode records; false when it was not tracked
    async fn delete_show(&self, user_id: &str, tv_show_id: i32) -> AppResult<bool>;

    async fn season_records(
        &self,
        user_id: &str,
        tv_show_id: i32,
        season_number: i32,
    ) -> AppResult<Vec<EpisodeRecord>>;

    async fn run_in_transaction(&self, work: ProgressWork) -> AppResult<ReconcileOutcome>;
}
