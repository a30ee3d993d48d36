use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tokio::task;
use uuid::Uuid;

use crate::modules::catalog::TvShowDetails;
use crate::modules::reviews::domain::ReviewItemType;
use crate::modules::tv_progress::domain::{
    EpisodeKey, EpisodeRecord, ProgressRepository, ProgressTx, ProgressWork, ReconcileOutcome,
    ShowStatus, TrackedShow,
};
use crate::modules::tv_progress::infrastructure::models::{
    EpisodeRecordModel, NewEpisodeRecord, NewTrackedShow, TrackedShowModel,
};
use crate::schema::{episode_records, reviews, tracked_shows};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::Database;
use crate::shared::utils::TimedOperation;

pub struct ProgressRepositoryImpl {
    db: Arc<Database>,
}

impl ProgressRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

/// `ProgressTx` over a connection that is inside an open transaction.
///
/// `lock_show` takes a row lock on the tracked show, so concurrent progress
/// writes for the same (user, show) queue behind each other and every
/// recount sees the previous writer's committed records.
struct DieselProgressTx<'a> {
    conn: &'a mut PgConnection,
}

impl ProgressTx for DieselProgressTx<'_> {
    fn lock_show(&mut self, user_id: &str, tv_show_id: i32) -> AppResult<Option<TrackedShow>> {
        let row = tracked_shows::table
            .filter(tracked_shows::user_id.eq(user_id))
            .filter(tracked_shows::tv_show_id.eq(tv_show_id))
            .select(TrackedShowModel::as_select())
            .for_update()
            .first(&mut *self.conn)
            .optional()?;
        Ok(row.map(TrackedShow::from))
    }

    fn insert_show_if_absent(&mut self, show: &TrackedShow) -> AppResult<TrackedShow> {
        diesel::insert_into(tracked_shows::table)
            .values(NewTrackedShow::from(show))
            .on_conflict((tracked_shows::user_id, tracked_shows::tv_show_id))
            .do_nothing()
            .execute(&mut *self.conn)?;

        // A concurrent adopter may have won the insert; lock whichever row exists
        self.lock_show(&show.user_id, show.tv_show_id)?
            .ok_or_else(|| {
                AppError::DatabaseError(format!(
                    "Tracked show {} vanished during adoption",
                    show.tv_show_id
                ))
            })
    }

    fn find_episode(&mut self, user_id: &str, key: EpisodeKey) -> AppResult<Option<EpisodeRecord>> {
        let row = episode_records::table
            .filter(episode_records::user_id.eq(user_id))
            .filter(episode_records::tv_show_id.eq(key.tv_show_id))
            .filter(episode_records::season_number.eq(key.season_number))
            .filter(episode_records::episode_number.eq(key.episode_number))
            .select(EpisodeRecordModel::as_select())
            .first(&mut *self.conn)
            .optional()?;
        Ok(row.map(EpisodeRecord::from))
    }

    fn save_episode(&mut self, record: &EpisodeRecord) -> AppResult<()> {
        diesel::insert_into(episode_records::table)
            .values(NewEpisodeRecord::from(record))
            .on_conflict((
                episode_records::user_id,
                episode_records::tv_show_id,
                episode_records::season_number,
                episode_records::episode_number,
            ))
            .do_update()
            .set((
                episode_records::tracked_show_id.eq(excluded(episode_records::tracked_show_id)),
                episode_records::episode_name.eq(excluded(episode_records::episode_name)),
                episode_records::runtime.eq(excluded(episode_records::runtime)),
                episode_records::watched.eq(excluded(episode_records::watched)),
                episode_records::watched_at.eq(excluded(episode_records::watched_at)),
                episode_records::updated_at.eq(excluded(episode_records::updated_at)),
            ))
            .execute(&mut *self.conn)?;
        Ok(())
    }

    fn delete_review(
        &mut self,
        user_id: &str,
        item_type: ReviewItemType,
        item_id: &str,
    ) -> AppResult<usize> {
        let deleted = diesel::delete(
            reviews::table
                .filter(reviews::user_id.eq(user_id))
                .filter(reviews::item_type.eq(item_type))
                .filter(reviews::item_id.eq(item_id)),
        )
        .execute(&mut *self.conn)?;
        Ok(deleted)
    }

    fn count_watched(&mut self, tracked_show_id: Uuid) -> AppResult<i32> {
        let count: i64 = episode_records::table
            .filter(episode_records::tracked_show_id.eq(tracked_show_id))
            .filter(episode_records::watched.eq(true))
            .count()
            .get_result(&mut *self.conn)?;
        Ok(count as i32)
    }

    fn update_show_progress(
        &mut self,
        tracked_show_id: Uuid,
        watched_episodes: i32,
        status: ShowStatus,
    ) -> AppResult<()> {
        diesel::update(tracked_shows::table.find(tracked_show_id))
            .set((
                tracked_shows::watched_episodes.eq(watched_episodes),
                tracked_shows::status.eq(status),
                tracked_shows::updated_at.eq(Utc::now()),
            ))
            .execute(&mut *self.conn)?;
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for ProgressRepositoryImpl {
    async fn find_show(&self, user_id: &str, tv_show_id: i32) -> AppResult<Option<TrackedShow>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        let model = task::spawn_blocking(move || -> AppResult<Option<TrackedShowModel>> {
            let mut conn = db.get_connection()?;
            let row = tracked_shows::table
                .filter(tracked_shows::user_id.eq(&user_id))
                .filter(tracked_shows::tv_show_id.eq(tv_show_id))
                .select(TrackedShowModel::as_select())
                .first(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;

        Ok(model.map(TrackedShow::from))
    }

    async fn list_shows(
        &self,
        user_id: &str,
        status: Option<ShowStatus>,
    ) -> AppResult<Vec<TrackedShow>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        let models = task::spawn_blocking(move || -> AppResult<Vec<TrackedShowModel>> {
            let mut conn = db.get_connection()?;
            let mut query = tracked_shows::table
                .filter(tracked_shows::user_id.eq(&user_id))
                .select(TrackedShowModel::as_select())
                .into_boxed();
            if let Some(status) = status {
                query = query.filter(tracked_shows::status.eq(status));
            }
            let rows = query
                .order(tracked_shows::created_at.desc())
                .load(&mut conn)?;
            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(TrackedShow::from).collect())
    }

    async fn insert_show(&self, show: &TrackedShow) -> AppResult<TrackedShow> {
        let db = Arc::clone(&self.db);
        let show = show.clone();

        let model = task::spawn_blocking(move || -> AppResult<TrackedShowModel> {
            let mut conn = db.get_connection()?;
            let row = diesel::insert_into(tracked_shows::table)
                .values(NewTrackedShow::from(&show))
                .returning(TrackedShowModel::as_returning())
                .get_result(&mut conn)?;
            Ok(row)
        })
        .await??;

        Ok(model.into())
    }

    async fn update_show_status(&self, show_id: Uuid, status: ShowStatus) -> AppResult<TrackedShow> {
        let db = Arc::clone(&self.db);

        let model = task::spawn_blocking(move || -> AppResult<TrackedShowModel> {
            let mut conn = db.get_connection()?;
            let row = diesel::update(tracked_shows::table.find(show_id))
                .set((
                    tracked_shows::status.eq(status),
                    tracked_shows::updated_at.eq(Utc::now()),
                ))
                .returning(TrackedShowModel::as_returning())
                .get_result(&mut conn)?;
            Ok(row)
        })
        .await??;

        Ok(model.into())
    }

    async fn update_show_totals(
        &self,
        show_id: Uuid,
        details: &TvShowDetails,
    ) -> AppResult<TrackedShow> {
        let db = Arc::clone(&self.db);
        let details = details.clone();

        // status and watched_episodes belong to the reconciler and stay untouched
        let model = task::spawn_blocking(move || -> AppResult<TrackedShowModel> {
            let mut conn = db.get_connection()?;
            let row = diesel::update(tracked_shows::table.find(show_id))
                .set((
                    tracked_shows::name.eq(Some(details.name.as_str())),
                    tracked_shows::total_episodes.eq(details.total_episodes),
                    tracked_shows::total_seasons.eq(details.total_seasons),
                    tracked_shows::updated_at.eq(Utc::now()),
                ))
                .returning(TrackedShowModel::as_returning())
                .get_result(&mut conn)?;
            Ok(row)
        })
        .await??;

        Ok(model.into())
    }

    async fn delete_show(&self, user_id: &str, tv_show_id: i32) -> AppResult<bool> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        // episode_records cascade on the foreign key
        let deleted = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;
            let count = diesel::delete(
                tracked_shows::table
                    .filter(tracked_shows::user_id.eq(&user_id))
                    .filter(tracked_shows::tv_show_id.eq(tv_show_id)),
            )
            .execute(&mut conn)?;
            Ok(count)
        })
        .await??;

        Ok(deleted > 0)
    }

    async fn season_records(
        &self,
        user_id: &str,
        tv_show_id: i32,
        season_number: i32,
    ) -> AppResult<Vec<EpisodeRecord>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        let models = task::spawn_blocking(move || -> AppResult<Vec<EpisodeRecordModel>> {
            let mut conn = db.get_connection()?;
            let rows = episode_records::table
                .filter(episode_records::user_id.eq(&user_id))
                .filter(episode_records::tv_show_id.eq(tv_show_id))
                .filter(episode_records::season_number.eq(season_number))
                .order(episode_records::episode_number.asc())
                .select(EpisodeRecordModel::as_select())
                .load(&mut conn)?;
            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(EpisodeRecord::from).collect())
    }

    async fn run_in_transaction(&self, work: ProgressWork) -> AppResult<ReconcileOutcome> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<ReconcileOutcome> {
            let timer = TimedOperation::new("progress_transaction");
            let mut pooled = db.get_connection()?;
            let conn: &mut PgConnection = &mut pooled;
            let outcome = conn.transaction::<_, AppError, _>(|conn| {
                let mut tx = DieselProgressTx { conn };
                work(&mut tx)
            })?;
            timer.finish();
            Ok(outcome)
        })
        .await?
    }
}
