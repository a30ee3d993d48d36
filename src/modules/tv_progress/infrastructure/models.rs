use crate::modules::tv_progress::domain::{EpisodeRecord, ShowStatus, TrackedShow};
use crate::schema::{episode_records, tracked_shows};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

// For reading from database
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = tracked_shows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TrackedShowModel {
    pub id: Uuid,
    pub user_id: String,
    pub tv_show_id: i32,
    pub name: Option<String>,
    pub status: ShowStatus,
    pub watched_episodes: i32,
    pub total_episodes: Option<i32>,
    pub total_seasons: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = tracked_shows)]
pub struct NewTrackedShow<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub tv_show_id: i32,
    pub name: Option<&'a str>,
    pub status: ShowStatus,
    pub watched_episodes: i32,
    pub total_episodes: Option<i32>,
    pub total_seasons: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(table_name = episode_records)]
#[diesel(belongs_to(TrackedShowModel, foreign_key = tracked_show_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EpisodeRecordModel {
    pub id: Uuid,
    pub tracked_show_id: Uuid,
    pub user_id: String,
    pub tv_show_id: i32,
    pub season_number: i32,
    pub episode_number: i32,
    pub episode_name: Option<String>,
    pub runtime: Option<i32>,
    pub watched: bool,
    pub watched_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// For inserting (and upserting) episode records
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = episode_records)]
pub struct NewEpisodeRecord<'a> {
    pub id: Uuid,
    pub tracked_show_id: Uuid,
    pub user_id: &'a str,
    pub tv_show_id: i32,
    pub season_number: i32,
    pub episode_number: i32,
    pub episode_name: Option<&'a str>,
    pub runtime: Option<i32>,
    pub watched: bool,
    pub watched_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a TrackedShow> for NewTrackedShow<'a> {
    fn from(show: &'a TrackedShow) -> Self {
        Self {
            id: show.id,
            user_id: &show.user_id,
            tv_show_id: show.tv_show_id,
            name: show.name.as_deref(),
            status: show.status,
            watched_episodes: show.watched_episodes,
            total_episodes: show.total_episodes,
            total_seasons: show.total_seasons,
            created_at: show.created_at,
            updated_at: show.updated_at,
        }
    }
}

impl From<TrackedShowModel> for TrackedShow {
    fn from(model: TrackedShowModel) -> Self {
        TrackedShow {
            id: model.id,
            user_id: model.user_id,
            tv_show_id: model.tv_show_id,
            name: model.name,
            status: model.status,
            watched_episodes: model.watched_episodes,
            total_episodes: model.total_episodes,
            total_seasons: model.total_seasons,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl<'a> From<&'a EpisodeRecord> for NewEpisodeRecord<'a> {
    fn from(record: &'a EpisodeRecord) -> Self {
        Self {
            id: record.id,
            tracked_show_id: record.tracked_show_id,
            user_id: &record.user_id,
            tv_show_id: record.tv_show_id,
            season_number: record.season_number,
            episode_number: record.episode_number,
            episode_name: record.episode_name.as_deref(),
            runtime: record.runtime,
            watched: record.watched,
            watched_at: record.watched_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<EpisodeRecordModel> for EpisodeRecord {
    fn from(model: EpisodeRecordModel) -> Self {
        EpisodeRecord {
            id: model.id,
            tracked_show_id: model.tracked_show_id,
            user_id: model.user_id,
            tv_show_id: model.tv_show_id,
            season_number: model.season_number,
            episode_number: model.episode_number,
            episode_name: model.episode_name,
            runtime: model.runtime,
            watched: model.watched,
            watched_at: model.watched_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
