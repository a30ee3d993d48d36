use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::tv_progress::domain::value_objects::EpisodeKey;

/// One episode the caller wants written, with optional cached metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeUpdate {
    pub episode_number: i32,
    pub episode_name: Option<String>,
    pub runtime: Option<i32>,
}

/// Per-user watched fact for one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRecord {
    pub id: Uuid,
    pub tracked_show_id: Uuid,
    pub user_id: String,
    pub tv_show_id: i32,
    pub season_number: i32,
    pub episode_number: i32,
    pub episode_name: Option<String>,
    pub runtime: Option<i32>,
    pub watched: bool,
    /// Present exactly when `watched` is true
    pub watched_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EpisodeRecord {
    pub fn new(tracked_show_id: Uuid, user_id: String, key: EpisodeKey) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tracked_show_id,
            user_id,
            tv_show_id: key.tv_show_id,
            season_number: key.season_number,
            episode_number: key.episode_number,
            episode_name: None,
            runtime: None,
            watched: false,
            watched_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> EpisodeKey {
        EpisodeKey::new(self.tv_show_id, self.season_number, self.episode_number)
    }

    /// Set the watched flag. `watched_at` is stamped only on a false -> true
    /// flip, so repeating a watched toggle keeps the original timestamp.
    /// Returns whether the flag changed.
    pub fn set_watched(&mut self, watched: bool, now: DateTime<Utc>) -> bool {
        let changed = self.watched != watched;
        if changed {
            self.watched = watched;
            self.watched_at = watched.then_some(now);
            self.updated_at = now;
        }
        changed
    }

    /// Refresh cached display metadata when the caller supplied it
    pub fn refresh_metadata(&mut self, episode_name: Option<&str>, runtime: Option<i32>) {
        if let Some(name) = episode_name {
            self.episode_name = Some(name.to_string());
        }
        if runtime.is_some() {
            self.runtime = runtime;
        }
    }
}
