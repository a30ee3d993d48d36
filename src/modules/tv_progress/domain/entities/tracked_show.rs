use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::catalog::TvShowDetails;
use crate::modules::tv_progress::domain::value_objects::ShowStatus;

/// Per-user rollup of one show: status plus cached episode counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedShow {
    pub id: Uuid,
    pub user_id: String,
    pub tv_show_id: i32,
    pub name: Option<String>,
    pub status: ShowStatus,
    /// Always a recount of watched episode records, never incremented
    pub watched_episodes: i32,
    /// Snapshot from the catalog when the show was tracked (or last refreshed)
    pub total_episodes: Option<i32>,
    pub total_seasons: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrackedShow {
    pub fn new(user_id: String, details: &TvShowDetails, status: ShowStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            tv_show_id: details.id,
            name: Some(details.name.clone()),
            status,
            watched_episodes: 0,
            total_episodes: details.total_episodes,
            total_seasons: details.total_seasons,
            created_at: now,
            updated_at: now,
        }
    }

    /// Implicit tracking triggered by the first watched episode
    pub fn adopted(user_id: String, details: &TvShowDetails) -> Self {
        Self::new(user_id, details, ShowStatus::Watching)
    }

    pub fn set_status(&mut self, status: ShowStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.updated_at = Utc::now();
        true
    }

    pub fn record_progress(&mut self, watched_episodes: i32, status: ShowStatus) {
        self.watched_episodes = watched_episodes;
        self.status = status;
        self.updated_at = Utc::now();
    }
}
