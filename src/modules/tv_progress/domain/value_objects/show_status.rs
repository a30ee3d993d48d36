//! Show-level watch status and the episode-driven transition rule

use serde::{Deserialize, Serialize};

/// User's watch status for a tracked show
#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ShowStatus"]
#[serde(rename_all = "snake_case")]
pub enum ShowStatus {
    WantToWatch,
    Watching,
    Completed,
    StoppedWatching,
}

/// Result of applying [`ShowStatus::after_episode_progress`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    pub status: ShowStatus,
    /// This change moved the show into `Completed`
    pub show_completed: bool,
    /// This change reverted a `Completed` show to `Watching`
    pub show_status_changed: bool,
}

impl StatusTransition {
    fn unchanged(status: ShowStatus) -> Self {
        Self {
            status,
            show_completed: false,
            show_status_changed: false,
        }
    }
}

impl ShowStatus {
    /// The only episode-driven status rule.
    ///
    /// `watched` is the value the caller wrote, `watched_count` the freshly
    /// recounted number of watched episodes and `total_episodes` the total
    /// snapshotted when the show was tracked.
    pub fn after_episode_progress(
        self,
        watched: bool,
        watched_count: i32,
        total_episodes: Option<i32>,
    ) -> StatusTransition {
        let all_watched = total_episodes.is_some_and(|total| watched_count == total);

        match (self, watched) {
            (ShowStatus::Completed, true) => StatusTransition::unchanged(self),
            (ShowStatus::Completed, false) => StatusTransition {
                status: ShowStatus::Watching,
                show_completed: false,
                show_status_changed: true,
            },
            (
                ShowStatus::WantToWatch | ShowStatus::Watching | ShowStatus::StoppedWatching,
                true,
            ) if all_watched => StatusTransition {
                status: ShowStatus::Completed,
                show_completed: true,
                show_status_changed: false,
            },
            (ShowStatus::WantToWatch | ShowStatus::Watching | ShowStatus::StoppedWatching, _) => {
                StatusTransition::unchanged(self)
            }
        }
    }
}

impl std::fmt::Display for ShowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShowStatus::WantToWatch => write!(f, "want_to_watch"),
            ShowStatus::Watching => write!(f, "watching"),
            ShowStatus::Completed => write!(f, "completed"),
            ShowStatus::StoppedWatching => write!(f, "stopped_watching"),
        }
    }
}

impl std::str::FromStr for ShowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "want_to_watch" => Ok(ShowStatus::WantToWatch),
            "watching" => Ok(ShowStatus::Watching),
            "completed" => Ok(ShowStatus::Completed),
            "stopped_watching" => Ok(ShowStatus::StoppedWatching),
            _ => Err(format!("Invalid show status: {}", s)),
        }
    }
}
