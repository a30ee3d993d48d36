use serde::Serialize;

use crate::modules::tv_progress::domain::{ReconcileOutcome, ShowStatus};

/// Show rollup after a single-episode toggle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeToggleResult {
    pub watched_episodes: i32,
    pub show_completed: bool,
    pub show_status_changed: bool,
    pub status: ShowStatus,
    pub show_adopted: bool,
}

impl From<ReconcileOutcome> for EpisodeToggleResult {
    fn from(outcome: ReconcileOutcome) -> Self {
        Self {
            watched_episodes: outcome.watched_episodes,
            show_completed: outcome.show_completed,
            show_status_changed: outcome.show_status_changed,
            status: outcome.status,
            show_adopted: outcome.show_adopted,
        }
    }
}
