use serde::Serialize;

use crate::modules::tv_progress::domain::{ReconcileOutcome, ShowStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllEpisodesResult {
    /// Episodes written by the batch
    pub episodes_updated: usize,
    /// Of those, how many actually flipped
    pub episodes_changed: usize,
    pub watched_episodes: i32,
    pub show_completed: bool,
    pub show_status_changed: bool,
    pub status: ShowStatus,
}

impl MarkAllEpisodesResult {
    pub fn new(episodes_updated: usize, outcome: ReconcileOutcome) -> Self {
        Self {
            episodes_updated,
            episodes_changed: outcome.episodes_changed,
            watched_episodes: outcome.watched_episodes,
            show_completed: outcome.show_completed,
            show_status_changed: outcome.show_status_changed,
            status: outcome.status,
        }
    }
}
