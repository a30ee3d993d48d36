use serde::{Deserialize, Serialize};

/// Identifies one episode of one show, independent of any user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeKey {
    pub tv_show_id: i32,
    pub season_number: i32,
    pub episode_number: i32,
}

impl EpisodeKey {
    pub fn new(tv_show_id: i32, season_number: i32, episode_number: i32) -> Self {
        Self {
            tv_show_id,
            season_number,
            episode_number,
        }
    }

    /// Item id under which episode reviews are stored: `{show}-S{season}E{episode}`
    pub fn review_item_id(&self) -> String {
        format!(
            "{}-S{}E{}",
            self.tv_show_id, self.season_number, self.episode_number
        )
    }
}
