use crate::modules::tv_progress::domain::EpisodeUpdate;
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

/// Command for marking a batch of episodes of one season at once
#[derive(Debug, Clone)]
pub struct MarkAllEpisodesCommand {
    pub user_id: String,
    pub tv_show_id: i32,
    pub season_number: i32,
    /// `None` means every episode the catalog lists for the season
    pub episodes: Option<Vec<EpisodeUpdate>>,
    pub watched: bool,
}

impl MarkAllEpisodesCommand {
    pub fn new(
        user_id: String,
        tv_show_id: i32,
        season_number: i32,
        episodes: Option<Vec<EpisodeUpdate>>,
        watched: bool,
    ) -> Self {
        Self {
            user_id,
            tv_show_id,
            season_number,
            episodes,
            watched,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_show_id(self.tv_show_id)?;
        Validator::validate_season_number(self.season_number)?;
        for episode in self.episodes.iter().flatten() {
            Validator::validate_episode_number(episode.episode_number)?;
            Validator::validate_runtime(episode.runtime)?;
        }
        Ok(())
    }
}
