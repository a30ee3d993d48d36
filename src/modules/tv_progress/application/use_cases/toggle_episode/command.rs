use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

/// Command for marking one episode watched or unwatched
#[derive(Debug, Clone)]
pub struct ToggleEpisodeCommand {
    pub user_id: String,
    pub tv_show_id: i32,
    pub season_number: i32,
    pub episode_number: i32,
    pub episode_name: Option<String>,
    pub runtime: Option<i32>,
    pub watched: bool,
}

impl ToggleEpisodeCommand {
    pub fn new(
        user_id: String,
        tv_show_id: i32,
        season_number: i32,
        episode_number: i32,
        watched: bool,
    ) -> Self {
        Self {
            user_id,
            tv_show_id,
            season_number,
            episode_number,
            episode_name: None,
            runtime: None,
            watched,
        }
    }

    pub fn with_metadata(mut self, episode_name: Option<String>, runtime: Option<i32>) -> Self {
        self.episode_name = episode_name;
        self.runtime = runtime;
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_show_id(self.tv_show_id)?;
        Validator::validate_season_number(self.season_number)?;
        Validator::validate_episode_number(self.episode_number)?;
        Validator::validate_runtime(self.runtime)
    }
}
