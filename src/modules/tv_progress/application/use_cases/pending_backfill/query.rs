/// Which earlier episodes of the season are still unwatched when the user
/// is about to mark `episode_number`
#[derive(Debug, Clone)]
pub struct PendingBackfillQuery {
    pub user_id: String,
    pub tv_show_id: i32,
    pub season_number: i32,
    pub episode_number: i32,
}

impl PendingBackfillQuery {
    pub fn new(user_id: String, tv_show_id: i32, season_number: i32, episode_number: i32) -> Self {
        Self {
            user_id,
            tv_show_id,
            season_number,
            episode_number,
        }
    }
}
