/// Query for a season's catalog episodes merged with the user's watch flags
#[derive(Debug, Clone)]
pub struct SeasonProgressQuery {
    pub user_id: String,
    pub tv_show_id: i32,
    pub season_number: i32,
}

impl SeasonProgressQuery {
    pub fn new(user_id: String, tv_show_id: i32, season_number: i32) -> Self {
        Self {
            user_id,
            tv_show_id,
            season_number,
        }
    }
}
