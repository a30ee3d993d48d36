use serde::Serialize;

use crate::modules::catalog::CatalogEpisode;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingBackfillResult {
    pub tv_show_id: i32,
    pub season_number: i32,
    pub episode_number: i32,
    pub pending: Vec<CatalogEpisode>,
}
