use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of the reviewed item, stored as the `review_item_type` enum
#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ReviewItemType"]
#[serde(rename_all = "snake_case")]
pub enum ReviewItemType {
    Movie,
    TvShow,
    Episode,
    Book,
    Game,
}

impl std::fmt::Display for ReviewItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewItemType::Movie => write!(f, "movie"),
            ReviewItemType::TvShow => write!(f, "tv_show"),
            ReviewItemType::Episode => write!(f, "episode"),
            ReviewItemType::Book => write!(f, "book"),
            ReviewItemType::Game => write!(f, "game"),
        }
    }
}

impl std::str::FromStr for ReviewItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(ReviewItemType::Movie),
            "tv_show" | "tvshow" => Ok(ReviewItemType::TvShow),
            "episode" => Ok(ReviewItemType::Episode),
            "book" => Ok(ReviewItemType::Book),
            "game" => Ok(ReviewItemType::Game),
            _ => Err(format!("Invalid review item type: {}", s)),
        }
    }
}

/// One user's rating of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub user_id: String,
    pub item_id: String,
    pub item_type: ReviewItemType,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        user_id: String,
        item_id: String,
        item_type: ReviewItemType,
        rating: i16,
        comment: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            item_id,
            item_type,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_for(&self, user_id: &str, item_id: &str, item_type: ReviewItemType) -> bool {
        self.user_id == user_id && self.item_id == item_id && self.item_type == item_type
    }

    pub fn revise(&mut self, rating: i16, comment: Option<String>) {
        self.rating = rating;
        self.comment = comment;
        self.updated_at = Utc::now();
    }
}
