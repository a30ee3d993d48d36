use crate::modules::reviews::domain::{Review, ReviewItemType};
use crate::schema::reviews;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

// For reading from database
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewModel {
    pub id: Uuid,
    pub user_id: String,
    pub item_id: String,
    pub item_type: ReviewItemType,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// For inserting (and upserting) reviews
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = reviews)]
pub struct NewReview<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub item_id: &'a str,
    pub item_type: ReviewItemType,
    pub rating: i16,
    pub comment: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Review> for NewReview<'a> {
    fn from(review: &'a Review) -> Self {
        Self {
            id: review.id,
            user_id: &review.user_id,
            item_id: &review.item_id,
            item_type: review.item_type,
            rating: review.rating,
            comment: review.comment.as_deref(),
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

impl From<ReviewModel> for Review {
    fn from(model: ReviewModel) -> Self {
        Review {
            id: model.id,
            user_id: model.user_id,
            item_id: model.item_id,
            item_type: model.item_type,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
