use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Review, ReviewItemType};
use crate::shared::errors::AppResult;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert, or replace rating/comment of the existing (user, item) review
    async fn upsert(&self, review: &Review) -> AppResult<Review>;

    async fn find_for_item(
        &self,
        user_id: &str,
        item_type: ReviewItemType,
        item_id: &str,
    ) -> AppResult<Option<Review>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>>;

    async fn list_by_user(
        &self,
        user_id: &str,
        item_type: Option<ReviewItemType>,
    ) -> AppResult<Vec<Review>>;

    /// Returns false when no review with that id belongs to the user
    async fn delete(&self, user_id: &str, id: Uuid) -> AppResult<bool>;
}
