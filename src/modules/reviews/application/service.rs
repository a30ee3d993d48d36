use std::sync::Arc;
use uuid::Uuid;

use crate::modules::reviews::domain::{Review, ReviewItemType, ReviewRepository};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_debug, log_info};

pub struct ReviewService {
    review_repo: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(review_repo: Arc<dyn ReviewRepository>) -> Self {
        Self { review_repo }
    }

    /// Create the user's review for an item, or revise the existing one
    pub async fn upsert_review(
        &self,
        user_id: &str,
        item_type: ReviewItemType,
        item_id: &str,
        rating: i16,
        comment: Option<String>,
    ) -> AppResult<Review> {
        Validator::validate_item_id(item_id)?;
        Validator::validate_rating(rating)?;
        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        Validator::validate_comment(comment.as_deref())?;

        let review = match self
            .review_repo
            .find_for_item(user_id, item_type, item_id)
            .await?
        {
            Some(mut existing) => {
                log_debug!("Revising review {} for {} {}", existing.id, item_type, item_id);
                existing.revise(rating, comment);
                existing
            }
            None => Review::new(
                user_id.to_string(),
                item_id.to_string(),
                item_type,
                rating,
                comment,
            ),
        };

        let saved = self.review_repo.upsert(&review).await?;
        log_info!(
            "Saved review {} ({} {}) for user {}",
            saved.id,
            item_type,
            item_id,
            user_id
        );
        Ok(saved)
    }

    pub async fn get_review(
        &self,
        user_id: &str,
        item_type: ReviewItemType,
        item_id: &str,
    ) -> AppResult<Option<Review>> {
        self.review_repo
            .find_for_item(user_id, item_type, item_id)
            .await
    }

    pub async fn list_reviews(
        &self,
        user_id: &str,
        item_type: Option<ReviewItemType>,
    ) -> AppResult<Vec<Review>> {
        self.review_repo.list_by_user(user_id, item_type).await
    }

    /// Deleting a review never touches watch progress
    pub async fn delete_review(&self, user_id: &str, id: Uuid) -> AppResult<()> {
        if !self.review_repo.delete(user_id, id).await? {
            return Err(AppError::NotFound(format!("Review with ID {} not found", id)));
        }

        log_info!("Deleted review {} for user {}", id, user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::tv_progress::InMemoryWatchStore;

    fn service() -> ReviewService {
        ReviewService::new(Arc::new(InMemoryWatchStore::new()))
    }

    #[tokio::test]
    async fn upsert_revises_existing_review() {
        let service = service();
        let first = service
            .upsert_review("user-1", ReviewItemType::TvShow, "1396", 4, None)
            .await
            .unwrap();
        let revised = service
            .upsert_review(
                "user-1",
                ReviewItemType::TvShow,
                "1396",
                5,
                Some("  Masterpiece  ".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(first.id, revised.id);
        assert_eq!(revised.rating, 5);
        assert_eq!(revised.comment.as_deref(), Some("Masterpiece"));
    }

    #[tokio::test]
    async fn rejects_out_of_range_rating() {
        let err = service()
            .upsert_review("user-1", ReviewItemType::Movie, "550", 6, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn delete_is_scoped_to_owner() {
        let service = service();
        let review = service
            .upsert_review("user-1", ReviewItemType::Episode, "1396-S1E1", 3, None)
            .await
            .unwrap();

        let err = service.delete_review("user-2", review.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        service.delete_review("user-1", review.id).await.unwrap();
        assert!(service
            .get_review("user-1", ReviewItemType::Episode, "1396-S1E1")
            .await
            .unwrap()
            .is_none());
    }
}
