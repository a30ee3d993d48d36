use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tokio::task;
use uuid::Uuid;

use super::models::{NewReview, ReviewModel};
use crate::modules::reviews::domain::{Review, ReviewItemType, ReviewRepository};
use crate::schema::reviews;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::Database;

pub struct ReviewRepositoryImpl {
    db: Arc<Database>,
}

impl ReviewRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryImpl {
    async fn upsert(&self, review: &Review) -> AppResult<Review> {
        let db = Arc::clone(&self.db);
        let review = review.clone();

        let saved = task::spawn_blocking(move || -> AppResult<ReviewModel> {
            let mut conn = db.get_connection()?;
            let row = diesel::insert_into(reviews::table)
                .values(NewReview::from(&review))
                .on_conflict((reviews::user_id, reviews::item_id, reviews::item_type))
                .do_update()
                .set((
                    reviews::rating.eq(excluded(reviews::rating)),
                    reviews::comment.eq(excluded(reviews::comment)),
                    reviews::updated_at.eq(excluded(reviews::updated_at)),
                ))
                .returning(ReviewModel::as_returning())
                .get_result(&mut conn)?;
            Ok(row)
        })
        .await??;

        Ok(saved.into())
    }

    async fn find_for_item(
        &self,
        user_id: &str,
        item_type: ReviewItemType,
        item_id: &str,
    ) -> AppResult<Option<Review>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let item_id = item_id.to_string();

        let model = task::spawn_blocking(move || -> AppResult<Option<ReviewModel>> {
            let mut conn = db.get_connection()?;
            let row = reviews::table
                .filter(reviews::user_id.eq(&user_id))
                .filter(reviews::item_type.eq(item_type))
                .filter(reviews::item_id.eq(&item_id))
                .select(ReviewModel::as_select())
                .first(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;

        Ok(model.map(Review::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        let db = Arc::clone(&self.db);

        let model = task::spawn_blocking(move || -> AppResult<Option<ReviewModel>> {
            let mut conn = db.get_connection()?;
            let row = reviews::table
                .find(id)
                .select(ReviewModel::as_select())
                .first(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;

        Ok(model.map(Review::from))
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        item_type: Option<ReviewItemType>,
    ) -> AppResult<Vec<Review>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        let models = task::spawn_blocking(move || -> AppResult<Vec<ReviewModel>> {
            let mut conn = db.get_connection()?;
            let mut query = reviews::table
                .filter(reviews::user_id.eq(&user_id))
                .select(ReviewModel::as_select())
                .into_boxed();
            if let Some(item_type) = item_type {
                query = query.filter(reviews::item_type.eq(item_type));
            }
            let rows = query
                .order(reviews::updated_at.desc())
                .load(&mut conn)?;
            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(Review::from).collect())
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> AppResult<bool> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        let deleted = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;
            let count = diesel::delete(
                reviews::table
                    .filter(reviews::id.eq(id))
                    .filter(reviews::user_id.eq(&user_id)),
            )
            .execute(&mut conn)?;
            Ok(count)
        })
        .await??;

        Ok(deleted > 0)
    }
}
