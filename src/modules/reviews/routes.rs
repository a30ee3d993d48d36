use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::domain::{Review, ReviewItemType};
use crate::shared::errors::AppResult;
use crate::shared::http::{ApiJson, ApiQuery, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertReviewRequest {
    pub item_id: String,
    pub item_type: ReviewItemType,
    pub rating: i16,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsParams {
    pub item_type: Option<ReviewItemType>,
    /// Narrows the list to the review of one item (requires `itemType`)
    pub item_id: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/reviews", get(list_reviews).post(upsert_review))
        .route("/api/reviews/{id}", delete(delete_review))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(params): ApiQuery<ListReviewsParams>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = match (params.item_type, params.item_id.as_deref()) {
        (Some(item_type), Some(item_id)) => state
            .reviews
            .get_review(&user.user_id, item_type, item_id)
            .await?
            .into_iter()
            .collect(),
        (item_type, _) => state.reviews.list_reviews(&user.user_id, item_type).await?,
    };
    Ok(Json(reviews))
}

pub async fn upsert_review(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(request): ApiJson<UpsertReviewRequest>,
) -> AppResult<Json<Review>> {
    let review = state
        .reviews
        .upsert_review(
            &user.user_id,
            request.item_type,
            &request.item_id,
            request.rating,
            request.comment,
        )
        .await?;
    Ok(Json(review))
}

pub async fn delete_review(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = Uuid::parse_str(&id)?;
    state.reviews.delete_review(&user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
