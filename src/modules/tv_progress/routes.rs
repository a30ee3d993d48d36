use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::application::{
    MarkAllEpisodesCommand, MarkAllEpisodesResult, PendingBackfillQuery, PendingBackfillResult,
    SeasonProgressQuery, SeasonProgressResult, ToggleEpisodeCommand,
};
use super::domain::{EpisodeUpdate, ShowStatus, TrackedShow};
use crate::log_debug;
use crate::shared::application::use_case::{Query, UseCase};
use crate::shared::errors::AppResult;
use crate::shared::http::{ApiJson, ApiQuery, CurrentUser};
use crate::shared::utils::Validator;
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleEpisodeRequest {
    pub season_number: i32,
    pub episode_number: i32,
    pub episode_name: Option<String>,
    pub runtime: Option<i32>,
    pub watched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleEpisodeResponse {
    pub message: String,
    pub watched_episodes: i32,
    pub show_completed: bool,
    pub show_status_changed: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllEpisodesRequest {
    pub season_number: i32,
    pub watched: bool,
    pub episodes: Option<Vec<EpisodeUpdate>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonParams {
    pub season_number: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillParams {
    pub season_number: i32,
    pub episode_number: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddShowRequest {
    pub tv_show_id: i32,
    pub status: Option<ShowStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ShowStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListShowsParams {
    pub status: Option<ShowStatus>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tv-shows", get(list_shows).post(add_show))
        .route("/api/tv-shows/{show_id}", get(get_show).delete(remove_show))
        .route("/api/tv-shows/{show_id}/status", put(update_status))
        .route("/api/tv-shows/{show_id}/refresh", post(refresh_show))
        .route(
            "/api/tv-shows/{show_id}/episodes",
            get(season_episodes).post(toggle_episode),
        )
        .route("/api/tv-shows/{show_id}/episodes/batch", post(mark_all_episodes))
        .route("/api/tv-shows/{show_id}/episodes/backfill", get(pending_backfill))
}

pub async fn toggle_episode(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(show_id): Path<String>,
    ApiJson(request): ApiJson<ToggleEpisodeRequest>,
) -> AppResult<Json<ToggleEpisodeResponse>> {
    let tv_show_id = Validator::parse_show_id(&show_id)?;
    log_debug!(
        "toggle_episode called - user: {}, show: {}, S{}E{}, watched: {}",
        user.user_id,
        tv_show_id,
        request.season_number,
        request.episode_number,
        request.watched
    );

    let command = ToggleEpisodeCommand::new(
        user.user_id,
        tv_show_id,
        request.season_number,
        request.episode_number,
        request.watched,
    )
    .with_metadata(request.episode_name, request.runtime);

    let result = state.toggle_episode.execute(command).await?;

    Ok(Json(ToggleEpisodeResponse {
        message: if request.watched {
            "Episode marked as watched".to_string()
        } else {
            "Episode marked as unwatched".to_string()
        },
        watched_episodes: result.watched_episodes,
        show_completed: result.show_completed,
        show_status_changed: result.show_status_changed,
    }))
}

pub async fn season_episodes(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(show_id): Path<String>,
    ApiQuery(params): ApiQuery<SeasonParams>,
) -> AppResult<Json<SeasonProgressResult>> {
    let tv_show_id = Validator::parse_show_id(&show_id)?;
    let result = state
        .season_progress
        .execute(SeasonProgressQuery::new(
            user.user_id,
            tv_show_id,
            params.season_number,
        ))
        .await?;
    Ok(Json(result))
}

pub async fn mark_all_episodes(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(show_id): Path<String>,
    ApiJson(request): ApiJson<MarkAllEpisodesRequest>,
) -> AppResult<Json<MarkAllEpisodesResult>> {
    let tv_show_id = Validator::parse_show_id(&show_id)?;
    let result = state
        .mark_all_episodes
        .execute(MarkAllEpisodesCommand::new(
            user.user_id,
            tv_show_id,
            request.season_number,
            request.episodes,
            request.watched,
        ))
        .await?;
    Ok(Json(result))
}

pub async fn pending_backfill(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(show_id): Path<String>,
    ApiQuery(params): ApiQuery<BackfillParams>,
) -> AppResult<Json<PendingBackfillResult>> {
    let tv_show_id = Validator::parse_show_id(&show_id)?;
    let result = state
        .pending_backfill
        .execute(PendingBackfillQuery::new(
            user.user_id,
            tv_show_id,
            params.season_number,
            params.episode_number,
        ))
        .await?;
    Ok(Json(result))
}

pub async fn list_shows(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(params): ApiQuery<ListShowsParams>,
) -> AppResult<Json<Vec<TrackedShow>>> {
    let shows = state
        .tracked_shows
        .list_shows(&user.user_id, params.status)
        .await?;
    Ok(Json(shows))
}

pub async fn add_show(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(request): ApiJson<AddShowRequest>,
) -> AppResult<(StatusCode, Json<TrackedShow>)> {
    let show = state
        .tracked_shows
        .add_show(&user.user_id, request.tv_show_id, request.status)
        .await?;
    Ok((StatusCode::CREATED, Json(show)))
}

pub async fn get_show(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(show_id): Path<String>,
) -> AppResult<Json<TrackedShow>> {
    let tv_show_id = Validator::parse_show_id(&show_id)?;
    let show = state.tracked_shows.get_show(&user.user_id, tv_show_id).await?;
    Ok(Json(show))
}

pub async fn remove_show(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(show_id): Path<String>,
) -> AppResult<StatusCode> {
    let tv_show_id = Validator::parse_show_id(&show_id)?;
    state
        .tracked_shows
        .remove_show(&user.user_id, tv_show_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(show_id): Path<String>,
    ApiJson(request): ApiJson<UpdateStatusRequest>,
) -> AppResult<Json<TrackedShow>> {
    let tv_show_id = Validator::parse_show_id(&show_id)?;
    let show = state
        .tracked_shows
        .set_status(&user.user_id, tv_show_id, request.status)
        .await?;
    Ok(Json(show))
}

pub async fn refresh_show(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(show_id): Path<String>,
) -> AppResult<Json<TrackedShow>> {
    let tv_show_id = Validator::parse_show_id(&show_id)?;
    let show = state
        .tracked_shows
        .refresh_totals(&user.user_id, tv_show_id)
        .await?;
    Ok(Json(show))
}
