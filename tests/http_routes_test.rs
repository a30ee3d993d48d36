/// HTTP surface tests over the in-memory store
mod support;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use support::helpers::{TestApp, SHORT_SHOW, SHOW, USER};
use watchlog_lib::build_router;
use watchlog_lib::modules::tv_progress::domain::ProgressRepository;

fn router(app: &TestApp) -> Router {
    build_router(app.state.clone())
}

fn request(method: Method, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let (status, body) = send(router(&app), request(Method::GET, "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn toggle_requires_identity() {
    let app = TestApp::new();
    let (status, body) = send(
        router(&app),
        request(
            Method::POST,
            &format!("/api/tv-shows/{}/episodes", SHOW),
            None,
            Some(json!({ "seasonNumber": 1, "episodeNumber": 1, "watched": true })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn toggle_rejects_non_numeric_show_id() {
    let app = TestApp::new();
    let (status, _) = send(
        router(&app),
        request(
            Method::POST,
            "/api/tv-shows/breaking-bad/episodes",
            Some(USER),
            Some(json!({ "seasonNumber": 1, "episodeNumber": 1, "watched": true })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn toggle_rejects_malformed_body() {
    let app = TestApp::new();
    let (status, _) = send(
        router(&app),
        request(
            Method::POST,
            &format!("/api/tv-shows/{}/episodes", SHOW),
            Some(USER),
            Some(json!({ "seasonNumber": 1, "watched": "yes" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn toggle_returns_rollup() {
    let app = TestApp::new();
    let (status, body) = send(
        router(&app),
        request(
            Method::POST,
            &format!("/api/tv-shows/{}/episodes", SHOW),
            Some(USER),
            Some(json!({
                "seasonNumber": 1,
                "episodeNumber": 1,
                "episodeName": "Pilot",
                "runtime": 58,
                "watched": true
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Episode marked as watched");
    assert_eq!(body["watchedEpisodes"], 1);
    assert_eq!(body["showCompleted"], false);
    assert_eq!(body["showStatusChanged"], false);
}

#[tokio::test]
async fn unwatch_of_untracked_show_is_404() {
    let app = TestApp::new();
    let (status, _) = send(
        router(&app),
        request(
            Method::POST,
            &format!("/api/tv-shows/{}/episodes", SHOW),
            Some(USER),
            Some(json!({ "seasonNumber": 1, "episodeNumber": 1, "watched": false })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_failure_during_adoption_is_500() {
    let app = TestApp::new();
    app.catalog.set_failing(true);

    let (status, body) = send(
        router(&app),
        request(
            Method::POST,
            &format!("/api/tv-shows/{}/episodes", SHOW),
            Some(USER),
            Some(json!({ "seasonNumber": 1, "episodeNumber": 1, "watched": true })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "upstream_failure");
    assert!(body["message"].is_string());

    app.catalog.set_failing(false);
    let (status, _) = send(
        router(&app),
        request(Method::GET, &format!("/api/tv-shows/{}", SHOW), Some(USER), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.store.season_records(USER, SHOW, 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn season_episodes_merge_watch_flags() {
    let app = TestApp::new();
    send(
        router(&app),
        request(
            Method::POST,
            &format!("/api/tv-shows/{}/episodes", SHORT_SHOW),
            Some(USER),
            Some(json!({ "seasonNumber": 1, "episodeNumber": 2, "watched": true })),
        ),
    )
    .await;

    let (status, body) = send(
        router(&app),
        request(
            Method::GET,
            &format!("/api/tv-shows/{}/episodes?seasonNumber=1", SHORT_SHOW),
            Some(USER),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let episodes = body["episodes"].as_array().unwrap();
    assert_eq!(episodes.len(), 3);
    assert_eq!(episodes[0]["watched"], false);
    assert_eq!(episodes[1]["watched"], true);
    assert_eq!(episodes[1]["episodeNumber"], 2);
    assert!(episodes[1]["watchedAt"].is_string());
    assert!(episodes[0]["watchedAt"].is_null());
}

#[tokio::test]
async fn batch_without_list_marks_catalog_season() {
    let app = TestApp::new();
    let (status, body) = send(
        router(&app),
        request(
            Method::POST,
            &format!("/api/tv-shows/{}/episodes/batch", SHORT_SHOW),
            Some(USER),
            Some(json!({ "seasonNumber": 2, "watched": true })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["episodesUpdated"], 3);
    assert_eq!(body["watchedEpisodes"], 3);
    assert_eq!(body["status"], "watching");
}

#[tokio::test]
async fn backfill_lists_gaps() {
    let app = TestApp::new();
    send(
        router(&app),
        request(
            Method::POST,
            &format!("/api/tv-shows/{}/episodes", SHOW),
            Some(USER),
            Some(json!({ "seasonNumber": 1, "episodeNumber": 2, "watched": true })),
        ),
    )
    .await;

    let (status, body) = send(
        router(&app),
        request(
            Method::GET,
            &format!(
                "/api/tv-shows/{}/episodes/backfill?seasonNumber=1&episodeNumber=5",
                SHOW
            ),
            Some(USER),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let pending: Vec<i64> = body["pending"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["episodeNumber"].as_i64().unwrap())
        .collect();
    assert_eq!(pending, vec![1, 3, 4]);
}

#[tokio::test]
async fn show_list_lifecycle() {
    let app = TestApp::new();

    let (status, body) = send(
        router(&app),
        request(
            Method::POST,
            "/api/tv-shows",
            Some(USER),
            Some(json!({ "tvShowId": SHOW })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "want_to_watch");
    assert_eq!(body["totalEpisodes"], 10);

    let (status, _) = send(
        router(&app),
        request(
            Method::POST,
            "/api/tv-shows",
            Some(USER),
            Some(json!({ "tvShowId": SHOW })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        router(&app),
        request(
            Method::PUT,
            &format!("/api/tv-shows/{}/status", SHOW),
            Some(USER),
            Some(json!({ "status": "stopped_watching" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "stopped_watching");

    let (status, body) = send(
        router(&app),
        request(Method::GET, "/api/tv-shows?status=stopped_watching", Some(USER), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(
        router(&app),
        request(Method::DELETE, &format!("/api/tv-shows/{}", SHOW), Some(USER), None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        router(&app),
        request(Method::GET, &format!("/api/tv-shows/{}", SHOW), Some(USER), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_crud() {
    let app = TestApp::new();

    let (status, body) = send(
        router(&app),
        request(
            Method::POST,
            "/api/reviews",
            Some(USER),
            Some(json!({ "itemId": "1399-S1E1", "itemType": "episode", "rating": 4 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        router(&app),
        request(
            Method::POST,
            "/api/reviews",
            Some(USER),
            Some(json!({ "itemId": "1399", "itemType": "tv_show", "rating": 9 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        router(&app),
        request(
            Method::GET,
            "/api/reviews?itemType=episode&itemId=1399-S1E1",
            Some(USER),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(
        router(&app),
        request(Method::DELETE, "/api/reviews/not-a-uuid", Some(USER), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        router(&app),
        request(Method::DELETE, &format!("/api/reviews/{}", id), Some(USER), None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
