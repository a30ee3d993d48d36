use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use super::{mapper, models};
use crate::modules::catalog::domain::{CatalogProvider, SeasonDetails, TvShowDetails};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// TMDB (The Movie Database) catalog client
///
/// Requests are throttled locally; failures are returned as-is, never retried.
pub struct TmdbCatalogClient {
    http_client: Client,
    rate_limiter: DirectRateLimiter,
    base_url: String,
    api_key: String,
}

impl TmdbCatalogClient {
    pub fn new(api_key: String, requests_per_second: f64) -> AppResult<Self> {
        Self::with_base_url(api_key, requests_per_second, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(
        api_key: String,
        requests_per_second: f64,
        base_url: String,
    ) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("watchlog/0.1")
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            rate_limiter: Self::create_rate_limiter(requests_per_second)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn create_rate_limiter(requests_per_second: f64) -> AppResult<DirectRateLimiter> {
        if requests_per_second.is_nan() || requests_per_second <= 0.0 {
            return Err(AppError::InvalidInput(
                "Catalog request rate must be positive".to_string(),
            ));
        }

        let period = Duration::from_secs_f64(1.0 / requests_per_second);
        let burst = NonZeroU32::new((requests_per_second.ceil() as u32).max(1))
            .unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period)
            .ok_or_else(|| AppError::InvalidInput("Catalog request period is zero".to_string()))?
            .allow_burst(burst);

        Ok(RateLimiter::direct(quota))
    }

    /// Build URL with API key parameter
    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}{}?api_key={}&language=en-US",
            self.base_url,
            endpoint,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        self.rate_limiter.until_ready().await;

        let start = Instant::now();
        LogContext::api_call("TMDB", endpoint, "GET", None);

        let response = self.http_client.get(self.build_url(endpoint)).send().await?;
        let status = response.status();
        LogContext::api_call(
            "TMDB",
            endpoint,
            status.as_str(),
            Some(start.elapsed().as_millis() as u64),
        );

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<models::TmdbError>()
            .await
            .map(|e| e.status_message)
            .unwrap_or_else(|_| "unexpected response".to_string());
        Err(status_error(status, endpoint, &message))
    }
}

/// A missing resource is NotFound; every other failure, throttling
/// included, is an upstream failure
fn status_error(status: StatusCode, endpoint: &str, message: &str) -> AppError {
    match status {
        StatusCode::NOT_FOUND => {
            AppError::NotFound(format!("Catalog has no resource at {}", endpoint))
        }
        StatusCode::TOO_MANY_REQUESTS => AppError::ExternalServiceError(format!(
            "TMDB rate limit exceeded at {}: {}",
            endpoint, message
        )),
        s => AppError::ExternalServiceError(format!("TMDB returned HTTP {}: {}", s, message)),
    }
}

#[async_trait]
impl CatalogProvider for TmdbCatalogClient {
    async fn get_tv_show_details(&self, show_id: i32) -> AppResult<TvShowDetails> {
        let show: models::TvShowDetails = self.get(&format!("/tv/{}", show_id)).await?;
        Ok(mapper::map_show(show))
    }

    async fn get_season_details(
        &self,
        show_id: i32,
        season_number: i32,
    ) -> AppResult<SeasonDetails> {
        let season: models::SeasonDetails = self
            .get(&format!("/tv/{}/season/{}", show_id, season_number))
            .await?;
        Ok(mapper::map_season(show_id, season))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_rates() {
        assert!(TmdbCatalogClient::new("key".to_string(), 0.0).is_err());
        assert!(TmdbCatalogClient::new("key".to_string(), -1.0).is_err());
    }

    #[test]
    fn throttling_is_an_upstream_failure() {
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, "/tv/1396", "slow down");
        assert!(matches!(err, AppError::ExternalServiceError(_)));
        assert_eq!(err.status_code().as_u16(), 500);

        let err = status_error(StatusCode::NOT_FOUND, "/tv/0", "missing");
        assert!(matches!(err, AppError::NotFound(_)));

        let err = status_error(StatusCode::BAD_GATEWAY, "/tv/1396", "bad gateway");
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }

    #[test]
    fn builds_urls_with_encoded_key() {
        let client = TmdbCatalogClient::with_base_url(
            "a b".to_string(),
            4.0,
            "http://localhost:9999/3/".to_string(),
        )
        .unwrap();

        assert_eq!(
            client.build_url("/tv/1396"),
            "http://localhost:9999/3/tv/1396?api_key=a%20b&language=en-US"
        );
    }
}
