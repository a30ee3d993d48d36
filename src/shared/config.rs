use std::{env, fmt::Display, str::FromStr, time::Duration};

use crate::shared::errors::{AppError, AppResult};
use crate::{log_info, log_warn};

/// Runtime configuration, read from the environment (and `.env` via dotenvy)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub tmdb_api_key: String,
    pub catalog_cache_ttl: Duration,
    pub catalog_requests_per_second: f64,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = required("DATABASE_URL")?;
        validate_database_url(&database_url)?;

        Ok(Self {
            port: try_load("WATCHLOG_PORT", "3000")?,
            database_url,
            tmdb_api_key: required("TMDB_API_KEY")?,
            catalog_cache_ttl: Duration::from_secs(try_load("CATALOG_CACHE_TTL_SECS", "300")?),
            catalog_requests_per_second: try_load("CATALOG_REQUESTS_PER_SECOND", "4")?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn required(key: &str) -> AppResult<String> {
    env::var(key).map_err(|_| {
        AppError::InvalidInput(format!("{key} environment variable not found"))
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> AppResult<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        log_info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        log_warn!("Invalid {key} value: {e}");
        AppError::InvalidInput(format!("Invalid {key} value '{raw}': {e}"))
    })
}

/// Only postgres URLs are accepted; the credentials part is never logged
pub fn validate_database_url(url: &str) -> AppResult<()> {
    if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
        return Err(AppError::InvalidInput(
            "Invalid database URL format. Must start with postgres:// or postgresql://"
                .to_string(),
        ));
    }

    log_info!(
        "Database target: {}",
        url.rsplit('@').next().unwrap_or("unknown_host")
    );
    Ok(())
}
