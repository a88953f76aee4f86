use crate::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the match backend, without trailing slash
    pub api_url: String,
    pub api_token: Option<String>,
    pub cache_max_age_mins: u64,
    pub requests_per_sec: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("MATCH_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string())
            .trim_end_matches('/')
            .to_string();

        let api_token = env::var("MATCH_API_TOKEN").ok().filter(|t| !t.is_empty());

        let cache_max_age_mins = env::var("MATCH_CACHE_MAX_AGE_MINS")
            .unwrap_or_else(|_| "1440".to_string())
            .parse()
            .map_err(|_| {
                AppError::ConfigError("MATCH_CACHE_MAX_AGE_MINS must be a valid number".to_string())
            })?;

        let requests_per_sec: u32 = env::var("MATCH_API_REQUESTS_PER_SEC")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| {
                AppError::ConfigError("MATCH_API_REQUESTS_PER_SEC must be a valid number".to_string())
            })?;

        if requests_per_sec == 0 {
            return Err(AppError::ConfigError(
                "MATCH_API_REQUESTS_PER_SEC must be greater than zero".to_string(),
            ));
        }

        Ok(Config {
            api_url,
            api_token,
            cache_max_age_mins,
            requests_per_sec,
        })
    }
}
