use crate::config::Config;
use crate::error::AppError;
use governor::{clock::{Clock, DefaultClock}, state::{InMemoryState, NotKeyed}, Quota, RateLimiter};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::endpoints;
use super::models::*;

const MAX_RETRIES: u32 = 3;

pub struct MatchApiClient {
    config: Config,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl MatchApiClient {
    pub fn new(config: Config) -> Self {
        let per_second = NonZeroU32::new(config.requests_per_sec).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));
        MatchApiClient {
            config,
            rate_limiter,
        }
    }

    fn throttle(&self) {
        let clock = DefaultClock::default();
        while let Err(not_until) = self.rate_limiter.check() {
            // quota is per second, a longer wait means the clocks disagree
            let wait = not_until.wait_time_from(clock.now()).min(Duration::from_secs(1));
            thread::sleep(wait);
        }
    }

    fn execute_request(&self, url: &str, match_id: &str) -> Result<String, AppError> {
        let mut retry_count = 0;

        loop {
            self.throttle();
            debug!(url, "GET");

            let mut request = ureq::get(url).set("User-Agent", "lol_timeline/0.1.0");
            if let Some(token) = &self.config.api_token {
                request = request.set("Authorization", &format!("Bearer {}", token));
            }

            match request.call() {
                Ok(resp) => {
                    return resp.into_string().map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(404, _)) => {
                    return Err(AppError::MatchNotFound(match_id.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    warn!(wait_ms, "rate limited by match API, retrying");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code, resp)) => {
                    return Err(AppError::ApiError(format!(
                        "{} returned {} {}",
                        url,
                        code,
                        resp.status_text()
                    )));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, match_id: &str) -> Result<T, AppError> {
        let body = self.execute_request(url, match_id)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    pub fn get_participants(&self, match_id: &str) -> Result<Vec<Participant>, AppError> {
        let url = endpoints::participants_url(&self.config.api_url, match_id);
        self.get_json(&url, match_id)
    }

    pub fn get_timeline(&self, match_id: &str) -> Result<Timeline, AppError> {
        let url = endpoints::timeline_url(&self.config.api_url, match_id);
        self.get_json(&url, match_id)
    }

    pub fn get_match_bundle(&self, match_id: &str) -> Result<MatchBundle, AppError> {
        let participants = self.get_participants(match_id)?;
        let timeline = self.get_timeline(match_id)?;

        Ok(MatchBundle {
            match_id: match_id.to_string(),
            participants,
            timeline,
        })
    }
}
