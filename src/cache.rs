use crate::api::models::MatchBundle;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct CachedMatch {
    pub cached_at: DateTime<Utc>,
    pub bundle: MatchBundle,
}

impl CachedMatch {
    pub fn new(bundle: MatchBundle) -> Self {
        CachedMatch {
            cached_at: Utc::now(),
            bundle,
        }
    }

    pub fn cache_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lol_timeline")
    }

    pub fn cache_path(dir: &Path, match_id: &str) -> PathBuf {
        let file_name: String = match_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        dir.join(format!("{}.json", file_name))
    }

    /// `Ok(None)` when the match was never cached.
    pub fn load(dir: &Path, match_id: &str) -> Result<Option<Self>, AppError> {
        let path = Self::cache_path(dir, match_id);

        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map(Some).map_err(|e| {
                AppError::JsonError(format!("Failed to parse cache {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, dir: &Path) -> Result<PathBuf, AppError> {
        fs::create_dir_all(dir)?;

        let path = Self::cache_path(dir, &self.bundle.match_id);
        let json = serde_json::to_string(self).map_err(|e| {
            AppError::JsonError(format!("Failed to serialize cache: {}", e))
        })?;
        fs::write(&path, json)?;

        Ok(path)
    }

    pub fn is_stale(&self, max_age_mins: u64) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age.num_minutes() > max_age_mins as i64
    }
}
