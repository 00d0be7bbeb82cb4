use crate::error::DeadlineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "deadlines.json";

/// Tuned constants for the extraction heuristics. The defaults reproduce the
/// behaviour the service has always shipped with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters of preceding row text considered as title context.
    pub row_context_chars: usize,
    /// Same window for the per-element fallback scan.
    pub child_context_chars: usize,
    /// Context must be strictly longer than this to be used in a title.
    pub min_context_len: usize,
    /// Row labels must be strictly longer than this.
    pub min_label_len: usize,
    /// Appended to dates that carry no time of day.
    pub default_time: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            row_context_chars: 100,
            child_context_chars: 50,
            min_context_len: 3,
            min_label_len: 2,
            default_time: "8:00 am".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Course listing URL prefix; the course code is appended.
    pub listing_base_url: String,
    pub listing_host: String,
    pub profile_base_url: String,
    pub profile_host: String,
    pub user_agent: String,
    pub request_timeout_secs: Option<u64>,
    pub extraction: ExtractionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            listing_base_url: "https://programs-courses.uq.edu.au/course.html?course_code="
                .to_string(),
            listing_host: "programs-courses.uq.edu.au".to_string(),
            profile_base_url: "https://course-profiles.uq.edu.au".to_string(),
            profile_host: "course-profiles.uq.edu.au".to_string(),
            user_agent: concat!("deadlines/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: None,
            extraction: ExtractionConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse {}: {e}", path.display()))
    }

    /// Reads `$CONFIGS_PATH/deadlines.json` when present, otherwise the
    /// built-in defaults. `DEADLINES_BIND_ADDR` overrides the bind address.
    pub fn load_default() -> Result<Self, DeadlineError> {
        let mut config = match config_file_path() {
            Some(path) if path.exists() => {
                Self::load_from_file(&path).map_err(DeadlineError::Config)?
            }
            _ => Self::default(),
        };

        if let Ok(bind_addr) = std::env::var("DEADLINES_BIND_ADDR") {
            if !bind_addr.trim().is_empty() {
                config.bind_addr = bind_addr.trim().to_string();
            }
        }

        Ok(config)
    }
}

fn config_file_path() -> Option<PathBuf> {
    std::env::var("CONFIGS_PATH")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map(|dir| Path::new(&dir).join(CONFIG_FILE_NAME))
}
