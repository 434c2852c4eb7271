//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = ".reading-tracker";
const DEFAULT_READING_GOAL: u32 = 12;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON, one event per line
    Json,
    /// Human-readable
    Pretty,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the JSON snapshots
    pub data_dir: PathBuf,
    /// Yearly book goal for a brand-new user
    pub default_reading_goal: u32,
    pub log_format: LogFormat,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            default_reading_goal: DEFAULT_READING_GOAL,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let default_reading_goal = match env::var("READING_TRACKER_DEFAULT_GOAL") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::Invalid("READING_TRACKER_DEFAULT_GOAL", raw))?,
            Err(_) => DEFAULT_READING_GOAL,
        };

        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("pretty") => LogFormat::Pretty,
            Ok("json") | Err(_) => LogFormat::Json,
            Ok(other) => return Err(ConfigError::Invalid("LOG_FORMAT", other.to_string())),
        };

        Ok(Self {
            data_dir: env::var("READING_TRACKER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            default_reading_goal,
            log_format,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
