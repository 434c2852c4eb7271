//! Daily reading log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// How a reading session felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Bad,
}

/// One accepted daily log.
///
/// Stored under the `logs` key, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ReadingLog {
    pub pages: u32,
    pub logged_at: DateTime<Utc>,
    /// Local hour of day the log was recorded at
    pub hour: u32,
    /// Book the pages were read in, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

/// Daily-log form input.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DailyLogInput {
    #[validate(range(min = 1, max = 500, message = "pages must be between 1 and 500"))]
    pub pages: u32,
    #[validate(range(max = 23, message = "hour must be between 0 and 23"))]
    pub hour: u32,
    /// Advance this book by `pages`
    #[serde(default)]
    pub book_id: Option<u64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub mood: Option<Mood>,
}
