//! Reading statistics for the active user.
//!
//! Level is never stored: it is always derived from `xp` so a missed
//! update site cannot leave the two out of sync.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// XP needed to advance one level.
pub const XP_PER_LEVEL: u64 = 500;

/// Level reached with the given amount of XP (levels start at 1).
pub fn level_for_xp(xp: u64) -> u32 {
    u32::try_from(xp / XP_PER_LEVEL)
        .unwrap_or(u32::MAX - 1)
        .saturating_add(1)
}

/// Aggregated reading statistics.
///
/// Stored under the `stats` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Total experience points
    #[serde(default)]
    pub xp: u64,
    /// Number of daily logs recorded (see `services::progress`)
    #[serde(default)]
    pub streak: u32,
    /// Books finished
    #[serde(default)]
    pub books_read: u32,
    /// Total pages logged
    #[serde(default)]
    pub pages_read: u64,
    /// Largest single daily log
    #[serde(default)]
    pub max_daily_pages: u32,
    /// Logs recorded between 22:00 and 05:59
    #[serde(default)]
    pub night_reading_sessions: u32,
    /// Yearly book goal
    #[serde(default)]
    pub reading_goal: u32,
}

impl UserStats {
    /// Current level, derived from XP.
    pub fn level(&self) -> u32 {
        level_for_xp(self.xp)
    }

    /// Progress through the current level.
    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::from_xp(self.xp)
    }

    /// Percentage of the yearly goal reached, capped at 100.
    pub fn goal_percent(&self) -> f64 {
        if self.reading_goal == 0 {
            return 0.0;
        }
        (f64::from(self.books_read) / f64::from(self.reading_goal) * 100.0).min(100.0)
    }
}

/// Position within the current level, as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    /// XP earned since the start of the current level
    pub xp_into_level: u64,
    /// Total XP at which the next level starts
    pub xp_for_next_level: u64,
    /// `xp_into_level` as a percentage of one level
    pub percent: f64,
}

impl LevelProgress {
    pub fn from_xp(xp: u64) -> Self {
        let level = level_for_xp(xp);
        let xp_into_level = xp % XP_PER_LEVEL;
        Self {
            level,
            xp_into_level,
            xp_for_next_level: u64::from(level) * XP_PER_LEVEL,
            percent: xp_into_level as f64 / XP_PER_LEVEL as f64 * 100.0,
        }
    }
}
