// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily-log scoring and level-up detection.
//!
//! Each log awards 10 XP per page. The streak counts logs, not calendar
//! days: any accepted log extends it by one, with no gap detection.

use serde::Serialize;

use crate::models::{level_for_xp, UserStats};
use crate::time_utils::is_night_hour;

/// XP awarded per page logged.
pub const XP_PER_PAGE: u64 = 10;

/// Emitted when an XP gain moves the user to a higher level.
///
/// A single gain may skip levels; only the final level is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUpEvent {
    pub previous_level: u32,
    pub new_level: u32,
    pub xp_gained: u64,
}

impl LevelUpEvent {
    pub fn levels_gained(&self) -> u32 {
        self.new_level - self.previous_level
    }
}

/// Add `xp` to `stats` and report a level-up if one happened.
pub fn grant_xp(stats: &mut UserStats, xp: u64) -> Option<LevelUpEvent> {
    let previous_level = stats.level();
    stats.xp = stats.xp.saturating_add(xp);
    level_up_between(previous_level, stats.xp, xp)
}

/// Level-up from `previous_level` to the level implied by `new_xp`, if any.
pub fn level_up_between(previous_level: u32, new_xp: u64, xp_gained: u64) -> Option<LevelUpEvent> {
    let new_level = level_for_xp(new_xp);
    (new_level > previous_level).then_some(LevelUpEvent {
        previous_level,
        new_level,
        xp_gained,
    })
}

/// Apply one daily reading log.
///
/// `logged_at_hour` is the local hour of day (0-23). Logs of zero pages are
/// ignored and award nothing.
pub fn apply_daily_log(
    stats: &mut UserStats,
    pages: u32,
    logged_at_hour: u32,
) -> Option<LevelUpEvent> {
    if pages == 0 {
        tracing::debug!("Ignoring empty daily log");
        return None;
    }

    let xp = u64::from(pages) * XP_PER_PAGE;
    let night = is_night_hour(logged_at_hour);

    stats.pages_read = stats.pages_read.saturating_add(u64::from(pages));
    stats.streak = stats.streak.saturating_add(1);
    stats.max_daily_pages = stats.max_daily_pages.max(pages);
    if night {
        stats.night_reading_sessions = stats.night_reading_sessions.saturating_add(1);
    }

    let level_up = grant_xp(stats, xp);

    tracing::info!(
        pages,
        xp_gained = xp,
        total_xp = stats.xp,
        streak = stats.streak,
        night,
        level = stats.level(),
        "Applied daily log"
    );

    level_up
}
