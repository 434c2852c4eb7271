// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Badge evaluation and awarding.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::models::{BadgeDefinition, EarnedBadge, UserStats, BADGE_DEFINITIONS};
use crate::services::progress::{level_up_between, LevelUpEvent};

/// Number of badges shown in the recent-awards panel.
pub const RECENT_AWARDS_LIMIT: usize = 3;

/// Result of one badge evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeAwards {
    /// Newly earned badges, in declaration order
    pub earned: Vec<EarnedBadge>,
    /// Level-up caused by the combined badge XP
    pub level_up: Option<LevelUpEvent>,
}

impl BadgeAwards {
    pub fn is_empty(&self) -> bool {
        self.earned.is_empty()
    }

    pub fn total_xp(&self) -> u64 {
        self.earned.iter().map(|b| u64::from(b.xp_awarded)).sum()
    }
}

/// Badges whose condition holds and that are not yet in `earned_ids`.
pub fn pending_badges(
    stats: &UserStats,
    earned_ids: &HashSet<&str>,
) -> Vec<&'static BadgeDefinition> {
    BADGE_DEFINITIONS
        .iter()
        .filter(|badge| !earned_ids.contains(badge.id) && badge.is_met(stats))
        .collect()
}

/// Award every badge whose condition newly holds.
///
/// Appends one `EarnedBadge` per award to `earned` and adds its XP to
/// `stats`. Conditions are checked against `stats` as passed in, so badge XP
/// from this pass cannot unlock further badges in the same pass. Calling
/// again with the same inputs awards nothing.
pub fn evaluate_badges(
    stats: &mut UserStats,
    earned: &mut Vec<EarnedBadge>,
    now: DateTime<Utc>,
) -> BadgeAwards {
    let earned_ids: HashSet<&str> = earned.iter().map(|b| b.badge_id.as_str()).collect();
    let pending = pending_badges(stats, &earned_ids);
    if pending.is_empty() {
        return BadgeAwards::default();
    }

    let previous_level = stats.level();
    let mut awards = Vec::with_capacity(pending.len());

    for badge in pending {
        stats.xp = stats.xp.saturating_add(u64::from(badge.xp_reward));
        tracing::info!(
            badge = badge.id,
            xp_reward = badge.xp_reward,
            total_xp = stats.xp,
            "Badge earned"
        );
        awards.push(EarnedBadge {
            badge_id: badge.id.to_string(),
            earned_at: now,
            xp_awarded: badge.xp_reward,
        });
    }

    earned.extend(awards.iter().cloned());

    let total: u64 = awards.iter().map(|b| u64::from(b.xp_awarded)).sum();
    BadgeAwards {
        earned: awards,
        level_up: level_up_between(previous_level, stats.xp, total),
    }
}

/// A badge definition paired with its award, if earned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub xp_reward: u32,
    pub rarity: crate::models::Rarity,
    pub earned: Option<EarnedBadge>,
}

/// Every badge in declaration order, with earned status.
pub fn badge_gallery(earned: &[EarnedBadge]) -> Vec<GalleryEntry> {
    BADGE_DEFINITIONS
        .iter()
        .map(|badge| GalleryEntry {
            id: badge.id,
            name: badge.name,
            description: badge.description,
            xp_reward: badge.xp_reward,
            rarity: badge.rarity,
            earned: earned.iter().find(|e| e.badge_id == badge.id).cloned(),
        })
        .collect()
}

/// The most recently earned badges, newest first.
pub fn recent_awards(earned: &[EarnedBadge]) -> Vec<&EarnedBadge> {
    let mut recent: Vec<&EarnedBadge> = earned.iter().collect();
    recent.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));
    recent.truncate(RECENT_AWARDS_LIMIT);
    recent
}
