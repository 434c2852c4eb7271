// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Badge catalog and earned-badge records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::UserStats;

/// Badge rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// A badge that can be earned once per user.
///
/// Definitions are compiled in and never persisted.
#[derive(Debug, Clone, Copy)]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub condition: fn(&UserStats) -> bool,
    pub xp_reward: u32,
    pub rarity: Rarity,
}

impl BadgeDefinition {
    pub fn is_met(&self, stats: &UserStats) -> bool {
        (self.condition)(stats)
    }
}

/// A badge the user has earned. Append-only, at most one per `badge_id`.
///
/// Stored under the `badges` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct EarnedBadge {
    pub badge_id: String,
    pub earned_at: DateTime<Utc>,
    pub xp_awarded: u32,
}

/// All badges, in evaluation order.
pub static BADGE_DEFINITIONS: [BadgeDefinition; 6] = [
    BadgeDefinition {
        id: "first_book",
        name: "First Book",
        description: "Finish your first book",
        condition: has_finished_a_book,
        xp_reward: 100,
        rarity: Rarity::Common,
    },
    BadgeDefinition {
        id: "streak_10",
        name: "10-Day Streak",
        description: "Read 10 days in a row",
        condition: has_streak_10,
        xp_reward: 200,
        rarity: Rarity::Rare,
    },
    BadgeDefinition {
        id: "night_reader",
        name: "Night Reader",
        description: "Log a reading session after 22:00",
        condition: has_night_session,
        xp_reward: 150,
        rarity: Rarity::Rare,
    },
    BadgeDefinition {
        id: "pages_1000",
        name: "1000 Pages",
        description: "Read 1000 pages in total",
        condition: has_read_1000_pages,
        xp_reward: 300,
        rarity: Rarity::Epic,
    },
    BadgeDefinition {
        id: "speed_reader",
        name: "Speed Reader",
        description: "Read 100+ pages in a single day",
        condition: has_100_page_day,
        xp_reward: 250,
        rarity: Rarity::Epic,
    },
    BadgeDefinition {
        id: "consistent_reader",
        name: "Consistent Reader",
        description: "Read 30 days in a row",
        condition: has_streak_30,
        xp_reward: 500,
        rarity: Rarity::Legendary,
    },
];

/// Look up a badge definition by ID.
pub fn find_badge(id: &str) -> Option<&'static BadgeDefinition> {
    BADGE_DEFINITIONS.iter().find(|b| b.id == id)
}

fn has_finished_a_book(stats: &UserStats) -> bool {
    stats.books_read >= 1
}

fn has_streak_10(stats: &UserStats) -> bool {
    stats.streak >= 10
}

fn has_night_session(stats: &UserStats) -> bool {
    stats.night_reading_sessions >= 1
}

fn has_read_1000_pages(stats: &UserStats) -> bool {
    stats.pages_read >= 1000
}

fn has_100_page_day(stats: &UserStats) -> bool {
    stats.max_daily_pages >= 100
}

fn has_streak_30(stats: &UserStats) -> bool {
    stats.streak >= 30
}
