// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod badge;
pub mod book;
pub mod log;
pub mod quest;
pub mod stats;
pub mod user;

pub use badge::{BadgeDefinition, EarnedBadge, Rarity, BADGE_DEFINITIONS};
pub use book::{Book, BookStatus, NewBook};
pub use log::{DailyLogInput, Mood, ReadingLog};
pub use quest::{Challenge, ChallengeKind, ChallengeState, ProgressUnit, Quest, QuestKind};
pub use stats::{level_for_xp, LevelProgress, UserStats, XP_PER_LEVEL};
pub use user::{OnboardingGoals, ReadingTime, Theme, User};
