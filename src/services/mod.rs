// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress & gamification engine.
//!
//! Every function here is a pure computation over the models plus an
//! explicit timestamp; none of them touch storage.

pub mod analytics;
pub mod badges;
pub mod books;
pub mod progress;
pub mod quests;

pub use badges::{evaluate_badges, BadgeAwards};
pub use books::{add_book, progress_book};
pub use progress::{apply_daily_log, LevelUpEvent};
pub use quests::Activity;
