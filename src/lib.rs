// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Reading tracker: gamified progress for a personal reading log
//!
//! This crate turns reading activity (books added, daily pages logged) into
//! experience points, levels, streaks, badges, quests and challenges, and
//! persists the user's state as local JSON snapshots.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod time_utils;

pub use session::{Session, SessionEvents};
