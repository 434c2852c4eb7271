// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use reading_tracker::db::LocalStore;
use reading_tracker::models::{DailyLogInput, NewBook, UserStats};
use reading_tracker::Session;

/// Fixed clock for deterministic tests (a Wednesday afternoon).
#[allow(dead_code)]
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 6, 15, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn new_book(title: &str, total_pages: u32) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: "Test Author".to_string(),
        total_pages,
        deadline: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
    }
}

#[allow(dead_code)]
pub fn log_input(pages: u32, hour: u32) -> DailyLogInput {
    DailyLogInput {
        pages,
        hour,
        book_id: None,
        notes: None,
        mood: None,
    }
}

/// Stats of an established reader: level 5, 12 logs, 8 books.
#[allow(dead_code)]
pub fn veteran_stats() -> UserStats {
    UserStats {
        xp: 2450,
        streak: 12,
        books_read: 8,
        pages_read: 2340,
        max_daily_pages: 85,
        night_reading_sessions: 3,
        reading_goal: 20,
    }
}

/// Fresh session backed by an in-memory store.
#[allow(dead_code)]
pub fn test_session() -> (Session, LocalStore) {
    (Session::new(test_now(), 12), LocalStore::in_memory())
}
