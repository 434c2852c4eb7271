// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Book model and the add-book form input.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Reading status of a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    #[default]
    Reading,
    Completed,
    Paused,
}

/// A book on the user's shelf.
///
/// Stored under the `books` key. Books are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Shelf-local ID (1-based, assigned in insertion order)
    pub id: u64,
    pub title: String,
    pub author: String,
    /// Always greater than zero
    pub total_pages: u32,
    /// In `[0, total_pages]`
    pub current_page: u32,
    /// Target finish date
    pub deadline: NaiveDate,
    pub status: BookStatus,
    /// First time the book reached its last page. Set once; re-reading a
    /// finished book does not count it again.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Book {
    pub fn is_completed(&self) -> bool {
        self.status == BookStatus::Completed
    }

    /// Whether this book has already been counted in `books_read`.
    pub fn was_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn remaining_pages(&self) -> u32 {
        self.total_pages.saturating_sub(self.current_page)
    }

    /// Percentage of pages read.
    pub fn percent_complete(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        f64::from(self.current_page) / f64::from(self.total_pages) * 100.0
    }

    /// Whole days until the deadline (negative once overdue).
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }
}

/// Add-book form input, validated before it reaches the engine.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    #[validate(range(min = 1, message = "total pages must be at least 1"))]
    pub total_pages: u32,
    pub deadline: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_book(current_page: u32) -> Book {
        Book {
            id: 1,
            title: "Crime and Punishment".to_string(),
            author: "Fyodor Dostoevsky".to_string(),
            total_pages: 671,
            current_page,
            deadline: date(2024, 2, 15),
            status: BookStatus::Reading,
            finished_at: None,
        }
    }

    #[test]
    fn test_days_left() {
        let book = make_book(245);

        assert_eq!(book.days_left(date(2024, 2, 10)), 5);
        assert_eq!(book.days_left(date(2024, 2, 15)), 0);
        assert_eq!(book.days_left(date(2024, 2, 20)), -5);
    }

    #[test]
    fn test_percent_and_remaining() {
        let book = make_book(0);
        assert_eq!(book.percent_complete(), 0.0);
        assert_eq!(book.remaining_pages(), 671);

        let book = make_book(671);
        assert_eq!(book.percent_complete(), 100.0);
        assert_eq!(book.remaining_pages(), 0);
    }

    #[test]
    fn test_unfinished_book_omits_finished_at() {
        let json = serde_json::to_value(make_book(10)).unwrap();
        assert!(json.get("finishedAt").is_none());

        // Snapshots written before the field existed still load
        let book: Book = serde_json::from_value(json).unwrap();
        assert!(!book.was_finished());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&BookStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn test_new_book_validation() {
        let valid = NewBook {
            title: "War and Peace".to_string(),
            author: "Leo Tolstoy".to_string(),
            total_pages: 1225,
            deadline: date(2024, 1, 30),
        };
        assert!(valid.validate().is_ok());

        let zero_pages = NewBook {
            total_pages: 0,
            ..valid.clone()
        };
        assert!(zero_pages.validate().is_err());

        let no_title = NewBook {
            title: String::new(),
            ..valid
        };
        assert!(no_title.validate().is_err());
    }
}
