// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard summaries and reading-pace prediction.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{
    Book, BookStatus, EarnedBadge, LevelProgress, ReadingLog, UserStats, BADGE_DEFINITIONS,
};
use crate::services::badges::recent_awards;

/// Days of history used for the pace average.
pub const PACE_WINDOW_DAYS: i64 = 7;

/// Pages per day over the `PACE_WINDOW_DAYS` days before `today`.
///
/// Days without a log count as zero pages.
pub fn average_pages_per_day(logs: &[ReadingLog], today: NaiveDate) -> f64 {
    let start = today - Duration::days(PACE_WINDOW_DAYS);
    let total: u64 = logs
        .iter()
        .filter(|log| {
            let day = log.logged_at.date_naive();
            day >= start && day < today
        })
        .map(|log| u64::from(log.pages))
        .sum();

    total as f64 / PACE_WINDOW_DAYS as f64
}

/// Estimated finish date for `book` at `pages_per_day`.
///
/// `None` when the book is already completed or the pace is zero.
pub fn estimate_finish(book: &Book, pages_per_day: f64, today: NaiveDate) -> Option<NaiveDate> {
    if book.is_completed() || pages_per_day <= 0.0 {
        return None;
    }
    let days = (f64::from(book.remaining_pages()) / pages_per_day).ceil() as i64;
    today.checked_add_signed(Duration::days(days))
}

/// Pace prediction for one book.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PacePrediction {
    pub book_id: u64,
    pub title: String,
    pub pages_per_day: f64,
    pub estimated_finish: Option<NaiveDate>,
    /// Whether the estimate lands on or before the deadline
    pub on_track: Option<bool>,
}

pub fn predict_pace(book: &Book, logs: &[ReadingLog], today: NaiveDate) -> PacePrediction {
    let pages_per_day = average_pages_per_day(logs, today);
    let estimated_finish = estimate_finish(book, pages_per_day, today);

    PacePrediction {
        book_id: book.id,
        title: book.title.clone(),
        pages_per_day,
        estimated_finish,
        on_track: estimated_finish.map(|finish| finish <= book.deadline),
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub xp: u64,
    pub level: LevelProgress,
    pub streak: u32,
    pub books_read: u32,
    pub reading_goal: u32,
    pub goal_percent: f64,
    pub pages_read: u64,
    pub currently_reading: usize,
    pub badges_earned: usize,
    pub badges_total: usize,
    /// Newest badges first
    pub recent_awards: Vec<EarnedBadge>,
}

pub fn dashboard_summary(
    stats: &UserStats,
    books: &[Book],
    earned: &[EarnedBadge],
) -> DashboardSummary {
    DashboardSummary {
        xp: stats.xp,
        level: stats.level_progress(),
        streak: stats.streak,
        books_read: stats.books_read,
        reading_goal: stats.reading_goal,
        goal_percent: stats.goal_percent(),
        pages_read: stats.pages_read,
        currently_reading: books
            .iter()
            .filter(|b| b.status == BookStatus::Reading)
            .count(),
        badges_earned: earned.len(),
        badges_total: BADGE_DEFINITIONS.len(),
        recent_awards: recent_awards(earned).into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log(day: u32, pages: u32) -> ReadingLog {
        ReadingLog {
            pages,
            logged_at: Utc.with_ymd_and_hms(2024, 3, day, 20, 0, 0).unwrap(),
            hour: 20,
            book_id: None,
            notes: None,
            mood: None,
        }
    }

    fn book(current_page: u32, total_pages: u32) -> Book {
        Book {
            id: 1,
            title: "Crime and Punishment".to_string(),
            author: "Fyodor Dostoevsky".to_string(),
            total_pages,
            current_page,
            deadline: date(2024, 3, 20),
            status: BookStatus::Reading,
            finished_at: None,
        }
    }

    #[test]
    fn test_average_uses_previous_seven_days() {
        let logs = vec![
            log(1, 100), // outside the window
            log(2, 25),
            log(3, 32),
            log(4, 18),
            log(5, 28),
            log(6, 35),
            log(7, 22),
            log(8, 30),
            log(9, 500), // today, excluded
        ];

        let avg = average_pages_per_day(&logs, date(2024, 3, 9));
        assert_eq!(avg, 190.0 / 7.0);
    }

    #[test]
    fn test_estimate_finish() {
        let book = book(245, 671);
        // 426 pages at 30/day -> 15 days
        let finish = estimate_finish(&book, 30.0, date(2024, 3, 9));
        assert_eq!(finish, Some(date(2024, 3, 24)));

        assert_eq!(estimate_finish(&book, 0.0, date(2024, 3, 9)), None);
    }

    #[test]
    fn test_predict_pace_on_track() {
        let logs: Vec<_> = (2..=8).map(|d| log(d, 70)).collect();
        let prediction = predict_pace(&book(0, 700), &logs, date(2024, 3, 9));

        assert_eq!(prediction.pages_per_day, 70.0);
        assert_eq!(prediction.estimated_finish, Some(date(2024, 3, 19)));
        assert_eq!(prediction.on_track, Some(true));
    }

    #[test]
    fn test_dashboard_summary() {
        let stats = UserStats {
            xp: 2450,
            streak: 12,
            books_read: 8,
            pages_read: 2340,
            reading_goal: 20,
            ..Default::default()
        };
        let mut done = book(671, 671);
        done.status = BookStatus::Completed;
        let books = vec![book(245, 671), done];

        let earned: Vec<_> = ["first_book", "streak_10", "night_reader", "pages_1000"]
            .iter()
            .zip(1..)
            .map(|(id, day)| EarnedBadge {
                badge_id: id.to_string(),
                earned_at: Utc.with_ymd_and_hms(2024, 3, day, 8, 0, 0).unwrap(),
                xp_awarded: 100,
            })
            .collect();

        let summary = dashboard_summary(&stats, &books, &earned);

        assert_eq!(summary.level.level, 5);
        assert_eq!(summary.badges_earned, 4);
        let recent: Vec<_> = summary
            .recent_awards
            .iter()
            .map(|b| b.badge_id.as_str())
            .collect();
        assert_eq!(recent, vec!["pages_1000", "night_reader", "streak_10"]);
        assert_eq!(summary.level.xp_into_level, 450);
        assert_eq!(summary.goal_percent, 40.0);
        assert_eq!(summary.currently_reading, 1);
        assert_eq!(summary.badges_total, 6);
    }
}
