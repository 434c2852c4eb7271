// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The active user's session.
//!
//! A `Session` owns all of the user's state and is passed explicitly to
//! whoever handles a user action. Each action:
//! 1. Validates its input
//! 2. Applies the engine rules
//! 3. Advances quests and challenges
//! 4. Evaluates badges
//! 5. Returns the resulting events for the caller to display

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use crate::db::{keys, LocalStore};
use crate::error::{AppError, Result};
use crate::models::{
    Book, Challenge, DailyLogInput, EarnedBadge, NewBook, OnboardingGoals, Quest, ReadingLog,
    Theme, User, UserStats,
};
use crate::services::{analytics, badges, books, progress, quests, Activity, LevelUpEvent};

/// Notifications produced by one user action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEvents {
    pub level_ups: Vec<LevelUpEvent>,
    pub badges_earned: Vec<EarnedBadge>,
    /// IDs of books that reached their last page
    pub completed_books: Vec<u64>,
}

impl SessionEvents {
    pub fn is_empty(&self) -> bool {
        self.level_ups.is_empty() && self.badges_earned.is_empty() && self.completed_books.is_empty()
    }

    /// Highest level reached during the action, if any level-up happened.
    pub fn final_level(&self) -> Option<u32> {
        self.level_ups.iter().map(|e| e.new_level).max()
    }

    fn push_level_up(&mut self, event: Option<LevelUpEvent>) {
        if let Some(event) = event {
            tracing::info!(
                previous_level = event.previous_level,
                new_level = event.new_level,
                xp_gained = event.xp_gained,
                "Level up"
            );
            self.level_ups.push(event);
        }
    }
}

/// All state belonging to the active user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub stats: UserStats,
    pub books: Vec<Book>,
    pub earned_badges: Vec<EarnedBadge>,
    pub logs: Vec<ReadingLog>,
    pub quests: Vec<Quest>,
    pub challenges: Vec<Challenge>,
    pub theme: Theme,
}

impl Session {
    /// Fresh session with starter quests and challenges.
    pub fn new(now: DateTime<Utc>, reading_goal: u32) -> Self {
        Self {
            user: User::default(),
            stats: UserStats {
                reading_goal,
                ..Default::default()
            },
            books: Vec::new(),
            earned_badges: Vec::new(),
            logs: Vec::new(),
            quests: quests::default_quests(now),
            challenges: quests::default_challenges(now.date_naive()),
            theme: Theme::default(),
        }
    }

    /// Load the session from `store`.
    ///
    /// Missing or unreadable keys fall back to the state of a fresh session,
    /// and stats without a reading goal get `default_goal`.
    pub fn load(store: &LocalStore, now: DateTime<Utc>, default_goal: u32) -> Self {
        let fresh = Self::new(now, default_goal);

        let mut session = Self {
            user: store.load(keys::USER),
            stats: store.load_opt(keys::STATS).unwrap_or(fresh.stats),
            books: store.load(keys::BOOKS),
            earned_badges: store.load(keys::BADGES),
            logs: store.load(keys::LOGS),
            quests: store.load_opt(keys::QUESTS).unwrap_or(fresh.quests),
            challenges: store
                .load_opt(keys::CHALLENGES)
                .unwrap_or(fresh.challenges),
            theme: store.load(keys::THEME),
        };
        if session.stats.reading_goal == 0 {
            session.stats.reading_goal = default_goal;
        }
        quests::renew_expired_quests(&mut session.quests, now);

        tracing::info!(
            xp = session.stats.xp,
            level = session.stats.level(),
            books = session.books.len(),
            badges = session.earned_badges.len(),
            "Session loaded"
        );

        session
    }

    /// Write every key back to `store`.
    pub fn save(&self, store: &LocalStore) -> Result<()> {
        store.save(keys::USER, &self.user)?;
        store.save(keys::STATS, &self.stats)?;
        store.save(keys::BOOKS, &self.books)?;
        store.save(keys::BADGES, &self.earned_badges)?;
        store.save(keys::LOGS, &self.logs)?;
        store.save(keys::QUESTS, &self.quests)?;
        store.save(keys::CHALLENGES, &self.challenges)?;
        store.save(keys::THEME, &self.theme)?;
        Ok(())
    }

    // ─── Reading ─────────────────────────────────────────────────

    /// Record a daily reading log.
    ///
    /// When the log names a book, that book is advanced by the logged pages
    /// and may be finished by it.
    pub fn log_reading(&mut self, input: DailyLogInput, now: DateTime<Utc>) -> Result<SessionEvents> {
        input.validate()?;
        let target_page = match input.book_id {
            Some(id) => {
                let book = self.book(id)?;
                Some(i64::from(book.current_page) + i64::from(input.pages))
            }
            None => None,
        };

        let mut events = SessionEvents::default();
        events.push_level_up(progress::apply_daily_log(
            &mut self.stats,
            input.pages,
            input.hour,
        ));

        self.logs.push(ReadingLog {
            pages: input.pages,
            logged_at: now,
            hour: input.hour,
            book_id: input.book_id,
            notes: input.notes.filter(|n| !n.trim().is_empty()),
            mood: input.mood,
        });

        quests::record_activity(
            &mut self.quests,
            &mut self.challenges,
            Activity::Logged { pages: input.pages },
            now,
        );

        if let (Some(id), Some(page)) = (input.book_id, target_page) {
            self.move_book_to(id, page, now, &mut events)?;
        }

        self.award_badges(&mut events, now);
        Ok(events)
    }

    // ─── Books ───────────────────────────────────────────────────

    pub fn add_book(&mut self, input: NewBook) -> Result<&Book> {
        input.validate()?;

        let id = books::next_book_id(&self.books);
        self.books.push(books::add_book(id, input));
        let index = self.books.len() - 1;
        Ok(&self.books[index])
    }

    pub fn book(&self, book_id: u64) -> Result<&Book> {
        self.books
            .iter()
            .find(|b| b.id == book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))
    }

    fn book_mut(&mut self, book_id: u64) -> Result<&mut Book> {
        self.books
            .iter_mut()
            .find(|b| b.id == book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))
    }

    /// Set the current page of a book.
    pub fn update_book_progress(
        &mut self,
        book_id: u64,
        current_page: i64,
        now: DateTime<Utc>,
    ) -> Result<SessionEvents> {
        let mut events = SessionEvents::default();
        self.move_book_to(book_id, current_page, now, &mut events)?;
        self.award_badges(&mut events, now);
        Ok(events)
    }

    /// Move a book to `current_page`.
    ///
    /// The first time a book reaches its last page it counts towards
    /// `books_read`, book quests and challenges. Re-opening and finishing it
    /// again does not count it twice.
    fn move_book_to(
        &mut self,
        book_id: u64,
        current_page: i64,
        now: DateTime<Utc>,
        events: &mut SessionEvents,
    ) -> Result<()> {
        let book = self.book_mut(book_id)?;
        *book = books::progress_book(book, current_page);
        let first_finish = book.is_completed() && !book.was_finished();
        if first_finish {
            book.finished_at = Some(now);
        }

        tracing::info!(
            id = book_id,
            current_page = book.current_page,
            total_pages = book.total_pages,
            status = ?book.status,
            "Book progress updated"
        );

        if first_finish {
            self.stats.books_read = self.stats.books_read.saturating_add(1);
            events.completed_books.push(book_id);
            quests::record_activity(
                &mut self.quests,
                &mut self.challenges,
                Activity::BookFinished,
                now,
            );
        }
        Ok(())
    }

    pub fn pause_book(&mut self, book_id: u64) -> Result<&Book> {
        let book = self.book_mut(book_id)?;
        *book = books::pause_book(book);
        Ok(&*book)
    }

    pub fn resume_book(&mut self, book_id: u64) -> Result<&Book> {
        let book = self.book_mut(book_id)?;
        *book = books::resume_book(book);
        Ok(&*book)
    }

    // ─── Quests & Challenges ─────────────────────────────────────

    pub fn complete_quest(&mut self, quest_id: u64, now: DateTime<Utc>) -> Result<SessionEvents> {
        let mut events = SessionEvents::default();
        events.push_level_up(quests::complete_quest(
            &mut self.quests,
            &mut self.stats,
            quest_id,
            now,
        )?);
        self.award_badges(&mut events, now);
        Ok(events)
    }

    /// Join a challenge. Returns `false` if it was already joined.
    pub fn join_challenge(&mut self, challenge_id: u64) -> Result<bool> {
        quests::join_challenge(&mut self.challenges, challenge_id)
    }

    pub fn complete_challenge(
        &mut self,
        challenge_id: u64,
        now: DateTime<Utc>,
    ) -> Result<SessionEvents> {
        let mut events = SessionEvents::default();
        events.push_level_up(quests::complete_challenge(
            &mut self.challenges,
            &mut self.stats,
            challenge_id,
            now.date_naive(),
        )?);
        self.award_badges(&mut events, now);
        Ok(events)
    }

    // ─── Profile ─────────────────────────────────────────────────

    /// Store onboarding goals; the yearly goal becomes the reading goal.
    pub fn complete_onboarding(&mut self, name: Option<String>, goals: OnboardingGoals) -> Result<()> {
        goals.validate()?;

        if let Some(name) = name {
            self.user.name = name;
        }
        self.stats.reading_goal = goals.yearly_book_goal;
        self.user.goals = Some(goals);
        self.user.has_completed_onboarding = true;

        tracing::info!(
            reading_goal = self.stats.reading_goal,
            "Onboarding completed"
        );
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn dashboard(&self) -> analytics::DashboardSummary {
        analytics::dashboard_summary(&self.stats, &self.books, &self.earned_badges)
    }

    fn award_badges(&mut self, events: &mut SessionEvents, now: DateTime<Utc>) {
        let awards = badges::evaluate_badges(&mut self.stats, &mut self.earned_badges, now);
        events.push_level_up(awards.level_up);
        events.badges_earned.extend(awards.earned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap()
    }

    fn new_book(total_pages: u32) -> NewBook {
        NewBook {
            title: "War and Peace".to_string(),
            author: "Leo Tolstoy".to_string(),
            total_pages,
            deadline: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        }
    }

    fn log_input(pages: u32, hour: u32) -> DailyLogInput {
        DailyLogInput {
            pages,
            hour,
            book_id: None,
            notes: None,
            mood: None,
        }
    }

    #[test]
    fn test_log_reading_records_history_and_quests() {
        let mut session = Session::new(now(), 12);

        let events = session.log_reading(log_input(30, 14), now()).unwrap();

        assert!(events.is_empty());
        assert_eq!(session.stats.xp, 300);
        assert_eq!(session.logs.len(), 1);
        assert_eq!(session.quests[0].current, 30);
        assert!(session.quests[0].is_ready(now()));
    }

    #[test]
    fn test_invalid_log_is_rejected() {
        let mut session = Session::new(now(), 12);

        let err = session.log_reading(log_input(0, 14), now()).unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(session.stats, Session::new(now(), 12).stats);
        assert!(session.logs.is_empty());
    }

    #[test]
    fn test_night_log_earns_badge_and_level() {
        let mut session = Session::new(now(), 12);
        session.stats.xp = 400;

        let events = session.log_reading(log_input(5, 23), now()).unwrap();

        // 400 + 50 = 450, then night_reader +150 = 600
        assert_eq!(session.stats.xp, 600);
        assert_eq!(events.badges_earned.len(), 1);
        assert_eq!(events.badges_earned[0].badge_id, "night_reader");
        assert_eq!(events.level_ups.len(), 1);
        assert_eq!(events.final_level(), Some(2));
    }

    #[test]
    fn test_finishing_book_counts_once() {
        let mut session = Session::new(now(), 12);
        let id = session.add_book(new_book(100)).unwrap().id;

        let events = session.update_book_progress(id, 150, now()).unwrap();
        assert_eq!(events.completed_books, vec![id]);
        assert_eq!(session.stats.books_read, 1);
        assert_eq!(events.badges_earned[0].badge_id, "first_book");

        let events = session.update_book_progress(id, 100, now()).unwrap();
        assert!(events.is_empty());
        assert_eq!(session.stats.books_read, 1);
        assert_eq!(session.quests[2].current, 1);
    }

    #[test]
    fn test_refinishing_book_does_not_count_again() {
        let mut session = Session::new(now(), 12);
        session.join_challenge(2).unwrap();
        let id = session.add_book(new_book(1)).unwrap().id;

        for _ in 0..5 {
            session.update_book_progress(id, 1, now()).unwrap();
            session.update_book_progress(id, 0, now()).unwrap();
        }

        assert_eq!(session.stats.books_read, 1);
        assert_eq!(session.quests[2].current, 1);
        assert_eq!(session.challenges[1].current, 1);
        assert_eq!(session.book(id).unwrap().finished_at, Some(now()));
        assert!(session.complete_quest(3, now()).is_err());
    }

    #[test]
    fn test_log_advances_named_book() {
        let mut session = Session::new(now(), 12);
        let id = session.add_book(new_book(100)).unwrap().id;
        let input = DailyLogInput {
            book_id: Some(id),
            mood: Some(Mood::Good),
            ..log_input(40, 20)
        };

        let events = session.log_reading(input.clone(), now()).unwrap();
        assert!(events.completed_books.is_empty());
        assert_eq!(session.book(id).unwrap().current_page, 40);
        assert_eq!(session.logs[0].book_id, Some(id));
        assert_eq!(session.logs[0].mood, Some(Mood::Good));

        session.log_reading(input.clone(), now()).unwrap();
        let events = session.log_reading(input, now()).unwrap();
        assert_eq!(session.book(id).unwrap().current_page, 100);
        assert_eq!(events.completed_books, vec![id]);
        assert_eq!(session.stats.books_read, 1);
    }

    #[test]
    fn test_log_for_unknown_book_changes_nothing() {
        let mut session = Session::new(now(), 12);
        let input = DailyLogInput {
            book_id: Some(9),
            ..log_input(40, 20)
        };

        let err = session.log_reading(input, now()).unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(session, Session::new(now(), 12));
    }

    #[test]
    fn test_load_fills_missing_reading_goal() {
        let store = LocalStore::in_memory();
        store
            .put_raw(keys::STATS, r#"{"xp": 1200, "booksRead": 3}"#)
            .unwrap();

        let loaded = Session::load(&store, now(), 15);

        assert_eq!(loaded.stats.xp, 1200);
        assert_eq!(loaded.stats.reading_goal, 15);
        assert_eq!(loaded.stats.goal_percent(), 20.0);
    }

    #[test]
    fn test_unknown_book() {
        let mut session = Session::new(now(), 12);
        let err = session.update_book_progress(42, 10, now()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_onboarding_sets_goal() {
        let mut session = Session::new(now(), 12);
        let goals = OnboardingGoals {
            yearly_book_goal: 24,
            ..Default::default()
        };

        session
            .complete_onboarding(Some("Ada".to_string()), goals)
            .unwrap();

        assert_eq!(session.stats.reading_goal, 24);
        assert!(session.user.has_completed_onboarding);
        assert_eq!(session.user.display_name(), "Ada");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = LocalStore::in_memory();
        let mut session = Session::new(now(), 12);
        session.add_book(new_book(300)).unwrap();
        session.log_reading(log_input(120, 23), now()).unwrap();
        session.toggle_theme();

        session.save(&store).unwrap();
        let loaded = Session::load(&store, now(), 12);

        assert_eq!(loaded, session);
    }

    #[test]
    fn test_load_empty_store_is_fresh() {
        let store = LocalStore::in_memory();
        let loaded = Session::load(&store, now(), 15);

        assert_eq!(loaded, Session::new(now(), 15));
    }
}
