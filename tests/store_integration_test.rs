// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::Duration;
use reading_tracker::db::{keys, LocalStore};
use reading_tracker::models::{Book, Theme, UserStats};
use reading_tracker::Session;
use std::fs;

mod common;
use common::{log_input, new_book, test_now};

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path());
    let now = test_now();

    let mut session = Session::load(&store, now, 12);
    session.add_book(new_book("Dune", 412)).unwrap();
    session.log_reading(log_input(25, 22), now).unwrap();
    session.toggle_theme();
    session.save(&store).unwrap();

    assert!(dir.path().join("stats.json").exists());
    assert!(dir.path().join("books.json").exists());

    let reopened = Session::load(&LocalStore::open(dir.path()), now, 12);
    assert_eq!(reopened, session);
    assert_eq!(reopened.theme, Theme::Dark);
    assert_eq!(reopened.stats.night_reading_sessions, 1);
}

#[test]
fn test_corrupt_snapshot_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stats.json"), "{ not json").unwrap();
    fs::write(dir.path().join("books.json"), "[{\"id\": \"one\"}]").unwrap();

    let session = Session::load(&LocalStore::open(dir.path()), test_now(), 18);

    assert_eq!(session.stats.xp, 0);
    assert_eq!(session.stats.reading_goal, 18);
    assert!(session.books.is_empty());
    assert_eq!(session.quests.len(), 3);
}

#[test]
fn test_missing_stats_fields_use_defaults() {
    let store = LocalStore::in_memory();
    store.put_raw(keys::STATS, r#"{"xp": 1200, "booksRead": 3}"#).unwrap();

    let stats: UserStats = store.load(keys::STATS);

    assert_eq!(stats.xp, 1200);
    assert_eq!(stats.books_read, 3);
    assert_eq!(stats.streak, 0);
    assert_eq!(stats.level(), 3);
}

#[test]
fn test_stats_without_goal_get_configured_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stats.json"), r#"{"xp":1200,"booksRead":3}"#).unwrap();

    let session = Session::load(&LocalStore::open(dir.path()), test_now(), 12);

    assert_eq!(session.stats.xp, 1200);
    assert_eq!(session.stats.reading_goal, 12);
    assert_eq!(session.dashboard().goal_percent, 25.0);
}

#[test]
fn test_expired_daily_quests_renew_on_load() {
    let store = LocalStore::in_memory();
    let now = test_now();

    let mut session = Session::load(&store, now, 12);
    session.log_reading(log_input(30, 10), now).unwrap();
    session.complete_quest(1, now).unwrap();
    session.save(&store).unwrap();

    // Two days later, still the same week
    let later = now + Duration::days(2);
    let reloaded = Session::load(&store, later, 12);

    let daily = &reloaded.quests[0];
    assert!(!daily.is_completed);
    assert_eq!(daily.current, 0);
    assert!(daily.expires_at > later);

    let weekly = &reloaded.quests[2];
    assert_eq!(weekly, &session.quests[2]);
}

#[test]
fn test_save_does_not_leave_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path().join("nested"));
    let books: Vec<Book> = Vec::new();

    store.save(keys::BOOKS, &books).unwrap();

    let names: Vec<_> = fs::read_dir(dir.path().join("nested"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["books.json".to_string()]);
}
