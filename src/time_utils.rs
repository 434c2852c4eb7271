// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Local wall-clock time carried as a UTC timestamp.
///
/// Log hours, pace days and quest deadlines are all computed from this one
/// value, so they agree on which day it is.
pub fn wall_clock<Tz: TimeZone>(now: DateTime<Tz>) -> DateTime<Utc> {
    now.naive_local().and_utc()
}

/// Night reading window: 22:00 through 05:59.
pub fn is_night_hour(hour: u32) -> bool {
    hour >= 22 || hour <= 5
}

/// Last second of the given day, in UTC.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    date.and_time(last_second).and_utc()
}

/// Sunday of the ISO week containing `date`.
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = 6 - i64::from(date.weekday().num_days_from_monday());
    date + Duration::days(days_to_sunday)
}

/// Last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}
