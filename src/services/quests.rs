// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest and challenge progress, confirmation and rewards.
//!
//! Progress is advanced automatically from reading activity, but a quest or
//! challenge only completes when the user confirms it after reaching the
//! target.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{Challenge, ChallengeKind, ProgressUnit, Quest, QuestKind, UserStats};
use crate::services::progress::{grant_xp, LevelUpEvent};
use crate::time_utils::{end_of_day, end_of_month, end_of_week};

/// Reading activity that can advance quests and challenges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// A daily log of this many pages
    Logged { pages: u32 },
    /// A book reached its last page
    BookFinished,
}

impl Activity {
    /// Amount this activity contributes towards `unit`.
    fn amount_for(&self, unit: &ProgressUnit) -> u32 {
        match (self, unit) {
            (Activity::Logged { pages }, ProgressUnit::Pages) => *pages,
            (Activity::Logged { .. }, ProgressUnit::Sessions) => 1,
            (Activity::BookFinished, ProgressUnit::Books) => 1,
            _ => 0,
        }
    }
}

/// Advance every open quest and challenge that counts this activity.
pub fn record_activity(
    quests: &mut [Quest],
    challenges: &mut [Challenge],
    activity: Activity,
    now: DateTime<Utc>,
) {
    let today = now.date_naive();

    for quest in quests.iter_mut().filter(|q| q.is_open(now)) {
        let amount = activity.amount_for(&quest.unit);
        if amount > 0 {
            quest.current = quest.current.saturating_add(amount);
            tracing::debug!(quest = quest.id, current = quest.current, "Quest progress");
        }
    }

    for challenge in challenges.iter_mut().filter(|c| c.is_open(today)) {
        let amount = activity.amount_for(&challenge.unit);
        if amount > 0 {
            challenge.current = challenge.current.saturating_add(amount);
            tracing::debug!(
                challenge = challenge.id,
                current = challenge.current,
                "Challenge progress"
            );
        }
    }
}

/// Confirm a quest whose target has been reached and award its XP.
pub fn complete_quest(
    quests: &mut [Quest],
    stats: &mut UserStats,
    quest_id: u64,
    now: DateTime<Utc>,
) -> Result<Option<LevelUpEvent>> {
    let quest = quests
        .iter_mut()
        .find(|q| q.id == quest_id)
        .ok_or_else(|| AppError::NotFound(format!("Quest {} not found", quest_id)))?;

    if quest.is_completed {
        return Err(AppError::BadRequest(format!(
            "Quest {} is already completed",
            quest_id
        )));
    }
    if quest.is_expired(now) {
        return Err(AppError::BadRequest(format!("Quest {} has expired", quest_id)));
    }
    if quest.current < quest.target {
        return Err(AppError::BadRequest(format!(
            "Quest {} is at {}/{}",
            quest_id, quest.current, quest.target
        )));
    }

    quest.is_completed = true;
    let level_up = grant_xp(stats, u64::from(quest.xp_reward));

    tracing::info!(
        quest = quest_id,
        xp_reward = quest.xp_reward,
        total_xp = stats.xp,
        "Quest completed"
    );

    Ok(level_up)
}

/// Join a challenge. Returns `false` if it was already joined.
pub fn join_challenge(challenges: &mut [Challenge], challenge_id: u64) -> Result<bool> {
    let challenge = find_challenge(challenges, challenge_id)?;

    if challenge.is_completed {
        return Err(AppError::BadRequest(format!(
            "Challenge {} is already completed",
            challenge_id
        )));
    }
    if challenge.is_active {
        return Ok(false);
    }

    challenge.is_active = true;
    challenge.participants = challenge.participants.saturating_add(1);

    tracing::info!(
        challenge = challenge_id,
        participants = challenge.participants,
        "Joined challenge"
    );

    Ok(true)
}

/// Confirm a joined challenge whose target has been reached and award its XP.
pub fn complete_challenge(
    challenges: &mut [Challenge],
    stats: &mut UserStats,
    challenge_id: u64,
    today: NaiveDate,
) -> Result<Option<LevelUpEvent>> {
    let challenge = find_challenge(challenges, challenge_id)?;

    if challenge.is_completed {
        return Err(AppError::BadRequest(format!(
            "Challenge {} is already completed",
            challenge_id
        )));
    }
    if !challenge.is_active {
        return Err(AppError::BadRequest(format!(
            "Challenge {} has not been joined",
            challenge_id
        )));
    }
    if challenge.is_past_deadline(today) {
        return Err(AppError::BadRequest(format!(
            "Challenge {} ended on {}",
            challenge_id, challenge.deadline
        )));
    }
    if challenge.current < challenge.target {
        return Err(AppError::BadRequest(format!(
            "Challenge {} is at {}/{}",
            challenge_id, challenge.current, challenge.target
        )));
    }

    challenge.is_completed = true;
    challenge.is_active = false;
    let level_up = grant_xp(stats, u64::from(challenge.xp_reward));

    tracing::info!(
        challenge = challenge_id,
        reward = %challenge.reward,
        xp_reward = challenge.xp_reward,
        "Challenge completed"
    );

    Ok(level_up)
}

fn find_challenge(challenges: &mut [Challenge], challenge_id: u64) -> Result<&mut Challenge> {
    challenges
        .iter_mut()
        .find(|c| c.id == challenge_id)
        .ok_or_else(|| AppError::NotFound(format!("Challenge {} not found", challenge_id)))
}

/// Time left before a quest expires, at display granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum TimeRemaining {
    Expired,
    Days { days: i64 },
    HoursMinutes { hours: i64, minutes: i64 },
    Minutes { minutes: i64 },
}

impl std::fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRemaining::Expired => write!(f, "expired"),
            TimeRemaining::Days { days } => write!(f, "{}d left", days),
            TimeRemaining::HoursMinutes { hours, minutes } => {
                write!(f, "{}h {}m left", hours, minutes)
            }
            TimeRemaining::Minutes { minutes } => write!(f, "{}m left", minutes),
        }
    }
}

pub fn time_remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let diff = expires_at - now;
    if diff <= Duration::zero() {
        return TimeRemaining::Expired;
    }

    let hours = diff.num_hours();
    let minutes = diff.num_minutes() % 60;

    if hours > 24 {
        TimeRemaining::Days { days: hours / 24 }
    } else if hours > 0 {
        TimeRemaining::HoursMinutes { hours, minutes }
    } else {
        TimeRemaining::Minutes { minutes }
    }
}

/// Starter quests for a new session.
pub fn default_quests(now: DateTime<Utc>) -> Vec<Quest> {
    let today = now.date_naive();
    let end_of_today = end_of_day(today);
    let end_of_this_week = end_of_day(end_of_week(today));

    vec![
        Quest {
            id: 1,
            title: "Daily reading".to_string(),
            description: "Read 30 pages today".to_string(),
            kind: QuestKind::Daily,
            target: 30,
            current: 0,
            unit: ProgressUnit::Pages,
            xp_reward: 50,
            is_completed: false,
            expires_at: end_of_today,
        },
        Quest {
            id: 2,
            title: "Show up".to_string(),
            description: "Log one reading session today".to_string(),
            kind: QuestKind::Daily,
            target: 1,
            current: 0,
            unit: ProgressUnit::Sessions,
            xp_reward: 40,
            is_completed: false,
            expires_at: end_of_today,
        },
        Quest {
            id: 3,
            title: "Weekly goal".to_string(),
            description: "Finish 2 books this week".to_string(),
            kind: QuestKind::Weekly,
            target: 2,
            current: 0,
            unit: ProgressUnit::Books,
            xp_reward: 200,
            is_completed: false,
            expires_at: end_of_this_week,
        },
    ]
}

/// Replace expired starter quests with fresh ones for the current period.
///
/// Quests that are not part of the starter set are left alone. Returns the
/// number of quests renewed.
pub fn renew_expired_quests(quests: &mut Vec<Quest>, now: DateTime<Utc>) -> usize {
    let mut renewed = 0;
    for fresh in default_quests(now) {
        match quests.iter_mut().find(|q| q.id == fresh.id) {
            Some(existing) if existing.is_expired(now) => {
                *existing = fresh;
                renewed += 1;
            }
            Some(_) => {}
            None => {
                quests.push(fresh);
                renewed += 1;
            }
        }
    }

    if renewed > 0 {
        tracing::info!(renewed, "Renewed expired quests");
    }
    renewed
}

/// Starter challenges for a new session. None are joined.
pub fn default_challenges(today: NaiveDate) -> Vec<Challenge> {
    vec![
        Challenge {
            id: 1,
            title: "Monthly pages".to_string(),
            description: "Read 300 pages this month".to_string(),
            kind: ChallengeKind::Monthly,
            target: 300,
            current: 0,
            unit: ProgressUnit::Pages,
            reward: "Monthly Reader medal".to_string(),
            xp_reward: 500,
            deadline: end_of_month(today),
            participants: 0,
            is_active: false,
            is_completed: false,
        },
        Challenge {
            id: 2,
            title: "7-day book".to_string(),
            description: "Finish a book within 7 days".to_string(),
            kind: ChallengeKind::Weekly,
            target: 1,
            current: 0,
            unit: ProgressUnit::Books,
            reward: "Speed Reader medal".to_string(),
            xp_reward: 300,
            deadline: today + Duration::days(7),
            participants: 0,
            is_active: false,
            is_completed: false,
        },
    ]
}
