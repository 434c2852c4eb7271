// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quests and challenges: targets the user works towards for bonus XP.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// What a quest or challenge counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ProgressUnit {
    /// Advanced by pages logged
    Pages,
    /// Advanced by books finished
    Books,
    /// Advanced by one per daily log
    Sessions,
    /// Only advanced by hand
    Custom(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum QuestKind {
    Daily,
    Weekly,
}

/// A short-lived personal task.
///
/// Stored under the `quests` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub kind: QuestKind,
    pub target: u32,
    pub current: u32,
    pub unit: ProgressUnit,
    pub xp_reward: u32,
    /// Set only by explicit confirmation once `current >= target`
    pub is_completed: bool,
    pub expires_at: DateTime<Utc>,
}

impl Quest {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Still accepting progress.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && !self.is_expired(now)
    }

    /// Target reached but not yet confirmed.
    pub fn is_ready(&self, now: DateTime<Utc>) -> bool {
        self.is_open(now) && self.current >= self.target
    }

    pub fn percent(&self) -> f64 {
        progress_percent(self.current, self.target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    Monthly,
    Weekly,
    Special,
}

/// A longer goal the user opts into.
///
/// Stored under the `challenges` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub kind: ChallengeKind,
    pub target: u32,
    pub current: u32,
    pub unit: ProgressUnit,
    /// Medal label shown on completion
    pub reward: String,
    pub xp_reward: u32,
    /// Last day on which the challenge can be completed
    pub deadline: NaiveDate,
    pub participants: u32,
    /// Joined and not yet completed
    pub is_active: bool,
    pub is_completed: bool,
}

/// Where a challenge sits in the challenge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeState {
    Active,
    Available,
    Completed,
}

impl Challenge {
    pub fn state(&self) -> ChallengeState {
        match (self.is_active, self.is_completed) {
            (_, true) => ChallengeState::Completed,
            (true, false) => ChallengeState::Active,
            (false, false) => ChallengeState::Available,
        }
    }

    pub fn is_past_deadline(&self, today: NaiveDate) -> bool {
        today > self.deadline
    }

    /// Joined, unfinished and within the deadline.
    pub fn is_open(&self, today: NaiveDate) -> bool {
        self.state() == ChallengeState::Active && !self.is_past_deadline(today)
    }

    pub fn is_ready(&self, today: NaiveDate) -> bool {
        self.is_open(today) && self.current >= self.target
    }

    pub fn percent(&self) -> f64 {
        progress_percent(self.current, self.target)
    }
}

fn progress_percent(current: u32, target: u32) -> f64 {
    if target == 0 {
        return 100.0;
    }
    (f64::from(current) / f64::from(target) * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_challenge(is_active: bool, is_completed: bool) -> Challenge {
        Challenge {
            id: 1,
            title: "March pages".to_string(),
            description: "Read 300 pages this month".to_string(),
            kind: ChallengeKind::Monthly,
            target: 300,
            current: 145,
            unit: ProgressUnit::Pages,
            reward: "Monthly Reader medal".to_string(),
            xp_reward: 500,
            deadline: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            participants: 1247,
            is_active,
            is_completed,
        }
    }

    #[test]
    fn test_challenge_state() {
        assert_eq!(make_challenge(true, false).state(), ChallengeState::Active);
        assert_eq!(
            make_challenge(false, false).state(),
            ChallengeState::Available
        );
        assert_eq!(
            make_challenge(false, true).state(),
            ChallengeState::Completed
        );
    }

    #[test]
    fn test_percent_is_capped() {
        let mut challenge = make_challenge(true, false);
        assert!((challenge.percent() - 48.333).abs() < 0.01);

        challenge.current = 450;
        assert_eq!(challenge.percent(), 100.0);
    }

    #[test]
    fn test_quest_readiness() {
        let quest = Quest {
            id: 1,
            title: "Daily reading".to_string(),
            description: "Read 30 pages today".to_string(),
            kind: QuestKind::Daily,
            target: 30,
            current: 30,
            unit: ProgressUnit::Pages,
            xp_reward: 50,
            is_completed: false,
            expires_at: Utc.with_ymd_and_hms(2024, 3, 8, 23, 59, 59).unwrap(),
        };

        let before = Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();

        assert!(quest.is_ready(before));
        assert!(!quest.is_ready(after));
    }

    #[test]
    fn test_custom_unit_round_trips() {
        let unit = ProgressUnit::Custom("new genre".to_string());
        let json = serde_json::to_string(&unit).unwrap();
        assert_eq!(json, r#"{"custom":"new genre"}"#);
        assert_eq!(serde_json::from_str::<ProgressUnit>(&json).unwrap(), unit);
    }
}
