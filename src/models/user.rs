//! User profile, onboarding goals and display preferences.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Profile of the single local user.
///
/// Stored under the `user` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Email address (optional)
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar image path or URL
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub has_completed_onboarding: bool,
    /// Goals chosen during onboarding
    #[serde(default)]
    pub goals: Option<OnboardingGoals>,
}

impl User {
    /// Name to show, falling back to a generic label.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Reader"
        } else {
            &self.name
        }
    }
}

/// Preferred time of day for reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ReadingTime {
    Morning,
    Afternoon,
    #[default]
    Evening,
    Night,
}

/// Onboarding form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingGoals {
    #[validate(range(min = 1, max = 365))]
    pub yearly_book_goal: u32,
    #[validate(range(min = 1, max = 200))]
    pub daily_page_goal: u32,
    #[serde(default)]
    pub preferred_genres: Vec<String>,
    #[serde(default)]
    pub reading_time: ReadingTime,
}

impl Default for OnboardingGoals {
    fn default() -> Self {
        Self {
            yearly_book_goal: 12,
            daily_page_goal: 20,
            preferred_genres: Vec::new(),
            reading_time: ReadingTime::default(),
        }
    }
}

/// Color theme. Stored under the `theme` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
