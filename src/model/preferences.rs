//! User preferences, persisted wholesale

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(format!("unknown theme: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    Grid,
    List,
}

impl std::str::FromStr for DefaultView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(DefaultView::Grid),
            "list" => Ok(DefaultView::List),
            _ => Err(format!("unknown view: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SensoryPreferences {
    pub light_sensitivity: bool,
    pub noise_sensitivity: bool,
    pub texture_sensitivity: bool,
}

impl Default for SensoryPreferences {
    fn default() -> Self {
        Self {
            light_sensitivity: true,
            noise_sensitivity: true,
            texture_sensitivity: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoutinePreferences {
    pub morning_routine: Vec<String>,
    pub evening_routine: Vec<String>,
    pub transition_alerts: bool,
}

impl Default for RoutinePreferences {
    fn default() -> Self {
        Self {
            morning_routine: Vec::new(),
            evening_routine: Vec::new(),
            transition_alerts: true,
        }
    }
}

/// User-configurable settings object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: Theme,
    pub default_view: DefaultView,
    pub notifications: bool,
    /// `HH:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensory_preferences: Option<SensoryPreferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine_preferences: Option<RoutinePreferences>,
}

/// Reminder shown when none has been picked yet
pub const DEFAULT_REMINDER_TIME: &str = "09:00";

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            default_view: DefaultView::Grid,
            notifications: true,
            reminder_time: Some(DEFAULT_REMINDER_TIME.to_string()),
            sensory_preferences: Some(SensoryPreferences::default()),
            routine_preferences: Some(RoutinePreferences::default()),
        }
    }
}

impl UserPreferences {
    /// Reminder time to display, `None` when notifications are off
    pub fn effective_reminder(&self) -> Option<&str> {
        if !self.notifications {
            return None;
        }
        Some(self.reminder_time.as_deref().unwrap_or(DEFAULT_REMINDER_TIME))
    }

    pub fn transition_alerts(&self) -> bool {
        self.routine_preferences
            .as_ref()
            .map(|r| r.transition_alerts)
            .unwrap_or(false)
    }
}

/// Check a `HH:MM` reminder string
pub fn parse_reminder_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.default_view, DefaultView::Grid);
        assert_eq!(prefs.effective_reminder(), Some("09:00"));
        assert!(prefs.transition_alerts());
    }

    #[test]
    fn test_round_trip_is_structurally_equal() {
        let mut prefs = UserPreferences::default();
        prefs.theme = Theme::System;
        prefs.reminder_time = None;
        prefs.routine_preferences = Some(RoutinePreferences {
            morning_routine: vec!["Meds".into()],
            evening_routine: vec![],
            transition_alerts: false,
        });

        let json = serde_json::to_string(&prefs).unwrap();
        let restored: UserPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(prefs, restored);
    }

    #[test]
    fn test_reminder_falls_back_and_hides() {
        let mut prefs = UserPreferences::default();
        prefs.reminder_time = None;
        assert_eq!(prefs.effective_reminder(), Some(DEFAULT_REMINDER_TIME));

        prefs.notifications = false;
        assert_eq!(prefs.effective_reminder(), None);
    }

    #[test]
    fn test_parse_reminder_time() {
        assert!(parse_reminder_time("07:30").is_some());
        assert!(parse_reminder_time("25:00").is_none());
        assert!(parse_reminder_time("morning").is_none());
    }

    #[test]
    fn test_missing_nested_sections_are_allowed() {
        let stored = r#"{"theme":"light","defaultView":"list","notifications":false}"#;
        let prefs: UserPreferences = serde_json::from_str(stored).unwrap();
        assert_eq!(prefs.sensory_preferences, None);
        assert!(!prefs.transition_alerts());
    }
}
