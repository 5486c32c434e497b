//! Habit counters shown on the home view

use serde::{Deserialize, Serialize};

/// Grouping tag for a tracker
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrackerCategory {
    Wellbeing,
    Social,
    Regulation,
    Sensory,
    Interests,
    Routine,
    Stim,
    Communication,
}

impl TrackerCategory {
    pub fn all() -> &'static [TrackerCategory] {
        &[
            TrackerCategory::Wellbeing,
            TrackerCategory::Social,
            TrackerCategory::Regulation,
            TrackerCategory::Sensory,
            TrackerCategory::Interests,
            TrackerCategory::Routine,
            TrackerCategory::Stim,
            TrackerCategory::Communication,
        ]
    }
}

impl std::fmt::Display for TrackerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TrackerCategory::Wellbeing => "wellbeing",
            TrackerCategory::Social => "social",
            TrackerCategory::Regulation => "regulation",
            TrackerCategory::Sensory => "sensory",
            TrackerCategory::Interests => "interests",
            TrackerCategory::Routine => "routine",
            TrackerCategory::Stim => "stim",
            TrackerCategory::Communication => "communication",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for TrackerCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackerCategory::all()
            .iter()
            .copied()
            .find(|c| c.to_string() == s.to_lowercase())
            .ok_or_else(|| format!("unknown tracker category: {}", s))
    }
}

/// A named counter with a unit and trend indicator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tracker {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub count: u64,
    pub unit: String,
    /// Trend as a percentage, positive means improving
    pub trend: f64,
    pub color: String,
    /// Trackers added from the home view carry no category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TrackerCategory>,
}

impl Tracker {
    /// Create a tracker with a zero count and flat trend
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        unit: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            count: 0,
            unit: unit.into(),
            trend: 0.0,
            color: color.into(),
            category: None,
        }
    }

    /// Builder: set category
    pub fn category(mut self, category: TrackerCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// Decrement, holding at zero
    pub fn decrement(&mut self) {
        if self.count > 0 {
            self.count -= 1;
        }
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }

    /// Trend label as shown on the tracker card (`+12%` / `-3%` / `0%`)
    pub fn trend_label(&self) -> String {
        if self.trend > 0.0 {
            format!("+{}%", self.trend)
        } else {
            format!("{}%", self.trend)
        }
    }
}
