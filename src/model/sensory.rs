//! Sensory-intensity log entries

use serde::{Deserialize, Serialize};

/// Sensory channel an entry was logged against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SensoryType {
    Visual,
    Auditory,
    Tactile,
    Olfactory,
    Gustatory,
    Proprioceptive,
    Vestibular,
}

impl SensoryType {
    pub fn all() -> &'static [SensoryType] {
        &[
            SensoryType::Visual,
            SensoryType::Auditory,
            SensoryType::Tactile,
            SensoryType::Olfactory,
            SensoryType::Gustatory,
            SensoryType::Proprioceptive,
            SensoryType::Vestibular,
        ]
    }
}

impl std::fmt::Display for SensoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SensoryType::Visual => "visual",
            SensoryType::Auditory => "auditory",
            SensoryType::Tactile => "tactile",
            SensoryType::Olfactory => "olfactory",
            SensoryType::Gustatory => "gustatory",
            SensoryType::Proprioceptive => "proprioceptive",
            SensoryType::Vestibular => "vestibular",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for SensoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensoryType::all()
            .iter()
            .copied()
            .find(|t| t.to_string() == s.to_lowercase())
            .ok_or_else(|| format!("unknown sensory type: {}", s))
    }
}

/// How much an episode affected the day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Mild,
    Moderate,
    Severe,
}

/// A logged sensory-intensity event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensoryInput {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SensoryType,
    /// 1 (mild) to 10 (intense)
    pub intensity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coping: Option<Vec<String>>,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SensoryInput {
    pub fn new(id: impl Into<String>, kind: SensoryType, intensity: u8, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            kind,
            intensity,
            trigger: None,
            coping: None,
            timestamp,
            location: None,
            duration: None,
            impact: None,
            notes: None,
        }
    }

    /// Builder: set trigger, an empty string means none
    pub fn trigger(mut self, trigger: impl Into<String>) -> Self {
        let trigger = trigger.into();
        self.trigger = (!trigger.is_empty()).then_some(trigger);
        self
    }

    /// Builder: set coping strategies, an empty list means none
    pub fn coping(mut self, coping: Vec<String>) -> Self {
        self.coping = (!coping.is_empty()).then_some(coping);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_optionals_are_omitted() {
        let entry = SensoryInput::new("1700000000000", SensoryType::Auditory, 6, 1_700_000_000_000)
            .trigger("")
            .coping(vec![]);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "auditory");
        assert!(json.get("trigger").is_none());
        assert!(json.get("coping").is_none());
    }

    #[test]
    fn test_reads_stored_entry() {
        let stored = r#"{"id":"1","type":"tactile","intensity":5,"trigger":"Tags in clothing","coping":["Fidget toys"],"timestamp":10}"#;
        let entry: SensoryInput = serde_json::from_str(stored).unwrap();

        assert_eq!(entry.kind, SensoryType::Tactile);
        assert_eq!(entry.trigger.as_deref(), Some("Tags in clothing"));
        assert_eq!(entry.coping, Some(vec!["Fidget toys".to_string()]));
        assert_eq!(entry.impact, None);
    }
}
