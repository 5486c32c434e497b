//! Mood log entries

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Valence {
    Positive,
    Negative,
}

/// A logged mood, copied from the mood catalog at the time of logging
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    /// Catalog id (`happy`, `anxious`, ...)
    pub mood_id: String,
    pub emoji: String,
    pub name: String,
    pub valence: Valence,
    /// Signed intensity, negative moods carry negative values
    pub intensity: i8,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_fields() {
        let entry = MoodEntry {
            id: "1".into(),
            mood_id: "sad".into(),
            emoji: "😢".into(),
            name: "Sad".into(),
            valence: Valence::Negative,
            intensity: -4,
            timestamp: 1,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["moodId"], "sad");
        assert_eq!(json["valence"], "negative");
        assert_eq!(json["intensity"], -4);
    }
}
