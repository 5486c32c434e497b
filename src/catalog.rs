//! Static lookup tables
//!
//! Mood and sensory catalogs, quick-log presets and the trackers a fresh
//! install starts with.

use crate::model::{SensoryType, Tracker, TrackerCategory, Valence};

/// A mood the user can log
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mood {
    pub id: &'static str,
    pub emoji: &'static str,
    pub name: &'static str,
    pub valence: Valence,
    pub intensity: i8,
    /// Quick-key in the mood view
    pub shortcut: char,
}

#[derive(Debug, Clone, Copy)]
pub struct MoodCategory {
    pub name: &'static str,
    pub moods: &'static [Mood],
}

const fn mood(
    id: &'static str,
    emoji: &'static str,
    name: &'static str,
    valence: Valence,
    intensity: i8,
    shortcut: char,
) -> Mood {
    Mood {
        id,
        emoji,
        name,
        valence,
        intensity,
        shortcut,
    }
}

pub const MOOD_CATEGORIES: &[MoodCategory] = &[
    MoodCategory {
        name: "Primary Emotions",
        moods: &[
            mood("happy", "😊", "Happy", Valence::Positive, 5, 'H'),
            mood("sad", "😢", "Sad", Valence::Negative, -4, 'S'),
            mood("angry", "😠", "Angry", Valence::Negative, -3, 'A'),
            mood("excited", "🤩", "Excited", Valence::Positive, 5, 'E'),
            mood("relaxed", "😌", "Relaxed", Valence::Positive, 3, 'R'),
        ],
    },
    MoodCategory {
        name: "Complex Emotions",
        moods: &[
            mood("stressed", "😓", "Stressed", Valence::Negative, -3, 'T'),
            mood("anxious", "😰", "Anxious", Valence::Negative, -4, 'X'),
            mood("grateful", "🥰", "Grateful", Valence::Positive, 4, 'G'),
            mood("proud", "😎", "Proud", Valence::Positive, 4, 'P'),
            mood("peaceful", "🧘", "Peaceful", Valence::Positive, 3, 'L'),
        ],
    },
];

/// Every mood across all categories
pub fn moods() -> impl Iterator<Item = &'static Mood> {
    MOOD_CATEGORIES.iter().flat_map(|c| c.moods.iter())
}

/// Look up a mood by catalog id or quick-key, case-insensitively
pub fn find_mood(query: &str) -> Option<&'static Mood> {
    let query = query.trim();
    let mut chars = query.chars();
    let single = match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c.to_ascii_uppercase()),
        _ => None,
    };

    moods().find(|m| m.id.eq_ignore_ascii_case(query) || Some(m.shortcut) == single)
}

/// A sensory channel with its usual triggers and coping strategies
#[derive(Debug, Clone, Copy)]
pub struct SensoryCategory {
    pub name: &'static str,
    pub kind: SensoryType,
    pub icon: &'static str,
    pub description: &'static str,
    pub common_triggers: &'static [&'static str],
    pub coping_strategies: &'static [&'static str],
}

pub const SENSORY_CATEGORIES: &[SensoryCategory] = &[
    SensoryCategory {
        name: "Visual",
        kind: SensoryType::Visual,
        icon: "👁️",
        description: "Sensitivity to light, movement, or visual patterns",
        common_triggers: &["Bright lights", "Fluorescent lights", "Screen time", "Busy environments"],
        coping_strategies: &["Sunglasses", "Dimming lights", "Visual breaks", "Reducing screen time"],
    },
    SensoryCategory {
        name: "Auditory",
        kind: SensoryType::Auditory,
        icon: "👂",
        description: "Sensitivity to sounds and noise levels",
        common_triggers: &["Loud noises", "Background noise", "Multiple conversations", "Sudden sounds"],
        coping_strategies: &["Noise-canceling headphones", "Ear plugs", "White noise", "Quiet spaces"],
    },
    SensoryCategory {
        name: "Tactile",
        kind: SensoryType::Tactile,
        icon: "🤚",
        description: "Sensitivity to touch, textures, and physical sensations",
        common_triggers: &["Certain fabrics", "Light touch", "Tags in clothing", "Temperature changes"],
        coping_strategies: &["Comfortable clothing", "Deep pressure", "Weighted blanket", "Fidget toys"],
    },
    SensoryCategory {
        name: "Proprioceptive",
        kind: SensoryType::Proprioceptive,
        icon: "🫂",
        description: "Body awareness and position in space",
        common_triggers: &["Crowded spaces", "Physical activity", "Balance challenges"],
        coping_strategies: &["Deep pressure", "Exercise", "Weighted items", "Compression clothing"],
    },
];

pub fn sensory_category(kind: SensoryType) -> Option<&'static SensoryCategory> {
    SENSORY_CATEGORIES.iter().find(|c| c.kind == kind)
}

/// One-tap sensory log with a preset intensity
#[derive(Debug, Clone, Copy)]
pub struct QuickSensoryInput {
    pub kind: SensoryType,
    pub icon: &'static str,
    pub name: &'static str,
    pub intensity: u8,
}

pub const QUICK_SENSORY_INPUTS: &[QuickSensoryInput] = &[
    QuickSensoryInput { kind: SensoryType::Visual, icon: "👁️", name: "Visual", intensity: 7 },
    QuickSensoryInput { kind: SensoryType::Auditory, icon: "👂", name: "Auditory", intensity: 6 },
    QuickSensoryInput { kind: SensoryType::Tactile, icon: "🤚", name: "Touch", intensity: 5 },
    QuickSensoryInput { kind: SensoryType::Vestibular, icon: "🌀", name: "Movement", intensity: 4 },
];

pub fn quick_sensory_input(kind: SensoryType) -> Option<&'static QuickSensoryInput> {
    QUICK_SENSORY_INPUTS.iter().find(|q| q.kind == kind)
}

/// Colours offered when adding a tracker, with their hex values
pub const TRACKER_COLORS: &[(&str, &str)] = &[
    ("blue", "#3b82f6"),
    ("purple", "#8b5cf6"),
    ("green", "#10b981"),
];

/// Resolve a colour name to hex, passing hex strings through
pub fn tracker_color(name: &str) -> Option<&'static str> {
    TRACKER_COLORS
        .iter()
        .find(|(n, hex)| n.eq_ignore_ascii_case(name) || hex.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

/// Trackers a fresh install starts with
pub fn initial_trackers() -> Vec<Tracker> {
    vec![
        Tracker::new("1", "Sensory Overload", "🌊", "episodes", "#3b82f6")
            .category(TrackerCategory::Sensory),
        Tracker::new("2", "Stim Sessions", "🔄", "minutes", "#8b5cf6")
            .category(TrackerCategory::Stim),
        Tracker::new("3", "Social Interactions", "👥", "interactions", "#10b981")
            .category(TrackerCategory::Social),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_mood_shortcuts_are_unique() {
        let keys: HashSet<char> = moods().map(|m| m.shortcut).collect();
        assert_eq!(keys.len(), moods().count());
        assert_eq!(moods().count(), 10);
    }

    #[test]
    fn test_find_mood() {
        assert_eq!(find_mood("anxious").map(|m| m.name), Some("Anxious"));
        assert_eq!(find_mood("x").map(|m| m.id), Some("anxious"));
        assert_eq!(find_mood("L").map(|m| m.id), Some("peaceful"));
        assert!(find_mood("bored").is_none());
    }

    #[test]
    fn test_negative_moods_have_negative_intensity() {
        for m in moods() {
            match m.valence {
                Valence::Positive => assert!(m.intensity > 0, "{}", m.id),
                Valence::Negative => assert!(m.intensity < 0, "{}", m.id),
            }
        }
    }

    #[test]
    fn test_sensory_lookups() {
        let auditory = sensory_category(SensoryType::Auditory).unwrap();
        assert!(auditory.common_triggers.contains(&"Loud noises"));
        assert!(sensory_category(SensoryType::Gustatory).is_none());

        assert_eq!(quick_sensory_input(SensoryType::Vestibular).unwrap().intensity, 4);
        assert!(quick_sensory_input(SensoryType::Olfactory).is_none());
    }

    #[test]
    fn test_initial_trackers() {
        let trackers = initial_trackers();
        assert_eq!(trackers.len(), 3);
        assert!(trackers.iter().all(|t| t.count == 0));
        assert_eq!(trackers[1].category, Some(TrackerCategory::Stim));
    }

    #[test]
    fn test_tracker_color() {
        assert_eq!(tracker_color("Purple"), Some("#8b5cf6"));
        assert_eq!(tracker_color("#10b981"), Some("#10b981"));
        assert_eq!(tracker_color("red"), None);
    }
}
