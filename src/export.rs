//! CSV export of the sensory and mood logs

use crate::model::{MoodEntry, SensoryInput};
use chrono::{Local, TimeZone};
use serde::Serialize;
use std::io::Write;

/// One sensory log row
#[derive(Debug, Serialize)]
struct SensoryRow<'a> {
    timestamp: i64,
    time: String,
    #[serde(rename = "type")]
    kind: String,
    intensity: u8,
    trigger: &'a str,
    coping: String,
    notes: &'a str,
}

#[derive(Debug, Serialize)]
struct MoodRow<'a> {
    timestamp: i64,
    time: String,
    mood: &'a str,
    emoji: &'a str,
    intensity: i8,
}

/// Local RFC 3339 time for a Unix millisecond, empty when out of range
fn local_time(ms: i64) -> String {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}

/// Write the sensory log as CSV, oldest first; coping strategies are `;`-joined
pub fn write_sensory_csv<W: Write>(entries: &[SensoryInput], writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);

    for entry in entries {
        out.serialize(SensoryRow {
            timestamp: entry.timestamp,
            time: local_time(entry.timestamp),
            kind: entry.kind.to_string(),
            intensity: entry.intensity,
            trigger: entry.trigger.as_deref().unwrap_or(""),
            coping: entry.coping.as_deref().unwrap_or(&[]).join("; "),
            notes: entry.notes.as_deref().unwrap_or(""),
        })?;
    }

    out.flush()?;
    Ok(())
}

pub fn write_mood_csv<W: Write>(entries: &[MoodEntry], writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);

    for entry in entries {
        out.serialize(MoodRow {
            timestamp: entry.timestamp,
            time: local_time(entry.timestamp),
            mood: &entry.mood_id,
            emoji: &entry.emoji,
            intensity: entry.intensity,
        })?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SensoryType, Valence};

    #[test]
    fn test_sensory_csv() {
        let entries = vec![
            SensoryInput::new("1", SensoryType::Auditory, 8, 1_700_000_000_000)
                .trigger("Loud noises, sirens")
                .coping(vec!["Ear plugs".into(), "Quiet spaces".into()]),
            SensoryInput::new("2", SensoryType::Visual, 3, 1_700_000_060_000),
        ];

        let mut buf = Vec::new();
        write_sensory_csv(&entries, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "timestamp,time,type,intensity,trigger,coping,notes");
        assert!(lines[1].starts_with("1700000000000,"));
        assert!(lines[1].contains(",auditory,8,\"Loud noises, sirens\",Ear plugs; Quiet spaces,"));
        assert!(lines[2].ends_with(",visual,3,,,"));
    }

    #[test]
    fn test_empty_log_writes_nothing() {
        let mut buf = Vec::new();
        write_sensory_csv(&[], &mut buf).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_mood_csv() {
        let entries = vec![MoodEntry {
            id: "5".into(),
            mood_id: "calm".into(),
            emoji: "😌".into(),
            name: "Relaxed".into(),
            valence: Valence::Positive,
            intensity: 3,
            timestamp: 5,
        }];

        let mut buf = Vec::new();
        write_mood_csv(&entries, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("timestamp,time,mood,emoji,intensity\n"));
        assert!(text.trim_end().ends_with(",calm,😌,3"));
    }
}
