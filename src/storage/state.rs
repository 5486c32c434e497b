//! Persisted application state
//!
//! Each top-level slice is serialized under its own key with no envelope,
//! version field or checksum. A missing key loads the built-in default; a
//! key that is present but does not parse is an error.

use crate::catalog;
use crate::model::{MoodEntry, RoutineStore, SensoryInput, Tracker, UserPreferences};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::kv::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const TRACKERS_KEY: &str = "trackers";
pub const PREFERENCES_KEY: &str = "preferences";
pub const ROUTINE_TASKS_KEY: &str = "routineTasks";
pub const SENSORY_ENTRIES_KEY: &str = "sensoryEntries";
pub const MOOD_ENTRIES_KEY: &str = "moodEntries";

/// All state slices the app persists
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub trackers: Vec<Tracker>,
    pub preferences: UserPreferences,
    pub routine_tasks: RoutineStore,
    pub sensory_entries: Vec<SensoryInput>,
    pub mood_entries: Vec<MoodEntry>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            trackers: catalog::initial_trackers(),
            preferences: UserPreferences::default(),
            routine_tasks: RoutineStore::default(),
            sensory_entries: Vec::new(),
            mood_entries: Vec::new(),
        }
    }
}

impl AppState {
    /// Read every slice, falling back to defaults only for absent keys
    pub fn load(store: &dyn KeyValueStore) -> StorageResult<Self> {
        let defaults = Self::default();

        let state = Self {
            trackers: load_slice(store, TRACKERS_KEY)?.unwrap_or(defaults.trackers),
            preferences: load_slice(store, PREFERENCES_KEY)?.unwrap_or(defaults.preferences),
            routine_tasks: load_slice(store, ROUTINE_TASKS_KEY)?.unwrap_or_default(),
            sensory_entries: load_slice(store, SENSORY_ENTRIES_KEY)?.unwrap_or_default(),
            mood_entries: load_slice(store, MOOD_ENTRIES_KEY)?.unwrap_or_default(),
        };

        tracing::debug!(
            trackers = state.trackers.len(),
            routine_tasks = state.routine_tasks.tasks().len(),
            sensory_entries = state.sensory_entries.len(),
            mood_entries = state.mood_entries.len(),
            "Loaded state"
        );

        Ok(state)
    }

    /// Write every slice
    pub fn save(&self, store: &mut dyn KeyValueStore) -> StorageResult<()> {
        save_slice(store, TRACKERS_KEY, &self.trackers)?;
        save_slice(store, PREFERENCES_KEY, &self.preferences)?;
        save_slice(store, ROUTINE_TASKS_KEY, &self.routine_tasks)?;
        save_slice(store, SENSORY_ENTRIES_KEY, &self.sensory_entries)?;
        save_slice(store, MOOD_ENTRIES_KEY, &self.mood_entries)?;
        Ok(())
    }

    /// Largest millisecond embedded in any entry, used to seed the id clock
    pub fn latest_timestamp(&self) -> i64 {
        let sensory = self.sensory_entries.iter().map(|e| e.timestamp);
        let moods = self.mood_entries.iter().map(|e| e.timestamp);
        let tasks = self
            .routine_tasks
            .tasks()
            .iter()
            .filter_map(|t| t.id.strip_prefix("task-")?.parse::<i64>().ok());

        sensory.chain(moods).chain(tasks).max().unwrap_or(0)
    }
}

fn load_slice<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> StorageResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })
}

fn save_slice<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> StorageResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewRoutineTask, SensoryType, Theme, TimeOfDay};
    use crate::storage::kv::MemoryStore;

    #[test]
    fn test_empty_store_loads_defaults() {
        let store = MemoryStore::new();
        let state = AppState::load(&store).unwrap();

        assert_eq!(state, AppState::default());
        assert_eq!(state.trackers.len(), 3);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut state = AppState::default();

        state.trackers[0].increment();
        state.preferences.theme = Theme::Light;
        state
            .sensory_entries
            .push(SensoryInput::new("10", SensoryType::Visual, 7, 10));
        state
            .routine_tasks
            .add(NewRoutineTask::new("Walk", TimeOfDay::Afternoon), 20);

        state.save(&mut store).unwrap();
        let restored = AppState::load(&store).unwrap();

        assert_eq!(restored, state);
        assert_eq!(restored.preferences, state.preferences);
    }

    #[test]
    fn test_keys_are_plain_json() {
        let mut store = MemoryStore::new();
        AppState::default().save(&mut store).unwrap();

        assert_eq!(store.get(ROUTINE_TASKS_KEY).unwrap().as_deref(), Some("[]"));
        let prefs: serde_json::Value =
            serde_json::from_str(&store.get(PREFERENCES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(prefs["theme"], "dark");
        assert_eq!(prefs["reminderTime"], "09:00");
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let mut store = MemoryStore::new();
        store.set(TRACKERS_KEY, "{not json").unwrap();

        match AppState::load(&store) {
            Err(StorageError::Malformed { key, .. }) => assert_eq!(key, TRACKERS_KEY),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_each_key_falls_back_independently() {
        let mut store = MemoryStore::new();
        store.set(TRACKERS_KEY, "[]").unwrap();

        let state = AppState::load(&store).unwrap();
        assert!(state.trackers.is_empty());
        assert_eq!(state.preferences, UserPreferences::default());
    }

    #[test]
    fn test_latest_timestamp() {
        let mut state = AppState::default();
        assert_eq!(state.latest_timestamp(), 0);

        state
            .sensory_entries
            .push(SensoryInput::new("5", SensoryType::Visual, 7, 5));
        state
            .routine_tasks
            .add(NewRoutineTask::new("Walk", TimeOfDay::Morning), 9);

        assert_eq!(state.latest_timestamp(), 9);
    }
}
