//! Application core
//!
//! [`App`] owns the loaded state and the store it came from. Every handler
//! changes a copy of the state, writes all slices back and only then swaps
//! the copy in, so a failed write leaves memory matching the store.

pub mod error;

pub use error::{AppError, AppResult};

use crate::catalog;
use crate::chart::ChartData;
use crate::model::id::entry_id;
use crate::model::preferences::parse_reminder_time;
use crate::model::{
    IdClock, MoodEntry, NewRoutineTask, RoutineTask, RoutineTaskUpdate, SensoryInput,
    SensoryType, TimeOfDay, Tracker, TrackerCategory, UserPreferences,
};
use crate::stats::{self, CompletionStatus, MoodSummary, TrackerSummary};
use crate::storage::{AppState, KeyValueStore};
use crate::views::{dispatch_shortcut, KeyPress, LoadingGate, View};
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Fields of the "add tracker" form
#[derive(Debug, Clone, PartialEq)]
pub struct NewTracker {
    pub name: String,
    pub icon: String,
    pub unit: String,
    pub color: String,
    pub category: Option<TrackerCategory>,
}

/// Fields of the sensory log form
#[derive(Debug, Clone, PartialEq)]
pub struct SensoryForm {
    pub kind: SensoryType,
    pub intensity: u8,
    pub trigger: Option<String>,
    pub coping: Vec<String>,
    pub notes: Option<String>,
}

impl SensoryForm {
    /// Form as first shown: intensity 5, nothing selected
    pub fn new(kind: SensoryType) -> Self {
        Self {
            kind,
            intensity: 5,
            trigger: None,
            coping: Vec::new(),
            notes: None,
        }
    }
}

pub struct App<S: KeyValueStore> {
    store: S,
    state: AppState,
    view: View,
    view_opened: Instant,
    loading: LoadingGate,
    clock: IdClock,
}

fn find_tracker<'a>(trackers: &'a mut [Tracker], id: &str) -> AppResult<&'a mut Tracker> {
    trackers
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| AppError::TrackerNotFound(id.to_string()))
}

impl<S: KeyValueStore> App<S> {
    /// Load state from `store`
    pub fn open(store: S) -> AppResult<Self> {
        let state = AppState::load(&store)?;

        let mut clock = IdClock::new();
        clock.observe(state.latest_timestamp());

        Ok(Self {
            store,
            state,
            view: View::default(),
            view_opened: Instant::now(),
            loading: LoadingGate::default(),
            clock,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Apply `change` to a copy of the state and keep it only once saved
    fn commit<T>(&mut self, change: impl FnOnce(&mut AppState) -> AppResult<T>) -> AppResult<T> {
        let mut next = self.state.clone();
        let out = change(&mut next)?;
        next.save(&mut self.store)?;
        self.state = next;
        tracing::debug!("State saved");
        Ok(out)
    }

    // Views

    pub fn view(&self) -> View {
        self.view
    }

    /// Open a view; the loading placeholder restarts even for the current one
    pub fn set_view(&mut self, view: View) {
        if view != self.view {
            tracing::debug!(from = ?self.view, to = ?view, "Switching view");
            self.view = view;
        }
        self.view_opened = Instant::now();
    }

    /// Apply a keyboard shortcut, returns the view it switched to
    pub fn handle_key(&mut self, press: &KeyPress) -> Option<View> {
        let view = dispatch_shortcut(press)?;
        self.set_view(view);
        Some(view)
    }

    /// When the current view was last opened
    pub fn view_opened(&self) -> Instant {
        self.view_opened
    }

    /// Whether the current view still shows its placeholder at `now`
    pub fn is_loading_at(&self, now: Instant) -> bool {
        self.loading
            .is_loading(now.saturating_duration_since(self.view_opened))
    }

    /// Placeholder time left for the current view
    pub fn loading_remaining(&self) -> Duration {
        self.loading.remaining(self.view_opened.elapsed())
    }

    // Trackers

    pub fn trackers(&self) -> &[Tracker] {
        &self.state.trackers
    }

    pub fn increment(&mut self, id: &str) -> AppResult<u64> {
        self.commit(|state| {
            let tracker = find_tracker(&mut state.trackers, id)?;
            tracker.increment();
            Ok(tracker.count)
        })
    }

    /// Decrement a tracker, never below zero
    pub fn decrement(&mut self, id: &str) -> AppResult<u64> {
        self.commit(|state| {
            let tracker = find_tracker(&mut state.trackers, id)?;
            tracker.decrement();
            Ok(tracker.count)
        })
    }

    /// `len + 1`, skipping ids already taken
    fn next_tracker_id(&self) -> String {
        let mut n = self.state.trackers.len() + 1;
        while self.state.trackers.iter().any(|t| t.id == n.to_string()) {
            n += 1;
        }
        n.to_string()
    }

    /// The home view's one-click placeholder tracker
    pub fn add_placeholder_tracker(&mut self) -> AppResult<&Tracker> {
        let tracker = Tracker::new(self.next_tracker_id(), "New Tracker", "📝", "times", "#3b82f6");
        self.push_tracker(tracker)
    }

    pub fn add_tracker(&mut self, new: NewTracker) -> AppResult<&Tracker> {
        for (field, value) in [("name", &new.name), ("icon", &new.icon), ("unit", &new.unit)] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidInput(format!("tracker {} is required", field)));
            }
        }
        let color = catalog::tracker_color(&new.color)
            .map(str::to_string)
            .unwrap_or(new.color);

        let mut tracker = Tracker::new(
            self.next_tracker_id(),
            new.name.trim(),
            new.icon.trim(),
            new.unit.trim(),
            color,
        );
        tracker.category = new.category;
        self.push_tracker(tracker)
    }

    fn push_tracker(&mut self, tracker: Tracker) -> AppResult<&Tracker> {
        tracing::info!(id = %tracker.id, name = %tracker.name, "Added tracker");
        let index = self.commit(|state| {
            state.trackers.push(tracker);
            Ok(state.trackers.len() - 1)
        })?;
        Ok(&self.state.trackers[index])
    }

    // Sensory log

    pub fn sensory_entries(&self) -> &[SensoryInput] {
        &self.state.sensory_entries
    }

    /// Log an entry from the full form
    pub fn log_sensory(&mut self, form: SensoryForm) -> AppResult<&SensoryInput> {
        let ms = self.clock.next();
        let mut entry = SensoryInput::new(entry_id(ms), form.kind, form.intensity.clamp(1, 10), ms)
            .trigger(form.trigger.unwrap_or_default())
            .coping(form.coping);
        entry.notes = form.notes;
        self.push_sensory(entry)
    }

    /// One-tap log using the preset intensity for `kind`
    pub fn quick_sensory(&mut self, kind: SensoryType) -> AppResult<&SensoryInput> {
        let preset = catalog::quick_sensory_input(kind).ok_or_else(|| AppError::UnknownSensoryType {
            kind: kind.to_string(),
            what: "quick preset",
        })?;
        let ms = self.clock.next();
        self.push_sensory(SensoryInput::new(entry_id(ms), preset.kind, preset.intensity, ms))
    }

    fn push_sensory(&mut self, entry: SensoryInput) -> AppResult<&SensoryInput> {
        tracing::info!(kind = %entry.kind, intensity = entry.intensity, "Logged sensory input");
        let index = self.commit(|state| {
            state.sensory_entries.push(entry);
            Ok(state.sensory_entries.len() - 1)
        })?;
        Ok(&self.state.sensory_entries[index])
    }

    pub fn recent_sensory(&self) -> Vec<&SensoryInput> {
        stats::recent(&self.state.sensory_entries)
    }

    // Moods

    pub fn mood_entries(&self) -> &[MoodEntry] {
        &self.state.mood_entries
    }

    /// Log a mood by catalog id or quick-key
    pub fn log_mood(&mut self, query: &str) -> AppResult<&MoodEntry> {
        let mood = catalog::find_mood(query).ok_or_else(|| AppError::UnknownMood(query.to_string()))?;
        let ms = self.clock.next();
        let entry = MoodEntry {
            id: entry_id(ms),
            mood_id: mood.id.to_string(),
            emoji: mood.emoji.to_string(),
            name: mood.name.to_string(),
            valence: mood.valence,
            intensity: mood.intensity,
            timestamp: ms,
        };

        tracing::info!(mood = mood.id, "Logged mood");
        let index = self.commit(|state| {
            state.mood_entries.push(entry);
            Ok(state.mood_entries.len() - 1)
        })?;
        Ok(&self.state.mood_entries[index])
    }

    pub fn recent_moods(&self) -> Vec<&MoodEntry> {
        stats::recent(&self.state.mood_entries)
    }

    pub fn mood_summary(&self, now: DateTime<Local>) -> MoodSummary {
        MoodSummary::for_day(&self.state.mood_entries, now)
    }

    // Routine

    pub fn routine_tasks(&self) -> &[RoutineTask] {
        self.state.routine_tasks.tasks()
    }

    pub fn add_task(&mut self, name: &str, time_of_day: TimeOfDay) -> AppResult<&RoutineTask> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("task name is required".to_string()));
        }

        let ms = self.clock.next();
        let id = self.commit(|state| {
            Ok(state
                .routine_tasks
                .add(NewRoutineTask::new(name, time_of_day), ms)
                .id
                .clone())
        })?;
        tracing::info!(id = %id, %time_of_day, "Added routine task");
        self.task(&id)
    }

    fn task(&self, id: &str) -> AppResult<&RoutineTask> {
        self.state
            .routine_tasks
            .get(id)
            .ok_or_else(|| AppError::TaskNotFound(id.to_string()))
    }

    /// Flip a task's completion flag, returns the new value
    pub fn toggle_task(&mut self, id: &str) -> AppResult<bool> {
        self.commit(|state| {
            state
                .routine_tasks
                .toggle(id)
                .ok_or_else(|| AppError::TaskNotFound(id.to_string()))
        })
    }

    pub fn delete_task(&mut self, id: &str) -> AppResult<()> {
        self.commit(|state| {
            if state.routine_tasks.delete(id) {
                Ok(())
            } else {
                Err(AppError::TaskNotFound(id.to_string()))
            }
        })?;
        tracing::info!(id = %id, "Deleted routine task");
        Ok(())
    }

    pub fn update_task(&mut self, id: &str, mut update: RoutineTaskUpdate) -> AppResult<&RoutineTask> {
        if let Some(name) = update.name.as_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::InvalidInput("task name is required".to_string()));
            }
        }

        self.commit(|state| {
            state
                .routine_tasks
                .update(id, update)
                .map(|_| ())
                .ok_or_else(|| AppError::TaskNotFound(id.to_string()))
        })?;
        self.task(id)
    }

    pub fn completion(&self) -> Vec<CompletionStatus> {
        CompletionStatus::all(&self.state.routine_tasks)
    }

    /// Show the transition-alert marker next to this task
    pub fn shows_transition_alert(&self, task: &RoutineTask) -> bool {
        self.state.preferences.transition_alerts() && !task.completed
    }

    // Preferences

    pub fn preferences(&self) -> &UserPreferences {
        &self.state.preferences
    }

    /// Replace preferences wholesale
    pub fn save_preferences(&mut self, preferences: UserPreferences) -> AppResult<()> {
        if let Some(time) = preferences.reminder_time.as_deref() {
            if parse_reminder_time(time).is_none() {
                return Err(AppError::InvalidInput(format!(
                    "reminder time must be HH:MM, got '{}'",
                    time
                )));
            }
        }

        self.commit(|state| {
            state.preferences = preferences;
            Ok(())
        })?;
        tracing::info!("Saved preferences");
        Ok(())
    }

    // Insights

    pub fn tracker_summary(&self) -> TrackerSummary {
        TrackerSummary::from_trackers(&self.state.trackers)
    }

    /// Counts of every tracker, labelled by name
    pub fn activity_chart(&self, animate: bool) -> ChartData {
        let values = self.state.trackers.iter().map(|t| t.count as f64).collect();
        let labels = self.state.trackers.iter().map(|t| t.name.clone()).collect();
        ChartData::new(values, labels, "activities").animate(animate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Theme;
    use crate::storage::{MemoryStore, StorageError, StorageResult, TRACKERS_KEY};
    use std::cell::Cell;
    use std::rc::Rc;

    fn app() -> App<MemoryStore> {
        App::open(MemoryStore::new()).unwrap()
    }

    /// Memory store whose writes fail while the shared flag is set
    struct FlakyStore {
        inner: MemoryStore,
        fail: Rc<Cell<bool>>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
            if self.fail.get() {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into());
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> StorageResult<bool> {
            self.inner.remove(key)
        }

        fn keys(&self) -> StorageResult<Vec<String>> {
            self.inner.keys()
        }
    }

    #[test]
    fn test_failed_write_leaves_state_untouched() {
        let fail = Rc::new(Cell::new(false));
        let store = FlakyStore {
            inner: MemoryStore::new(),
            fail: Rc::clone(&fail),
        };
        let mut app = App::open(store).unwrap();
        app.increment("1").unwrap();
        let task = app.add_task("Meds", TimeOfDay::Morning).unwrap().id.clone();
        let before = app.state().clone();

        fail.set(true);
        assert!(matches!(app.increment("1"), Err(AppError::Storage(StorageError::Io(_)))));
        assert!(app.toggle_task(&task).is_err());
        assert!(app.log_mood("happy").is_err());
        assert!(app.add_placeholder_tracker().is_err());
        assert_eq!(app.state(), &before);

        fail.set(false);
        assert_eq!(app.increment("1").unwrap(), 2);
        let reloaded = App::open(app.into_store()).unwrap();
        assert_eq!(reloaded.trackers()[0].count, 2);
        assert!(!reloaded.routine_tasks()[0].completed);
    }

    #[test]
    fn test_loading_placeholder_restarts_on_open() {
        let mut app = app();
        let opened = app.view_opened();
        assert!(app.is_loading_at(opened + Duration::from_millis(999)));
        assert!(!app.is_loading_at(opened + Duration::from_millis(1000)));

        app.set_view(View::Routine);
        let reopened = app.view_opened();
        assert!(reopened >= opened);
        assert!(app.is_loading_at(reopened));
        assert!(app.loading_remaining() <= Duration::from_millis(1000));

        app.handle_key(&KeyPress::new("h").meta());
        assert!(app.view_opened() >= reopened);
        assert_eq!(app.view(), View::Home);
    }

    #[test]
    fn test_open_with_defaults() {
        let app = app();
        assert_eq!(app.trackers().len(), 3);
        assert_eq!(app.view(), View::Home);
        assert!(app.routine_tasks().is_empty());
    }

    #[test]
    fn test_open_malformed_store_fails() {
        let mut store = MemoryStore::new();
        store.set(TRACKERS_KEY, "nope").unwrap();

        match App::open(store) {
            Err(AppError::Storage(StorageError::Malformed { .. })) => {}
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("malformed store opened"),
        }
    }

    #[test]
    fn test_increment_decrement_persist() {
        let mut app = app();
        assert_eq!(app.increment("1").unwrap(), 1);
        assert_eq!(app.decrement("1").unwrap(), 0);
        assert_eq!(app.decrement("1").unwrap(), 0);
        app.increment("2").unwrap();

        let reloaded = App::open(app.into_store()).unwrap();
        assert_eq!(reloaded.trackers()[0].count, 0);
        assert_eq!(reloaded.trackers()[1].count, 1);
    }

    #[test]
    fn test_unknown_tracker() {
        let mut app = app();
        assert!(matches!(app.increment("99"), Err(AppError::TrackerNotFound(_))));
    }

    #[test]
    fn test_add_trackers() {
        let mut app = app();
        assert_eq!(app.add_placeholder_tracker().unwrap().id, "4");

        let added = app
            .add_tracker(NewTracker {
                name: " Water ".into(),
                icon: "💧".into(),
                unit: "glasses".into(),
                color: "green".into(),
                category: Some(TrackerCategory::Wellbeing),
            })
            .unwrap();
        assert_eq!(added.id, "5");
        assert_eq!(added.name, "Water");
        assert_eq!(added.color, "#10b981");

        let missing = app.add_tracker(NewTracker {
            name: "x".into(),
            icon: " ".into(),
            unit: "u".into(),
            color: "blue".into(),
            category: None,
        });
        assert!(matches!(missing, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_sensory_logging() {
        let mut app = app();
        let mut form = SensoryForm::new(SensoryType::Auditory);
        form.intensity = 14;
        form.trigger = Some("Loud noises".into());
        form.coping = vec!["Ear plugs".into()];

        let entry = app.log_sensory(form).unwrap().clone();
        assert_eq!(entry.intensity, 10);
        assert_eq!(entry.id, entry.timestamp.to_string());

        let quick = app.quick_sensory(SensoryType::Vestibular).unwrap().clone();
        assert_eq!(quick.intensity, 4);
        assert!(quick.timestamp > entry.timestamp);

        assert!(matches!(
            app.quick_sensory(SensoryType::Olfactory),
            Err(AppError::UnknownSensoryType { .. })
        ));
        assert_eq!(app.recent_sensory()[0].id, quick.id);
    }

    #[test]
    fn test_mood_logging() {
        let mut app = app();
        app.log_mood("g").unwrap();
        let entry = app.log_mood("anxious").unwrap().clone();
        assert_eq!(entry.intensity, -4);

        assert!(matches!(app.log_mood("bored"), Err(AppError::UnknownMood(_))));
        assert_eq!(app.recent_moods().len(), 2);

        let summary = app.mood_summary(Local::now());
        assert_eq!(summary.today_count, 2);
        assert_eq!(summary.latest.map(|m| m.mood_id), Some("anxious".to_string()));
    }

    #[test]
    fn test_routine_flow() {
        let mut app = app();
        assert!(matches!(app.add_task("   ", TimeOfDay::Morning), Err(AppError::InvalidInput(_))));

        let a = app.add_task(" Meds ", TimeOfDay::Morning).unwrap().id.clone();
        let b = app.add_task("Walk", TimeOfDay::Morning).unwrap().id.clone();
        assert!(a.starts_with("task-"));
        assert_ne!(a, b);

        assert!(app.toggle_task(&a).unwrap());
        assert!(!app.routine_tasks()[1].completed);
        assert_eq!(app.completion()[0].percentage, 50.0);

        let b_task = app.routine_tasks()[1].clone();
        assert!(app.shows_transition_alert(&b_task));

        let update = RoutineTaskUpdate {
            time_of_day: Some(TimeOfDay::Evening),
            ..Default::default()
        };
        assert_eq!(app.update_task(&b, update).unwrap().time_of_day, TimeOfDay::Evening);

        app.delete_task(&a).unwrap();
        assert!(matches!(app.delete_task(&a), Err(AppError::TaskNotFound(_))));
        assert!(matches!(app.toggle_task("task-0"), Err(AppError::TaskNotFound(_))));
    }

    #[test]
    fn test_preferences_replaced_wholesale() {
        let mut app = app();
        let mut prefs = app.preferences().clone();
        prefs.theme = Theme::Light;
        prefs.sensory_preferences = None;
        app.save_preferences(prefs.clone()).unwrap();

        let reloaded = App::open(app.into_store()).unwrap();
        assert_eq!(reloaded.preferences(), &prefs);
    }

    #[test]
    fn test_preferences_reject_bad_reminder() {
        let mut app = app();
        let mut prefs = app.preferences().clone();
        prefs.reminder_time = Some("9am".into());
        assert!(matches!(app.save_preferences(prefs), Err(AppError::InvalidInput(_))));
        assert_eq!(app.preferences(), &UserPreferences::default());
    }

    #[test]
    fn test_keyboard_switches_view() {
        let mut app = app();
        assert_eq!(app.handle_key(&KeyPress::new("s").ctrl()), Some(View::Stats));
        assert_eq!(app.view(), View::Stats);
        assert_eq!(app.handle_key(&KeyPress::new("h")), None);
        assert_eq!(app.view(), View::Stats);
    }

    #[test]
    fn test_activity_chart() {
        let mut app = app();
        app.increment("3").unwrap();
        let chart = app.activity_chart(false);
        assert_eq!(chart.values, vec![0.0, 0.0, 1.0]);
        assert_eq!(chart.labels[2], "Social Interactions");
        assert_eq!(chart.unit, "activities");
        assert!(!chart.animate);
    }
}
