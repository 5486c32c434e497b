//! NeuroTrack data model
//!
//! Plain records persisted as JSON. Field names are camelCase on the wire so
//! stored values keep the layout the app has always written:
//!
//! - **tracker**: named counters with a unit and trend
//! - **sensory**: append-only sensory-intensity log
//! - **mood**: append-only mood log
//! - **routine**: time-of-day checklist items
//! - **preferences**: user settings, replaced wholesale on save
//! - **id**: timestamp-derived identifiers

pub mod id;
pub mod mood;
pub mod preferences;
pub mod routine;
pub mod sensory;
pub mod tracker;

pub use id::IdClock;
pub use mood::{MoodEntry, Valence};
pub use preferences::{
    DefaultView, RoutinePreferences, SensoryPreferences, Theme, UserPreferences,
};
pub use routine::{NewRoutineTask, RoutineStore, RoutineTask, RoutineTaskUpdate, TimeOfDay};
pub use sensory::{Impact, SensoryInput, SensoryType};
pub use tracker::{Tracker, TrackerCategory};
