//! NeuroTrack persistence
//!
//! - **kv**: string-keyed stores (directory-backed and in-memory)
//! - **state**: the persisted application state and its key layout
//! - **error**: Error types
//!
//! # Layout
//!
//! ```text
//! trackers        → [Tracker]
//! preferences     → UserPreferences
//! routineTasks    → [RoutineTask]
//! sensoryEntries  → [SensoryInput]
//! moodEntries     → [MoodEntry]
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use neurotrack::storage::{AppState, DirectoryStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = DirectoryStore::open("./neurotrack_data")?;
//!     let mut state = AppState::load(&store)?;
//!
//!     state.trackers[0].increment();
//!     state.save(&mut store)?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod kv;
pub mod state;

pub use error::{StorageError, StorageResult};
pub use kv::{DirectoryStore, KeyValueStore, MemoryStore};
pub use state::{
    AppState, MOOD_ENTRIES_KEY, PREFERENCES_KEY, ROUTINE_TASKS_KEY, SENSORY_ENTRIES_KEY,
    TRACKERS_KEY,
};
