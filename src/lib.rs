//! # NeuroTrack
//!
//! Personal self-tracking for neurodivergent people: habit counters, a
//! sensory-intensity log, a mood log and a daily routine checklist, all kept
//! in a local key-value store.
//!
//! ## Modules
//!
//! - [`model`]: trackers, sensory and mood entries, routine tasks, preferences
//! - [`catalog`]: built-in moods, sensory categories and starting trackers
//! - [`storage`]: key-value persistence of the app state
//! - [`app`]: the state handlers that mutate and persist
//! - [`stats`]: summaries and period series for the insights view
//! - [`chart`]: line chart layout and rendering
//! - [`views`]: view routing and keyboard shortcuts
//! - [`config`]: TOML configuration and logging setup
//! - [`export`]: CSV export of the logs
//!
//! ## Quick Start
//!
//! ```rust
//! use neurotrack::app::App;
//! use neurotrack::model::TimeOfDay;
//! use neurotrack::storage::MemoryStore;
//!
//! let mut app = App::open(MemoryStore::new())?;
//!
//! app.increment("1")?;
//! let task = app.add_task("Take meds", TimeOfDay::Morning)?.id.clone();
//! app.toggle_task(&task)?;
//!
//! assert_eq!(app.tracker_summary().total_activities, 1);
//! # Ok::<(), neurotrack::app::AppError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod export;
pub mod model;
pub mod stats;
pub mod storage;
pub mod views;

// Re-export top-level types for convenience
pub use app::{App, AppError, AppResult, NewTracker, SensoryForm};

pub use storage::{
    AppState, DirectoryStore, KeyValueStore, MemoryStore, StorageError, StorageResult,
};

pub use chart::{Animation, ChartData, ChartLayout, ChartRenderer, Surface, SvgSurface};

pub use config::{ChartConfig, Config, ConfigError, LoggingConfig, StorageConfig};

pub use views::{dispatch_shortcut, KeyPress, Platform, View};
