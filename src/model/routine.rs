//! Daily routine checklist
//!
//! Tasks are bucketed by time of day and live in a [`RoutineStore`], a plain
//! vector with add / toggle / delete / update operations.

use crate::model::id::task_id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Buckets in display order
    pub fn all() -> [TimeOfDay; 3] {
        [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening]
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeOfDay::Morning => write!(f, "morning"),
            TimeOfDay::Afternoon => write!(f, "afternoon"),
            TimeOfDay::Evening => write!(f, "evening"),
        }
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            _ => Err(format!("unknown time of day: {}", s)),
        }
    }
}

/// A checklist item bucketed by time of day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutineTask {
    pub id: String,
    pub name: String,
    pub completed: bool,
    pub time_of_day: TimeOfDay,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports: Option<Vec<String>>,
}

/// A task before it has been assigned an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoutineTask {
    pub name: String,
    pub completed: bool,
    pub time_of_day: TimeOfDay,
    pub duration: Option<u32>,
    pub difficulty: Option<u8>,
    pub supports: Option<Vec<String>>,
}

impl NewRoutineTask {
    pub fn new(name: impl Into<String>, time_of_day: TimeOfDay) -> Self {
        Self {
            name: name.into(),
            completed: false,
            time_of_day,
            duration: None,
            difficulty: None,
            supports: None,
        }
    }
}

/// Partial update, `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutineTaskUpdate {
    pub name: Option<String>,
    pub completed: Option<bool>,
    pub time_of_day: Option<TimeOfDay>,
    pub duration: Option<u32>,
    pub difficulty: Option<u8>,
    pub supports: Option<Vec<String>>,
}

impl RoutineTaskUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// In-memory task list, persisted as a plain array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutineStore {
    tasks: Vec<RoutineTask>,
}

impl RoutineStore {
    pub fn new(tasks: Vec<RoutineTask>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[RoutineTask] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<RoutineTask> {
        self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&RoutineTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a task with an id derived from `ms`
    pub fn add(&mut self, task: NewRoutineTask, ms: i64) -> &RoutineTask {
        self.tasks.push(RoutineTask {
            id: task_id(ms),
            name: task.name,
            completed: task.completed,
            time_of_day: task.time_of_day,
            duration: task.duration,
            difficulty: task.difficulty,
            supports: task.supports,
        });
        &self.tasks[self.tasks.len() - 1]
    }

    /// Flip the completion flag of one task, returns the new value
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Remove a task, returns whether anything was removed
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn update(&mut self, id: &str, update: RoutineTaskUpdate) -> Option<&RoutineTask> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;

        if let Some(name) = update.name {
            task.name = name;
        }
        if let Some(completed) = update.completed {
            task.completed = completed;
        }
        if let Some(time_of_day) = update.time_of_day {
            task.time_of_day = time_of_day;
        }
        if update.duration.is_some() {
            task.duration = update.duration;
        }
        if update.difficulty.is_some() {
            task.difficulty = update.difficulty;
        }
        if update.supports.is_some() {
            task.supports = update.supports;
        }

        Some(task)
    }

    /// Tasks in one bucket, in insertion order
    pub fn filter(&self, time_of_day: TimeOfDay) -> impl Iterator<Item = &RoutineTask> {
        self.tasks
            .iter()
            .filter(move |t| t.time_of_day == time_of_day)
    }
}
