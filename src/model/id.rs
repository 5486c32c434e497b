//! Timestamp-derived identifiers
//!
//! Entries are keyed by the Unix millisecond they were created at. Two
//! entries created inside the same millisecond would collide, so the clock
//! never hands out the same value twice.

use chrono::Utc;

/// Monotonic millisecond source for entry ids and timestamps
#[derive(Debug, Default, Clone)]
pub struct IdClock {
    last: i64,
}

impl IdClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next millisecond value, strictly greater than any previously returned
    pub fn next(&mut self) -> i64 {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Same as [`IdClock::next`] with an explicit wall-clock reading
    pub fn next_at(&mut self, now: i64) -> i64 {
        let ms = now.max(self.last + 1);
        self.last = ms;
        ms
    }

    /// Make sure future ids sort after an already persisted one
    pub fn observe(&mut self, ms: i64) {
        self.last = self.last.max(ms);
    }
}

/// Id for a routine task (`task-<ms>`)
pub fn task_id(ms: i64) -> String {
    format!("task-{}", ms)
}

/// Id for a log entry (`<ms>`)
pub fn entry_id(ms: i64) -> String {
    ms.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_millisecond_never_repeats() {
        let mut clock = IdClock::new();
        let a = clock.next_at(1_000);
        let b = clock.next_at(1_000);
        let c = clock.next_at(999);

        assert_eq!(a, 1_000);
        assert_eq!(b, 1_001);
        assert_eq!(c, 1_002);
    }

    #[test]
    fn test_observe_pushes_clock_forward() {
        let mut clock = IdClock::new();
        clock.observe(5_000);
        assert_eq!(clock.next_at(10), 5_001);
    }

    #[test]
    fn test_id_formats() {
        assert_eq!(task_id(42), "task-42");
        assert_eq!(entry_id(42), "42");
    }
}
