//! Summaries shown on the insights, mood and routine views
//!
//! Everything here is a pure function of the current state plus, where a
//! calendar is involved, an explicit `now`.

use crate::model::{MoodEntry, RoutineStore, SensoryInput, TimeOfDay, Tracker};
use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate, TimeZone, Timelike};
use serde::Serialize;

/// Number of entries shown in "recent" lists
pub const RECENT_LIMIT: usize = 5;

/// Aggregate over all trackers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSummary {
    pub total_activities: u64,
    pub active_trackers: usize,
    /// Total over all trackers, 0 when there are none
    pub average_per_tracker: f64,
    pub positive_progress: usize,
}

impl TrackerSummary {
    pub fn from_trackers(trackers: &[Tracker]) -> Self {
        let total_activities: u64 = trackers.iter().map(|t| t.count).sum();
        let active_trackers = trackers.iter().filter(|t| t.is_active()).count();
        let average_per_tracker = if trackers.is_empty() {
            0.0
        } else {
            total_activities as f64 / trackers.len() as f64
        };

        Self {
            total_activities,
            active_trackers,
            average_per_tracker,
            positive_progress: trackers.iter().filter(|t| t.trend > 0.0).count(),
        }
    }

    /// Average over active trackers only, rounded to one decimal
    pub fn average_per_active(&self) -> f64 {
        let avg = self.total_activities as f64 / self.active_trackers.max(1) as f64;
        (avg * 10.0).round() / 10.0
    }
}

/// Today's mood picture
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodSummary {
    pub today_count: usize,
    pub average_intensity: f64,
    /// Most recent mood logged today
    pub latest: Option<MoodEntry>,
}

impl MoodSummary {
    /// Summarise entries logged at or after `since` (Unix ms)
    pub fn since(entries: &[MoodEntry], since: i64) -> Self {
        let today: Vec<&MoodEntry> = entries.iter().filter(|e| e.timestamp >= since).collect();
        let sum: f64 = today.iter().map(|e| e.intensity as f64).sum();
        let latest = today.iter().max_by_key(|e| e.timestamp).map(|e| (*e).clone());

        Self {
            today_count: today.len(),
            average_intensity: sum / today.len().max(1) as f64,
            latest,
        }
    }

    pub fn for_day(entries: &[MoodEntry], now: DateTime<Local>) -> Self {
        Self::since(entries, local_midnight_millis(now))
    }
}

/// Unix ms of the most recent local midnight
pub fn local_midnight_millis(now: DateTime<Local>) -> i64 {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| now.timestamp_millis())
}

/// Completion of one time-of-day bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStatus {
    pub time_of_day: TimeOfDay,
    pub total: usize,
    pub completed: usize,
    /// 0–100, 0 for an empty bucket
    pub percentage: f64,
}

impl CompletionStatus {
    pub fn for_bucket(store: &RoutineStore, time_of_day: TimeOfDay) -> Self {
        let (total, completed) = store
            .filter(time_of_day)
            .fold((0, 0), |(total, done), t| (total + 1, done + t.completed as usize));

        let percentage = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            time_of_day,
            total,
            completed,
            percentage,
        }
    }

    /// All buckets in display order
    pub fn all(store: &RoutineStore) -> Vec<Self> {
        TimeOfDay::all()
            .into_iter()
            .map(|bucket| Self::for_bucket(store, bucket))
            .collect()
    }
}

/// Last `RECENT_LIMIT` items, newest first
pub fn recent<T>(entries: &[T]) -> Vec<&T> {
    entries.iter().rev().take(RECENT_LIMIT).collect()
}

/// Window of a tracker detail chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub fn all() -> [Period; 4] {
        [Period::Day, Period::Week, Period::Month, Period::Year]
    }

    /// Number of buckets in the window
    pub fn buckets(&self) -> usize {
        match self {
            Period::Day => 24,
            Period::Week => 7,
            Period::Month => 30,
            Period::Year => 12,
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            _ => Err(format!("unknown period: {}", s)),
        }
    }
}

/// Bucket identity used to match timestamps to labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Hour(NaiveDate, u32),
    Date(NaiveDate),
    Month(i32, u32),
}

fn bucket_of(period: Period, at: DateTime<Local>) -> Bucket {
    match period {
        Period::Day => Bucket::Hour(at.date_naive(), at.hour()),
        Period::Week | Period::Month => Bucket::Date(at.date_naive()),
        Period::Year => Bucket::Month(at.year(), at.month()),
    }
}

/// Buckets and labels for `period`, oldest first, ending at `now`
fn buckets(period: Period, now: DateTime<Local>) -> Vec<(Bucket, String)> {
    match period {
        Period::Day => (0..24)
            .map(|h| (Bucket::Hour(now.date_naive(), h), format!("{:02}:00", h)))
            .collect(),
        Period::Week => (0..7)
            .rev()
            .map(|i| {
                let day = now - Duration::days(i);
                (Bucket::Date(day.date_naive()), day.format("%a").to_string())
            })
            .collect(),
        Period::Month => (0..30)
            .rev()
            .map(|i| {
                let day = now - Duration::days(i);
                (Bucket::Date(day.date_naive()), day.day().to_string())
            })
            .collect(),
        Period::Year => (0..12)
            .rev()
            .filter_map(|i| {
                let month = now.checked_sub_months(Months::new(i))?;
                Some((
                    Bucket::Month(month.year(), month.month()),
                    month.format("%b").to_string(),
                ))
            })
            .collect(),
    }
}

/// Axis labels for a period window ending at `now`
pub fn period_labels(period: Period, now: DateTime<Local>) -> Vec<String> {
    buckets(period, now).into_iter().map(|(_, label)| label).collect()
}

/// Sensory entries per bucket over a period window ending at `now`
pub fn sensory_period_counts(
    entries: &[SensoryInput],
    period: Period,
    now: DateTime<Local>,
) -> (Vec<f64>, Vec<String>) {
    let buckets = buckets(period, now);
    let mut counts = vec![0.0; buckets.len()];

    for entry in entries {
        let Some(at) = Local.timestamp_millis_opt(entry.timestamp).single() else {
            continue;
        };
        let key = bucket_of(period, at);
        if let Some(i) = buckets.iter().position(|(b, _)| *b == key) {
            counts[i] += 1.0;
        }
    }

    (counts, buckets.into_iter().map(|(_, label)| label).collect())
}

/// Illustrative history for a tracker detail chart
///
/// Trackers only hold a running count, so each bucket is spread between 20%
/// and 100% of it with a fixed pattern; the same inputs always give the same
/// series.
pub fn tracker_period_series(count: u64, period: Period, now: DateTime<Local>) -> (Vec<f64>, Vec<String>) {
    let labels = period_labels(period, now);
    let count = count as f64;

    let values = (0..labels.len())
        .map(|i| {
            let spread = ((i * 37 + 11) % 100) as f64 / 100.0;
            (spread * count * 0.8 + count * 0.2).floor()
        })
        .collect();

    (values, labels)
}
