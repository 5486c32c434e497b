//! Reveal animation timing
//!
//! Progress is elapsed wall-clock time over a fixed duration, capped at 1.

use std::time::Duration;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    duration: Duration,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl Animation {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Fraction complete after `elapsed`
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress_at(elapsed) >= 1.0
    }

    /// Progress values for each frame at `fps`, always ending at exactly 1.0
    pub fn frames(&self, fps: u32) -> Vec<f64> {
        let fps = fps.max(1);
        let frame = Duration::from_secs_f64(1.0 / fps as f64);

        let mut frames = Vec::new();
        let mut elapsed = Duration::ZERO;
        loop {
            let progress = self.progress_at(elapsed);
            frames.push(progress);
            if progress >= 1.0 {
                break;
            }
            elapsed += frame;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_capped() {
        let anim = Animation::default();
        assert_eq!(anim.progress_at(Duration::ZERO), 0.0);
        assert_eq!(anim.progress_at(Duration::from_millis(250)), 0.25);
        assert_eq!(anim.progress_at(Duration::from_millis(5000)), 1.0);
        assert!(anim.is_finished(Duration::from_millis(1000)));
    }

    #[test]
    fn test_frames() {
        let frames = Animation::default().frames(10);
        assert_eq!(frames.first(), Some(&0.0));
        assert_eq!(frames.last(), Some(&1.0));
        assert!(frames.windows(2).all(|w| w[1] > w[0]));
        assert!(frames.len() >= 11 && frames.len() <= 12);
    }

    #[test]
    fn test_zero_duration_is_immediately_done() {
        let anim = Animation::new(Duration::ZERO);
        assert_eq!(anim.frames(60), vec![1.0]);
    }
}
