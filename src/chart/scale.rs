//! Y-axis scaling
//!
//! The ceiling is the largest value plus 10% headroom. When there is nothing
//! to scale against (no data, all zeros, or only negative values) the ceiling
//! is [`MIN_CEILING`].

/// Ceiling used when the data gives no usable maximum
pub const MIN_CEILING: f64 = 10.0;

/// Headroom above the largest value
pub const HEADROOM: f64 = 1.1;

/// Number of equal intervals between gridlines
pub const TICK_COUNT: usize = 5;

/// Computed y-axis for one chart
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScale {
    /// Value mapped to the top of the plot area
    pub max: f64,
    /// Gridline values from 0 to `max`, `TICK_COUNT + 1` entries
    pub ticks: Vec<f64>,
}

impl AxisScale {
    pub fn from_values(values: &[f64]) -> Self {
        let max = ceiling(values);
        let step = max / TICK_COUNT as f64;
        let ticks = (0..=TICK_COUNT).map(|i| i as f64 * step).collect();
        Self { max, ticks }
    }

    pub fn tick_step(&self) -> f64 {
        self.max / TICK_COUNT as f64
    }
}

fn ceiling(values: &[f64]) -> f64 {
    let largest = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    let max = largest * HEADROOM;
    if max.is_finite() && max > 0.0 {
        max
    } else {
        MIN_CEILING
    }
}

/// Axis label text: thousands as `1.2k`, everything else as the shortest
/// decimal form
pub fn format_value(value: f64) -> String {
    if value >= 1000.0 {
        format!("{:.1}k", value / 1000.0)
    } else {
        format!("{}", value)
    }
}
