//! Line-chart frame drawing
//!
//! [`ChartRenderer`] lays out a single series and draws one animation frame
//! onto any [`Surface`]. Frames are drawn back to front: loading bar,
//! gridlines, filled area, line, point markers, axis labels.

use crate::chart::scale::{format_value, AxisScale};

/// Canvas background
pub const BACKGROUND: &str = "#ffffff";
/// Gridline colour
pub const GRID_COLOR: &str = "#f1f5f9";
/// Series line and marker outline
pub const LINE_COLOR: &str = "#9333ea";
/// Area fill under the series
pub const AREA_COLOR: &str = "rgba(147, 51, 234, 0.1)";
/// Marker fill
pub const MARKER_FILL: &str = "#fff";
/// Axis label colour
pub const LABEL_COLOR: &str = "#64748b";
pub const LABEL_FONT: &str = "12px Inter, system-ui, sans-serif";
/// Loading bar gradient stops
pub const LOADING_GRADIENT: [(f64, &str); 3] = [(0.0, "#E0F4FF"), (0.5, "#ffffff"), (1.0, "#E0F4FF")];

pub const MARKER_RADIUS: f64 = 4.0;
pub const LINE_WIDTH: f64 = 2.0;
pub const GRID_WIDTH: f64 = 1.0;
pub const LOADING_BAR_HEIGHT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`
    pub fn lerp(self, other: Point, t: f64) -> Point {
        if t >= 1.0 {
            return other;
        }
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Fill style for rectangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill<'a> {
    Solid(&'a str),
    /// Left-to-right gradient as `(offset, colour)` stops
    HorizontalGradient(&'a [(f64, &'a str)]),
}

/// Drawing target for chart frames
pub trait Surface {
    /// Reset the surface to an empty canvas of the given size
    fn clear(&mut self, width: f64, height: f64);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Fill<'_>);

    /// Independent straight segments sharing one stroke style
    fn stroke_segments(&mut self, segments: &[(Point, Point)], color: &str, width: f64);

    fn fill_polygon(&mut self, points: &[Point], color: &str);

    fn stroke_polyline(&mut self, points: &[Point], color: &str, width: f64);

    fn circle(&mut self, center: Point, radius: f64, fill: &str, stroke: &str, stroke_width: f64);

    fn text(&mut self, at: Point, text: &str, align: TextAlign, color: &str, font: &str);
}

/// Canvas geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            padding: 40.0,
        }
    }
}

impl ChartLayout {
    /// Build a layout, see [`ChartLayout::normalized`]
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
        .normalized()
    }

    /// Replace non-positive or non-finite sizes with the defaults and cap
    /// padding at half the shorter side so the plot area is never inverted
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let positive = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };

        let width = positive(self.width, defaults.width);
        let height = positive(self.height, defaults.height);
        let padding = if self.padding.is_finite() {
            self.padding.clamp(0.0, width.min(height) / 2.0)
        } else {
            defaults.padding.min(width.min(height) / 2.0)
        };

        Self {
            width,
            height,
            padding,
        }
    }

    pub fn graph_width(&self) -> f64 {
        self.width - self.padding * 2.0
    }

    pub fn graph_height(&self) -> f64 {
        self.height - self.padding * 2.0
    }

    /// y coordinate of the zero line
    pub fn baseline(&self) -> f64 {
        self.height - self.padding
    }
}

/// Input series for one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub values: Vec<f64>,
    pub labels: Vec<String>,
    pub unit: String,
    pub animate: bool,
}

impl ChartData {
    pub fn new(values: Vec<f64>, labels: Vec<String>, unit: impl Into<String>) -> Self {
        Self {
            values,
            labels,
            unit: unit.into(),
            animate: true,
        }
    }

    pub fn animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }
}

/// Lays out a series once and draws frames of it
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    data: ChartData,
    layout: ChartLayout,
    scale: AxisScale,
    points: Vec<Point>,
    x_step: f64,
    y_scale: f64,
}

impl ChartRenderer {
    pub fn new(data: ChartData, layout: ChartLayout) -> Self {
        let layout = layout.normalized();
        let scale = AxisScale::from_values(&data.values);

        let intervals = data.values.len().saturating_sub(1).max(1);
        let x_step = layout.graph_width() / intervals as f64;
        let y_scale = layout.graph_height() / scale.max;

        let mut renderer = Self {
            data,
            layout,
            scale,
            points: Vec::new(),
            x_step,
            y_scale,
        };
        renderer.points = (0..renderer.data.values.len())
            .map(|i| renderer.point_at(i))
            .collect();
        renderer
    }

    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn animates(&self) -> bool {
        self.data.animate
    }

    fn point_at(&self, index: usize) -> Point {
        let value = self.data.values[index];
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        Point::new(self.x_at(index), self.y_at(value))
    }

    fn x_at(&self, index: usize) -> f64 {
        self.layout.padding + index as f64 * self.x_step
    }

    /// y for a value, held inside the plot area
    fn y_at(&self, value: f64) -> f64 {
        let y = self.layout.baseline() - value * self.y_scale;
        y.max(self.layout.padding).min(self.layout.baseline())
    }

    /// How much of the segment ending at `index` is revealed at `progress`
    fn reveal(&self, index: usize, progress: f64) -> f64 {
        let n = self.points.len() as f64;
        (progress * n - (index as f64 - 1.0)).min(1.0)
    }

    /// Outline of the filled area at `progress`
    pub fn area_outline(&self, progress: f64) -> Vec<Point> {
        let Some(first) = self.points.first() else {
            return Vec::new();
        };
        let baseline = self.layout.baseline();

        let mut outline = vec![Point::new(first.x, baseline), *first];
        for (index, pair) in self.points.windows(2).enumerate() {
            let t = self.reveal(index + 1, progress);
            if t > 0.0 {
                outline.push(pair[0].lerp(pair[1], t));
            }
        }

        // Closed under the final data point even while the line is still revealing
        let last = self.points[self.points.len() - 1];
        outline.push(Point::new(last.x, baseline));
        outline
    }

    /// Draw one frame; `progress` runs from 0 to 1 and is ignored when not animating
    pub fn draw(&self, surface: &mut dyn Surface, progress: f64) {
        let progress = if self.data.animate {
            progress.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let ChartLayout {
            width,
            height,
            padding,
        } = self.layout;

        surface.clear(width, height);

        if self.data.animate && progress < 1.0 {
            surface.fill_rect(
                0.0,
                height - LOADING_BAR_HEIGHT,
                width * progress,
                LOADING_BAR_HEIGHT,
                Fill::HorizontalGradient(&LOADING_GRADIENT),
            );
        }

        let gridlines: Vec<(Point, Point)> = self
            .scale
            .ticks
            .iter()
            .map(|&tick| {
                let y = self.y_at(tick);
                (Point::new(padding, y), Point::new(width - padding, y))
            })
            .collect();
        surface.stroke_segments(&gridlines, GRID_COLOR, GRID_WIDTH);

        if !self.points.is_empty() {
            surface.fill_polygon(&self.area_outline(progress), AREA_COLOR);
            surface.stroke_polyline(&self.points, LINE_COLOR, LINE_WIDTH);
            for point in &self.points {
                surface.circle(*point, MARKER_RADIUS, MARKER_FILL, LINE_COLOR, LINE_WIDTH);
            }
        }

        for &tick in &self.scale.ticks {
            let label = format!("{} {}", format_value(tick), self.data.unit);
            let at = Point::new(padding - 10.0, self.y_at(tick) + 4.0);
            surface.text(at, &label, TextAlign::Right, LABEL_COLOR, LABEL_FONT);
        }

        for (index, label) in self.data.labels.iter().enumerate() {
            let at = Point::new(self.x_at(index), height - padding + 20.0);
            surface.text(at, label, TextAlign::Center, LABEL_COLOR, LABEL_FONT);
        }
    }
}
