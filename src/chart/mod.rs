//! Line chart rendering
//!
//! - **scale**: y-axis ceiling and ticks
//! - **render**: layout and frame drawing onto a [`Surface`]
//! - **svg**: SVG [`Surface`] implementation
//! - **animation**: reveal progress over time
//!
//! # Example
//!
//! ```rust
//! use neurotrack::chart::{ChartData, ChartLayout, ChartRenderer, SvgSurface};
//!
//! let data = ChartData::new(vec![2.0, 5.0, 3.0], vec!["Mon".into(), "Tue".into(), "Wed".into()], "times");
//! let renderer = ChartRenderer::new(data, ChartLayout::default());
//!
//! let mut svg = SvgSurface::new();
//! renderer.draw(&mut svg, 1.0);
//! assert!(svg.finish().contains("<polyline"));
//! ```

pub mod animation;
pub mod render;
pub mod scale;
pub mod svg;

pub use animation::Animation;
pub use render::{ChartData, ChartLayout, ChartRenderer, Fill, Point, Surface, TextAlign};
pub use scale::{format_value, AxisScale};
pub use svg::SvgSurface;
