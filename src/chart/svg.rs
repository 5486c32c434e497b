//! SVG output for chart frames

use crate::chart::render::{Fill, Point, Surface, TextAlign, BACKGROUND};
use std::fmt::Write;

/// Accumulates one frame as an SVG document
#[derive(Debug, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    defs: String,
    body: String,
    gradients: usize,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished document
    pub fn finish(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        if !self.defs.is_empty() {
            let _ = writeln!(out, "<defs>\n{}</defs>", self.defs);
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Split a CSS font shorthand (`12px Inter, sans-serif`) into size and family
fn split_font(font: &str) -> (&str, &str) {
    match font.split_once(' ') {
        Some((size, family)) => (size, family),
        None => (font, "sans-serif"),
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.defs.clear();
        self.body.clear();
        self.gradients = 0;
        let _ = writeln!(
            self.body,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            width, height, BACKGROUND
        );
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Fill<'_>) {
        let paint = match fill {
            Fill::Solid(color) => color.to_string(),
            Fill::HorizontalGradient(stops) => {
                self.gradients += 1;
                let id = format!("gradient{}", self.gradients);
                let _ = writeln!(self.defs, r#"<linearGradient id="{}" x1="0" y1="0" x2="1" y2="0">"#, id);
                for (offset, color) in stops {
                    let _ = writeln!(self.defs, r#"<stop offset="{}" stop-color="{}"/>"#, offset, color);
                }
                self.defs.push_str("</linearGradient>\n");
                format!("url(#{})", id)
            }
        };

        let _ = writeln!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            x, y, width, height, paint
        );
    }

    fn stroke_segments(&mut self, segments: &[(Point, Point)], color: &str, width: f64) {
        if segments.is_empty() {
            return;
        }
        let d: Vec<String> = segments
            .iter()
            .map(|(a, b)| format!("M{:.2} {:.2} L{:.2} {:.2}", a.x, a.y, b.x, b.y))
            .collect();
        let _ = writeln!(
            self.body,
            r#"<path d="{}" stroke="{}" stroke-width="{}" fill="none"/>"#,
            d.join(" "),
            color,
            width
        );
    }

    fn fill_polygon(&mut self, points: &[Point], color: &str) {
        if points.len() < 3 {
            return;
        }
        let _ = writeln!(
            self.body,
            r#"<polygon points="{}" fill="{}"/>"#,
            points_attr(points),
            color
        );
    }

    fn stroke_polyline(&mut self, points: &[Point], color: &str, width: f64) {
        if points.is_empty() {
            return;
        }
        let _ = writeln!(
            self.body,
            r#"<polyline points="{}" stroke="{}" stroke-width="{}" fill="none"/>"#,
            points_attr(points),
            color,
            width
        );
    }

    fn circle(&mut self, center: Point, radius: f64, fill: &str, stroke: &str, stroke_width: f64) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            center.x, center.y, radius, fill, stroke, stroke_width
        );
    }

    fn text(&mut self, at: Point, text: &str, align: TextAlign, color: &str, font: &str) {
        let anchor = match align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let (size, family) = split_font(font);
        let _ = writeln!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="{}" fill="{}" font-size="{}" font-family="{}">{}</text>"#,
            at.x,
            at.y,
            anchor,
            color,
            size,
            escape(family),
            escape(text)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::render::{ChartData, ChartLayout, ChartRenderer};

    fn render(values: Vec<f64>, progress: f64) -> String {
        let labels = values.iter().enumerate().map(|(i, _)| format!("Day {}", i)).collect();
        let data = ChartData::new(values, labels, "activities");
        let renderer = ChartRenderer::new(data, ChartLayout::default());

        let mut svg = SvgSurface::new();
        renderer.draw(&mut svg, progress);
        svg.finish()
    }

    #[test]
    fn test_document_shape() {
        let doc = render(vec![1.0, 4.0, 2.0], 1.0);

        assert!(doc.starts_with("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert!(doc.contains(r#"width="600""#));
        assert_eq!(doc.matches("<circle").count(), 3);
        assert!(doc.contains("<polyline"));
        assert!(doc.contains(">Day 2</text>"));
        assert!(!doc.contains("<linearGradient"));
    }

    #[test]
    fn test_loading_frame_has_gradient() {
        let doc = render(vec![1.0, 4.0], 0.25);
        assert!(doc.contains("<linearGradient id=\"gradient1\""));
        assert!(doc.contains("url(#gradient1)"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut svg = SvgSurface::new();
        svg.clear(10.0, 10.0);
        svg.text(Point::new(1.0, 1.0), "a<b & c", TextAlign::Left, "#000", "12px sans-serif");
        assert!(svg.finish().contains("a&lt;b &amp; c"));
    }
}
