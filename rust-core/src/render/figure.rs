//! Explicit render target for diagnostic plots
//!
//! A `Figure` collects lines, vertical markers and text in data coordinates
//! and serializes them to SVG. There is no global drawing state: callers own
//! the figure and pass it to whatever draws into it.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 50.0;
const TICK_COUNT: usize = 5;

/// Stroke style of a series
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub opacity: f64,
    pub width: f64,
}

impl LineStyle {
    pub fn new(color: &str) -> Self {
        Self {
            color: color.to_string(),
            opacity: 1.0,
            width: 1.5,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone)]
struct Series {
    points: Vec<(f64, f64)>,
    style: LineStyle,
}

#[derive(Debug, Clone)]
struct VLine {
    x: f64,
    style: LineStyle,
}

#[derive(Debug, Clone)]
struct Annotation {
    x: f64,
    y: f64,
    text: String,
}

/// Data-space bounds of everything drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    fn include(&mut self, x: Option<f64>, y: Option<f64>) {
        if let Some(x) = x.filter(|v| v.is_finite()) {
            self.x_min = self.x_min.min(x);
            self.x_max = self.x_max.max(x);
        }
        if let Some(y) = y.filter(|v| v.is_finite()) {
            self.y_min = self.y_min.min(y);
            self.y_max = self.y_max.max(y);
        }
    }

    /// Widen zero-width ranges so the mapping stays finite
    fn padded(mut self) -> Self {
        if !(self.x_min < self.x_max) {
            let (lo, hi) = if self.x_min.is_finite() {
                (self.x_min - 0.5, self.x_min + 0.5)
            } else {
                (0.0, 1.0)
            };
            self.x_min = lo;
            self.x_max = hi;
        }
        if !(self.y_min < self.y_max) {
            let (lo, hi) = if self.y_min.is_finite() {
                (self.y_min - 0.5, self.y_min + 0.5)
            } else {
                (0.0, 1.0)
            };
            self.y_min = lo;
            self.y_max = hi;
        }
        self
    }
}

/// A single plot with one pair of axes
#[derive(Debug, Clone)]
pub struct Figure {
    width: f64,
    height: f64,
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    series: Vec<Series>,
    vlines: Vec<VLine>,
    annotations: Vec<Annotation>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(800.0, 500.0)
    }
}

impl Figure {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            title: None,
            x_label: None,
            y_label: None,
            series: Vec::new(),
            vlines: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn set_labels(&mut self, x_label: &str, y_label: &str) {
        self.x_label = Some(x_label.to_string());
        self.y_label = Some(y_label.to_string());
    }

    /// Add a polyline through aligned `x`/`y`
    pub fn plot(&mut self, x: &[f64], y: &[f64], style: LineStyle) {
        let points = x.iter().cloned().zip(y.iter().cloned()).collect();
        self.series.push(Series { points, style });
    }

    /// Vertical line across the whole plot area
    pub fn axvline(&mut self, x: f64, style: LineStyle) {
        self.vlines.push(VLine { x, style });
    }

    /// Text anchored at a data coordinate
    pub fn text(&mut self, x: f64, y: f64, text: &str) {
        self.annotations.push(Annotation {
            x,
            y,
            text: text.to_string(),
        });
    }

    /// Drop everything drawn so far, keeping the canvas size
    pub fn clear(&mut self) {
        *self = Figure::new(self.width, self.height);
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.vlines.is_empty() && self.annotations.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        };

        for series in &self.series {
            for &(x, y) in &series.points {
                bounds.include(Some(x), Some(y));
            }
        }
        for vline in &self.vlines {
            bounds.include(Some(vline.x), None);
        }

        bounds.padded()
    }

    /// Serialize to an SVG document
    pub fn to_svg(&self) -> String {
        let bounds = self.bounds();
        let plot_w = (self.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let plot_h = (self.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);

        let px = |x: f64| MARGIN_LEFT + (x - bounds.x_min) / (bounds.x_max - bounds.x_min) * plot_w;
        let py = |y: f64| {
            MARGIN_TOP + plot_h - (y - bounds.y_min) / (bounds.y_max - bounds.y_min) * plot_h
        };

        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        let _ = writeln!(
            svg,
            r#"<rect width="{}" height="{}" fill="white"/>"#,
            self.width, self.height
        );

        // Left and bottom spines only
        let x0 = MARGIN_LEFT;
        let y0 = MARGIN_TOP + plot_h;
        let _ = writeln!(
            svg,
            r#"<line x1="{x0}" y1="{MARGIN_TOP}" x2="{x0}" y2="{y0}" stroke="black"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{x0}" y1="{y0}" x2="{}" y2="{y0}" stroke="black"/>"#,
            x0 + plot_w
        );

        for i in 0..TICK_COUNT {
            let frac = i as f64 / (TICK_COUNT - 1) as f64;
            let xv = bounds.x_min + frac * (bounds.x_max - bounds.x_min);
            let yv = bounds.y_min + frac * (bounds.y_max - bounds.y_min);
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="middle">{}</text>"#,
                px(xv),
                y0 + 16.0,
                format_tick(xv)
            );
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="end">{}</text>"#,
                x0 - 6.0,
                py(yv) + 4.0,
                format_tick(yv)
            );
        }

        for series in &self.series {
            let points: Vec<String> = series
                .points
                .iter()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|&(x, y)| format!("{:.2},{:.2}", px(x), py(y)))
                .collect();
            if points.is_empty() {
                continue;
            }
            let _ = writeln!(
                svg,
                r#"<polyline points="{}" fill="none" {}/>"#,
                points.join(" "),
                stroke_attrs(&series.style)
            );
        }

        for vline in &self.vlines {
            let x = px(vline.x);
            let _ = writeln!(
                svg,
                r#"<line x1="{x:.2}" y1="{MARGIN_TOP}" x2="{x:.2}" y2="{y0}" {}/>"#,
                stroke_attrs(&vline.style)
            );
        }

        for note in &self.annotations {
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="13">{}</text>"#,
                px(note.x),
                py(note.y),
                escape(&note.text)
            );
        }

        if let Some(title) = &self.title {
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="16" text-anchor="middle">{}</text>"#,
                self.width / 2.0,
                MARGIN_TOP / 2.0,
                escape(title)
            );
        }
        if let Some(label) = &self.x_label {
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="13" text-anchor="middle">{}</text>"#,
                x0 + plot_w / 2.0,
                self.height - 10.0,
                escape(label)
            );
        }
        if let Some(label) = &self.y_label {
            let cy = MARGIN_TOP + plot_h / 2.0;
            let _ = writeln!(
                svg,
                r#"<text x="16" y="{cy:.2}" font-size="13" text-anchor="middle" transform="rotate(-90 16 {cy:.2})">{}</text>"#,
                escape(label)
            );
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write the SVG document to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_svg())?;
        Ok(())
    }
}

fn stroke_attrs(style: &LineStyle) -> String {
    format!(
        r#"stroke="{}" stroke-width="{}" stroke-opacity="{}""#,
        escape(&style.color),
        style.width,
        style.opacity
    )
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 100.0 || value == value.trunc() {
        format!("{value:.0}")
    } else if value.abs() >= 1.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.3}")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
