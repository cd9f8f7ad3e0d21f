//! Chart geometry computed from a [`ChartData`] series.
//!
//! Components only turn these values into markup, so everything that can be
//! wrong about a chart's proportions is checked here.

use crate::domain::entities::view::ChartData;

pub const PLOT_WIDTH: f64 = 600.0;
pub const PLOT_HEIGHT: f64 = 240.0;

pub const PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

pub fn color(idx: usize) -> &'static str {
    PALETTE[idx % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: i64,
    /// Length relative to the largest value, 0..=100.
    pub percent: f64,
}

pub fn bars(data: &ChartData) -> Vec<Bar> {
    let max = data.max_value();
    data.points
        .iter()
        .map(|point| Bar {
            label: point.display_label().to_string(),
            value: point.value,
            percent: share(point.value, max),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: i64,
    pub color: &'static str,
    /// Cumulative position around the circle in percent.
    pub start: f64,
    pub end: f64,
}

impl Slice {
    pub fn share(&self) -> f64 {
        self.end - self.start
    }
}

/// Slices in series order; negative values get no area.
pub fn pie_slices(data: &ChartData) -> Vec<Slice> {
    let total: i64 = data.points.iter().map(|point| point.value.max(0)).sum();
    let mut start = 0.0;
    data.points
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let end = start + share(point.value, total);
            let slice = Slice {
                label: point.display_label().to_string(),
                value: point.value,
                color: color(idx),
                start,
                end,
            };
            start = end;
            slice
        })
        .collect()
}

pub fn conic_gradient(slices: &[Slice]) -> String {
    if slices.is_empty() {
        return "#eee".to_string();
    }
    let stops: Vec<String> = slices
        .iter()
        .map(|slice| format!("{} {:.2}% {:.2}%", slice.color, slice.start, slice.end))
        .collect();
    format!("conic-gradient({})", stops.join(", "))
}

/// Evenly spaced points across the plot, y growing downwards.
pub fn line_points(data: &ChartData, width: f64, height: f64) -> Vec<(f64, f64)> {
    let max = data.max_value();
    let count = data.points.len();
    data.points
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let x = if count <= 1 {
                width / 2.0
            } else {
                idx as f64 * width / (count - 1) as f64
            };
            let y = height - share(point.value, max) / 100.0 * height;
            (x, y)
        })
        .collect()
}

pub fn polyline(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The line closed down to the baseline.
pub fn area_polygon(points: &[(f64, f64)], height: f64) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    let mut closed = Vec::with_capacity(points.len() + 2);
    closed.push((first.0, height));
    closed.extend_from_slice(points);
    closed.push((last.0, height));
    polyline(&closed)
}

fn share(value: i64, whole: i64) -> f64 {
    if whole <= 0 || value <= 0 {
        return 0.0;
    }
    (value as f64 / whole as f64 * 100.0).min(100.0)
}
