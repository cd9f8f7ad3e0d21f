use dioxus::prelude::*;

use crate::domain::entities::view::{ChartData, ChartKind, NO_DATA_MESSAGE};
use crate::ui::chart::layout::{
    area_polygon, bars, color, conic_gradient, line_points, pie_slices, polyline, PLOT_HEIGHT,
    PLOT_WIDTH,
};

const AXIS_LABEL_STYLE: &str = "flex: 1; font-size: 11px; text-align: center; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;";

/// Draws a chart in the kind fixed for its view, or the no-data placeholder.
#[component]
pub fn Chart(data: ChartData) -> Element {
    if data.is_empty() {
        return rsx! {
            div {
                style: "height: {PLOT_HEIGHT}px; display: flex; align-items: center; justify-content: center; color: #888; border: 1px dashed #ccc; border-radius: 8px;",
                "{NO_DATA_MESSAGE}"
            }
        };
    }

    match data.kind {
        ChartKind::Histogram => rsx! { ColumnChart { data, gap_px: 0 } },
        ChartKind::Bar => rsx! { ColumnChart { data, gap_px: 8 } },
        ChartKind::HorizontalBar => rsx! { HorizontalBarChart { data } },
        ChartKind::Pie => rsx! { PieChart { data } },
        ChartKind::Line => rsx! { LineChart { data, filled: false } },
        ChartKind::Area => rsx! { LineChart { data, filled: true } },
    }
}

#[component]
fn ColumnChart(data: ChartData, gap_px: u32) -> Element {
    let bars = bars(&data);
    let category_label = data.category_label;
    let measure_label = data.measure_label;

    rsx! {
        div {
            style: "font-size: 11px; color: #666;",
            "{measure_label}"
        }
        div {
            style: "display: flex; align-items: flex-end; gap: {gap_px}px; height: {PLOT_HEIGHT}px; border-bottom: 1px solid #bbb;",
            {bars.iter().enumerate().map(|(idx, bar)| {
                let column_style = format!(
                    "width: 100%; height: {:.1}%; background: {};",
                    bar.percent,
                    color(if gap_px == 0 { 0 } else { idx })
                );
                let tooltip = format!("{}: {}", bar.label, bar.value);
                rsx!(
                    div {
                        key: "{bar.label}",
                        style: "flex: 1; height: 100%; display: flex; flex-direction: column; justify-content: flex-end; align-items: center;",
                        span { style: "font-size: 11px; color: #333;", "{bar.value}" }
                        div { style: "{column_style}", title: "{tooltip}" }
                    }
                )
            })}
        }
        div {
            style: "display: flex; gap: {gap_px}px;",
            {bars.iter().map(|bar| rsx!(
                span { key: "{bar.label}", style: AXIS_LABEL_STYLE, title: "{bar.label}", "{bar.label}" }
            ))}
        }
        div {
            style: "text-align: center; font-size: 12px; color: #666; margin-top: 4px;",
            "{category_label}"
        }
    }
}

#[component]
fn HorizontalBarChart(data: ChartData) -> Element {
    let bars = bars(&data);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 6px;",
            {bars.iter().enumerate().map(|(idx, bar)| {
                let bar_style = format!(
                    "width: {:.1}%; height: 18px; background: {}; border-radius: 0 4px 4px 0;",
                    bar.percent,
                    color(idx)
                );
                rsx!(
                    div {
                        key: "{bar.label}",
                        style: "display: grid; grid-template-columns: 180px 1fr 60px; align-items: center; gap: 8px;",
                        span { style: "font-size: 12px; text-align: right; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", title: "{bar.label}", "{bar.label}" }
                        div { style: "{bar_style}" }
                        span { style: "font-size: 12px; color: #333;", "{bar.value}" }
                    }
                )
            })}
        }
    }
}

#[component]
fn PieChart(data: ChartData) -> Element {
    let slices = pie_slices(&data);
    let gradient = conic_gradient(&slices);

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 24px; flex-wrap: wrap;",
            div {
                style: "width: {PLOT_HEIGHT}px; height: {PLOT_HEIGHT}px; border-radius: 50%; background: {gradient};",
            }
            ul {
                style: "list-style: none; padding: 0; margin: 0; display: flex; flex-direction: column; gap: 4px;",
                {slices.iter().map(|slice| {
                    let swatch = format!(
                        "display: inline-block; width: 12px; height: 12px; background: {}; margin-right: 6px;",
                        slice.color
                    );
                    let share = format!("{:.1}%", slice.share());
                    rsx!(
                        li {
                            key: "{slice.label}",
                            style: "font-size: 12px;",
                            span { style: "{swatch}" }
                            "{slice.label}: {slice.value} ({share})"
                        }
                    )
                })}
            }
        }
    }
}

#[component]
fn LineChart(data: ChartData, filled: bool) -> Element {
    let points = line_points(&data, PLOT_WIDTH, PLOT_HEIGHT);
    let line = polyline(&points);
    let area = area_polygon(&points, PLOT_HEIGHT);
    let labels: Vec<String> = data
        .points
        .iter()
        .map(|point| point.display_label().to_string())
        .collect();
    let category_label = data.category_label;
    let stroke = color(0);

    rsx! {
        svg {
            width: "100%",
            height: "{PLOT_HEIGHT}",
            view_box: "0 0 {PLOT_WIDTH} {PLOT_HEIGHT}",
            preserve_aspect_ratio: "none",
            if filled {
                polygon { points: "{area}", fill: "{stroke}", stroke: "none", style: "opacity: 0.3;" }
            }
            polyline { points: "{line}", fill: "none", stroke: "{stroke}", stroke_width: "2" }
        }
        div {
            style: "display: flex; gap: 4px;",
            {labels.iter().zip(data.points.iter()).map(|(label, point)| rsx!(
                span { key: "{label}", style: AXIS_LABEL_STYLE, title: "{label}: {point.value}", "{label}" }
            ))}
        }
        div {
            style: "text-align: center; font-size: 12px; color: #666; margin-top: 4px;",
            "{category_label}"
        }
    }
}
