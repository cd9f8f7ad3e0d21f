use dioxus::prelude::*;

use crate::domain::entities::filter::FilterSet;
use crate::domain::entities::view::View;
use crate::ui::chart::render::Chart;
use crate::ui::components::dropdown::FilterDropdown;
use crate::ui::state::view_filters::{dropdowns_for, select_filter};
use crate::usecase::services::query_service::QueryService;

/// One view: its own filter dropdowns and its chart. Every change reruns the
/// filter and aggregation for this view only.
#[component]
pub fn ChartCard(view: View) -> Element {
    let service = use_context::<QueryService>();
    let mut filters = use_signal(FilterSet::new);

    let current = filters();
    let chart = service.recompute(view, &current);
    let dropdowns = dropdowns_for(view, &service, &current);
    let spec = view.spec();
    let title = chart.title;

    rsx! {
        section {
            id: "{spec.id}",
            style: "background: #fff; border: 1px solid #ddd; border-radius: 10px; padding: 16px; display: flex; flex-direction: column; gap: 12px;",
            h2 { style: "margin: 0; font-size: 18px; color: #223;", "{title}" }
            div {
                style: "display: flex; gap: 12px; flex-wrap: wrap; align-items: center;",
                {dropdowns.into_iter().map(|dropdown| {
                    let dim = dropdown.dimension;
                    rsx!(
                        FilterDropdown {
                            key: "{dim}",
                            model: dropdown,
                            on_select: move |value: String| {
                                let next = select_filter(&filters.peek(), dim, &value);
                                tracing::debug!(view = spec.id, filters = %next, "filter changed");
                                filters.set(next);
                            },
                        }
                    )
                })}
            }
            Chart { data: chart }
        }
    }
}
