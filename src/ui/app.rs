use dioxus::prelude::*;

use crate::domain::entities::view::View;
use crate::ui::components::chart_card::ChartCard;
use crate::usecase::services::query_service::QueryService;

pub const PAGE_TITLE: &str = "Dashboard de Vendas";

pub fn root_container_style() -> &'static str {
    "min-height: 100vh; box-sizing: border-box; padding: 16px 24px; background: #f4f6fa; font-family: sans-serif; display: flex; flex-direction: column; gap: 16px;"
}

pub fn page_title_style() -> &'static str {
    "text-align: center; color: darkblue; margin: 0;"
}

pub fn chart_grid_style() -> &'static str {
    "display: grid; grid-template-columns: repeat(auto-fit, minmax(520px, 1fr)); gap: 16px;"
}

pub fn summary_line(rows: usize, total_quantity: i64) -> String {
    format!("{rows} vendas · {total_quantity} unidades vendidas")
}

#[component]
pub fn App() -> Element {
    let service = use_context::<QueryService>();
    let summary = summary_line(service.table().len(), service.table().total_quantity());

    rsx! {
        div {
            style: root_container_style(),
            h1 { style: page_title_style(), "{PAGE_TITLE}" }
            p { style: "text-align: center; color: #555; margin: 0;", "{summary}" }
            div {
                style: chart_grid_style(),
                for view in View::ALL {
                    ChartCard { key: "{view.spec().id}", view }
                }
            }
        }
    }
}
