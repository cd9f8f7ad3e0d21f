use dioxus::prelude::*;

use crate::ui::state::view_filters::{DropdownModel, ALL_OPTION_LABEL, ALL_OPTION_VALUE};

#[component]
pub fn FilterDropdown(model: DropdownModel, on_select: EventHandler<String>) -> Element {
    let selected = model.selected.clone().unwrap_or_default();
    let nothing_selected = selected.is_empty();
    let disabled = model.disabled();
    let label = model.label;

    rsx! {
        label {
            style: "display: inline-flex; align-items: center; gap: 6px; font-size: 13px;",
            span { "{label}" }
            select {
                style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; min-width: 160px;",
                disabled: disabled,
                onchange: move |event: FormEvent| on_select.call(event.value()),
                option { value: ALL_OPTION_VALUE, selected: nothing_selected, "{ALL_OPTION_LABEL}" }
                {model.options.iter().map(|opt| {
                    let is_selected = *opt == selected;
                    rsx!(
                        option { key: "{opt}", value: "{opt}", selected: is_selected, "{opt}" }
                    )
                })}
            }
        }
    }
}
