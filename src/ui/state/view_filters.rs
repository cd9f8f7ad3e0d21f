use crate::domain::entities::filter::{Dimension, FilterSet};
use crate::domain::entities::view::View;
use crate::usecase::services::query_service::QueryService;

pub const ALL_OPTION_VALUE: &str = "";
pub const ALL_OPTION_LABEL: &str = "(Todos)";

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownModel {
    pub dimension: Dimension,
    pub label: &'static str,
    pub options: Vec<String>,
    pub selected: Option<String>,
}

impl DropdownModel {
    pub fn disabled(&self) -> bool {
        self.options.is_empty()
    }
}

/// Applies a dropdown change. Picking a different product type clears the
/// brand, since the brand list is derived from it.
pub fn select_filter(filters: &FilterSet, dim: Dimension, value: &str) -> FilterSet {
    let value = (value != ALL_OPTION_VALUE).then(|| value.to_string());
    let mut next = filters.clone();
    if dim == Dimension::ProductType && next.get(dim) != value.as_deref() {
        next.set(Dimension::Brand, None);
    }
    next.set(dim, value);
    next
}

pub fn dropdowns_for(view: View, service: &QueryService, filters: &FilterSet) -> Vec<DropdownModel> {
    view.spec()
        .filters
        .iter()
        .map(|&dim| DropdownModel {
            dimension: dim,
            label: dim.label(),
            options: service.options(dim, filters),
            selected: filters.get(dim).map(str::to_string),
        })
        .collect()
}
