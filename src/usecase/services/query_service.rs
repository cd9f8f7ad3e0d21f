use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::filter::{Dimension, FilterSet};
use crate::domain::entities::sales::{SalesFact, SalesFactTable};
use crate::domain::entities::view::{ChartData, ChartPoint, Grouping, Ordering, View};

/// Answers chart and dropdown queries against the shared fact table.
#[derive(Clone)]
pub struct QueryService {
    table: Arc<SalesFactTable>,
}

impl QueryService {
    pub fn new(table: Arc<SalesFactTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SalesFactTable {
        &self.table
    }

    pub fn recompute(&self, view: View, filters: &FilterSet) -> ChartData {
        recompute(&self.table, view, filters)
    }

    pub fn options(&self, dim: Dimension, filters: &FilterSet) -> Vec<String> {
        match dim {
            Dimension::Brand => brand_options(&self.table, filters.get(Dimension::ProductType)),
            _ => dimension_options(&self.table, dim),
        }
    }
}

/// Rows matching every active filter, in fact-table order. The table itself
/// is only borrowed.
pub fn apply_filters<'a>(table: &'a SalesFactTable, filters: &FilterSet) -> Vec<&'a SalesFact> {
    table
        .rows()
        .iter()
        .filter(|row| filters.matches(row))
        .collect()
}

pub fn aggregate(rows: &[&SalesFact], view: View) -> ChartData {
    let spec = view.spec();
    let mut buckets = group_sum(rows, spec.grouping);

    match spec.ordering {
        Ordering::KeyAscending => buckets.sort_by(|a, b| a.0.cmp(&b.0)),
        Ordering::TopByMeasure(limit) => {
            // stable: ties keep first-encountered order
            buckets.sort_by(|a, b| b.1.cmp(&a.1));
            buckets.truncate(limit);
        }
    }

    let points = buckets
        .into_iter()
        .map(|(key, value)| ChartPoint::new(key.label(), value))
        .collect();
    ChartData::new(view, points)
}

pub fn recompute(table: &SalesFactTable, view: View, filters: &FilterSet) -> ChartData {
    let rows = apply_filters(table, filters);
    let chart = aggregate(&rows, view);
    debug!(
        view = view.spec().id,
        filters = %filters,
        rows = rows.len(),
        points = chart.points.len(),
        "recomputed chart"
    );
    chart
}

/// Brands sold under the selected product type. Nothing selected means no
/// options.
pub fn brand_options(table: &SalesFactTable, selected_type: Option<&str>) -> Vec<String> {
    let Some(selected_type) = selected_type.filter(|value| !value.trim().is_empty()) else {
        return Vec::new();
    };
    distinct_sorted(
        table
            .rows()
            .iter()
            .filter(|row| row.product_type.as_deref() == Some(selected_type))
            .filter_map(|row| row.brand.as_deref()),
    )
}

pub fn dimension_options(table: &SalesFactTable, dim: Dimension) -> Vec<String> {
    distinct_sorted(table.rows().iter().filter_map(|row| dim.value_of(row)))
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|value| !value.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum BucketKey {
    Year(Option<i32>),
    Text(String),
}

impl BucketKey {
    fn of(grouping: Grouping, row: &SalesFact) -> Self {
        match grouping {
            Grouping::Year => BucketKey::Year(row.sale_year),
            Grouping::Field(dim) => BucketKey::Text(dim.value_of(row).unwrap_or("").to_string()),
        }
    }

    fn label(&self) -> String {
        match self {
            BucketKey::Year(Some(year)) => year.to_string(),
            BucketKey::Year(None) => String::new(),
            BucketKey::Text(text) => text.clone(),
        }
    }
}

/// Sums quantity per bucket, keeping buckets in first-encountered order.
/// Missing keys fall into the blank bucket. Sums saturate instead of
/// overflowing.
fn group_sum(rows: &[&SalesFact], grouping: Grouping) -> Vec<(BucketKey, i64)> {
    let mut positions: HashMap<BucketKey, usize> = HashMap::new();
    let mut buckets: Vec<(BucketKey, i64)> = Vec::new();
    for row in rows {
        let key = BucketKey::of(grouping, row);
        match positions.get(&key) {
            Some(&pos) => buckets[pos].1 = buckets[pos].1.saturating_add(row.quantity),
            None => {
                positions.insert(key.clone(), buckets.len());
                buckets.push((key, row.quantity));
            }
        }
    }
    buckets
}
