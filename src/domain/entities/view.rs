use crate::domain::entities::filter::Dimension;
use crate::domain::entities::sales::columns;

pub const TOP_N: usize = 10;
pub const NO_DATA_MESSAGE: &str = "Sem dados para os filtros selecionados";
pub const BLANK_LABEL: &str = "(sem informação)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    SalesByYear,
    TopCustomers,
    TopProducts,
    SalesByStore,
    BrandDistribution,
    SalesByProductType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Histogram,
    Bar,
    Pie,
    HorizontalBar,
    Area,
    Line,
}

/// What a view groups its rows by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Year,
    Field(Dimension),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    KeyAscending,
    TopByMeasure(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSpec {
    pub view: View,
    pub id: &'static str,
    pub title: &'static str,
    pub filters: &'static [Dimension],
    pub grouping: Grouping,
    pub ordering: Ordering,
    pub chart: ChartKind,
}

pub const VIEW_TABLE: [ViewSpec; 6] = [
    ViewSpec {
        view: View::SalesByYear,
        id: "sales-by-year",
        title: "Vendas por Ano",
        filters: &[Dimension::ProductType, Dimension::Brand, Dimension::StoreName],
        grouping: Grouping::Year,
        ordering: Ordering::KeyAscending,
        chart: ChartKind::Histogram,
    },
    ViewSpec {
        view: View::TopCustomers,
        id: "top-customers",
        title: "Top 10 Clientes por Quantidade Vendida",
        filters: &[Dimension::StoreName, Dimension::ProductType],
        grouping: Grouping::Field(Dimension::CustomerName),
        ordering: Ordering::TopByMeasure(TOP_N),
        chart: ChartKind::Bar,
    },
    ViewSpec {
        view: View::TopProducts,
        id: "top-products",
        title: "Top 10 Produtos por Quantidade Vendida",
        filters: &[Dimension::StoreName, Dimension::ProductType, Dimension::Brand],
        grouping: Grouping::Field(Dimension::ProductName),
        ordering: Ordering::TopByMeasure(TOP_N),
        chart: ChartKind::HorizontalBar,
    },
    ViewSpec {
        view: View::SalesByStore,
        id: "sales-by-store",
        title: "Vendas por Loja",
        filters: &[Dimension::ProductType, Dimension::Brand],
        grouping: Grouping::Field(Dimension::StoreName),
        ordering: Ordering::KeyAscending,
        chart: ChartKind::Area,
    },
    ViewSpec {
        view: View::BrandDistribution,
        id: "brand-distribution",
        title: "Distribuição de Vendas por Marca",
        filters: &[Dimension::StoreName, Dimension::ProductType],
        grouping: Grouping::Field(Dimension::Brand),
        ordering: Ordering::KeyAscending,
        chart: ChartKind::Pie,
    },
    ViewSpec {
        view: View::SalesByProductType,
        id: "sales-by-product-type",
        title: "Vendas por Tipo de Produto",
        filters: &[Dimension::StoreName, Dimension::CustomerName],
        grouping: Grouping::Field(Dimension::ProductType),
        ordering: Ordering::KeyAscending,
        chart: ChartKind::Line,
    },
];

impl View {
    pub const ALL: [View; 6] = [
        View::SalesByYear,
        View::TopCustomers,
        View::TopProducts,
        View::SalesByStore,
        View::BrandDistribution,
        View::SalesByProductType,
    ];

    pub fn spec(self) -> &'static ViewSpec {
        match self {
            View::SalesByYear => &VIEW_TABLE[0],
            View::TopCustomers => &VIEW_TABLE[1],
            View::TopProducts => &VIEW_TABLE[2],
            View::SalesByStore => &VIEW_TABLE[3],
            View::BrandDistribution => &VIEW_TABLE[4],
            View::SalesByProductType => &VIEW_TABLE[5],
        }
    }

    pub fn category_label(self) -> &'static str {
        match self.spec().grouping {
            Grouping::Year => columns::YEAR,
            Grouping::Field(dim) => dim.column(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: String,
    pub value: i64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Label for display; the blank bucket gets a placeholder.
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            BLANK_LABEL
        } else {
            &self.label
        }
    }
}

/// Category/measure series for one chart. An empty series means there was no
/// data for the active filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartData {
    pub view: View,
    pub kind: ChartKind,
    pub title: &'static str,
    pub category_label: &'static str,
    pub measure_label: &'static str,
    pub points: Vec<ChartPoint>,
}

impl ChartData {
    pub fn new(view: View, points: Vec<ChartPoint>) -> Self {
        let spec = view.spec();
        Self {
            view,
            kind: spec.chart,
            title: spec.title,
            category_label: view.category_label(),
            measure_label: columns::QUANTITY,
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.points
            .iter()
            .fold(0_i64, |total, point| total.saturating_add(point.value))
    }

    pub fn max_value(&self) -> i64 {
        self.points.iter().map(|point| point.value).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn view_table_is_indexed_by_view() {
        for view in View::ALL {
            assert_eq!(view.spec().view, view, "spec for {view:?} should match");
        }
    }

    #[test]
    fn every_view_uses_a_distinct_chart_kind() {
        let kinds: HashSet<ChartKind> = VIEW_TABLE.iter().map(|spec| spec.chart).collect();
        assert_eq!(kinds.len(), VIEW_TABLE.len());
        assert_eq!(View::BrandDistribution.spec().chart, ChartKind::Pie);
    }

    #[test]
    fn only_top_views_are_truncated() {
        for view in View::ALL {
            let truncated = matches!(view.spec().ordering, Ordering::TopByMeasure(TOP_N));
            let expected = matches!(view, View::TopCustomers | View::TopProducts);
            assert_eq!(truncated, expected, "unexpected ordering for {view:?}");
        }
    }

    #[test]
    fn category_label_follows_grouping() {
        assert_eq!(View::SalesByYear.category_label(), "Ano");
        assert_eq!(View::TopCustomers.category_label(), "Nome Cliente");
        assert_eq!(View::SalesByStore.category_label(), "Nome da Loja");
    }

    #[test]
    fn blank_points_get_placeholder_label() {
        assert_eq!(ChartPoint::new("", 3).display_label(), BLANK_LABEL);
        assert_eq!(ChartPoint::new(" ", 3).display_label(), BLANK_LABEL);
        assert_eq!(ChartPoint::new("Centro", 3).display_label(), "Centro");
    }

    #[test]
    fn chart_data_totals_points() {
        let data = ChartData::new(
            View::SalesByStore,
            vec![ChartPoint::new("A", 8), ChartPoint::new("B", 2)],
        );
        assert_eq!(data.total(), 10);
        assert_eq!(data.max_value(), 8);
        assert_eq!(data.kind, ChartKind::Area);
        assert_eq!(data.title, View::SalesByStore.spec().title);
        assert!(!data.is_empty());
        assert!(ChartData::new(View::SalesByStore, Vec::new()).is_empty());
    }
}
