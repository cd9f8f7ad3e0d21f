use std::collections::BTreeMap;
use std::fmt;

use crate::domain::entities::sales::{columns, SalesFact};

/// A fact-table field a dashboard dropdown can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    ProductName,
    StoreName,
    CustomerName,
    Brand,
    ProductType,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::ProductName,
        Dimension::StoreName,
        Dimension::CustomerName,
        Dimension::Brand,
        Dimension::ProductType,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Dimension::ProductName => columns::PRODUCT_NAME,
            Dimension::StoreName => columns::STORE_NAME,
            Dimension::CustomerName => columns::CUSTOMER_NAME,
            Dimension::Brand => columns::BRAND,
            Dimension::ProductType => columns::PRODUCT_TYPE,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Dimension::ProductName => "product",
            Dimension::StoreName => "store",
            Dimension::CustomerName => "customer",
            Dimension::Brand => "brand",
            Dimension::ProductType => "product_type",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::ProductName => "Produto",
            Dimension::StoreName => "Loja",
            Dimension::CustomerName => "Cliente",
            Dimension::Brand => "Marca",
            Dimension::ProductType => "Tipo do Produto",
        }
    }

    /// Accepts either the workbook header or the ASCII key. Unknown names
    /// yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|dim| dim.column() == name || dim.key() == name)
    }

    pub fn value_of(self, fact: &SalesFact) -> Option<&str> {
        match self {
            Dimension::ProductName => fact.product_name.as_deref(),
            Dimension::StoreName => fact.store_name.as_deref(),
            Dimension::CustomerName => Some(fact.customer_name.as_str()),
            Dimension::Brand => fact.brand.as_deref(),
            Dimension::ProductType => fact.product_type.as_deref(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Selected values keyed by dimension. Dimensions without a value are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    selected: BTreeMap<Dimension, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter set from loosely typed pairs. Unknown dimension names
    /// and empty values are ignored.
    #[allow(dead_code)]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filters = Self::new();
        for (name, value) in pairs {
            if let Some(dim) = Dimension::from_name(name.as_ref()) {
                filters.set(dim, value.map(Into::into));
            }
        }
        filters
    }

    pub fn with(mut self, dim: Dimension, value: impl Into<String>) -> Self {
        self.set(dim, Some(value.into()));
        self
    }

    pub fn set(&mut self, dim: Dimension, value: Option<String>) {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(value) => {
                self.selected.insert(dim, value);
            }
            None => {
                self.selected.remove(&dim);
            }
        }
    }

    pub fn get(&self, dim: Dimension) -> Option<&str> {
        self.selected.get(&dim).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn active(&self) -> impl Iterator<Item = (Dimension, &str)> {
        self.selected.iter().map(|(dim, value)| (*dim, value.as_str()))
    }

    /// Exact, case-sensitive match on every active dimension.
    pub fn matches(&self, fact: &SalesFact) -> bool {
        self.active()
            .all(|(dim, value)| dim.value_of(fact) == Some(value))
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(none)");
        }
        let mut first = true;
        for (dim, value) in self.active() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{dim}={value:?}")?;
            first = false;
        }
        Ok(())
    }
}
