use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::entities::sales::{
    columns, non_blank, Customer, Product, Sale, SalesFact, SalesFactTable, Store,
};
use crate::usecase::ports::source::{SourceError, SourceLocation, SourceReader, TabularData};

const SALES_TABLE: &str = "sales";
const CUSTOMERS_TABLE: &str = "customers";
const STORES_TABLE: &str = "stores";
const PRODUCTS_TABLE: &str = "products";

/// Rows above the real customer data; the workbook carries two title rows
/// under the first (unnamed) header row.
const CUSTOMER_HEADER_ROWS: usize = 2;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
/// Day-first wins for ambiguous slashed dates; month-first only when the
/// day-first reading is impossible.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load {table} table")]
    Source {
        table: &'static str,
        #[source]
        source: SourceError,
    },
    #[error("{table} table is missing column {column:?}")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("{table} table, data row {row}: invalid sale date {value:?}")]
    InvalidDate {
        table: &'static str,
        row: usize,
        value: String,
    },
    #[error("{table} table, data row {row}: invalid quantity {value:?}")]
    InvalidQuantity {
        table: &'static str,
        row: usize,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSources {
    pub sales: SourceLocation,
    pub customers: SourceLocation,
    pub stores: SourceLocation,
    pub products: SourceLocation,
}

pub struct LoadService {
    reader: Arc<dyn SourceReader>,
}

impl LoadService {
    pub fn new(reader: Arc<dyn SourceReader>) -> Self {
        Self { reader }
    }

    /// Reads all four sources in order and joins them. Any failure aborts the
    /// whole load.
    pub fn load(&self, sources: &DatasetSources) -> Result<SalesFactTable, LoadError> {
        let sales = parse_sales(&self.read(SALES_TABLE, &sources.sales)?)?;
        let customers = parse_customers(&self.read(CUSTOMERS_TABLE, &sources.customers)?)?;
        let stores = parse_stores(&self.read(STORES_TABLE, &sources.stores)?)?;
        let products = parse_products(&self.read(PRODUCTS_TABLE, &sources.products)?)?;

        let table = join_sales(&sales, &products, &customers, &stores);
        if table.is_empty() {
            warn!(source = %sources.sales, "sales source has no data rows");
        }
        info!(
            rows = table.len(),
            total_quantity = table.total_quantity(),
            "joined sales fact table"
        );
        Ok(table)
    }

    fn read(
        &self,
        table: &'static str,
        location: &SourceLocation,
    ) -> Result<TabularData, LoadError> {
        let data = self
            .reader
            .read_table(location)
            .map_err(|source| LoadError::Source { table, source })?;
        info!(table, source = %location, rows = data.rows.len(), "loaded source");
        Ok(data)
    }
}

fn require_column(
    data: &TabularData,
    table: &'static str,
    column: &'static str,
) -> Result<usize, LoadError> {
    data.column_index(column)
        .ok_or(LoadError::MissingColumn { table, column })
}

pub fn parse_sales(data: &TabularData) -> Result<Vec<Sale>, LoadError> {
    let date_idx = require_column(data, SALES_TABLE, columns::SALE_DATE)?;
    let sku_idx = require_column(data, SALES_TABLE, columns::SKU)?;
    let store_idx = require_column(data, SALES_TABLE, columns::STORE_ID)?;
    let customer_idx = require_column(data, SALES_TABLE, columns::CUSTOMER_ID)?;
    let quantity_idx = require_column(data, SALES_TABLE, columns::QUANTITY)?;

    data.rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let date_text = data.cell(row, date_idx);
            let sale_date = if date_text.trim().is_empty() {
                None
            } else {
                Some(
                    parse_sale_date(date_text).ok_or_else(|| LoadError::InvalidDate {
                        table: SALES_TABLE,
                        row: idx + 1,
                        value: date_text.to_string(),
                    })?,
                )
            };

            let quantity_text = data.cell(row, quantity_idx);
            let quantity =
                parse_quantity(quantity_text).ok_or_else(|| LoadError::InvalidQuantity {
                    table: SALES_TABLE,
                    row: idx + 1,
                    value: quantity_text.to_string(),
                })?;

            Ok(Sale {
                sale_date,
                sku: normalize_key(data.cell(row, sku_idx)),
                store_id: normalize_key(data.cell(row, store_idx)),
                customer_id: normalize_key(data.cell(row, customer_idx)),
                quantity,
            })
        })
        .collect()
}

/// Drops the title rows, then takes id, first name and last name from the
/// first three columns by position.
pub fn parse_customers(data: &TabularData) -> Result<Vec<Customer>, LoadError> {
    let positional = [columns::CUSTOMER_ID, columns::FIRST_NAME, columns::LAST_NAME];
    if let Some(&column) = positional.get(data.columns.len()) {
        return Err(LoadError::MissingColumn {
            table: CUSTOMERS_TABLE,
            column,
        });
    }

    Ok(data
        .rows
        .iter()
        .skip(CUSTOMER_HEADER_ROWS)
        .filter_map(|row| {
            let id = normalize_key(data.cell(row, 0));
            if id.is_empty() {
                return None;
            }
            Some(Customer {
                id,
                first_name: non_blank(data.cell(row, 1)),
                last_name: non_blank(data.cell(row, 2)),
            })
        })
        .collect())
}

pub fn parse_stores(data: &TabularData) -> Result<Vec<Store>, LoadError> {
    let id_idx = require_column(data, STORES_TABLE, columns::STORE_ID)?;
    let name_idx = require_column(data, STORES_TABLE, columns::STORE_NAME)?;

    Ok(data
        .rows
        .iter()
        .filter_map(|row| {
            let id = normalize_key(data.cell(row, id_idx));
            (!id.is_empty()).then(|| Store {
                id,
                name: non_blank(data.cell(row, name_idx)),
            })
        })
        .collect())
}

pub fn parse_products(data: &TabularData) -> Result<Vec<Product>, LoadError> {
    let sku_idx = require_column(data, PRODUCTS_TABLE, columns::SKU)?;
    let name_idx = require_column(data, PRODUCTS_TABLE, columns::PRODUCT_NAME)?;
    let type_idx = require_column(data, PRODUCTS_TABLE, columns::PRODUCT_TYPE)?;
    let brand_idx = require_column(data, PRODUCTS_TABLE, columns::BRAND)?;

    Ok(data
        .rows
        .iter()
        .filter_map(|row| {
            let sku = normalize_key(data.cell(row, sku_idx));
            (!sku.is_empty()).then(|| Product {
                sku,
                name: non_blank(data.cell(row, name_idx)),
                product_type: non_blank(data.cell(row, type_idx)),
                brand: non_blank(data.cell(row, brand_idx)),
            })
        })
        .collect())
}

/// Left-joins every sale with product, customer and store. The result has
/// exactly one row per sale.
pub fn join_sales(
    sales: &[Sale],
    products: &[Product],
    customers: &[Customer],
    stores: &[Store],
) -> SalesFactTable {
    let products = index_by_key(PRODUCTS_TABLE, products, |p| p.sku.as_str());
    let customers = index_by_key(CUSTOMERS_TABLE, customers, |c| c.id.as_str());
    let stores = index_by_key(STORES_TABLE, stores, |s| s.id.as_str());

    let rows = sales
        .iter()
        .map(|sale| {
            SalesFact::new(
                sale,
                products.get(sale.sku.as_str()).copied(),
                customers.get(sale.customer_id.as_str()).copied(),
                stores.get(sale.store_id.as_str()).copied(),
            )
        })
        .collect();
    SalesFactTable::new(rows)
}

/// First occurrence of a key wins, so a duplicated dimension row can never
/// multiply sale rows.
fn index_by_key<'a, T>(
    table: &'static str,
    items: &'a [T],
    key: impl Fn(&'a T) -> &'a str,
) -> HashMap<&'a str, &'a T> {
    let mut index = HashMap::with_capacity(items.len());
    let mut duplicates = 0_usize;
    for item in items {
        match index.entry(key(item)) {
            Entry::Vacant(entry) => {
                entry.insert(item);
            }
            Entry::Occupied(_) => duplicates += 1,
        }
    }
    if duplicates > 0 {
        warn!(table, duplicates, "duplicate keys in dimension table, keeping first");
    }
    index
}

pub fn parse_sale_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|datetime| datetime.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        })
}

/// Blank counts as zero. Whole numbers written with a zero fraction are
/// accepted.
pub fn parse_quantity(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let value = trimmed.parse::<f64>().ok()?;
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

/// Join keys compare as text; `"7.0"` and `"7"` are the same key.
pub fn normalize_key(text: &str) -> String {
    let trimmed = text.trim();
    if let Some((whole, fraction)) = trimmed.split_once('.') {
        let is_integer = !whole.is_empty()
            && whole.chars().all(|c| c.is_ascii_digit())
            && !fraction.is_empty()
            && fraction.chars().all(|c| c == '0');
        if is_integer {
            return whole.to_string();
        }
    }
    trimmed.to_string()
}
