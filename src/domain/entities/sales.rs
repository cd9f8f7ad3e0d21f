use chrono::{Datelike, NaiveDate};

/// Header names used by the sales workbooks.
pub mod columns {
    pub const SALE_DATE: &str = "Data da Venda";
    pub const SKU: &str = "SKU";
    pub const STORE_ID: &str = "ID Loja";
    pub const CUSTOMER_ID: &str = "ID Cliente";
    pub const QUANTITY: &str = "Qtd Vendida";
    pub const PRODUCT_NAME: &str = "Produto";
    pub const PRODUCT_TYPE: &str = "Tipo do Produto";
    pub const BRAND: &str = "Marca";
    pub const STORE_NAME: &str = "Nome da Loja";
    pub const CUSTOMER_NAME: &str = "Nome Cliente";
    pub const FIRST_NAME: &str = "Primeiro Nome";
    pub const LAST_NAME: &str = "Sobrenome";
    pub const YEAR: &str = "Ano";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub sale_date: Option<NaiveDate>,
    pub sku: String,
    pub store_id: String,
    pub customer_id: String,
    pub quantity: i64,
}

impl Sale {
    pub fn year(&self) -> Option<i32> {
        self.sale_date.map(|date| date.year())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub sku: String,
    pub name: Option<String>,
    pub product_type: Option<String>,
    pub brand: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub id: String,
    pub name: Option<String>,
}

/// One sale line joined with its product, customer and store.
///
/// Dimension fields are `None` when the join found no match or the matched
/// cell was blank. `customer_name` is always present: missing name parts are
/// concatenated as empty strings, so an unmatched customer yields `" "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesFact {
    pub sale_date: Option<NaiveDate>,
    pub sale_year: Option<i32>,
    pub sku: String,
    pub store_id: String,
    pub customer_id: String,
    pub quantity: i64,
    pub product_name: Option<String>,
    pub product_type: Option<String>,
    pub brand: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub customer_name: String,
    pub store_name: Option<String>,
}

impl SalesFact {
    pub fn new(
        sale: &Sale,
        product: Option<&Product>,
        customer: Option<&Customer>,
        store: Option<&Store>,
    ) -> Self {
        let first_name = customer.and_then(|c| c.first_name.clone());
        let last_name = customer.and_then(|c| c.last_name.clone());
        let customer_name = customer
            .map(Customer::full_name)
            .unwrap_or_else(|| full_name(None, None));

        Self {
            sale_date: sale.sale_date,
            sale_year: sale.year(),
            sku: sale.sku.clone(),
            store_id: sale.store_id.clone(),
            customer_id: sale.customer_id.clone(),
            quantity: sale.quantity,
            product_name: product.and_then(|p| p.name.clone()),
            product_type: product.and_then(|p| p.product_type.clone()),
            brand: product.and_then(|p| p.brand.clone()),
            first_name,
            last_name,
            customer_name,
            store_name: store.and_then(|s| s.name.clone()),
        }
    }
}

/// The joined fact table. Built once at startup and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesFactTable {
    rows: Vec<SalesFact>,
}

impl SalesFactTable {
    pub fn new(rows: Vec<SalesFact>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SalesFact] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_quantity(&self) -> i64 {
        self.rows
            .iter()
            .fold(0_i64, |total, row| total.saturating_add(row.quantity))
    }
}

pub fn full_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
}

/// Trims a cell and maps blank text to `None`.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(date: Option<NaiveDate>) -> Sale {
        Sale {
            sale_date: date,
            sku: "SKU1".to_string(),
            store_id: "1".to_string(),
            customer_id: "10".to_string(),
            quantity: 4,
        }
    }

    #[test]
    fn full_name_keeps_trailing_space_when_last_name_missing() {
        assert_eq!(full_name(Some("Ana"), None), "Ana ");
        assert_eq!(full_name(None, Some("Silva")), " Silva");
        assert_eq!(full_name(None, None), " ");
        assert_eq!(full_name(Some("Ana"), Some("Silva")), "Ana Silva");
    }

    #[test]
    fn fact_without_matches_leaves_dimension_fields_blank() {
        let date = NaiveDate::from_ymd_opt(2022, 3, 9);
        let fact = SalesFact::new(&sale(date), None, None, None);

        assert_eq!(fact.sale_year, Some(2022));
        assert_eq!(fact.quantity, 4);
        assert_eq!(fact.product_name, None);
        assert_eq!(fact.store_name, None);
        assert_eq!(fact.customer_name, " ");
    }

    #[test]
    fn fact_copies_matched_dimension_fields() {
        let product = Product {
            sku: "SKU1".to_string(),
            name: Some("Notebook".to_string()),
            product_type: Some("Eletrônicos".to_string()),
            brand: Some("X".to_string()),
        };
        let customer = Customer {
            id: "10".to_string(),
            first_name: Some("Ana".to_string()),
            last_name: None,
        };
        let store = Store {
            id: "1".to_string(),
            name: Some("Centro".to_string()),
        };

        let fact = SalesFact::new(&sale(None), Some(&product), Some(&customer), Some(&store));

        assert_eq!(fact.sale_year, None);
        assert_eq!(fact.product_name.as_deref(), Some("Notebook"));
        assert_eq!(fact.brand.as_deref(), Some("X"));
        assert_eq!(fact.customer_name, "Ana ");
        assert_eq!(fact.customer_name, customer.full_name());
        assert_eq!(fact.store_name.as_deref(), Some("Centro"));
    }

    #[test]
    fn non_blank_trims_and_drops_empty_cells() {
        assert_eq!(non_blank("  Marca  "), Some("Marca".to_string()));
        assert_eq!(non_blank("   "), None);
        assert_eq!(non_blank(""), None);
    }
}
