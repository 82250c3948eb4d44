//! The product record shown by the catalog

use serde::{Deserialize, Serialize};

/// One product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

impl Product {
    /// Create a new product
    pub fn new(
        id: u64,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            stock,
        }
    }
}

crate::impl_record!(
    Product,
    id: id,
    category: category,
    fields: [name, category, price, stock],
    sortable: [name, price]
);
