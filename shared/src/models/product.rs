//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity (an entry of the `catalogue` collection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Unit price, serialized as a JSON number
    pub price: Decimal,
    /// Units on hand; only order placement and admin updates change it
    pub stock: u32,
    pub category_id: u64,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub views: u32,
    /// Unix seconds
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: Option<u32>,
    pub category_id: u64,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub category_id: Option<u64>,
    pub images: Option<Vec<String>>,
}

/// Listing order for `GET /api/products`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    /// Newest first
    New,
    /// Best-seller ranking first, unranked products last
    Best,
    PriceAsc,
    PriceDesc,
}

/// Query parameters for `GET /api/products`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    pub category_id: Option<u64>,
    pub q: Option<String>,
    pub sort: Option<ProductSort>,
}

/// Response of `GET /api/products/category/{category_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsByCategory {
    /// Category name
    pub category: String,
    pub total: usize,
    pub products: Vec<Product>,
}
