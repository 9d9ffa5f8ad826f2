//! Catalog product entry.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product in the static catalog.
///
/// The catalog itself is externally supplied (the CLI seeds it from a YAML
/// file); the stores only ever copy display fields out of it, never hold a
/// reference into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub subcategory: String,
    /// Unit price in USD.
    pub price: Decimal,
    pub description: String,
    pub images: Vec<String>,
    pub rating: f32,
    pub review_count: u32,
    pub in_stock: bool,
    pub stock_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub slug: String,
    /// One or two keywords for image search placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_ai_hint: Option<String>,
}

impl Product {
    /// The main image for the product, when one exists.
    #[must_use]
    pub fn main_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
