//! Cart line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// A product snapshot plus a quantity.
///
/// Display fields are copied from the product at add-time, so later catalog
/// changes never affect a cart already in progress. A persisted item always
/// has `quantity >= 1`; updates that would drive it to zero remove the item
/// instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price in USD at add-time.
    pub price: Decimal,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_ai_hint: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Snapshot a catalog product as a fresh line item with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            images: product.images.clone(),
            data_ai_hint: product.data_ai_hint.clone(),
            quantity: 1,
        }
    }

    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = CartItem {
            id: ProductId::new("p1"),
            name: "Bananas".to_owned(),
            price: Decimal::new(250, 2),
            images: Vec::new(),
            data_ai_hint: None,
            quantity: 4,
        };

        assert_eq!(item.line_total(), Decimal::from(10));
    }
}
