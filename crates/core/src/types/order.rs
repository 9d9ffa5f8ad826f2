//! Completed purchase records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartItem;
use super::id::{OrderId, ProductId};
use super::status::{OrderStatus, PaymentMethod};

/// One line of a completed order.
///
/// Values are copied out of the cart at checkout time; an order item never
/// references live cart or catalog state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    /// Unit price in USD at the time of purchase.
    pub price: Decimal,
    /// Main image for the item.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_ai_hint: Option<String>,
}

impl OrderItem {
    /// Copy a cart line into an order line.
    #[must_use]
    pub fn from_cart_item(item: &CartItem) -> Self {
        Self {
            product_id: item.id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            price: item.price,
            image: item.images.first().cloned().unwrap_or_default(),
            data_ai_hint: item.data_ai_hint.clone(),
        }
    }
}

/// Crypto payment details attached to an order paid from the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoPayment {
    /// Display name of the currency used, e.g. "Bitcoin".
    pub currency: String,
    /// Ticker symbol, e.g. "BTC".
    pub symbol: String,
    /// Amount paid, in units of that currency (fee included).
    pub amount: Decimal,
}

/// An immutable record of a completed (simulated) purchase.
///
/// Once created, item contents and totals are never mutated; the status field
/// is the one exception, updated only through the store's explicit status
/// entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<OrderItem>,
    /// Total amount in USD.
    #[serde(rename = "totalAmountUSD")]
    pub total_amount_usd: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto: Option<CryptoPayment>,
    pub purchase_date: DateTime<Utc>,
    pub status: OrderStatus,
    /// Mock transaction reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_item_copies_cart_values() {
        let cart_item = CartItem {
            id: ProductId::new("p1"),
            name: "Smartwatch".to_owned(),
            price: Decimal::new(4999, 2),
            images: vec!["https://placehold.co/600x400.png".to_owned()],
            data_ai_hint: Some("smartwatch gadget".to_owned()),
            quantity: 2,
        };

        let order_item = OrderItem::from_cart_item(&cart_item);
        assert_eq!(order_item.product_id, cart_item.id);
        assert_eq!(order_item.quantity, 2);
        assert_eq!(order_item.price, cart_item.price);
        assert_eq!(order_item.image, "https://placehold.co/600x400.png");
    }

    #[test]
    fn test_order_serializes_total_with_usd_suffix() {
        let order = Order {
            id: OrderId::new("o1"),
            items: Vec::new(),
            total_amount_usd: Decimal::from(35),
            payment_method: PaymentMethod::Crypto,
            crypto: None,
            purchase_date: Utc::now(),
            status: OrderStatus::Processing,
            transaction_id: None,
        };

        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("totalAmountUSD").is_some());
        assert_eq!(json["status"], "Processing");
    }
}
