//! Integration tests for WalmartChain.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p walmartchain-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cross-store checkout choreography
//! - `persistence` - Snapshot round-trips and reload survival
//!
//! The helpers below build catalog products and wallet fixtures shared by the
//! test files.

use chrono::Utc;
use rust_decimal::Decimal;

use walmartchain_core::{CurrencyId, Product, ProductId, WalletCurrency};

/// Build a minimal in-stock catalog product.
#[must_use]
pub fn sample_product(id: &str, price: Decimal) -> Product {
    let now = Utc::now();
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        brand: "Acme".to_owned(),
        category: "Groceries".to_owned(),
        subcategory: "Snacks".to_owned(),
        price,
        description: String::new(),
        images: vec!["https://placehold.co/600x400.png".to_owned()],
        rating: 4.0,
        review_count: 10,
        in_stock: true,
        stock_count: 100,
        weight: None,
        dimensions: None,
        created_at: now,
        updated_at: now,
        slug: format!("product-{id}"),
        data_ai_hint: None,
    }
}

/// Build a wallet catalog entry.
#[must_use]
pub fn sample_currency(
    id: &str,
    name: &str,
    symbol: &str,
    balance: Decimal,
    price_in_inr: Decimal,
) -> WalletCurrency {
    WalletCurrency {
        id: CurrencyId::new(id),
        name: name.to_owned(),
        symbol: symbol.to_owned(),
        balance,
        price_in_inr,
        color: None,
    }
}
