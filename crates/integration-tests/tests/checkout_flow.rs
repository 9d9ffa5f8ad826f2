//! Integration tests for the cross-store checkout choreography.
//!
//! These tests drive the coordinator exactly the way a paying view would:
//! fill the cart, quote, pay, and observe the end state of all four stores.

use std::sync::Arc;

use rust_decimal::Decimal;

use walmartchain_core::{CurrencyId, NotificationCategory, OrderStatus, PaymentMethod};
use walmartchain_integration_tests::{sample_currency, sample_product};
use walmartchain_storefront::{
    CartStore, Checkout, CheckoutError, CryptoNetwork, MemoryStorage, NotificationStore,
    OrderStore, Storage, WalletStore,
};

fn fixture() -> (
    Checkout,
    CartStore,
    WalletStore,
    OrderStore,
    NotificationStore,
) {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let cart = CartStore::new(Arc::clone(&storage));
    let wallet = WalletStore::with_catalog(vec![
        sample_currency("inr", "Indian Rupee", "INR", Decimal::from(15_000), Decimal::ONE),
        sample_currency(
            "btc",
            "Bitcoin",
            "BTC",
            Decimal::ONE,
            Decimal::from(5_000_000),
        ),
        sample_currency("usdt", "Tether", "USDT", Decimal::from(500), Decimal::from(83)),
    ]);
    let orders = OrderStore::new(Arc::clone(&storage));
    let notifications = NotificationStore::new(storage);

    let checkout = Checkout::new(
        cart.clone(),
        wallet.clone(),
        orders.clone(),
        notifications.clone(),
    );
    (checkout, cart, wallet, orders, notifications)
}

// =============================================================================
// Successful Payment Tests
// =============================================================================

#[test]
fn test_payment_deducts_wallet_records_order_clears_cart_and_notifies() {
    let (checkout, cart, wallet, orders, notifications) = fixture();

    cart.add_to_cart(&sample_product("p1", Decimal::from(100)));
    cart.add_to_cart(&sample_product("p2", Decimal::from(50)));
    cart.add_to_cart(&sample_product("p2", Decimal::from(50)));

    let order = checkout
        .pay_with_crypto(&CurrencyId::new("usdt"), CryptoNetwork::Erc20)
        .expect("payment succeeds");

    // 200 USD + 1.50 USD fee, at 1 USDT per USD
    let usdt = wallet.currency(&CurrencyId::new("usdt")).expect("usdt entry");
    assert_eq!(usdt.balance, Decimal::new(29_850, 2));

    // Order captured the cart contents by value
    let recorded = orders.order(&order.id).expect("order recorded");
    assert_eq!(recorded.items.len(), 2);
    assert_eq!(recorded.total_amount_usd, Decimal::from(200));
    assert_eq!(recorded.status, OrderStatus::Processing);
    assert_eq!(recorded.payment_method, PaymentMethod::Crypto);

    // Cart cleared and an order notification pushed
    assert!(cart.items().is_empty());
    let feed = notifications.notifications();
    assert_eq!(feed.len(), 1);
    assert_eq!(
        feed.first().expect("feed entry").category,
        Some(NotificationCategory::Order)
    );
}

#[test]
fn test_quote_matches_payment_amount() {
    let (checkout, cart, wallet, ..) = fixture();
    cart.add_to_cart(&sample_product("p1", Decimal::from(100)));

    let quote = checkout.quote(&CurrencyId::new("btc")).expect("quote");
    let before = wallet
        .currency(&CurrencyId::new("btc"))
        .expect("btc entry")
        .balance;

    checkout
        .pay_with_crypto(&CurrencyId::new("btc"), CryptoNetwork::Erc20)
        .expect("payment succeeds");

    let after = wallet
        .currency(&CurrencyId::new("btc"))
        .expect("btc entry")
        .balance;
    assert_eq!(before - after, quote.total_in_currency);
}

// =============================================================================
// Failed Payment Tests
// =============================================================================

#[test]
fn test_insufficient_balance_mutates_nothing() {
    let (checkout, cart, wallet, orders, notifications) = fixture();
    cart.add_to_cart(&sample_product("expensive", Decimal::from(10_000)));

    let err = checkout
        .pay_with_crypto(&CurrencyId::new("usdt"), CryptoNetwork::Erc20)
        .expect_err("balance too small");
    assert!(matches!(err, CheckoutError::InsufficientBalance { .. }));

    assert_eq!(cart.item_count(), 1);
    assert_eq!(
        wallet
            .currency(&CurrencyId::new("usdt"))
            .expect("usdt entry")
            .balance,
        Decimal::from(500)
    );
    assert!(orders.orders().is_empty());
    assert!(notifications.notifications().is_empty());
}

#[test]
fn test_fiat_and_unknown_currencies_rejected_before_mutation() {
    let (checkout, cart, ..) = fixture();
    cart.add_to_cart(&sample_product("p1", Decimal::from(10)));

    assert!(matches!(
        checkout.pay_with_crypto(&CurrencyId::new("inr"), CryptoNetwork::Erc20),
        Err(CheckoutError::FiatNotSupported)
    ));
    assert!(matches!(
        checkout.pay_with_crypto(&CurrencyId::new("xyz"), CryptoNetwork::Erc20),
        Err(CheckoutError::UnknownCurrency(_))
    ));
    assert_eq!(cart.item_count(), 1);
}

#[test]
fn test_empty_cart_rejected() {
    let (checkout, ..) = fixture();

    assert!(matches!(
        checkout.pay_with_crypto(&CurrencyId::new("usdt"), CryptoNetwork::Erc20),
        Err(CheckoutError::EmptyCart)
    ));
}

// =============================================================================
// Sequencing Tests
// =============================================================================

#[test]
fn test_two_sequential_payments_accumulate_orders_newest_first() {
    let (checkout, cart, _, orders, _) = fixture();

    cart.add_to_cart(&sample_product("first", Decimal::from(10)));
    let first = checkout
        .pay_with_crypto(&CurrencyId::new("usdt"), CryptoNetwork::Erc20)
        .expect("first payment");

    cart.add_to_cart(&sample_product("second", Decimal::from(20)));
    let second = checkout
        .pay_with_crypto(&CurrencyId::new("usdt"), CryptoNetwork::Trc20)
        .expect("second payment");

    let history = orders.orders();
    assert_eq!(history.len(), 2);
    assert_eq!(history.first().expect("newest").id, second.id);
    assert_eq!(history.last().expect("oldest").id, first.id);
}
