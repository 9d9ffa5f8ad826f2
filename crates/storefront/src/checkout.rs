//! Checkout coordinator.
//!
//! The stores have no awareness of each other; this module owns the one
//! cross-store choreography in the system. Every pre-condition is validated
//! before the first mutation, and mutations then run in a fixed order:
//! deduct the wallet balance, record the order, clear the cart, push a
//! notification. Store mutations are infallible, so once the first mutation
//! runs the sequence cannot fail part-way and no compensating action exists.

use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument};

use walmartchain_core::money::{crypto_transaction_fee_usd, usd_to_currency_units};
use walmartchain_core::{
    CryptoPayment, CurrencyId, NewNotification, NotificationCategory, Order, OrderId, OrderItem,
    OrderStatus, PaymentMethod,
};

use crate::seed::FIAT_SYMBOL;
use crate::stores::{CartStore, NotificationStore, OrderStore, WalletStore};

/// Networks the mock payment form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoNetwork {
    /// Ethereum (ERC20)
    Erc20,
    /// BNB Smart Chain (BEP20)
    Bep20,
    /// Polygon (Matic)
    Polygon,
    /// Tron (TRC20)
    Trc20,
}

impl CryptoNetwork {
    /// All supported networks, in display order.
    pub const ALL: [Self; 4] = [Self::Erc20, Self::Bep20, Self::Polygon, Self::Trc20];
}

impl std::fmt::Display for CryptoNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Erc20 => write!(f, "Ethereum (ERC20)"),
            Self::Bep20 => write!(f, "BNB Smart Chain (BEP20)"),
            Self::Polygon => write!(f, "Polygon (Matic)"),
            Self::Trc20 => write!(f, "Tron (TRC20)"),
        }
    }
}

impl std::str::FromStr for CryptoNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eth" | "erc20" => Ok(Self::Erc20),
            "bsc" | "bep20" => Ok(Self::Bep20),
            "polygon" | "matic" => Ok(Self::Polygon),
            "tron" | "trc20" => Ok(Self::Trc20),
            _ => Err(format!("invalid network: {s}")),
        }
    }
}

/// Errors surfaced to the paying view before any state changes.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no items to pay for.
    #[error("cart is empty")]
    EmptyCart,

    /// No catalog entry matches the requested currency.
    #[error("unknown currency: {0}")]
    UnknownCurrency(CurrencyId),

    /// The fiat entry cannot fund a crypto payment.
    #[error("payment with local currency (INR) is not yet supported")]
    FiatNotSupported,

    /// The currency carries no usable conversion price.
    #[error("currency {0} has no usable price")]
    UnpricedCurrency(CurrencyId),

    /// Balance is short of the amount plus the network fee.
    #[error("insufficient {symbol} balance: need {required}, have {available}")]
    InsufficientBalance {
        symbol: String,
        required: Decimal,
        available: Decimal,
    },
}

/// What a payment would cost, for display before committing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoQuote {
    /// Cart total in USD.
    pub total_usd: Decimal,
    /// Cart total converted into the selected currency.
    pub amount_in_currency: Decimal,
    /// Flat network fee converted into the selected currency.
    pub fee_in_currency: Decimal,
    /// Amount plus fee.
    pub total_in_currency: Decimal,
    /// Ticker symbol of the selected currency.
    pub symbol: String,
}

/// Coordinates the deduct / record / clear / notify sequence at payment time.
///
/// Holds handles to all four stores; construct once and reuse.
#[derive(Debug, Clone)]
pub struct Checkout {
    cart: CartStore,
    wallet: WalletStore,
    orders: OrderStore,
    notifications: NotificationStore,
}

impl Checkout {
    /// Create a coordinator over the given store handles.
    #[must_use]
    pub const fn new(
        cart: CartStore,
        wallet: WalletStore,
        orders: OrderStore,
        notifications: NotificationStore,
    ) -> Self {
        Self {
            cart,
            wallet,
            orders,
            notifications,
        }
    }

    /// Price the current cart in the selected crypto currency.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` when the cart is empty, the currency is
    /// unknown or fiat, or the currency carries no usable price.
    pub fn quote(&self, currency_id: &CurrencyId) -> Result<CryptoQuote, CheckoutError> {
        let total_usd = self.cart.total();
        if total_usd == Decimal::ZERO && self.cart.items().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let currency = self
            .wallet
            .currency(currency_id)
            .ok_or_else(|| CheckoutError::UnknownCurrency(currency_id.clone()))?;
        if currency.symbol == FIAT_SYMBOL {
            return Err(CheckoutError::FiatNotSupported);
        }

        let amount_in_currency = usd_to_currency_units(total_usd, currency.price_in_inr)
            .ok_or_else(|| CheckoutError::UnpricedCurrency(currency_id.clone()))?;
        let fee_in_currency =
            usd_to_currency_units(crypto_transaction_fee_usd(), currency.price_in_inr)
                .ok_or_else(|| CheckoutError::UnpricedCurrency(currency_id.clone()))?;

        Ok(CryptoQuote {
            total_usd,
            amount_in_currency,
            fee_in_currency,
            total_in_currency: amount_in_currency + fee_in_currency,
            symbol: currency.symbol,
        })
    }

    /// Pay the current cart from the wallet and return the recorded order.
    ///
    /// Validates everything up front, then mutates in a fixed order:
    /// wallet deduction, order record, cart clear, order notification.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` when any pre-condition fails; no store state
    /// changes in that case.
    #[instrument(skip(self), fields(currency = %currency_id))]
    pub fn pay_with_crypto(
        &self,
        currency_id: &CurrencyId,
        network: CryptoNetwork,
    ) -> Result<Order, CheckoutError> {
        let quote = self.quote(currency_id)?;

        let currency = self
            .wallet
            .currency(currency_id)
            .ok_or_else(|| CheckoutError::UnknownCurrency(currency_id.clone()))?;
        if currency.balance < quote.total_in_currency {
            return Err(CheckoutError::InsufficientBalance {
                symbol: currency.symbol,
                required: quote.total_in_currency,
                available: currency.balance,
            });
        }

        let order = Order {
            id: OrderId::generate(),
            items: self.cart.items().iter().map(OrderItem::from_cart_item).collect(),
            total_amount_usd: quote.total_usd,
            payment_method: PaymentMethod::Crypto,
            crypto: Some(CryptoPayment {
                currency: currency.name.clone(),
                symbol: currency.symbol.clone(),
                amount: quote.total_in_currency,
            }),
            purchase_date: chrono::Utc::now(),
            status: OrderStatus::Processing,
            transaction_id: Some(mock_transaction_id()),
        };

        self.wallet
            .deduct_balance(currency_id, quote.total_in_currency);
        self.orders.add_order(order.clone());
        self.cart.clear();
        self.notifications.add_notification(
            NewNotification::new(
                "Order Placed",
                format!(
                    "Paid {} {} over {network}. Your order is being processed.",
                    quote.total_in_currency.round_dp(6),
                    currency.symbol
                ),
            )
            .with_category(NotificationCategory::Order)
            .with_link("/orders"),
        );

        info!(
            order_id = %order.id,
            total_usd = %quote.total_usd,
            paid = %quote.total_in_currency,
            symbol = %currency.symbol,
            "checkout completed"
        );

        Ok(order)
    }

    /// Pay with the local fiat currency. Not yet supported.
    ///
    /// # Errors
    ///
    /// Always returns `CheckoutError::FiatNotSupported`.
    pub fn pay_with_fiat(&self) -> Result<Order, CheckoutError> {
        Err(CheckoutError::FiatNotSupported)
    }
}

/// Mock transaction reference attached to simulated payments.
fn mock_transaction_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 8] = rng.random();
    let hex: String = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
    format!("TXN-{hex}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use walmartchain_core::{Product, ProductId, WalletCurrency};

    use crate::storage::MemoryStorage;

    use super::*;

    fn product(id: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            brand: "Acme".to_owned(),
            category: "Electronics".to_owned(),
            subcategory: "Gadgets".to_owned(),
            price,
            description: String::new(),
            images: Vec::new(),
            rating: 4.0,
            review_count: 1,
            in_stock: true,
            stock_count: 10,
            weight: None,
            dimensions: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            slug: format!("product-{id}"),
            data_ai_hint: None,
        }
    }

    fn catalog() -> Vec<WalletCurrency> {
        vec![
            WalletCurrency {
                id: walmartchain_core::CurrencyId::new("inr"),
                name: "Indian Rupee".to_owned(),
                symbol: "INR".to_owned(),
                balance: Decimal::from(15_000),
                price_in_inr: Decimal::ONE,
                color: None,
            },
            WalletCurrency {
                id: walmartchain_core::CurrencyId::new("usdt"),
                name: "Tether".to_owned(),
                symbol: "USDT".to_owned(),
                balance: Decimal::from(500),
                price_in_inr: Decimal::from(83),
                color: None,
            },
        ]
    }

    fn fixture() -> (Checkout, CartStore, WalletStore, OrderStore, NotificationStore) {
        let storage: Arc<dyn crate::storage::Storage> = Arc::new(MemoryStorage::new());
        let cart = CartStore::new(Arc::clone(&storage));
        let wallet = WalletStore::with_catalog(catalog());
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

    #[test]
    fn test_quote_converts_at_fixed_rates() {
        let (checkout, cart, ..) = fixture();
        cart.add_to_cart(&product("p1", Decimal::from(100)));

        // USDT priced at exactly the USD rate: 1 USDT per USD
        let quote = checkout.quote(&CurrencyId::new("usdt")).unwrap();
        assert_eq!(quote.total_usd, Decimal::from(100));
        assert_eq!(quote.amount_in_currency, Decimal::from(100));
        assert_eq!(quote.fee_in_currency, Decimal::new(150, 2));
        assert_eq!(quote.total_in_currency, Decimal::new(10_150, 2));
    }

    #[test]
    fn test_pay_runs_full_choreography() {
        let (checkout, cart, wallet, orders, notifications) = fixture();
        cart.add_to_cart(&product("p1", Decimal::from(100)));

        let order = checkout
            .pay_with_crypto(&CurrencyId::new("usdt"), CryptoNetwork::Erc20)
            .unwrap();

        // Wallet deducted: 500 - 101.50
        assert_eq!(
            wallet.currency(&CurrencyId::new("usdt")).unwrap().balance,
            Decimal::new(39_850, 2)
        );
        // Order recorded with crypto details and a transaction reference
        let recorded = orders.order(&order.id).unwrap();
        assert_eq!(recorded.items.len(), 1);
        assert_eq!(recorded.payment_method, PaymentMethod::Crypto);
        assert_eq!(recorded.crypto.as_ref().unwrap().symbol, "USDT");
        assert!(
            recorded
                .transaction_id
                .as_ref()
                .unwrap()
                .starts_with("TXN-")
        );
        // Cart cleared, notification pushed
        assert!(cart.items().is_empty());
        assert_eq!(notifications.unread_count(), 1);
    }

    #[test]
    fn test_insufficient_balance_leaves_all_stores_untouched() {
        let (checkout, cart, wallet, orders, notifications) = fixture();
        cart.add_to_cart(&product("p1", Decimal::from(1_000)));

        let err = checkout
            .pay_with_crypto(&CurrencyId::new("usdt"), CryptoNetwork::Erc20)
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InsufficientBalance { .. }));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(
            wallet.currency(&CurrencyId::new("usdt")).unwrap().balance,
            Decimal::from(500)
        );
        assert!(orders.orders().is_empty());
        assert_eq!(notifications.unread_count(), 0);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let (checkout, ..) = fixture();
        assert!(matches!(
            checkout.pay_with_crypto(&CurrencyId::new("usdt"), CryptoNetwork::Erc20),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_fiat_entry_rejected() {
        let (checkout, cart, ..) = fixture();
        cart.add_to_cart(&product("p1", Decimal::from(10)));

        assert!(matches!(
            checkout.pay_with_crypto(&CurrencyId::new("inr"), CryptoNetwork::Erc20),
            Err(CheckoutError::FiatNotSupported)
        ));
        assert!(matches!(
            checkout.pay_with_fiat(),
            Err(CheckoutError::FiatNotSupported)
        ));
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let (checkout, cart, ..) = fixture();
        cart.add_to_cart(&product("p1", Decimal::from(10)));

        assert!(matches!(
            checkout.pay_with_crypto(&CurrencyId::new("doesnotexist"), CryptoNetwork::Erc20),
            Err(CheckoutError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_network_parsing() {
        assert_eq!("erc20".parse::<CryptoNetwork>().unwrap(), CryptoNetwork::Erc20);
        assert_eq!("tron".parse::<CryptoNetwork>().unwrap(), CryptoNetwork::Trc20);
        assert!("carrier-pigeon".parse::<CryptoNetwork>().is_err());
    }
}
