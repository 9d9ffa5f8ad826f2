//! Fixed seed data: the wallet currency catalog and sample notifications.
//!
//! Prices are static mock conversion rates into the reference fiat (INR);
//! there is no live price feed.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use walmartchain_core::{
    CurrencyId, Notification, NotificationCategory, NotificationId, WalletCurrency,
};

/// Ticker symbol of the reference fiat entry.
pub const FIAT_SYMBOL: &str = "INR";

fn currency(
    id: &str,
    name: &str,
    symbol: &str,
    balance: Decimal,
    price_in_inr: Decimal,
    color: Option<&str>,
) -> WalletCurrency {
    WalletCurrency {
        id: CurrencyId::new(id),
        name: name.to_owned(),
        symbol: symbol.to_owned(),
        balance,
        price_in_inr,
        color: color.map(ToOwned::to_owned),
    }
}

/// The fixed wallet catalog: the INR fiat entry plus nine cryptos.
#[must_use]
pub fn initial_currencies() -> Vec<WalletCurrency> {
    vec![
        currency(
            "inr",
            "Indian Rupee",
            "INR",
            Decimal::from(15_000),
            Decimal::ONE,
            Some("text-green-500"),
        ),
        currency(
            "btc",
            "Bitcoin",
            "BTC",
            Decimal::new(1, 2),
            Decimal::from(5_000_000),
            Some("text-orange-500"),
        ),
        currency(
            "eth",
            "Ethereum",
            "ETH",
            Decimal::new(5, 1),
            Decimal::from(300_000),
            Some("text-gray-400"),
        ),
        currency(
            "ltc",
            "Litecoin",
            "LTC",
            Decimal::from(10),
            Decimal::from(8_000),
            Some("text-slate-500"),
        ),
        currency(
            "usdt",
            "Tether",
            "USDT",
            Decimal::from(500),
            Decimal::from(83),
            Some("text-green-600"),
        ),
        currency(
            "sol",
            "Solana",
            "SOL",
            Decimal::from(10),
            Decimal::from(12_000),
            Some("text-purple-500"),
        ),
        currency(
            "doge",
            "Dogecoin",
            "DOGE",
            Decimal::from(5_000),
            Decimal::from(10),
            Some("text-yellow-500"),
        ),
        currency(
            "bch",
            "Bitcoin Cash",
            "BCH",
            Decimal::ONE,
            Decimal::from(40_000),
            Some("text-green-700"),
        ),
        currency(
            "xrp",
            "XRP",
            "XRP",
            Decimal::from(1_000),
            Decimal::from(40),
            None,
        ),
        currency(
            "trx",
            "Tron",
            "TRX",
            Decimal::from(5_000),
            Decimal::from(9),
            Some("text-red-500"),
        ),
    ]
}

/// Placeholder notification feed shown by the demo front end.
#[must_use]
pub fn sample_notifications() -> Vec<Notification> {
    let now = Utc::now();
    vec![
        Notification {
            id: NotificationId::generate(),
            title: "Welcome to WalmartChain!".to_owned(),
            description: "Explore our wide range of products and enjoy seamless crypto transactions."
                .to_owned(),
            timestamp: now - Duration::minutes(30),
            is_read: false,
            link: Some("/products".to_owned()),
            category: Some(NotificationCategory::Info),
        },
        Notification {
            id: NotificationId::generate(),
            title: "Your Order #WM-12345 Shipped!".to_owned(),
            description:
                "Track your package with tracking ID XYZ789. Expected delivery: 2 days.".to_owned(),
            timestamp: now - Duration::hours(3),
            is_read: false,
            link: Some("/orders".to_owned()),
            category: Some(NotificationCategory::Order),
        },
        Notification {
            id: NotificationId::generate(),
            title: "Special Offer Just For You!".to_owned(),
            description:
                "Get 15% off on your next grocery purchase over $50. Use code: FRESH15".to_owned(),
            timestamp: now - Duration::days(1),
            is_read: true,
            link: None,
            category: Some(NotificationCategory::Promo),
        },
        Notification {
            id: NotificationId::generate(),
            title: "Account Security Update".to_owned(),
            description:
                "We recommend enabling Two-Factor Authentication for enhanced security.".to_owned(),
            timestamp: now - Duration::days(2),
            is_read: true,
            link: Some("/settings".to_owned()),
            category: Some(NotificationCategory::Info),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_one_fiat_entry_and_unique_keys() {
        let catalog = initial_currencies();
        assert_eq!(catalog.len(), 10);

        let fiat: Vec<_> = catalog
            .iter()
            .filter(|currency| currency.symbol == FIAT_SYMBOL)
            .collect();
        assert_eq!(fiat.len(), 1);
        assert_eq!(fiat.first().unwrap().price_in_inr, Decimal::ONE);

        let mut ids: Vec<_> = catalog.iter().map(|c| c.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());

        let mut symbols: Vec<_> = catalog.iter().map(|c| c.symbol.clone()).collect();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), catalog.len());
    }

    #[test]
    fn test_all_prices_positive() {
        assert!(
            initial_currencies()
                .iter()
                .all(|currency| currency.price_in_inr > Decimal::ZERO)
        );
    }

    #[test]
    fn test_sample_feed_is_newest_first_with_two_unread() {
        let feed = sample_notifications();
        assert_eq!(feed.len(), 4);
        assert!(feed.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert_eq!(feed.iter().filter(|n| !n.is_read).count(), 2);
    }
}
