//! Wallet currency ledger entry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::CurrencyId;

/// A balance ledger entry for one currency.
///
/// The currency set is a fixed, pre-seeded catalog for the lifetime of the
/// process; only balances mutate. The balance is never negative - every
/// deduction clamps at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletCurrency {
    pub id: CurrencyId,
    pub name: String,
    /// Ticker symbol, unique within the catalog and used as a lookup key.
    pub symbol: String,
    pub balance: Decimal,
    /// Price of 1 unit of this currency in INR. Constant for the process.
    #[serde(rename = "priceInINR")]
    pub price_in_inr: Decimal,
    /// Optional display color hint for front ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl WalletCurrency {
    /// Current INR valuation of this entry's balance.
    #[must_use]
    pub fn value_in_inr(&self) -> Decimal {
        self.balance * self.price_in_inr
    }

    /// Case-insensitive substring match against name or symbol.
    ///
    /// `term` must already be lowercased by the caller.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term) || self.symbol.to_lowercase().contains(term)
    }
}
