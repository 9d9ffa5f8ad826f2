//! Mock currency-conversion arithmetic.
//!
//! All prices in the catalog are quoted in USD; wallet currencies carry a
//! fixed price in the reference fiat (INR). There is no live price feed - the
//! rates below are process-lifetime constants, and every conversion in the
//! system goes through this module.

use rust_decimal::Decimal;

/// Fixed conversion rate: 1 USD in INR.
#[must_use]
pub fn usd_to_inr_rate() -> Decimal {
    Decimal::from(83)
}

/// Flat mock network fee charged per crypto payment, in USD.
#[must_use]
pub fn crypto_transaction_fee_usd() -> Decimal {
    // 1.50 USD
    Decimal::new(150, 2)
}

/// Convert a USD amount to INR at the fixed rate.
#[must_use]
pub fn usd_to_inr(amount_usd: Decimal) -> Decimal {
    amount_usd * usd_to_inr_rate()
}

/// Convert a USD amount into units of a currency priced in INR.
///
/// Returns `None` when `price_in_inr` is zero; catalog entries always carry a
/// positive price, so `None` only arises for malformed input.
#[must_use]
pub fn usd_to_currency_units(amount_usd: Decimal, price_in_inr: Decimal) -> Option<Decimal> {
    usd_to_inr(amount_usd).checked_div(price_in_inr)
}
