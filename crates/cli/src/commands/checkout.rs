//! Checkout commands.

use clap::Subcommand;
use tracing::info;

use walmartchain_core::CurrencyId;
use walmartchain_storefront::{AppState, CryptoNetwork};

use super::CommandResult;

#[derive(Debug, Subcommand)]
pub enum CheckoutAction {
    /// Price the current cart in a crypto currency
    Quote {
        /// Currency id, e.g. `btc`
        #[arg(short, long)]
        currency: String,
    },
    /// Pay the current cart from the wallet
    Pay {
        /// Currency id, e.g. `btc`
        #[arg(short, long)]
        currency: String,
        /// Network: eth, bsc, polygon, or tron
        #[arg(short, long, default_value = "eth")]
        network: CryptoNetworkArg,
    },
}

/// Clap-parsable wrapper around [`CryptoNetwork`].
#[derive(Debug, Clone, Copy)]
pub struct CryptoNetworkArg(CryptoNetwork);

impl std::str::FromStr for CryptoNetworkArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

pub fn run(state: &AppState, action: &CheckoutAction) -> CommandResult {
    let checkout = state.checkout();

    match action {
        CheckoutAction::Quote { currency } => {
            let quote = checkout.quote(&CurrencyId::new(currency.as_str()))?;
            info!(
                total_usd = %quote.total_usd,
                amount = %quote.amount_in_currency.round_dp(6),
                fee = %quote.fee_in_currency.round_dp(6),
                total = %quote.total_in_currency.round_dp(6),
                symbol = %quote.symbol,
                "payment quote"
            );
        }
        CheckoutAction::Pay { currency, network } => {
            let order =
                checkout.pay_with_crypto(&CurrencyId::new(currency.as_str()), network.0)?;
            let crypto = order.crypto.as_ref();
            info!(
                order_id = %order.id,
                total_usd = %order.total_amount_usd,
                paid = %crypto.map(|c| c.amount.round_dp(6).to_string()).unwrap_or_default(),
                symbol = %crypto.map(|c| c.symbol.clone()).unwrap_or_default(),
                transaction = %order.transaction_id.clone().unwrap_or_default(),
                "payment successful, order placed"
            );
        }
    }

    Ok(())
}
