//! Wallet commands.

use clap::Subcommand;
use rust_decimal::Decimal;
use tracing::{info, warn};

use walmartchain_core::CurrencyId;
use walmartchain_storefront::AppState;

use super::CommandResult;

#[derive(Debug, Subcommand)]
pub enum WalletAction {
    /// List catalog entries, optionally filtered
    List {
        /// Case-insensitive substring matched against name or symbol
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show the total portfolio value in INR
    Portfolio,
    /// Record the active currency for summary display
    Select {
        /// Currency id, e.g. `btc`
        currency_id: String,
    },
    /// Deduct from a balance (clamped at zero by the store)
    Deduct {
        /// Currency id, e.g. `btc`
        currency_id: String,
        /// Amount in currency units
        amount: Decimal,
    },
    /// Add to a balance
    Add {
        /// Currency id, e.g. `btc`
        currency_id: String,
        /// Amount in currency units
        amount: Decimal,
    },
}

pub fn run(state: &AppState, action: &WalletAction) -> CommandResult {
    let wallet = state.wallet();

    match action {
        WalletAction::List { search } => {
            wallet.set_search_term(search.clone().unwrap_or_default());
            let currencies = wallet.filtered_currencies();
            if currencies.is_empty() {
                info!("no currencies match the search term");
                return Ok(());
            }
            for currency in &currencies {
                info!(
                    id = %currency.id,
                    name = %currency.name,
                    symbol = %currency.symbol,
                    balance = %currency.balance,
                    value_inr = %currency.value_in_inr(),
                    "wallet entry"
                );
            }
        }
        WalletAction::Portfolio => {
            info!(total_inr = %wallet.total_portfolio_value_inr(), "portfolio value");
        }
        WalletAction::Select { currency_id } => {
            let id = CurrencyId::new(currency_id.as_str());
            if wallet.currency(&id).is_none() {
                warn!(currency_id = %currency_id, "unknown currency; consumers will fall back to the fiat entry");
            }
            wallet.set_selected_currency_id(id);
            if let Some(selected) = wallet.selected_currency() {
                info!(symbol = %selected.symbol, "active currency");
            }
        }
        WalletAction::Deduct {
            currency_id,
            amount,
        } => {
            let id = CurrencyId::new(currency_id.as_str());
            match wallet.currency(&id) {
                Some(currency) if currency.balance < *amount => {
                    warn!(
                        currency_id = %currency_id,
                        balance = %currency.balance,
                        %amount,
                        "amount exceeds balance; store will clamp at zero"
                    );
                }
                None => warn!(currency_id = %currency_id, "unknown currency; deduction is a no-op"),
                Some(_) => {}
            }

            wallet.deduct_balance(&id, *amount);
            if let Some(currency) = wallet.currency(&id) {
                info!(currency_id = %currency_id, balance = %currency.balance, "balance after deduction");
            }
        }
        WalletAction::Add {
            currency_id,
            amount,
        } => {
            let id = CurrencyId::new(currency_id.as_str());
            wallet.add_balance(&id, *amount);
            match wallet.currency(&id) {
                Some(currency) => {
                    info!(currency_id = %currency_id, balance = %currency.balance, "balance after top-up");
                }
                None => warn!(currency_id = %currency_id, "unknown currency; top-up was a no-op"),
            }
        }
    }

    Ok(())
}
