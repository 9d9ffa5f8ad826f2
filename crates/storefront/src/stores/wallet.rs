//! Wallet store: multi-currency balance sheet and currency discovery.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use tracing::debug;

use walmartchain_core::{CurrencyId, WalletCurrency};

use crate::seed;
use crate::subscription::{Subscribers, SubscriptionId};

struct WalletState {
    currencies: Vec<WalletCurrency>,
    search_term: String,
    selected_currency_id: CurrencyId,
}

/// Fixed catalog of currency balances: one fiat entry plus the cryptos.
///
/// The catalog is seeded at construction and never grows or shrinks; only
/// balances mutate. Balances never go negative - deductions clamp at zero.
/// The wallet is deliberately not persisted; it is rebuilt from the seed
/// catalog on every process start.
#[derive(Clone)]
pub struct WalletStore {
    inner: Arc<WalletStoreInner>,
}

struct WalletStoreInner {
    state: Mutex<WalletState>,
    subscribers: Subscribers<Vec<WalletCurrency>>,
}

impl WalletStore {
    /// Create a wallet seeded with the standard currency catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(seed::initial_currencies())
    }

    /// Create a wallet over an explicit catalog (tests, alternate seeds).
    ///
    /// The initially selected currency is the fiat entry when present,
    /// otherwise the first catalog entry.
    #[must_use]
    pub fn with_catalog(currencies: Vec<WalletCurrency>) -> Self {
        let selected_currency_id = currencies
            .iter()
            .find(|currency| currency.symbol == seed::FIAT_SYMBOL)
            .or_else(|| currencies.first())
            .map(|currency| currency.id.clone())
            .unwrap_or_else(|| CurrencyId::new(""));

        Self {
            inner: Arc::new(WalletStoreInner {
                state: Mutex::new(WalletState {
                    currencies,
                    search_term: String::new(),
                    selected_currency_id,
                }),
                subscribers: Subscribers::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WalletState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the search term used by [`Self::filtered_currencies`].
    pub fn set_search_term(&self, term: impl Into<String>) {
        self.lock().search_term = term.into();
    }

    /// The current search term.
    #[must_use]
    pub fn search_term(&self) -> String {
        self.lock().search_term.clone()
    }

    /// Record which currency is active for header/summary display.
    ///
    /// The id is not validated; consumers resolving an id that no longer
    /// matches fall back to the fiat entry via [`Self::selected_currency`].
    pub fn set_selected_currency_id(&self, id: CurrencyId) {
        self.lock().selected_currency_id = id;
    }

    /// The recorded active-currency id.
    #[must_use]
    pub fn selected_currency_id(&self) -> CurrencyId {
        self.lock().selected_currency_id.clone()
    }

    /// Resolve the active currency, falling back to the fiat entry (then the
    /// first catalog entry) when the recorded id matches nothing.
    #[must_use]
    pub fn selected_currency(&self) -> Option<WalletCurrency> {
        let state = self.lock();
        state
            .currencies
            .iter()
            .find(|currency| currency.id == state.selected_currency_id)
            .or_else(|| {
                state
                    .currencies
                    .iter()
                    .find(|currency| currency.symbol == seed::FIAT_SYMBOL)
            })
            .or_else(|| state.currencies.first())
            .cloned()
    }

    /// The full catalog in seed order.
    #[must_use]
    pub fn currencies(&self) -> Vec<WalletCurrency> {
        self.lock().currencies.clone()
    }

    /// Look up one catalog entry by id.
    #[must_use]
    pub fn currency(&self, id: &CurrencyId) -> Option<WalletCurrency> {
        self.lock()
            .currencies
            .iter()
            .find(|currency| currency.id == *id)
            .cloned()
    }

    /// Look up one catalog entry by ticker symbol (case-insensitive).
    #[must_use]
    pub fn currency_by_symbol(&self, symbol: &str) -> Option<WalletCurrency> {
        self.lock()
            .currencies
            .iter()
            .find(|currency| currency.symbol.eq_ignore_ascii_case(symbol))
            .cloned()
    }

    /// Catalog entries matching the recorded search term.
    ///
    /// Case-insensitive substring match against name or symbol; an empty term
    /// returns the full catalog.
    #[must_use]
    pub fn filtered_currencies(&self) -> Vec<WalletCurrency> {
        let state = self.lock();
        if state.search_term.is_empty() {
            return state.currencies.clone();
        }

        let term = state.search_term.to_lowercase();
        state
            .currencies
            .iter()
            .filter(|currency| currency.matches_search(&term))
            .cloned()
            .collect()
    }

    /// Crypto entries a payment could draw from: positive balance, not fiat.
    #[must_use]
    pub fn spendable_cryptos(&self) -> Vec<WalletCurrency> {
        self.lock()
            .currencies
            .iter()
            .filter(|currency| {
                currency.balance > Decimal::ZERO && currency.symbol != seed::FIAT_SYMBOL
            })
            .cloned()
            .collect()
    }

    /// Sum of balance times INR price over the whole catalog.
    #[must_use]
    pub fn total_portfolio_value_inr(&self) -> Decimal {
        self.lock()
            .currencies
            .iter()
            .map(WalletCurrency::value_in_inr)
            .sum()
    }

    /// Subtract `amount` from the named currency's balance, floored at zero.
    ///
    /// This operation never fails and never produces a negative balance.
    /// Callers are expected to validate sufficiency themselves before
    /// calling; the clamp is a last line of defense, not a validation layer.
    /// An unknown id leaves the catalog unchanged.
    pub fn deduct_balance(&self, id: &CurrencyId, amount: Decimal) {
        let currencies = {
            let mut state = self.lock();
            if let Some(currency) = state
                .currencies
                .iter_mut()
                .find(|currency| currency.id == *id)
            {
                currency.balance = (currency.balance - amount).max(Decimal::ZERO);
            }
            state.currencies.clone()
        };

        debug!(currency_id = %id, %amount, "deducted balance");
        self.inner.subscribers.notify(&currencies);
    }

    /// Add `amount` to the named currency's balance. No upper bound.
    ///
    /// An unknown id leaves the catalog unchanged.
    pub fn add_balance(&self, id: &CurrencyId, amount: Decimal) {
        let currencies = {
            let mut state = self.lock();
            if let Some(currency) = state
                .currencies
                .iter_mut()
                .find(|currency| currency.id == *id)
            {
                currency.balance += amount;
            }
            state.currencies.clone()
        };

        debug!(currency_id = %id, %amount, "added balance");
        self.inner.subscribers.notify(&currencies);
    }

    /// Register a listener invoked with the catalog after balance mutations.
    pub fn subscribe(
        &self,
        listener: impl Fn(&Vec<WalletCurrency>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.inner.subscribers.subscribe(listener)
    }

    /// Deregister a listener.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.unsubscribe(id)
    }
}

impl Default for WalletStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WalletStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletStore")
            .field("currencies", &self.lock().currencies.len())
            .finish()
    }
}
