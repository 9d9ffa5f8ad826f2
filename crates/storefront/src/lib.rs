//! WalmartChain Storefront state-management core.
//!
//! This crate implements the client-side state of the storefront as four
//! independent, flat state containers - cart, wallet, orders, notifications -
//! plus the snapshot persistence boundary, a synchronous publish/subscribe
//! interface, the checkout coordinator, and the client for the external
//! generative recommendations service.
//!
//! # Architecture
//!
//! - Each store is a cheaply cloneable handle exclusively owning its slice of
//!   state. Stores have no awareness of each other; the [`checkout`] module
//!   owns the one cross-store choreography.
//! - Every mutation is synchronous: the store recomputes its in-memory state,
//!   persists a JSON snapshot through the [`storage`] boundary, and notifies
//!   subscribed views.
//! - Store operations never fail. Over-deduction clamps at zero, operations
//!   on missing entities are no-ops, and a failed snapshot persist is logged
//!   and swallowed. Pre-condition validation (insufficient funds, empty cart)
//!   belongs to the calling view or the checkout coordinator.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
pub mod seed;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;
pub mod subscription;

pub use checkout::{Checkout, CheckoutError, CryptoNetwork, CryptoQuote};
pub use config::{ConfigError, StorefrontConfig};
pub use error::{AppError, Result};
pub use state::AppState;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use stores::{CartStore, NotificationStore, OrderStore, WalletStore};
pub use subscription::SubscriptionId;
