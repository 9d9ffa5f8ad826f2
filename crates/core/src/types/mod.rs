//! Core types for WalmartChain.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod money;
pub mod notification;
pub mod order;
pub mod product;
pub mod status;
pub mod wallet;

pub use cart::CartItem;
pub use id::*;
pub use notification::{NewNotification, Notification};
pub use order::{CryptoPayment, Order, OrderItem};
pub use product::Product;
pub use status::*;
pub use wallet::WalletCurrency;
