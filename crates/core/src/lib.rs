//! WalmartChain Core - Shared types library.
//!
//! This crate provides common types used across all WalmartChain components:
//! - `storefront` - State-management core (stores, persistence, checkout)
//! - `cli` - Command-line demo front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure arithmetic - no I/O, no HTTP
//! clients, no storage access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money conversion arithmetic, and the product,
//!   cart, wallet, order, and notification entities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
