//! Command implementations.

pub mod cart;
pub mod checkout;
pub mod notifications;
pub mod orders;
pub mod seed;
pub mod trending;
pub mod wallet;

/// Shared command result type.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
