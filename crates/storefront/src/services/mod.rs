//! Clients for externally-supplied services.

pub mod recommendations;

pub use recommendations::{RecommendationError, RecommendationsClient, RecommendedProduct};
