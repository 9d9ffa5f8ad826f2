//! Generative recommendation commands.
//!
//! Service failures degrade to a "could not load" message rather than a
//! non-zero exit: a broken recommendations backend must never block the rest
//! of the front end.

use tracing::{info, warn};

use walmartchain_storefront::AppState;
use walmartchain_storefront::services::RecommendedProduct;

use super::CommandResult;

/// Fetch and display trending products.
pub async fn trending(state: &AppState, count: u32) -> CommandResult {
    let Some(client) = state.recommendations() else {
        info!("recommendations service is not configured; set WALMARTCHAIN_AI_BASE_URL");
        return Ok(());
    };

    match client.trending(count).await {
        Ok(products) => display(&products),
        Err(err) => warn!(error = %err, "could not load trending products"),
    }

    Ok(())
}

/// Fetch and display personalized recommendations.
pub async fn recommend(state: &AppState, history: &[String], count: u32) -> CommandResult {
    let Some(client) = state.recommendations() else {
        info!("recommendations service is not configured; set WALMARTCHAIN_AI_BASE_URL");
        return Ok(());
    };

    match client.recommendations(history, count).await {
        Ok(products) => display(&products),
        Err(err) => warn!(error = %err, "could not load recommendations"),
    }

    Ok(())
}

fn display(products: &[RecommendedProduct]) {
    if products.is_empty() {
        info!("no products available");
        return;
    }

    for product in products {
        info!(
            id = %product.product_id,
            name = %product.name,
            price_usd = %product.price,
            category = %product.category,
            "suggested product"
        );
    }
}
