//! Shopping cart commands.

use clap::Subcommand;
use tracing::{info, warn};

use walmartchain_core::ProductId;
use walmartchain_storefront::AppState;

use crate::catalog;

use super::CommandResult;

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Add one unit of a catalog product
    Add {
        /// Product id from the catalog
        product_id: String,
    },
    /// Remove a line entirely
    Remove {
        /// Product id from the catalog
        product_id: String,
    },
    /// Set the quantity of a line (zero or below removes it)
    Qty {
        /// Product id from the catalog
        product_id: String,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Show the cart contents and totals
    Show,
    /// Empty the cart
    Clear,
}

pub fn run(state: &AppState, action: &CartAction) -> CommandResult {
    let cart = state.cart();

    match action {
        CartAction::Add { product_id } => {
            let products = catalog::load(&state.config().data_dir)?;
            let id = ProductId::new(product_id.as_str());
            let Some(product) = catalog::find(&products, &id) else {
                return Err(format!("no catalog product with id {product_id}").into());
            };
            // Stock validation is a front-end concern; the store does none.
            if !product.in_stock {
                warn!(product_id = %product_id, "product is out of stock");
                return Ok(());
            }

            cart.add_to_cart(product);
            info!(product_id = %product_id, name = %product.name, count = cart.item_count(), "added to cart");
        }
        CartAction::Remove { product_id } => {
            cart.remove_from_cart(&ProductId::new(product_id.as_str()));
            info!(product_id = %product_id, "removed from cart");
        }
        CartAction::Qty {
            product_id,
            quantity,
        } => {
            cart.update_quantity(&ProductId::new(product_id.as_str()), *quantity);
            info!(product_id = %product_id, quantity, "quantity updated");
        }
        CartAction::Show => {
            let items = cart.items();
            if items.is_empty() {
                info!("cart is empty");
                return Ok(());
            }
            for item in &items {
                info!(
                    id = %item.id,
                    name = %item.name,
                    quantity = item.quantity,
                    unit_price = %item.price,
                    line_total = %item.line_total(),
                    "cart line"
                );
            }
            info!(total_usd = %cart.total(), items = cart.item_count(), "cart totals");
        }
        CartAction::Clear => {
            cart.clear();
            info!("cart cleared");
        }
    }

    Ok(())
}
