//! Order history commands.

use clap::Subcommand;
use tracing::{info, warn};

use walmartchain_core::{OrderId, OrderStatus};
use walmartchain_storefront::AppState;

use super::CommandResult;

#[derive(Debug, Subcommand)]
pub enum OrdersAction {
    /// List order history, newest first
    List,
    /// Update the status of an order
    Status {
        /// Order id
        order_id: String,
        /// New status: processing, shipped, delivered, or cancelled
        status: OrderStatus,
    },
    /// Drop the entire history
    Clear,
}

pub fn run(state: &AppState, action: &OrdersAction) -> CommandResult {
    let orders = state.orders();

    match action {
        OrdersAction::List => {
            let history = orders.orders();
            if history.is_empty() {
                info!("no orders yet");
                return Ok(());
            }
            for order in &history {
                info!(
                    id = %order.id,
                    date = %order.purchase_date.format("%Y-%m-%d %H:%M"),
                    total_usd = %order.total_amount_usd,
                    status = %order.status,
                    items = order.items.len(),
                    transaction = %order.transaction_id.clone().unwrap_or_default(),
                    "order"
                );
            }
        }
        OrdersAction::Status { order_id, status } => {
            let id = OrderId::new(order_id.as_str());
            if orders.order(&id).is_none() {
                warn!(order_id = %order_id, "unknown order; status update is a no-op");
                return Ok(());
            }
            orders.update_status(&id, *status);
            info!(order_id = %order_id, status = %status, "order status updated");
        }
        OrdersAction::Clear => {
            orders.clear();
            info!("order history cleared");
        }
    }

    Ok(())
}
