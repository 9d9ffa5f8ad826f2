//! WalmartChain CLI - demo front end driving the storefront state core.
//!
//! # Usage
//!
//! ```bash
//! # Seed the product catalog and sample notifications
//! wmc seed
//!
//! # Browse and fill the cart
//! wmc cart add walmart_grocery_001
//! wmc cart show
//!
//! # Inspect the wallet and pay
//! wmc wallet list --search bit
//! wmc checkout quote --currency btc
//! wmc checkout pay --currency btc --network eth
//!
//! # Review history and notifications
//! wmc orders list
//! wmc notifications list
//!
//! # Ask the generative service for trending products
//! wmc trending --count 4
//! ```
//!
//! All pre-condition validation (insufficient funds, unknown products, empty
//! cart) happens here or in the checkout coordinator before any store call;
//! the stores themselves never reject an operation.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use walmartchain_storefront::{AppState, StorefrontConfig};

mod catalog;
mod commands;

#[derive(Parser)]
#[command(name = "wmc")]
#[command(author, version, about = "WalmartChain CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the product catalog and sample notification feed
    Seed {
        /// Overwrite an existing product catalog
        #[arg(long)]
        force: bool,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Inspect and mutate the wallet
    Wallet {
        #[command(subcommand)]
        action: commands::wallet::WalletAction,
    },
    /// Quote and pay for the current cart
    Checkout {
        #[command(subcommand)]
        action: commands::checkout::CheckoutAction,
    },
    /// Review order history
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrdersAction,
    },
    /// Manage the notification feed
    Notifications {
        #[command(subcommand)]
        action: commands::notifications::NotificationsAction,
    },
    /// Fetch trending products from the generative service
    Trending {
        /// Number of products to request
        #[arg(short, long, default_value_t = 4)]
        count: u32,
    },
    /// Fetch personalized recommendations from the generative service
    Recommend {
        /// Comma-separated product names already browsed
        #[arg(long, value_delimiter = ',')]
        history: Vec<String>,
        /// Number of products to request
        #[arg(short, long, default_value_t = 3)]
        count: u32,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "walmartchain_storefront=info,wmc=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "command failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Seed { force } => commands::seed::run(&state, force),
        Commands::Cart { action } => commands::cart::run(&state, &action),
        Commands::Wallet { action } => commands::wallet::run(&state, &action),
        Commands::Checkout { action } => commands::checkout::run(&state, &action),
        Commands::Orders { action } => commands::orders::run(&state, &action),
        Commands::Notifications { action } => commands::notifications::run(&state, &action),
        Commands::Trending { count } => commands::trending::trending(&state, count).await,
        Commands::Recommend { history, count } => {
            commands::trending::recommend(&state, &history, count).await
        }
    }
}
