//! CLI commands for the prediction market.

pub mod create_market;
pub mod create_user;
pub mod resolve;
pub mod status;
pub mod trade;

pub use create_market::{run_create_market, CreateMarketArgs};
pub use create_user::{run_create_user, CreateUserArgs};
pub use resolve::{run_resolve, ResolveArgs};
pub use status::{run_history, run_markets, run_positions, HistoryArgs, PositionsArgs};
pub use trade::{run_buy, run_sell, BuyArgs, SellArgs};

use anyhow::Result;
use playmarket_core::{AppConfig, ConfigLoader};
use playmarket_data::DatabaseClient;

/// Loads configuration, connects to the database, and applies migrations.
pub(crate) async fn connect(config_path: &str) -> Result<(AppConfig, DatabaseClient)> {
    let config = ConfigLoader::load_from(config_path)?;
    let db = DatabaseClient::new(&config.database.url, config.database.max_connections).await?;
    db.migrate().await?;
    Ok((config, db))
}
