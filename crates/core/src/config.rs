use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub trading: TradingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Bounds applied to every trade plus the seed values for new users and markets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingConfig {
    /// Smallest accepted cash amount per trade.
    pub min_trade: Decimal,
    /// Largest accepted cash amount per trade.
    pub max_trade: Decimal,
    /// Cash balance granted to a newly created user.
    pub starting_balance: Decimal,
    /// Seed size for each reserve of a newly created market.
    pub initial_pool_size: Decimal,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/playmarket".to_string(),
                max_connections: 10,
            },
            trading: TradingConfig::default(),
        }
    }
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            min_trade: Decimal::ONE,
            max_trade: Decimal::from(500),
            starting_balance: Decimal::from(1000),
            initial_pool_size: Decimal::from(100),
        }
    }
}
