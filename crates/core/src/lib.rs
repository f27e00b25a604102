pub mod amm;
pub mod config;
pub mod config_loader;

pub use amm::{quote_buy, quote_sell, slippage, BuyQuote, Pool, SellQuote, Side};
pub use config::{AppConfig, DatabaseConfig, TradingConfig};
pub use config_loader::ConfigLoader;
