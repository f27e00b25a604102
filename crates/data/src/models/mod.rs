//! Data models for the prediction market core.
//!
//! All models use `rust_decimal::Decimal` for financial precision.
//! Models derive `sqlx::FromRow` for database compatibility; closed
//! enumerations are stored as strings with typed `parsed_*` accessors.

pub mod market;
pub mod position;
pub mod price_snapshot;
pub mod trade;
pub mod user;

pub use market::{MarketRecord, MarketStatus};
pub use position::PositionRecord;
pub use price_snapshot::PriceSnapshotRecord;
pub use trade::{TradeDirection, TradeRecord};
pub use user::UserRecord;
