//! Data storage and management for the prediction market core.
//!
//! This crate provides:
//! - Database client for `PostgreSQL` with embedded schema migrations
//! - Data models for markets, users, positions, trades, and price snapshots
//! - Repositories for typed database access

pub mod database;
pub mod models;
pub mod repositories;

pub use database::DatabaseClient;

// Re-export models
pub use models::{
    MarketRecord, MarketStatus, PositionRecord, PriceSnapshotRecord, TradeDirection, TradeRecord,
    UserRecord,
};

// Re-export repositories
pub use repositories::{
    MarketRepository, PositionRepository, PriceSnapshotRepository, Repositories, TradeRepository,
    UserRepository,
};
