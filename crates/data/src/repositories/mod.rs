//! Database repositories for the prediction market core.
//!
//! Each repository provides typed access to a specific table. Repositories
//! serve committed-state reads and standalone inserts; the multi-row
//! read-modify-write of trade execution and resolution lives in the engine
//! crate's transactions.

pub mod market_repo;
pub mod position_repo;
pub mod price_snapshot_repo;
pub mod trade_repo;
pub mod user_repo;

pub use market_repo::MarketRepository;
pub use position_repo::PositionRepository;
pub use price_snapshot_repo::PriceSnapshotRepository;
pub use trade_repo::TradeRepository;
pub use user_repo::UserRepository;

use sqlx::PgPool;

/// Creates all repositories from a single database pool.
pub struct Repositories {
    pub markets: MarketRepository,
    pub users: UserRepository,
    pub positions: PositionRepository,
    pub trades: TradeRepository,
    pub price_snapshots: PriceSnapshotRepository,
}

impl Repositories {
    /// Creates a new set of repositories from a database pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            markets: MarketRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            positions: PositionRepository::new(pool.clone()),
            trades: TradeRepository::new(pool.clone()),
            price_snapshots: PriceSnapshotRepository::new(pool),
        }
    }
}
