//! Market data model.
//!
//! A market is one binary prediction question backed by a two-reserve
//! liquidity pool. Reserves are mutated by every trade and frozen once the
//! market leaves the OPEN state.

use chrono::{DateTime, Utc};
use playmarket_core::{Pool, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStatus {
    /// Accepting trades.
    Open,
    /// Outcome declared, winning shares paid out.
    Resolved,
    /// Terminal without payout. No cancellation path exists yet; the state
    /// is reserved so stored rows can represent it.
    Cancelled,
}

impl MarketStatus {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "resolved" => Some(Self::Resolved),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// A market row: question, pool reserves, cumulative volume, lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MarketRecord {
    /// Market identifier.
    pub id: String,
    /// The question being traded.
    pub question: String,
    /// YES-side reserve. Strictly positive.
    pub pool_yes: Decimal,
    /// NO-side reserve. Strictly positive.
    pub pool_no: Decimal,
    /// Cumulative cash moved through this market. Never decreases.
    pub total_volume: Decimal,
    /// Lifecycle status: "open", "resolved", "cancelled".
    pub status: String,
    /// Declared outcome ("yes"/"no") once resolved.
    pub resolution: Option<String>,
    /// Free-form note recorded at resolution time.
    pub resolution_note: Option<String>,
    /// Trading deadline. Orders at or past this instant are rejected.
    pub closes_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Resolution timestamp, once resolved.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl MarketRecord {
    /// Creates an OPEN market with equal seed reserves.
    #[must_use]
    pub fn new(
        id: String,
        question: String,
        initial_pool_size: Decimal,
        closes_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            question,
            pool_yes: initial_pool_size,
            pool_no: initial_pool_size,
            total_volume: Decimal::ZERO,
            status: MarketStatus::Open.as_str().to_string(),
            resolution: None,
            resolution_note: None,
            closes_at,
            created_at,
            resolved_at: None,
        }
    }

    /// The current reserves as an AMM pool.
    #[must_use]
    pub const fn pool(&self) -> Pool {
        Pool::new(self.pool_yes, self.pool_no)
    }

    /// Replaces the reserves and accumulates traded volume.
    pub fn apply_trade(&mut self, pool: Pool, cash_moved: Decimal) {
        self.pool_yes = pool.yes;
        self.pool_no = pool.no;
        self.total_volume += cash_moved;
    }

    /// Marks the market resolved with the declared outcome.
    pub fn resolve(&mut self, resolution: Side, note: Option<String>, at: DateTime<Utc>) {
        self.status = MarketStatus::Resolved.as_str().to_string();
        self.resolution = Some(resolution.as_str().to_string());
        self.resolution_note = note;
        self.resolved_at = Some(at);
    }

    /// Returns true if the market is in the OPEN state.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == "open"
    }

    /// Returns true if the market has been resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status == "resolved"
    }

    /// Returns true if the market accepts trades at `now`: it must be OPEN
    /// and strictly before its close time.
    #[must_use]
    pub fn accepts_orders(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && now < self.closes_at
    }

    /// Returns the parsed lifecycle status.
    #[must_use]
    pub fn parsed_status(&self) -> Option<MarketStatus> {
        MarketStatus::parse(&self.status)
    }

    /// Returns the parsed resolution outcome.
    #[must_use]
    pub fn parsed_resolution(&self) -> Option<Side> {
        self.resolution.as_deref().and_then(Side::parse)
    }
}
