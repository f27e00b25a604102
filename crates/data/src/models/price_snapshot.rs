//! Price snapshot data model for charting.
//!
//! One row per post-trade spot price observation. Writes are best-effort:
//! a failed snapshot never affects the trade that triggered it.

use chrono::{DateTime, Utc};
use playmarket_core::{Pool, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spot prices of a market at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PriceSnapshotRecord {
    /// Market observed.
    pub market_id: String,
    /// Observation timestamp.
    pub timestamp: DateTime<Utc>,
    /// YES spot price at the observation.
    pub price_yes: Decimal,
    /// NO spot price at the observation.
    pub price_no: Decimal,
}

impl PriceSnapshotRecord {
    /// Captures the spot prices implied by a pool.
    #[must_use]
    pub fn from_pool(market_id: String, pool: Pool, timestamp: DateTime<Utc>) -> Self {
        Self {
            market_id,
            timestamp,
            price_yes: pool.price(Side::Yes),
            price_no: pool.price(Side::No),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn snapshot_captures_both_spot_prices() {
        let pool = Pool::new(dec!(50), dec!(150));
        let snapshot = PriceSnapshotRecord::from_pool(
            "btc-150k-jun".to_string(),
            pool,
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        );

        assert_eq!(snapshot.price_yes, dec!(0.75));
        assert_eq!(snapshot.price_no, dec!(0.25));
        assert_eq!(snapshot.price_yes + snapshot.price_no, dec!(1));
    }
}
