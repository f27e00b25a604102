//! Price snapshot repository.
//!
//! Backs the price chart. Inserts are dispatched best-effort after a trade
//! commits; a failed insert is logged by the caller and dropped.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::PriceSnapshotRecord;

/// Repository for price snapshot operations.
#[derive(Debug, Clone)]
pub struct PriceSnapshotRepository {
    pool: PgPool,
}

impl PriceSnapshotRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a snapshot.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, record: &PriceSnapshotRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO price_snapshots (market_id, timestamp, price_yes, price_no)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&record.market_id)
        .bind(record.timestamp)
        .bind(record.price_yes)
        .bind(record.price_no)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Queries snapshots for a market within a time range.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn query_range(
        &self,
        market_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceSnapshotRecord>> {
        let records = sqlx::query_as::<_, PriceSnapshotRecord>(
            r#"
            SELECT market_id, timestamp, price_yes, price_no
            FROM price_snapshots
            WHERE market_id = $1 AND timestamp >= $2 AND timestamp <= $3
            ORDER BY timestamp ASC
            "#,
        )
        .bind(market_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Gets the most recent snapshot for a market.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn latest(&self, market_id: &str) -> Result<Option<PriceSnapshotRecord>> {
        let record = sqlx::query_as::<_, PriceSnapshotRecord>(
            r#"
            SELECT market_id, timestamp, price_yes, price_no
            FROM price_snapshots
            WHERE market_id = $1
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
        )
        .bind(market_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
