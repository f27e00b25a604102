//! Trade log repository.
//!
//! The trade log is append-only; there are no update or delete operations.

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::TradeRecord;

/// Repository for the immutable trade log.
#[derive(Debug, Clone)]
pub struct TradeRepository {
    pool: PgPool,
}

impl TradeRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Queries trades against a market, oldest first (replay order).
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn query_by_market(&self, market_id: &str) -> Result<Vec<TradeRecord>> {
        let records = sqlx::query_as::<_, TradeRecord>(
            r#"
            SELECT id, user_id, market_id, side, direction, amount, shares, price, created_at
            FROM trades
            WHERE market_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(market_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Queries a user's recent trades, newest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn query_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<TradeRecord>> {
        let records = sqlx::query_as::<_, TradeRecord>(
            r#"
            SELECT id, user_id, market_id, side, direction, amount, shares, price, created_at
            FROM trades
            WHERE user_id = $1
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Total cash moved through a market according to the log.
    ///
    /// Matches the market row's `total_volume` when the log is intact.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn market_volume(&self, market_id: &str) -> Result<Decimal> {
        let row: (Option<Decimal>,) = sqlx::query_as(
            r#"
            SELECT SUM(amount)
            FROM trades
            WHERE market_id = $1
            "#,
        )
        .bind(market_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0.unwrap_or(Decimal::ZERO))
    }
}
