//! Position repository.
//!
//! Read-side queries for positions. Upserts and settlement updates run
//! inside the orchestrator's transactions; callers here see committed rows
//! only. Positions with zero shares remain as rows and are filtered where
//! appropriate.

use anyhow::Result;
use sqlx::PgPool;

use crate::models::PositionRecord;

/// Repository for position queries.
#[derive(Debug, Clone)]
pub struct PositionRepository {
    pool: PgPool,
}

impl PositionRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a single position by its compound key.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn get(
        &self,
        user_id: &str,
        market_id: &str,
        side: &str,
    ) -> Result<Option<PositionRecord>> {
        let record = sqlx::query_as::<_, PositionRecord>(
            r#"
            SELECT user_id, market_id, side, shares, avg_price, realized, updated_at
            FROM positions
            WHERE user_id = $1 AND market_id = $2 AND side = $3
            "#,
        )
        .bind(user_id)
        .bind(market_id)
        .bind(side)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Queries a user's positions with shares remaining.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn query_held_by_user(&self, user_id: &str) -> Result<Vec<PositionRecord>> {
        let records = sqlx::query_as::<_, PositionRecord>(
            r#"
            SELECT user_id, market_id, side, shares, avg_price, realized, updated_at
            FROM positions
            WHERE user_id = $1 AND shares > 0
            ORDER BY market_id, side
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Queries all of a user's positions, including settled zero-share rows.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn query_all_by_user(&self, user_id: &str) -> Result<Vec<PositionRecord>> {
        let records = sqlx::query_as::<_, PositionRecord>(
            r#"
            SELECT user_id, market_id, side, shares, avg_price, realized, updated_at
            FROM positions
            WHERE user_id = $1
            ORDER BY market_id, side
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Queries the open positions on one market.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn query_held_on_market(&self, market_id: &str) -> Result<Vec<PositionRecord>> {
        let records = sqlx::query_as::<_, PositionRecord>(
            r#"
            SELECT user_id, market_id, side, shares, avg_price, realized, updated_at
            FROM positions
            WHERE market_id = $1 AND shares > 0
            ORDER BY user_id, side
            "#,
        )
        .bind(market_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
