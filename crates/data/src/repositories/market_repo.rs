//! Market repository.
//!
//! Pool-level reads and inserts for market rows. Trade execution mutates
//! markets inside its own transaction with row locks; this repository
//! serves creation and non-transactional queries.

use anyhow::Result;
use sqlx::PgPool;

use crate::models::MarketRecord;

/// Repository for market operations.
#[derive(Debug, Clone)]
pub struct MarketRepository {
    pool: PgPool,
}

impl MarketRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new market.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, record: &MarketRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO markets
                (id, question, pool_yes, pool_no, total_volume, status,
                 resolution, resolution_note, closes_at, created_at, resolved_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(&record.id)
        .bind(&record.question)
        .bind(record.pool_yes)
        .bind(record.pool_no)
        .bind(record.total_volume)
        .bind(&record.status)
        .bind(&record.resolution)
        .bind(&record.resolution_note)
        .bind(record.closes_at)
        .bind(record.created_at)
        .bind(record.resolved_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a market by ID.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<MarketRecord>> {
        let record = sqlx::query_as::<_, MarketRecord>(
            r#"
            SELECT id, question, pool_yes, pool_no, total_volume, status,
                   resolution, resolution_note, closes_at, created_at, resolved_at
            FROM markets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Queries all OPEN markets, soonest-closing first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn query_open(&self) -> Result<Vec<MarketRecord>> {
        let records = sqlx::query_as::<_, MarketRecord>(
            r#"
            SELECT id, question, pool_yes, pool_no, total_volume, status,
                   resolution, resolution_note, closes_at, created_at, resolved_at
            FROM markets
            WHERE status = 'open'
            ORDER BY closes_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Queries recently created markets regardless of status.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn query_recent(&self, limit: i64) -> Result<Vec<MarketRecord>> {
        let records = sqlx::query_as::<_, MarketRecord>(
            r#"
            SELECT id, question, pool_yes, pool_no, total_volume, status,
                   resolution, resolution_note, closes_at, created_at, resolved_at
            FROM markets
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
