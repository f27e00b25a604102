//! Market resolution.
//!
//! Resolution is a terminal state transition: the market's outcome is
//! declared once, every open position is settled at par (1 cash unit per
//! winning share, 0 per losing share), and balances plus realized P/L move
//! in the same transaction that flips the status. The status check under
//! the market row lock is what makes resolution idempotent: a second
//! attempt sees RESOLVED and fails before any payout arithmetic.

use chrono::{DateTime, Utc};
use playmarket_core::Side;
use playmarket_data::models::PositionRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::error::{EngineError, Result};
use crate::executor::{lock_market, lock_user, store_balance, store_position, TradeExecutor};

/// Outcome of a completed resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionSummary {
    /// Market that was resolved.
    pub market_id: String,
    /// Declared outcome.
    pub resolution: Side,
    /// Number of positions settled (winners and losers).
    pub positions_settled: usize,
    /// Number of positions that received a payout.
    pub winners: usize,
    /// Total cash paid out to winning positions.
    pub total_paid_out: Decimal,
    /// When the resolution was recorded.
    pub resolved_at: DateTime<Utc>,
}

impl TradeExecutor {
    /// Resolves a market to the given outcome and pays out winning positions.
    ///
    /// All-or-nothing: the status flip, every balance credit, and every
    /// position's realized P/L update commit together or not at all.
    ///
    /// # Errors
    /// `Unauthorized` if the caller is not an admin, `MarketNotFound` /
    /// `UserNotFound` for missing rows, `MarketNotOpen` if the market
    /// already left the OPEN state (including a prior resolution), and
    /// `Persistence` for storage failures.
    pub async fn resolve_market(
        &self,
        admin_user_id: &str,
        market_id: &str,
        resolution: Side,
        note: Option<String>,
    ) -> Result<ResolutionSummary> {
        let now = Utc::now();
        let mut tx = self.db_pool().begin().await?;

        // Market before user, matching the trade path's lock order; an admin
        // trading their own market must not deadlock against their resolve.
        let market = lock_market(&mut *tx, market_id).await?;

        let admin = lock_user(&mut *tx, admin_user_id).await?;
        if !admin.is_admin {
            return Err(EngineError::unauthorized(format!(
                "user {admin_user_id} may not resolve markets"
            )));
        }

        if !market.is_open() {
            return Err(EngineError::market_not_open(market_id));
        }

        mark_resolved(&mut *tx, market_id, resolution, note.as_deref(), now).await?;

        let positions = lock_open_positions(&mut *tx, market_id).await?;
        let positions_settled = positions.len();
        let mut winners = 0;
        let mut total_paid_out = Decimal::ZERO;

        for mut position in positions {
            let payout = position.settle(resolution, now);
            if payout > Decimal::ZERO {
                let holder = lock_user(&mut *tx, &position.user_id).await?;
                store_balance(&mut *tx, &position.user_id, holder.balance + payout).await?;
                winners += 1;
                total_paid_out += payout;
            }
            store_position(&mut *tx, &position).await?;
        }

        tx.commit().await?;

        tracing::info!(
            market_id,
            resolution = %resolution,
            positions_settled,
            winners,
            total_paid_out = %total_paid_out,
            "market resolved"
        );

        Ok(ResolutionSummary {
            market_id: market_id.to_string(),
            resolution,
            positions_settled,
            winners,
            total_paid_out,
            resolved_at: now,
        })
    }
}

async fn mark_resolved(
    conn: &mut PgConnection,
    market_id: &str,
    resolution: Side,
    note: Option<&str>,
    at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE markets
        SET status = 'resolved', resolution = $2, resolution_note = $3, resolved_at = $4
        WHERE id = $1
        "#,
    )
    .bind(market_id)
    .bind(resolution.as_str())
    .bind(note)
    .bind(at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Locks every position on the market still holding shares.
async fn lock_open_positions(
    conn: &mut PgConnection,
    market_id: &str,
) -> Result<Vec<PositionRecord>> {
    let positions = sqlx::query_as::<_, PositionRecord>(
        r#"
        SELECT user_id, market_id, side, shares, avg_price, realized, updated_at
        FROM positions
        WHERE market_id = $1 AND shares > 0
        ORDER BY user_id, side
        FOR UPDATE
        "#,
    )
    .bind(market_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(positions)
}
