//! Trade execution orchestrator.
//!
//! Each operation loads the touched market/user/position rows with row
//! locks inside a single transaction, prices the trade with the pure AMM
//! quote functions, and persists every effect (reserves, balance, position,
//! trade log) as one atomic unit. Concurrent trades against one market
//! serialize on the market row lock, so replaying the committed trade log
//! against the seed pool reproduces the final reserves.
//!
//! Lock order is market, then user, then position; resolution follows the
//! same order, which makes trading and resolution mutually exclusive per
//! market.

use chrono::{DateTime, Utc};
use playmarket_core::{quote_buy, quote_sell, Pool, Side, TradingConfig};
use playmarket_data::models::{MarketRecord, PositionRecord, PriceSnapshotRecord, UserRecord};
use playmarket_data::repositories::PriceSnapshotRepository;
use playmarket_data::TradeDirection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::error::{EngineError, Result};
use crate::validation;

/// Outcome of an executed trade, returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeReceipt {
    /// Trade log ID assigned by the database.
    pub trade_id: i64,
    /// Market traded against.
    pub market_id: String,
    /// Side traded.
    pub side: Side,
    /// Buy or sell.
    pub direction: TradeDirection,
    /// Cash moved: spent on a buy, received on a sell.
    pub amount: Decimal,
    /// Shares moved.
    pub shares: Decimal,
    /// Effective price per share for this trade.
    pub effective_price: Decimal,
    /// User's balance after the trade.
    pub new_balance: Decimal,
    /// Post-trade YES spot price.
    pub price_yes: Decimal,
    /// Post-trade NO spot price.
    pub price_no: Decimal,
}

/// Executes trades and resolutions against persistent market state.
#[derive(Debug, Clone)]
pub struct TradeExecutor {
    pool: PgPool,
    limits: TradingConfig,
}

impl TradeExecutor {
    /// Creates an executor over a database pool with the given trade limits.
    #[must_use]
    pub fn new(pool: PgPool, limits: TradingConfig) -> Self {
        Self { pool, limits }
    }

    /// The configured per-trade limits.
    #[must_use]
    pub const fn limits(&self) -> &TradingConfig {
        &self.limits
    }

    /// Buys `amount` worth of `side` shares on a market.
    ///
    /// Validates the amount before touching state, then atomically: debits
    /// the user's balance, moves the pool reserves, folds the shares into
    /// the user's position at weighted-average cost, and appends a BUY row
    /// to the trade log. A price snapshot is dispatched best-effort after
    /// commit.
    ///
    /// # Errors
    /// `Validation` for out-of-bounds amounts, `MarketNotFound` /
    /// `UserNotFound` for missing rows, `MarketNotOpen` / `MarketClosed`
    /// for non-tradable markets, `InsufficientBalance` when the user cannot
    /// cover the amount, and `Persistence` for storage failures. No error
    /// leaves partial state behind.
    pub async fn execute_buy(
        &self,
        user_id: &str,
        market_id: &str,
        side: Side,
        amount: Decimal,
    ) -> Result<TradeReceipt> {
        validation::check_buy_amount(amount, &self.limits)?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let mut market = lock_market(&mut *tx, market_id).await?;
        validation::check_market_tradable(&market, now)?;

        let user = lock_user(&mut *tx, user_id).await?;
        validation::check_balance(&user, amount)?;

        let quote = quote_buy(market.pool(), side, amount);
        market.apply_trade(quote.pool, amount);

        let mut position = lock_position(&mut *tx, user_id, market_id, side)
            .await?
            .unwrap_or_else(|| {
                PositionRecord::new(user_id.to_string(), market_id.to_string(), side, now)
            });
        position.apply_buy(quote.shares_out, amount, now);

        let new_balance = user.balance - amount;
        store_market(&mut *tx, &market).await?;
        store_balance(&mut *tx, user_id, new_balance).await?;
        store_position(&mut *tx, &position).await?;
        let trade_id = append_trade(
            &mut *tx,
            user_id,
            market_id,
            side,
            TradeDirection::Buy,
            amount,
            quote.shares_out,
            quote.effective_price,
            now,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            user_id,
            market_id,
            side = %side,
            %amount,
            shares = %quote.shares_out,
            price = %quote.effective_price,
            "buy executed"
        );
        self.dispatch_snapshot(market_id, quote.pool);

        Ok(TradeReceipt {
            trade_id,
            market_id: market_id.to_string(),
            side,
            direction: TradeDirection::Buy,
            amount,
            shares: quote.shares_out,
            effective_price: quote.effective_price,
            new_balance,
            price_yes: quote.pool.price(Side::Yes),
            price_no: quote.pool.price(Side::No),
        })
    }

    /// Sells `shares` of `side` back into a market's pool.
    ///
    /// Atomically: credits the sale proceeds to the user's balance, moves
    /// the pool reserves, reduces the position and books realized P/L
    /// against its average cost (which sells never recompute), and appends
    /// a SELL row to the trade log.
    ///
    /// # Errors
    /// `Validation` for non-positive quantities, `InsufficientShares` when
    /// the position cannot cover the sell, plus the same market/user/storage
    /// failures as [`Self::execute_buy`].
    pub async fn execute_sell(
        &self,
        user_id: &str,
        market_id: &str,
        side: Side,
        shares: Decimal,
    ) -> Result<TradeReceipt> {
        validation::check_sell_shares(shares)?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let mut market = lock_market(&mut *tx, market_id).await?;
        validation::check_market_tradable(&market, now)?;

        let user = lock_user(&mut *tx, user_id).await?;

        let position = lock_position(&mut *tx, user_id, market_id, side).await?;
        validation::check_position_cover(position.as_ref(), shares)?;
        let mut position = position.ok_or_else(|| {
            // Unreachable after the cover check, but avoids an unwrap.
            EngineError::insufficient_shares(shares, Decimal::ZERO)
        })?;

        let quote = quote_sell(market.pool(), side, shares);
        market.apply_trade(quote.pool, quote.cash_out);
        position.apply_sell(shares, quote.cash_out, now);

        let new_balance = user.balance + quote.cash_out;
        store_market(&mut *tx, &market).await?;
        store_balance(&mut *tx, user_id, new_balance).await?;
        store_position(&mut *tx, &position).await?;
        let trade_id = append_trade(
            &mut *tx,
            user_id,
            market_id,
            side,
            TradeDirection::Sell,
            quote.cash_out,
            shares,
            quote.effective_price,
            now,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            user_id,
            market_id,
            side = %side,
            %shares,
            proceeds = %quote.cash_out,
            price = %quote.effective_price,
            "sell executed"
        );
        self.dispatch_snapshot(market_id, quote.pool);

        Ok(TradeReceipt {
            trade_id,
            market_id: market_id.to_string(),
            side,
            direction: TradeDirection::Sell,
            amount: quote.cash_out,
            shares,
            effective_price: quote.effective_price,
            new_balance,
            price_yes: quote.pool.price(Side::Yes),
            price_no: quote.pool.price(Side::No),
        })
    }

    pub(crate) fn db_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Records the post-trade spot price for charting, off the trade's
    /// failure path: the task runs after commit and swallows its own errors.
    fn dispatch_snapshot(&self, market_id: &str, pool_state: Pool) {
        let repo = PriceSnapshotRepository::new(self.pool.clone());
        let snapshot =
            PriceSnapshotRecord::from_pool(market_id.to_string(), pool_state, Utc::now());
        tokio::spawn(async move {
            if let Err(err) = repo.insert(&snapshot).await {
                tracing::warn!(
                    market_id = %snapshot.market_id,
                    error = %err,
                    "price snapshot write failed"
                );
            }
        });
    }
}

/// Loads a market row with a row lock, failing if it does not exist.
pub(crate) async fn lock_market(conn: &mut PgConnection, market_id: &str) -> Result<MarketRecord> {
    let market = sqlx::query_as::<_, MarketRecord>(
        r#"
        SELECT id, question, pool_yes, pool_no, total_volume, status,
               resolution, resolution_note, closes_at, created_at, resolved_at
        FROM markets
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(market_id)
    .fetch_optional(&mut *conn)
    .await?;

    market.ok_or_else(|| EngineError::market_not_found(market_id))
}

/// Loads a user row with a row lock, failing if it does not exist.
pub(crate) async fn lock_user(conn: &mut PgConnection, user_id: &str) -> Result<UserRecord> {
    let user = sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT id, balance, is_admin, created_at
        FROM users
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    user.ok_or_else(|| EngineError::user_not_found(user_id))
}

async fn lock_position(
    conn: &mut PgConnection,
    user_id: &str,
    market_id: &str,
    side: Side,
) -> Result<Option<PositionRecord>> {
    let position = sqlx::query_as::<_, PositionRecord>(
        r#"
        SELECT user_id, market_id, side, shares, avg_price, realized, updated_at
        FROM positions
        WHERE user_id = $1 AND market_id = $2 AND side = $3
        FOR UPDATE
        "#,
    )
    .bind(user_id)
    .bind(market_id)
    .bind(side.as_str())
    .fetch_optional(&mut *conn)
    .await?;

    Ok(position)
}

/// Persists a market's mutable trade state: reserves plus volume.
async fn store_market(conn: &mut PgConnection, market: &MarketRecord) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE markets
        SET pool_yes = $2, pool_no = $3, total_volume = $4
        WHERE id = $1
        "#,
    )
    .bind(&market.id)
    .bind(market.pool_yes)
    .bind(market.pool_no)
    .bind(market.total_volume)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub(crate) async fn store_balance(
    conn: &mut PgConnection,
    user_id: &str,
    balance: Decimal,
) -> Result<()> {
    sqlx::query("UPDATE users SET balance = $2 WHERE id = $1")
        .bind(user_id)
        .bind(balance)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

pub(crate) async fn store_position(
    conn: &mut PgConnection,
    position: &PositionRecord,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO positions (user_id, market_id, side, shares, avg_price, realized, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id, market_id, side) DO UPDATE
        SET shares = EXCLUDED.shares,
            avg_price = EXCLUDED.avg_price,
            realized = EXCLUDED.realized,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(&position.user_id)
    .bind(&position.market_id)
    .bind(&position.side)
    .bind(position.shares)
    .bind(position.avg_price)
    .bind(position.realized)
    .bind(position.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn append_trade(
    conn: &mut PgConnection,
    user_id: &str,
    market_id: &str,
    side: Side,
    direction: TradeDirection,
    amount: Decimal,
    shares: Decimal,
    price: Decimal,
    created_at: DateTime<Utc>,
) -> Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO trades (user_id, market_id, side, direction, amount, shares, price, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(market_id)
    .bind(side.as_str())
    .bind(direction.as_str())
    .bind(amount)
    .bind(shares)
    .bind(price)
    .bind(created_at)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row.0)
}
