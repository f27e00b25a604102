//! Domain validation for trade and resolution requests.
//!
//! Pure checks over already-loaded records. Input bounds are verified before
//! any state is read; the state-dependent checks run inside the executor's
//! transaction against the locked rows.

use chrono::{DateTime, Utc};
use playmarket_core::TradingConfig;
use playmarket_data::{MarketRecord, PositionRecord, UserRecord};
use rust_decimal::Decimal;

use crate::error::{EngineError, Result};

/// Validates a buy amount against the configured per-trade bounds.
///
/// # Errors
/// Returns `Validation` if the amount is outside `[min_trade, max_trade]`.
pub fn check_buy_amount(amount: Decimal, limits: &TradingConfig) -> Result<()> {
    if amount < limits.min_trade {
        return Err(EngineError::validation(format!(
            "trade amount {amount} below minimum {}",
            limits.min_trade
        )));
    }
    if amount > limits.max_trade {
        return Err(EngineError::validation(format!(
            "trade amount {amount} above maximum {}",
            limits.max_trade
        )));
    }
    Ok(())
}

/// Validates a sell share quantity.
///
/// # Errors
/// Returns `Validation` if the quantity is not strictly positive.
pub fn check_sell_shares(shares: Decimal) -> Result<()> {
    if shares <= Decimal::ZERO {
        return Err(EngineError::validation(format!(
            "sell quantity must be positive, got {shares}"
        )));
    }
    Ok(())
}

/// Validates that a market accepts trades at `now`.
///
/// # Errors
/// Returns `MarketNotOpen` when the market left the OPEN state and
/// `MarketClosed` when its deadline has passed.
pub fn check_market_tradable(market: &MarketRecord, now: DateTime<Utc>) -> Result<()> {
    if !market.is_open() {
        return Err(EngineError::market_not_open(market.id.clone()));
    }
    // Open but not accepting orders means the deadline has passed.
    if !market.accepts_orders(now) {
        return Err(EngineError::market_closed(market.id.clone()));
    }
    Ok(())
}

/// Validates that a user's balance covers a buy.
///
/// # Errors
/// Returns `InsufficientBalance` when it does not.
pub fn check_balance(user: &UserRecord, amount: Decimal) -> Result<()> {
    if !user.can_afford(amount) {
        return Err(EngineError::insufficient_balance(amount, user.balance));
    }
    Ok(())
}

/// Validates that a position covers a sell.
///
/// # Errors
/// Returns `InsufficientShares` when the position holds fewer shares than
/// requested (a missing position counts as zero held).
pub fn check_position_cover(position: Option<&PositionRecord>, shares: Decimal) -> Result<()> {
    let held = position.map_or(Decimal::ZERO, |p| p.shares);
    if held < shares {
        return Err(EngineError::insufficient_shares(shares, held));
    }
    Ok(())
}
