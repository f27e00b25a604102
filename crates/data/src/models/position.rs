//! Position data model.
//!
//! One row per (user, market, side). Cost basis is a weighted average over
//! buys and is deliberately left untouched by sells; realized P/L books
//! against that basis on every sell and at resolution.

use chrono::{DateTime, Utc};
use playmarket_core::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's net holding in one side of one market.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PositionRecord {
    /// Owning user.
    pub user_id: String,
    /// Market being held.
    pub market_id: String,
    /// Side held: "yes" or "no".
    pub side: String,
    /// Shares held. Never negative.
    pub shares: Decimal,
    /// Weighted-average cost per share.
    pub avg_price: Decimal,
    /// Accumulated realized profit/loss from sells and resolution.
    pub realized: Decimal,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl PositionRecord {
    /// Creates an empty position, ready for its first buy.
    #[must_use]
    pub fn new(user_id: String, market_id: String, side: Side, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            market_id,
            side: side.as_str().to_string(),
            shares: Decimal::ZERO,
            avg_price: Decimal::ZERO,
            realized: Decimal::ZERO,
            updated_at: now,
        }
    }

    /// Folds a buy into the position with weighted-average cost.
    ///
    /// `new_avg = (old_shares * old_avg + cash_spent) / (old_shares + shares_bought)`
    ///
    /// On a fresh position this reduces to the trade's effective price.
    pub fn apply_buy(&mut self, shares_bought: Decimal, cash_spent: Decimal, now: DateTime<Utc>) {
        let total_shares = self.shares + shares_bought;
        self.avg_price = (self.shares * self.avg_price + cash_spent) / total_shares;
        self.shares = total_shares;
        self.updated_at = now;
    }

    /// Books a sell against the existing cost basis.
    ///
    /// Realized P/L uses the position's average cost, not the sell's
    /// execution price; the average cost itself only changes via buys.
    pub fn apply_sell(&mut self, shares_sold: Decimal, proceeds: Decimal, now: DateTime<Utc>) {
        self.realized += proceeds - shares_sold * self.avg_price;
        self.shares -= shares_sold;
        self.updated_at = now;
    }

    /// Settles the position at market resolution and returns the payout.
    ///
    /// Winning shares redeem at par (1 cash unit per share); losing shares
    /// redeem at zero. Realized P/L moves by `payout - shares * avg_price`
    /// either way, so losers book their full cost basis as a loss.
    pub fn settle(&mut self, resolution: Side, now: DateTime<Utc>) -> Decimal {
        let payout = if self.side == resolution.as_str() {
            self.shares
        } else {
            Decimal::ZERO
        };
        self.realized += payout - self.shares * self.avg_price;
        self.updated_at = now;
        payout
    }

    /// Total cash spent acquiring the current holding.
    #[must_use]
    pub fn cost_basis(&self) -> Decimal {
        self.shares * self.avg_price
    }

    /// Returns the parsed side.
    #[must_use]
    pub fn parsed_side(&self) -> Option<Side> {
        Side::parse(&self.side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn yes_position() -> PositionRecord {
        PositionRecord::new(
            "user-1".to_string(),
            "btc-150k-jun".to_string(),
            Side::Yes,
            sample_time(),
        )
    }

    // =========================================================================
    // Buy Tests
    // =========================================================================

    #[test]
    fn first_buy_sets_avg_to_effective_price() {
        let mut position = yes_position();
        // 33.33 shares for 50 cash, effective price 1.5
        position.apply_buy(dec!(33.3333), dec!(50), sample_time());

        assert_eq!(position.shares, dec!(33.3333));
        assert!((position.avg_price - dec!(1.5)).abs() < dec!(0.0001));
        assert_eq!(position.realized, dec!(0));
    }

    #[test]
    fn second_buy_weights_average_cost() {
        let mut position = yes_position();
        position.apply_buy(dec!(20), dec!(8), sample_time()); // avg 0.40
        position.apply_buy(dec!(10), dec!(7), sample_time()); // 10 more at 0.70

        // (20 * 0.40 + 7) / 30 = 0.50
        assert_eq!(position.shares, dec!(30));
        assert_eq!(position.avg_price, dec!(0.5));
    }

    // =========================================================================
    // Sell Tests
    // =========================================================================

    #[test]
    fn sell_books_realized_against_avg_cost() {
        let mut position = yes_position();
        position.apply_buy(dec!(20), dec!(8), sample_time()); // avg 0.40
        position.apply_sell(dec!(5), dec!(3), sample_time()); // sold for 0.60 each

        // realized = 3 - 5 * 0.40 = 1
        assert_eq!(position.realized, dec!(1));
        assert_eq!(position.shares, dec!(15));
        // Cost basis untouched by the sell.
        assert_eq!(position.avg_price, dec!(0.4));
    }

    #[test]
    fn sell_at_a_loss_books_negative_realized() {
        let mut position = yes_position();
        position.apply_buy(dec!(10), dec!(6), sample_time()); // avg 0.60
        position.apply_sell(dec!(10), dec!(4), sample_time());

        assert_eq!(position.realized, dec!(-2));
        assert_eq!(position.shares, dec!(0));
    }

    // =========================================================================
    // Settlement Tests
    // =========================================================================

    #[test]
    fn winning_settlement_pays_par() {
        // shares=20, avg=0.4, resolved YES: payout 20, realized += 20 - 8 = 12
        let mut position = yes_position();
        position.apply_buy(dec!(20), dec!(8), sample_time());

        let payout = position.settle(Side::Yes, sample_time());

        assert_eq!(payout, dec!(20));
        assert_eq!(position.realized, dec!(12));
    }

    #[test]
    fn losing_settlement_books_full_cost_basis() {
        // shares=15 on NO, resolved YES: payout 0, realized -= 15 * avg
        let mut position = PositionRecord::new(
            "user-2".to_string(),
            "btc-150k-jun".to_string(),
            Side::No,
            sample_time(),
        );
        position.apply_buy(dec!(15), dec!(9), sample_time()); // avg 0.60

        let payout = position.settle(Side::Yes, sample_time());

        assert_eq!(payout, dec!(0));
        assert_eq!(position.realized, dec!(-9));
    }

    #[test]
    fn settlement_after_partial_sell_uses_remaining_shares() {
        let mut position = yes_position();
        position.apply_buy(dec!(30), dec!(12), sample_time()); // avg 0.40
        position.apply_sell(dec!(10), dec!(6), sample_time()); // realized 2

        let payout = position.settle(Side::Yes, sample_time());

        assert_eq!(payout, dec!(20));
        // realized = 2 + (20 - 20 * 0.40) = 14
        assert_eq!(position.realized, dec!(14));
    }

    #[test]
    fn cost_basis_tracks_shares_times_avg() {
        let mut position = yes_position();
        position.apply_buy(dec!(25), dec!(10), sample_time());
        assert_eq!(position.cost_basis(), dec!(10));
    }

    #[test]
    fn parsed_side_round_trips() {
        assert_eq!(yes_position().parsed_side(), Some(Side::Yes));
    }
}
