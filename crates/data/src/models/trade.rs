//! Trade log data model.
//!
//! One immutable row per executed trade. The core never updates or deletes
//! trade rows; replaying them against the seed pool reproduces a market's
//! reserves.

use chrono::{DateTime, Utc};
use playmarket_core::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether the trade moved cash into or out of the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    /// Cash in, shares out.
    Buy,
    /// Shares in, cash out.
    Sell,
}

impl TradeDirection {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            _ => None,
        }
    }
}

/// An append-only trade log entry.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TradeRecord {
    /// Auto-generated trade ID.
    pub id: i64,
    /// User who traded.
    pub user_id: String,
    /// Market traded against.
    pub market_id: String,
    /// Side traded: "yes" or "no".
    pub side: String,
    /// Direction: "buy" or "sell".
    pub direction: String,
    /// Cash moved (spent on a buy, received on a sell).
    pub amount: Decimal,
    /// Shares moved.
    pub shares: Decimal,
    /// Effective price per share for this trade.
    pub price: Decimal,
    /// Execution timestamp.
    pub created_at: DateTime<Utc>,
}

impl TradeRecord {
    /// Creates a trade row (pre-insert; the ID is assigned by the database).
    #[must_use]
    pub fn new(
        user_id: String,
        market_id: String,
        side: Side,
        direction: TradeDirection,
        amount: Decimal,
        shares: Decimal,
        price: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            user_id,
            market_id,
            side: side.as_str().to_string(),
            direction: direction.as_str().to_string(),
            amount,
            shares,
            price,
            created_at,
        }
    }

    /// Returns true for buy trades.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.direction == "buy"
    }

    /// Returns the parsed side.
    #[must_use]
    pub fn parsed_side(&self) -> Option<Side> {
        Side::parse(&self.side)
    }

    /// Returns the parsed direction.
    #[must_use]
    pub fn parsed_direction(&self) -> Option<TradeDirection> {
        TradeDirection::parse(&self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_trade() -> TradeRecord {
        TradeRecord::new(
            "user-1".to_string(),
            "btc-150k-jun".to_string(),
            Side::Yes,
            TradeDirection::Buy,
            dec!(50),
            dec!(33.3333),
            dec!(1.5),
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn direction_as_str_and_parse() {
        assert_eq!(TradeDirection::Buy.as_str(), "buy");
        assert_eq!(TradeDirection::parse("SELL"), Some(TradeDirection::Sell));
        assert_eq!(TradeDirection::parse("hold"), None);
    }

    #[test]
    fn new_trade_carries_quote_figures() {
        let trade = sample_trade();
        assert!(trade.is_buy());
        assert_eq!(trade.amount, dec!(50));
        assert_eq!(trade.shares, dec!(33.3333));
        assert_eq!(trade.price, dec!(1.5));
        assert_eq!(trade.parsed_side(), Some(Side::Yes));
        assert_eq!(trade.parsed_direction(), Some(TradeDirection::Buy));
    }

    #[test]
    fn trade_serialization_round_trip() {
        let trade = sample_trade();
        let json = serde_json::to_string(&trade).unwrap();
        let parsed: TradeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.market_id, trade.market_id);
        assert_eq!(parsed.shares, trade.shares);
    }
}
