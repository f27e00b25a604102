//! Constant-product automated market maker for binary YES/NO markets.
//!
//! A market holds two liquidity reserves whose product `k` is held constant
//! through every trade. Buying a side consumes the *opposite* reserve's
//! liquidity, so the spot price of a side is the opposite reserve's share
//! of the total:
//!
//! ```text
//! price(YES) = pool_no / (pool_yes + pool_no)
//! price(NO)  = pool_yes / (pool_yes + pool_no)
//! ```
//!
//! All functions here are pure arithmetic over `Decimal`. They never touch
//! storage and never fail for positive, well-formed inputs; the orchestrator
//! validates amounts and ownership before quoting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the two sides of a binary market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The outcome resolves true.
    Yes,
    /// The outcome resolves false.
    No,
}

impl Side {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            _ => None,
        }
    }

    /// Returns the other side of the market.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Yes => Self::No,
            Self::No => Self::Yes,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two liquidity reserves of one market.
///
/// Invariant: both reserves stay strictly positive. The product `yes * no`
/// is preserved by every quote produced from this pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// YES-side reserve.
    pub yes: Decimal,
    /// NO-side reserve.
    pub no: Decimal,
}

impl Pool {
    /// Creates a pool from explicit reserves.
    #[must_use]
    pub const fn new(yes: Decimal, no: Decimal) -> Self {
        Self { yes, no }
    }

    /// Creates a freshly seeded pool with equal reserves (spot price 0.50/0.50).
    #[must_use]
    pub const fn seeded(initial_size: Decimal) -> Self {
        Self {
            yes: initial_size,
            no: initial_size,
        }
    }

    /// The constant-product invariant `yes * no`.
    #[must_use]
    pub fn k(&self) -> Decimal {
        self.yes * self.no
    }

    /// Total liquidity across both reserves.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.yes + self.no
    }

    /// Instantaneous spot price of a side, in (0, 1) for positive reserves.
    ///
    /// `price(YES) + price(NO)` is exactly 1 for any valid pool.
    #[must_use]
    pub fn price(&self, side: Side) -> Decimal {
        match side {
            Side::Yes => self.no / self.total(),
            Side::No => self.yes / self.total(),
        }
    }

    /// Reserve backing the given side.
    #[must_use]
    pub const fn reserve(&self, side: Side) -> Decimal {
        match side {
            Side::Yes => self.yes,
            Side::No => self.no,
        }
    }

    /// Returns true if both reserves are strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.yes > Decimal::ZERO && self.no > Decimal::ZERO
    }

    fn with_reserve(&self, side: Side, value: Decimal) -> Self {
        match side {
            Side::Yes => Self {
                yes: value,
                no: self.no,
            },
            Side::No => Self {
                yes: self.yes,
                no: value,
            },
        }
    }
}

/// Result of pricing a buy against a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyQuote {
    /// Pool reserves after the buy executes.
    pub pool: Pool,
    /// Shares minted to the buyer.
    pub shares_out: Decimal,
    /// Average price paid per share (cash / shares), spot price plus slippage.
    pub effective_price: Decimal,
}

/// Result of pricing a sell against a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellQuote {
    /// Pool reserves after the sell executes.
    pub pool: Pool,
    /// Cash returned to the seller.
    pub cash_out: Decimal,
    /// Average price received per share (cash / shares), spot price minus slippage.
    pub effective_price: Decimal,
}

/// Prices a buy of `cash` worth of `side` shares.
///
/// The incoming cash joins the opposite reserve; the same-side reserve
/// shrinks to keep `k` constant, and the shrinkage is minted as shares.
/// Caller must ensure `cash > 0` and a valid pool.
#[must_use]
pub fn quote_buy(pool: Pool, side: Side, cash: Decimal) -> BuyQuote {
    let k = pool.k();

    let new_opposite = pool.reserve(side.opposite()) + cash;
    let new_own = k / new_opposite;
    let shares_out = pool.reserve(side) - new_own;

    let new_pool = pool
        .with_reserve(side.opposite(), new_opposite)
        .with_reserve(side, new_own);

    BuyQuote {
        pool: new_pool,
        shares_out,
        effective_price: cash / shares_out,
    }
}

/// Prices a sell of `shares` of `side` back into the pool.
///
/// Algebraic inverse of [`quote_buy`]: the sold shares rejoin the same-side
/// reserve, the opposite reserve shrinks to keep `k` constant, and the
/// shrinkage is paid out as cash. Caller must ensure `shares > 0` and that
/// the seller actually holds them; the pool is blind to per-user positions.
#[must_use]
pub fn quote_sell(pool: Pool, side: Side, shares: Decimal) -> SellQuote {
    let k = pool.k();

    let new_own = pool.reserve(side) + shares;
    let new_opposite = k / new_own;
    let cash_out = pool.reserve(side.opposite()) - new_opposite;

    let new_pool = pool
        .with_reserve(side, new_own)
        .with_reserve(side.opposite(), new_opposite);

    SellQuote {
        pool: new_pool,
        cash_out,
        effective_price: cash_out / shares,
    }
}

/// Relative price impact of a hypothetical buy: `(effective - spot) / spot`.
///
/// Display-only derived quantity; non-negative for any positive-size buy and
/// growing with trade size.
#[must_use]
pub fn slippage(pool: Pool, side: Side, cash: Decimal) -> Decimal {
    let spot = pool.price(side);
    let quote = quote_buy(pool, side, cash);
    (quote.effective_price - spot) / spot
}
