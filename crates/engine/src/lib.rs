//! Trade/settlement orchestrator for the play-money prediction market.
//!
//! Wraps the pure AMM quote functions from `playmarket-core` in atomic
//! read-modify-write transactions over market reserves, user balances,
//! per-side positions, and the append-only trade log, and implements the
//! terminal resolution payout.

pub mod error;
pub mod executor;
pub mod resolution;
pub mod validation;

pub use error::{EngineError, Result};
pub use executor::{TradeExecutor, TradeReceipt};
pub use resolution::ResolutionSummary;
