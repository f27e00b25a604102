//! Error types for trade execution and settlement.
//!
//! Every orchestrator operation runs inside a transaction that rolls back
//! wholesale on any of these errors; partial mutation is never observable.
//! None of the failures are retried automatically.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while executing trades or resolving markets.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or out-of-range input, rejected before any state read.
    #[error("validation error: {0}")]
    Validation(String),

    /// Caller lacks the authority for the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Market does not exist.
    #[error("market not found: {market_id}")]
    MarketNotFound {
        /// The market ID that was not found.
        market_id: String,
    },

    /// User does not exist.
    #[error("user not found: {user_id}")]
    UserNotFound {
        /// The user ID that was not found.
        user_id: String,
    },

    /// Market is not in the OPEN state.
    #[error("market not open: {market_id}")]
    MarketNotOpen {
        /// The market that refused the operation.
        market_id: String,
    },

    /// Market is past its close time.
    #[error("market closed for trading: {market_id}")]
    MarketClosed {
        /// The market that refused the trade.
        market_id: String,
    },

    /// Balance cannot cover the requested buy.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Cash needed for the trade.
        required: Decimal,
        /// Cash actually held.
        available: Decimal,
    },

    /// Position cannot cover the requested sell.
    #[error("insufficient shares: requested {requested}, held {held}")]
    InsufficientShares {
        /// Shares the caller tried to sell.
        requested: Decimal,
        /// Shares actually held.
        held: Decimal,
    },

    /// Transaction or storage failure.
    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl EngineError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a market not found error.
    pub fn market_not_found(market_id: impl Into<String>) -> Self {
        Self::MarketNotFound {
            market_id: market_id.into(),
        }
    }

    /// Creates a user not found error.
    pub fn user_not_found(user_id: impl Into<String>) -> Self {
        Self::UserNotFound {
            user_id: user_id.into(),
        }
    }

    /// Creates a market not open error.
    pub fn market_not_open(market_id: impl Into<String>) -> Self {
        Self::MarketNotOpen {
            market_id: market_id.into(),
        }
    }

    /// Creates a market closed error.
    pub fn market_closed(market_id: impl Into<String>) -> Self {
        Self::MarketClosed {
            market_id: market_id.into(),
        }
    }

    /// Creates an insufficient balance error.
    pub fn insufficient_balance(required: Decimal, available: Decimal) -> Self {
        Self::InsufficientBalance {
            required,
            available,
        }
    }

    /// Creates an insufficient shares error.
    pub fn insufficient_shares(requested: Decimal, held: Decimal) -> Self {
        Self::InsufficientShares { requested, held }
    }

    /// Returns true if the failure was caused by the request rather than
    /// by storage; client errors are safe to surface verbatim.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Persistence(_))
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
