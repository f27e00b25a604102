//! User balance data model.
//!
//! The core only needs a single non-negative cash figure per user plus an
//! admin flag for resolution authority. Identity and sessions live outside
//! the core.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's cash account.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    /// User identifier.
    pub id: String,
    /// Cash balance. Never negative.
    pub balance: Decimal,
    /// Whether the user may resolve markets.
    pub is_admin: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates a user with the configured starting balance.
    #[must_use]
    pub fn new(id: String, starting_balance: Decimal, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            balance: starting_balance,
            is_admin: false,
            created_at,
        }
    }

    /// Returns true if the balance covers a spend of `amount`.
    #[must_use]
    pub fn can_afford(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn new_user_gets_starting_balance() {
        let user = UserRecord::new(
            "user-1".to_string(),
            dec!(1000),
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        );
        assert_eq!(user.balance, dec!(1000));
        assert!(!user.is_admin);
    }

    #[test]
    fn can_afford_checks_boundary_exactly() {
        let user = UserRecord::new(
            "user-1".to_string(),
            dec!(500),
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        );
        assert!(user.can_afford(dec!(500)));
        assert!(!user.can_afford(dec!(500.01)));
    }
}
