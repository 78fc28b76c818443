//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Payment recording errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Payment amount is zero, negative, or rounds to zero cents.
    #[error("Payment amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Payment exceeds the remaining balance of the obligation.
    /// Carries the remaining balance for client display.
    #[error("Payment of {attempted} exceeds remaining balance of {remaining}")]
    Overpayment {
        /// The rejected payment amount.
        attempted: Decimal,
        /// The balance still owed on the obligation.
        remaining: Decimal,
    },

    /// Lump-sum shortcut attempted on an obligation that already has
    /// recorded payments.
    #[error("Obligation {0} already has recorded payments")]
    AlreadyHasPayments(Uuid),
}
