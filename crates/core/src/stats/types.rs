//! Statistics data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::ObligationStatus;

/// Collection statistics for one sale account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountStats {
    /// The sale account.
    pub account_id: Uuid,
    /// Total sale amount from the account record.
    pub total_sale_amount: Decimal,
    /// Sum of expected amounts across every obligation kind.
    pub total_expected: Decimal,
    /// Sum of paid amounts across every obligation kind.
    pub total_paid: Decimal,
    /// Expected minus paid, at cent precision.
    pub total_outstanding: Decimal,
    /// Down payment rollup, if the account has one.
    pub down_payment: Option<LumpSumStats>,
    /// Initial payment rollup, if the account has one.
    pub initial_payment: Option<LumpSumStats>,
    /// Installment plan rollup.
    pub installments: InstallmentStats,
}

impl AccountStats {
    /// All-zero stats for an account whose obligation schedule has not
    /// been populated yet. A valid state, not an error.
    #[must_use]
    pub fn empty(account_id: Uuid, total_sale_amount: Decimal) -> Self {
        Self {
            account_id,
            total_sale_amount,
            total_expected: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            total_outstanding: Decimal::ZERO,
            down_payment: None,
            initial_payment: None,
            installments: InstallmentStats::default(),
        }
    }
}

/// Rollup for a single lump-sum obligation (down or initial payment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpSumStats {
    /// Amount expected.
    pub expected: Decimal,
    /// Amount paid.
    pub paid: Decimal,
    /// Freshly derived status.
    pub status: ObligationStatus,
}

/// Rollup for the installment plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallmentStats {
    /// Number of installments.
    pub total: u32,
    /// Installments paid in full.
    pub completed: u32,
    /// Installments partially paid.
    pub partial: u32,
    /// Unpaid installments not yet due.
    pub pending: u32,
    /// Unpaid installments past their due date.
    pub overdue: u32,
    /// Earliest due date among pending installments, if any.
    pub next_due_date: Option<NaiveDate>,
    /// Sum of accrued interest across installments.
    pub total_interest: Decimal,
    /// Sum of expected amounts across installments.
    pub expected: Decimal,
    /// Sum of paid amounts across installments.
    pub paid: Decimal,
}
