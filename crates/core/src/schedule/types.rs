//! Domain types for payment obligations.
//!
//! An obligation is a single expected payment belonging to a sale
//! account: the down payment, the initial payment, or one monthly
//! installment. Obligations are created upstream when the sale
//! contract is captured; the collections engine only mutates their
//! derived fields (`amount_paid`, `status`, `was_reset`).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use predio_shared::types::money;

/// Kind of payment obligation within a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationKind {
    /// The down payment on the property (at most one per account).
    DownPayment,
    /// The initial payment (at most one per account).
    InitialPayment,
    /// One of N monthly installments.
    Installment,
}

impl ObligationKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DownPayment => "down_payment",
            Self::InitialPayment => "initial_payment",
            Self::Installment => "installment",
        }
    }

    /// Parses a kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "down_payment" => Some(Self::DownPayment),
            "initial_payment" => Some(Self::InitialPayment),
            "installment" => Some(Self::Installment),
            _ => None,
        }
    }
}

impl fmt::Display for ObligationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Collection status of an obligation.
///
/// Always a pure function of `(amount_paid, amount_expected, due_date,
/// today)`; the stored column is a cache of [`derive_status`] and is
/// recomputed on every mutation.
///
/// [`derive_status`]: super::status::derive_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObligationStatus {
    /// Nothing paid yet and the due date has not passed.
    Pending,
    /// Some amount paid, less than expected.
    Partial,
    /// Paid in full (at cent precision).
    Completed,
    /// Nothing paid and the due date has passed.
    Overdue,
}

impl ObligationStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Partial => "partial",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "partial" => Some(Self::Partial),
            "completed" => Some(Self::Completed),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    /// Returns true if the obligation still accepts payments.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Completed)
    }
}

impl fmt::Display for ObligationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single expected payment belonging to a sale account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    /// The obligation ID.
    pub id: Uuid,
    /// The sale account this obligation belongs to.
    pub account_id: Uuid,
    /// Kind of obligation.
    pub kind: ObligationKind,
    /// Position in the installment plan; `None` unless `kind` is
    /// [`ObligationKind::Installment`].
    pub installment_number: Option<i32>,
    /// Amount expected, fixed at creation.
    pub amount_expected: Decimal,
    /// Sum of recorded payments. Derived, never set directly.
    pub amount_paid: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Cached collection status.
    pub status: ObligationStatus,
    /// True if the payment history was administratively cleared at
    /// least once. Sticky: never reverts to false.
    pub was_reset: bool,
    /// Interest accrued on this installment, carried from upstream.
    /// Zero for down/initial payments.
    pub interest: Decimal,
}

impl Obligation {
    /// Remaining balance at cent precision.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        money::remaining(self.amount_expected, self.amount_paid)
    }

    /// Returns true if the obligation is paid in full at cent precision.
    #[must_use]
    pub fn is_fully_paid(&self) -> bool {
        money::cmp_cents(self.amount_paid, self.amount_expected) != std::cmp::Ordering::Less
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_obligation(expected: Decimal, paid: Decimal) -> Obligation {
        Obligation {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            kind: ObligationKind::Installment,
            installment_number: Some(1),
            amount_expected: expected,
            amount_paid: paid,
            due_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            status: ObligationStatus::Pending,
            was_reset: false,
            interest: Decimal::ZERO,
        }
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            ObligationKind::DownPayment,
            ObligationKind::InitialPayment,
            ObligationKind::Installment,
        ] {
            assert_eq!(ObligationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ObligationKind::parse("balloon"), None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ObligationStatus::Pending,
            ObligationStatus::Partial,
            ObligationStatus::Completed,
            ObligationStatus::Overdue,
        ] {
            assert_eq!(ObligationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ObligationStatus::parse("unknown"), None);
    }

    #[test]
    fn test_status_is_open() {
        assert!(ObligationStatus::Pending.is_open());
        assert!(ObligationStatus::Partial.is_open());
        assert!(ObligationStatus::Overdue.is_open());
        assert!(!ObligationStatus::Completed.is_open());
    }

    #[test]
    fn test_remaining() {
        let obligation = make_obligation(dec!(1000.00), dec!(600.00));
        assert_eq!(obligation.remaining(), dec!(400.00));
    }

    #[test]
    fn test_is_fully_paid_at_cent_precision() {
        assert!(make_obligation(dec!(1000.00), dec!(1000.00)).is_fully_paid());
        assert!(make_obligation(dec!(1000.00), dec!(999.999)).is_fully_paid());
        assert!(!make_obligation(dec!(1000.00), dec!(999.99)).is_fully_paid());
    }
}
