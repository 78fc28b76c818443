//! Ledger service for payment rule checks.
//!
//! This service contains pure business logic with no database
//! dependencies. The repository layer calls these checks inside the
//! transaction that holds the obligation row lock, so the values
//! checked here cannot change before the write lands.

use rust_decimal::Decimal;
use uuid::Uuid;

use predio_shared::types::money;

use super::error::LedgerError;

/// Note attached to the synthetic payment written by the lump-sum
/// shortcut.
pub const FULL_PAYMENT_NOTE: &str = "Marked as paid in full";

/// Stateless service validating payment mutations.
pub struct LedgerService;

impl LedgerService {
    /// Validates a payment amount.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if the amount is zero,
    /// negative, or rounds to zero cents.
    pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
        if money::is_positive_amount(amount) {
            Ok(())
        } else {
            Err(LedgerError::InvalidAmount(amount))
        }
    }

    /// Checks the non-overdraft invariant for a prospective payment.
    ///
    /// Returns the remaining balance BEFORE the payment on success,
    /// so callers can log it or compute the post-payment balance.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Overpayment` (carrying the remaining
    /// balance) if the amount exceeds what is still owed, compared at
    /// cent precision.
    pub fn check_overpayment(
        amount_expected: Decimal,
        amount_paid: Decimal,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let remaining = money::remaining(amount_expected, amount_paid);
        if money::cmp_cents(amount, remaining) == std::cmp::Ordering::Greater {
            return Err(LedgerError::Overpayment {
                attempted: amount,
                remaining,
            });
        }
        Ok(remaining)
    }

    /// Validates a payment end to end: positive amount, then the
    /// non-overdraft invariant.
    ///
    /// # Errors
    ///
    /// Returns the first failing check's error.
    pub fn validate_payment(
        amount_expected: Decimal,
        amount_paid: Decimal,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        Self::validate_amount(amount)?;
        Self::check_overpayment(amount_expected, amount_paid, amount)
    }

    /// Precondition for the lump-sum "mark fully paid" shortcut: the
    /// obligation must have zero recorded payments.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AlreadyHasPayments` otherwise.
    pub fn check_can_mark_fully_paid(
        obligation_id: Uuid,
        existing_payments: u64,
    ) -> Result<(), LedgerError> {
        if existing_payments > 0 {
            return Err(LedgerError::AlreadyHasPayments(obligation_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_amount_positive() {
        assert!(LedgerService::validate_amount(dec!(0.01)).is_ok());
        assert!(LedgerService::validate_amount(dec!(1000)).is_ok());
    }

    #[test]
    fn test_validate_amount_rejects_zero_and_negative() {
        assert!(matches!(
            LedgerService::validate_amount(dec!(0)),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            LedgerService::validate_amount(dec!(-50)),
            Err(LedgerError::InvalidAmount(_))
        ));
        // Rounds to zero cents.
        assert!(matches!(
            LedgerService::validate_amount(dec!(0.004)),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_partial_payment_within_balance() {
        let remaining = LedgerService::validate_payment(dec!(1000.00), dec!(0), dec!(600.00));
        assert_eq!(remaining, Ok(dec!(1000.00)));
    }

    #[test]
    fn test_exact_remaining_payment() {
        let remaining = LedgerService::validate_payment(dec!(1000.00), dec!(600.00), dec!(400.00));
        assert_eq!(remaining, Ok(dec!(400.00)));
    }

    #[test]
    fn test_one_cent_overpayment_rejected() {
        // Scenario A tail: completed obligation rejects even a cent.
        let result = LedgerService::validate_payment(dec!(1000.00), dec!(1000.00), dec!(0.01));
        assert_eq!(
            result,
            Err(LedgerError::Overpayment {
                attempted: dec!(0.01),
                remaining: dec!(0.00),
            })
        );
    }

    #[test]
    fn test_overpayment_carries_remaining_balance() {
        let result = LedgerService::validate_payment(dec!(1000.00), dec!(600.00), dec!(400.01));
        assert_eq!(
            result,
            Err(LedgerError::Overpayment {
                attempted: dec!(400.01),
                remaining: dec!(400.00),
            })
        );
    }

    #[test]
    fn test_drifted_paid_amount_still_closes() {
        // Upstream stored paid with four decimals; payment of the
        // cent-rounded remainder must pass.
        let result = LedgerService::validate_payment(dec!(100.00), dec!(66.6667), dec!(33.33));
        assert!(result.is_ok());
    }

    #[test]
    fn test_mark_fully_paid_requires_no_payments() {
        let id = Uuid::new_v4();
        assert!(LedgerService::check_can_mark_fully_paid(id, 0).is_ok());
        assert_eq!(
            LedgerService::check_can_mark_fully_paid(id, 1),
            Err(LedgerError::AlreadyHasPayments(id))
        );
        assert_eq!(
            LedgerService::check_can_mark_fully_paid(id, 7),
            Err(LedgerError::AlreadyHasPayments(id))
        );
    }
}
