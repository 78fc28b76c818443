//! Pure status derivation for obligations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cmp::Ordering;

use predio_shared::types::money;

use super::types::{Obligation, ObligationStatus};

/// Derives the collection status of an obligation.
///
/// Precedence: `completed` when paid covers expected (cent-compare),
/// then `partial` for any positive paid amount, then `pending` vs
/// `overdue` by due date. A partially paid obligation past its due
/// date stays `partial`.
#[must_use]
pub fn derive_status(
    amount_paid: Decimal,
    amount_expected: Decimal,
    due_date: NaiveDate,
    today: NaiveDate,
) -> ObligationStatus {
    if money::cmp_cents(amount_paid, amount_expected) != Ordering::Less {
        ObligationStatus::Completed
    } else if money::cmp_cents(amount_paid, Decimal::ZERO) == Ordering::Greater {
        ObligationStatus::Partial
    } else if due_date >= today {
        ObligationStatus::Pending
    } else {
        ObligationStatus::Overdue
    }
}

/// Returns true if the obligation's cached status matches a fresh
/// derivation. Reads use this as a consistency check.
#[must_use]
pub fn status_consistent(obligation: &Obligation, today: NaiveDate) -> bool {
    obligation.status
        == derive_status(
            obligation.amount_paid,
            obligation.amount_expected,
            obligation.due_date,
            today,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::ObligationKind;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(dec!(1000.00), dec!(1000.00), date(2025, 1, 1), date(2025, 2, 1), ObligationStatus::Completed)]
    #[case(dec!(600.00), dec!(1000.00), date(2025, 6, 1), date(2025, 1, 1), ObligationStatus::Partial)]
    #[case(dec!(0), dec!(500.00), date(2025, 3, 1), date(2025, 2, 1), ObligationStatus::Pending)]
    // expected=500.00, due=2025-01-01, today=2025-02-01, paid=0
    #[case(dec!(0), dec!(500.00), date(2025, 1, 1), date(2025, 2, 1), ObligationStatus::Overdue)]
    fn test_derive_status(
        #[case] paid: Decimal,
        #[case] expected: Decimal,
        #[case] due: NaiveDate,
        #[case] today: NaiveDate,
        #[case] want: ObligationStatus,
    ) {
        assert_eq!(derive_status(paid, expected, due, today), want);
    }

    #[test]
    fn test_completed_wins_over_overdue() {
        // Full payment after the due date is still completed.
        let status = derive_status(dec!(500.00), dec!(500.00), date(2025, 1, 1), date(2025, 6, 1));
        assert_eq!(status, ObligationStatus::Completed);
    }

    #[test]
    fn test_partial_stays_partial_past_due() {
        let status = derive_status(dec!(10.00), dec!(1000.00), date(2025, 1, 1), date(2025, 6, 1));
        assert_eq!(status, ObligationStatus::Partial);
    }

    #[test]
    fn test_pending_on_due_date() {
        // Due today is not overdue yet.
        let status = derive_status(dec!(0), dec!(500.00), date(2025, 2, 1), date(2025, 2, 1));
        assert_eq!(status, ObligationStatus::Pending);
    }

    #[test]
    fn test_cent_boundary() {
        // Sub-cent residue does not keep an obligation open.
        let status = derive_status(dec!(999.996), dec!(1000.00), date(2025, 1, 1), date(2025, 1, 1));
        assert_eq!(status, ObligationStatus::Completed);

        let status = derive_status(dec!(999.99), dec!(1000.00), date(2025, 1, 1), date(2025, 1, 1));
        assert_eq!(status, ObligationStatus::Partial);
    }

    #[test]
    fn test_status_consistent() {
        let today = date(2025, 2, 1);
        let obligation = Obligation {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            kind: ObligationKind::Installment,
            installment_number: Some(3),
            amount_expected: dec!(500.00),
            amount_paid: dec!(0),
            due_date: date(2025, 1, 1),
            status: ObligationStatus::Overdue,
            was_reset: false,
            interest: dec!(12.50),
        };
        assert!(status_consistent(&obligation, today));

        let stale = Obligation {
            status: ObligationStatus::Pending,
            ..obligation
        };
        assert!(!status_consistent(&stale, today));
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..100_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (2020i32..2035, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Deriving twice from the same inputs yields the same status.
        #[test]
        fn prop_derivation_idempotent(
            paid in amount_strategy(),
            expected in amount_strategy(),
            due in date_strategy(),
            today in date_strategy(),
        ) {
            let first = derive_status(paid, expected, due, today);
            let second = derive_status(paid, expected, due, today);
            prop_assert_eq!(first, second);
        }

        /// Paid covering expected always derives completed, regardless
        /// of dates.
        #[test]
        fn prop_full_payment_is_completed(
            expected in amount_strategy(),
            due in date_strategy(),
            today in date_strategy(),
        ) {
            let status = derive_status(expected, expected, due, today);
            prop_assert_eq!(status, ObligationStatus::Completed);
        }

        /// Zero paid never derives partial or completed for a positive
        /// expected amount.
        #[test]
        fn prop_unpaid_is_pending_or_overdue(
            expected in amount_strategy(),
            due in date_strategy(),
            today in date_strategy(),
        ) {
            prop_assume!(expected > Decimal::ZERO);
            let status = derive_status(Decimal::ZERO, expected, due, today);
            prop_assert!(matches!(
                status,
                ObligationStatus::Pending | ObligationStatus::Overdue
            ));
            prop_assert_eq!(status == ObligationStatus::Pending, due >= today);
        }
    }
}
