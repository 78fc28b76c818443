//! Cent-precision helpers for monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end; every threshold
//! comparison in the ledger normalizes to whole cents first, because
//! repeated partial payments otherwise accumulate sub-cent residue
//! that makes `paid == expected` checks unreliable.

use std::cmp::Ordering;

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places in the minor unit (cents).
pub const CENT_SCALE: u32 = 2;

/// Rounds an amount to whole cents using Banker's Rounding.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Converts an amount to integer minor units (cents).
///
/// The amount is rounded to the nearest cent first, so `10.004` and
/// `10.0` both map to `1000`.
#[must_use]
pub fn to_cents(amount: Decimal) -> i128 {
    let mut cents = round_to_cents(amount);
    // Exact: the value already has at most two fractional digits.
    cents.rescale(CENT_SCALE);
    cents.mantissa()
}

/// Compares two amounts at cent precision.
#[must_use]
pub fn cmp_cents(a: Decimal, b: Decimal) -> Ordering {
    to_cents(a).cmp(&to_cents(b))
}

/// Returns true if two amounts are equal at cent precision.
#[must_use]
pub fn eq_cents(a: Decimal, b: Decimal) -> bool {
    cmp_cents(a, b) == Ordering::Equal
}

/// Remaining balance of `expected` after `paid`, at cent precision.
///
/// May be negative; callers that enforce the non-overdraft invariant
/// check the sign before using it.
#[must_use]
pub fn remaining(expected: Decimal, paid: Decimal) -> Decimal {
    let cents = to_cents(expected) - to_cents(paid);
    Decimal::from_i128_with_scale(cents, CENT_SCALE)
}

/// Returns true if the amount is strictly positive at cent precision.
///
/// An amount below half a cent rounds to zero and is rejected.
#[must_use]
pub fn is_positive_amount(amount: Decimal) -> bool {
    to_cents(amount) > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_cents_whole_amounts() {
        assert_eq!(to_cents(dec!(0)), 0);
        assert_eq!(to_cents(dec!(10)), 1000);
        assert_eq!(to_cents(dec!(1000.00)), 100_000);
        assert_eq!(to_cents(dec!(-4.50)), -450);
    }

    #[rstest]
    #[case(dec!(0.005), 0)]
    #[case(dec!(0.015), 2)]
    #[case(dec!(0.025), 2)]
    #[case(dec!(10.004), 1000)]
    #[case(dec!(10.006), 1001)]
    fn test_to_cents_rounds_half_even(#[case] amount: Decimal, #[case] expected: i128) {
        assert_eq!(to_cents(amount), expected);
    }

    #[test]
    fn test_cmp_cents_ignores_subcent_residue() {
        // Residue left behind by repeated thirds of a peso.
        assert!(eq_cents(dec!(333.3333), dec!(333.33)));
        assert_eq!(cmp_cents(dec!(600.00), dec!(599.999)), Ordering::Equal);
        assert_eq!(cmp_cents(dec!(600.01), dec!(600.00)), Ordering::Greater);
        assert_eq!(cmp_cents(dec!(599.99), dec!(600.00)), Ordering::Less);
    }

    #[test]
    fn test_remaining() {
        assert_eq!(remaining(dec!(1000.00), dec!(600.00)), dec!(400.00));
        assert_eq!(remaining(dec!(1000.00), dec!(1000.00)), dec!(0.00));
        assert_eq!(remaining(dec!(500), dec!(0)), dec!(500.00));
        // Overdraft shows up as a negative remainder.
        assert_eq!(remaining(dec!(100.00), dec!(100.01)), dec!(-0.01));
    }

    #[test]
    fn test_remaining_normalizes_drifted_paid() {
        // Three partial payments of 33.333... recorded upstream with
        // four decimal places must still close out a 100.00 balance.
        let paid = dec!(33.3333) + dec!(33.3333) + dec!(33.3334);
        assert_eq!(remaining(dec!(100.00), paid), dec!(0.00));
    }

    #[test]
    fn test_is_positive_amount() {
        assert!(is_positive_amount(dec!(0.01)));
        assert!(is_positive_amount(dec!(250.75)));
        assert!(!is_positive_amount(dec!(0)));
        assert!(!is_positive_amount(dec!(-10)));
        // Rounds to zero cents, so not a recordable amount.
        assert!(!is_positive_amount(dec!(0.004)));
    }
}
