//! Statistics aggregation service.
//!
//! Reads a snapshot of an account's obligations and produces the
//! rollup the collection UI and reports render. Statuses are derived
//! fresh from the snapshot rather than trusting the cached column, so
//! a stale cache cannot skew the counts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use predio_shared::types::money;

use crate::schedule::{derive_status, Obligation, ObligationKind, ObligationStatus};
use crate::stats::types::{AccountStats, InstallmentStats, LumpSumStats};

/// Stateless service building per-account statistics.
pub struct StatsService;

impl StatsService {
    /// Builds the statistics rollup for one account.
    ///
    /// `obligations` is the account's full obligation list; order does
    /// not matter. An empty list yields [`AccountStats::empty`].
    #[must_use]
    pub fn build(
        account_id: Uuid,
        total_sale_amount: Decimal,
        obligations: &[Obligation],
        today: NaiveDate,
    ) -> AccountStats {
        if obligations.is_empty() {
            return AccountStats::empty(account_id, total_sale_amount);
        }

        let mut stats = AccountStats::empty(account_id, total_sale_amount);

        for obligation in obligations {
            let status = derive_status(
                obligation.amount_paid,
                obligation.amount_expected,
                obligation.due_date,
                today,
            );

            stats.total_expected += obligation.amount_expected;
            stats.total_paid += obligation.amount_paid;

            match obligation.kind {
                ObligationKind::DownPayment => {
                    Self::set_lump_sum(&mut stats.down_payment, obligation, status);
                }
                ObligationKind::InitialPayment => {
                    Self::set_lump_sum(&mut stats.initial_payment, obligation, status);
                }
                ObligationKind::Installment => {
                    Self::tally_installment(&mut stats.installments, obligation, status);
                }
            }
        }

        stats.total_outstanding = money::remaining(stats.total_expected, stats.total_paid);
        stats
    }

    /// Fills a lump-sum slot. Accounts carry at most one obligation of
    /// each lump-sum kind; if upstream data violates that, the first
    /// one wins and the duplicate still counts toward the totals.
    fn set_lump_sum(
        slot: &mut Option<LumpSumStats>,
        obligation: &Obligation,
        status: ObligationStatus,
    ) {
        if slot.is_none() {
            *slot = Some(LumpSumStats {
                expected: obligation.amount_expected,
                paid: obligation.amount_paid,
                status,
            });
        }
    }

    fn tally_installment(
        installments: &mut InstallmentStats,
        obligation: &Obligation,
        status: ObligationStatus,
    ) {
        installments.total += 1;
        installments.expected += obligation.amount_expected;
        installments.paid += obligation.amount_paid;
        installments.total_interest += obligation.interest;

        match status {
            ObligationStatus::Completed => installments.completed += 1,
            ObligationStatus::Partial => installments.partial += 1,
            ObligationStatus::Overdue => installments.overdue += 1,
            ObligationStatus::Pending => {
                installments.pending += 1;
                let due = obligation.due_date;
                installments.next_due_date = match installments.next_due_date {
                    Some(current) if current <= due => Some(current),
                    _ => Some(due),
                };
            }
        }
    }
}
