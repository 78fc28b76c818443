//! Database enum mappings.
//!
//! Mirrors of the core domain enums as Postgres enum types, with
//! conversions in both directions so repositories can hand domain
//! values straight to the entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use predio_core::ledger::PaymentMethod as DomainPaymentMethod;
use predio_core::schedule::{
    ObligationKind as DomainObligationKind, ObligationStatus as DomainObligationStatus,
};

/// Kind of payment obligation.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "obligation_kind")]
pub enum ObligationKind {
    /// Down payment on the property.
    #[sea_orm(string_value = "down_payment")]
    DownPayment,
    /// Initial payment.
    #[sea_orm(string_value = "initial_payment")]
    InitialPayment,
    /// Monthly installment.
    #[sea_orm(string_value = "installment")]
    Installment,
}

/// Collection status of an obligation.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "obligation_status")]
pub enum ObligationStatus {
    /// Nothing paid, not yet due.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Partially paid.
    #[sea_orm(string_value = "partial")]
    Partial,
    /// Paid in full.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Nothing paid, past due.
    #[sea_orm(string_value = "overdue")]
    Overdue,
}

/// How a payment was made.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
pub enum PaymentMethod {
    /// Cash.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Bank transfer.
    #[sea_orm(string_value = "bank_transfer")]
    BankTransfer,
    /// Card payment.
    #[sea_orm(string_value = "card")]
    Card,
    /// Cheque.
    #[sea_orm(string_value = "check")]
    Check,
    /// Synthetic entry written by the engine (lump-sum shortcut).
    #[sea_orm(string_value = "adjustment")]
    Adjustment,
}

impl From<DomainObligationKind> for ObligationKind {
    fn from(kind: DomainObligationKind) -> Self {
        match kind {
            DomainObligationKind::DownPayment => Self::DownPayment,
            DomainObligationKind::InitialPayment => Self::InitialPayment,
            DomainObligationKind::Installment => Self::Installment,
        }
    }
}

impl From<ObligationKind> for DomainObligationKind {
    fn from(kind: ObligationKind) -> Self {
        match kind {
            ObligationKind::DownPayment => Self::DownPayment,
            ObligationKind::InitialPayment => Self::InitialPayment,
            ObligationKind::Installment => Self::Installment,
        }
    }
}

impl From<DomainObligationStatus> for ObligationStatus {
    fn from(status: DomainObligationStatus) -> Self {
        match status {
            DomainObligationStatus::Pending => Self::Pending,
            DomainObligationStatus::Partial => Self::Partial,
            DomainObligationStatus::Completed => Self::Completed,
            DomainObligationStatus::Overdue => Self::Overdue,
        }
    }
}

impl From<ObligationStatus> for DomainObligationStatus {
    fn from(status: ObligationStatus) -> Self {
        match status {
            ObligationStatus::Pending => Self::Pending,
            ObligationStatus::Partial => Self::Partial,
            ObligationStatus::Completed => Self::Completed,
            ObligationStatus::Overdue => Self::Overdue,
        }
    }
}

impl From<DomainPaymentMethod> for PaymentMethod {
    fn from(method: DomainPaymentMethod) -> Self {
        match method {
            DomainPaymentMethod::Cash => Self::Cash,
            DomainPaymentMethod::BankTransfer => Self::BankTransfer,
            DomainPaymentMethod::Card => Self::Card,
            DomainPaymentMethod::Check => Self::Check,
            DomainPaymentMethod::Adjustment => Self::Adjustment,
        }
    }
}

impl From<PaymentMethod> for DomainPaymentMethod {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Cash => Self::Cash,
            PaymentMethod::BankTransfer => Self::BankTransfer,
            PaymentMethod::Card => Self::Card,
            PaymentMethod::Check => Self::Check,
            PaymentMethod::Adjustment => Self::Adjustment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn test_kind_conversion_round_trip() {
        for kind in [
            DomainObligationKind::DownPayment,
            DomainObligationKind::InitialPayment,
            DomainObligationKind::Installment,
        ] {
            let db: ObligationKind = kind.into();
            let back: DomainObligationKind = db.into();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_status_conversion_round_trip() {
        for status in [
            DomainObligationStatus::Pending,
            DomainObligationStatus::Partial,
            DomainObligationStatus::Completed,
            DomainObligationStatus::Overdue,
        ] {
            let db: ObligationStatus = status.into();
            let back: DomainObligationStatus = db.into();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_db_values_match_domain_strings() {
        // The migration's enum literals and the domain `as_str` values
        // must stay in sync.
        assert_eq!(
            ObligationKind::DownPayment.to_value(),
            DomainObligationKind::DownPayment.as_str()
        );
        assert_eq!(
            ObligationStatus::Overdue.to_value(),
            DomainObligationStatus::Overdue.as_str()
        );
        assert_eq!(
            PaymentMethod::BankTransfer.to_value(),
            DomainPaymentMethod::BankTransfer.as_str()
        );
    }
}
