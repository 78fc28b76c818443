//! `SeaORM` Entity for the obligations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ObligationKind, ObligationStatus};

/// A single expected payment belonging to a sale account.
///
/// `account_id` references the CRM's sales table, which this engine
/// does not own; there is deliberately no foreign key to it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "obligations")]
pub struct Model {
    /// Obligation ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning sale account.
    pub account_id: Uuid,
    /// Kind of obligation.
    pub kind: ObligationKind,
    /// Position in the installment plan; null unless kind is installment.
    pub installment_number: Option<i32>,
    /// Amount expected, fixed at creation.
    pub amount_expected: Decimal,
    /// Sum of recorded payments. Maintained by the repositories only.
    pub amount_paid: Decimal,
    /// Due date.
    pub due_date: Date,
    /// Cached collection status.
    pub status: ObligationStatus,
    /// Sticky marker: payment history was administratively cleared.
    pub was_reset: bool,
    /// Accrued interest carried from upstream; zero for lump sums.
    pub interest: Decimal,
    /// Row creation time.
    pub created_at: DateTimeWithTimeZone,
    /// Last mutation time.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for predio_core::schedule::Obligation {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            kind: model.kind.into(),
            installment_number: model.installment_number,
            amount_expected: model.amount_expected,
            amount_paid: model.amount_paid,
            due_date: model.due_date,
            status: model.status.into(),
            was_reset: model.was_reset,
            interest: model.interest,
        }
    }
}
