//! `SeaORM` Entity for the payments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::PaymentMethod;

/// One recorded transfer of money applied against an obligation.
///
/// Append-mostly: rows are only ever deleted in bulk by the reset
/// operation on the parent obligation. The verification columns are
/// all-or-none, enforced by a table CHECK constraint.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Payment ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The obligation this payment applies to.
    pub obligation_id: Uuid,
    /// Amount paid.
    pub amount: Decimal,
    /// Date the money changed hands.
    pub payment_date: Date,
    /// Payment method.
    pub method: PaymentMethod,
    /// Receipt or folio reference, if captured.
    pub receipt_ref: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Staff member who recorded the payment.
    pub recorded_by: Uuid,
    /// Finance verification flag. One-way: false to true only.
    pub verified: bool,
    /// Finance actor who verified; set once with the flag.
    pub verified_by: Option<Uuid>,
    /// When the payment was verified; set once with the flag.
    pub verified_at: Option<DateTimeWithTimeZone>,
    /// Verifier display name at verification time; set once with the flag.
    pub verifier_display_name: Option<String>,
    /// Row creation time.
    pub created_at: DateTimeWithTimeZone,
    /// Last mutation time.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::obligations::Entity",
        from = "Column::ObligationId",
        to = "super::obligations::Column::Id"
    )]
    Obligations,
}

impl Related<super::obligations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Obligations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
