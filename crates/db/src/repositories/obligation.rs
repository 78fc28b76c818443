//! Obligation repository for payment obligation database operations.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use predio_core::schedule::derive_status;
use predio_shared::types::money;

use crate::entities::{obligations, payments};

/// Error types for obligation operations.
#[derive(Debug, thiserror::Error)]
pub enum ObligationError {
    /// Obligation not found.
    #[error("Obligation not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result of a sum-consistency audit on one obligation.
#[derive(Debug, Clone)]
pub struct ObligationAudit {
    /// The audited obligation.
    pub obligation_id: Uuid,
    /// The cached `amount_paid` column.
    pub stored_amount_paid: Decimal,
    /// The true sum of the obligation's payment rows.
    pub payment_total: Decimal,
    /// Number of payment rows.
    pub payment_count: u64,
}

impl ObligationAudit {
    /// Returns true if the cached amount matches the payment sum at
    /// cent precision.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        money::eq_cents(self.stored_amount_paid, self.payment_total)
    }
}

/// Obligation repository for reads and derived-state maintenance.
#[derive(Debug, Clone)]
pub struct ObligationRepository {
    db: DatabaseConnection,
}

impl ObligationRepository {
    /// Creates a new obligation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists an account's obligations ordered by due date ascending.
    ///
    /// Read-only; no side effects.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_obligations(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<obligations::Model>, ObligationError> {
        let today = Utc::now().date_naive();
        let rows = obligations::Entity::find()
            .filter(obligations::Column::AccountId.eq(account_id))
            .order_by_asc(obligations::Column::DueDate)
            .order_by_asc(obligations::Column::CreatedAt)
            .all(&self.db)
            .await?;

        for row in &rows {
            warn_if_stale(row, today);
        }

        Ok(rows)
    }

    /// Gets a single obligation by ID.
    ///
    /// # Errors
    ///
    /// Returns `ObligationError::NotFound` if it does not exist.
    pub async fn get_obligation(&self, id: Uuid) -> Result<obligations::Model, ObligationError> {
        let row = obligations::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ObligationError::NotFound(id))?;

        warn_if_stale(&row, Utc::now().date_naive());
        Ok(row)
    }

    /// Recomputes the payment sum for an obligation and reports any
    /// drift against the cached `amount_paid` column.
    ///
    /// # Errors
    ///
    /// Returns `ObligationError::NotFound` if the obligation does not
    /// exist, or a database error.
    pub async fn audit_obligation(&self, id: Uuid) -> Result<ObligationAudit, ObligationError> {
        let obligation = obligations::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ObligationError::NotFound(id))?;

        let rows = payments::Entity::find()
            .filter(payments::Column::ObligationId.eq(id))
            .all(&self.db)
            .await?;

        let payment_total: Decimal = rows.iter().map(|p| p.amount).sum();
        let audit = ObligationAudit {
            obligation_id: id,
            stored_amount_paid: obligation.amount_paid,
            payment_total,
            payment_count: rows.len() as u64,
        };

        if !audit.is_consistent() {
            tracing::warn!(
                obligation_id = %id,
                stored = %audit.stored_amount_paid,
                actual = %audit.payment_total,
                "obligation amount_paid drifted from payment sum"
            );
        }

        Ok(audit)
    }

    /// Fetches an obligation inside `txn` with a row lock
    /// (`SELECT ... FOR UPDATE`), serializing concurrent writers.
    pub(crate) async fn lock_obligation(
        txn: &DatabaseTransaction,
        id: Uuid,
    ) -> Result<obligations::Model, ObligationError> {
        obligations::Entity::find_by_id(id)
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or(ObligationError::NotFound(id))
    }

    /// Applies a paid-amount delta and recomputes the cached status.
    ///
    /// This is the single place derived state is written. Every
    /// mutation path (payment insert and reset) goes through it inside
    /// the same transaction as the triggering payment write, so a
    /// payment can never exist without its balance being reflected.
    pub(crate) async fn apply_payment_delta(
        txn: &DatabaseTransaction,
        obligation: obligations::Model,
        delta: Decimal,
        today: NaiveDate,
    ) -> Result<obligations::Model, ObligationError> {
        let new_paid = obligation.amount_paid + delta;
        let new_status = derive_status(new_paid, obligation.amount_expected, obligation.due_date, today);

        let mut active: obligations::ActiveModel = obligation.into();
        active.amount_paid = Set(new_paid);
        active.status = Set(new_status.into());
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(txn).await?;
        Ok(updated)
    }

    /// Clears the obligation's entire payment history and returns it
    /// to an unpaid state, leaving the sticky `was_reset` marker.
    ///
    /// The status is re-derived rather than pinned to pending, so an
    /// obligation reset after its due date reads overdue, consistent
    /// with every other derivation site.
    pub(crate) async fn reset_obligation(
        txn: &DatabaseTransaction,
        obligation: obligations::Model,
        today: NaiveDate,
    ) -> Result<(obligations::Model, u64), ObligationError> {
        let deleted = payments::Entity::delete_many()
            .filter(payments::Column::ObligationId.eq(obligation.id))
            .exec(txn)
            .await?;

        let new_status = derive_status(
            Decimal::ZERO,
            obligation.amount_expected,
            obligation.due_date,
            today,
        );

        let mut active: obligations::ActiveModel = obligation.into();
        active.amount_paid = Set(Decimal::ZERO);
        active.status = Set(new_status.into());
        active.was_reset = Set(true);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(txn).await?;
        Ok((updated, deleted.rows_affected))
    }

    /// Counts the payment rows for an obligation inside `txn`.
    pub(crate) async fn count_payments(
        txn: &DatabaseTransaction,
        obligation_id: Uuid,
    ) -> Result<u64, ObligationError> {
        let count = payments::Entity::find()
            .filter(payments::Column::ObligationId.eq(obligation_id))
            .count(txn)
            .await?;
        Ok(count)
    }
}

/// Logs a warning when a cached status disagrees with a fresh
/// derivation. Reads stay non-mutating; repair happens on the next
/// write through `apply_payment_delta`.
fn warn_if_stale(row: &obligations::Model, today: NaiveDate) {
    let fresh = derive_status(row.amount_paid, row.amount_expected, row.due_date, today);
    let cached: predio_core::schedule::ObligationStatus = row.status.clone().into();
    if cached != fresh {
        tracing::warn!(
            obligation_id = %row.id,
            cached = %cached,
            derived = %fresh,
            "cached obligation status is stale"
        );
    }
}
