//! Payment repository for ledger database operations.
//!
//! Implements the mutating operation set of the payment ledger:
//! recording payments, the lump-sum mark/unmark pair, and the one-way
//! verification workflow. Each operation is a single read-check-write
//! transaction holding a row lock on the obligation (or payment), so
//! two concurrent writers cannot both pass the same check against
//! stale state.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use predio_core::directory::{DirectoryError, RoleProvider};
use predio_core::ledger::{LedgerError, LedgerService, PaymentMethod, FULL_PAYMENT_NOTE};
use predio_core::verification::{VerificationError, VerificationService};
use predio_shared::config::CollectionsConfig;
use predio_shared::types::money;

use crate::entities::payments;
use crate::repositories::obligation::{ObligationError, ObligationRepository};

/// Error types for payment operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Obligation not found.
    #[error("Obligation not found: {0}")]
    ObligationNotFound(Uuid),

    /// Payment not found.
    #[error("Payment not found: {0}")]
    PaymentNotFound(Uuid),

    /// A payment recording rule was violated.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A verification rule was violated.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// The identity provider failed or the actor is unknown.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Write retries exhausted after repeated serialization or
    /// deadlock failures. Transient; the whole operation is safe to
    /// retry.
    #[error("Concurrent modification detected for obligation {0}, please retry")]
    ConcurrencyConflict(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ObligationError> for PaymentError {
    fn from(err: ObligationError) -> Self {
        match err {
            ObligationError::NotFound(id) => Self::ObligationNotFound(id),
            ObligationError::Database(e) => Self::Database(e),
        }
    }
}

/// Input for recording a payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentInput {
    /// The obligation being paid.
    pub obligation_id: Uuid,
    /// Amount paid; must be positive and within the remaining balance.
    pub amount: Decimal,
    /// Date the money changed hands.
    pub payment_date: NaiveDate,
    /// Payment method.
    pub method: PaymentMethod,
    /// Receipt or folio reference.
    pub receipt_ref: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Staff member recording the payment.
    pub recorded_by: Uuid,
}

/// Payment repository for ledger mutations.
#[derive(Clone)]
pub struct PaymentRepository {
    db: DatabaseConnection,
    roles: Arc<dyn RoleProvider>,
    write_retries: u32,
}

impl PaymentRepository {
    /// Creates a new payment repository with default retry settings.
    #[must_use]
    pub fn new(db: DatabaseConnection, roles: Arc<dyn RoleProvider>) -> Self {
        Self::with_config(db, roles, &CollectionsConfig::default())
    }

    /// Creates a new payment repository with explicit settings.
    #[must_use]
    pub fn with_config(
        db: DatabaseConnection,
        roles: Arc<dyn RoleProvider>,
        config: &CollectionsConfig,
    ) -> Self {
        Self {
            db,
            roles,
            write_retries: config.write_retries,
        }
    }

    /// Records a payment against an obligation.
    ///
    /// The payment insert and the obligation's paid-amount/status
    /// update commit atomically. The overpayment check runs under a
    /// row lock on the obligation, so concurrent payments against the
    /// same obligation cannot jointly overdraft it.
    ///
    /// Serialization and deadlock failures are retried up to the
    /// configured limit, then surfaced as `ConcurrencyConflict`.
    ///
    /// # Errors
    ///
    /// Returns an error if the obligation does not exist, the amount
    /// is invalid, the payment would exceed the remaining balance, or
    /// the database operation fails.
    pub async fn record_payment(
        &self,
        input: RecordPaymentInput,
    ) -> Result<payments::Model, PaymentError> {
        // Normalize to whole cents before any check or write. The
        // amount columns are NUMERIC(14,2); carrying sub-cent digits
        // past this point would let the stored running total drift
        // from the payment rows.
        let mut input = input;
        input.amount = money::round_to_cents(input.amount);

        // Cheap structural check before touching the database.
        LedgerService::validate_amount(input.amount)?;

        let mut attempt: u32 = 0;
        loop {
            match self.try_record_payment(&input).await {
                Err(PaymentError::Database(err)) if is_retryable(&err) => {
                    attempt += 1;
                    if attempt > self.write_retries {
                        tracing::warn!(
                            obligation_id = %input.obligation_id,
                            attempts = attempt,
                            "payment write retries exhausted"
                        );
                        return Err(PaymentError::ConcurrencyConflict(input.obligation_id));
                    }
                    tracing::debug!(
                        obligation_id = %input.obligation_id,
                        attempt,
                        "retrying payment write after transient conflict"
                    );
                }
                other => return other,
            }
        }
    }

    async fn try_record_payment(
        &self,
        input: &RecordPaymentInput,
    ) -> Result<payments::Model, PaymentError> {
        let today = Utc::now().date_naive();
        let txn = self.db.begin().await?;

        let obligation = ObligationRepository::lock_obligation(&txn, input.obligation_id).await?;

        LedgerService::validate_payment(
            obligation.amount_expected,
            obligation.amount_paid,
            input.amount,
        )?;

        let payment = Self::insert_payment(&txn, input).await?;
        ObligationRepository::apply_payment_delta(&txn, obligation, input.amount, today).await?;

        txn.commit().await?;

        tracing::debug!(
            payment_id = %payment.id,
            obligation_id = %input.obligation_id,
            amount = %input.amount,
            "payment recorded"
        );

        Ok(payment)
    }

    async fn insert_payment(
        txn: &DatabaseTransaction,
        input: &RecordPaymentInput,
    ) -> Result<payments::Model, PaymentError> {
        let now = Utc::now().into();
        let payment = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            obligation_id: Set(input.obligation_id),
            amount: Set(input.amount),
            payment_date: Set(input.payment_date),
            method: Set(input.method.into()),
            receipt_ref: Set(input.receipt_ref.clone()),
            notes: Set(input.notes.clone()),
            recorded_by: Set(input.recorded_by),
            verified: Set(false),
            verified_by: Set(None),
            verified_at: Set(None),
            verifier_display_name: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = payment.insert(txn).await?;
        Ok(inserted)
    }

    /// Marks an obligation as paid in full with a single synthetic
    /// payment.
    ///
    /// Used for obligations expected to be settled as one lump sum
    /// (e.g. the down payment captured outside the collections desk).
    /// The zero-payment precondition is checked under the obligation
    /// row lock.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AlreadyHasPayments` (wrapped) if any
    /// payment has already been recorded.
    pub async fn mark_fully_paid(
        &self,
        obligation_id: Uuid,
        actor_id: Uuid,
    ) -> Result<payments::Model, PaymentError> {
        let today = Utc::now().date_naive();
        let txn = self.db.begin().await?;

        let obligation = ObligationRepository::lock_obligation(&txn, obligation_id).await?;

        let existing = ObligationRepository::count_payments(&txn, obligation_id).await?;
        LedgerService::check_can_mark_fully_paid(obligation_id, existing)?;

        let input = RecordPaymentInput {
            obligation_id,
            amount: obligation.amount_expected,
            payment_date: today,
            method: PaymentMethod::Adjustment,
            receipt_ref: None,
            notes: Some(FULL_PAYMENT_NOTE.to_string()),
            recorded_by: actor_id,
        };

        LedgerService::validate_payment(
            obligation.amount_expected,
            obligation.amount_paid,
            input.amount,
        )?;

        let payment = Self::insert_payment(&txn, &input).await?;
        ObligationRepository::apply_payment_delta(&txn, obligation, input.amount, today).await?;

        txn.commit().await?;

        tracing::debug!(
            obligation_id = %obligation_id,
            actor_id = %actor_id,
            "obligation marked fully paid"
        );

        Ok(payment)
    }

    /// Reverses a full-payment mark by clearing the obligation's
    /// ENTIRE payment history.
    ///
    /// Destructive and audited: this is not the inverse of a single
    /// payment. Any manual partial payments recorded after the mark
    /// are cleared too, and the obligation keeps a permanent
    /// `was_reset` marker. Callers must warn the user accordingly.
    ///
    /// # Errors
    ///
    /// Returns `ObligationNotFound` or a database error.
    pub async fn unmark_fully_paid(
        &self,
        obligation_id: Uuid,
        actor_id: Uuid,
    ) -> Result<crate::entities::obligations::Model, PaymentError> {
        let today = Utc::now().date_naive();
        let txn = self.db.begin().await?;

        let obligation = ObligationRepository::lock_obligation(&txn, obligation_id).await?;
        let (updated, deleted) =
            ObligationRepository::reset_obligation(&txn, obligation, today).await?;

        txn.commit().await?;

        tracing::info!(
            obligation_id = %obligation_id,
            actor_id = %actor_id,
            payments_cleared = deleted,
            "obligation payment history reset"
        );

        Ok(updated)
    }

    /// Verifies a payment. Finance role only; one-way.
    ///
    /// The verified flag is re-checked by a conditional update
    /// (`WHERE verified = false`), so two concurrent verifications
    /// cannot both stamp the payment: the loser sees zero rows
    /// affected and fails with `AlreadyVerified`.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for non-finance actors, `AlreadyVerified`
    /// for repeated verification, `PaymentNotFound`, or a database
    /// error.
    pub async fn verify_payment(
        &self,
        payment_id: Uuid,
        actor_id: Uuid,
    ) -> Result<payments::Model, PaymentError> {
        let profile = self.roles.actor_profile(actor_id).await?;

        let txn = self.db.begin().await?;

        let payment = payments::Entity::find_by_id(payment_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(PaymentError::PaymentNotFound(payment_id))?;

        let stamp = VerificationService::verify(payment.verified, &profile)?;

        let update = payments::Entity::update_many()
            .col_expr(payments::Column::Verified, Expr::value(true))
            .col_expr(payments::Column::VerifiedBy, Expr::value(stamp.verified_by))
            .col_expr(payments::Column::VerifiedAt, Expr::value(stamp.verified_at))
            .col_expr(
                payments::Column::VerifierDisplayName,
                Expr::value(stamp.verifier_display_name.clone()),
            )
            .col_expr(payments::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(payments::Column::Id.eq(payment_id))
            .filter(payments::Column::Verified.eq(false))
            .exec(&txn)
            .await?;

        if update.rows_affected == 0 {
            // A concurrent verifier won between our read and write.
            return Err(VerificationError::AlreadyVerified.into());
        }

        let verified = payments::Entity::find_by_id(payment_id)
            .one(&txn)
            .await?
            .ok_or(PaymentError::PaymentNotFound(payment_id))?;

        txn.commit().await?;

        tracing::debug!(
            payment_id = %payment_id,
            verified_by = %stamp.verified_by,
            "payment verified"
        );

        Ok(verified)
    }

    /// Lists an obligation's payments ordered by payment date, then
    /// insertion time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_payments(
        &self,
        obligation_id: Uuid,
    ) -> Result<Vec<payments::Model>, PaymentError> {
        let rows = payments::Entity::find()
            .filter(payments::Column::ObligationId.eq(obligation_id))
            .order_by_asc(payments::Column::PaymentDate)
            .order_by_asc(payments::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Gets a single payment by ID.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::PaymentNotFound` if it does not exist.
    pub async fn get_payment(&self, payment_id: Uuid) -> Result<payments::Model, PaymentError> {
        payments::Entity::find_by_id(payment_id)
            .one(&self.db)
            .await?
            .ok_or(PaymentError::PaymentNotFound(payment_id))
    }
}

/// Returns true for database failures worth retrying: Postgres
/// serialization failures (40001) and deadlocks (40P01).
fn is_retryable(err: &DbErr) -> bool {
    let msg = err.to_string();
    msg.contains("40001")
        || msg.contains("40P01")
        || msg.contains("could not serialize access")
        || msg.contains("deadlock detected")
}
