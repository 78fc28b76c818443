//! Initial schema for the payment ledger.
//!
//! Creates the obligations and payments tables. The sale accounts and
//! users tables belong to the surrounding CRM and are not created
//! here; obligations reference accounts by bare UUID.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(LEDGER_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS payments CASCADE;
             DROP TABLE IF EXISTS obligations CASCADE;
             DROP TYPE IF EXISTS payment_method;
             DROP TYPE IF EXISTS obligation_status;
             DROP TYPE IF EXISTS obligation_kind;",
        )
        .await?;
        Ok(())
    }
}

const LEDGER_SQL: &str = r"
CREATE TYPE obligation_kind AS ENUM ('down_payment', 'initial_payment', 'installment');
CREATE TYPE obligation_status AS ENUM ('pending', 'partial', 'completed', 'overdue');
CREATE TYPE payment_method AS ENUM ('cash', 'bank_transfer', 'card', 'check', 'adjustment');

-- Payment obligations owned by a sale account
CREATE TABLE obligations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    account_id UUID NOT NULL,
    kind obligation_kind NOT NULL,
    installment_number INTEGER,
    amount_expected NUMERIC(14,2) NOT NULL,
    amount_paid NUMERIC(14,2) NOT NULL DEFAULT 0,
    due_date DATE NOT NULL,
    status obligation_status NOT NULL DEFAULT 'pending',
    was_reset BOOLEAN NOT NULL DEFAULT FALSE,
    interest NUMERIC(14,2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_amount_expected_positive CHECK (amount_expected > 0),
    CONSTRAINT chk_amount_paid_non_negative CHECK (amount_paid >= 0),
    -- amount_paid can never overdraft the expected amount
    CONSTRAINT chk_no_overdraft CHECK (amount_paid <= amount_expected),
    -- installment_number present exactly when the kind is installment
    CONSTRAINT chk_installment_number CHECK (
        (kind = 'installment') = (installment_number IS NOT NULL)
    )
);

-- Obligation list for an account, ordered by due date
CREATE INDEX idx_obligations_account ON obligations(account_id, due_date);

-- Open obligations (collection worklist)
CREATE INDEX idx_obligations_open ON obligations(account_id, due_date)
    WHERE status <> 'completed';

-- Recorded payments against obligations
CREATE TABLE payments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    obligation_id UUID NOT NULL REFERENCES obligations(id) ON DELETE CASCADE,
    amount NUMERIC(14,2) NOT NULL,
    payment_date DATE NOT NULL,
    method payment_method NOT NULL,
    receipt_ref VARCHAR(100),
    notes TEXT,
    recorded_by UUID NOT NULL,
    verified BOOLEAN NOT NULL DEFAULT FALSE,
    verified_by UUID,
    verified_at TIMESTAMPTZ,
    verifier_display_name VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_payment_amount_positive CHECK (amount > 0),
    -- verification metadata is all-or-none with the flag
    CONSTRAINT chk_verification_all_or_none CHECK (
        (verified
            AND verified_by IS NOT NULL
            AND verified_at IS NOT NULL
            AND verifier_display_name IS NOT NULL)
        OR (NOT verified
            AND verified_by IS NULL
            AND verified_at IS NULL
            AND verifier_display_name IS NULL)
    )
);

-- Payment history for an obligation
CREATE INDEX idx_payments_obligation ON payments(obligation_id, payment_date, created_at);

-- Finance back-office verification queue
CREATE INDEX idx_payments_unverified ON payments(obligation_id) WHERE NOT verified;
";
