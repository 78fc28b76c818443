//! Statistics repository for per-account collection rollups.

use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use predio_core::directory::{AccountReader, DirectoryError};
use predio_core::schedule::Obligation;
use predio_core::stats::{AccountStats, StatsService};

use crate::entities::obligations;

/// Error types for statistics operations.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// The account reader failed or the account is unknown.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Statistics repository. Read-only; runs without locks and tolerates
/// slightly stale data.
#[derive(Clone)]
pub struct StatsRepository {
    db: DatabaseConnection,
    accounts: Arc<dyn AccountReader>,
}

impl StatsRepository {
    /// Creates a new statistics repository.
    #[must_use]
    pub fn new(db: DatabaseConnection, accounts: Arc<dyn AccountReader>) -> Self {
        Self { db, accounts }
    }

    /// Builds the collection statistics rollup for one account.
    ///
    /// An account with no obligations yields all-zero stats (the
    /// schedule has not been populated yet), not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist or the database
    /// query fails.
    pub async fn get_stats(
        &self,
        account_id: Uuid,
        today: NaiveDate,
    ) -> Result<AccountStats, StatsError> {
        let total_sale_amount = self.accounts.total_sale_amount(account_id).await?;

        let rows = obligations::Entity::find()
            .filter(obligations::Column::AccountId.eq(account_id))
            .order_by_asc(obligations::Column::DueDate)
            .all(&self.db)
            .await?;

        let obligations: Vec<Obligation> = rows.into_iter().map(Into::into).collect();

        Ok(StatsService::build(
            account_id,
            total_sale_amount,
            &obligations,
            today,
        ))
    }
}
