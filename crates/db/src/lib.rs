//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for obligations and payments
//! - Repository abstractions for the payment ledger
//! - Database migrations
//!
//! Every mutating operation runs its read-check-write sequence inside
//! a single database transaction holding a row lock on the obligation,
//! closing the lost-update race between concurrent payment writers.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{ObligationRepository, PaymentRepository, StatsRepository};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
