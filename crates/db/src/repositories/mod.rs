//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. All mutating operations run inside a transaction that
//! locks the obligation row for the duration of the check-and-update.

pub mod obligation;
pub mod payment;
pub mod stats;

pub use obligation::{ObligationAudit, ObligationError, ObligationRepository};
pub use payment::{PaymentError, PaymentRepository, RecordPaymentInput};
pub use stats::{StatsError, StatsRepository};
