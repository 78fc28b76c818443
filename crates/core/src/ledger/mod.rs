//! Payment recording rules.
//!
//! Pure checks for the payment ledger: amount validation, the
//! non-overdraft invariant, and the lump-sum shortcut precondition.
//! The db crate runs these inside the same transaction that inserts
//! the payment row.

pub mod error;
pub mod service;
pub mod types;

pub use error::LedgerError;
pub use service::{LedgerService, FULL_PAYMENT_NOTE};
pub use types::PaymentMethod;
