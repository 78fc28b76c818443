//! Payment obligations and status derivation.

pub mod status;
pub mod types;

pub use status::{derive_status, status_consistent};
pub use types::{Obligation, ObligationKind, ObligationStatus};
