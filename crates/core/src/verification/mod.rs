//! One-way payment verification workflow.
//!
//! A finance-role actor confirms that a payment's supporting evidence
//! has been checked. The transition is irreversible: there is no
//! unverify operation, and requests to clear the flag are rejected
//! rather than ignored.

pub mod error;
pub mod service;
pub mod types;

pub use error::VerificationError;
pub use service::VerificationService;
pub use types::VerificationStamp;
