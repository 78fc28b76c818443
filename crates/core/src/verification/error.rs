//! Verification error types.

use thiserror::Error;

use crate::directory::StaffRole;

/// Verification workflow errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Actor lacks the finance role.
    #[error("Role {0} cannot verify payments")]
    Forbidden(StaffRole),

    /// Payment is already verified; verifier metadata never changes
    /// after first set.
    #[error("Payment is already verified")]
    AlreadyVerified,

    /// Request to clear the verified flag. Verification is one-way;
    /// this is rejected explicitly, never treated as a no-op.
    #[error("Payment verification cannot be undone")]
    IrreversibleAction,
}
