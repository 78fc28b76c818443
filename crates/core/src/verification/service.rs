//! Verification workflow service.
//!
//! State machine with a single legal transition: unverified →
//! verified, by a finance-role actor. The repository layer re-checks
//! the flag with a conditional update so two concurrent verifications
//! cannot both stamp the payment.

use chrono::Utc;

use crate::directory::ActorProfile;
use crate::verification::error::VerificationError;
use crate::verification::types::VerificationStamp;

/// Stateless service for payment verification transitions.
pub struct VerificationService;

impl VerificationService {
    /// Verify a payment.
    ///
    /// # Arguments
    /// * `currently_verified` - The payment's current verified flag
    /// * `actor` - The resolved profile of the requesting actor
    ///
    /// # Returns
    /// * `Ok(VerificationStamp)` with the audit data to persist
    /// * `Err(VerificationError::Forbidden)` if the actor is not finance
    /// * `Err(VerificationError::AlreadyVerified)` if already verified
    pub fn verify(
        currently_verified: bool,
        actor: &ActorProfile,
    ) -> Result<VerificationStamp, VerificationError> {
        if !actor.is_finance() {
            return Err(VerificationError::Forbidden(actor.role));
        }
        if currently_verified {
            return Err(VerificationError::AlreadyVerified);
        }
        Ok(VerificationStamp {
            verified_by: actor.id,
            verified_at: Utc::now(),
            verifier_display_name: actor.display_name.clone(),
        })
    }

    /// Handle a request to clear the verified flag.
    ///
    /// Always rejected: verification preserves audit integrity and has
    /// no inverse. The error distinguishes "already verified, cannot
    /// undo" from a request that never made sense to begin with only
    /// in the message the caller renders; both are refused.
    ///
    /// # Errors
    ///
    /// Always returns `VerificationError::IrreversibleAction`.
    pub fn unverify(_currently_verified: bool) -> Result<(), VerificationError> {
        Err(VerificationError::IrreversibleAction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaffRole;
    use uuid::Uuid;

    fn actor(role: StaffRole) -> ActorProfile {
        ActorProfile {
            id: Uuid::new_v4(),
            role,
            display_name: "Ana Torres".to_string(),
        }
    }

    #[test]
    fn test_finance_actor_verifies() {
        let finance = actor(StaffRole::Finance);
        let stamp = VerificationService::verify(false, &finance).unwrap();
        assert_eq!(stamp.verified_by, finance.id);
        assert_eq!(stamp.verifier_display_name, "Ana Torres");
    }

    #[test]
    fn test_non_finance_actor_forbidden() {
        for role in [StaffRole::Agent, StaffRole::Collections, StaffRole::Manager] {
            let result = VerificationService::verify(false, &actor(role));
            assert_eq!(result, Err(VerificationError::Forbidden(role)));
        }
    }

    #[test]
    fn test_already_verified_rejected() {
        let result = VerificationService::verify(true, &actor(StaffRole::Finance));
        assert_eq!(result, Err(VerificationError::AlreadyVerified));
    }

    #[test]
    fn test_role_check_runs_before_state_check() {
        // A non-finance actor on a verified payment gets Forbidden,
        // not AlreadyVerified, so no state is leaked to them.
        let result = VerificationService::verify(true, &actor(StaffRole::Agent));
        assert_eq!(result, Err(VerificationError::Forbidden(StaffRole::Agent)));
    }

    #[test]
    fn test_unverify_always_rejected() {
        assert_eq!(
            VerificationService::unverify(true),
            Err(VerificationError::IrreversibleAction)
        );
        assert_eq!(
            VerificationService::unverify(false),
            Err(VerificationError::IrreversibleAction)
        );
    }
}
