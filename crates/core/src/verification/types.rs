//! Verification domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audit data written when a payment transitions to verified.
///
/// All three fields are set together, exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationStamp {
    /// The finance actor who verified the payment.
    pub verified_by: Uuid,
    /// When the payment was verified.
    pub verified_at: DateTime<Utc>,
    /// The verifier's display name, resolved at verification time so
    /// the audit trail survives later renames in the identity system.
    pub verifier_display_name: String,
}
