//! Traits for the external identity and account systems.
//!
//! The collections engine never reads the CRM's users or sales tables
//! directly. Role resolution and the total sale amount come through
//! these traits, implemented by the surrounding application.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Staff roles relevant to the collections engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    /// Sales agent; read-only access to collections data.
    Agent,
    /// Collection staff; records payments.
    Collections,
    /// Finance back-office; the only role that verifies payments.
    Finance,
    /// Branch manager.
    Manager,
}

impl StaffRole {
    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Collections => "collections",
            Self::Finance => "finance",
            Self::Manager => "manager",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "agent" => Some(Self::Agent),
            "collections" => Some(Self::Collections),
            "finance" => Some(Self::Finance),
            "manager" => Some(Self::Manager),
            _ => None,
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A staff member as resolved by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorProfile {
    /// The actor's ID in the identity system.
    pub id: Uuid,
    /// The actor's role.
    pub role: StaffRole,
    /// Display name used for audit fields.
    pub display_name: String,
}

impl ActorProfile {
    /// Returns true if this actor holds the finance role.
    #[must_use]
    pub fn is_finance(&self) -> bool {
        self.role == StaffRole::Finance
    }
}

/// Errors from the external identity/account lookups.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Actor does not exist in the identity system.
    #[error("Actor not found: {0}")]
    ActorNotFound(Uuid),

    /// Sale account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// The provider itself failed.
    #[error("Directory provider error: {0}")]
    Provider(String),
}

/// Resolves actor IDs to profiles (role and display name).
#[async_trait]
pub trait RoleProvider: Send + Sync {
    /// Resolves an actor ID to a profile.
    async fn actor_profile(&self, actor_id: Uuid) -> Result<ActorProfile, DirectoryError>;
}

/// Read-only view of the sale account that owns a set of obligations.
#[async_trait]
pub trait AccountReader: Send + Sync {
    /// Returns the total sale amount for the account.
    async fn total_sale_amount(&self, account_id: Uuid) -> Result<Decimal, DirectoryError>;
}
