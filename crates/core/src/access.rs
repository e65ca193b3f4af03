//! Role-based access policy.
//!
//! A pure `(role, operation) -> allow/deny` mapping. `None` stands for an
//! unauthenticated caller. Reads and ticket creation are open to every
//! authenticated role; every other mutation needs `admin`.

use std::fmt;

use crate::error::CoreError;
use crate::roles::Role;

/// Every operation the API exposes, grouped by resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    HealthCheck,
    Login,

    ReadAsset,
    CreateAsset,
    UpdateAsset,
    DeleteAsset,
    /// Status overwrite and quantity adjustments.
    ChangeAssetState,

    ReadLocation,
    CreateLocation,
    UpdateLocation,
    DeleteLocation,

    ReadTicket,
    CreateTicket,
    UpdateTicket,
    DeleteTicket,
    /// Assign, resolve and close.
    ChangeTicketStatus,

    ReadOwnProfile,
    ManageUsers,
}

impl Operation {
    /// Operations anyone may call, authenticated or not.
    pub fn is_public(self) -> bool {
        matches!(self, Self::HealthCheck | Self::Login)
    }

    /// Operations restricted to [`Role::Admin`].
    pub fn requires_admin(self) -> bool {
        matches!(
            self,
            Self::CreateAsset
                | Self::UpdateAsset
                | Self::DeleteAsset
                | Self::ChangeAssetState
                | Self::CreateLocation
                | Self::UpdateLocation
                | Self::DeleteLocation
                | Self::UpdateTicket
                | Self::DeleteTicket
                | Self::ChangeTicketStatus
                | Self::ManageUsers
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::HealthCheck => "check health",
            Self::Login => "log in",
            Self::ReadAsset => "read assets",
            Self::CreateAsset => "create assets",
            Self::UpdateAsset => "update assets",
            Self::DeleteAsset => "delete assets",
            Self::ChangeAssetState => "change asset status or quantity",
            Self::ReadLocation => "read locations",
            Self::CreateLocation => "create locations",
            Self::UpdateLocation => "update locations",
            Self::DeleteLocation => "delete locations",
            Self::ReadTicket => "read tickets",
            Self::CreateTicket => "create tickets",
            Self::UpdateTicket => "update tickets",
            Self::DeleteTicket => "delete tickets",
            Self::ChangeTicketStatus => "assign, resolve or close tickets",
            Self::ReadOwnProfile => "read your profile",
            Self::ManageUsers => "manage users",
        };
        f.write_str(label)
    }
}

/// Whether `role` may perform `op`.
pub fn is_allowed(role: Option<Role>, op: Operation) -> bool {
    if op.is_public() {
        return true;
    }
    match role {
        None => false,
        Some(Role::Admin) => true,
        Some(Role::Employee) => !op.requires_admin(),
    }
}

/// Like [`is_allowed`], but produces the error a handler should return.
///
/// Unauthenticated callers get [`CoreError::Unauthorized`]; authenticated
/// callers with an insufficient role get [`CoreError::Forbidden`].
pub fn authorize(role: Option<Role>, op: Operation) -> Result<(), CoreError> {
    if is_allowed(role, op) {
        return Ok(());
    }
    match role {
        None => Err(CoreError::Unauthorized("Authentication required".into())),
        Some(role) => Err(CoreError::Forbidden(format!(
            "Role '{role}' is not permitted to {op}"
        ))),
    }
}
