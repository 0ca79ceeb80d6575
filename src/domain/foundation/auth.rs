//! Authentication and authorization types for the domain layer.
//!
//! These types represent an authenticated user extracted from a validated
//! session token. They have no provider dependencies - the hosted auth
//! service populates them via the `SessionValidator` port.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{ClientId, ProfileId};

/// Three-tier access level checked per route.
///
/// Levels are ordered: a `SuperAdmin` can do anything a `ClientAdmin`
/// can, and a `ClientAdmin` anything a `Member` can (within their client).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Member,
    ClientAdmin,
    SuperAdmin,
}

impl AccessLevel {
    /// Stable string form used in the database and token claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Member => "member",
            AccessLevel::ClientAdmin => "client_admin",
            AccessLevel::SuperAdmin => "super_admin",
        }
    }

    /// True for either admin tier.
    pub fn is_admin(&self) -> bool {
        *self >= AccessLevel::ClientAdmin
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" => Ok(AccessLevel::Member),
            "client_admin" => Ok(AccessLevel::ClientAdmin),
            "super_admin" => Ok(AccessLevel::SuperAdmin),
            other => Err(format!("Unknown access level: {}", other)),
        }
    }
}

/// Authenticated user extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The profile id of the signed-in user.
    pub id: ProfileId,

    /// User's email address from the token claims.
    pub email: String,

    /// Display name if available.
    pub display_name: Option<String>,

    /// The client the user belongs to. Super admins may have none.
    pub client_id: Option<ClientId>,

    /// Role tier from the `app_role` claim.
    pub access_level: AccessLevel,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(
        id: ProfileId,
        email: impl Into<String>,
        display_name: Option<String>,
        client_id: Option<ClientId>,
        access_level: AccessLevel,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
            client_id,
            access_level,
        }
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }

    /// True for super admins only.
    pub fn is_super_admin(&self) -> bool {
        self.access_level == AccessLevel::SuperAdmin
    }

    /// True when the user can manage resources owned by `client`:
    /// super admins everywhere, client admins within their own client.
    pub fn can_manage_client(&self, client: &ClientId) -> bool {
        match self.access_level {
            AccessLevel::SuperAdmin => true,
            AccessLevel::ClientAdmin => self.client_id.as_ref() == Some(client),
            AccessLevel::Member => false,
        }
    }

    /// True when the user may act on rows owned by `profile`: the owner
    /// themselves, or an admin allowed to manage `client`.
    pub fn can_act_for(&self, profile: &ProfileId, client: &ClientId) -> bool {
        self.id == *profile || self.can_manage_client(client)
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the user no longer exists in the system.
    #[error("User not found")]
    UserNotFound,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(level: AccessLevel, client: Option<ClientId>) -> AuthenticatedUser {
        AuthenticatedUser::new(ProfileId::new(), "test@example.com", None, client, level)
    }

    #[test]
    fn access_level_roundtrips_through_strings() {
        for level in [
            AccessLevel::Member,
            AccessLevel::ClientAdmin,
            AccessLevel::SuperAdmin,
        ] {
            let parsed: AccessLevel = level.as_str().parse().unwrap();
            assert_eq!(level, parsed);
        }
    }

    #[test]
    fn access_level_parse_rejects_unknown() {
        assert!("owner".parse::<AccessLevel>().is_err());
    }

    #[test]
    fn access_levels_are_ordered() {
        assert!(AccessLevel::SuperAdmin > AccessLevel::ClientAdmin);
        assert!(AccessLevel::ClientAdmin > AccessLevel::Member);
        assert!(AccessLevel::ClientAdmin.is_admin());
        assert!(!AccessLevel::Member.is_admin());
    }

    #[test]
    fn super_admin_manages_any_client() {
        let u = user(AccessLevel::SuperAdmin, None);
        assert!(u.can_manage_client(&ClientId::new()));
    }

    #[test]
    fn client_admin_manages_only_own_client() {
        let own = ClientId::new();
        let u = user(AccessLevel::ClientAdmin, Some(own));
        assert!(u.can_manage_client(&own));
        assert!(!u.can_manage_client(&ClientId::new()));
    }

    #[test]
    fn member_manages_no_client() {
        let own = ClientId::new();
        let u = user(AccessLevel::Member, Some(own));
        assert!(!u.can_manage_client(&own));
    }

    #[test]
    fn owner_can_act_for_self() {
        let client = ClientId::new();
        let u = user(AccessLevel::Member, Some(client));
        let own_id = u.id;
        assert!(u.can_act_for(&own_id, &client));
        assert!(!u.can_act_for(&ProfileId::new(), &client));
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let u = user(AccessLevel::Member, None);
        assert_eq!(u.display_name_or_email(), "test@example.com");
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::service_unavailable("x").requires_reauthentication());
    }
}
