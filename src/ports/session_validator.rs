//! Session validation port.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates a session token issued by the hosted auth service.
///
/// The HTTP middleware extracts the token from the `Authorization` header
/// or the session cookie and delegates here; whether the implementation
/// verifies an HS256 JWT locally or calls out to the auth service is an
/// adapter concern.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
