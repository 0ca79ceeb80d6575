//! JWT session validator for the hosted auth service.
//!
//! The hosted auth service signs session tokens with a shared HS256
//! secret. Validation happens entirely in-process: signature, expiry,
//! and audience checks via `jsonwebtoken`, then claim mapping into the
//! domain's `AuthenticatedUser`.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::domain::foundation::{
    AccessLevel, AuthError, AuthenticatedUser, ClientId, ProfileId,
};
use crate::ports::SessionValidator;

/// Claims carried by a hosted-auth session token.
#[derive(Debug, Deserialize)]
struct SessionClaims {
    /// Profile id of the signed-in user.
    sub: String,

    email: String,

    #[serde(default)]
    name: Option<String>,

    /// Role tier; absent means plain member.
    #[serde(default)]
    app_role: Option<String>,

    /// Owning client; super admins may have none.
    #[serde(default)]
    client_id: Option<String>,
}

/// Validates HS256 session tokens issued by the hosted auth service.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    // Held only so the secret stays zeroized-on-drop alongside the key.
    _secret: SecretString,
}

impl JwtSessionValidator {
    /// Creates a validator from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let secret = SecretString::new(config.jwt_secret.clone());
        let decoding_key = DecodingKey::from_secret(secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);
        Self {
            decoding_key,
            validation,
            _secret: secret,
        }
    }

    fn map_claims(claims: SessionClaims) -> Result<AuthenticatedUser, AuthError> {
        let id: ProfileId = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;

        let client_id = match claims.client_id {
            Some(raw) => Some(raw.parse::<ClientId>().map_err(|_| AuthError::InvalidToken)?),
            None => None,
        };

        let access_level = claims
            .app_role
            .as_deref()
            .map(str::parse::<AccessLevel>)
            .transpose()
            .map_err(|_| AuthError::InvalidToken)?
            .unwrap_or(AccessLevel::Member);

        Ok(AuthenticatedUser::new(
            id,
            claims.email,
            claims.name,
            client_id,
            access_level,
        ))
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        Self::map_claims(data.claims)
    }
}
