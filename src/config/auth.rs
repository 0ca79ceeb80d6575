//! Authentication configuration
//!
//! The platform delegates identity to a hosted auth service that issues
//! HS256-signed session tokens. The backend only needs the shared signing
//! secret, the expected audience, and the name of the session cookie the
//! frontend stores the token in.

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (hosted auth session tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret of the hosted auth service
    pub jwt_secret: String,

    /// Expected audience claim for session tokens
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Name of the session cookie carrying the token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production the signing secret must be at least 32 bytes;
    /// development tolerates shorter secrets for local stacks.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_JWT_SECRET"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_AUDIENCE"));
        }
        if *environment == Environment::Production && self.jwt_secret.len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            audience: default_audience(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}

fn default_cookie_name() -> String {
    "ts-session".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.audience, "authenticated");
        assert_eq!(config.cookie_name, "ts-session");
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthConfig::default();
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_production_requires_long_secret() {
        let config = AuthConfig {
            jwt_secret: "short".to_string(),
            ..Default::default()
        };
        // Allowed in development
        assert!(config.validate(&Environment::Development).is_ok());
        // Rejected in production
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AuthConfig {
            jwt_secret: "a-very-long-shared-secret-for-signing-1".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }
}
