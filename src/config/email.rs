//! Email configuration
//!
//! Two providers are supported: AWS SES (preferred, credentials come from
//! the SDK's default provider chain - OIDC web identity or access keys)
//! and Resend (fallback, API key). Either may be left unconfigured; the
//! failover sender reports a dedicated "not configured" error when both are.

use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (AWS SES preferred, Resend fallback)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Enable the SES sender (credentials from the AWS default chain)
    #[serde(default)]
    pub ses_enabled: bool,

    /// AWS region for SES, e.g. "eu-west-1"
    pub ses_region: Option<String>,

    /// Resend API key (re_...)
    pub resend_api_key: Option<String>,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// True when at least one provider is configured
    pub fn any_provider_configured(&self) -> bool {
        self.ses_enabled || self.resend_api_key.is_some()
    }

    /// Validate email configuration
    ///
    /// An entirely unconfigured provider set is allowed (sending then
    /// surfaces a "service not configured" error), but configured values
    /// must be well-formed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = &self.resend_api_key {
            if !key.starts_with("re_") {
                return Err(ValidationError::InvalidResendKey);
            }
        }
        if self.ses_enabled && self.ses_region.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::MissingRequired("EMAIL_SES_REGION"));
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            ses_enabled: false,
            ses_region: None,
            resend_api_key: None,
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_from_email() -> String {
    "noreply@talentscope.io".to_string()
}

fn default_from_name() -> String {
    "Talentscope".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_config_defaults() {
        let config = EmailConfig::default();
        assert_eq!(config.from_email, "noreply@talentscope.io");
        assert_eq!(config.from_name, "Talentscope");
        assert!(!config.any_provider_configured());
    }

    #[test]
    fn test_from_header() {
        let config = EmailConfig {
            from_email: "support@example.com".to_string(),
            from_name: "Support Team".to_string(),
            ..Default::default()
        };
        assert_eq!(config.from_header(), "Support Team <support@example.com>");
    }

    #[test]
    fn test_unconfigured_providers_are_valid() {
        let config = EmailConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_resend_key_prefix() {
        let config = EmailConfig {
            resend_api_key: Some("sk_xxx".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_ses_requires_region() {
        let config = EmailConfig {
            ses_enabled: true,
            ses_region: None,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_from_email() {
        let config = EmailConfig {
            from_email: "invalid-email".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = EmailConfig {
            ses_enabled: true,
            ses_region: Some("eu-west-1".to_string()),
            resend_api_key: Some("re_abcd1234".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.any_provider_configured());
    }
}
