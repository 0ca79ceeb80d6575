//! Email sending port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::email::OutboundEmail;

/// Port for sending transactional email.
///
/// # Contract
///
/// Implementations must:
/// - Deliver the message or return an error; no silent drops
/// - Distinguish a missing configuration from a delivery failure
/// - Mark transient failures so the failover sender can retry elsewhere
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send one email.
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError>;

    /// Short provider label for logging ("ses", "resend").
    fn provider_name(&self) -> &'static str;

    /// True when the provider has the configuration it needs to send.
    fn is_configured(&self) -> bool;
}

/// Errors that can occur while sending email.
#[derive(Debug, Clone, Error)]
pub enum EmailError {
    /// The provider is missing required configuration. Surfaced to
    /// clients as a dedicated "service not configured" response.
    #[error("Email service not configured: {0}")]
    NotConfigured(&'static str),

    /// The provider rejected the message (bad recipient, content policy).
    #[error("Email rejected by provider: {0}")]
    Rejected(String),

    /// The provider throttled the request.
    #[error("Email provider rate limited the request")]
    RateLimited,

    /// Network failure reaching the provider.
    #[error("Email provider unreachable: {0}")]
    Network(String),

    /// Any other provider-side failure.
    #[error("Email provider error: {0}")]
    Provider(String),
}

impl EmailError {
    /// True when retrying on another provider may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EmailError::RateLimited | EmailError::Network(_) | EmailError::Provider(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_are_marked() {
        assert!(EmailError::RateLimited.is_transient());
        assert!(EmailError::Network("timeout".into()).is_transient());
        assert!(EmailError::Provider("500".into()).is_transient());
    }

    #[test]
    fn permanent_errors_are_not_transient() {
        assert!(!EmailError::NotConfigured("ses").is_transient());
        assert!(!EmailError::Rejected("bad address".into()).is_transient());
    }

    #[test]
    fn email_sender_is_object_safe() {
        fn check<T: EmailSender + ?Sized>() {}
        check::<dyn EmailSender>();
    }
}
