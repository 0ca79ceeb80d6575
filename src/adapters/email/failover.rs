//! Failover email sender - tries providers in preference order.
//!
//! SES is preferred; when it fails with a transient error the message is
//! retried on the next configured provider (Resend). Permanent errors
//! (rejected recipient) stop immediately - a second provider would only
//! reject the same address again.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::email::OutboundEmail;
use crate::ports::{EmailError, EmailSender};

/// Wraps a preference-ordered list of senders with transient-error failover.
pub struct FailoverEmailSender {
    senders: Vec<Arc<dyn EmailSender>>,
}

impl FailoverEmailSender {
    /// Creates a failover sender with no providers; add them in
    /// preference order via [`with_sender`](Self::with_sender).
    pub fn new() -> Self {
        Self { senders: Vec::new() }
    }

    /// Appends a provider at the end of the preference order.
    pub fn with_sender(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.senders.push(sender);
        self
    }
}

impl Default for FailoverEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailSender for FailoverEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        let configured: Vec<&Arc<dyn EmailSender>> =
            self.senders.iter().filter(|s| s.is_configured()).collect();

        if configured.is_empty() {
            return Err(EmailError::NotConfigured("no email provider"));
        }

        let mut last_error = None;
        for sender in configured {
            match sender.send(email).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_transient() => {
                    tracing::warn!(
                        provider = sender.provider_name(),
                        error = %e,
                        "Email provider failed, trying next"
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(EmailError::NotConfigured("no email provider")))
    }

    fn provider_name(&self) -> &'static str {
        "failover"
    }

    fn is_configured(&self) -> bool {
        self.senders.iter().any(|s| s.is_configured())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSender {
        name: &'static str,
        configured: bool,
        result: Result<(), EmailError>,
        calls: AtomicUsize,
    }

    impl StubSender {
        fn ok(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                configured: true,
                result: Ok(()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(name: &'static str, error: EmailError) -> Arc<Self> {
            Arc::new(Self {
                name,
                configured: true,
                result: Err(error),
                calls: AtomicUsize::new(0),
            })
        }

        fn unconfigured(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                configured: false,
                result: Ok(()),
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EmailSender for StubSender {
        async fn send(&self, _email: &OutboundEmail) -> Result<(), EmailError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    fn email() -> OutboundEmail {
        OutboundEmail::new("user@example.com", "Subject", "<p>Body</p>").unwrap()
    }

    #[tokio::test]
    async fn uses_primary_when_it_succeeds() {
        let primary = StubSender::ok("ses");
        let fallback = StubSender::ok("resend");
        let sender = FailoverEmailSender::new()
            .with_sender(primary.clone())
            .with_sender(fallback.clone());

        sender.send(&email()).await.unwrap();
        assert_eq!(primary.call_count(), 1);
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn falls_back_on_transient_error() {
        let primary = StubSender::failing("ses", EmailError::Network("timeout".into()));
        let fallback = StubSender::ok("resend");
        let sender = FailoverEmailSender::new()
            .with_sender(primary.clone())
            .with_sender(fallback.clone());

        sender.send(&email()).await.unwrap();
        assert_eq!(primary.call_count(), 1);
        assert_eq!(fallback.call_count(), 1);
    }

    #[tokio::test]
    async fn permanent_error_stops_immediately() {
        let primary = StubSender::failing("ses", EmailError::Rejected("bad address".into()));
        let fallback = StubSender::ok("resend");
        let sender = FailoverEmailSender::new()
            .with_sender(primary)
            .with_sender(fallback.clone());

        let result = sender.send(&email()).await;
        assert!(matches!(result, Err(EmailError::Rejected(_))));
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn skips_unconfigured_providers() {
        let primary = StubSender::unconfigured("ses");
        let fallback = StubSender::ok("resend");
        let sender = FailoverEmailSender::new()
            .with_sender(primary.clone())
            .with_sender(fallback.clone());

        sender.send(&email()).await.unwrap();
        assert_eq!(primary.call_count(), 0);
        assert_eq!(fallback.call_count(), 1);
    }

    #[tokio::test]
    async fn no_configured_provider_reports_not_configured() {
        let sender = FailoverEmailSender::new()
            .with_sender(StubSender::unconfigured("ses"))
            .with_sender(StubSender::unconfigured("resend"));

        let result = sender.send(&email()).await;
        assert!(matches!(result, Err(EmailError::NotConfigured(_))));
        assert!(!sender.is_configured());
    }

    #[tokio::test]
    async fn last_transient_error_is_returned_when_all_fail() {
        let sender = FailoverEmailSender::new()
            .with_sender(StubSender::failing("ses", EmailError::Network("a".into())))
            .with_sender(StubSender::failing("resend", EmailError::RateLimited));

        let result = sender.send(&email()).await;
        assert!(matches!(result, Err(EmailError::RateLimited)));
    }
}
