//! Resend email sender.
//!
//! Plain HTTPS client over the Resend REST API; the API key is held in a
//! `SecretString` and only exposed when building the request.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::email::OutboundEmail;
use crate::ports::{EmailError, EmailSender};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Sends transactional email through the Resend API.
pub struct ResendEmailSender {
    api_key: SecretString,
    from_header: String,
    api_url: String,
    http_client: reqwest::Client,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

impl ResendEmailSender {
    /// Creates a sender with the given API key and From header.
    pub fn new(api_key: impl Into<String>, from_header: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            from_header: from_header.into(),
            api_url: RESEND_API_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        let request = SendRequest {
            from: &self.from_header,
            to: [&email.to],
            subject: &email.subject,
            html: &email.body_html,
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| EmailError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(to = %email.to, "Email sent via Resend");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let error = match status.as_u16() {
            401 | 403 => EmailError::NotConfigured("resend"),
            422 => EmailError::Rejected(body),
            429 => EmailError::RateLimited,
            _ => EmailError::Provider(format!("HTTP {}: {}", status, body)),
        };
        tracing::warn!(to = %email.to, error = %error, "Resend send failed");
        Err(error)
    }

    fn provider_name(&self) -> &'static str {
        "resend"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_reports_configuration_state() {
        let sender = ResendEmailSender::new("re_key", "Talentscope <noreply@talentscope.io>");
        assert!(sender.is_configured());
        assert_eq!(sender.provider_name(), "resend");

        let empty = ResendEmailSender::new("", "Talentscope <noreply@talentscope.io>");
        assert!(!empty.is_configured());
    }

    #[test]
    fn send_request_serializes_expected_shape() {
        let request = SendRequest {
            from: "Talentscope <noreply@talentscope.io>",
            to: ["user@example.com"],
            subject: "Welcome",
            html: "<p>Hi</p>",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["to"][0], "user@example.com");
        assert_eq!(json["subject"], "Welcome");
    }
}
