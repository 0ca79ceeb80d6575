//! AWS SES email sender.
//!
//! Credentials come from the SDK's default provider chain, which covers
//! both OIDC web-identity roles and plain access keys without any code
//! here caring which.

use async_trait::async_trait;
use aws_sdk_sesv2::error::SdkError;
use aws_sdk_sesv2::operation::send_email::SendEmailError;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

use crate::domain::email::OutboundEmail;
use crate::ports::{EmailError, EmailSender};

/// Sends transactional email through the AWS SES v2 API.
pub struct SesEmailSender {
    client: aws_sdk_sesv2::Client,
    from_header: String,
}

impl SesEmailSender {
    /// Creates a sender over an already-built SES client.
    pub fn new(client: aws_sdk_sesv2::Client, from_header: impl Into<String>) -> Self {
        Self {
            client,
            from_header: from_header.into(),
        }
    }

    /// Builds the SES client from the default credential chain.
    pub async fn from_default_chain(region: String, from_header: impl Into<String>) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region))
            .load()
            .await;
        Self::new(aws_sdk_sesv2::Client::new(&config), from_header)
    }

    fn map_error(err: SdkError<SendEmailError>) -> EmailError {
        match &err {
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
                EmailError::Network(err.to_string())
            }
            SdkError::ServiceError(ctx) => {
                let service_err = ctx.err();
                if service_err.is_too_many_requests_exception() {
                    EmailError::RateLimited
                } else if service_err.is_message_rejected() {
                    EmailError::Rejected(err.to_string())
                } else {
                    EmailError::Provider(err.to_string())
                }
            }
            _ => EmailError::Provider(err.to_string()),
        }
    }
}

#[async_trait]
impl EmailSender for SesEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        let subject = Content::builder()
            .data(&email.subject)
            .charset("UTF-8")
            .build()
            .map_err(|e| EmailError::Provider(e.to_string()))?;

        let html = Content::builder()
            .data(&email.body_html)
            .charset("UTF-8")
            .build()
            .map_err(|e| EmailError::Provider(e.to_string()))?;

        let message = Message::builder()
            .subject(subject)
            .body(Body::builder().html(html).build())
            .build();

        let result = self
            .client
            .send_email()
            .from_email_address(&self.from_header)
            .destination(Destination::builder().to_addresses(&email.to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await;

        match result {
            Ok(output) => {
                tracing::info!(
                    to = %email.to,
                    message_id = output.message_id().unwrap_or("unknown"),
                    "Email sent via SES"
                );
                Ok(())
            }
            Err(err) => {
                let mapped = Self::map_error(err);
                tracing::warn!(to = %email.to, error = %mapped, "SES send failed");
                Err(mapped)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "ses"
    }

    fn is_configured(&self) -> bool {
        true
    }
}
