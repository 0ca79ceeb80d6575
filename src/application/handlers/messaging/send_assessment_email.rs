//! SendAssessmentEmailHandler - templated transactional email.

use std::sync::Arc;

use crate::domain::email::{render_template, OutboundEmail, TemplateContext};
use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::ports::{EmailError, EmailSender};

/// Command to send one templated email.
#[derive(Debug, Clone)]
pub struct SendAssessmentEmailCommand {
    pub actor: AuthenticatedUser,
    pub to: String,
    pub subject: String,
    /// Body template containing `{shortcode}` placeholders.
    pub body_template: String,
    pub context: TemplateContext,
}

/// Result of a successful send.
#[derive(Debug, Clone)]
pub struct SendAssessmentEmailResult {
    pub to: String,
}

/// Handler rendering shortcodes and dispatching through the configured
/// provider chain. Only admins may send platform email.
pub struct SendAssessmentEmailHandler {
    sender: Arc<dyn EmailSender>,
}

impl SendAssessmentEmailHandler {
    pub fn new(sender: Arc<dyn EmailSender>) -> Self {
        Self { sender }
    }

    pub async fn handle(
        &self,
        cmd: SendAssessmentEmailCommand,
    ) -> Result<SendAssessmentEmailResult, DomainError> {
        if !cmd.actor.access_level.is_admin() {
            return Err(DomainError::forbidden("Only admins can send email"));
        }

        let subject = render_template(&cmd.subject, &cmd.context);
        let body = render_template(&cmd.body_template, &cmd.context);
        let email = OutboundEmail::new(cmd.to, subject, body)?;

        self.sender.send(&email).await.map_err(map_email_error)?;

        Ok(SendAssessmentEmailResult { to: email.to })
    }
}

fn map_email_error(err: EmailError) -> DomainError {
    match err {
        EmailError::NotConfigured(provider) => DomainError::new(
            ErrorCode::EmailNotConfigured,
            format!("Email service not configured: {}", provider),
        ),
        other => DomainError::new(ErrorCode::EmailDeliveryFailed, other.to_string()),
    }
}
