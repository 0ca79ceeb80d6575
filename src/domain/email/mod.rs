//! Email domain - outbound messages and shortcode templates.

mod template;

pub use template::{render_template, TemplateContext, SHORTCODES};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::directory::validate_email;

/// A fully-rendered outbound transactional email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    /// Recipient address.
    pub to: String,

    /// Subject line.
    pub subject: String,

    /// HTML body (already template-substituted).
    pub body_html: String,
}

impl OutboundEmail {
    /// Create an outbound email, validating the recipient address.
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body_html: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let to = to.into().trim().to_lowercase();
        validate_email(&to)?;
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(ValidationError::empty_field("subject"));
        }
        Ok(Self {
            to,
            subject,
            body_html: body_html.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbound_email_normalizes_recipient() {
        let email = OutboundEmail::new(" User@Example.COM ", "Hello", "<p>Hi</p>").unwrap();
        assert_eq!(email.to, "user@example.com");
    }

    #[test]
    fn outbound_email_rejects_invalid_recipient() {
        assert!(OutboundEmail::new("nope", "Hello", "body").is_err());
    }

    #[test]
    fn outbound_email_rejects_empty_subject() {
        assert!(OutboundEmail::new("a@b.com", " ", "body").is_err());
    }
}
