//! HTTP DTOs for email endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::email::TemplateContext;

/// Shortcode values supplied by the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateContextPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub assessments: String,
    #[serde(default)]
    pub expiration_date: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub dashboard_link: String,
}

impl From<TemplateContextPayload> for TemplateContext {
    fn from(payload: TemplateContextPayload) -> Self {
        TemplateContext {
            name: payload.name,
            username: payload.username,
            email: payload.email,
            assessments: payload.assessments,
            expiration_date: payload.expiration_date,
            password: payload.password,
            dashboard_link: payload.dashboard_link,
        }
    }
}

/// Request to send one templated email.
#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub body_template: String,
    #[serde(default)]
    pub context: TemplateContextPayload,
}

/// Result body of a send.
#[derive(Debug, Clone, Serialize)]
pub struct SendEmailResponse {
    pub to: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_request_context_defaults_to_empty() {
        let json = r#"{
            "to": "jordan@example.com",
            "subject": "Welcome",
            "body_template": "Hi {name}"
        }"#;
        let req: SendEmailRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.context.name, "");
    }

    #[test]
    fn send_request_context_parses_fields() {
        let json = r#"{
            "to": "jordan@example.com",
            "subject": "Welcome",
            "body_template": "Hi {name}",
            "context": {"name": "Jordan", "expiration_date": "2026-09-01"}
        }"#;
        let req: SendEmailRequest = serde_json::from_str(json).unwrap();
        let ctx: TemplateContext = req.context.into();
        assert_eq!(ctx.name, "Jordan");
        assert_eq!(ctx.expiration_date, "2026-09-01");
    }
}
