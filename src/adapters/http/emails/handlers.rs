//! HTTP handlers for email endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::domain_error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::messaging::{
    SendAssessmentEmailCommand, SendAssessmentEmailHandler,
};

use super::dto::{SendEmailRequest, SendEmailResponse};

/// Shared state for email endpoints.
#[derive(Clone)]
pub struct EmailsHandlers {
    pub send: Arc<SendAssessmentEmailHandler>,
}

impl EmailsHandlers {
    pub fn new(send: Arc<SendAssessmentEmailHandler>) -> Self {
        Self { send }
    }
}

/// POST /api/emails/send - send one templated email (admins)
pub async fn send_email(
    State(handlers): State<EmailsHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<SendEmailRequest>,
) -> Response {
    let cmd = SendAssessmentEmailCommand {
        actor: user,
        to: req.to,
        subject: req.subject,
        body_template: req.body_template,
        context: req.context.into(),
    };

    match handlers.send.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(SendEmailResponse {
                to: result.to,
                message: "Email sent".to_string(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(&e),
    }
}
