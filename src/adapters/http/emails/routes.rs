//! HTTP routes for email endpoints.

use axum::{routing::post, Router};

use super::handlers::{send_email, EmailsHandlers};

/// Creates the emails router with all endpoints.
pub fn emails_routes(handlers: EmailsHandlers) -> Router {
    Router::new()
        .route("/send", post(send_email))
        .with_state(handlers)
}
