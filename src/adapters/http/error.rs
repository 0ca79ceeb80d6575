//! Shared JSON error bodies and the DomainError -> HTTP status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::bulk::BulkError;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthorized() -> Self {
        Self::new("UNAUTHENTICATED", "Authentication required")
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn not_found(resource_type: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found", resource_type))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Maps a domain error onto the conventional status codes.
pub fn domain_error_response(error: &DomainError) -> Response {
    let status = status_for(error.code());
    let mut body = ErrorBody::new(error.code().to_string(), error.message());
    if !error.details().is_empty() {
        body.details = serde_json::to_value(error.details()).ok();
    }
    (status, Json(body)).into_response()
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat
        | ErrorCode::BulkValidationFailed => StatusCode::BAD_REQUEST,

        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,

        ErrorCode::ClientNotFound
        | ErrorCode::ProfileNotFound
        | ErrorCode::GroupNotFound
        | ErrorCode::AssignmentNotFound
        | ErrorCode::DimensionNotFound
        | ErrorCode::ReportNotFound => StatusCode::NOT_FOUND,

        ErrorCode::DuplicateEmail
        | ErrorCode::DuplicateName
        | ErrorCode::Conflict
        | ErrorCode::InvalidStateTransition
        | ErrorCode::AssignmentCompleted
        | ErrorCode::AssignmentExpired => StatusCode::CONFLICT,

        ErrorCode::EmailNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::EmailDeliveryFailed => StatusCode::BAD_GATEWAY,

        ErrorCode::ExportFailed | ErrorCode::DatabaseError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Maps a bulk-upload error onto a 400 carrying the full error list.
pub fn bulk_error_response(error: &BulkError) -> Response {
    let body = match error {
        BulkError::MissingColumns(missing) => {
            ErrorBody::new("MISSING_COLUMNS", error.to_string())
                .with_details(serde_json::json!({ "missing_columns": missing }))
        }
        BulkError::Malformed(_) => ErrorBody::bad_request(error.to_string()),
        BulkError::Rows(rows) => ErrorBody::new("BULK_VALIDATION_FAILED", error.to_string())
            .with_details(serde_json::json!({ "row_errors": rows })),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bulk::RowError;

    #[test]
    fn not_found_codes_map_to_404() {
        let error = DomainError::new(ErrorCode::ProfileNotFound, "Profile not found");
        assert_eq!(domain_error_response(&error).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_codes_map_to_400() {
        let error = DomainError::validation("email", "Invalid email");
        assert_eq!(
            domain_error_response(&error).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn forbidden_maps_to_403() {
        let error = DomainError::forbidden("No");
        assert_eq!(domain_error_response(&error).status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn conflict_codes_map_to_409() {
        for code in [
            ErrorCode::DuplicateEmail,
            ErrorCode::DuplicateName,
            ErrorCode::AssignmentCompleted,
        ] {
            let error = DomainError::new(code, "conflict");
            assert_eq!(domain_error_response(&error).status(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn email_not_configured_maps_to_503() {
        let error = DomainError::new(ErrorCode::EmailNotConfigured, "no provider");
        assert_eq!(
            domain_error_response(&error).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn infrastructure_codes_map_to_500() {
        let error = DomainError::database("boom");
        assert_eq!(
            domain_error_response(&error).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_columns_body_lists_names() {
        let error = BulkError::MissingColumns(vec!["Email".into()]);
        let response = bulk_error_response(&error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn row_errors_body_is_400() {
        let error = BulkError::Rows(vec![RowError::new(2, "bad row")]);
        assert_eq!(bulk_error_response(&error).status(), StatusCode::BAD_REQUEST);
    }
}
