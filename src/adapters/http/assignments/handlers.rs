//! HTTP handlers for assignment endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorBody};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::assessment::{
    AnswerInput, CreateAssignmentCommand, CreateAssignmentHandler, SubmitAnswersCommand,
    SubmitAnswersHandler,
};
use crate::domain::foundation::{AssignmentId, ClientId, DimensionId, ProfileId, Timestamp};
use crate::ports::AssignmentRepository;

use super::dto::{
    AssignmentResponse, CreateAssignmentRequest, ListAssignmentsQuery, SubmitAnswersRequest,
    SubmitAnswersResponse,
};

/// Shared state for assignment endpoints.
#[derive(Clone)]
pub struct AssignmentsHandlers {
    pub assignments: Arc<dyn AssignmentRepository>,
    pub create: Arc<CreateAssignmentHandler>,
    pub submit: Arc<SubmitAnswersHandler>,
}

impl AssignmentsHandlers {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        create: Arc<CreateAssignmentHandler>,
        submit: Arc<SubmitAnswersHandler>,
    ) -> Self {
        Self {
            assignments,
            create,
            submit,
        }
    }
}

/// GET /api/assignments - list assignments scoped by role
///
/// Members see their own; admins see their client (or `?client_id=` for
/// super admins); `?target_id=` filters to one target for admins.
pub async fn list_assignments(
    State(handlers): State<AssignmentsHandlers>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ListAssignmentsQuery>,
) -> Response {
    if let Some(raw) = &query.target_id {
        let Ok(target_id) = raw.parse::<ProfileId>() else {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::bad_request("Invalid target ID")),
            )
                .into_response();
        };
        if !user.access_level.is_admin() {
            return (
                StatusCode::FORBIDDEN,
                Json(ErrorBody::forbidden("Only admins can list by target")),
            )
                .into_response();
        }
        return match handlers.assignments.list_by_target(&target_id).await {
            Ok(list) => respond_list(list),
            Err(e) => domain_error_response(&e),
        };
    }

    if !user.access_level.is_admin() {
        return match handlers.assignments.list_by_rater(&user.id).await {
            Ok(list) => respond_list(list),
            Err(e) => domain_error_response(&e),
        };
    }

    let client_id = match &query.client_id {
        Some(raw) => match raw.parse::<ClientId>() {
            Ok(id) => id,
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody::bad_request("Invalid client ID")),
                )
                    .into_response()
            }
        },
        None => match user.client_id {
            Some(id) => id,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody::bad_request("client_id query parameter required")),
                )
                    .into_response()
            }
        },
    };

    if !user.can_manage_client(&client_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Not allowed to manage this client")),
        )
            .into_response();
    }

    match handlers.assignments.list_by_client(&client_id).await {
        Ok(list) => respond_list(list),
        Err(e) => domain_error_response(&e),
    }
}

fn respond_list(list: Vec<crate::domain::assessment::Assignment>) -> Response {
    let body: Vec<AssignmentResponse> = list.iter().map(AssignmentResponse::from).collect();
    (StatusCode::OK, Json(body)).into_response()
}

/// POST /api/assignments - create an assignment (admins)
pub async fn create_assignment(
    State(handlers): State<AssignmentsHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateAssignmentRequest>,
) -> Response {
    let (Ok(profile_id), Ok(target_profile_id)) = (
        req.profile_id.parse::<ProfileId>(),
        req.target_profile_id.parse::<ProfileId>(),
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid profile ID")),
        )
            .into_response();
    };

    let cmd = CreateAssignmentCommand {
        actor: user,
        profile_id,
        target_profile_id,
        kind: req.kind,
        relation: req.relation,
        expires_at: req.expires_at.map(Timestamp::from_datetime),
    };

    match handlers.create.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(AssignmentResponse::from(&result.assignment)),
        )
            .into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/assignments/:id - fetch one assignment
pub async fn get_assignment(
    State(handlers): State<AssignmentsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let Ok(assignment_id) = id.parse::<AssignmentId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid assignment ID")),
        )
            .into_response();
    };

    match handlers.assignments.find_by_id(&assignment_id).await {
        Ok(Some(assignment)) => {
            let involved = assignment.profile_id == user.id
                || assignment.target_profile_id == user.id
                || user.can_manage_client(&assignment.client_id);
            if !involved {
                return (
                    StatusCode::FORBIDDEN,
                    Json(ErrorBody::forbidden("Not involved in this assignment")),
                )
                    .into_response();
            }
            (StatusCode::OK, Json(AssignmentResponse::from(&assignment))).into_response()
        }
        Ok(None) => {
            (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Assignment"))).into_response()
        }
        Err(e) => domain_error_response(&e),
    }
}

/// PATCH /api/assignments/:id - submit answers / complete
///
/// Only the owning rater or a managing admin may submit; anyone else
/// gets a 403.
pub async fn submit_answers(
    State(handlers): State<AssignmentsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<SubmitAnswersRequest>,
) -> Response {
    let Ok(assignment_id) = id.parse::<AssignmentId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid assignment ID")),
        )
            .into_response();
    };

    let mut answers = Vec::with_capacity(req.answers.len());
    for payload in &req.answers {
        let Ok(dimension_id) = payload.dimension_id.parse::<DimensionId>() else {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::bad_request("Invalid dimension ID")),
            )
                .into_response();
        };
        answers.push(AnswerInput {
            dimension_id,
            rating: payload.rating,
        });
    }

    let cmd = SubmitAnswersCommand {
        actor: user,
        assignment_id,
        answers,
        feedback: req.feedback,
        complete: req.complete,
    };

    match handlers.submit.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(SubmitAnswersResponse {
                recorded: result.recorded,
                completed: result.completed,
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// DELETE /api/assignments/:id - delete an assignment (admins)
pub async fn delete_assignment(
    State(handlers): State<AssignmentsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let Ok(assignment_id) = id.parse::<AssignmentId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid assignment ID")),
        )
            .into_response();
    };

    let assignment = match handlers.assignments.find_by_id(&assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Assignment")))
                .into_response()
        }
        Err(e) => return domain_error_response(&e),
    };

    if !user.can_manage_client(&assignment.client_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Not allowed to manage this assignment")),
        )
            .into_response();
    }

    match handlers.assignments.delete(&assignment_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(&e),
    }
}
