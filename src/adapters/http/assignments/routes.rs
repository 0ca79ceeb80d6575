//! HTTP routes for assignment endpoints.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    create_assignment, delete_assignment, get_assignment, list_assignments, submit_answers,
    AssignmentsHandlers,
};

/// Creates the assignments router with all endpoints.
pub fn assignments_routes(handlers: AssignmentsHandlers) -> Router {
    Router::new()
        .route("/", get(list_assignments))
        .route("/", post(create_assignment))
        .route("/:id", get(get_assignment))
        .route("/:id", patch(submit_answers))
        .route("/:id", delete(delete_assignment))
        .with_state(handlers)
}
