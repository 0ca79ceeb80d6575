//! HTTP routes for group endpoints.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    add_member, bulk_upload_groups, create_group, delete_group, get_group, list_groups,
    list_members, remove_member, update_group, GroupsHandlers,
};

/// Creates the groups router with all endpoints.
pub fn groups_routes(handlers: GroupsHandlers) -> Router {
    Router::new()
        .route("/", get(list_groups))
        .route("/", post(create_group))
        .route("/bulk", post(bulk_upload_groups))
        .route("/:id", get(get_group))
        .route("/:id", patch(update_group))
        .route("/:id", delete(delete_group))
        .route("/:id/members", get(list_members))
        .route("/:id/members", post(add_member))
        .route("/:id/members/:profile_id", delete(remove_member))
        .with_state(handlers)
}
