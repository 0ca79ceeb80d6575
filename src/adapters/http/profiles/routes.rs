//! HTTP routes for profile endpoints.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    bulk_upload_profiles, create_profile, delete_profile, get_profile, list_profiles,
    update_profile, ProfilesHandlers,
};

/// Creates the profiles router with all endpoints.
pub fn profiles_routes(handlers: ProfilesHandlers) -> Router {
    Router::new()
        .route("/", get(list_profiles))
        .route("/", post(create_profile))
        .route("/bulk", post(bulk_upload_profiles))
        .route("/:id", get(get_profile))
        .route("/:id", patch(update_profile))
        .route("/:id", delete(delete_profile))
        .with_state(handlers)
}
