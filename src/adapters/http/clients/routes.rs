//! HTTP routes for client endpoints.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    create_client, delete_client, get_client, list_clients, update_client, ClientsHandlers,
};

/// Creates the clients router with all endpoints.
pub fn clients_routes(handlers: ClientsHandlers) -> Router {
    Router::new()
        .route("/", get(list_clients))
        .route("/", post(create_client))
        .route("/:id", get(get_client))
        .route("/:id", patch(update_client))
        .route("/:id", delete(delete_client))
        .with_state(handlers)
}
