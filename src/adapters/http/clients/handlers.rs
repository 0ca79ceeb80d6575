//! HTTP handlers for client endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorBody};
use crate::adapters::http::middleware::RequireAuth;
use crate::domain::directory::Client;
use crate::domain::foundation::ClientId;
use crate::ports::ClientRepository;

/// Shared state for client endpoints.
#[derive(Clone)]
pub struct ClientsHandlers {
    pub clients: Arc<dyn ClientRepository>,
}

impl ClientsHandlers {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }
}

use super::dto::{ClientResponse, CreateClientRequest, UpdateClientRequest};

/// GET /api/clients - list clients visible to the caller
pub async fn list_clients(
    State(handlers): State<ClientsHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    if user.is_super_admin() {
        return match handlers.clients.list_all().await {
            Ok(clients) => {
                let body: Vec<ClientResponse> = clients.iter().map(ClientResponse::from).collect();
                (StatusCode::OK, Json(body)).into_response()
            }
            Err(e) => domain_error_response(&e),
        };
    }

    // Everyone else sees exactly their own organization.
    let Some(client_id) = user.client_id else {
        return (StatusCode::OK, Json(Vec::<ClientResponse>::new())).into_response();
    };
    match handlers.clients.find_by_id(&client_id).await {
        Ok(Some(client)) => {
            (StatusCode::OK, Json(vec![ClientResponse::from(&client)])).into_response()
        }
        Ok(None) => (StatusCode::OK, Json(Vec::<ClientResponse>::new())).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/clients - create a client (super admin)
pub async fn create_client(
    State(handlers): State<ClientsHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateClientRequest>,
) -> Response {
    if !user.is_super_admin() {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Only super admins can create clients")),
        )
            .into_response();
    }

    let client = match Client::new(req.name, req.industry) {
        Ok(client) => client,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorBody::bad_request(e.to_string())))
                .into_response()
        }
    };

    match handlers.clients.save(&client).await {
        Ok(()) => (StatusCode::CREATED, Json(ClientResponse::from(&client))).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/clients/:id - fetch one client
pub async fn get_client(
    State(handlers): State<ClientsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let Ok(client_id) = id.parse::<ClientId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid client ID")),
        )
            .into_response();
    };

    if !user.is_super_admin() && user.client_id != Some(client_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Not a member of this client")),
        )
            .into_response();
    }

    match handlers.clients.find_by_id(&client_id).await {
        Ok(Some(client)) => (StatusCode::OK, Json(ClientResponse::from(&client))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Client"))).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// PATCH /api/clients/:id - update name/industry
pub async fn update_client(
    State(handlers): State<ClientsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateClientRequest>,
) -> Response {
    let Ok(client_id) = id.parse::<ClientId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid client ID")),
        )
            .into_response();
    };

    if !user.can_manage_client(&client_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Not allowed to manage this client")),
        )
            .into_response();
    }

    let mut client = match handlers.clients.find_by_id(&client_id).await {
        Ok(Some(client)) => client,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Client"))).into_response()
        }
        Err(e) => return domain_error_response(&e),
    };

    if let Some(name) = req.name {
        if let Err(e) = client.rename(name) {
            return (StatusCode::BAD_REQUEST, Json(ErrorBody::bad_request(e.to_string())))
                .into_response();
        }
    }
    if let Some(industry) = req.industry {
        let industry = industry.trim().to_lowercase();
        if industry.is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::bad_request("Industry cannot be empty")),
            )
                .into_response();
        }
        client.industry = industry;
    }

    match handlers.clients.update(&client).await {
        Ok(()) => (StatusCode::OK, Json(ClientResponse::from(&client))).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// DELETE /api/clients/:id - delete a client (super admin)
pub async fn delete_client(
    State(handlers): State<ClientsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    if !user.is_super_admin() {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Only super admins can delete clients")),
        )
            .into_response();
    }

    let Ok(client_id) = id.parse::<ClientId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid client ID")),
        )
            .into_response();
    };

    match handlers.clients.delete(&client_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(&e),
    }
}
