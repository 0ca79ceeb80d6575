//! HTTP handlers for profile endpoints, including CSV bulk upload.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bulk_error_response, domain_error_response, ErrorBody};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::upload::parse_user_csv;
use crate::application::handlers::directory::{
    BulkUploadProfilesCommand, BulkUploadProfilesError, BulkUploadProfilesHandler,
};
use crate::domain::directory::Profile;
use crate::domain::foundation::{ClientId, ProfileId};
use crate::ports::ProfileRepository;

use super::dto::{
    BulkUploadResponse, CreateProfileRequest, ListProfilesQuery, ProfileResponse,
    UpdateProfileRequest,
};

/// Shared state for profile endpoints.
#[derive(Clone)]
pub struct ProfilesHandlers {
    pub profiles: Arc<dyn ProfileRepository>,
    pub bulk_upload: Arc<BulkUploadProfilesHandler>,
}

impl ProfilesHandlers {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        bulk_upload: Arc<BulkUploadProfilesHandler>,
    ) -> Self {
        Self {
            profiles,
            bulk_upload,
        }
    }
}

/// GET /api/profiles?client_id= - list profiles of one client
pub async fn list_profiles(
    State(handlers): State<ProfilesHandlers>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ListProfilesQuery>,
) -> Response {
    // Default scope is the caller's own client.
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

    if !user.is_super_admin() && user.client_id != Some(client_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Not a member of this client")),
        )
            .into_response();
    }

    match handlers.profiles.list_by_client(&client_id).await {
        Ok(profiles) => {
            let body: Vec<ProfileResponse> = profiles.iter().map(ProfileResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/profiles - create one profile (admins)
pub async fn create_profile(
    State(handlers): State<ProfilesHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateProfileRequest>,
) -> Response {
    let Ok(client_id) = req.client_id.parse::<ClientId>() else {
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

    let profile = match Profile::new(client_id, req.name, req.email, req.username, req.industry) {
        Ok(profile) => profile,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorBody::bad_request(e.to_string())))
                .into_response()
        }
    };

    match handlers.profiles.save(&profile).await {
        Ok(()) => (StatusCode::CREATED, Json(ProfileResponse::from(&profile))).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/profiles/bulk - CSV bulk upload (admins)
///
/// Body is the raw CSV text (columns: Name, Email, Username, Industry,
/// Client Name). All row errors come back together in a 400.
pub async fn bulk_upload_profiles(
    State(handlers): State<ProfilesHandlers>,
    RequireAuth(user): RequireAuth,
    body: String,
) -> Response {
    if !user.access_level.is_admin() {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Only admins can bulk upload")),
        )
            .into_response();
    }

    let rows = match parse_user_csv(&body) {
        Ok(rows) => rows,
        Err(e) => return bulk_error_response(&e),
    };

    match handlers
        .bulk_upload
        .handle(BulkUploadProfilesCommand { rows })
        .await
    {
        Ok(result) => (
            StatusCode::CREATED,
            Json(BulkUploadResponse {
                created: result.created,
            }),
        )
            .into_response(),
        Err(BulkUploadProfilesError::Invalid(e)) => bulk_error_response(&e),
        Err(BulkUploadProfilesError::Internal(e)) => domain_error_response(&e),
    }
}

/// GET /api/profiles/:id - fetch one profile
pub async fn get_profile(
    State(handlers): State<ProfilesHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let Ok(profile_id) = id.parse::<ProfileId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid profile ID")),
        )
            .into_response();
    };

    match handlers.profiles.find_by_id(&profile_id).await {
        Ok(Some(profile)) => {
            if !user.can_act_for(&profile.id, &profile.client_id) {
                return (
                    StatusCode::FORBIDDEN,
                    Json(ErrorBody::forbidden("Not allowed to view this profile")),
                )
                    .into_response();
            }
            (StatusCode::OK, Json(ProfileResponse::from(&profile))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Profile"))).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// PATCH /api/profiles/:id - update name/industry/access level (admins)
pub async fn update_profile(
    State(handlers): State<ProfilesHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> Response {
    let Ok(profile_id) = id.parse::<ProfileId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid profile ID")),
        )
            .into_response();
    };

    let mut profile = match handlers.profiles.find_by_id(&profile_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Profile")))
                .into_response()
        }
        Err(e) => return domain_error_response(&e),
    };

    if !user.can_manage_client(&profile.client_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Not allowed to manage this profile")),
        )
            .into_response();
    }

    if let Some(name) = req.name {
        if name.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::bad_request("Name cannot be empty")),
            )
                .into_response();
        }
        profile.name = name;
    }
    if let Some(industry) = req.industry {
        let industry = industry.trim().to_lowercase();
        profile.industry = (!industry.is_empty()).then_some(industry);
    }
    if let Some(level) = req.access_level {
        // Only super admins mint other admins.
        if level > user.access_level {
            return (
                StatusCode::FORBIDDEN,
                Json(ErrorBody::forbidden("Cannot grant a level above your own")),
            )
                .into_response();
        }
        profile.set_access_level(level);
    }

    match handlers.profiles.update(&profile).await {
        Ok(()) => (StatusCode::OK, Json(ProfileResponse::from(&profile))).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// DELETE /api/profiles/:id - delete a profile (admins)
pub async fn delete_profile(
    State(handlers): State<ProfilesHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let Ok(profile_id) = id.parse::<ProfileId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid profile ID")),
        )
            .into_response();
    };

    let profile = match handlers.profiles.find_by_id(&profile_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Profile")))
                .into_response()
        }
        Err(e) => return domain_error_response(&e),
    };

    if !user.can_manage_client(&profile.client_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Not allowed to manage this profile")),
        )
            .into_response();
    }

    match handlers.profiles.delete(&profile_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(&e),
    }
}
