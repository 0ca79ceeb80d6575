//! HTTP handlers for group endpoints, including CSV bulk upload and
//! membership management.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bulk_error_response, domain_error_response, ErrorBody};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::upload::parse_group_csv;
use crate::application::handlers::directory::{
    BulkUploadGroupsCommand, BulkUploadGroupsError, BulkUploadGroupsHandler,
};
use crate::domain::directory::Group;
use crate::domain::foundation::{ClientId, GroupId, ProfileId};
use crate::ports::GroupRepository;

use super::dto::{
    AddMemberRequest, CreateGroupRequest, GroupResponse, ListGroupsQuery, MembersResponse,
    UpdateGroupRequest,
};

/// Shared state for group endpoints.
#[derive(Clone)]
pub struct GroupsHandlers {
    pub groups: Arc<dyn GroupRepository>,
    pub bulk_upload: Arc<BulkUploadGroupsHandler>,
}

impl GroupsHandlers {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        bulk_upload: Arc<BulkUploadGroupsHandler>,
    ) -> Self {
        Self {
            groups,
            bulk_upload,
        }
    }
}

/// GET /api/groups?client_id= - list groups of one client
pub async fn list_groups(
    State(handlers): State<GroupsHandlers>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ListGroupsQuery>,
) -> Response {
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

    match handlers.groups.list_by_client(&client_id).await {
        Ok(groups) => {
            let body: Vec<GroupResponse> = groups.iter().map(GroupResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/groups - create one group (admins)
pub async fn create_group(
    State(handlers): State<GroupsHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateGroupRequest>,
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

    let group = match Group::new(client_id, req.name, req.description) {
        Ok(group) => group,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorBody::bad_request(e.to_string())))
                .into_response()
        }
    };

    match handlers.groups.save(&group).await {
        Ok(()) => (StatusCode::CREATED, Json(GroupResponse::from(&group))).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/groups/bulk - CSV bulk upload (admins)
///
/// Body is the raw CSV text (columns: Name, Description, Client Name).
pub async fn bulk_upload_groups(
    State(handlers): State<GroupsHandlers>,
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

    let rows = match parse_group_csv(&body) {
        Ok(rows) => rows,
        Err(e) => return bulk_error_response(&e),
    };

    match handlers
        .bulk_upload
        .handle(BulkUploadGroupsCommand { rows })
        .await
    {
        Ok(result) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "created": result.created })),
        )
            .into_response(),
        Err(BulkUploadGroupsError::Invalid(e)) => bulk_error_response(&e),
        Err(BulkUploadGroupsError::Internal(e)) => domain_error_response(&e),
    }
}

/// GET /api/groups/:id - fetch one group
pub async fn get_group(
    State(handlers): State<GroupsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let Ok(group_id) = id.parse::<GroupId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid group ID")),
        )
            .into_response();
    };

    match handlers.groups.find_by_id(&group_id).await {
        Ok(Some(group)) => {
            if !user.is_super_admin() && user.client_id != Some(group.client_id) {
                return (
                    StatusCode::FORBIDDEN,
                    Json(ErrorBody::forbidden("Not a member of this client")),
                )
                    .into_response();
            }
            (StatusCode::OK, Json(GroupResponse::from(&group))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Group"))).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// PATCH /api/groups/:id - update name/description (admins)
pub async fn update_group(
    State(handlers): State<GroupsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateGroupRequest>,
) -> Response {
    let Ok(group_id) = id.parse::<GroupId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid group ID")),
        )
            .into_response();
    };

    let mut group = match handlers.groups.find_by_id(&group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Group"))).into_response()
        }
        Err(e) => return domain_error_response(&e),
    };

    if !user.can_manage_client(&group.client_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Not allowed to manage this group")),
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
        group.name = name;
    }
    if let Some(description) = req.description {
        group.description = (!description.trim().is_empty()).then_some(description);
    }

    match handlers.groups.update(&group).await {
        Ok(()) => (StatusCode::OK, Json(GroupResponse::from(&group))).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// DELETE /api/groups/:id - delete a group (admins)
pub async fn delete_group(
    State(handlers): State<GroupsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let Ok(group_id) = id.parse::<GroupId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid group ID")),
        )
            .into_response();
    };

    let group = match handlers.groups.find_by_id(&group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Group"))).into_response()
        }
        Err(e) => return domain_error_response(&e),
    };

    if !user.can_manage_client(&group.client_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Not allowed to manage this group")),
        )
            .into_response();
    }

    match handlers.groups.delete(&group_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/groups/:id/members - list member profile ids
pub async fn list_members(
    State(handlers): State<GroupsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let Ok(group_id) = id.parse::<GroupId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid group ID")),
        )
            .into_response();
    };

    let group = match handlers.groups.find_by_id(&group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Group"))).into_response()
        }
        Err(e) => return domain_error_response(&e),
    };

    if !user.is_super_admin() && user.client_id != Some(group.client_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Not a member of this client")),
        )
            .into_response();
    }

    match handlers.groups.list_members(&group_id).await {
        Ok(members) => (
            StatusCode::OK,
            Json(MembersResponse {
                profile_ids: members.iter().map(ProfileId::to_string).collect(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/groups/:id/members - add a member (admins)
pub async fn add_member(
    State(handlers): State<GroupsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Response {
    let Ok(group_id) = id.parse::<GroupId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid group ID")),
        )
            .into_response();
    };
    let Ok(profile_id) = req.profile_id.parse::<ProfileId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid profile ID")),
        )
            .into_response();
    };

    let group = match handlers.groups.find_by_id(&group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Group"))).into_response()
        }
        Err(e) => return domain_error_response(&e),
    };

    if !user.can_manage_client(&group.client_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Not allowed to manage this group")),
        )
            .into_response();
    }

    match handlers.groups.add_member(&group_id, &profile_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// DELETE /api/groups/:id/members/:profile_id - remove a member (admins)
pub async fn remove_member(
    State(handlers): State<GroupsHandlers>,
    RequireAuth(user): RequireAuth,
    Path((id, member)): Path<(String, String)>,
) -> Response {
    let (Ok(group_id), Ok(profile_id)) = (id.parse::<GroupId>(), member.parse::<ProfileId>())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid identifier")),
        )
            .into_response();
    };

    let group = match handlers.groups.find_by_id(&group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Json(ErrorBody::not_found("Group"))).into_response()
        }
        Err(e) => return domain_error_response(&e),
    };

    if !user.can_manage_client(&group.client_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Not allowed to manage this group")),
        )
            .into_response();
    }

    match handlers.groups.remove_member(&group_id, &profile_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(&e),
    }
}
