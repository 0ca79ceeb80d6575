//! HTTP DTOs for group endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::directory::Group;

/// Request to create a group.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroupRequest {
    pub client_id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Request to update a group.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Request to add one member to a group.
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    pub profile_id: String,
}

/// Query parameters for listing groups.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListGroupsQuery {
    pub client_id: Option<String>,
}

/// Group representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<&Group> for GroupResponse {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.to_string(),
            client_id: group.client_id.to_string(),
            name: group.name.clone(),
            description: group.description.clone(),
            created_at: group.created_at.to_string(),
        }
    }
}

/// Member list returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct MembersResponse {
    pub profile_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ClientId;

    #[test]
    fn create_request_deserializes() {
        let json = r#"{
            "client_id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Engineering"
        }"#;
        let req: CreateGroupRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Engineering");
        assert_eq!(req.description, None);
    }

    #[test]
    fn group_response_maps_fields() {
        let group = Group::new(ClientId::new(), "Engineering", None).unwrap();
        let response = GroupResponse::from(&group);
        assert_eq!(response.name, "Engineering");
        assert_eq!(response.client_id, group.client_id.to_string());
    }
}
