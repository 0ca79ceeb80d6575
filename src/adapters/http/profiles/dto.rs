//! HTTP DTOs for profile endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::directory::Profile;
use crate::domain::foundation::AccessLevel;

/// Request to create a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfileRequest {
    pub client_id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub industry: Option<String>,
}

/// Request to update a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub access_level: Option<AccessLevel>,
}

/// Query parameters for listing profiles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProfilesQuery {
    pub client_id: Option<String>,
}

/// Profile representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub industry: Option<String>,
    pub access_level: AccessLevel,
    pub created_at: String,
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            client_id: profile.client_id.to_string(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            username: profile.username.clone(),
            industry: profile.industry.clone(),
            access_level: profile.access_level,
            created_at: profile.created_at.to_string(),
        }
    }
}

/// Result body of a bulk upload.
#[derive(Debug, Clone, Serialize)]
pub struct BulkUploadResponse {
    pub created: usize,
}
