//! Group aggregate entity.
//!
//! Groups partition a client's profiles into peer sets. A target's
//! geonorm is computed from the scores of the other members of the
//! groups they belong to.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, GroupId, Timestamp, ValidationError};

/// Group aggregate - a named peer set within a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier for this group.
    pub id: GroupId,

    /// Owning client organization.
    pub client_id: ClientId,

    /// Group name, unique within the client.
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// When the group was created.
    pub created_at: Timestamp,

    /// When the group was last updated.
    pub updated_at: Timestamp,
}

impl Group {
    /// Create a new group.
    pub fn new(
        client_id: ClientId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let description = description.filter(|d| !d.trim().is_empty());
        let now = Timestamp::now();
        Ok(Self {
            id: GroupId::new(),
            client_id,
            name,
            description,
            created_at: now,
            updated_at: now,
        })
    }
}
