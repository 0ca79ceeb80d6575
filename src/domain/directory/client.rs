//! Client aggregate entity.
//!
//! A client is a tenant organization. Every profile, group, and assignment
//! belongs to exactly one client; the client's industry selects which
//! benchmark table its reports are compared against.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, Timestamp, ValidationError};

/// Client aggregate - a tenant organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier for this client.
    pub id: ClientId,

    /// Organization name, unique across the platform.
    pub name: String,

    /// Industry used for benchmark lookups, e.g. "technology".
    pub industry: String,

    /// When the client was created.
    pub created_at: Timestamp,

    /// When the client was last updated.
    pub updated_at: Timestamp,
}

impl Client {
    /// Create a new client.
    pub fn new(
        name: impl Into<String>,
        industry: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let industry = industry.into().trim().to_lowercase();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if industry.is_empty() {
            return Err(ValidationError::empty_field("industry"));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: ClientId::new(),
            name,
            industry,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rename the client.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        self.name = name;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client_normalizes_industry() {
        let client = Client::new("Acme Corp", "  Technology ").unwrap();
        assert_eq!(client.industry, "technology");
        assert_eq!(client.name, "Acme Corp");
    }

    #[test]
    fn new_client_rejects_empty_name() {
        assert!(Client::new("  ", "technology").is_err());
    }

    #[test]
    fn new_client_rejects_empty_industry() {
        assert!(Client::new("Acme Corp", "   ").is_err());
    }

    #[test]
    fn rename_updates_timestamp() {
        let mut client = Client::new("Acme Corp", "technology").unwrap();
        let before = client.updated_at;
        client.rename("Acme Holdings").unwrap();
        assert_eq!(client.name, "Acme Holdings");
        assert!(client.updated_at >= before);
    }

    #[test]
    fn rename_rejects_empty_name() {
        let mut client = Client::new("Acme Corp", "technology").unwrap();
        assert!(client.rename("").is_err());
    }
}
