//! HTTP DTOs for client endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::directory::Client;

/// Request to create a client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub industry: String,
}

/// Request to update a client.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub industry: Option<String>,
}

/// Client representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ClientResponse {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.to_string(),
            name: client.name.clone(),
            industry: client.industry.clone(),
            created_at: client.created_at.to_string(),
            updated_at: client.updated_at.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_deserializes() {
        let json = r#"{"name": "Acme Corp", "industry": "technology"}"#;
        let req: CreateClientRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Acme Corp");
        assert_eq!(req.industry, "technology");
    }

    #[test]
    fn update_request_allows_partial_fields() {
        let req: UpdateClientRequest = serde_json::from_str(r#"{"name": "Acme"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Acme"));
        assert_eq!(req.industry, None);
    }

    #[test]
    fn client_response_maps_fields() {
        let client = Client::new("Acme Corp", "technology").unwrap();
        let response = ClientResponse::from(&client);
        assert_eq!(response.name, "Acme Corp");
        assert_eq!(response.id, client.id.to_string());
    }
}
