//! Client repository port.

use async_trait::async_trait;

use crate::domain::directory::Client;
use crate::domain::foundation::{ClientId, DomainError};

/// Persistent storage for [`Client`] aggregates.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn save(&self, client: &Client) -> Result<(), DomainError>;

    async fn update(&self, client: &Client) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError>;

    /// Case-insensitive lookup by organization name, used by bulk uploads.
    async fn find_by_name(&self, name: &str) -> Result<Option<Client>, DomainError>;

    async fn list_all(&self) -> Result<Vec<Client>, DomainError>;

    async fn delete(&self, id: &ClientId) -> Result<(), DomainError>;
}
