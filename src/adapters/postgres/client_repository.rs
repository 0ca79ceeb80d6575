//! PostgreSQL implementation of ClientRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::directory::Client;
use crate::domain::foundation::{ClientId, DomainError, ErrorCode, Timestamp};
use crate::ports::ClientRepository;

/// PostgreSQL implementation of the ClientRepository port.
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a client.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    name: String,
    industry: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: ClientId::from_uuid(row.id),
            name: row.name,
            industry: row.industry,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const SELECT_COLUMNS: &str = "id, name, industry, created_at, updated_at";

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn save(&self, client: &Client) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO clients (id, name, industry, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(client.id.as_uuid())
        .bind(&client.name)
        .bind(&client.industry)
        .bind(client.created_at.as_datetime())
        .bind(client.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("clients_name_key") {
                    return DomainError::new(
                        ErrorCode::DuplicateName,
                        format!("A client named '{}' already exists", client.name),
                    );
                }
            }
            DomainError::database(format!("Failed to save client: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, client: &Client) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE clients SET name = $2, industry = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(client.id.as_uuid())
        .bind(&client.name)
        .bind(&client.industry)
        .bind(client.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update client: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ClientNotFound, "Client not found"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        let row: Option<ClientRow> = sqlx::query_as(&format!(
            "SELECT {} FROM clients WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find client: {}", e)))?;

        Ok(row.map(Client::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Client>, DomainError> {
        let row: Option<ClientRow> = sqlx::query_as(&format!(
            "SELECT {} FROM clients WHERE lower(name) = lower($1)",
            SELECT_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find client: {}", e)))?;

        Ok(row.map(Client::from))
    }

    async fn list_all(&self) -> Result<Vec<Client>, DomainError> {
        let rows: Vec<ClientRow> = sqlx::query_as(&format!(
            "SELECT {} FROM clients ORDER BY name",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list clients: {}", e)))?;

        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn delete(&self, id: &ClientId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete client: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ClientNotFound, "Client not found"));
        }

        Ok(())
    }
}
