//! PostgreSQL implementation of GroupRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::directory::Group;
use crate::domain::foundation::{ClientId, DomainError, ErrorCode, GroupId, ProfileId, Timestamp};
use crate::ports::GroupRepository;

/// PostgreSQL implementation of the GroupRepository port.
///
/// Group membership lives in the `group_members` join table; removal of a
/// group cascades through the schema's foreign keys.
pub struct PostgresGroupRepository {
    pool: PgPool,
}

impl PostgresGroupRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a group.
#[derive(Debug, sqlx::FromRow)]
struct GroupRow {
    id: Uuid,
    client_id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Group {
            id: GroupId::from_uuid(row.id),
            client_id: ClientId::from_uuid(row.client_id),
            name: row.name,
            description: row.description,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const SELECT_COLUMNS: &str = "id, client_id, name, description, created_at, updated_at";

const INSERT_SQL: &str = r#"
    INSERT INTO groups (id, client_id, name, description, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6)
"#;

fn map_insert_error(e: sqlx::Error, name: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("groups_client_id_name_key") {
            return DomainError::new(
                ErrorCode::DuplicateName,
                format!("A group named '{}' already exists for this client", name),
            );
        }
    }
    DomainError::database(format!("Failed to save group: {}", e))
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn save(&self, group: &Group) -> Result<(), DomainError> {
        sqlx::query(INSERT_SQL)
            .bind(group.id.as_uuid())
            .bind(group.client_id.as_uuid())
            .bind(&group.name)
            .bind(&group.description)
            .bind(group.created_at.as_datetime())
            .bind(group.updated_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, &group.name))?;

        Ok(())
    }

    async fn save_all(&self, groups: &[Group]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {}", e)))?;

        for group in groups {
            sqlx::query(INSERT_SQL)
                .bind(group.id.as_uuid())
                .bind(group.client_id.as_uuid())
                .bind(&group.name)
                .bind(&group.description)
                .bind(group.created_at.as_datetime())
                .bind(group.updated_at.as_datetime())
                .execute(&mut *tx)
                .await
                .map_err(|e| map_insert_error(e, &group.name))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit batch: {}", e)))?;

        Ok(())
    }

    async fn update(&self, group: &Group) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE groups SET name = $2, description = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(group.id.as_uuid())
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update group: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::GroupNotFound, "Group not found"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
        let row: Option<GroupRow> = sqlx::query_as(&format!(
            "SELECT {} FROM groups WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find group: {}", e)))?;

        Ok(row.map(Group::from))
    }

    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Group>, DomainError> {
        let rows: Vec<GroupRow> = sqlx::query_as(&format!(
            "SELECT {} FROM groups WHERE client_id = $1 ORDER BY name",
            SELECT_COLUMNS
        ))
        .bind(client_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list groups: {}", e)))?;

        Ok(rows.into_iter().map(Group::from).collect())
    }

    async fn add_member(
        &self,
        group_id: &GroupId,
        profile_id: &ProfileId,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, profile_id)
            VALUES ($1, $2)
            ON CONFLICT (group_id, profile_id) DO NOTHING
            "#,
        )
        .bind(group_id.as_uuid())
        .bind(profile_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("group_members_group_id_fkey") {
                    return DomainError::new(ErrorCode::GroupNotFound, "Group not found");
                }
                if db_err.constraint() == Some("group_members_profile_id_fkey") {
                    return DomainError::new(ErrorCode::ProfileNotFound, "Profile not found");
                }
            }
            DomainError::database(format!("Failed to add group member: {}", e))
        })?;

        Ok(())
    }

    async fn remove_member(
        &self,
        group_id: &GroupId,
        profile_id: &ProfileId,
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM group_members WHERE group_id = $1 AND profile_id = $2")
            .bind(group_id.as_uuid())
            .bind(profile_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to remove group member: {}", e)))?;

        Ok(())
    }

    async fn list_members(&self, group_id: &GroupId) -> Result<Vec<ProfileId>, DomainError> {
        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT profile_id FROM group_members WHERE group_id = $1")
                .bind(group_id.as_uuid())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to list group members: {}", e))
                })?;

        Ok(rows.into_iter().map(|(id,)| ProfileId::from_uuid(id)).collect())
    }

    async fn delete(&self, id: &GroupId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete group: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::GroupNotFound, "Group not found"));
        }

        Ok(())
    }
}
