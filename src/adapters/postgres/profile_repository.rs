//! PostgreSQL implementation of ProfileRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::directory::Profile;
use crate::domain::foundation::{
    AccessLevel, ClientId, DomainError, ErrorCode, ProfileId, Timestamp,
};
use crate::ports::ProfileRepository;

/// PostgreSQL implementation of the ProfileRepository port.
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a profile.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    client_id: Uuid,
    name: String,
    email: String,
    username: String,
    industry: Option<String>,
    access_level: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let access_level: AccessLevel = row.access_level.parse().map_err(|e| {
            DomainError::database(format!("Invalid access_level value: {}", e))
        })?;

        Ok(Profile {
            id: ProfileId::from_uuid(row.id),
            client_id: ClientId::from_uuid(row.client_id),
            name: row.name,
            email: row.email,
            username: row.username,
            industry: row.industry,
            access_level,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, client_id, name, email, username, industry, access_level, created_at, updated_at";

const INSERT_SQL: &str = r#"
    INSERT INTO profiles (
        id, client_id, name, email, username, industry, access_level, created_at, updated_at
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
"#;

fn map_insert_error(e: sqlx::Error, email: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("profiles_client_id_email_key") {
            return DomainError::new(
                ErrorCode::DuplicateEmail,
                format!("A profile with email '{}' already exists", email),
            );
        }
        if db_err.constraint() == Some("profiles_client_id_username_key") {
            return DomainError::new(
                ErrorCode::DuplicateName,
                "A profile with this username already exists",
            );
        }
    }
    DomainError::database(format!("Failed to save profile: {}", e))
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn save(&self, profile: &Profile) -> Result<(), DomainError> {
        sqlx::query(INSERT_SQL)
            .bind(profile.id.as_uuid())
            .bind(profile.client_id.as_uuid())
            .bind(&profile.name)
            .bind(&profile.email)
            .bind(&profile.username)
            .bind(&profile.industry)
            .bind(profile.access_level.as_str())
            .bind(profile.created_at.as_datetime())
            .bind(profile.updated_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, &profile.email))?;

        Ok(())
    }

    async fn save_all(&self, profiles: &[Profile]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {}", e)))?;

        for profile in profiles {
            sqlx::query(INSERT_SQL)
                .bind(profile.id.as_uuid())
                .bind(profile.client_id.as_uuid())
                .bind(&profile.name)
                .bind(&profile.email)
                .bind(&profile.username)
                .bind(&profile.industry)
                .bind(profile.access_level.as_str())
                .bind(profile.created_at.as_datetime())
                .bind(profile.updated_at.as_datetime())
                .execute(&mut *tx)
                .await
                .map_err(|e| map_insert_error(e, &profile.email))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit batch: {}", e)))?;

        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                name = $2, email = $3, username = $4, industry = $5,
                access_level = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.username)
        .bind(&profile.industry)
        .bind(profile.access_level.as_str())
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update profile: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ProfileNotFound, "Profile not found"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find profile: {}", e)))?;

        row.map(Profile::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE lower(email) = lower($1)",
            SELECT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find profile: {}", e)))?;

        row.map(Profile::try_from).transpose()
    }

    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Profile>, DomainError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE client_id = $1 ORDER BY name",
            SELECT_COLUMNS
        ))
        .bind(client_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list profiles: {}", e)))?;

        rows.into_iter().map(Profile::try_from).collect()
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete profile: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ProfileNotFound, "Profile not found"));
        }

        Ok(())
    }
}
