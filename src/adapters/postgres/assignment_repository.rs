//! PostgreSQL implementation of AssignmentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::assessment::{AssessmentKind, Assignment, AssignmentStatus};
use crate::domain::foundation::{
    AssignmentId, ClientId, DomainError, ErrorCode, ProfileId, Timestamp,
};
use crate::domain::scoring::RaterRelation;
use crate::ports::AssignmentRepository;

/// PostgreSQL implementation of the AssignmentRepository port.
pub struct PostgresAssignmentRepository {
    pool: PgPool,
}

impl PostgresAssignmentRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an assignment.
#[derive(Debug, sqlx::FromRow)]
struct AssignmentRow {
    id: Uuid,
    client_id: Uuid,
    profile_id: Uuid,
    target_profile_id: Uuid,
    kind: String,
    relation: String,
    status: String,
    expires_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = DomainError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        let kind: AssessmentKind = row
            .kind
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid kind value: {}", e)))?;
        let relation: RaterRelation = row
            .relation
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid relation value: {}", e)))?;
        let status: AssignmentStatus = row
            .status
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid status value: {}", e)))?;

        Ok(Assignment {
            id: AssignmentId::from_uuid(row.id),
            client_id: ClientId::from_uuid(row.client_id),
            profile_id: ProfileId::from_uuid(row.profile_id),
            target_profile_id: ProfileId::from_uuid(row.target_profile_id),
            kind,
            relation,
            status,
            expires_at: row.expires_at.map(Timestamp::from_datetime),
            completed_at: row.completed_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str = "id, client_id, profile_id, target_profile_id, kind, relation, \
                              status, expires_at, completed_at, created_at, updated_at";

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn save(&self, assignment: &Assignment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO assignments (
                id, client_id, profile_id, target_profile_id, kind, relation,
                status, expires_at, completed_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(assignment.id.as_uuid())
        .bind(assignment.client_id.as_uuid())
        .bind(assignment.profile_id.as_uuid())
        .bind(assignment.target_profile_id.as_uuid())
        .bind(assignment.kind.as_str())
        .bind(assignment.relation.as_str())
        .bind(assignment.status.as_str())
        .bind(assignment.expires_at.map(|t| *t.as_datetime()))
        .bind(assignment.completed_at.map(|t| *t.as_datetime()))
        .bind(assignment.created_at.as_datetime())
        .bind(assignment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save assignment: {}", e)))?;

        Ok(())
    }

    async fn update(&self, assignment: &Assignment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE assignments SET
                status = $2, expires_at = $3, completed_at = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(assignment.id.as_uuid())
        .bind(assignment.status.as_str())
        .bind(assignment.expires_at.map(|t| *t.as_datetime()))
        .bind(assignment.completed_at.map(|t| *t.as_datetime()))
        .bind(assignment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update assignment: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &AssignmentId) -> Result<Option<Assignment>, DomainError> {
        let row: Option<AssignmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM assignments WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find assignment: {}", e)))?;

        row.map(Assignment::try_from).transpose()
    }

    async fn list_by_rater(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Vec<Assignment>, DomainError> {
        let rows: Vec<AssignmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM assignments WHERE profile_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(profile_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list assignments: {}", e)))?;

        rows.into_iter().map(Assignment::try_from).collect()
    }

    async fn list_by_target(
        &self,
        target_id: &ProfileId,
    ) -> Result<Vec<Assignment>, DomainError> {
        let rows: Vec<AssignmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM assignments WHERE target_profile_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(target_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list assignments: {}", e)))?;

        rows.into_iter().map(Assignment::try_from).collect()
    }

    async fn list_by_client(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<Assignment>, DomainError> {
        let rows: Vec<AssignmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM assignments WHERE client_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(client_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list assignments: {}", e)))?;

        rows.into_iter().map(Assignment::try_from).collect()
    }

    async fn delete(&self, id: &AssignmentId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete assignment: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            ));
        }

        Ok(())
    }
}
