//! PostgreSQL implementations of AnswerRepository and FeedbackRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::assessment::{Answer, Feedback, Rating};
use crate::domain::foundation::{
    AnswerId, AssignmentId, DimensionId, DomainError, ErrorCode, FeedbackId, Timestamp,
};
use crate::ports::{AnswerRepository, FeedbackRepository};

/// PostgreSQL implementation of the AnswerRepository port.
pub struct PostgresAnswerRepository {
    pool: PgPool,
}

impl PostgresAnswerRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an answer.
#[derive(Debug, sqlx::FromRow)]
struct AnswerRow {
    id: Uuid,
    assignment_id: Uuid,
    dimension_id: Uuid,
    rating: i16,
    created_at: DateTime<Utc>,
}

impl TryFrom<AnswerRow> for Answer {
    type Error = DomainError;

    fn try_from(row: AnswerRow) -> Result<Self, Self::Error> {
        let rating = u8::try_from(row.rating)
            .ok()
            .and_then(|v| Rating::try_new(v).ok())
            .ok_or_else(|| {
                DomainError::database(format!("Invalid rating value: {}", row.rating))
            })?;

        Ok(Answer {
            id: AnswerId::from_uuid(row.id),
            assignment_id: AssignmentId::from_uuid(row.assignment_id),
            dimension_id: DimensionId::from_uuid(row.dimension_id),
            rating,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl AnswerRepository for PostgresAnswerRepository {
    async fn save_all(&self, answers: &[Answer]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {}", e)))?;

        for answer in answers {
            sqlx::query(
                r#"
                INSERT INTO answers (id, assignment_id, dimension_id, rating, created_at)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (assignment_id, dimension_id)
                DO UPDATE SET rating = EXCLUDED.rating, created_at = EXCLUDED.created_at
                "#,
            )
            .bind(answer.id.as_uuid())
            .bind(answer.assignment_id.as_uuid())
            .bind(answer.dimension_id.as_uuid())
            .bind(i16::from(answer.rating.value()))
            .bind(answer.created_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.constraint() == Some("answers_dimension_id_fkey") {
                        return DomainError::new(
                            ErrorCode::DimensionNotFound,
                            "Dimension not found",
                        );
                    }
                }
                DomainError::database(format!("Failed to save answer: {}", e))
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit answers: {}", e)))?;

        Ok(())
    }

    async fn list_by_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<Answer>, DomainError> {
        let rows: Vec<AnswerRow> = sqlx::query_as(
            r#"
            SELECT id, assignment_id, dimension_id, rating, created_at
            FROM answers
            WHERE assignment_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(assignment_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list answers: {}", e)))?;

        rows.into_iter().map(Answer::try_from).collect()
    }
}

/// PostgreSQL implementation of the FeedbackRepository port.
pub struct PostgresFeedbackRepository {
    pool: PgPool,
}

impl PostgresFeedbackRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a feedback entry.
#[derive(Debug, sqlx::FromRow)]
struct FeedbackRow {
    id: Uuid,
    assignment_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<FeedbackRow> for Feedback {
    fn from(row: FeedbackRow) -> Self {
        Feedback {
            id: FeedbackId::from_uuid(row.id),
            assignment_id: AssignmentId::from_uuid(row.assignment_id),
            body: row.body,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepository {
    async fn save(&self, feedback: &Feedback) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO feedback (id, assignment_id, body, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(feedback.id.as_uuid())
        .bind(feedback.assignment_id.as_uuid())
        .bind(&feedback.body)
        .bind(feedback.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save feedback: {}", e)))?;

        Ok(())
    }

    async fn list_by_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<Feedback>, DomainError> {
        let rows: Vec<FeedbackRow> = sqlx::query_as(
            r#"
            SELECT id, assignment_id, body, created_at
            FROM feedback
            WHERE assignment_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(assignment_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list feedback: {}", e)))?;

        Ok(rows.into_iter().map(Feedback::from).collect())
    }
}
