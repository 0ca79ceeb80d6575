//! PostgreSQL implementation of the ScoringReader port.
//!
//! Assembles the full aggregator input for one target in a handful of
//! read-only queries: answers joined with dimensions and relations,
//! the industry benchmark table, same-group peer scores, and feedback.
//! Only completed assignments count toward a report.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::foundation::{DimensionId, DomainError, ProfileId};
use crate::domain::scoring::{RaterRelation, ReportInput, ScoredAnswer};
use crate::ports::ScoringReader;

/// PostgreSQL implementation of the ScoringReader port.
pub struct PostgresScoringReader {
    pool: PgPool,
}

impl PostgresScoringReader {
    /// Creates a new reader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TargetRow {
    name: String,
    industry: String,
}

#[derive(Debug, sqlx::FromRow)]
struct AnswerJoinRow {
    dimension_id: Uuid,
    dimension_name: String,
    rating: i16,
    relation: String,
}

#[async_trait]
impl ScoringReader for PostgresScoringReader {
    async fn report_input(
        &self,
        target_id: &ProfileId,
    ) -> Result<Option<ReportInput>, DomainError> {
        // Target display name and effective industry (profile override,
        // client industry otherwise).
        let target: Option<TargetRow> = sqlx::query_as(
            r#"
            SELECT p.name, COALESCE(p.industry, c.industry) AS industry
            FROM profiles p
            JOIN clients c ON c.id = p.client_id
            WHERE p.id = $1
            "#,
        )
        .bind(target_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load target: {}", e)))?;

        let Some(target) = target else {
            return Ok(None);
        };

        let answer_rows: Vec<AnswerJoinRow> = sqlx::query_as(
            r#"
            SELECT a.dimension_id, d.name AS dimension_name, a.rating, s.relation
            FROM answers a
            JOIN assignments s ON s.id = a.assignment_id
            JOIN dimensions d ON d.id = a.dimension_id
            WHERE s.target_profile_id = $1 AND s.status = 'completed'
            "#,
        )
        .bind(target_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load answers: {}", e)))?;

        let answers = answer_rows
            .into_iter()
            .map(|row| {
                let relation: RaterRelation = row.relation.parse().map_err(|e| {
                    DomainError::database(format!("Invalid relation value: {}", e))
                })?;
                let rating = u8::try_from(row.rating).map_err(|_| {
                    DomainError::database(format!("Invalid rating value: {}", row.rating))
                })?;
                Ok(ScoredAnswer {
                    dimension_id: DimensionId::from_uuid(row.dimension_id),
                    dimension_name: row.dimension_name,
                    rating,
                    relation,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let benchmark_rows: Vec<(Uuid, f64)> = sqlx::query_as(
            "SELECT dimension_id, score FROM benchmarks WHERE industry = $1",
        )
        .bind(&target.industry)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load benchmarks: {}", e)))?;

        let benchmarks: HashMap<DimensionId, f64> = benchmark_rows
            .into_iter()
            .map(|(id, score)| (DimensionId::from_uuid(id), score))
            .collect();

        // Geonorm inputs: one per-dimension score per same-group peer,
        // averaged over that peer's own completed assignments.
        let peer_rows: Vec<(Uuid, f64)> = sqlx::query_as(
            r#"
            SELECT a.dimension_id, AVG(a.rating)::float8 AS score
            FROM answers a
            JOIN assignments s ON s.id = a.assignment_id
            WHERE s.status = 'completed'
              AND s.target_profile_id IN (
                  SELECT gm2.profile_id
                  FROM group_members gm1
                  JOIN group_members gm2 ON gm2.group_id = gm1.group_id
                  WHERE gm1.profile_id = $1 AND gm2.profile_id <> $1
              )
            GROUP BY a.dimension_id, s.target_profile_id
            "#,
        )
        .bind(target_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load peer scores: {}", e)))?;

        let mut peer_scores: HashMap<DimensionId, Vec<f64>> = HashMap::new();
        for (dimension_id, score) in peer_rows {
            peer_scores
                .entry(DimensionId::from_uuid(dimension_id))
                .or_default()
                .push(score);
        }

        let feedback: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT f.body
            FROM feedback f
            JOIN assignments s ON s.id = f.assignment_id
            WHERE s.target_profile_id = $1 AND s.status = 'completed'
            ORDER BY f.created_at
            "#,
        )
        .bind(target_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load feedback: {}", e)))?;

        Ok(Some(ReportInput {
            target_id: *target_id,
            target_name: target.name,
            industry: target.industry,
            answers,
            benchmarks,
            peer_scores,
            feedback: feedback.into_iter().map(|(body,)| body).collect(),
        }))
    }
}
