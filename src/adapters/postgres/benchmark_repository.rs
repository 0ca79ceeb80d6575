//! PostgreSQL implementation of BenchmarkRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::assessment::{Benchmark, Dimension};
use crate::domain::foundation::{DimensionId, DomainError};
use crate::ports::BenchmarkRepository;

/// PostgreSQL implementation of the BenchmarkRepository port.
///
/// The benchmark table is small and effectively static - it is seeded per
/// industry and only super admins touch it.
pub struct PostgresBenchmarkRepository {
    pool: PgPool,
}

impl PostgresBenchmarkRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a benchmark.
#[derive(Debug, sqlx::FromRow)]
struct BenchmarkRow {
    industry: String,
    dimension_id: Uuid,
    score: f64,
}

impl From<BenchmarkRow> for Benchmark {
    fn from(row: BenchmarkRow) -> Self {
        Benchmark {
            industry: row.industry,
            dimension_id: DimensionId::from_uuid(row.dimension_id),
            score: row.score,
        }
    }
}

#[async_trait]
impl BenchmarkRepository for PostgresBenchmarkRepository {
    async fn upsert(&self, benchmark: &Benchmark) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO benchmarks (industry, dimension_id, score)
            VALUES ($1, $2, $3)
            ON CONFLICT (industry, dimension_id) DO UPDATE SET score = EXCLUDED.score
            "#,
        )
        .bind(&benchmark.industry)
        .bind(benchmark.dimension_id.as_uuid())
        .bind(benchmark.score)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to upsert benchmark: {}", e)))?;

        Ok(())
    }

    async fn find(
        &self,
        industry: &str,
        dimension_id: &DimensionId,
    ) -> Result<Option<Benchmark>, DomainError> {
        let row: Option<BenchmarkRow> = sqlx::query_as(
            r#"
            SELECT industry, dimension_id, score
            FROM benchmarks
            WHERE industry = $1 AND dimension_id = $2
            "#,
        )
        .bind(industry)
        .bind(dimension_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find benchmark: {}", e)))?;

        Ok(row.map(Benchmark::from))
    }

    async fn list_by_industry(&self, industry: &str) -> Result<Vec<Benchmark>, DomainError> {
        let rows: Vec<BenchmarkRow> = sqlx::query_as(
            r#"
            SELECT industry, dimension_id, score
            FROM benchmarks
            WHERE industry = $1
            ORDER BY dimension_id
            "#,
        )
        .bind(industry)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list benchmarks: {}", e)))?;

        Ok(rows.into_iter().map(Benchmark::from).collect())
    }

    async fn list_dimensions(&self) -> Result<Vec<Dimension>, DomainError> {
        let rows: Vec<(Uuid, String, Option<String>)> =
            sqlx::query_as("SELECT id, name, description FROM dimensions ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to list dimensions: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(id, name, description)| Dimension {
                id: DimensionId::from_uuid(id),
                name,
                description,
            })
            .collect())
    }
}
