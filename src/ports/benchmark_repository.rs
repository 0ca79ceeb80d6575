//! Benchmark repository port.

use async_trait::async_trait;

use crate::domain::assessment::{Benchmark, Dimension};
use crate::domain::foundation::{DimensionId, DomainError};

/// Persistent storage for the dimension catalog and industry
/// [`Benchmark`] reference scores.
#[async_trait]
pub trait BenchmarkRepository: Send + Sync {
    /// Insert or replace the benchmark for (industry, dimension).
    async fn upsert(&self, benchmark: &Benchmark) -> Result<(), DomainError>;

    async fn find(
        &self,
        industry: &str,
        dimension_id: &DimensionId,
    ) -> Result<Option<Benchmark>, DomainError>;

    async fn list_by_industry(&self, industry: &str) -> Result<Vec<Benchmark>, DomainError>;

    /// The scored-dimension catalog, seeded by migrations.
    async fn list_dimensions(&self) -> Result<Vec<Dimension>, DomainError>;
}
