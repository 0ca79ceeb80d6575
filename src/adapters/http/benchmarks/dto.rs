//! HTTP DTOs for benchmark endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{Benchmark, Dimension};

/// Request to upsert one benchmark value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertBenchmarkRequest {
    pub industry: String,
    pub dimension_id: String,
    pub score: f64,
}

/// Query parameters for listing benchmarks.
#[derive(Debug, Clone, Deserialize)]
pub struct ListBenchmarksQuery {
    pub industry: String,
}

/// Benchmark representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkResponse {
    pub industry: String,
    pub dimension_id: String,
    pub score: f64,
}

impl From<&Benchmark> for BenchmarkResponse {
    fn from(benchmark: &Benchmark) -> Self {
        Self {
            industry: benchmark.industry.clone(),
            dimension_id: benchmark.dimension_id.to_string(),
            score: benchmark.score,
        }
    }
}

/// Dimension catalog entry returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Dimension> for DimensionResponse {
    fn from(dimension: &Dimension) -> Self {
        Self {
            id: dimension.id.to_string(),
            name: dimension.name.clone(),
            description: dimension.description.clone(),
        }
    }
}
