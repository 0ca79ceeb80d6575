//! HTTP handlers for benchmark endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorBody};
use crate::adapters::http::middleware::RequireAuth;
use crate::domain::assessment::Benchmark;
use crate::domain::foundation::DimensionId;
use crate::ports::BenchmarkRepository;

use super::dto::{
    BenchmarkResponse, DimensionResponse, ListBenchmarksQuery, UpsertBenchmarkRequest,
};

/// Shared state for benchmark endpoints.
#[derive(Clone)]
pub struct BenchmarksHandlers {
    pub benchmarks: Arc<dyn BenchmarkRepository>,
}

impl BenchmarksHandlers {
    pub fn new(benchmarks: Arc<dyn BenchmarkRepository>) -> Self {
        Self { benchmarks }
    }
}

/// GET /api/benchmarks?industry= - list one industry's reference scores
pub async fn list_benchmarks(
    State(handlers): State<BenchmarksHandlers>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<ListBenchmarksQuery>,
) -> Response {
    let industry = query.industry.trim().to_lowercase();
    match handlers.benchmarks.list_by_industry(&industry).await {
        Ok(benchmarks) => {
            let body: Vec<BenchmarkResponse> =
                benchmarks.iter().map(BenchmarkResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/dimensions - the scored-dimension catalog
pub async fn list_dimensions(
    State(handlers): State<BenchmarksHandlers>,
    RequireAuth(_user): RequireAuth,
) -> Response {
    match handlers.benchmarks.list_dimensions().await {
        Ok(dimensions) => {
            let body: Vec<DimensionResponse> =
                dimensions.iter().map(DimensionResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => domain_error_response(&e),
    }
}

/// PUT /api/benchmarks - upsert one reference score (super admin)
pub async fn upsert_benchmark(
    State(handlers): State<BenchmarksHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<UpsertBenchmarkRequest>,
) -> Response {
    if !user.is_super_admin() {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::forbidden("Only super admins can edit benchmarks")),
        )
            .into_response();
    }

    let Ok(dimension_id) = req.dimension_id.parse::<DimensionId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid dimension ID")),
        )
            .into_response();
    };

    let benchmark = match Benchmark::new(req.industry, dimension_id, req.score) {
        Ok(benchmark) => benchmark,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorBody::bad_request(e.to_string())))
                .into_response()
        }
    };

    match handlers.benchmarks.upsert(&benchmark).await {
        Ok(()) => (StatusCode::OK, Json(BenchmarkResponse::from(&benchmark))).into_response(),
        Err(e) => domain_error_response(&e),
    }
}
