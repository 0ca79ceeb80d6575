//! HTTP routes for benchmark endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{list_benchmarks, list_dimensions, upsert_benchmark, BenchmarksHandlers};

/// Creates the benchmarks router with all endpoints.
pub fn benchmarks_routes(handlers: BenchmarksHandlers) -> Router {
    Router::new()
        .route("/", get(list_benchmarks))
        .route("/", put(upsert_benchmark))
        .with_state(handlers)
}

/// Creates the dimension-catalog router, mounted at `/api/dimensions`.
pub fn dimensions_routes(handlers: BenchmarksHandlers) -> Router {
    Router::new()
        .route("/", get(list_dimensions))
        .with_state(handlers)
}
