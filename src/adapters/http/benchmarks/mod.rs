//! Benchmark HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::BenchmarksHandlers;
pub use routes::{benchmarks_routes, dimensions_routes};
