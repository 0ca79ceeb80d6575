//! Report HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::ReportsHandlers;
pub use routes::reports_routes;
