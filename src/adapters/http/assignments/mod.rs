//! Assignment HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::AssignmentsHandlers;
pub use routes::assignments_routes;
