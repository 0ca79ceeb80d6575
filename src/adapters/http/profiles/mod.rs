//! Profile HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::ProfilesHandlers;
pub use routes::profiles_routes;
