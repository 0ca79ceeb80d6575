//! Group HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::GroupsHandlers;
pub use routes::groups_routes;
