//! Client HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::ClientsHandlers;
pub use routes::clients_routes;
