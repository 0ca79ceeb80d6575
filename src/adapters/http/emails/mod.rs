//! Email HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::EmailsHandlers;
pub use routes::emails_routes;
