//! Adapters - implementations of the ports against real infrastructure.

pub mod auth;
pub mod email;
pub mod export;
pub mod http;
pub mod postgres;
pub mod upload;
