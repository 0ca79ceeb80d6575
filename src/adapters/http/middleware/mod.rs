//! HTTP middleware.

mod auth;

pub use auth::{
    auth_middleware, parse_cookie, AuthRejection, AuthState, RawSessionToken, RequireAuth,
    SessionToken,
};
