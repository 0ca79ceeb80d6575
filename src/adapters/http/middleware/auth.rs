//! Authentication middleware and extractors for axum.
//!
//! The session token arrives either as `Authorization: Bearer <token>`
//! (API clients) or in the hosted-auth session cookie (the web app).
//! The middleware validates it through the `SessionValidator` port and
//! injects both the `AuthenticatedUser` and the raw token into request
//! extensions; the raw token is what the PDF exporter replays into its
//! browser context.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorBody;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state: the validator plus the session cookie name.
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn SessionValidator>,
    pub cookie_name: String,
}

/// The raw session token as received, kept for cookie replay.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Authentication middleware.
///
/// 1. Extracts the token from the Authorization header or session cookie
/// 2. Validates it via the `SessionValidator` port
/// 3. On success injects `AuthenticatedUser` and `SessionToken`
/// 4. On missing token continues unauthenticated (RequireAuth rejects later)
/// 5. On invalid token returns 401
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(&request).or_else(|| cookie_token(&request, &state.cookie_name));

    match token {
        Some(token) => match state.validator.validate(&token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                request.extensions_mut().insert(SessionToken(token));
                next.run(request).await
            }
            Err(e) => {
                let (status, message) = match &e {
                    AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
                    AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
                    AuthError::ServiceUnavailable(msg) => {
                        tracing::error!("Auth service unavailable: {}", msg);
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "Authentication service unavailable",
                        )
                    }
                    _ => (StatusCode::UNAUTHORIZED, "Authentication failed"),
                };
                (status, Json(ErrorBody::new("AUTH_ERROR", message))).into_response()
            }
        },
        None => next.run(request).await,
    }
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn cookie_token(request: &Request, cookie_name: &str) -> Option<String> {
    let header = request.headers().get("Cookie")?.to_str().ok()?;
    parse_cookie(header, cookie_name)
}

/// Finds one cookie's value in a `Cookie` header.
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Extractor that requires authentication.
///
/// Returns 401 when the auth middleware did not inject a user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Extractor for the raw session token; `None` for unauthenticated
/// requests.
#[derive(Debug, Clone)]
pub struct RawSessionToken(pub Option<String>);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for RawSessionToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let token = parts.extensions.get::<SessionToken>().map(|t| t.0.clone());
        Ok(RawSessionToken(token))
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(ErrorBody::unauthorized())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::{AccessLevel, ProfileId};

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            ProfileId::new(),
            "test@example.com",
            Some("Test User".to_string()),
            None,
            AccessLevel::Member,
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Cookie parsing
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn parse_cookie_finds_named_cookie() {
        let header = "theme=dark; ts-session=abc123; lang=en";
        assert_eq!(parse_cookie(header, "ts-session"), Some("abc123".to_string()));
    }

    #[test]
    fn parse_cookie_misses_absent_cookie() {
        assert_eq!(parse_cookie("theme=dark", "ts-session"), None);
    }

    #[test]
    fn parse_cookie_does_not_match_prefixes() {
        let header = "ts-session-old=stale; ts-session=fresh";
        assert_eq!(parse_cookie(header, "ts-session"), Some("fresh".to_string()));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Validator wiring
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn validator_returns_user_for_valid_token() {
        let validator: Arc<dyn SessionValidator> =
            Arc::new(MockSessionValidator::new().with_user("valid-token", test_user()));

        let result = validator.validate("valid-token").await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().email, "test@example.com");
    }

    #[tokio::test]
    async fn validator_returns_error_for_invalid_token() {
        let validator: Arc<dyn SessionValidator> = Arc::new(MockSessionValidator::new());

        let result = validator.validate("invalid-token").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Extractors
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(test_user());

        let (mut parts, _body) = request.into_parts();
        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(result.is_ok());
        let RequireAuth(user) = result.unwrap();
        assert_eq!(user.email, "test@example.com");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn raw_session_token_extracts_token_when_present() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request
            .extensions_mut()
            .insert(SessionToken("tok-1".to_string()));

        let (mut parts, _body) = request.into_parts();
        let RawSessionToken(token) = RawSessionToken::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(token, Some("tok-1".to_string()));
    }

    #[test]
    fn auth_rejection_returns_401() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn bearer_token_extraction() {
        let header_value = "Bearer my-secret-token";
        assert_eq!(header_value.strip_prefix("Bearer "), Some("my-secret-token"));

        let header_value = "Basic dXNlcjpwYXNz";
        assert_eq!(header_value.strip_prefix("Bearer "), None);
    }
}
