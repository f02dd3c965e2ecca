//! Bearer-token authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::infrastructure::crypto::jwt::{TokenClaims, TokenError, TokenVerifier};
use crate::interfaces::http::common::ApiResponse;

const BEARER_PREFIX: &str = "Bearer ";

/// Why a protected request was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    MalformedHeader,
    InvalidToken,
    ExpiredToken,
}

impl AuthError {
    fn label(self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::MalformedHeader => "malformed_header",
            Self::InvalidToken => "invalid_token",
            Self::ExpiredToken => "expired_token",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::MissingToken => "Missing authentication token",
            Self::MalformedHeader => "Authorization header must be 'Bearer <token>'",
            Self::InvalidToken => "Invalid authentication token",
            Self::ExpiredToken => "Token has expired",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        metrics::counter!("auth_rejections_total", "reason" => self.label()).increment(1);
        let body = ApiResponse::<()>::error("Unauthorized", self.message());
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// State for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    pub verifier: TokenVerifier,
}

/// Caller identity attached to the request after a successful check
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedActor {
    pub username: String,
    pub role_id: i32,
}

impl From<TokenClaims> for AuthenticatedActor {
    fn from(claims: TokenClaims) -> Self {
        Self {
            username: claims.sub,
            role_id: claims.role,
        }
    }
}

/// Pull the token out of an `Authorization` header value.
pub fn extract_bearer(auth_header: &str) -> Result<&str, AuthError> {
    let token = auth_header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedHeader)?;
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(AuthError::MalformedHeader);
    }
    Ok(token)
}

fn authenticate(request: &Request<Body>, verifier: &TokenVerifier) -> Result<AuthenticatedActor, AuthError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;
    let header_value = header_value.to_str().map_err(|_| AuthError::MalformedHeader)?;
    let token = extract_bearer(header_value)?;

    let claims = verifier.verify(token).map_err(|e| {
        debug!(error = %e, "Token rejected");
        AuthError::from(e)
    })?;
    Ok(AuthenticatedActor::from(claims))
}

/// JWT authentication middleware
///
/// Rejected requests never reach the wrapped handler.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&request, &auth_state.verifier) {
        Ok(actor) => {
            request.extensions_mut().insert(actor);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::routing::get;
    use axum::{middleware, Extension, Router};
    use chrono::{Duration, Utc};
    use tower::Service;

    use crate::infrastructure::crypto::jwt::{JwtConfig, TokenIssuer};

    fn jwt() -> JwtConfig {
        JwtConfig::new("middleware-secret", 3600)
    }

    fn app(hits: Arc<AtomicUsize>) -> Router {
        let state = AuthState {
            verifier: TokenVerifier::new(&jwt()),
        };
        Router::new()
            .route(
                "/protected",
                get(move |Extension(actor): Extension<AuthenticatedActor>| {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        actor.username
                    }
                }),
            )
            .route_layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn call(auth: Option<&str>) -> (StatusCode, usize, serde_json::Value) {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut svc = app(hits.clone()).into_service();

        let mut builder = Request::builder().uri("/protected");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let resp = svc.call(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, hits.load(Ordering::SeqCst), body)
    }

    #[test]
    fn extract_bearer_shapes() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi"), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer("Basic abc"), Err(AuthError::MalformedHeader));
        assert_eq!(extract_bearer("Bearer "), Err(AuthError::MalformedHeader));
        assert_eq!(extract_bearer("Bearer a b"), Err(AuthError::MalformedHeader));
        assert_eq!(extract_bearer("abc.def.ghi"), Err(AuthError::MalformedHeader));
    }

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        let token = TokenIssuer::new(&jwt()).issue("alice", 2).unwrap();
        let (status, hits, _) = call(Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hits, 1);
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let (status, hits, body) = call(None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(hits, 0);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Missing authentication token");
    }

    #[tokio::test]
    async fn malformed_header_is_rejected() {
        let token = TokenIssuer::new(&jwt()).issue("alice", 2).unwrap();
        for value in [token.as_str(), "Token abc", "Bearer "] {
            let (status, hits, _) = call(Some(value)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(hits, 0);
        }
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let issued = Utc::now() - Duration::hours(2);
        let token = TokenIssuer::new(&jwt()).issue_at("alice", 2, issued).unwrap();

        let (status, hits, body) = call(Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(hits, 0);
        assert_eq!(body["message"], "Token has expired");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn foreign_signature_is_rejected() {
        let other = JwtConfig::new("someone-else", 3600);
        let token = TokenIssuer::new(&other).issue("alice", 1).unwrap();

        let (status, hits, _) = call(Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(hits, 0);
    }
}
