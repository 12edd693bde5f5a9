use super::jwt::JwtVerifier;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Pull the bearer token from the Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// JWT authentication middleware.
///
/// Verifies the identity provider's token and inserts [`JwtClaims`] into the
/// request extensions. Requests without a valid token stop here with 401, so
/// handlers behind this layer always see an authenticated principal.
///
/// [`JwtClaims`]: super::jwt::JwtClaims
///
/// ```ignore
/// let protected = Router::new()
///     .route("/account", get(handler))
///     .layer(axum::middleware::from_fn_with_state(verifier, jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(verifier): State<JwtVerifier>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_bearer_token(&headers) else {
        tracing::debug!("No bearer token in Authorization header");
        return Err(AppError::Unauthorized("No token provided".to_string()));
    };

    let claims = verifier.verify_token(token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::Unauthorized("Invalid token".to_string())
    })?;

    if claims.sub.trim().is_empty() {
        tracing::debug!("JWT has an empty subject");
        return Err(AppError::Unauthorized("Invalid token".to_string()));
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
