use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};

use crate::app::AppState;
use crate::auth::{AuthError, Principal};
use crate::error::ApiError;

/// HTTP Basic authentication middleware for the protected API
///
/// Looks the user up on every request and injects the resulting
/// [`Principal`] into request extensions. No session or cookie is created.
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let principal = match authenticate_request(&state, request.headers()).await {
        Ok(principal) => principal,
        Err(err) => return challenge(&state.realm, err.into()),
    };

    tracing::debug!(
        "Authenticated {} ({}) for {} {}",
        principal.username,
        principal.role,
        request.method(),
        request.uri().path()
    );

    request.extensions_mut().insert(principal);
    next.run(request).await
}

async fn authenticate_request(state: &AppState, headers: &HeaderMap) -> Result<Principal, AuthError> {
    let credentials = extract_basic_credentials(headers)?;
    state
        .authenticator
        .authenticate(credentials.username(), credentials.password())
        .await
}

/// Decode `Authorization: Basic ...` into username and password
fn extract_basic_credentials(headers: &HeaderMap) -> Result<Basic, AuthError> {
    headers
        .typed_get::<Authorization<Basic>>()
        .map(|Authorization(basic)| basic)
        .ok_or(AuthError::MissingCredentials)
}

/// 401 response carrying the Basic challenge for `realm`
fn challenge(realm: &str, error: ApiError) -> Response {
    let mut response = error.into_response();
    if response.status() == axum::http::StatusCode::UNAUTHORIZED {
        let value = format!("Basic realm=\"{}\"", realm);
        if let Ok(value) = HeaderValue::from_str(&value) {
            response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
        }
    }
    response
}
