//! Login guard for the protected admin routes.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::router::Users;
use crate::domain::User;
use crate::interfaces::http::common::ApiResponse;
use crate::shared::DomainError;

/// State the guard needs to resolve a token.
#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<Users>,
}

/// The signed-in admin, inserted into request extensions by [`require_login`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| auth_error_response(StatusCode::UNAUTHORIZED, "Login required"))
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Rejects the request unless it carries a bearer token of an active admin.
pub async fn require_login(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_token)
        .map(String::from);
    let Some(token) = token else {
        return auth_error_response(StatusCode::UNAUTHORIZED, "Missing authentication token");
    };

    match auth_state.users.authorize_token(&token).await {
        Ok(user) => {
            tracing::debug!(user_id = user.id, "Authenticated request");
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Err(DomainError::Forbidden(msg)) => auth_error_response(StatusCode::FORBIDDEN, &msg),
        Err(DomainError::Unauthorized(msg)) => auth_error_response(StatusCode::UNAUTHORIZED, &msg),
        Err(e) => {
            tracing::error!(error = %e, "Token check failed");
            auth_error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn auth_error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}
