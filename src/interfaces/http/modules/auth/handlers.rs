//! Sign-in and sign-out handlers

use axum::{extract::State, Json};

use super::dto::{LoginRequest, LoginResponse, LoginView};
use crate::interfaces::http::common::{ApiError, ApiResponse, UserDto, ValidatedJson};
use crate::interfaces::http::middleware::AuthState;

#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials or banned account"),
        (status = 403, description = "Not an admin account")
    )
)]
pub async fn login(
    State(state): State<AuthState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let auth = state
        .users
        .login(request.username.trim(), &request.password)
        .await?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token: auth.token,
        token_type: auth.token_type,
        expires_in: auth.expires_in,
        user: UserDto::from(auth.user),
    })))
}

/// Tokens are stateless, so signing out only sends the client back to the
/// login view; the client discards its token.
#[utoipa::path(
    get,
    path = "/logout",
    tag = "Authentication",
    responses((status = 200, description = "Login view", body = LoginView))
)]
pub async fn logout() -> Json<LoginView> {
    Json(LoginView { view: "login" })
}
