//! User management handlers

use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    response::{IntoResponse, Response},
    Form, Json,
};

use super::dto::{AddUserForm, HeaderUpload, PasswordForm, UserSearchQuery, UserTypeQuery};
use crate::application::{messages, HeaderOutcome, PasswordOutcome};
use crate::domain::{DomainResult, User};
use crate::interfaces::http::common::{
    redirect, selected_values, ApiError, ListingView, PageQuery, SettingView, UploadForm, UserDto,
};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::router::Users;
use crate::shared::{DomainError, Listing, Page, StatusResult};

const USER_VIEW: &str = "pages/user-control";

#[derive(Clone)]
pub struct UserState {
    pub users: Arc<Users>,
    pub context_path: String,
}

fn current(raw: &Option<String>) -> u64 {
    Page::parse_current(raw.as_deref())
}

/// Renders a user listing; validation failures become the view message.
fn user_listing(
    result: DomainResult<Listing<User>>,
    path: &str,
) -> Result<Json<ListingView<UserDto>>, ApiError> {
    match result {
        Ok(listing) => Ok(Json(ListingView::new(USER_VIEW, listing))),
        Err(DomainError::Validation(msg)) => Ok(Json(ListingView::rejected(USER_VIEW, path, msg))),
        Err(e) => Err(e.into()),
    }
}

// ── Pages ───────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/user-control",
    tag = "Users",
    params(PageQuery),
    responses((status = 200, description = "User listing view")),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<UserState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListingView<UserDto>>, ApiError> {
    user_listing(state.users.list_users(query.page()).await, "/user-control")
}

#[utoipa::path(
    get,
    path = "/user/ban",
    tag = "Users",
    params(PageQuery),
    responses((status = 200, description = "Banned user listing view")),
    security(("bearer_auth" = []))
)]
pub async fn list_banned(
    State(state): State<UserState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListingView<UserDto>>, ApiError> {
    user_listing(state.users.list_banned(query.page()).await, "/user/ban")
}

#[utoipa::path(
    get,
    path = "/user/userType",
    tag = "Users",
    params(UserTypeQuery),
    responses((status = 200, description = "Users of one account type")),
    security(("bearer_auth" = []))
)]
pub async fn list_by_type(
    State(state): State<UserState>,
    Query(query): Query<UserTypeQuery>,
) -> Result<Json<ListingView<UserDto>>, ApiError> {
    let result = state
        .users
        .list_by_type(query.user_type.as_deref(), current(&query.current))
        .await;
    user_listing(result, "/user/userType")
}

#[utoipa::path(
    get,
    path = "/user/search",
    tag = "Users",
    params(UserSearchQuery),
    responses((status = 200, description = "User search view; `searchMsg` set when the keyword is blank")),
    security(("bearer_auth" = []))
)]
pub async fn search_users(
    State(state): State<UserState>,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<ListingView<UserDto>>, ApiError> {
    let result = state
        .users
        .search_users(
            query.keyword.as_deref(),
            query.user_type.as_deref(),
            current(&query.current),
        )
        .await;
    user_listing(result, "/user/search")
}

#[utoipa::path(
    get,
    path = "/setting",
    tag = "Users",
    responses((status = 200, description = "Settings view", body = SettingView)),
    security(("bearer_auth" = []))
)]
pub async fn setting(CurrentUser(user): CurrentUser) -> Json<SettingView> {
    Json(SettingView::pages(user))
}

// ── Mutations ───────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/addUser",
    tag = "Users",
    request_body(content = AddUserForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Status result", body = StatusResult)),
    security(("bearer_auth" = []))
)]
pub async fn add_user(
    State(state): State<UserState>,
    Form(form): Form<AddUserForm>,
) -> Result<Json<StatusResult>, ApiError> {
    let status = state
        .users
        .add_user(&form.username, &form.email, &form.password)
        .await?;
    Ok(Json(status))
}

#[utoipa::path(
    post,
    path = "/removeUser",
    tag = "Users",
    request_body(content = String, description = "`list[]` ids", content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Status result", body = StatusResult)),
    security(("bearer_auth" = []))
)]
pub async fn remove_user(
    State(state): State<UserState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<StatusResult>, ApiError> {
    let ids = selected_values(&pairs, "list");
    Ok(Json(state.users.remove_users(&ids).await?))
}

#[utoipa::path(
    post,
    path = "/banUser",
    tag = "Users",
    request_body(content = String, description = "`list[]` entries of `<id>?<status>`", content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Status result", body = StatusResult)),
    security(("bearer_auth" = []))
)]
pub async fn ban_user(
    State(state): State<UserState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<StatusResult>, ApiError> {
    let entries = selected_values(&pairs, "list");
    Ok(Json(state.users.ban_users(&entries).await?))
}

/// Form `{password, passwordRe}`; signs the admin out once changed.
#[utoipa::path(
    post,
    path = "/user/update",
    tag = "Users",
    request_body(content = PasswordForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Password changed; redirect to `/logout`"),
        (status = 200, description = "Setting view with `passwordReMsg`", body = SettingView)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_password(
    State(state): State<UserState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<PasswordForm>,
) -> Result<Response, ApiError> {
    let outcome = state
        .users
        .change_password(user.id, &form.password, &form.password_re)
        .await?;

    let msg = match outcome {
        PasswordOutcome::Changed => return Ok(redirect(&state.context_path, "/logout")),
        PasswordOutcome::Mismatch => messages::PASSWORD_MISMATCH,
        PasswordOutcome::Empty => messages::PASSWORD_REQUIRED,
    };
    Ok(Json(SettingView::pages(user).with_password_msg(msg)).into_response())
}

/// Multipart `{headerImg}` sent to the avatar object store.
#[utoipa::path(
    post,
    path = "/header/url",
    tag = "Users",
    request_body(content = HeaderUpload, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Avatar stored; redirect to `/setting`"),
        (status = 200, description = "Setting view with `headerImgMsg`", body = SettingView)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_header(
    State(state): State<UserState>,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut form = UploadForm::read(multipart).await?;
    let outcome = state
        .users
        .upload_header(user.id, form.take_file("headerImg"))
        .await?;
    after_header_upload(&state, user, outcome)
}

/// Deprecated: multipart `{headerImg}` stored in the local upload directory.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Users",
    request_body(content = HeaderUpload, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Avatar stored; redirect to `/setting`"),
        (status = 200, description = "Setting view with `headerImgMsg`", body = SettingView)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_header_local(
    State(state): State<UserState>,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut form = UploadForm::read(multipart).await?;
    let outcome = state
        .users
        .upload_header_local(user.id, form.take_file("headerImg"))
        .await?;
    after_header_upload(&state, user, outcome)
}

fn after_header_upload(
    state: &UserState,
    user: User,
    outcome: HeaderOutcome,
) -> Result<Response, ApiError> {
    let msg = match outcome {
        HeaderOutcome::Updated(_) => return Ok(redirect(&state.context_path, "/setting")),
        HeaderOutcome::Missing => messages::IMAGE_REQUIRED,
        HeaderOutcome::BadFormat => messages::IMAGE_FORMAT_INVALID,
    };
    Ok(Json(SettingView::site(user).with_header_msg(msg)).into_response())
}
