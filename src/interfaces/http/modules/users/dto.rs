//! User management DTOs

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserTypeQuery {
    /// `admin`/`member`, or `1`/`0`.
    #[serde(rename = "type")]
    pub user_type: Option<String>,
    pub current: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserSearchQuery {
    pub keyword: Option<String>,
    #[serde(rename = "type")]
    pub user_type: Option<String>,
    pub current: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddUserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PasswordForm {
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "passwordRe")]
    pub password_re: String,
}

/// Multipart body of the avatar uploads, read field by field by the handler.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct HeaderUpload {
    #[schema(value_type = String, format = Binary)]
    header_img: Vec<u8>,
}
