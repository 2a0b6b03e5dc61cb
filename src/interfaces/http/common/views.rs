//! View descriptors: the JSON models the admin front end renders.
//!
//! Every page response names its template in `view`; the rest of the
//! object is the model that template consumes.

use axum::response::{IntoResponse, Redirect, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Order, Scenic, User};
use crate::shared::{Listing, Page};

/// 303 to `path` under the configured context path.
pub fn redirect(context_path: &str, path: &str) -> Response {
    Redirect::to(&format!("{}{}", context_path, path)).into_response()
}

/// Pager metadata of a listing page.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    pub current: u64,
    pub limit: u64,
    pub rows: u64,
    pub total_pages: u64,
    /// First page link of the pager window.
    pub from: u64,
    /// Last page link of the pager window.
    pub to: u64,
    /// Link target for the pager, including the filter query.
    pub path: String,
}

impl From<&Page> for PageDto {
    fn from(page: &Page) -> Self {
        Self {
            current: page.current(),
            limit: page.limit(),
            rows: page.rows(),
            total_pages: page.total_pages(),
            from: page.from(),
            to: page.to(),
            path: page.path().to_string(),
        }
    }
}

/// A listing page: `{view, items, page, searchMsg?}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView<T> {
    pub view: &'static str,
    pub items: Vec<T>,
    pub page: PageDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_msg: Option<String>,
}

impl<T> ListingView<T> {
    pub fn new<U>(view: &'static str, listing: Listing<U>) -> Self
    where
        T: From<U>,
    {
        Self {
            view,
            page: PageDto::from(&listing.page),
            items: listing.items.into_iter().map(T::from).collect(),
            search_msg: None,
        }
    }

    /// Empty listing carrying a validation message; nothing was queried.
    pub fn rejected(view: &'static str, path: &str, msg: impl Into<String>) -> Self {
        Self {
            view,
            items: Vec::new(),
            page: PageDto::from(&Page::new(1, path)),
            search_msg: Some(msg.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScenicDto {
    pub id: i32,
    pub name: String,
    pub image: String,
    /// Route serving the image, relative to the context path.
    pub image_url: String,
    pub category: String,
    pub recommended: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Scenic> for ScenicDto {
    fn from(s: Scenic) -> Self {
        Self {
            id: s.id,
            image_url: format!("/scenicImg/{}", s.image),
            name: s.name,
            image: s.image,
            category: s.category.as_str().to_string(),
            recommended: s.recommended,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i32,
    pub scenic_id: i32,
    pub scenic_name: String,
    pub username: String,
    pub quantity: i32,
    /// `0` pending, `1` approved, `2` rejected.
    pub audit: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderDto {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            scenic_id: o.scenic_id,
            scenic_name: o.scenic_name,
            username: o.username,
            quantity: o.quantity,
            audit: o.audit.code(),
            created_at: o.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub user_type: String,
    /// `0` normal, `1` banned; echoed back by the ban toggle.
    pub status: i32,
    pub header_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            user_type: u.user_type.as_str().to_string(),
            status: u.status.code(),
            header_url: u.header_url,
            created_at: u.created_at,
        }
    }
}

/// Account settings page. Also the fallback view of the upload forms.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingView {
    pub view: &'static str,
    pub user: UserDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_re_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_img_msg: Option<String>,
}

impl SettingView {
    /// `pages/setting`, where the password form lives.
    pub fn pages(user: User) -> Self {
        Self::new("pages/setting", user)
    }

    /// `site/setting`, where the image upload forms live.
    pub fn site(user: User) -> Self {
        Self::new("site/setting", user)
    }

    fn new(view: &'static str, user: User) -> Self {
        Self {
            view,
            user: UserDto::from(user),
            password_re_msg: None,
            header_img_msg: None,
        }
    }

    pub fn with_password_msg(mut self, msg: &str) -> Self {
        self.password_re_msg = Some(msg.to_string());
        self
    }

    pub fn with_header_msg(mut self, msg: &str) -> Self {
        self.header_img_msg = Some(msg.to_string());
        self
    }
}
