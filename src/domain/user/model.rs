use chrono::{DateTime, Utc};

/// Account type. Only admins may sign in to the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Admin,
    Member,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Accepts the names used by the listing filter as well as the numeric
    /// codes the old front end sends (`0` member, `1` admin).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" | "1" => Some(Self::Admin),
            "member" | "0" => Some(Self::Member),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Normal,
    Banned,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Banned => "banned",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Normal => 0,
            Self::Banned => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Normal),
            1 => Some(Self::Banned),
            _ => None,
        }
    }

    /// Ban toggles: a normal account gets banned, a banned one is restored.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Normal => Self::Banned,
            Self::Banned => Self::Normal,
        }
    }
}

#[derive(Clone, Debug)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub user_type: UserType,
    pub status: UserStatus,
    pub header_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_banned(&self) -> bool {
        self.status == UserStatus::Banned
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Substring of the username or the email.
    pub keyword: Option<String>,
    pub user_type: Option<UserType>,
    pub status: Option<UserStatus>,
}
