use chrono::{DateTime, Utc};

/// Scenic records double as shop products; the category tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenicCategory {
    Spot,
    Product,
}

impl ScenicCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::Product => "product",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scenic {
    pub id: i32,
    pub name: String,
    /// File name under the scenic image root.
    pub image: String,
    pub category: ScenicCategory,
    pub recommended: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewScenic {
    pub name: String,
    pub image: String,
    pub category: ScenicCategory,
}

/// Listing filter; `None` fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct ScenicFilter {
    pub category: Option<ScenicCategory>,
    /// Substring of the name.
    pub keyword: Option<String>,
    pub recommended: Option<bool>,
}

impl ScenicFilter {
    pub fn category(category: ScenicCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn recommended() -> Self {
        Self {
            recommended: Some(true),
            ..Self::default()
        }
    }
}
