use chrono::{DateTime, Utc};

use crate::domain::ScenicCategory;

/// Review state of an order, carried on the wire as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStatus {
    Pending,
    Approved,
    Rejected,
}

impl AuditStatus {
    pub fn code(&self) -> i32 {
        match self {
            Self::Pending => 0,
            Self::Approved => 1,
            Self::Rejected => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Approved),
            2 => Some(Self::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: i32,
    pub scenic_id: i32,
    pub scenic_name: String,
    pub category: ScenicCategory,
    pub username: String,
    pub quantity: i32,
    pub audit: AuditStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub scenic_id: i32,
    pub username: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Category of the ordered scenic.
    pub category: Option<ScenicCategory>,
    pub audit: Option<AuditStatus>,
}

impl OrderFilter {
    pub fn category(category: ScenicCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_codes_are_stable() {
        for status in [AuditStatus::Pending, AuditStatus::Approved, AuditStatus::Rejected] {
            assert_eq!(AuditStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(AuditStatus::from_code(7), None);
        assert_eq!(AuditStatus::from_code(-1), None);
    }
}
