//! `{code, msg}` status object returned by the AJAX mutation endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status code reported on success.
pub const STATUS_OK: i32 = 0;

/// Minimal status contract: `0` means success, any other code names a
/// specific failure of the endpoint that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusResult {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl StatusResult {
    /// Success without a message, serialized as `{"code":0}`.
    pub fn ok() -> Self {
        Self {
            code: STATUS_OK,
            msg: None,
        }
    }

    pub fn ok_with(msg: impl Into<String>) -> Self {
        Self {
            code: STATUS_OK,
            msg: Some(msg.into()),
        }
    }

    pub fn fail(code: i32, msg: impl Into<String>) -> Self {
        debug_assert_ne!(code, STATUS_OK, "failure status must be nonzero");
        Self {
            code,
            msg: Some(msg.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == STATUS_OK
    }
}
