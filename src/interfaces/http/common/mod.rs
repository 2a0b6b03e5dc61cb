//! Shared HTTP plumbing: response envelopes, view descriptors, form and
//! multipart helpers, and the validating JSON extractor.

pub mod error;
pub mod forms;
pub mod validated_json;
pub mod views;

pub use error::{ApiError, ApiResponse};
pub use forms::{selected_values, PageQuery, UploadForm};
pub use validated_json::ValidatedJson;
pub use views::{redirect, ListingView, OrderDto, PageDto, ScenicDto, SettingView, UserDto};
