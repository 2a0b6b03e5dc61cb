//! Scenic and order DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::{Dashboard, MAX_RECOMMENDED};
use crate::interfaces::http::common::ScenicDto;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScenicSearchQuery {
    pub keyword: Option<String>,
    pub current: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AuditForm {
    /// `0` pending, `1` approved, `2` rejected.
    #[serde(default)]
    pub audit: String,
    #[serde(default, rename = "auditId")]
    pub audit_id: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RecommendForm {
    #[serde(rename = "recommendScenic")]
    pub recommend_scenic: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RemoveRecommendForm {
    #[serde(rename = "removeRecommend")]
    pub remove_recommend: Option<String>,
}

/// Multipart body of `POST /addScenic`, read field by field by the handler.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct AddScenicUpload {
    scenic_name: String,
    #[schema(value_type = String, format = Binary)]
    scenic_img: Vec<u8>,
}

/// Admin home page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexView {
    pub view: &'static str,
    pub recommended: Vec<ScenicDto>,
    pub recommend_count: u64,
    pub max_recommended: u64,
    pub spot_count: u64,
    pub product_count: u64,
    pub reservation_count: u64,
    pub purchase_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommend_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommend_count_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_recommend_msg: Option<String>,
}

impl From<Dashboard> for IndexView {
    fn from(d: Dashboard) -> Self {
        Self {
            view: "index",
            recommended: d.recommended.into_iter().map(ScenicDto::from).collect(),
            recommend_count: d.recommend_count,
            max_recommended: MAX_RECOMMENDED,
            spot_count: d.spot_count,
            product_count: d.product_count,
            reservation_count: d.reservation_count,
            purchase_count: d.purchase_count,
            recommend_msg: None,
            recommend_count_msg: None,
            remove_recommend_msg: None,
        }
    }
}
