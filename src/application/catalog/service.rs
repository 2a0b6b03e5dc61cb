//! Catalog service: listings and mutations behind the scenic admin pages.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::listing::{list_page, pager_path, required_keyword};
use crate::application::{messages, parse_ids};
use crate::domain::{
    AuditStatus, DomainError, DomainResult, ImageUpload, ListingSource, NewScenic, Order,
    OrderFilter, OrderRepositoryInterface, Scenic, ScenicCategory, ScenicFilter,
    ScenicRepositoryInterface,
};
use crate::infrastructure::storage::AssetStore;
use crate::shared::{Listing, Page, StatusResult};

/// Upper bound on scenics shown in the home-page carousel.
pub const MAX_RECOMMENDED: u64 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendOutcome {
    Done,
    /// Adding one more would exceed [`MAX_RECOMMENDED`].
    LimitReached,
    /// Nothing is recommended, so there is nothing to remove.
    NoneRecommended,
    MissingId,
    UnknownScenic,
}

#[derive(Debug, Clone)]
pub enum AddScenicOutcome {
    Added(Scenic),
    MissingName,
    MissingImage,
    BadImageFormat,
}

/// Figures shown on the admin home page.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub recommended: Vec<Scenic>,
    pub recommend_count: u64,
    pub spot_count: u64,
    pub product_count: u64,
    pub reservation_count: u64,
    pub purchase_count: u64,
}

pub struct CatalogService<S, O>
where
    S: ScenicRepositoryInterface,
    O: OrderRepositoryInterface,
{
    scenics: Arc<S>,
    orders: Arc<O>,
    images: AssetStore,
}

impl<S, O> CatalogService<S, O>
where
    S: ScenicRepositoryInterface,
    O: OrderRepositoryInterface,
{
    pub fn new(scenics: Arc<S>, orders: Arc<O>, images: AssetStore) -> Self {
        Self {
            scenics,
            orders,
            images,
        }
    }

    /// Root directory holding scenic images.
    pub fn images(&self) -> &AssetStore {
        &self.images
    }

    // ── Listings ────────────────────────────────────────────────

    pub async fn list_spots(&self, current: u64) -> DomainResult<Listing<Scenic>> {
        let filter = ScenicFilter::category(ScenicCategory::Spot);
        list_page(self.scenics.as_ref(), &filter, Page::new(current, "/scenic-control")).await
    }

    pub async fn list_products(&self, current: u64) -> DomainResult<Listing<Scenic>> {
        let filter = ScenicFilter::category(ScenicCategory::Product);
        list_page(self.scenics.as_ref(), &filter, Page::new(current, "/scenic-controlll")).await
    }

    /// Reservations: orders placed on spots.
    pub async fn list_spot_orders(&self, current: u64) -> DomainResult<Listing<Order>> {
        let filter = OrderFilter::category(ScenicCategory::Spot);
        list_page(self.orders.as_ref(), &filter, Page::new(current, "/scenic-controll")).await
    }

    /// Purchases: orders placed on products.
    pub async fn list_product_orders(&self, current: u64) -> DomainResult<Listing<Order>> {
        let filter = OrderFilter::category(ScenicCategory::Product);
        list_page(self.orders.as_ref(), &filter, Page::new(current, "/scenic-controllll")).await
    }

    /// Spots whose name contains `keyword`.
    ///
    /// A blank keyword fails with [`DomainError::Validation`] before the
    /// store is touched.
    pub async fn search_spots(
        &self,
        keyword: Option<&str>,
        current: u64,
    ) -> DomainResult<Listing<Scenic>> {
        let Some(keyword) = required_keyword(keyword) else {
            return Err(DomainError::Validation(messages::KEYWORD_REQUIRED.into()));
        };

        let page = Page::new(current, pager_path("/scenic/search", &[("keyword", &keyword)]));
        let filter = ScenicFilter {
            category: Some(ScenicCategory::Spot),
            keyword: Some(keyword),
            recommended: None,
        };
        list_page(self.scenics.as_ref(), &filter, page).await
    }

    pub async fn dashboard(&self) -> DomainResult<Dashboard> {
        let recommended_filter = ScenicFilter::recommended();
        let recommend_count = self.scenics.count(&recommended_filter).await?;
        let recommended = self
            .scenics
            .fetch(&recommended_filter, 0, MAX_RECOMMENDED)
            .await?;

        Ok(Dashboard {
            recommended,
            recommend_count,
            spot_count: self
                .scenics
                .count(&ScenicFilter::category(ScenicCategory::Spot))
                .await?,
            product_count: self
                .scenics
                .count(&ScenicFilter::category(ScenicCategory::Product))
                .await?,
            reservation_count: self
                .orders
                .count(&OrderFilter::category(ScenicCategory::Spot))
                .await?,
            purchase_count: self
                .orders
                .count(&OrderFilter::category(ScenicCategory::Product))
                .await?,
        })
    }

    // ── Mutations ───────────────────────────────────────────────

    /// Sets the review state of one order from raw form values.
    pub async fn update_audit(&self, raw_id: &str, raw_audit: &str) -> DomainResult<StatusResult> {
        let Some(audit) = raw_audit
            .trim()
            .parse::<i32>()
            .ok()
            .and_then(AuditStatus::from_code)
        else {
            return Ok(StatusResult::fail(1, messages::AUDIT_INVALID));
        };

        let Ok(id) = raw_id.trim().parse::<i32>() else {
            return Ok(StatusResult::fail(2, messages::ORDER_NOT_FOUND));
        };

        if !self.orders.update_audit(id, audit).await? {
            return Ok(StatusResult::fail(2, messages::ORDER_NOT_FOUND));
        }

        info!(order_id = id, audit = audit.code(), "Order audited");
        Ok(StatusResult::ok())
    }

    /// Marks a scenic recommended. The limit is checked again by the
    /// update itself, so concurrent requests cannot exceed it.
    pub async fn recommend(&self, raw_id: Option<&str>) -> DomainResult<RecommendOutcome> {
        let count = self.scenics.count(&ScenicFilter::recommended()).await?;
        if count >= MAX_RECOMMENDED {
            return Ok(RecommendOutcome::LimitReached);
        }
        let id = match scenic_id(raw_id, true) {
            Ok(id) => id,
            Err(outcome) => return Ok(outcome),
        };

        if !self.scenics.recommend_within_limit(id, MAX_RECOMMENDED).await? {
            return Ok(match self.scenics.get_scenic(id).await? {
                Some(_) => RecommendOutcome::LimitReached,
                None => RecommendOutcome::UnknownScenic,
            });
        }

        info!(scenic_id = id, "Scenic recommended");
        Ok(RecommendOutcome::Done)
    }

    pub async fn remove_recommend(&self, raw_id: Option<&str>) -> DomainResult<RecommendOutcome> {
        let count = self.scenics.count(&ScenicFilter::recommended()).await?;
        if count == 0 {
            return Ok(RecommendOutcome::NoneRecommended);
        }
        let id = match scenic_id(raw_id, false) {
            Ok(id) => id,
            Err(outcome) => return Ok(outcome),
        };

        if !self.scenics.set_recommended(id, false).await? {
            return Ok(RecommendOutcome::UnknownScenic);
        }

        info!(scenic_id = id, "Scenic recommendation removed");
        Ok(RecommendOutcome::Done)
    }
    /// Stores the image under a fresh name and inserts a new spot.
    pub async fn add_spot(
        &self,
        name: &str,
        image: Option<ImageUpload>,
    ) -> DomainResult<AddScenicOutcome> {
        let image = image.filter(|i| !i.bytes.is_empty());
        let suffix = match &image {
            Some(upload) => match upload.suffix() {
                Some(suffix) => Some(suffix),
                None => return Ok(AddScenicOutcome::BadImageFormat),
            },
            None => None,
        };

        let name = name.trim();
        if name.is_empty() {
            return Ok(AddScenicOutcome::MissingName);
        }
        let (Some(upload), Some(suffix)) = (image, suffix) else {
            return Ok(AddScenicOutcome::MissingImage);
        };

        let file_name = self.images.save(&suffix, &upload.bytes).await?;
        let scenic = self
            .scenics
            .create_scenic(NewScenic {
                name: name.to_string(),
                image: file_name,
                category: ScenicCategory::Spot,
            })
            .await?;

        info!(scenic_id = scenic.id, name = %scenic.name, image = %scenic.image, "Scenic added");
        Ok(AddScenicOutcome::Added(scenic))
    }

    /// Deletes the listed scenics and their orders.
    pub async fn remove_scenics(&self, raw_ids: &[String]) -> DomainResult<StatusResult> {
        if raw_ids.is_empty() {
            warn!("Scenic removal without selection, nothing deleted");
            return Ok(StatusResult::fail(1, messages::NO_SCENIC_SELECTED));
        }

        let ids = match parse_ids(raw_ids) {
            Some(ids) => ids,
            None => return Ok(StatusResult::fail(3, messages::SCENIC_ID_INVALID)),
        };

        let removed = self.scenics.delete_scenics(&ids).await?;
        info!(requested = ids.len(), removed, "Scenics removed");
        Ok(StatusResult::ok_with(messages::SCENIC_REMOVED))
    }
}

/// Id from the recommendation forms, or the outcome that rejects it.
fn scenic_id(raw_id: Option<&str>, recommended: bool) -> Result<i32, RecommendOutcome> {
    let Some(raw_id) = required_keyword(raw_id) else {
        warn!(recommended, "Recommendation change without a scenic id, nothing changed");
        return Err(RecommendOutcome::MissingId);
    };
    raw_id.parse().map_err(|_| RecommendOutcome::UnknownScenic)
}
