//! Scenic admin handlers

use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    response::{IntoResponse, Response},
    Form, Json,
};

use super::dto::{
    AddScenicUpload, AuditForm, IndexView, RecommendForm, RemoveRecommendForm, ScenicSearchQuery,
};
use crate::application::{messages, AddScenicOutcome, RecommendOutcome};
use crate::domain::DomainError;
use crate::interfaces::http::common::{
    redirect, selected_values, ApiError, ListingView, PageQuery, OrderDto, ScenicDto, SettingView,
    UploadForm,
};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::router::Catalog;
use crate::shared::{Page, StatusResult};

#[derive(Clone)]
pub struct ScenicState {
    pub catalog: Arc<Catalog>,
    pub context_path: String,
}

fn current(raw: &Option<String>) -> u64 {
    Page::parse_current(raw.as_deref())
}

// ── Pages ───────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/index",
    tag = "Scenics",
    responses((status = 200, description = "Dashboard view", body = IndexView)),
    security(("bearer_auth" = []))
)]
pub async fn index(State(state): State<ScenicState>) -> Result<Json<IndexView>, ApiError> {
    let dashboard = state.catalog.dashboard().await?;
    Ok(Json(IndexView::from(dashboard)))
}

#[utoipa::path(
    get,
    path = "/scenic-control",
    tag = "Scenics",
    params(PageQuery),
    responses((status = 200, description = "Spot listing view")),
    security(("bearer_auth" = []))
)]
pub async fn list_spots(
    State(state): State<ScenicState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListingView<ScenicDto>>, ApiError> {
    let listing = state.catalog.list_spots(query.page()).await?;
    Ok(Json(ListingView::new("pages/scenic-control", listing)))
}

#[utoipa::path(
    get,
    path = "/scenic-controll",
    tag = "Scenics",
    params(PageQuery),
    responses((status = 200, description = "Reservation listing view")),
    security(("bearer_auth" = []))
)]
pub async fn list_reservations(
    State(state): State<ScenicState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListingView<OrderDto>>, ApiError> {
    let listing = state.catalog.list_spot_orders(query.page()).await?;
    Ok(Json(ListingView::new("pages/scenic-controll", listing)))
}

#[utoipa::path(
    get,
    path = "/scenic-controlll",
    tag = "Scenics",
    params(PageQuery),
    responses((status = 200, description = "Product listing view")),
    security(("bearer_auth" = []))
)]
pub async fn list_products(
    State(state): State<ScenicState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListingView<ScenicDto>>, ApiError> {
    let listing = state.catalog.list_products(query.page()).await?;
    Ok(Json(ListingView::new("pages/scenic-controlll", listing)))
}

#[utoipa::path(
    get,
    path = "/scenic-controllll",
    tag = "Scenics",
    params(PageQuery),
    responses((status = 200, description = "Purchase listing view")),
    security(("bearer_auth" = []))
)]
pub async fn list_purchases(
    State(state): State<ScenicState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListingView<OrderDto>>, ApiError> {
    let listing = state
        .catalog
        .list_product_orders(query.page())
        .await?;
    Ok(Json(ListingView::new("pages/scenic-controllll", listing)))
}

#[utoipa::path(
    get,
    path = "/scenic/search",
    tag = "Scenics",
    params(ScenicSearchQuery),
    responses((status = 200, description = "Spot search view; `searchMsg` set when the keyword is blank")),
    security(("bearer_auth" = []))
)]
pub async fn search_spots(
    State(state): State<ScenicState>,
    Query(query): Query<ScenicSearchQuery>,
) -> Result<Json<ListingView<ScenicDto>>, ApiError> {
    const VIEW: &str = "pages/scenic-control";

    match state
        .catalog
        .search_spots(query.keyword.as_deref(), current(&query.current))
        .await
    {
        Ok(listing) => Ok(Json(ListingView::new(VIEW, listing))),
        Err(DomainError::Validation(msg)) => {
            Ok(Json(ListingView::rejected(VIEW, "/scenic/search", msg)))
        }
        Err(e) => Err(e.into()),
    }
}

// ── Mutations ───────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/audit",
    tag = "Scenics",
    request_body(content = AuditForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Status result", body = StatusResult)),
    security(("bearer_auth" = []))
)]
pub async fn audit(
    State(state): State<ScenicState>,
    Form(form): Form<AuditForm>,
) -> Result<Json<StatusResult>, ApiError> {
    let status = state
        .catalog
        .update_audit(&form.audit_id, &form.audit)
        .await?;
    Ok(Json(status))
}

#[utoipa::path(
    post,
    path = "/recommend",
    tag = "Scenics",
    request_body(content = RecommendForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Recommended; redirect to `/index`"),
        (status = 200, description = "Dashboard with `recommendMsg` or `recommendCountMsg`", body = IndexView)
    ),
    security(("bearer_auth" = []))
)]
pub async fn recommend(
    State(state): State<ScenicState>,
    Form(form): Form<RecommendForm>,
) -> Result<Response, ApiError> {
    let outcome = state
        .catalog
        .recommend(form.recommend_scenic.as_deref())
        .await?;
    after_recommendation(&state, outcome, false).await
}

#[utoipa::path(
    post,
    path = "/removeRecommend",
    tag = "Scenics",
    request_body(content = RemoveRecommendForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Recommendation removed; redirect to `/index`"),
        (status = 200, description = "Dashboard with `removeRecommendMsg` or `recommendCountMsg`", body = IndexView)
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_recommend(
    State(state): State<ScenicState>,
    Form(form): Form<RemoveRecommendForm>,
) -> Result<Response, ApiError> {
    let outcome = state
        .catalog
        .remove_recommend(form.remove_recommend.as_deref())
        .await?;
    after_recommendation(&state, outcome, true).await
}

/// Redirects home on success, otherwise re-renders the dashboard with the
/// message on the field of the form that failed.
async fn after_recommendation(
    state: &ScenicState,
    outcome: RecommendOutcome,
    removing: bool,
) -> Result<Response, ApiError> {
    if outcome == RecommendOutcome::Done {
        return Ok(redirect(&state.context_path, "/index"));
    }
    let mut view = IndexView::from(state.catalog.dashboard().await?);

    let msg = |text: &str| Some(text.to_string());
    match (outcome, removing) {
        (RecommendOutcome::LimitReached, _) => view.recommend_count_msg = msg(messages::RECOMMEND_FULL),
        (RecommendOutcome::NoneRecommended, _) => {
            view.recommend_count_msg = msg(messages::RECOMMEND_EMPTY)
        }
        (RecommendOutcome::MissingId, false) => view.recommend_msg = msg(messages::SCENIC_ID_REQUIRED),
        (RecommendOutcome::MissingId, true) => {
            view.remove_recommend_msg = msg(messages::SCENIC_ID_REQUIRED)
        }
        (RecommendOutcome::UnknownScenic, false) => {
            view.recommend_msg = msg(messages::SCENIC_NOT_FOUND)
        }
        (RecommendOutcome::UnknownScenic, true) => {
            view.remove_recommend_msg = msg(messages::SCENIC_NOT_FOUND)
        }
        (RecommendOutcome::Done, _) => {}
    }

    Ok(Json(view).into_response())
}

/// Multipart `{scenicName, scenicImg}`.
#[utoipa::path(
    post,
    path = "/addScenic",
    tag = "Scenics",
    request_body(content = AddScenicUpload, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Spot added; redirect to `/scenic-control`"),
        (status = 200, description = "Setting view with `headerImgMsg`", body = SettingView)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_scenic(
    State(state): State<ScenicState>,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut form = UploadForm::read(multipart).await?;
    let image = form.take_file("scenicImg");
    let outcome = state.catalog.add_spot(form.text("scenicName"), image).await?;

    let msg = match outcome {
        AddScenicOutcome::Added(_) => return Ok(redirect(&state.context_path, "/scenic-control")),
        AddScenicOutcome::BadImageFormat => messages::IMAGE_FORMAT_INVALID,
        AddScenicOutcome::MissingName => messages::SCENIC_NAME_REQUIRED,
        AddScenicOutcome::MissingImage => messages::IMAGE_REQUIRED,
    };
    Ok(Json(SettingView::site(user).with_header_msg(msg)).into_response())
}

#[utoipa::path(
    post,
    path = "/removeScenic",
    tag = "Scenics",
    request_body(content = String, description = "`list[]` ids", content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Status result", body = StatusResult)),
    security(("bearer_auth" = []))
)]
pub async fn remove_scenic(
    State(state): State<ScenicState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<StatusResult>, ApiError> {
    let ids = selected_values(&pairs, "list");
    Ok(Json(state.catalog.remove_scenics(&ids).await?))
}
