//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    middleware,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, OrderDto, PageDto, ScenicDto, SettingView, UserDto};
use super::middleware::{require_login, AuthState};
use super::modules::assets::{self, AssetState};
use super::modules::health::{self, HealthState};
use super::modules::request_id::request_id_middleware;
use super::modules::scenics::{self, ScenicState};
use super::modules::users::{self, UserState};
use super::modules::auth;
use crate::application::{CatalogService, UserService};
use crate::infrastructure::database::repositories::{
    OrderRepository, ScenicRepository, UserRepository,
};
use crate::infrastructure::storage::AssetStore;
use crate::shared::StatusResult;

pub type Catalog = CatalogService<ScenicRepository, OrderRepository>;
pub type Users = UserService<UserRepository>;

/// Largest multipart body accepted by the upload routes.
const UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

/// Everything the handlers share. Each handler extracts only its own slice
/// through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub catalog: Arc<Catalog>,
    pub users: Arc<Users>,
    /// Prefix prepended to redirect targets, e.g. `/admin`. Empty for none.
    pub context_path: String,
    pub started_at: Arc<Instant>,
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        AuthState {
            users: Arc::clone(&s.users),
        }
    }
}

impl FromRef<AppState> for ScenicState {
    fn from_ref(s: &AppState) -> Self {
        ScenicState {
            catalog: Arc::clone(&s.catalog),
            context_path: s.context_path.clone(),
        }
    }
}

impl FromRef<AppState> for UserState {
    fn from_ref(s: &AppState) -> Self {
        UserState {
            users: Arc::clone(&s.users),
            context_path: s.context_path.clone(),
        }
    }
}

impl FromRef<AppState> for AssetState {
    fn from_ref(s: &AppState) -> Self {
        AssetState {
            scenic_images: s.catalog.images().clone(),
            uploads: AssetStore::clone(s.users.uploads()),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::logout,
        scenics::index,
        scenics::list_spots,
        scenics::list_reservations,
        scenics::list_products,
        scenics::list_purchases,
        scenics::search_spots,
        scenics::audit,
        scenics::recommend,
        scenics::remove_recommend,
        scenics::add_scenic,
        scenics::remove_scenic,
        users::list_users,
        users::list_banned,
        users::list_by_type,
        users::search_users,
        users::setting,
        users::add_user,
        users::remove_user,
        users::ban_user,
        users::update_password,
        users::upload_header,
        users::upload_header_local,
        assets::scenic_image,
        assets::user_header,
    ),
    components(
        schemas(
            ApiResponse<String>,
            StatusResult,
            PageDto,
            ScenicDto,
            OrderDto,
            UserDto,
            SettingView,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::LoginView,
            scenics::IndexView,
            scenics::AuditForm,
            scenics::RecommendForm,
            scenics::RemoveRecommendForm,
            scenics::AddScenicUpload,
            users::AddUserForm,
            users::PasswordForm,
            users::HeaderUpload,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Authentication", description = "Admin sign-in (JWT) and sign-out"),
        (name = "Scenics", description = "Spots, products, orders and recommendations"),
        (name = "Users", description = "User accounts, bans and settings"),
        (name = "Assets", description = "Stored scenic images and avatars"),
    ),
    info(
        title = "Travel Admin API",
        version = "0.1.0",
        description = "Administrative backend of the travel booking site"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let auth_state = AuthState::from_ref(&state);

    let protected = Router::new()
        .route("/index", get(scenics::index))
        .route("/scenic-control", get(scenics::list_spots))
        .route("/scenic-controll", get(scenics::list_reservations))
        .route("/scenic-controlll", get(scenics::list_products))
        .route("/scenic-controllll", get(scenics::list_purchases))
        .route("/scenic/search", get(scenics::search_spots))
        .route("/audit", post(scenics::audit))
        .route("/recommend", post(scenics::recommend))
        .route("/removeRecommend", post(scenics::remove_recommend))
        .route("/removeScenic", post(scenics::remove_scenic))
        .route("/user-control", get(users::list_users))
        .route("/user/ban", get(users::list_banned))
        .route("/user/userType", get(users::list_by_type))
        .route("/user/search", get(users::search_users))
        .route("/setting", get(users::setting))
        .route("/user/update", post(users::update_password))
        .route("/addUser", post(users::add_user))
        .route("/removeUser", post(users::remove_user))
        .route("/banUser", post(users::ban_user))
        .merge(
            Router::new()
                .route("/addScenic", post(scenics::add_scenic))
                .route("/header/url", post(users::upload_header))
                .route("/upload", post(users::upload_header_local))
                .layer(DefaultBodyLimit::max(UPLOAD_LIMIT)),
        )
        .layer(middleware::from_fn_with_state(auth_state, require_login));

    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/scenicImg/{imageName}", get(assets::scenic_image))
        .route("/user/header/{filename}", get(assets::user_header));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(protected)
        .merge(public)
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors);

    match state.context_path.as_str() {
        "" | "/" => app,
        prefix => Router::new().nest(prefix, app),
    }
}
