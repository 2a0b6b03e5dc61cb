//! Router-level tests: real handlers, guard and repositories over an
//! in-memory database.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use super::{create_api_router, AppState, Catalog, Users};
use crate::domain::{ListingSource, NewScenic, ScenicCategory, ScenicFilter, ScenicRepositoryInterface, UserFilter};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::{
    OrderRepository, ScenicRepository, UserRepository,
};
use crate::infrastructure::database::{init_database, run_migrations, DatabaseConfig};
use crate::infrastructure::storage::{AssetStore, LocalObjectStorage};

struct TestApp {
    router: Router,
    scenics: Arc<ScenicRepository>,
    users: Arc<UserRepository>,
    images: TempDir,
    _uploads: TempDir,
    _avatars: TempDir,
}

async fn test_app(context_path: &str) -> TestApp {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&db).await.unwrap();

    let images = tempfile::tempdir().unwrap();
    let uploads = tempfile::tempdir().unwrap();
    let avatars = tempfile::tempdir().unwrap();

    let scenics = Arc::new(ScenicRepository::new(db.clone()));
    let orders = Arc::new(OrderRepository::new(db.clone()));
    let users = Arc::new(UserRepository::new(db.clone()));

    let catalog = Catalog::new(scenics.clone(), orders, AssetStore::new(images.path()));
    let user_service = Users::new(
        users.clone(),
        JwtConfig::default(),
        Arc::new(LocalObjectStorage::new(
            AssetStore::new(avatars.path()),
            "http://cdn.test/avatars",
        )),
        AssetStore::new(uploads.path()),
        format!("http://localhost{}/user/header", context_path),
    );
    user_service
        .ensure_default_admin("root", "root@x.com", "secret")
        .await
        .unwrap();

    let router = create_api_router(AppState {
        db,
        catalog: Arc::new(catalog),
        users: Arc::new(user_service),
        context_path: context_path.to_string(),
        started_at: Arc::new(Instant::now()),
    });

    TestApp {
        router,
        scenics,
        users,
        images,
        _uploads: uploads,
        _avatars: avatars,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn token(&self, username: &str, password: &str) -> String {
        let response = self
            .send(
                Request::post("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"username": username, "password": password}).to_string(),
                    ))
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        json_of(response).await["data"]["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    async fn get(&self, token: &str, uri: &str) -> Response {
        self.send(
            Request::get(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn post_form(&self, token: &str, uri: &str, form: &str) -> Response {
        self.send(
            Request::post(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn add_spots(&self, n: usize) {
        for i in 0..n {
            self.scenics
                .create_scenic(NewScenic {
                    name: format!("spot-{:02}", i),
                    image: "x.jpg".to_string(),
                    category: ScenicCategory::Spot,
                })
                .await
                .unwrap();
        }
    }
}

async fn json_of(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn protected_routes_need_an_admin_token() {
    let app = test_app("").await;

    let response = app
        .send(Request::get("/index").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get("garbage", "/user-control").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = app.token("root", "secret").await;
    let response = app.post_form(&token, "/addUser", "username=alice&email=a%40x.com&password=pw").await;
    assert_eq!(json_of(response).await, json!({"code": 0, "msg": "用户添加成功！"}));

    let member = app
        .send(
            Request::post("/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username":"alice","password":"pw"}"#))
                .unwrap(),
        )
        .await;
    assert_eq!(member.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn spot_listing_pages_through_twelve_rows() {
    let app = test_app("").await;
    app.add_spots(12).await;
    let token = app.token("root", "secret").await;

    let first = json_of(app.get(&token, "/scenic-control").await).await;
    assert_eq!(first["view"], "pages/scenic-control");
    assert_eq!(first["items"].as_array().unwrap().len(), 5);
    assert_eq!(first["items"][0]["name"], "spot-00");
    assert_eq!(first["page"]["rows"], 12);
    assert_eq!(first["page"]["totalPages"], 3);

    let third = json_of(app.get(&token, "/scenic-control?current=3").await).await;
    assert_eq!(third["items"].as_array().unwrap().len(), 2);
    assert_eq!(third["page"]["rows"], 12);

    let junk = json_of(app.get(&token, "/scenic-control?current=abc").await).await;
    assert_eq!(junk["page"]["current"], 1);

    let past_end = json_of(app.get(&token, "/scenic-control?current=7").await).await;
    assert!(past_end["items"].as_array().unwrap().is_empty());
    assert_eq!(past_end["page"]["rows"], 12);
}

#[tokio::test]
async fn largest_page_number_lists_nothing() {
    let app = test_app("").await;
    app.add_spots(12).await;
    let token = app.token("root", "secret").await;

    for uri in [
        "/scenic-control?current=18446744073709551615",
        "/scenic-control?current=3689348814741910325",
        "/user-control?current=18446744073709551615",
    ] {
        let response = app.get(&token, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let body = json_of(response).await;
        assert!(body["items"].as_array().unwrap().is_empty(), "{}", uri);
    }

    let body = json_of(
        app.get(&token, "/scenic-control?current=18446744073709551615")
            .await,
    )
    .await;
    assert_eq!(body["page"]["rows"], 12);
    assert_eq!(body["page"]["current"], u64::MAX);
}

#[tokio::test]
async fn blank_search_returns_message_without_results() {
    let app = test_app("").await;
    app.add_spots(3).await;
    let token = app.token("root", "secret").await;

    let body = json_of(app.get(&token, "/scenic/search?keyword=").await).await;
    assert_eq!(body["searchMsg"], "请输入搜素内容！");
    assert!(body["items"].as_array().unwrap().is_empty());

    let body = json_of(app.get(&token, "/scenic/search?keyword=spot-01").await).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["page"]["path"], "/scenic/search?keyword=spot-01");

    let body = json_of(app.get(&token, "/user/search?keyword=%20").await).await;
    assert_eq!(body["searchMsg"], "请输入搜素内容！");
}

#[tokio::test]
async fn empty_selection_mutates_nothing() {
    let app = test_app("").await;
    app.add_spots(2).await;
    let token = app.token("root", "secret").await;

    let body = json_of(app.post_form(&token, "/removeScenic", "").await).await;
    assert_eq!(body, json!({"code": 1, "msg": "未选择景点！"}));
    assert_eq!(app.scenics.count(&ScenicFilter::default()).await.unwrap(), 2);

    let body = json_of(app.post_form(&token, "/removeUser", "").await).await;
    assert_eq!(body, json!({"code": 1, "msg": "未选择用户！"}));
    let body = json_of(app.post_form(&token, "/banUser", "").await).await;
    assert_eq!(body["code"], 1);
    assert_eq!(app.users.count(&UserFilter::default()).await.unwrap(), 1);

    let body = json_of(app.post_form(&token, "/removeScenic", "list%5B%5D=1&list%5B%5D=2").await).await;
    assert_eq!(body, json!({"code": 0, "msg": "景点删除成功！"}));
    assert_eq!(app.scenics.count(&ScenicFilter::default()).await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = test_app("").await;
    let token = app.token("root", "secret").await;

    let form = "username=alice&email=a%40x.com&password=pw";
    assert_eq!(json_of(app.post_form(&token, "/addUser", form).await).await["code"], 0);

    let body = json_of(app.post_form(&token, "/addUser", "username=alice&email=b%40x.com&password=pw").await).await;
    assert_eq!(body, json!({"code": 1, "msg": "该用户名已存在！"}));
    assert_eq!(app.users.count(&UserFilter::default()).await.unwrap(), 2);
}

#[tokio::test]
async fn ban_toggle_moves_user_to_ban_list() {
    let app = test_app("").await;
    let token = app.token("root", "secret").await;
    app.post_form(&token, "/addUser", "username=alice&email=a%40x.com&password=pw")
        .await;

    let body = json_of(app.post_form(&token, "/banUser", "list%5B%5D=oops").await).await;
    assert_eq!(body, json!({"code": 3, "msg": "参数格式错误！"}));

    let listed = json_of(app.get(&token, "/user-control").await).await;
    let alice = listed["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "alice")
        .unwrap()
        .clone();
    let form = format!("list%5B%5D={}%3F{}", alice["id"], alice["status"]);
    let body = json_of(app.post_form(&token, "/banUser", &form).await).await;
    assert_eq!(body["code"], 0);

    let banned = json_of(app.get(&token, "/user/ban").await).await;
    assert_eq!(banned["items"][0]["username"], "alice");
    assert_eq!(banned["items"][0]["status"], 1);
}

#[tokio::test]
async fn recommendation_errors_render_dashboard() {
    let app = test_app("").await;
    app.add_spots(1).await;
    let token = app.token("root", "secret").await;

    let response = app.post_form(&token, "/recommend", "recommendScenic=").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_of(response).await;
    assert_eq!(body["view"], "index");
    assert_eq!(body["recommendMsg"], "请填写景点id");

    let response = app.post_form(&token, "/removeRecommend", "removeRecommend=1").await;
    assert_eq!(json_of(response).await["recommendCountMsg"], "推荐景点不足！");

    let response = app.post_form(&token, "/recommend", "recommendScenic=1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/index");

    let index = json_of(app.get(&token, "/index").await).await;
    assert_eq!(index["recommendCount"], 1);
    assert_eq!(index["maxRecommended"], 6);
}

#[tokio::test]
async fn audit_reports_status_codes() {
    let app = test_app("").await;
    let token = app.token("root", "secret").await;

    let body = json_of(app.post_form(&token, "/audit", "audit=5&auditId=1").await).await;
    assert_eq!(body, json!({"code": 1, "msg": "审核状态错误！"}));
    let body = json_of(app.post_form(&token, "/audit", "audit=1&auditId=1").await).await;
    assert_eq!(body, json!({"code": 2, "msg": "订单不存在！"}));
}

#[tokio::test]
async fn password_form_validates_then_signs_out() {
    let app = test_app("").await;
    let token = app.token("root", "secret").await;

    let body = json_of(app.post_form(&token, "/user/update", "password=a&passwordRe=b").await).await;
    assert_eq!(body["view"], "pages/setting");
    assert_eq!(body["passwordReMsg"], "两次密码不相同");

    let response = app.post_form(&token, "/user/update", "password=new&passwordRe=new").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/logout");

    let logout = json_of(app.send(Request::get("/logout").body(Body::empty()).unwrap()).await).await;
    assert_eq!(logout["view"], "login");
    app.token("root", "new").await;
}

fn multipart(field: &str, file_name: &str, bytes: &[u8], text: &[(&str, &str)]) -> (String, Vec<u8>) {
    let boundary = "XBOUNDARYX";
    let mut body = Vec::new();
    for (name, value) in text {
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

#[tokio::test]
async fn added_scenic_image_is_served_back() {
    let app = test_app("").await;
    let token = app.token("root", "secret").await;

    let (content_type, body) = multipart("scenicImg", "lake", b"img", &[("scenicName", "Lake")]);
    let response = app
        .send(
            Request::post("/addScenic")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await;
    let view = json_of(response).await;
    assert_eq!(view["view"], "site/setting");
    assert_eq!(view["headerImgMsg"], "图片格式错误！");

    let (content_type, body) = multipart("scenicImg", "lake.png", b"img", &[("scenicName", "Lake")]);
    let response = app
        .send(
            Request::post("/addScenic")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/scenic-control");

    let listed = json_of(app.get(&token, "/scenic-control").await).await;
    let image_url = listed["items"][0]["imageUrl"].as_str().unwrap().to_string();
    let image = app
        .send(Request::get(&image_url).body(Body::empty()).unwrap())
        .await;
    assert_eq!(image.status(), StatusCode::OK);
    assert_eq!(image.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = axum::body::to_bytes(image.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"img");
}

#[tokio::test]
async fn asset_routes_reject_traversal() {
    let app = test_app("").await;
    std::fs::write(app.images.path().join("ok.gif"), b"gif").unwrap();

    for uri in ["/scenicImg/..%2F..%2Fetc%2Fpasswd", "/scenicImg/..", "/user/header/..%5Csecret"] {
        let response = app.send(Request::get(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }

    let missing = app
        .send(Request::get("/scenicImg/none.gif").body(Body::empty()).unwrap())
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let found = app
        .send(Request::get("/scenicImg/ok.gif").body(Body::empty()).unwrap())
        .await;
    assert_eq!(found.headers()[header::CONTENT_TYPE], "image/gif");
}

#[tokio::test]
async fn context_path_prefixes_routes_and_redirects() {
    let app = test_app("/admin").await;

    let health = app
        .send(Request::get("/admin/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(json_of(health).await["status"], "ok");

    let response = app
        .send(
            Request::post("/admin/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username":"root","password":"secret"}"#))
                .unwrap(),
        )
        .await;
    let token = json_of(response).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let (content_type, body) = multipart("headerImg", "me.jpg", b"face", &[]);
    let response = app
        .send(
            Request::post("/admin/upload")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/setting");

    let setting = json_of(app.get(&token, "/admin/setting").await).await;
    let url = setting["user"]["headerUrl"].as_str().unwrap();
    let path = url.strip_prefix("http://localhost").unwrap();
    assert!(path.starts_with("/admin/user/header/"));

    let avatar = app.send(Request::get(path).body(Body::empty()).unwrap()).await;
    assert_eq!(avatar.status(), StatusCode::OK);
    assert_eq!(avatar.headers()[header::CONTENT_TYPE], "image/jpeg");
}

#[tokio::test]
async fn openapi_document_lists_form_routes() {
    let app = test_app("").await;
    let response = app
        .send(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_of(response).await;

    for path in [
        "/recommend",
        "/removeRecommend",
        "/addScenic",
        "/user/update",
        "/header/url",
        "/upload",
        "/removeScenic",
        "/scenic-control",
    ] {
        assert!(doc["paths"][path]["post"].is_object() || doc["paths"][path]["get"].is_object(), "{}", path);
    }
    assert!(doc["components"]["schemas"]["AddScenicUpload"].is_object());
}
