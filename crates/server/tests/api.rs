use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

const BOT_SECRET: &str = "bot-secret";

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder().database(db).build().await.unwrap();

    let state = server::ServerState::new(
        engine,
        &server::ServerConfig {
            token_secret: "test-token-secret".to_string(),
            bot_secret: BOT_SECRET.to_string(),
            access_ttl_minutes: 60,
            refresh_ttl_days: 30,
        },
    );
    server::router(state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn bot_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-bot-secret", BOT_SECRET)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers a user, shares a phone and walks the OTP login, returning the
/// access token.
async fn login(app: &Router, telegram_id: &str, phone: &str) -> String {
    let response = app
        .clone()
        .oneshot(bot_post(
            "/api/v1/auth/bot/register",
            json!({"telegram_id": telegram_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(bot_post(
            "/api/v1/auth/bot/update",
            json!({"telegram_id": telegram_id, "phone_number": phone}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(bot_post(
            "/api/v1/auth/bot/otp",
            json!({"telegram_id": telegram_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    let code = body["result"]["otp_code"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({"phone_number": phone, "otp_code": code}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], json!(true));
    body["result"]["access_token"].as_str().unwrap().to_string()
}

fn bearer_get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn bot_endpoints_require_the_shared_secret() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/bot/register",
            json!({"telegram_id": "100"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = read_json(response).await;
    assert_eq!(body["ok"], json!(false));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_router().await;

    let first = app
        .clone()
        .oneshot(bot_post(
            "/api/v1/auth/bot/register",
            json!({"telegram_id": "100"}),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .clone()
        .oneshot(bot_post(
            "/api/v1/auth/bot/register",
            json!({"telegram_id": "100"}),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn otp_login_flow_returns_working_tokens() {
    let app = test_router().await;
    let token = login(&app, "100", "+998901112233").await;

    let response = app
        .clone()
        .oneshot(bearer_get("/api/v1/auth/me", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["result"]["telegram_id"], json!("100"));
}

#[tokio::test]
async fn bad_login_is_rejected_with_the_error_envelope() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({"phone_number": "+998901112233", "otp_code": "123456"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["ok"], json!(false));
}

#[tokio::test]
async fn a_new_login_invalidates_older_access_tokens() {
    let app = test_router().await;
    let old_token = login(&app, "100", "+998901112233").await;

    // Second login re-stamps login_time.
    let response = app
        .clone()
        .oneshot(bot_post("/api/v1/auth/bot/otp", json!({"telegram_id": "100"})))
        .await
        .unwrap();
    let body = read_json(response).await;
    let code = body["result"]["otp_code"].as_str().unwrap().to_string();
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({"phone_number": "+998901112233", "otp_code": code}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(bearer_get("/api/v1/auth/me", &old_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_reject_missing_tokens() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/book/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn base_reads_are_public() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/base/regions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["result"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn book_lifecycle_over_http() {
    let app = test_router().await;
    let token = login(&app, "100", "+998901112233").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/book/")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    json!({
                        "name": "O'tkan kunlar",
                        "author": "Abdulla Qodiriy",
                        "description": "Tarixiy roman",
                        "price": 50000,
                        "cover_type": "hard",
                        "book_type": "seller"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    let book_id = body["result"]["id"].as_i64().unwrap();
    assert_eq!(body["result"]["owner_type"], json!("user"));
    assert_eq!(body["result"]["can_update"], json!(true));

    let response = app
        .clone()
        .oneshot(bearer_get("/api/v1/book/?q=kunlar", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["result"]["total_elements"], json!(1));

    let response = app
        .clone()
        .oneshot(bearer_get("/api/v1/book/?price_min=abc", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/book/{book_id}/like"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["result"]["liked"], json!(true));
}
