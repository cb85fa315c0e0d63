//! Route-level tests driving the full router against a faked upstream API
//! and the in-memory credential store.

use axum::extract::FromRef;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::app::build_app;
use crate::auth::jwt::JwtKeys;
use crate::state::AppState;

async fn test_server() -> (TestServer, AppState, MockServer) {
    let upstream = MockServer::start().await;
    let state = AppState::fake(&upstream.uri());
    let server = TestServer::new(build_app(state.clone())).expect("test server");
    (server, state, upstream)
}

#[tokio::test]
async fn health_reports_ok() {
    let (server, _, _) = test_server().await;

    let res = server.get("/health").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>(),
        json!({"status": "OK", "message": "ShowDeck backend is running"})
    );
}

#[tokio::test]
async fn popular_returns_upstream_results_unchanged() {
    let (server, _, upstream) = test_server().await;

    let results = json!([
        {"id": 1, "name": "Mock Show 1", "overview": "Overview 1"},
        {"id": 2, "name": "Mock Show 2", "overview": "Overview 2", "poster_path": "/p2.jpg"}
    ]);
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .and(query_param("api_key", "test_api_key"))
        .and(query_param("language", "en-US"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": results,
            "total_pages": 10
        })))
        .mount(&upstream)
        .await;

    let res = server.get("/shows/popular").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.json::<Value>(), json!({ "results": results }));
}

#[tokio::test]
async fn popular_returns_500_when_upstream_fails() {
    let (server, _, upstream) = test_server().await;

    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let res = server.get("/shows/popular").await;
    assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.json::<Value>(),
        json!({"error": "Failed to fetch popular TV shows"})
    );
}

#[tokio::test]
async fn details_returns_show_for_valid_id() {
    let (server, _, upstream) = test_server().await;

    let detail = json!({
        "id": 123,
        "name": "Mock Show Detail",
        "overview": "Detailed overview",
        "poster_path": "/mockpath.jpg"
    });
    Mock::given(method("GET"))
        .and(path("/tv/123"))
        .and(query_param("api_key", "test_api_key"))
        .and(query_param("language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&detail))
        .mount(&upstream)
        .await;

    let res = server.get("/shows/123").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.json::<Value>(), detail);
}

#[tokio::test]
async fn details_maps_upstream_404_to_local_404() {
    let (server, _, upstream) = test_server().await;

    Mock::given(method("GET"))
        .and(path("/tv/123"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status_message": "The resource you requested could not be found."
        })))
        .mount(&upstream)
        .await;

    let res = server.get("/shows/123").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>(), json!({"error": "Show not found"}));
}

#[tokio::test]
async fn details_returns_500_when_upstream_fails() {
    let (server, _, upstream) = test_server().await;

    Mock::given(method("GET"))
        .and(path("/tv/123"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;

    let res = server.get("/shows/123").await;
    assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.json::<Value>(),
        json!({"error": "Failed to fetch TV show details"})
    );
}

#[tokio::test]
async fn register_login_roundtrip() {
    let (server, _, _) = test_server().await;

    let res = server
        .post("/auth/register")
        .json(&json!({"email": "a@x.com", "password": "pw123"}))
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);
    let registered = res.json::<Value>();
    assert!(registered["token"].is_string());
    assert_eq!(registered["user"]["email"], "a@x.com");

    let res = server
        .post("/auth/login")
        .json(&json!({"email": "a@x.com", "password": "pw123"}))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let logged_in = res.json::<Value>();
    assert_eq!(logged_in["user"]["id"], registered["user"]["id"]);

    let res = server
        .post("/auth/login")
        .json(&json!({"email": "a@x.com", "password": "wrong"}))
        .await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let (server, _, _) = test_server().await;

    for body in [
        json!({"email": "", "password": "pw123"}),
        json!({"email": "a@x.com", "password": ""}),
        json!({"email": "   ", "password": "pw123"}),
        json!({"email": "a@x.com"}),
        json!({}),
    ] {
        let res = server.post("/auth/register").json(&body).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            res.json::<Value>(),
            json!({"error": "Email and password required"})
        );
    }
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let (server, _, _) = test_server().await;

    let body = json!({"email": "a@x.com", "password": "pw123"});
    let res = server.post("/auth/register").json(&body).await;
    assert_eq!(res.status_code(), StatusCode::CREATED);

    let res = server.post("/auth/register").json(&body).await;
    assert_eq!(res.status_code(), StatusCode::CONFLICT);
    assert_eq!(res.json::<Value>(), json!({"error": "User already exists"}));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (server, _, _) = test_server().await;

    server
        .post("/auth/register")
        .json(&json!({"email": "a@x.com", "password": "pw123"}))
        .await;

    let wrong_password = server
        .post("/auth/login")
        .json(&json!({"email": "a@x.com", "password": "wrong"}))
        .await;
    let unknown_email = server
        .post("/auth/login")
        .json(&json!({"email": "nobody@x.com", "password": "pw123"}))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text(), unknown_email.text());
    assert_eq!(
        wrong_password.json::<Value>(),
        json!({"error": "Invalid email or password"})
    );
}

#[tokio::test]
async fn issued_token_verifies_and_carries_user_id() {
    let (server, state, _) = test_server().await;

    let res = server
        .post("/auth/register")
        .json(&json!({"email": "a@x.com", "password": "pw123"}))
        .await;
    let body = res.json::<Value>();
    let token = body["token"].as_str().expect("token");
    let user_id: Uuid = body["user"]["id"]
        .as_str()
        .expect("user id")
        .parse()
        .expect("uuid");

    let claims = JwtKeys::from_ref(&state).verify(token).expect("verify");
    assert_eq!(claims.sub, user_id);
}

#[tokio::test]
async fn email_is_trimmed_and_lowercased() {
    let (server, _, _) = test_server().await;

    let res = server
        .post("/auth/register")
        .json(&json!({"email": "  A@X.com ", "password": "pw123"}))
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>()["user"]["email"], "a@x.com");

    let res = server
        .post("/auth/login")
        .json(&json!({"email": "a@x.com", "password": "pw123"}))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
}
