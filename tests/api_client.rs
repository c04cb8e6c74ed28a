use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use squarefeet_console::api::admin::AdminApi;
use squarefeet_console::api::advisor::AdvisorApi;
use squarefeet_console::api::ApiClient;
use squarefeet_console::auth::{AuthClient, HttpAuthClient, MockAuthClient, SessionManager};
use squarefeet_console::credentials::CredentialStore;
use squarefeet_console::model::LeadStatus;
use squarefeet_console::storage::MemoryStorage;
use squarefeet_console::{ConsoleConfig, Credentials, Error, Role};

const TOKEN: &str = "server-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != "pw" {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "token": TOKEN,
        "user": {
            "id": "advisor-042",
            "name": "Neha Singh",
            "email": body["email"],
            "role": body["role"],
            "avatar": null
        }
    }))
    .into_response()
}

async fn advisor_leads(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([
        {"id": 1, "name": "Rahul Sharma", "email": "rahul@email.com", "phone": "+91 98765 43210",
         "project": "Green Valley Heights", "interest": "high", "status": "contacted",
         "lastContact": "2 hours ago"}
    ]))
    .into_response()
}

async fn lead_status(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({ "updated": body["status"] })).into_response()
}

async fn lead_remarks(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([
        {"id": 1, "text": "Interested in 3BHK, budget 1.2 Cr", "author": "Vijay Kumar", "date": "Jan 21, 2024"},
        {"id": 1705830000000u64, "text": "Site visit scheduled", "date": "1/21/2024"}
    ]))
    .into_response()
}

async fn confirm_visit() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn always_unauthorized() -> StatusCode {
    StatusCode::UNAUTHORIZED
}

async fn always_forbidden() -> StatusCode {
    StatusCode::FORBIDDEN
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn spawn_api() -> SocketAddr {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/advisor/leads", get(advisor_leads))
        .route("/api/advisor/leads/{id}/remarks", get(lead_remarks))
        .route("/api/admin/leads/{id}/status", put(lead_status))
        .route("/api/advisor/site-visits/{id}/confirm", put(confirm_visit))
        .route("/api/admin/projects", get(always_unauthorized))
        .route("/api/admin/advisors", get(always_forbidden))
        .route("/api/admin/dashboard/stats", get(broken));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config(addr: SocketAddr) -> ConsoleConfig {
    ConsoleConfig {
        api_base_url: format!("http://{addr}/api"),
        ..ConsoleConfig::default()
    }
}

#[tokio::test]
async fn http_login_then_authorized_calls() {
    let addr = spawn_api().await;
    let config = config(addr);

    let store = CredentialStore::new(Arc::new(MemoryStorage::new()));
    let manager = Arc::new(SessionManager::new(
        store.clone(),
        Arc::new(HttpAuthClient::new(&config).unwrap()),
    ));
    manager.init().await.unwrap();

    let user = manager
        .login(Credentials::new("neha@squarefeet.com", "pw", Role::Advisor))
        .await
        .unwrap();
    assert_eq!(user.id, "advisor-042");
    assert_eq!(user.role, Role::Advisor);

    let client = ApiClient::new(&config, store).unwrap().with_expiry_handler(manager.clone());

    let leads = AdvisorApi::new(&client).leads().assigned().await.unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].last_contact.as_deref(), Some("2 hours ago"));

    let remarks = AdvisorApi::new(&client).leads().remarks(1).await.unwrap();
    assert_eq!(remarks.len(), 2);
    assert_eq!(remarks[0].author.as_deref(), Some("Vijay Kumar"));
    assert_eq!(remarks[1].id, 1_705_830_000_000);
    assert_eq!(remarks[1].text, "Site visit scheduled");
    assert!(remarks[1].author.is_none());

    let updated = AdminApi::new(&client)
        .leads()
        .update_status(1, LeadStatus::Converted)
        .await
        .unwrap();
    assert_eq!(updated, json!({ "updated": "converted" }));

    let confirmed = AdvisorApi::new(&client).site_visits().confirm(3).await.unwrap();
    assert_eq!(confirmed, Value::Null);
    assert!(manager.is_authenticated());
}

#[tokio::test]
async fn http_login_rejects_bad_password() {
    let addr = spawn_api().await;
    let client = HttpAuthClient::new(&config(addr)).unwrap();
    let err = client
        .authenticate(&Credentials::new("neha@squarefeet.com", "wrong", Role::Advisor))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));
}

#[tokio::test]
async fn unauthorized_response_signs_out() {
    let addr = spawn_api().await;
    let config = config(addr);

    let storage = Arc::new(MemoryStorage::new());
    let store = CredentialStore::new(storage.clone());
    let manager = Arc::new(SessionManager::new(store.clone(), Arc::new(MockAuthClient::new())));
    manager.init().await.unwrap();
    manager
        .login(Credentials::new("boss@squarefeet.com", "secret", Role::Admin))
        .await
        .unwrap();

    let client = ApiClient::new(&config, store).unwrap().with_expiry_handler(manager.clone());
    let err = AdminApi::new(&client).projects().list().await.unwrap_err();

    assert!(matches!(err, Error::Unauthorized));
    assert!(!manager.is_authenticated());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn forbidden_response_keeps_session() {
    let addr = spawn_api().await;
    let config = config(addr);

    let storage = Arc::new(MemoryStorage::new());
    let store = CredentialStore::new(storage.clone());
    let manager = Arc::new(SessionManager::new(store.clone(), Arc::new(MockAuthClient::new())));
    manager.init().await.unwrap();
    manager
        .login(Credentials::new("boss@squarefeet.com", "secret", Role::Admin))
        .await
        .unwrap();

    let client = ApiClient::new(&config, store).unwrap().with_expiry_handler(manager.clone());
    let err = AdminApi::new(&client).advisors().list().await.unwrap_err();

    assert!(matches!(err, Error::Forbidden));
    assert!(manager.is_authenticated());
    assert_eq!(storage.len(), 2);

    match AdminApi::new(&client).dashboard().stats().await.unwrap_err() {
        Error::Api { status, message } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected {other:?}"),
    }
}
