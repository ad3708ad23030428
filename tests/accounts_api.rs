use account_registry::{app, config::ServerConfig};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::fs;
use tempdir::TempDir;
use tower::util::ServiceExt;

const SEED: &str = r#"{
    "1001": {
        "name": "Umbrella", "orgno": 1001,
        "leader_title": "CEO", "leader_name": "Albert", "type": "AS"
    },
    "1002": {
        "name": "Acme", "orgno": 1002,
        "leader_title": "Chair", "leader_name": "Wile", "type": "LLC"
    },
    "1003": {
        "name": "Globex", "orgno": 1003,
        "leader_title": "CEO", "leader_name": "Hank", "type": "ASA"
    }
}"#;

fn seeded_app(dir: &TempDir) -> Router {
    let seed_path = dir.path().join("accounts.json");
    fs::write(&seed_path, SEED).unwrap();

    let config = ServerConfig {
        seed_path: Some(seed_path),
        ..Default::default()
    };

    let (_container, router) = app(&config).unwrap();
    router
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, serde_json::from_slice(&body).unwrap())
}

fn names(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|account| account["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_seeded_registry_is_served() {
    let dir = TempDir::new("account-registry").unwrap();
    let app = seeded_app(&dir);

    let (status, body) = call(&app, Method::GET, "/api/v1/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!(true));
    assert_eq!(names(&body), ["Acme", "Globex", "Umbrella"]);

    let (status, body) = call(&app, Method::GET, "/api/v1/account/1002", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["leader_name"], json!("Wile"));
}

#[tokio::test]
async fn test_account_lifecycle() {
    let dir = TempDir::new("account-registry").unwrap();
    let app = seeded_app(&dir);
    let account = json!({
        "name": "Acme",
        "orgno": 42,
        "leader_title": "CEO",
        "leader_name": "Jo",
        "type": "LLC"
    });

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/accounts/add",
        Some(account.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!(true));

    let (_, body) = call(&app, Method::GET, "/api/v1/account/42", None).await;
    assert_eq!(body["data"], account);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/accounts/add",
        Some(account.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["result"], json!(false));

    let (_, body) = call(&app, Method::GET, "/api/v1/accounts/2", None).await;
    assert_eq!(names(&body), ["Acme", "Acme"]);

    let (_, body) = call(
        &app,
        Method::PUT,
        "/api/v1/accounts/edit/42",
        Some(json!({"name": "Zeta"})),
    )
    .await;
    assert_eq!(body["message"], json!("successfully updated"));
    assert_eq!(body["data"]["name"], json!("Zeta"));

    let (_, body) = call(&app, Method::DELETE, "/api/v1/accounts/delete/42", None).await;
    assert_eq!(body["result"], json!(true));

    let (status, body) = call(&app, Method::GET, "/api/v1/account/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["result"], json!(false));
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_envelope_shape() {
    let dir = TempDir::new("account-registry").unwrap();
    let app = seeded_app(&dir);

    let (_, first) = call(&app, Method::GET, "/api/v1/test", None).await;
    let (_, second) = call(&app, Method::GET, "/api/v1/account/abc", None).await;

    assert_eq!(first["id"], json!(0));
    assert_eq!(first["result"], json!(true));
    assert!(first["message"].is_string());

    assert_eq!(second["id"], json!(1));
    assert_eq!(second["result"], json!(false));
    assert_eq!(
        second["message"],
        json!("account id `abc` is not an integer")
    );
}

#[test]
fn test_malformed_seed_aborts_startup() {
    let dir = TempDir::new("account-registry").unwrap();
    let seed_path = dir.path().join("accounts.json");
    fs::write(&seed_path, r#"["not", "an", "object"]"#).unwrap();

    let config = ServerConfig {
        seed_path: Some(seed_path),
        ..Default::default()
    };

    assert!(app(&config).is_err());
}

#[test]
fn test_missing_seed_aborts_startup() {
    let dir = TempDir::new("account-registry").unwrap();
    let config = ServerConfig {
        seed_path: Some(dir.path().join("absent.json")),
        ..Default::default()
    };

    assert!(app(&config).is_err());
}
