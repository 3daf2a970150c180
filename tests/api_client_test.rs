use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use timetable_console::client::{ApiClient, HttpTransport};
use timetable_console::config::ConsoleConfig;
use timetable_console::error::ApiError;
use timetable_console::models::{Department, Faculty, NewDepartmentRequest};
use timetable_console::toast::{ToastKind, Toaster};

/// Serves a tiny fake of the timetable API on an ephemeral port.
async fn spawn_fake_api() -> SocketAddr {
    let app = Router::new()
        .route(
            "/api/departments/",
            get(|| async { Json(json!([{"id": 1, "name": "Physics"}])) }).post(
                |Json(body): Json<Value>| async move {
                    Json(json!({"id": 2, "name": body["name"]}))
                },
            ),
        )
        .route(
            "/api/faculties/",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "db error") }),
        )
        .route("/api/courses/", get(|| async { StatusCode::BAD_GATEWAY }))
        .route(
            "/api/generate/",
            post(|| async { Json(json!({"message": "Timetable generated successfully", "timetable_id": 9})) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> ApiClient {
    let config = ConsoleConfig {
        api_base_url: format!("http://{}/api", addr),
        addr,
        request_timeout: Duration::from_secs(5),
    };
    let transport = HttpTransport::new(&config).expect("Failed to build transport");
    ApiClient::new(Arc::new(transport), Toaster::new())
}

#[tokio::test]
async fn lists_and_creates_over_http() {
    let api = client_for(spawn_fake_api().await);

    let departments = api.list::<Department>().await.unwrap();
    assert_eq!(departments, vec![Department { id: 1, name: "Physics".into() }]);

    let created = api
        .create::<Department>(&NewDepartmentRequest { name: "Chemistry".into() })
        .await
        .unwrap();
    assert_eq!(created.id, 2);
    assert_eq!(created.name, "Chemistry");

    let generated = api.generate().await.unwrap();
    assert_eq!(generated.timetable_id, 9);
    assert!(api.toaster().active().is_empty());
}

#[tokio::test]
async fn server_error_body_becomes_error_toast() {
    let api = client_for(spawn_fake_api().await);

    let err = api.list::<Faculty>().await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 500, .. }));
    assert_eq!(err.to_string(), "db error");

    let toasts = api.toaster().active();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].message, "db error");
    assert_eq!(toasts[0].kind, ToastKind::Error);
}

#[tokio::test]
async fn empty_error_body_uses_fallback_message() {
    let api = client_for(spawn_fake_api().await);

    let err = api
        .list::<timetable_console::models::Course>()
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "API request failed");
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client_for(addr);
    let err = api.list::<Department>().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(api.toaster().active().len(), 1);
}
