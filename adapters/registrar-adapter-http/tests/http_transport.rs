//! HTTP transport tests against a local axum stub server.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use registrar_adapter_http::HttpTransport;
use registrar_api::{ApiError, ApiRequest, Student, Transport, fetch_list};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Seen {
    queries: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn list_students() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            {"id": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@x.com",
             "phone": "1234567890"}
        ]
    }))
}

async fn create_student(State(seen): State<Seen>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    seen.bodies.lock().unwrap().push(body);
    (
        StatusCode::CONFLICT,
        Json(json!({
            "status": 409,
            "error": "Conflict",
            "message": "Email already exists: ada@x.com",
            "path": "/api/students"
        })),
    )
}

async fn get_course(Path(id): Path<i64>) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, format!("boom {id}"))
}

async fn set_grade(
    State(seen): State<Seen>,
    Path(id): Path<i64>,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    seen.queries.lock().unwrap().push(query.unwrap_or_default());
    Json(json!({"success": true, "data": {"id": id}}))
}

async fn delete_enrollment() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn garbage() -> &'static str {
    "<html>not json</html>"
}

async fn spawn_stub() -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/students", get(list_students).post(create_student))
        .route("/api/courses/{id}", get(get_course))
        .route("/api/enrollments/{id}/grade", patch(set_grade))
        .route("/api/enrollments/{id}", axum::routing::delete(delete_enrollment))
        .route("/api/garbage", get(garbage))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), seen)
}

#[tokio::test]
async fn test_list_unwraps_envelope() {
    let (base, _) = spawn_stub().await;
    let transport = HttpTransport::new(base).unwrap();

    let students: Vec<Student> = fetch_list(&transport, "/students").await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].email, "ada@x.com");
}

#[tokio::test]
async fn test_error_message_extracted_from_body() {
    let (base, seen) = spawn_stub().await;
    let transport = HttpTransport::new(base).unwrap();

    let err = transport
        .call(ApiRequest::post("/students", json!({"firstName": "Ada"})))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Email already exists: ada@x.com");
    assert_eq!(err.status(), Some(409));
    assert_eq!(seen.bodies.lock().unwrap()[0]["firstName"], "Ada");
}

#[tokio::test]
async fn test_error_without_json_falls_back_to_status() {
    let (base, _) = spawn_stub().await;
    let transport = HttpTransport::new(base).unwrap();

    let err = transport.call(ApiRequest::get("/courses/9")).await.unwrap_err();
    assert_eq!(err.to_string(), "Error 500");
}

#[tokio::test]
async fn test_unknown_route_is_status_error() {
    let (base, _) = spawn_stub().await;
    let transport = HttpTransport::new(base).unwrap();

    let err = transport.call(ApiRequest::get("/nowhere")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Error 404");
}

#[tokio::test]
async fn test_success_with_non_json_body_is_decode_error() {
    let (base, _) = spawn_stub().await;
    let transport = HttpTransport::new(base).unwrap();

    let err = transport.call(ApiRequest::get("/garbage")).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let (base, _) = spawn_stub().await;
    let transport = HttpTransport::new(base).unwrap();

    let value = transport
        .call(ApiRequest::delete("/enrollments/3"))
        .await
        .unwrap();
    assert!(value.is_null());
}

#[tokio::test]
async fn test_grade_query_is_percent_encoded() {
    let (base, seen) = spawn_stub().await;
    let transport = HttpTransport::new(base).unwrap();

    transport
        .call(ApiRequest::patch("/enrollments/4/grade").with_query("grade", "A+"))
        .await
        .unwrap();

    assert_eq!(seen.queries.lock().unwrap().as_slice(), ["grade=A%2B"]);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(format!("http://{addr}/api")).unwrap();
    let err = transport.call(ApiRequest::get("/students")).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}
