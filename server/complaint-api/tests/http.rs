//! End-to-end tests for the /complaint endpoint, driven through the router.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{header, Method, Request, StatusCode},
  Router,
};
use complaint_api::AppState;
use complaint_core::{ComplaintStore, Desk, FileStore, MemoryStore};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(store: Arc<dyn ComplaintStore>) -> Router {
  let state = Arc::new(AppState {
    desk: Desk::with_defaults(store),
  });
  complaint_api::router(state, None)
}

fn app() -> Router {
  app_with(Arc::new(MemoryStore::new()))
}

fn valid_body() -> Value {
  json!({
    "name": "Rina Wijaya",
    "email": "user@example.com",
    "phone": "081234567890",
    "category": "public-service",
    "title": "ID card still not issued",
    "description": "I applied two months ago and have heard nothing back."
  })
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
  let res = app.clone().oneshot(req).await.unwrap();
  let status = res.status();
  let bytes = res.into_body().collect().await.unwrap().to_bytes();
  let body = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, body)
}

async fn post(app: &Router, body: &Value) -> (StatusCode, Value) {
  let req = Request::builder()
    .method(Method::POST)
    .uri("/complaint")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap();
  send(app, req).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
  let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
  send(app, req).await
}

fn is_ticket(s: &str) -> bool {
  complaint_core::ticket::is_well_formed(s)
}

#[tokio::test]
async fn submit_returns_pending_ticket() {
  let app = app();
  let (status, body) = post(&app, &valid_body()).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  assert_eq!(body["data"]["status"], "pending");
  assert!(is_ticket(body["data"]["ticketNumber"].as_str().unwrap()));
  assert!(body["message"].is_string());
}

#[tokio::test]
async fn submit_then_track_returns_the_record() {
  let app = app();
  let (_, created) = post(&app, &valid_body()).await;
  let ticket = created["data"]["ticketNumber"].as_str().unwrap().to_string();

  let (status, body) = get(&app, &format!("/complaint?action=track&ticket={}", ticket)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  let record = &body["data"];
  for key in ["name", "email", "phone", "category", "title", "description"] {
    assert_eq!(record[key], valid_body()[key], "field {}", key);
  }
  assert_eq!(record["ticketNumber"], ticket.as_str());
  assert_eq!(record["status"], "pending");
  assert_eq!(record["createdAt"], record["updatedAt"]);
  assert!(record["id"].is_string());
}

#[tokio::test]
async fn validation_failures_are_bad_requests() {
  let app = app();
  let cases = [
    ("name", json!(""), "all fields are required"),
    ("email", json!("not-an-email"), "invalid email format"),
    ("phone", json!("12345"), "invalid phone number format"),
    ("description", json!("a".repeat(19)), "description must be at least 20 characters"),
  ];
  for (field, value, message) in cases {
    let mut body = valid_body();
    body[field] = value;
    let (status, res) = post(&app, &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "field {}", field);
    assert_eq!(res["success"], false);
    assert_eq!(res["message"], message);
    assert!(res.get("data").is_none());
  }

  let (_, stats) = get(&app, "/complaint?action=stats").await;
  assert_eq!(stats["data"]["total"], 0);
}

#[tokio::test]
async fn description_of_exactly_twenty_chars_is_accepted() {
  let app = app();
  let mut body = valid_body();
  body["description"] = json!("a".repeat(20));
  let (status, res) = post(&app, &body).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(res["success"], true);
}

#[tokio::test]
async fn malformed_body_is_rejected_in_envelope() {
  let app = app();
  let req = Request::builder()
    .method(Method::POST)
    .uri("/complaint")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);
  assert_eq!(body["message"], "invalid request data");
}

#[tokio::test]
async fn non_object_bodies_are_invalid_request_data() {
  let app = app();
  let bodies = [
    json!([]),
    json!(null),
    json!({}),
    json!("Budi"),
    json!([
      "Budi",
      "user@example.com",
      "081234567890",
      "c",
      "t",
      "a description long enough"
    ]),
  ];
  for body in bodies {
    let (status, res) = post(&app, &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
    assert_eq!(res["success"], false);
    assert_eq!(res["message"], "invalid request data", "body {}", body);
  }

  let (_, stats) = get(&app, "/complaint?action=stats").await;
  assert_eq!(stats["data"]["total"], 0);
}

#[tokio::test]
async fn submit_succeeds_beside_records_with_foreign_timestamps() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("complaints.json");
  let edited = json!([{
    "id": "edited", "ticketNumber": "TKT-20240105-0001",
    "name": "n", "email": "n@example.com", "phone": "0812345678",
    "category": "c", "title": "t", "description": "long enough description",
    "status": "processing",
    "createdAt": "2024-01-05 08:00:00", "updatedAt": "2024-01-05T09:00:00Z"
  }]);
  std::fs::write(&path, edited.to_string()).unwrap();

  let app = app_with(Arc::new(FileStore::new(&path)));
  let (status, body) = post(&app, &valid_body()).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);

  let (_, tracked) = get(&app, "/complaint?action=track&ticket=TKT-20240105-0001").await;
  assert_eq!(tracked["data"]["updatedAt"], "2024-01-05T09:00:00Z");

  let (_, stats) = get(&app, "/complaint?action=stats").await;
  assert_eq!(stats["data"]["total"], 2);
  assert_eq!(stats["data"]["processing"], 1);
}

#[tokio::test]
async fn served_front_end_reaches_the_endpoint() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("index.html"), "<h1>Pengaduan</h1>").unwrap();
  let state = Arc::new(AppState {
    desk: Desk::with_defaults(Arc::new(MemoryStore::new())),
  });
  let app = complaint_api::router(state, Some(dir.path()));

  let req = Request::builder().uri("/index.html").body(Body::empty()).unwrap();
  let res = app.clone().oneshot(req).await.unwrap();
  assert_eq!(res.status(), StatusCode::OK);
  let bytes = res.into_body().collect().await.unwrap().to_bytes();
  assert_eq!(&bytes[..], b"<h1>Pengaduan</h1>");

  let req = Request::builder()
    .method(Method::POST)
    .uri(complaint_api::FRONTEND_ENDPOINT)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(valid_body().to_string()))
    .unwrap();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  let ticket = body["data"]["ticketNumber"].as_str().unwrap().to_string();

  let uri = format!("{}?action=track&ticket={}", complaint_api::FRONTEND_ENDPOINT, ticket);
  let (status, body) = get(&app, &uri).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["ticketNumber"], ticket.as_str());

  let (_, stats) = get(&app, "/api/complaint.php?action=stats").await;
  assert_eq!(stats["data"]["total"], 1);
}

#[tokio::test]
async fn track_failures() {
  let app = app();

  let (status, body) = get(&app, "/complaint?action=track").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "ticket number required");

  let (status, body) = get(&app, "/complaint?action=track&ticket=TKT-00000000-0000").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "data not found");

  post(&app, &valid_body()).await;
  let (status, body) = get(&app, "/complaint?action=track&ticket=TKT-00000000-0000").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["success"], false);
  assert_eq!(body["message"], "ticket not found");
}

#[tokio::test]
async fn stats_on_empty_store_are_zero() {
  let (status, body) = get(&app(), "/complaint?action=stats").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    body,
    json!({
      "success": true,
      "data": {"total": 0, "pending": 0, "processing": 0, "resolved": 0, "rejected": 0}
    })
  );
}

#[tokio::test]
async fn stats_count_file_records_by_status() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("complaints.json");
  let record = |ticket: &str, status: &str| {
    json!({
      "id": ticket, "ticketNumber": ticket,
      "name": "n", "email": "n@example.com", "phone": "0812345678",
      "category": "c", "title": "t", "description": "long enough description",
      "status": status,
      "createdAt": "2025-01-15 10:30:00", "updatedAt": "2025-01-15 10:30:00"
    })
  };
  let records = json!([
    record("TKT-20250115-0001", "pending"),
    record("TKT-20250115-0002", "pending"),
    record("TKT-20250115-0003", "pending"),
    record("TKT-20250115-0004", "resolved"),
  ]);
  std::fs::write(&path, records.to_string()).unwrap();

  let app = app_with(Arc::new(FileStore::new(&path)));
  let (_, first) = get(&app, "/complaint?action=stats").await;
  let (_, second) = get(&app, "/complaint?action=stats").await;
  assert_eq!(
    first["data"],
    json!({"total": 4, "pending": 3, "processing": 0, "resolved": 1, "rejected": 0})
  );
  assert_eq!(first, second);
}

#[tokio::test]
async fn corrupt_store_is_a_server_error() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("complaints.json");
  std::fs::write(&path, "[{broken").unwrap();

  let app = app_with(Arc::new(FileStore::new(&path)));
  let (status, body) = get(&app, "/complaint?action=stats").await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body["success"], false);
  assert_eq!(body["message"], "internal server error");
}

#[tokio::test]
async fn unknown_action_and_verb_are_invalid_requests() {
  let app = app();

  let (status, body) = get(&app, "/complaint").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "invalid request method");

  let (status, body) = get(&app, "/complaint?action=delete").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);

  let req = Request::builder()
    .method(Method::DELETE)
    .uri("/complaint")
    .body(Body::empty())
    .unwrap();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
  assert_eq!(body["success"], false);
  assert_eq!(body["message"], "invalid request method");
}

#[tokio::test]
async fn options_is_an_empty_ok_with_open_cors() {
  let app = app();

  let req = Request::builder()
    .method(Method::OPTIONS)
    .uri("/complaint")
    .body(Body::empty())
    .unwrap();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, Value::Null);

  let req = Request::builder()
    .method(Method::OPTIONS)
    .uri("/complaint")
    .header(header::ORIGIN, "https://pengaduan.example.org")
    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
    .body(Body::empty())
    .unwrap();
  let res = app.clone().oneshot(req).await.unwrap();
  assert_eq!(res.status(), StatusCode::OK);
  assert_eq!(
    res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
    "*"
  );
}

#[tokio::test]
async fn health_is_ok() {
  let app = app();
  let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
  let res = app.oneshot(req).await.unwrap();
  assert_eq!(res.status(), StatusCode::OK);
  let bytes = res.into_body().collect().await.unwrap().to_bytes();
  assert_eq!(&bytes[..], b"ok");
}
