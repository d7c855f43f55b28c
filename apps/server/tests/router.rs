use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use campus_server::Server;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    Server::builder().seed(true).build().await.unwrap().router()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => {
            request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        }
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_is_served_at_the_root() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
}

#[tokio::test]
async fn seeded_attendance_report() {
    let app = app().await;
    let uri = "/api/reports/attendance-percent?eventId=E001";
    let (status, body) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{
        "eventId": "E001",
        "title": "AI Workshop",
        "totalRegistered": 14,
        "presentCount": 6,
        "attendancePercent": 42.86
    }]));
}

#[tokio::test]
async fn unknown_report_is_not_found() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/reports/most-popular", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFound");
}

#[tokio::test]
async fn registration_round_trip() {
    let app = app().await;
    let request = json!({
        "eventId": "E002",
        "studentRoll": "R099",
        "collegeId": "C001",
        "name": "Lakshmi"
    });

    let (status, body) = send(&app, Method::POST, "/api/register", Some(request.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["attendanceStatus"], "registered");

    let (status, body) = send(&app, Method::POST, "/api/register", Some(request)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "Conflict");

    let attendance = json!({
        "eventId": "E002",
        "studentRoll": "R099",
        "collegeId": "C001",
        "status": "present"
    });
    let (status, body) = send(&app, Method::POST, "/api/attendance", Some(attendance)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attendanceStatus"], "present");

    let uri = "/api/reports/event-popularity?collegeId=C001";
    let (_, rows) = send(&app, Method::GET, uri, None).await;
    assert_eq!(rows[0]["eventId"], "E001");
    assert_eq!(rows[1]["registrations"], 11);
}

#[tokio::test]
async fn invalid_writes_are_rejected() {
    let app = app().await;

    let untitled = json!({ "collegeId": "C001" });
    let (status, body) = send(&app, Method::POST, "/api/events", Some(untitled)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "Validation");

    let feedback = json!({
        "eventId": "E001",
        "studentRoll": "R001",
        "collegeId": "C001",
        "rating": 6
    });

    let (status, _) = send(&app, Method::POST, "/api/feedback", Some(feedback)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/api/events/E404/cancel", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
