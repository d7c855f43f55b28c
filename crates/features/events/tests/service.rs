use campus_colleges::{CollegeService, NewCollege};
use campus_database::Database;
use campus_events::{CreateEventRequest, EventError, EventQuery, EventService, NewEvent};
use campus_kernel::domain::models::{Event, EventState};

use serde_json::json;

async fn service() -> EventService {
    let db = Database::builder()
        .url("mem://")
        .session("campus", "events")
        .migrations(campus_colleges::MIGRATIONS.iter().chain(campus_events::MIGRATIONS).copied())
        .init()
        .await
        .expect("in-memory database");

    let colleges = CollegeService::new(db.clone());
    for id in ["C001", "C002"] {
        let college =
            NewCollege { id: Some(id.to_owned()), name: format!("College {id}"), domain: None };

        colleges.create(college).await.unwrap();
    }
    EventService::new(db, colleges)
}

fn event(body: serde_json::Value) -> NewEvent {
    serde_json::from_value::<CreateEventRequest>(body).unwrap().validate().unwrap()
}

#[tokio::test]
async fn created_events_default_to_draft() {
    let service = service().await;
    let workshop = event(json!({ "collegeId": "C001", "title": "AI Workshop" }));
    let created = service.create(workshop).await.unwrap();

    assert_eq!(created.state, EventState::Draft);
    assert_eq!(service.require(&created.id).await.unwrap(), created);
}

#[tokio::test]
async fn unknown_college_is_not_found() {
    let service = service().await;
    let ghost = event(json!({ "collegeId": "C404", "title": "Ghost" }));
    let err = service.create(ghost).await.unwrap_err();
    assert!(matches!(err, EventError::NotFound { .. }), "{err}");
}

#[tokio::test]
async fn list_filters_and_orders_by_start_time() {
    let service = service().await;
    for body in [
        json!({
            "id": "E003",
            "collegeId": "C001",
            "title": "Late",
            "type": "fest",
            "state": "published",
            "startTime": "2025-10-01T09:00:00Z"
        }),
        json!({
            "id": "E001",
            "collegeId": "C001",
            "title": "Early",
            "type": "workshop",
            "state": "published",
            "startTime": "2025-09-01T09:00:00Z"
        }),
        json!({ "id": "E002", "collegeId": "C001", "title": "Undated", "type": "fest" }),
        json!({
            "id": "E004",
            "collegeId": "C002",
            "title": "Elsewhere",
            "type": "fest",
            "state": "published"
        }),
    ] {
        service.create(event(body)).await.unwrap();
    }

    let ids = |events: Vec<Event>| events.into_iter().map(|e| e.id).collect::<Vec<_>>();

    let at_c001 = EventQuery { college_id: Some("C001".to_owned()), ..EventQuery::default() };
    let all = service.list(at_c001).await.unwrap();
    assert_eq!(ids(all), ["E002", "E001", "E003"]);

    let published_fests = service
        .list(EventQuery {
            college_id: None,
            state: Some(EventState::Published),
            event_type: Some("fest".to_owned()),
        })
        .await
        .unwrap();
    assert_eq!(ids(published_fests), ["E004", "E003"]);
}

#[tokio::test]
async fn state_changes_are_not_restricted() {
    let service = service().await;
    let fest = event(json!({ "id": "E001", "collegeId": "C001", "title": "Tech Fest" }));
    service.create(fest).await.unwrap();

    let cancelled = service.set_state("E001", EventState::Cancelled).await.unwrap();
    assert_eq!(cancelled.state, EventState::Cancelled);
    assert!(cancelled.updated_at >= cancelled.created_at);

    let published = service.set_state("E001", EventState::Published).await.unwrap();
    assert_eq!(published.state, EventState::Published);

    let err = service.set_state("E404", EventState::Published).await.unwrap_err();
    assert!(matches!(err, EventError::NotFound { .. }));
}

#[tokio::test]
async fn delete_removes_the_event() {
    let service = service().await;
    let fest = event(json!({ "id": "E001", "collegeId": "C001", "title": "Tech Fest" }));
    service.create(fest).await.unwrap();

    service.delete("E001").await.unwrap();
    assert!(service.get("E001").await.unwrap().is_none());
    assert!(matches!(service.delete("E001").await, Err(EventError::NotFound { .. })));
}
