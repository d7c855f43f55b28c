use campus_database::{Condition, Database, DatabaseError, Filter, Migration, Store};
use serde::{Deserialize, Serialize};

const SCHEMA: &str = "DEFINE TABLE signup SCHEMALESS;
DEFINE INDEX signup_event_student ON TABLE signup FIELDS eventId, studentId UNIQUE;";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Signup {
    id: String,
    event_id: String,
    student_id: String,
    attendance_status: String,
    rating: i64,
}

fn signup(id: &str, event_id: &str, student_id: &str, status: &str, rating: i64) -> Signup {
    Signup {
        id: id.to_owned(),
        event_id: event_id.to_owned(),
        student_id: student_id.to_owned(),
        attendance_status: status.to_owned(),
        rating,
    }
}

async fn database() -> Database {
    Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .migrations([Migration::new("signups", "0001", SCHEMA)])
        .init()
        .await
        .expect("connect to mem://")
}

async fn seeded() -> Database {
    let db = database().await;
    for s in [
        signup("r1", "E1", "S1", "present", 5),
        signup("r2", "E1", "S2", "present", 4),
        signup("r3", "E1", "S3", "absent", 3),
        signup("r4", "E2", "S1", "present", 2),
    ] {
        db.insert("signup", &s.id.clone(), &s).await.expect("insert signup");
    }
    db
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = database().await;
    db.health().await.expect("health check");
    assert_eq!(db.migration_report().applied.len(), 1);
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));

    let err = Database::builder().url("mem://").init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn find_returns_plain_ids() {
    let db = seeded().await;

    let filter = Filter::new().eq("attendanceStatus", "present");
    let mut present: Vec<Signup> = db.find("signup", &filter).await.unwrap();
    present.sort_by(|a, b| a.id.cmp(&b.id));

    let ids: Vec<_> = present.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["r1", "r2", "r4"]);
    assert_eq!(present[0], signup("r1", "E1", "S1", "present", 5));
}

#[tokio::test]
async fn find_by_id_and_ids() {
    let db = seeded().await;

    let one: Option<Signup> = db.find_by_id("signup", "r3").await.unwrap();
    assert_eq!(one.map(|s| s.attendance_status), Some("absent".to_owned()));

    let none: Option<Signup> = db.find_by_id("signup", "missing").await.unwrap();
    assert!(none.is_none());

    let ids = vec!["r1".to_owned(), "r4".to_owned(), "nope".to_owned()];
    let mut many: Vec<Signup> = db.find_by_ids("signup", &ids).await.unwrap();
    many.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(many.len(), 2);
    assert_eq!(many[1].event_id, "E2");

    let empty: Vec<Signup> = db.find_by_ids("signup", &[]).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn group_count_with_filter_and_matching() {
    let db = seeded().await;

    let all = db.group_count("signup", "eventId", &Filter::new(), None).await.unwrap();
    assert_eq!(all.get("E1"), Some(&3));
    assert_eq!(all.get("E2"), Some(&1));

    let present = Condition::eq("attendanceStatus", "present");
    let present_on_e1 = db
        .group_count("signup", "eventId", &Filter::new().eq("eventId", "E1"), Some(&present))
        .await
        .unwrap();
    assert_eq!(present_on_e1.len(), 1);
    assert_eq!(present_on_e1.get("E1"), Some(&2));

    let nothing = db
        .group_count("signup", "eventId", &Filter::new().eq("eventId", "E9"), None)
        .await
        .unwrap();
    assert!(nothing.is_empty());
}

#[tokio::test]
async fn group_sum_adds_integer_fields() {
    let db = seeded().await;

    let totals = db.group_sum("signup", "eventId", "rating", &Filter::new()).await.unwrap();
    assert_eq!(totals.get("E1"), Some(&12));
    assert_eq!(totals.get("E2"), Some(&2));
}

#[tokio::test]
async fn unique_index_violation_is_a_conflict() {
    let db = seeded().await;

    let twice = signup("r9", "E1", "S1", "registered", 1);
    let err = db.insert("signup", "r9", &twice).await.unwrap_err();
    assert!(err.is_conflict(), "unexpected error: {err}");

    let reused_id = signup("r1", "E7", "S9", "registered", 1);
    let err = db.insert("signup", "r1", &reused_id).await.unwrap_err();
    assert!(err.is_conflict(), "unexpected error: {err}");
}

#[tokio::test]
async fn merge_updates_existing_records_only() {
    let db = seeded().await;
    let patch = serde_json::json!({ "attendanceStatus": "late" });

    let updated: Option<Signup> = db.merge("signup", "r3", &patch).await.unwrap();
    assert_eq!(updated.map(|s| s.attendance_status), Some("late".to_owned()));

    let missing: Option<Signup> = db.merge("signup", "ghost", &patch).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn migrations_skip_when_reapplied_and_reject_edits() {
    let db = database().await;

    let report = db.migrate(&[Migration::new("signups", "0001", SCHEMA)]).await.unwrap();
    assert!(report.applied.is_empty());
    assert_eq!(report.skipped.len(), 1);

    let status_index = "DEFINE INDEX signup_status ON TABLE signup FIELDS attendanceStatus;";
    let report = db
        .migrate(&[
            Migration::new("signups", "0001", SCHEMA),
            Migration::new("signups", "0002", status_index),
        ])
        .await
        .unwrap();
    assert_eq!(report.applied.len(), 1);
    assert_eq!(report.applied[0].version, "0002");

    let edited = Migration::new("signups", "0001", "DEFINE TABLE signup SCHEMAFULL;");
    let err = db.migrate(&[edited]).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Migration { .. }));
}

#[tokio::test]
async fn broken_migrations_are_reported_and_not_recorded() {
    let db = database().await;

    for script in ["DEFINE TABLE ;", "THROW 'boom';"] {
        let broken = Migration::new("signups", "0003", script);
        for _ in 0..2 {
            let err = db.migrate(&[broken]).await.unwrap_err();
            assert!(matches!(err, DatabaseError::Migration { .. }), "{script}: {err}");
        }
    }

    let fixed = Migration::new("signups", "0003", "DEFINE TABLE attendance SCHEMALESS;");
    let report = db.migrate(&[fixed]).await.unwrap();
    assert!(report.skipped.is_empty());
    assert_eq!(report.applied.len(), 1);
}

#[derive(Debug, Serialize, Deserialize)]
struct Session {
    id: String,
    title: String,
}

#[tokio::test]
async fn delete_cascade_removes_dependents() {
    let db = seeded().await;
    for (id, title) in [("E1", "AI Workshop"), ("E2", "Tech Fest")] {
        let session = Session { id: id.to_owned(), title: title.to_owned() };
        db.insert("session", id, &session).await.unwrap();
    }
    let dependents = [("signup", "eventId")];

    assert!(db.delete_cascade("session", "E1", &dependents).await.unwrap());

    let gone: Option<Session> = db.find_by_id("session", "E1").await.unwrap();
    assert!(gone.is_none());
    let left: Vec<Signup> = db.find("signup", &Filter::new()).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].event_id, "E2");

    assert!(!db.delete_cascade("session", "E1", &dependents).await.unwrap());
}
