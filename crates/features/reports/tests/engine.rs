//! Report semantics against a plain in-memory `Store`.

use campus_database::{Condition, DatabaseError, Filter, Store};
use campus_reports::{ReportEngine, ReportKind, ReportParams, ReportRows, TOP_STUDENTS};
use fxhash::FxHashMap;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::HashMap;

#[derive(Debug, Default)]
struct MemoryStore {
    tables: HashMap<&'static str, Vec<Value>>,
}

fn matches(row: &Value, conditions: &[Condition]) -> bool {
    conditions.iter().all(|c| row.get(c.field()).and_then(Value::as_str) == Some(c.value()))
}

impl MemoryStore {
    fn rows(&self, table: &str) -> impl Iterator<Item = &Value> {
        self.tables.get(table).into_iter().flatten()
    }

    fn decode<T: DeserializeOwned>(rows: Vec<&Value>) -> Result<Vec<T>, DatabaseError> {
        rows.into_iter()
            .map(|row| serde_json::from_value(row.clone()).map_err(DatabaseError::from))
            .collect()
    }
}

impl Store for MemoryStore {
    async fn find<T>(&self, table: &'static str, filter: &Filter) -> Result<Vec<T>, DatabaseError>
    where
        T: DeserializeOwned + Send,
    {
        Self::decode(self.rows(table).filter(|row| matches(row, filter.conditions())).collect())
    }

    async fn find_by_id<T>(&self, table: &'static str, id: &str) -> Result<Option<T>, DatabaseError>
    where
        T: DeserializeOwned + Send,
    {
        let found = Self::decode(self.rows(table).filter(|row| row["id"] == id).collect())?;
        Ok(found.into_iter().next())
    }

    async fn find_by_ids<T>(
        &self,
        table: &'static str,
        ids: &[String],
    ) -> Result<Vec<T>, DatabaseError>
    where
        T: DeserializeOwned + Send,
    {
        let wanted = |row: &&Value| ids.iter().any(|id| row["id"] == id.as_str());
        Self::decode(self.rows(table).filter(wanted).collect())
    }

    async fn group_count(
        &self,
        table: &'static str,
        key: &'static str,
        filter: &Filter,
        matching: Option<&Condition>,
    ) -> Result<FxHashMap<String, u64>, DatabaseError> {
        let mut counts = FxHashMap::default();
        for row in self.rows(table) {
            let matched = matching.is_none_or(|c| matches(row, std::slice::from_ref(c)));
            if matches(row, filter.conditions()) && matched {
                if let Some(group) = row.get(key).and_then(Value::as_str) {
                    *counts.entry(group.to_owned()).or_insert(0) += 1;
                }
            }
        }
        Ok(counts)
    }

    async fn group_sum(
        &self,
        table: &'static str,
        key: &'static str,
        field: &'static str,
        filter: &Filter,
    ) -> Result<FxHashMap<String, i64>, DatabaseError> {
        let mut sums = FxHashMap::default();
        for row in self.rows(table).filter(|row| matches(row, filter.conditions())) {
            if let Some(group) = row.get(key).and_then(Value::as_str) {
                *sums.entry(group.to_owned()).or_insert(0) += row[field].as_i64().unwrap_or(0);
            }
        }
        Ok(sums)
    }
}

fn campus() -> ReportEngine<MemoryStore> {
    let mut tables = HashMap::new();
    tables.insert(
        "event",
        vec![
            json!({ "id": "E1", "collegeId": "C1", "title": "Alpha" }),
            json!({ "id": "E2", "collegeId": "C1", "title": "Beta" }),
            json!({ "id": "E3", "collegeId": "C2", "title": "Gamma" }),
            json!({ "id": "E4", "collegeId": "C1", "title": "Quiet" }),
        ],
    );
    tables.insert(
        "student",
        ["S1", "S2", "S3", "S4", "S5"]
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let n = i + 1;
                json!({ "id": id, "studentRoll": format!("R{n}"), "name": format!("Student {n}") })
            })
            .collect(),
    );
    tables.insert(
        "registration",
        [
            ("E1", "S1", "C1", "present"),
            ("E1", "S2", "C1", "present"),
            ("E1", "S3", "C1", "absent"),
            ("E2", "S1", "C1", "present"),
            ("E2", "S2", "C1", "late"),
            ("E2", "S4", "C1", "registered"),
            ("E3", "S5", "C2", "present"),
            ("E9", "S9", "C1", "present"),
        ]
        .iter()
        .enumerate()
        .map(|(i, (event, student, college, status))| {
            json!({
                "id": format!("r{i}"),
                "eventId": event,
                "studentId": student,
                "collegeId": college,
                "attendanceStatus": status
            })
        })
        .collect(),
    );
    tables.insert(
        "feedback",
        [("E1", "C1", 5), ("E1", "C1", 4), ("E1", "C1", 4), ("E3", "C2", 3)]
            .iter()
            .enumerate()
            .map(|(i, (event, college, rating))| {
                let id = format!("f{i}");
                json!({ "id": id, "eventId": event, "collegeId": college, "rating": rating })
            })
            .collect(),
    );

    ReportEngine::new(MemoryStore { tables })
}

#[tokio::test]
async fn popularity_orders_by_count_then_id() {
    let engine = campus();
    let rows = engine.event_popularity(Some("C1")).await.unwrap();

    let summary: Vec<(&str, Option<&str>, u64)> =
        rows.iter().map(|r| (r.event_id.as_str(), r.title.as_deref(), r.registrations)).collect();
    assert_eq!(summary, [("E1", Some("Alpha"), 3), ("E2", Some("Beta"), 3), ("E9", None, 1)]);

    let all = engine.event_popularity(None).await.unwrap();
    let ids: Vec<_> = all.iter().map(|r| r.event_id.as_str()).collect();
    assert_eq!(ids, ["E1", "E2", "E3", "E9"]);
}

#[tokio::test]
async fn popularity_sums_to_the_college_registrations() {
    let engine = campus();
    for (college, expected) in [("C1", 7), ("C2", 1), ("C404", 0)] {
        let rows = engine.event_popularity(Some(college)).await.unwrap();
        assert_eq!(rows.iter().map(|r| r.registrations).sum::<u64>(), expected, "{college}");
    }
}

#[tokio::test]
async fn attendance_is_rounded_per_event() {
    let engine = campus();
    let rows = engine.attendance_percent(Some("C1"), None).await.unwrap();

    let summary: Vec<(&str, u64, u64, f64)> = rows
        .iter()
        .map(|r| (r.event_id.as_str(), r.total_registered, r.present_count, r.attendance_percent))
        .collect();
    assert_eq!(summary, [("E1", 3, 2, 66.67), ("E2", 3, 1, 33.33), ("E9", 1, 1, 100.0)]);
    assert!(rows[2].title.is_none());
}

#[tokio::test]
async fn attendance_for_an_event_without_registrations() {
    let engine = campus();

    let quiet = engine.attendance_percent(None, Some("E4")).await.unwrap();
    assert_eq!(quiet.len(), 1);
    assert_eq!(quiet[0].title.as_deref(), Some("Quiet"));
    let row = &quiet[0];
    assert_eq!((row.total_registered, row.present_count, row.attendance_percent), (0, 0, 0.0));

    assert!(engine.attendance_percent(Some("C2"), Some("E4")).await.unwrap().is_empty());
    assert!(engine.attendance_percent(None, Some("E404")).await.unwrap().is_empty());

    let single = engine.attendance_percent(Some("C1"), Some("E2")).await.unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].attendance_percent, 33.33);
}

#[tokio::test]
async fn feedback_averages_skip_events_without_feedback() {
    let engine = campus();

    let rows = engine.avg_feedback(Some("C1")).await.unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!((row.event_id.as_str(), row.avg_rating, row.feedback_count), ("E1", 4.33, 3));

    let all = engine.avg_feedback(None).await.unwrap();
    let averages: Vec<_> = all.iter().map(|r| (r.event_id.as_str(), r.avg_rating)).collect();
    assert_eq!(averages, [("E1", 4.33), ("E3", 3.0)]);
    assert!(all.iter().all(|r| (1.0..=5.0).contains(&r.avg_rating)));
}

#[tokio::test]
async fn participation_orders_by_attended_then_id() {
    let engine = campus();
    let rows = engine.student_participation(Some("C1")).await.unwrap();

    let summary: Vec<(&str, u64, u64)> = rows
        .iter()
        .map(|r| (r.student_id.as_str(), r.events_registered, r.events_attended))
        .collect();

    assert_eq!(summary, [("S1", 2, 2), ("S2", 2, 1), ("S9", 1, 1), ("S3", 1, 0), ("S4", 1, 0)]);

    assert_eq!(rows[0].student_roll.as_deref(), Some("R1"));
    assert_eq!(rows[0].name.as_deref(), Some("Student 1"));
    assert!(rows[2].student_roll.is_none() && rows[2].name.is_none());
}

#[tokio::test]
async fn top_students_are_the_participation_prefix() {
    let engine = campus();
    let participation = engine.student_participation(Some("C1")).await.unwrap();
    let top = engine.top_active_students(Some("C1")).await.unwrap();

    assert_eq!(top.len(), TOP_STUDENTS);
    for (top, full) in top.iter().zip(&participation) {
        assert_eq!(top.student_id, full.student_id);
        assert_eq!(top.attended, full.events_attended);
    }

    let small = engine.top_active_students(Some("C2")).await.unwrap();
    assert_eq!(small.len(), 1);
    assert_eq!(small[0].attended, 1);
}

#[tokio::test]
async fn empty_scopes_give_empty_reports() {
    let engine = campus();
    let params = ReportParams::college("C404");

    for kind in [
        ReportKind::EventPopularity,
        ReportKind::AttendancePercent,
        ReportKind::AvgFeedback,
        ReportKind::StudentParticipation,
        ReportKind::TopActiveStudents,
    ] {
        let rows = engine.report(kind, &params).await.unwrap();
        assert!(rows.is_empty(), "{kind}");
    }

    let empty = ReportEngine::new(MemoryStore::default());
    let rows = empty.report(ReportKind::EventPopularity, &ReportParams::default()).await.unwrap();
    assert_eq!(rows, ReportRows::EventPopularity(Vec::new()));
}
