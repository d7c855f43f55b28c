use campus::features::reports::{ReportEngine, ReportKind, ReportParams, ReportRows, TOP_STUDENTS};
use campus::seed::{self, COLLEGE_ID, FEST_ID, WORKSHOP_ID};
use campus_database::{Database, Filter, Store};
use campus_kernel::domain::constants::{EVENT, REGISTRATION, fields};
use campus_kernel::domain::models::{Event, EventState, Registration};

async fn seeded() -> (Database, ReportEngine<Database>) {
    let db = Database::builder()
        .url("mem://")
        .session("campus", "seed")
        .migrations(campus::migrations())
        .init()
        .await
        .unwrap();
    let report = seed::seed(&db).await.unwrap();
    let expected = seed::SeedReport {
        skipped: false,
        students: 20,
        registrations: 24,
        duplicates: 2,
        feedback: 4,
    };
    assert_eq!(report, expected);
    let engine = ReportEngine::new(db.clone());
    (db, engine)
}

#[tokio::test]
async fn seeding_twice_is_a_no_op() {
    let (db, _) = seeded().await;
    assert!(seed::seed(&db).await.unwrap().skipped);

    let registrations: Vec<Registration> = db.find(REGISTRATION, &Filter::new()).await.unwrap();
    assert_eq!(registrations.len(), 24);
}

#[tokio::test]
async fn workshop_attendance_is_six_of_fourteen() {
    let (_, engine) = seeded().await;

    let rows = engine.attendance_percent(Some(COLLEGE_ID), None).await.unwrap();
    let summary: Vec<_> = rows
        .iter()
        .map(|r| {
            let title = r.title.as_deref();
            (r.event_id.as_str(), title, r.total_registered, r.present_count, r.attendance_percent)
        })
        .collect();
    assert_eq!(
        summary,
        [
            (WORKSHOP_ID, Some("AI Workshop"), 14, 6, 42.86),
            (FEST_ID, Some("Tech Fest"), 10, 4, 40.0),
        ]
    );

    let only_workshop = engine.attendance_percent(None, Some(WORKSHOP_ID)).await.unwrap();
    assert_eq!(only_workshop.len(), 1);
    assert!((only_workshop[0].attendance_percent - 42.86).abs() < f64::EPSILON);
}

#[tokio::test]
async fn popularity_accounts_for_every_registration() {
    let (db, engine) = seeded().await;

    let rows = engine.event_popularity(Some(COLLEGE_ID)).await.unwrap();
    assert_eq!(rows.iter().map(|r| (r.event_id.as_str(), r.registrations)).collect::<Vec<_>>(), [
        (WORKSHOP_ID, 14),
        (FEST_ID, 10)
    ]);

    let stored: Vec<Registration> =
        db.find(REGISTRATION, &Filter::new().eq(fields::COLLEGE_ID, COLLEGE_ID)).await.unwrap();
    let total: u64 = rows.iter().map(|r| r.registrations).sum();
    assert_eq!(total, stored.len() as u64);
}

#[tokio::test]
async fn ratings_average_per_event() {
    let (_, engine) = seeded().await;

    let rows = engine.avg_feedback(Some(COLLEGE_ID)).await.unwrap();
    let summary: Vec<_> =
        rows.iter().map(|r| (r.event_id.as_str(), r.avg_rating, r.feedback_count)).collect();
    assert_eq!(summary, [(WORKSHOP_ID, 4.5, 2), (FEST_ID, 3.5, 2)]);
    assert!(rows.iter().all(|r| (1.0..=5.0).contains(&r.avg_rating)));
}

#[tokio::test]
async fn most_active_students_lead_participation() {
    let (_, engine) = seeded().await;

    let participation = engine.student_participation(Some(COLLEGE_ID)).await.unwrap();
    assert_eq!(participation.len(), 14);
    let head: Vec<_> = participation
        .iter()
        .take(4)
        .map(|r| (r.student_id.as_str(), r.name.as_deref(), r.events_registered, r.events_attended))
        .collect();
    assert_eq!(head, [
        ("S001", Some("Akshay"), 2, 2),
        ("S007", Some("Sneha"), 2, 2),
        ("S002", Some("Priya"), 2, 1),
        ("S004", Some("Ananya"), 2, 1),
    ]);
    assert_eq!(participation[0].student_roll.as_deref(), Some("R001"));

    let top = engine.top_active_students(Some(COLLEGE_ID)).await.unwrap();
    assert_eq!(top.len(), TOP_STUDENTS);
    for (top, full) in top.iter().zip(&participation) {
        assert_eq!(top.student_id, full.student_id);
        assert_eq!(top.attended, full.events_attended);
    }
}

#[tokio::test]
async fn unknown_college_yields_empty_reports() {
    let (_, engine) = seeded().await;
    let params = ReportParams::college("C404");

    for kind in [
        ReportKind::EventPopularity,
        ReportKind::AttendancePercent,
        ReportKind::AvgFeedback,
        ReportKind::StudentParticipation,
        ReportKind::TopActiveStudents,
    ] {
        assert!(engine.report(kind, &params).await.unwrap().is_empty(), "{kind}");
    }
}

#[tokio::test]
async fn event_without_registrations_reports_zero() {
    let (db, engine) = seeded().await;
    let now = chrono::Utc::now();
    let quiet = Event {
        id: "E003".to_owned(),
        college_id: COLLEGE_ID.to_owned(),
        title: "Quiet Seminar".to_owned(),
        description: None,
        event_type: Some("seminar".to_owned()),
        start_time: None,
        end_time: None,
        location: None,
        state: EventState::Published,
        event_code: None,
        created_at: now,
        updated_at: now,
    };
    db.insert(EVENT, &quiet.id, &quiet).await.unwrap();

    let params = ReportParams { college_id: None, event_id: Some("E003".to_owned()) };
    let rows = engine.report(ReportKind::AttendancePercent, &params).await.unwrap();
    let ReportRows::AttendancePercent(rows) = rows else {

        panic!("attendance rows expected");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title.as_deref(), Some("Quiet Seminar"));
    assert_eq!((rows[0].total_registered, rows[0].present_count), (0, 0));
    assert!(rows[0].attendance_percent.abs() < f64::EPSILON);

    let popularity = engine.event_popularity(Some(COLLEGE_ID)).await.unwrap();
    assert!(popularity.iter().all(|r| r.event_id != "E003"));
}
