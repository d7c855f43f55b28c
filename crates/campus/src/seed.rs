//! Demo data set: one college, two published events and twenty students with a spread
//! of attendance and a few ratings.
//!
//! Records are written with fixed ids (`C001`, `E001`, `S001`...) so report output is
//! predictable. Seeding a database that already holds `C001` does nothing.

use campus_database::{Database, DatabaseError, Store};
use campus_kernel::domain::constants::{COLLEGE, EVENT, FEEDBACK, REGISTRATION, STUDENT};
use campus_kernel::domain::models::{
    AttendanceStatus, College, Event, EventState, Feedback, Registration, Student,
};
use campus_kernel::safe_nanoid;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

pub const COLLEGE_ID: &str = "C001";
pub const WORKSHOP_ID: &str = "E001";
pub const FEST_ID: &str = "E002";

const STUDENT_NAMES: [&str; 20] = [
    "Akshay", "Priya", "Ravi", "Ananya", "Kavana", "Manoj", "Sneha", "Rahul", "Divya", "Arjun",
    "Meera", "Varun", "Snehal", "Pooja", "Deepak", "Harsha", "Nandini", "Sanjay", "Aishwarya",
    "Kiran",
];

const WORKSHOP_CYCLE: [AttendanceStatus; 5] = [
    AttendanceStatus::Present,
    AttendanceStatus::Present,
    AttendanceStatus::Absent,
    AttendanceStatus::Registered,
    AttendanceStatus::Late,
];

/// (event, student index, rating, comments)
const FEEDBACK_ROWS: [(&str, usize, u8, &str); 4] = [
    (WORKSHOP_ID, 0, 5, "Excellent workshop!"),
    (WORKSHOP_ID, 1, 4, "Very useful."),
    (FEST_ID, 4, 3, "Good, could be better."),
    (FEST_ID, 9, 4, "Fun fest."),
];

/// What one [`seed`] call wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub skipped: bool,
    pub students: usize,
    pub registrations: usize,
    pub duplicates: usize,
    pub feedback: usize,
}

#[must_use]
pub fn student_id(index: usize) -> String {
    format!("S{:03}", index + 1)
}

/// Writes the demo data set unless college `C001` already exists.
///
/// # Errors
/// Store failures. Duplicate registrations are counted, not raised.
#[instrument(skip(db))]
pub async fn seed(db: &Database) -> Result<SeedReport, DatabaseError> {
    if db.find_by_id::<College>(COLLEGE, COLLEGE_ID).await?.is_some() {
        info!(college = COLLEGE_ID, "Demo data already present, skipping seed");
        return Ok(SeedReport { skipped: true, ..SeedReport::default() });
    }

    let now = Utc::now();
    let mut report = SeedReport::default();

    let college = College {
        id: COLLEGE_ID.to_owned(),
        name: "Reva University".to_owned(),
        domain: Some("reva.edu".to_owned()),
        created_at: now,
        updated_at: now,
    };
    db.insert(COLLEGE, &college.id, &college).await?;

    let events = [(WORKSHOP_ID, "AI Workshop", "workshop"), (FEST_ID, "Tech Fest", "fest")];
    for (id, title, kind) in events {
        let event = Event {
            id: id.to_owned(),
            college_id: COLLEGE_ID.to_owned(),
            title: title.to_owned(),
            description: None,
            event_type: Some(kind.to_owned()),
            start_time: None,
            end_time: None,
            location: None,
            state: EventState::Published,
            event_code: None,
            created_at: now,
            updated_at: now,
        };
        db.insert(EVENT, &event.id, &event).await?;
    }

    for (i, name) in STUDENT_NAMES.iter().enumerate() {
        let student = Student {
            id: student_id(i),
            student_roll: format!("R{:03}", i + 1),
            name: Some((*name).to_owned()),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            college_id: COLLEGE_ID.to_owned(),
            created_at: now,
            updated_at: now,
        };
        db.insert(STUDENT, &student.id, &student).await?;
        report.students += 1;
    }

    let workshop = (0..14).map(|i| (WORKSHOP_ID, i, WORKSHOP_CYCLE[i % WORKSHOP_CYCLE.len()]));
    let fest = (0..10).map(|i| {
        let status = match i % 3 {
            0 => AttendanceStatus::Present,
            1 => AttendanceStatus::Registered,
            _ => AttendanceStatus::Late,
        };
        (FEST_ID, i, status)
    });
    // Kavana is listed again as present on both events; the unique index keeps the first entry.
    let repeats = [WORKSHOP_ID, FEST_ID].map(|event| (event, 4, AttendanceStatus::Present));

    for (event_id, index, status) in workshop.chain(fest).chain(repeats) {
        let record = registration(event_id, index, status, now);
        match db.insert(REGISTRATION, &record.id, &record).await {
            Ok(()) => report.registrations += 1,
            Err(err) if err.is_conflict() => {
                debug!(
                    event = event_id,
                    student = %student_id(index),
                    "Skipping duplicate registration"
                );
                report.duplicates += 1;
            }
            Err(err) => return Err(err),
        }
    }

    for (event_id, index, rating, comments) in FEEDBACK_ROWS {
        let feedback = Feedback {
            id: safe_nanoid!(),
            event_id: event_id.to_owned(),
            student_id: student_id(index),
            college_id: COLLEGE_ID.to_owned(),
            rating,
            comments: Some(comments.to_owned()),
            created_at: now,
            updated_at: now,
        };
        db.insert(FEEDBACK, &feedback.id, &feedback).await?;
        report.feedback += 1;
    }

    info!(
        students = report.students,
        registrations = report.registrations,
        feedback = report.feedback,
        "Demo data seeded"
    );
    Ok(report)
}

fn registration(
    event_id: &str,
    index: usize,
    status: AttendanceStatus,
    now: DateTime<Utc>,
) -> Registration {

    Registration {
        id: safe_nanoid!(),
        event_id: event_id.to_owned(),
        student_id: student_id(index),
        college_id: COLLEGE_ID.to_owned(),
        registered_at: now,
        attendance_status: status,
        created_at: now,
        updated_at: now,
    }
}
