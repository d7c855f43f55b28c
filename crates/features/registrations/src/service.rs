use crate::error::RegistrationError;
use crate::model::{AttendanceUpdate, NewRegistration};
use campus_colleges::{CollegeService, NewStudent};
use campus_database::{Database, Filter, Store};
use campus_events::EventService;
use campus_kernel::domain::constants::{REGISTRATION, fields};
use campus_kernel::domain::models::{AttendanceStatus, EventState, Registration};
use campus_kernel::safe_nanoid;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AttendancePatch {
    attendance_status: AttendanceStatus,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RegistrationService {
    db: Database,
    colleges: CollegeService,
    events: EventService,
}

impl RegistrationService {
    #[must_use]
    pub const fn new(db: Database, colleges: CollegeService, events: EventService) -> Self {
        Self { db, colleges, events }
    }

    /// Registers a student for a published event of the same college, creating the
    /// student on first sign-up.
    ///
    /// # Errors
    /// * [`RegistrationError::NotFound`] for an unknown college or event.
    /// * [`RegistrationError::Validation`] when the event is not published or belongs to another college.
    /// * [`RegistrationError::Conflict`] when the student is already registered.
    #[instrument(
        skip(self, new),
        fields(event = %new.event_id, college = %new.college_id, roll = %new.student_roll)
    )]
    pub async fn register(&self, new: NewRegistration) -> Result<Registration, RegistrationError> {
        self.colleges.require(&new.college_id).await?;

        let event = self.events.require(&new.event_id).await?;
        if event.state != EventState::Published {
            let message = format!("Event {} is not published", event.id);
            return Err(RegistrationError::validation(message));
        }
        if event.college_id != new.college_id {
            return Err(RegistrationError::validation(format!(
                "Event {} does not belong to college {}",
                event.id, new.college_id
            )));
        }

        let student = self
            .colleges
            .find_or_create_student(NewStudent {
                college_id: new.college_id.clone(),
                student_roll: new.student_roll,
                name: new.name,
                email: new.email,
            })
            .await?;

        let now = Utc::now();
        let registration = Registration {
            id: safe_nanoid!(),
            event_id: event.id,
            student_id: student.id,
            college_id: new.college_id,
            registered_at: now,
            attendance_status: AttendanceStatus::Registered,
            created_at: now,
            updated_at: now,
        };

        self.db.insert(REGISTRATION, &registration.id, &registration).await.map_err(|err| {
            if err.is_conflict() {
                RegistrationError::Conflict { message: "Already registered".into(), context: None }
            } else {
                err.into()
            }
        })?;

        info!(
            registration = %registration.id,
            student = %registration.student_id,
            "Student registered"
        );
        Ok(registration)
    }

    /// # Errors
    /// Store failures only.
    pub async fn find(
        &self,
        event_id: &str,
        student_id: &str,
    ) -> Result<Option<Registration>, RegistrationError> {
        let filter =
            Filter::new().eq(fields::EVENT_ID, event_id).eq(fields::STUDENT_ID, student_id);
        let registrations: Vec<Registration> = self.db.find(REGISTRATION, &filter).await?;
        Ok(registrations.into_iter().next())
    }

    /// Sets the attendance status of an existing registration.
    ///
    /// # Errors
    /// [`RegistrationError::NotFound`] when the student or the registration is absent.
    #[instrument(
        skip(self, update),
        fields(event = %update.event_id, roll = %update.student_roll, status = %update.status)
    )]

    pub async fn record_attendance(
        &self,
        update: AttendanceUpdate,
    ) -> Result<Registration, RegistrationError> {
        let student = self
            .colleges
            .find_student(&update.college_id, &update.student_roll)
            .await?
            .ok_or_else(|| RegistrationError::not_found("Student not found"))?;

        let registration = self
            .find(&update.event_id, &student.id)
            .await?
            .ok_or_else(|| RegistrationError::not_found("Registration not found"))?;

        let patch = AttendancePatch { attendance_status: update.status, updated_at: Utc::now() };
        let updated: Registration = self
            .db
            .merge(REGISTRATION, &registration.id, &patch)
            .await?
            .ok_or_else(|| RegistrationError::not_found("Registration not found"))?;

        info!(registration = %updated.id, "Attendance recorded");
        Ok(updated)
    }
}
