use campus_derive::api_model;
use campus_kernel::domain::constants::{COLLEGE, EVENT};
use campus_kernel::domain::models::AttendanceStatus;
use campus_kernel::validation::{ValidationErrors, optional};

/// Body of `POST /register`. Name and e-mail are stored only when the student is new.
#[api_model]
pub struct RegisterRequest {
    pub event_id: Option<String>,
    pub student_roll: Option<String>,
    pub college_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub event_id: String,
    pub student_roll: String,
    pub college_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl RegisterRequest {
    /// # Errors
    /// Missing `eventId`, `studentRoll` or `collegeId`, or a malformed e-mail.
    pub fn validate(self) -> Result<NewRegistration, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let event_id = errors.required_id("eventId", EVENT, self.event_id);
        let student_roll = errors.required("studentRoll", self.student_roll);
        let college_id = errors.required_id("collegeId", COLLEGE, self.college_id);
        let email = errors.email("email", self.email);
        errors.finish()?;

        Ok(NewRegistration { event_id, student_roll, college_id, name: optional(self.name), email })
    }
}

/// Body of `POST /attendance`.
#[api_model]
pub struct AttendanceRequest {
    pub event_id: Option<String>,
    pub student_roll: Option<String>,
    pub college_id: Option<String>,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceUpdate {
    pub event_id: String,
    pub student_roll: String,
    pub college_id: String,
    pub status: AttendanceStatus,
}

impl AttendanceRequest {
    /// # Errors
    /// Any of the four fields missing.
    pub fn validate(self) -> Result<AttendanceUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let event_id = errors.required_id("eventId", EVENT, self.event_id);
        let student_roll = errors.required("studentRoll", self.student_roll);
        let college_id = errors.required_id("collegeId", COLLEGE, self.college_id);
        let status = self.status.unwrap_or_else(|| {
            errors.add("status", "is required");
            AttendanceStatus::default()
        });
        errors.finish()?;

        Ok(AttendanceUpdate { event_id, student_roll, college_id, status })
    }
}
