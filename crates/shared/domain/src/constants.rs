//! Table names, record field names and `OpenAPI` tags.

pub const COLLEGE: &str = "college";
pub const STUDENT: &str = "student";
pub const EVENT: &str = "event";
pub const REGISTRATION: &str = "registration";
pub const FEEDBACK: &str = "feedback";

/// Record field names as stored (camelCase, matching the JSON surface).
pub mod fields {
    pub const ATTENDANCE_STATUS: &str = "attendanceStatus";
    pub const COLLEGE_ID: &str = "collegeId";
    pub const EVENT_ID: &str = "eventId";
    pub const EVENT_TYPE: &str = "type";
    pub const RATING: &str = "rating";
    pub const STATE: &str = "state";
    pub const STUDENT_ID: &str = "studentId";
    pub const STUDENT_ROLL: &str = "studentRoll";
}

pub const SYSTEM_TAG: &str = "System";
pub const COLLEGES_TAG: &str = "Colleges";
pub const EVENTS_TAG: &str = "Events";
pub const REGISTRATIONS_TAG: &str = "Registrations";
pub const FEEDBACK_TAG: &str = "Feedback";
pub const REPORTS_TAG: &str = "Reports";

/// Longest identifier accepted from clients.
pub const MAX_ID_LEN: usize = 64;
