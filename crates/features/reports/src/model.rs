use campus_derive::api_model;
use campus_kernel::domain::constants::{COLLEGE, EVENT};
use campus_kernel::validation::ValidationErrors;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The reports served under `/reports/{report}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReportKind {
    EventPopularity,
    AttendancePercent,
    AvgFeedback,
    StudentParticipation,
    TopActiveStudents,
}

/// Query string shared by every report. `eventId` only narrows `attendance-percent`.
#[api_model]
#[derive(Default)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct ReportQuery {
    pub college_id: Option<String>,
    pub event_id: Option<String>,
}

/// Checked report scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportParams {
    pub college_id: Option<String>,
    pub event_id: Option<String>,
}

impl ReportParams {
    #[must_use]
    pub fn college(college_id: impl Into<String>) -> Self {
        Self { college_id: Some(college_id.into()), event_id: None }
    }
}

impl ReportQuery {
    /// # Errors
    /// A malformed `collegeId` or `eventId`.
    pub fn validate(self) -> Result<ReportParams, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let college_id = errors.optional_id("collegeId", COLLEGE, self.college_id);
        let event_id = errors.optional_id("eventId", EVENT, self.event_id);
        errors.finish()?;

        Ok(ReportParams { college_id, event_id })
    }
}

#[api_model]
#[derive(Clone, PartialEq)]
pub struct EventPopularityRow {
    pub event_id: String,
    pub title: Option<String>,
    pub registrations: u64,
}

#[api_model]
#[derive(Clone, PartialEq)]
pub struct AttendanceRow {
    pub event_id: String,
    pub title: Option<String>,
    pub total_registered: u64,
    pub present_count: u64,
    pub attendance_percent: f64,
}

#[api_model]
#[derive(Clone, PartialEq)]
pub struct FeedbackRow {
    pub event_id: String,
    pub title: Option<String>,
    pub avg_rating: f64,
    pub feedback_count: u64,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ParticipationRow {
    pub student_id: String,
    pub student_roll: Option<String>,
    pub name: Option<String>,
    pub events_registered: u64,
    pub events_attended: u64,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct TopStudentRow {
    pub student_id: String,
    pub student_roll: Option<String>,
    pub name: Option<String>,
    pub attended: u64,
}

/// Rows of any report, serialized as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum ReportRows {
    EventPopularity(Vec<EventPopularityRow>),
    AttendancePercent(Vec<AttendanceRow>),
    AvgFeedback(Vec<FeedbackRow>),
    StudentParticipation(Vec<ParticipationRow>),
    TopActiveStudents(Vec<TopStudentRow>),
}

impl ReportRows {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::EventPopularity(rows) => rows.len(),
            Self::AttendancePercent(rows) => rows.len(),
            Self::AvgFeedback(rows) => rows.len(),
            Self::StudentParticipation(rows) => rows.len(),
            Self::TopActiveStudents(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
