//! # Reports
//!
//! Read-only aggregates over registrations and feedback, optionally scoped to one
//! college (and, for attendance, one event):
//!
//! | Report | Rows |
//! |---|---|
//! | `event-popularity` | registrations per event, most first |
//! | `attendance-percent` | registered, present and the present share per event |
//! | `avg-feedback` | mean rating and feedback count per event |
//! | `student-participation` | registered and attended events per student, most attended first |
//! | `top-active-students` | the first three rows of `student-participation` |
//!
//! Ties are broken by ascending id. Percentages and means are rounded half-up to two
//! decimals, see [`rounding`]. Titles and student details come from one batched lookup
//! per report; a referenced record that no longer exists shows up as `null`.

pub mod engine;
pub mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod model;
pub mod rounding;

pub use engine::{ReportEngine, TOP_STUDENTS};
pub use error::{ReportError, ReportErrorExt};
#[cfg(feature = "server")]
pub use handlers::router;
pub use model::{
    AttendanceRow, EventPopularityRow, FeedbackRow, ParticipationRow, ReportKind, ReportParams,
    ReportQuery, ReportRows, TopStudentRow,

};

use campus_database::Database;
use campus_kernel::domain::registry::InitializedSlice;

#[campus_derive::campus_slice]
pub struct Reports {
    pub engine: ReportEngine<Database>,
}

pub fn init(db: &Database) -> InitializedSlice {
    tracing::info!("Reports slice initialized");
    InitializedSlice::new(Reports::new(ReportsInner { engine: ReportEngine::new(db.clone()) }))
}
