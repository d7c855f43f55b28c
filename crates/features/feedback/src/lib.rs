//! Feedback: a 1 to 5 star rating with optional comments, left by a student of the
//! event's college.

pub mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod model;
mod service;

pub use error::{FeedbackError, FeedbackErrorExt};
#[cfg(feature = "server")]
pub use handlers::router;
pub use model::{FeedbackRequest, NewFeedback};
pub use service::FeedbackService;

use campus_colleges::CollegeService;
use campus_database::{Database, Migration};
use campus_events::EventService;
use campus_kernel::domain::registry::InitializedSlice;

pub const MIGRATIONS: &[Migration] =
    &[Migration::new("feedback", "0001", include_str!("../migrations/0001-feedback.surql"))];

#[campus_derive::campus_slice]
pub struct FeedbackSlice {
    pub service: FeedbackService,
}

pub fn init(db: &Database) -> InitializedSlice {
    tracing::info!("Feedback slice initialized");
    let colleges = CollegeService::new(db.clone());
    let events = EventService::new(db.clone(), colleges.clone());
    let service = FeedbackService::new(db.clone(), colleges, events);
    InitializedSlice::new(FeedbackSlice::new(FeedbackSliceInner { service }))
}
