use crate::error::FeedbackError;
use crate::model::NewFeedback;
use campus_colleges::CollegeService;
use campus_database::Database;
use campus_events::EventService;
use campus_kernel::domain::constants::FEEDBACK;
use campus_kernel::domain::models::Feedback;
use campus_kernel::safe_nanoid;
use chrono::Utc;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct FeedbackService {
    db: Database,
    colleges: CollegeService,
    events: EventService,
}

impl FeedbackService {
    #[must_use]
    pub const fn new(db: Database, colleges: CollegeService, events: EventService) -> Self {
        Self { db, colleges, events }
    }

    /// Stores feedback from a known student on an event of the same college.
    ///
    /// # Errors
    /// * [`FeedbackError::NotFound`] when the student or the event is absent.
    /// * [`FeedbackError::Validation`] when the event belongs to another college.
    #[instrument(
        skip(self, new),
        fields(event = %new.event_id, roll = %new.student_roll, rating = new.rating)
    )]

    pub async fn submit(&self, new: NewFeedback) -> Result<Feedback, FeedbackError> {
        let student = self
            .colleges
            .find_student(&new.college_id, &new.student_roll)
            .await?
            .ok_or_else(|| FeedbackError::not_found("Student not found"))?;

        let event = self.events.require(&new.event_id).await?;
        if event.college_id != new.college_id {
            return Err(FeedbackError::validation(format!(
                "Event {} does not belong to college {}",
                event.id, new.college_id
            )));
        }

        let now = Utc::now();
        let feedback = Feedback {
            id: safe_nanoid!(),
            event_id: event.id,
            student_id: student.id,
            college_id: new.college_id,
            rating: new.rating,
            comments: new.comments,
            created_at: now,
            updated_at: now,
        };
        self.db.insert(FEEDBACK, &feedback.id, &feedback).await?;

        info!(feedback = %feedback.id, "Feedback submitted");
        Ok(feedback)
    }
}
