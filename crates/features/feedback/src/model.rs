use campus_derive::api_model;
use campus_kernel::domain::constants::{COLLEGE, EVENT};
use campus_kernel::domain::models::Feedback;
use campus_kernel::validation::{ValidationErrors, optional};

/// Body of `POST /feedback`.
#[api_model]
pub struct FeedbackRequest {
    pub event_id: Option<String>,
    pub student_roll: Option<String>,
    pub college_id: Option<String>,
    /// Whole stars, 1 to 5.
    pub rating: Option<i64>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub event_id: String,
    pub student_roll: String,
    pub college_id: String,
    pub rating: u8,
    pub comments: Option<String>,
}

impl FeedbackRequest {
    /// # Errors
    /// Missing fields, or a rating outside 1 to 5.
    pub fn validate(self) -> Result<NewFeedback, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let event_id = errors.required_id("eventId", EVENT, self.event_id);
        let student_roll = errors.required("studentRoll", self.student_roll);
        let college_id = errors.required_id("collegeId", COLLEGE, self.college_id);
        let rating = match self.rating.map(u8::try_from) {
            Some(Ok(stars)) if (Feedback::MIN_RATING..=Feedback::MAX_RATING).contains(&stars) => {
                stars
            }
            Some(_) => {
                errors.add("rating", "must be between 1 and 5");
                0
            }
            None => {
                errors.add("rating", "is required");
                0
            }
        };
        errors.finish()?;

        let comments = optional(self.comments);
        Ok(NewFeedback { event_id, student_roll, college_id, rating, comments })
    }
}
