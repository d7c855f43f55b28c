use campus_derive::api_model;
use campus_kernel::domain::constants::{COLLEGE, EVENT};
use campus_kernel::domain::models::{Event, EventState};
use campus_kernel::validation::{ValidationErrors, optional};
use chrono::{DateTime, Utc};

/// Body of `POST /events`.
#[api_model]
pub struct CreateEventRequest {
    pub id: Option<String>,
    pub college_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    /// Defaults to `draft`.
    pub state: Option<EventState>,
    pub event_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub id: Option<String>,
    pub college_id: String,
    pub title: String,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub state: EventState,
    pub event_code: Option<String>,
}

impl CreateEventRequest {
    /// # Errors
    /// Missing `collegeId` or `title`, malformed ids, or an end before the start.
    pub fn validate(self) -> Result<NewEvent, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let id = errors.optional_id("id", EVENT, self.id);
        let college_id = errors.required_id("collegeId", COLLEGE, self.college_id);
        let title = errors.required("title", self.title);
        if let (Some(start), Some(end)) = (self.start_time, self.end_time)
            && end < start
        {
            errors.add("endTime", "must not be before startTime");
        }
        errors.finish()?;

        Ok(NewEvent {
            id,
            college_id,
            title,
            description: optional(self.description),
            event_type: optional(self.event_type),
            start_time: self.start_time,
            end_time: self.end_time,
            location: optional(self.location),
            state: self.state.unwrap_or_default(),
            event_code: optional(self.event_code),
        })
    }
}

/// Query of `GET /events`. Every filter is optional.
#[api_model]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct ListEventsQuery {
    pub college_id: Option<String>,
    pub state: Option<EventState>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub college_id: Option<String>,
    pub state: Option<EventState>,
    pub event_type: Option<String>,
}

impl ListEventsQuery {
    /// # Errors
    /// A malformed `collegeId`.
    pub fn validate(self) -> Result<EventQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let college_id = errors.optional_id("collegeId", COLLEGE, self.college_id);
        errors.finish()?;

        Ok(EventQuery { college_id, state: self.state, event_type: optional(self.event_type) })
    }
}

/// Result of a state change.
#[api_model]
pub struct EventActionResponse {
    pub message: String,
    pub event: Event,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> CreateEventRequest {
        serde_json::from_value(body).expect("request body")
    }

    #[test]
    fn college_and_title_are_required() {
        let err = request(json!({ "description": "no title" })).validate().unwrap_err();
        assert_eq!(err.to_string(), "collegeId is required, title is required");
    }

    #[test]
    fn state_defaults_to_draft() {
        let event = request(json!({ "collegeId": "C001", "title": "Tech Fest", "type": "fest" }))
            .validate()
            .unwrap();
        assert_eq!(event.state, EventState::Draft);
        assert_eq!(event.event_type.as_deref(), Some("fest"));
    }

    #[test]
    fn end_must_follow_start() {
        let err = request(json!({
            "collegeId": "C001",
            "title": "Backwards",
            "startTime": "2025-09-10T12:00:00Z",
            "endTime": "2025-09-10T10:00:00Z"
        }))
        .validate()
        .unwrap_err();
        assert_eq!(err.errors()[0].field, "endTime");
    }

    #[test]
    fn unknown_states_do_not_parse() {
        let raw = json!({ "collegeId": "C001", "title": "X", "state": "archived" });
        let parsed = serde_json::from_value::<CreateEventRequest>(raw);

        assert!(parsed.is_err());
    }
}
