use crate::error::EventError;
use crate::model::{EventQuery, NewEvent};
use campus_colleges::CollegeService;
use campus_database::{Database, Filter, Store};
use campus_kernel::domain::constants::{EVENT, FEEDBACK, REGISTRATION, fields};
use campus_kernel::domain::models::{Event, EventState};
use campus_kernel::safe_nanoid;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

const EVENT_DEPENDENTS: &[(&str, &str)] =
    &[(FEEDBACK, fields::EVENT_ID), (REGISTRATION, fields::EVENT_ID)];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatePatch {
    state: EventState,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct EventService {
    db: Database,
    colleges: CollegeService,
}

impl EventService {
    #[must_use]
    pub const fn new(db: Database, colleges: CollegeService) -> Self {
        Self { db, colleges }
    }

    /// # Errors
    /// [`EventError::NotFound`] for an unknown college, [`EventError::Conflict`] for a taken id.
    #[instrument(skip(self, new), fields(college = %new.college_id, title = %new.title))]
    pub async fn create(&self, new: NewEvent) -> Result<Event, EventError> {
        self.colleges.require(&new.college_id).await?;

        let now = Utc::now();
        let event = Event {
            id: new.id.unwrap_or_else(|| safe_nanoid!()),
            college_id: new.college_id,
            title: new.title,
            description: new.description,
            event_type: new.event_type,
            start_time: new.start_time,
            end_time: new.end_time,
            location: new.location,
            state: new.state,
            event_code: new.event_code,
            created_at: now,
            updated_at: now,
        };

        self.db.insert(EVENT, &event.id, &event).await.map_err(|err| {
            if err.is_conflict() {
                EventError::Conflict {
                    message: format!("Event {} already exists", event.id).into(),
                    context: None,
                }
            } else {
                err.into()
            }
        })?;

        info!(event = %event.id, state = %event.state, "Event created");
        Ok(event)
    }

    /// Matching events by start time, undated ones first.
    ///
    /// # Errors
    /// Store failures only.
    pub async fn list(&self, query: EventQuery) -> Result<Vec<Event>, EventError> {
        let filter = Filter::new()
            .eq_opt(fields::COLLEGE_ID, query.college_id)
            .eq_opt(fields::STATE, query.state.map(|state| state.to_string()))
            .eq_opt(fields::EVENT_TYPE, query.event_type);

        let mut events: Vec<Event> = self.db.find(EVENT, &filter).await?;
        events.sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }

    /// # Errors
    /// Store failures only.
    pub async fn get(&self, id: &str) -> Result<Option<Event>, EventError> {
        Ok(self.db.find_by_id(EVENT, id).await?)
    }

    /// # Errors
    /// [`EventError::NotFound`] when no event has this id.
    pub async fn require(&self, id: &str) -> Result<Event, EventError> {
        self.get(id).await?.ok_or_else(|| EventError::event_not_found(id))
    }

    /// Moves the event to `state` regardless of its current one.
    ///
    /// # Errors
    /// [`EventError::NotFound`] when no event has this id.
    #[instrument(skip(self))]
    pub async fn set_state(&self, id: &str, state: EventState) -> Result<Event, EventError> {
        let patch = StatePatch { state, updated_at: Utc::now() };
        let event: Event = self
            .db
            .merge(EVENT, id, &patch)
            .await?
            .ok_or_else(|| EventError::event_not_found(id))?;


        info!(event = %id, %state, "Event state changed");
        Ok(event)
    }

    /// Hard delete, together with the event's registrations and feedback.
    ///
    /// # Errors
    /// [`EventError::NotFound`] when no event has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), EventError> {
        if self.db.delete_cascade(EVENT, id, EVENT_DEPENDENTS).await? {
            info!(event = %id, "Event deleted");
            Ok(())
        } else {
            Err(EventError::event_not_found(id))
        }
    }
}
