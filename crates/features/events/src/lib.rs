//! Events a college runs. New events start as drafts; only published events accept
//! registrations. State changes are not restricted to a fixed order.

pub mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod model;
mod service;

pub use error::{EventError, EventErrorExt};
#[cfg(feature = "server")]
pub use handlers::router;
pub use model::{CreateEventRequest, EventActionResponse, EventQuery, ListEventsQuery, NewEvent};
pub use service::EventService;

use campus_colleges::CollegeService;
use campus_database::{Database, Migration};
use campus_kernel::domain::registry::InitializedSlice;

pub const MIGRATIONS: &[Migration] =
    &[Migration::new("events", "0001", include_str!("../migrations/0001-events.surql"))];

#[campus_derive::campus_slice]
pub struct Events {
    pub service: EventService,
}

pub fn init(db: &Database) -> InitializedSlice {
    tracing::info!("Events slice initialized");
    let service = EventService::new(db.clone(), CollegeService::new(db.clone()));
    InitializedSlice::new(Events::new(EventsInner { service }))
}
