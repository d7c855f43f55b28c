//! Registrations tie a student to a published event of their college and carry the
//! attendance status recorded for it.

pub mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod model;
mod service;

pub use error::{RegistrationError, RegistrationErrorExt};
#[cfg(feature = "server")]
pub use handlers::router;
pub use model::{AttendanceRequest, AttendanceUpdate, NewRegistration, RegisterRequest};
pub use service::RegistrationService;

use campus_colleges::CollegeService;
use campus_database::{Database, Migration};
use campus_events::EventService;
use campus_kernel::domain::registry::InitializedSlice;

pub const MIGRATIONS: &[Migration] = &[Migration::new(
    "registrations",
    "0001",
    include_str!("../migrations/0001-registrations.surql"),
)];


#[campus_derive::campus_slice]
pub struct Registrations {
    pub service: RegistrationService,
}

pub fn init(db: &Database) -> InitializedSlice {
    tracing::info!("Registrations slice initialized");
    let colleges = CollegeService::new(db.clone());
    let events = EventService::new(db.clone(), colleges.clone());
    let service = RegistrationService::new(db.clone(), colleges, events);
    InitializedSlice::new(Registrations::new(RegistrationsInner { service }))
}
