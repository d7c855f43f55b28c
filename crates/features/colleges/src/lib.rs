//! Colleges and the students enrolled in them.
//!
//! Students have no creation endpoint of their own: the registrations slice creates
//! them on first sign-up through [`CollegeService::find_or_create_student`].

pub mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod model;
mod service;

pub use error::{CollegeError, CollegeErrorExt};
#[cfg(feature = "server")]
pub use handlers::router;
pub use model::{CreateCollegeRequest, NewCollege, NewStudent};
pub use service::CollegeService;

use campus_database::{Database, Migration};
use campus_kernel::domain::registry::InitializedSlice;

pub const MIGRATIONS: &[Migration] =
    &[Migration::new("colleges", "0001", include_str!("../migrations/0001-colleges.surql"))];

#[campus_derive::campus_slice]
pub struct Colleges {
    pub service: CollegeService,
}

pub fn init(db: &Database) -> InitializedSlice {
    tracing::info!("Colleges slice initialized");
    InitializedSlice::new(Colleges::new(CollegesInner { service: CollegeService::new(db.clone()) }))
}
