//! Facade crate for the campus hub slices.
//! Re-exports kernel primitives, orders slice migrations and aggregates slice initialization.
//! Keep this crate thin: it composes other crates and owns no business rules.
//!
//! ## Usage
//! - Depend on `campus` with the `server` feature.
//! - Open the database with [`migrations`], then register [`init`]'s slices on the `ApiState`
//!   and nest [`api_router`] under `/api`.

pub mod seed;

use campus_database::{Database, Migration};
use campus_kernel::domain::registry::InitializedSlice;
pub use campus_kernel as kernel;
pub use campus_kernel::domain;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use campus_kernel::server::router::system_router;
    }
}

pub mod features {
    pub use campus_colleges as colleges;
    pub use campus_events as events;
    pub use campus_feedback as feedback;
    pub use campus_registrations as registrations;
    pub use campus_reports as reports;
}

/// Every slice migration, dependencies first.
#[must_use]
pub fn migrations() -> Vec<Migration> {
    [
        features::colleges::MIGRATIONS,
        features::events::MIGRATIONS,
        features::registrations::MIGRATIONS,
        features::feedback::MIGRATIONS,
    ]
    .concat()
}

/// Initializes every slice against `database`.
pub fn init(database: &Database) -> Vec<InitializedSlice> {
    vec![
        features::colleges::init(database),
        features::events::init(database),
        features::registrations::init(database),
        features::feedback::init(database),
        features::reports::init(database),
    ]
}

/// Routes of every slice, relative to the API prefix.
#[cfg(feature = "server")]
pub fn api_router() -> utoipa_axum::router::OpenApiRouter<kernel::server::ApiState> {
    utoipa_axum::router::OpenApiRouter::new()
        .merge(features::colleges::router())
        .merge(features::events::router())
        .merge(features::registrations::router())
        .merge(features::feedback::router())
        .merge(features::reports::router())
}
