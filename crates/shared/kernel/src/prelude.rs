//! Imports most slices start with.

pub use crate::domain::constants::{self, fields};
pub use crate::domain::models::{
    AttendanceStatus, College, Event, EventState, Feedback, Registration, Student,
};

pub use crate::domain::registry::InitializedSlice;
pub use crate::safe_nanoid;
pub use crate::security::resource::ResourceGuard;
pub use crate::validation::{ValidationErrors, optional, verified_id};

#[cfg(feature = "server")]
pub use crate::server::error::ErrorBody;
#[cfg(feature = "server")]
pub use crate::server::{ApiError, ApiResult, ApiState, JsonBody, MessageResponse, QueryParams};
