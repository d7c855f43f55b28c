pub mod error;
pub mod extract;
mod health;
pub mod response;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use extract::{JsonBody, QueryParams};
pub use health::HealthResponse;
pub use response::MessageResponse;
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
