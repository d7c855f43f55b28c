use campus_colleges::CollegeError;
use campus_database::DatabaseError;
use campus_events::EventError;
use campus_kernel::validation::ValidationErrors;
use std::borrow::Cow;

#[campus_derive::campus_error]
pub enum RegistrationError {
    #[error("{message}{}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Store error{}: {source}", format_context(.context))]
    Store {
        #[source]
        source: DatabaseError,
        context: Option<Cow<'static, str>>,
    },
}

impl RegistrationError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    pub(crate) fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }
}

impl From<ValidationErrors> for RegistrationError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(errors.to_string())
    }
}

impl From<CollegeError> for RegistrationError {
    fn from(err: CollegeError) -> Self {
        match err {
            CollegeError::Validation { message, context } => Self::Validation { message, context },
            CollegeError::NotFound { message, context } => Self::NotFound { message, context },
            CollegeError::Conflict { message, context } => Self::Conflict { message, context },
            CollegeError::Store { source, context } => Self::Store { source, context },
        }
    }
}

impl From<EventError> for RegistrationError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Validation { message, context } => Self::Validation { message, context },
            EventError::NotFound { message, context } => Self::NotFound { message, context },
            EventError::Conflict { message, context } => Self::Conflict { message, context },
            EventError::Store { source, context } => Self::Store { source, context },
        }
    }
}

#[cfg(feature = "server")]
impl From<RegistrationError> for campus_kernel::server::ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Validation { message, context } => {
                Self::Validation { message, context }
            }

            RegistrationError::NotFound { message, context } => Self::NotFound { message, context },
            RegistrationError::Conflict { message, context } => Self::Conflict { message, context },
            RegistrationError::Store { source, context } => Self::Store { source, context },
        }
    }
}
