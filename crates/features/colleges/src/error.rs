use campus_database::DatabaseError;
use campus_kernel::validation::ValidationErrors;
use std::borrow::Cow;

#[campus_derive::campus_error]
pub enum CollegeError {
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

impl CollegeError {
    pub(crate) fn college_not_found(id: &str) -> Self {
        Self::NotFound { message: format!("College {id} not found").into(), context: None }
    }
}

impl From<ValidationErrors> for CollegeError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation { message: errors.to_string().into(), context: None }
    }
}

#[cfg(feature = "server")]
impl From<CollegeError> for campus_kernel::server::ApiError {
    fn from(err: CollegeError) -> Self {
        match err {
            CollegeError::Validation { message, context } => Self::Validation { message, context },
            CollegeError::NotFound { message, context } => Self::NotFound { message, context },
            CollegeError::Conflict { message, context } => Self::Conflict { message, context },
            CollegeError::Store { source, context } => Self::Store { source, context },
        }
    }
}
