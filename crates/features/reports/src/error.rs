use campus_database::DatabaseError;
use campus_kernel::validation::ValidationErrors;
use std::borrow::Cow;

#[campus_derive::campus_error]
pub enum ReportError {
    #[error("{message}{}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Unknown report name.
    #[error("{message}{}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Store error{}: {source}", format_context(.context))]
    Store {
        #[source]
        source: DatabaseError,
        context: Option<Cow<'static, str>>,
    },
}

impl From<ValidationErrors> for ReportError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation { message: errors.to_string().into(), context: None }
    }
}

#[cfg(feature = "server")]
impl From<ReportError> for campus_kernel::server::ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Validation { message, context } => Self::Validation { message, context },
            ReportError::NotFound { message, context } => Self::NotFound { message, context },
            ReportError::Store { source, context } => Self::Store { source, context },
        }
    }
}
