//! Collecting input checks for request DTOs.
//!
//! ```rust
//! use campus_kernel::validation::ValidationErrors;
//!
//! let mut errors = ValidationErrors::new();
//! let title = errors.required("title", Some("  Tech Fest ".to_owned()));
//! let college = errors.required("collegeId", None);
//! assert_eq!(title, "Tech Fest");
//! assert!(college.is_empty());
//! assert_eq!(errors.finish().unwrap_err().to_string(), "collegeId is required");
//! ```

use crate::security::resource::ResourceGuard;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: Cow<'static, str>,
}

/// Every problem found in one request, in the order fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single failed field.
    pub fn single(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<Cow<'static, str>>) {
        self.0.push(FieldError { field, message: message.into() });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Trimmed value, or an empty string with an error recorded when missing or blank.
    pub fn required(&mut self, field: &'static str, value: Option<String>) -> String {
        match optional(value) {
            Some(value) => value,
            None => {
                self.add(field, "is required");
                String::new()
            }
        }
    }

    /// Like [`Self::required`], then checked as a record id of `table`.
    pub fn required_id(
        &mut self,
        field: &'static str,
        table: &str,
        value: Option<String>,
    ) -> String {
        let value = self.required(field, value);
        if value.is_empty() {
            return value;
        }
        self.check_id(field, table, &value).unwrap_or_default()
    }

    /// Checks an optional id, recording an error when it is present but malformed.
    pub fn optional_id(
        &mut self,
        field: &'static str,
        table: &str,
        value: Option<String>,
    ) -> Option<String> {
        optional(value).and_then(|value| self.check_id(field, table, &value))
    }

    /// Optional e-mail address, recording an error when it does not look like one.
    pub fn email(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        let value = optional(value)?;
        if is_email(&value) {
            Some(value)
        } else {
            self.add(field, "is not a valid e-mail address");
            None
        }
    }

    fn check_id(&mut self, field: &'static str, table: &str, value: &str) -> Option<String> {
        match ResourceGuard::verify(value, table) {
            Ok(id) => Some(id),
            Err(err) => {
                self.add(field, err.to_string());
                None
            }
        }
    }

    /// # Errors
    /// Returns `self` when at least one check failed.
    pub fn finish(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Checks one id that arrives outside a body, such as a path segment.
///
/// # Errors
/// A single-field [`ValidationErrors`] when the id is malformed.
pub fn verified_id(
    field: &'static str,
    table: &str,
    value: &str,
) -> Result<String, ValidationErrors> {
    ResourceGuard::verify(value, table)
        .map_err(|err| ValidationErrors::single(field, err.to_string()))
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() > 1
        && domain.split('.').all(|part| !part.is_empty())
        && !value.chars().any(char::is_whitespace)
}

/// Trims and drops blank strings.
#[must_use]
pub fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_missing_field() {
        let mut errors = ValidationErrors::new();
        errors.required("eventId", None);
        errors.required("studentRoll", Some("   ".to_owned()));
        errors.required("collegeId", Some("C001".to_owned()));

        let err = errors.finish().unwrap_err();
        assert_eq!(err.errors().len(), 2);
        assert_eq!(err.to_string(), "eventId is required, studentRoll is required");
    }

    #[test]
    fn ids_are_guarded() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.required_id("eventId", "event", Some("event:E001".to_owned())), "E001");
        assert!(errors.is_empty());

        let wrong_table = Some("event:E001".to_owned());
        assert!(errors.optional_id("collegeId", "college", wrong_table).is_none());
        assert_eq!(errors.errors()[0].field, "collegeId");

        assert!(errors.optional_id("collegeId", "college", None).is_none());
        assert_eq!(errors.errors().len(), 1);
    }

    #[test]
    fn emails_are_loosely_checked() {
        let mut errors = ValidationErrors::new();
        let padded = Some(" priya@reva.edu ".to_owned());
        assert_eq!(errors.email("email", padded).as_deref(), Some("priya@reva.edu"));
        assert!(errors.email("email", None).is_none());
        assert!(errors.is_empty());

        let malformed =
            ["priya", "@reva.edu", "priya@reva", "priya@reva.", "pri ya@reva.edu", "a@b@c.d"];
        for bad in malformed {

            assert!(errors.email("email", Some(bad.to_owned())).is_none(), "{bad}");
        }
        assert_eq!(errors.errors().len(), 6);
    }

    #[test]
    fn path_ids_are_verified() {
        assert_eq!(verified_id("id", "event", "event:E001").unwrap(), "E001");
        let err = verified_id("id", "event", "E 001").unwrap_err();
        assert_eq!(err.errors()[0].field, "id");
    }
}
