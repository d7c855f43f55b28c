use campus_domain::constants::MAX_ID_LEN;
use std::borrow::Cow;

#[campus_derive::campus_error]
pub enum ResourceGuardError {
    #[error("Invalid identifier{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Checks client-supplied record ids before they reach a query.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Returns the bare id for `expected_table`.
    ///
    /// Accepts `"E001"` or `"event:E001"`; a prefix naming another table is rejected, as are
    /// empty ids, ids longer than [`MAX_ID_LEN`] and characters outside `[A-Za-z0-9_-]`.
    ///
    /// # Errors
    /// [`ResourceGuardError::Validation`] describing the first violated rule.
    pub fn verify<I, T>(id: I, expected_table: T) -> Result<String, ResourceGuardError>
    where
        I: AsRef<str>,
        T: AsRef<str>,
    {
        let id = id.as_ref().trim();
        let expected = expected_table.as_ref();

        let bare = match id.split_once(':') {
            Some((table, rest)) if table == expected => rest,
            Some((table, _)) => {
                return Err(ResourceGuardError::Validation {
                    message: format!("expected '{expected}', got '{table}'").into(),
                    context: Some("table mismatch".into()),
                });
            }
            None => id,
        };

        if bare.is_empty() {
            return Err(ResourceGuardError::Validation {
                message: "id is empty".into(),
                context: Some(expected.to_owned().into()),
            });
        }
        if bare.len() > MAX_ID_LEN {
            return Err(ResourceGuardError::Validation {
                message: format!("id is longer than {MAX_ID_LEN} characters").into(),
                context: Some(expected.to_owned().into()),
            });
        }
        if !bare.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(ResourceGuardError::Validation {
                message: format!("'{bare}' contains unsupported characters").into(),
                context: Some(expected.to_owned().into()),
            });
        }

        Ok(bare.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_matching_prefix() {
        assert_eq!(ResourceGuard::verify("event:E001", "event").unwrap(), "E001");
        assert_eq!(ResourceGuard::verify(" E001 ", "event").unwrap(), "E001");
    }

    #[test]
    fn rejects_foreign_tables_and_junk() {
        assert!(ResourceGuard::verify("college:C001", "event").is_err());
        assert!(ResourceGuard::verify("event:", "event").is_err());
        assert!(ResourceGuard::verify("E 001", "event").is_err());
        assert!(ResourceGuard::verify("x".repeat(MAX_ID_LEN + 1), "event").is_err());
    }
}
