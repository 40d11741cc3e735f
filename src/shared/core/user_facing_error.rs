use std::fmt::Display;
use thiserror::Error;

/// A failure reduced to the one sentence a user gets to see.
///
/// Services convert their structured errors into this type at their boundary, so views
/// never branch on transport details.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UserFacingError {
    message: String,
}

impl UserFacingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `"<context>: <cause>"`.
    pub fn with_context(context: &str, cause: impl Display) -> Self {
        Self::new(format!("{context}: {cause}"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod user_facing_error_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_display_only_the_message() {
        let error = UserFacingError::with_context("Failed to load attendance records", "timed out");
        assert_eq!(error.to_string(), "Failed to load attendance records: timed out");
        assert_eq!(error.message(), error.to_string());
    }
}
