use crate::shared::core::user_facing_error::UserFacingError;

/// How a user-driven flow (dialog submit, confirmation, quick save) ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome<TFieldError> {
    /// The backing service confirmed the change.
    Completed,
    /// The user dismissed the dialog or declined the prompt; nothing was sent.
    Cancelled,
    /// Local validation failed; nothing was sent.
    Invalid(Vec<TFieldError>),
    /// The service rejected the request. Local state is unchanged.
    Failed(UserFacingError),
}

impl<TFieldError> FlowOutcome<TFieldError> {
    pub fn is_completed(&self) -> bool {
        matches!(self, FlowOutcome::Completed)
    }
}
