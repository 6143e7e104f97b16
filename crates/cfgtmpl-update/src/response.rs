//! Response kinds returned by the use case

use crate::error::ServiceTemplateError;

/// Outcome of an update, ready for a presenter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResponse {
    /// Update applied
    NoContent,
    /// Target object missing
    NotFound(String),
    /// Caller lacks the required role
    Forbidden(String),
    /// Request conflicts with stored state
    Conflict(String),
    /// Anything else; the transaction was rolled back
    Error(String),
}

impl UpdateResponse {
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::NoContent)
    }
}

impl From<ServiceTemplateError> for UpdateResponse {
    fn from(err: ServiceTemplateError) -> Self {
        let message = err.to_string();
        match err {
            ServiceTemplateError::UpdateNotAllowed => Self::Forbidden(message),
            ServiceTemplateError::NotFound(_) => Self::NotFound("Service template".to_string()),
            _ if err.is_conflict() => Self::Conflict(message),
            _ => Self::Error(message),
        }
    }
}

/// Receives the response of a use case
pub trait Presenter: Send + Sync {
    fn present(&self, response: UpdateResponse);
}
