//! Error types for the update use case
//!
//! Repository implementations report [`RepositoryError`]. The use case
//! folds every failure into [`ServiceTemplateError`], which is mapped to an
//! [`UpdateResponse`](crate::UpdateResponse) at the boundary.

use cfgtmpl_macro::{InheritanceError, MacroError, ObjectId};

/// Failure reported by a repository or the storage engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Read or write failed
    #[error("storage error: {0}")]
    Storage(String),

    /// Transaction could not be started, committed or rolled back
    #[error("transaction error: {0}")]
    Transaction(String),
}

/// Service template update errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceTemplateError {
    /// Current user lacks the read-write role
    #[error("you are not allowed to edit service templates")]
    UpdateNotAllowed,

    /// Template does not exist
    #[error("service template {0} not found")]
    NotFound(ObjectId),

    /// Request references ids that do not exist (or are not visible)
    #[error("the following {property} do not exist: {ids:?}")]
    IdsDoNotExist {
        /// Request property holding the ids
        property: &'static str,
        /// Missing ids
        ids: Vec<ObjectId>,
    },

    /// Requested macro is invalid
    #[error("invalid macro: {0}")]
    InvalidMacro(#[from] MacroError),

    /// Parent chain of the template is broken
    #[error("invalid template inheritance: {0}")]
    Inheritance(#[from] InheritanceError),

    /// Collaborator failure
    #[error("error while updating the service template: {0}")]
    Repository(#[from] RepositoryError),
}

impl ServiceTemplateError {
    /// Whether the request conflicts with stored state
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::IdsDoNotExist { .. })
    }

    /// Build an ids-do-not-exist error
    #[inline]
    #[must_use]
    pub fn ids_do_not_exist(property: &'static str, ids: Vec<ObjectId>) -> Self {
        Self::IdsDoNotExist { property, ids }
    }
}
