//! Error types for the macro engine
//!
//! Only input validation and inheritance-line construction can fail.
//! Resolution, difference and ordering are total over valid input.

use crate::types::ObjectId;

/// Macro validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MacroError {
    /// Macro name is empty
    #[error("macro name must not be empty")]
    EmptyName,

    /// A field exceeds its configured maximum length
    #[error("macro '{name}': {field} is {length} characters long (max {max})")]
    TooLong {
        /// Macro name
        name: String,
        /// Offending field
        field: &'static str,
        /// Actual length in characters
        length: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Inheritance line errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InheritanceError {
    /// Parent chain loops back onto itself
    #[error("inheritance cycle for object {object_id}: {path:?}")]
    Cycle {
        /// Object the line was built for
        object_id: ObjectId,
        /// Chain walked until the repeated id, repeated id last
        path: Vec<ObjectId>,
    },

    /// A loaded macro belongs to neither the object nor its ancestors
    #[error("macro '{name}' is owned by {owner_id}, which is not in the inheritance line of {object_id}")]
    OutsideLine {
        /// Macro name
        name: String,
        /// Owner found on the macro
        owner_id: ObjectId,
        /// Object the line was built for
        object_id: ObjectId,
    },
}
