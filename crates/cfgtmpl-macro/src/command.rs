//! Macros declared by check commands

use crate::macros::Macro;
use crate::types::ObjectId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Command macros keyed by name, in insertion order
pub type CommandMacroMap = IndexMap<String, CommandMacro>;

/// Kind of object a command macro applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandMacroType {
    /// `$_HOST...$` macros
    Host,
    /// `$_SERVICE...$` macros
    Service,
}

/// A macro referenced by a check command line
///
/// Read only. Supplies the default description for macros added without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMacro {
    command_id: ObjectId,
    #[serde(rename = "type")]
    kind: CommandMacroType,
    name: String,
    #[serde(default)]
    description: String,
}

impl CommandMacro {
    #[inline]
    #[must_use]
    pub fn new(command_id: ObjectId, kind: CommandMacroType, name: impl Into<String>) -> Self {
        Self {
            command_id,
            kind,
            name: name.into(),
            description: String::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn command_id(&self) -> ObjectId {
        self.command_id
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> CommandMacroType {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether `macro_` only restates this command default
    ///
    /// True for an empty, non-password value carrying the command's description.
    #[must_use]
    pub fn is_default_for(&self, macro_: &Macro) -> bool {
        macro_.value().is_empty()
            && !macro_.is_password()
            && macro_.description() == self.description
    }
}
