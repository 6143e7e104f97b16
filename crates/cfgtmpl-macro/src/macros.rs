//! Macro value object
//!
//! A [`Macro`] is one named value stored against a configuration object.
//! The owner may be the object being edited or one of its ancestors.

use crate::error::MacroError;
use crate::limits::MacroLimits;
use crate::types::ObjectId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Macros keyed by name, in insertion order
pub type MacroMap = IndexMap<String, Macro>;

/// A single macro row
///
/// # Invariants
/// - `name` is non-empty and unique per owner (case-sensitive)
/// - field lengths respect the [`MacroLimits`] it was built with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Macro {
    owner_id: ObjectId,
    name: String,
    #[serde(default)]
    value: String,
    #[serde(default)]
    is_password: bool,
    #[serde(default)]
    description: String,
    #[serde(default)]
    order: u32,
}

impl Macro {
    /// Create a plain macro with default limits
    ///
    /// # Errors
    /// Returns error if the name is empty or a field is too long
    pub fn new(
        owner_id: ObjectId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, MacroError> {
        Self::builder(owner_id, name).value(value).build()
    }

    /// Start building a macro
    #[inline]
    #[must_use]
    pub fn builder(owner_id: ObjectId, name: impl Into<String>) -> MacroBuilder {
        MacroBuilder::new(owner_id, name)
    }

    /// Owning object
    #[inline]
    #[must_use]
    pub fn owner_id(&self) -> ObjectId {
        self.owner_id
    }

    /// Macro name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Macro value (may be empty)
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the value is a secret
    #[inline]
    #[must_use]
    pub fn is_password(&self) -> bool {
        self.is_password
    }

    /// Free text description
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Display / apply order
    #[inline]
    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    /// Compare the user-visible definition (value, password flag, description)
    ///
    /// Owner and order are storage details and are ignored.
    #[must_use]
    pub fn same_definition(&self, other: &Macro) -> bool {
        self.value == other.value
            && self.is_password == other.is_password
            && self.description == other.description
    }

    /// Re-check the fields against explicit limits
    ///
    /// Needed for macros that bypassed the builder (deserialized rows).
    ///
    /// # Errors
    /// Returns error if a field violates `limits`
    pub fn validate(&self, limits: &MacroLimits) -> Result<(), MacroError> {
        limits.check(&self.name, &self.value, &self.description)
    }
}

/// Builder for [`Macro`]
#[derive(Debug, Clone)]
pub struct MacroBuilder {
    owner_id: ObjectId,
    name: String,
    value: String,
    is_password: bool,
    description: String,
    order: u32,
}

impl MacroBuilder {
    /// Create new builder
    #[inline]
    #[must_use]
    pub fn new(owner_id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
            value: String::new(),
            is_password: false,
            description: String::new(),
            order: 0,
        }
    }

    /// Set value
    #[inline]
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Mark as password
    #[inline]
    #[must_use]
    pub fn password(mut self, is_password: bool) -> Self {
        self.is_password = is_password;
        self
    }

    /// Set description
    #[inline]
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set order
    #[inline]
    #[must_use]
    pub fn order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Build with default limits
    ///
    /// # Errors
    /// Returns error if the name is empty or a field is too long
    pub fn build(self) -> Result<Macro, MacroError> {
        self.build_with(&MacroLimits::default())
    }

    /// Build against explicit limits
    ///
    /// # Errors
    /// Returns error if the name is empty or a field exceeds `limits`
    pub fn build_with(self, limits: &MacroLimits) -> Result<Macro, MacroError> {
        limits.check(&self.name, &self.value, &self.description)?;
        Ok(Macro {
            owner_id: self.owner_id,
            name: self.name,
            value: self.value,
            is_password: self.is_password,
            description: self.description,
            order: self.order,
        })
    }
}
