//! Partial update request
//!
//! `None` means "leave as is"; `Some(vec![])` clears the property.

use cfgtmpl_macro::ObjectId;
use serde::{Deserialize, Serialize};

/// Macro as submitted by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroRequest {
    pub name: String,
    /// `None` on a password macro keeps the stored secret
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub is_password: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl MacroRequest {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            is_password: false,
            description: None,
        }
    }

    /// Password macro; `None` keeps the stored secret
    #[inline]
    #[must_use]
    pub fn password(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
            is_password: true,
            description: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialUpdateServiceTemplateRequest {
    pub id: ObjectId,
    #[serde(default)]
    pub host_templates: Option<Vec<ObjectId>>,
    #[serde(default)]
    pub service_categories: Option<Vec<ObjectId>>,
    /// Full desired macro list, in display order
    #[serde(default)]
    pub macros: Option<Vec<MacroRequest>>,
}

impl PartialUpdateServiceTemplateRequest {
    /// Request that changes nothing
    #[inline]
    #[must_use]
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            host_templates: None,
            service_categories: None,
            macros: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_host_templates(mut self, ids: Vec<ObjectId>) -> Self {
        self.host_templates = Some(ids);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_service_categories(mut self, ids: Vec<ObjectId>) -> Self {
        self.service_categories = Some(ids);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_macros(mut self, macros: Vec<MacroRequest>) -> Self {
        self.macros = Some(macros);
        self
    }
}
