//! Use case configuration

use crate::model::ROLE_CONFIGURATION_SERVICES_TEMPLATES_READ_WRITE;
use cfgtmpl_macro::MacroLimits;
use serde::{Deserialize, Serialize};

/// Service template update configuration
///
/// ```toml
/// required_role = "configuration_services_templates_rw"
///
/// [macro_limits]
/// max_value_length = 4096
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Topology role needed to edit service templates
    pub required_role: String,
    /// Limits applied to requested macros
    pub macro_limits: MacroLimits,
}

impl UpdateConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With required role
    #[inline]
    #[must_use]
    pub fn with_required_role(mut self, role: impl Into<String>) -> Self {
        self.required_role = role.into();
        self
    }

    /// With macro limits
    #[inline]
    #[must_use]
    pub fn with_macro_limits(mut self, limits: MacroLimits) -> Self {
        self.macro_limits = limits;
        self
    }

    /// Parse from TOML; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns error if `source` is not valid TOML for this structure
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            required_role: ROLE_CONFIGURATION_SERVICES_TEMPLATES_READ_WRITE.to_string(),
            macro_limits: MacroLimits::default(),
        }
    }
}
