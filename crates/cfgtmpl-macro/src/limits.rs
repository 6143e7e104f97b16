//! Field length limits applied when macros are built

use crate::error::MacroError;
use serde::{Deserialize, Serialize};

/// Maximum macro name length in characters
pub const NAME_MAX_LENGTH: usize = 255;
/// Maximum macro value length in characters
pub const VALUE_MAX_LENGTH: usize = 4096;
/// Maximum macro description length in characters
pub const DESCRIPTION_MAX_LENGTH: usize = 65535;

/// Macro field limits
///
/// Mirrors the column sizes of the storage layer. Loaded from configuration
/// by the use case; [`Default`] matches the stock schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroLimits {
    /// Maximum name length
    pub max_name_length: usize,
    /// Maximum value length
    pub max_value_length: usize,
    /// Maximum description length
    pub max_description_length: usize,
}

impl Default for MacroLimits {
    fn default() -> Self {
        Self {
            max_name_length: NAME_MAX_LENGTH,
            max_value_length: VALUE_MAX_LENGTH,
            max_description_length: DESCRIPTION_MAX_LENGTH,
        }
    }
}

impl MacroLimits {
    /// Check macro fields against the limits
    ///
    /// # Errors
    /// Returns [`MacroError::EmptyName`] for an empty name and
    /// [`MacroError::TooLong`] for the first field over its limit.
    pub fn check(&self, name: &str, value: &str, description: &str) -> Result<(), MacroError> {
        if name.is_empty() {
            return Err(MacroError::EmptyName);
        }

        let fields = [
            ("name", name, self.max_name_length),
            ("value", value, self.max_value_length),
            ("description", description, self.max_description_length),
        ];
        for (field, text, max) in fields {
            let length = text.chars().count();
            if length > max {
                return Err(MacroError::TooLong {
                    name: name.to_string(),
                    field,
                    length,
                    max,
                });
            }
        }
        Ok(())
    }
}
