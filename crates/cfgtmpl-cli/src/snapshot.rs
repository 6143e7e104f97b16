//! Snapshot files
//!
//! A snapshot captures the stored state of one object plus the macro list a
//! caller wants to submit. JSON and YAML are accepted, chosen by extension.

use anyhow::{bail, Context, Result};
use cfgtmpl_macro::{CommandMacro, Macro, MacroLimits, ObjectId, TemplateInheritance};
use cfgtmpl_update::{MacroRequest, UpdateConfig};
use serde::Deserialize;
use std::path::Path;

/// Stored state of one object and the requested macros
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Snapshot {
    pub object_id: ObjectId,
    /// `(child_id, parent_id)` edges of the template tree
    #[serde(default)]
    pub edges: Vec<TemplateInheritance>,
    /// Macros of the object and its ancestors, tagged with their owner
    #[serde(default)]
    pub macros: Vec<Macro>,
    /// Macros of the check command, nearest command first
    #[serde(default)]
    pub command_macros: Vec<CommandMacro>,
    /// Desired macro list, in display order
    #[serde(default)]
    pub requested: Vec<MacroRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => bail!(
                "unsupported snapshot format for {} (expected .json, .yaml or .yml)",
                path.display()
            ),
        }
    }
}

impl Snapshot {
    /// Read and parse a snapshot file
    ///
    /// # Errors
    /// Returns error if the file cannot be read, has an unknown extension or
    /// does not parse
    pub fn load(path: &Path) -> Result<Self> {
        let format = Format::from_path(path)?;
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let snapshot: Self = match format {
            Format::Json => serde_json::from_str(&source)
                .with_context(|| format!("invalid JSON snapshot {}", path.display()))?,
            Format::Yaml => serde_yaml::from_str(&source)
                .with_context(|| format!("invalid YAML snapshot {}", path.display()))?,
        };
        tracing::debug!(
            path = %path.display(),
            object_id = %snapshot.object_id,
            macros = snapshot.macros.len(),
            requested = snapshot.requested.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Check stored macros against `limits`
    ///
    /// Deserialized macros skip the checks done by the builder.
    ///
    /// # Errors
    /// Returns error naming the first invalid macro
    pub fn validate(&self, limits: &MacroLimits) -> Result<()> {
        for macro_ in &self.macros {
            macro_
                .validate(limits)
                .with_context(|| format!("stored macro owned by {}", macro_.owner_id()))?;
        }
        Ok(())
    }
}

/// Load the use case configuration from a TOML file
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub fn load_config(path: &Path) -> Result<UpdateConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    UpdateConfig::from_toml_str(&source)
        .with_context(|| format!("invalid config {}", path.display()))
}
