//! cfgtmpl command line support
//!
//! Runs the macro engine over snapshot files: `resolve` shows what an object
//! stores and inherits, `diff` shows the ordered writes a requested macro
//! list would cause. Nothing is persisted.

#![allow(missing_docs)]

mod render;
pub mod snapshot;

pub use render::{render_difference, render_resolved};
pub use snapshot::{load_config, Snapshot};

use anyhow::Result;
use cfgtmpl_macro::{
    CommandMacroType, InheritanceLine, MacroDifference, MacroManager, MacroMap, MacroResolver,
    ResolvedMacros,
};
use cfgtmpl_update::{MacroFactory, UpdateConfig};

/// Split the snapshot's stored macros into direct and inherited
///
/// # Errors
/// Returns error if the edges form a cycle or a macro belongs to an object
/// outside the inheritance line
pub fn resolve(snapshot: &Snapshot, config: &UpdateConfig) -> Result<ResolvedMacros> {
    snapshot.validate(&config.macro_limits)?;
    let line = InheritanceLine::build(snapshot.object_id, &snapshot.edges)?;
    line.check_owners(&snapshot.macros)?;

    Ok(MacroResolver::resolve_inheritance(&snapshot.macros, &line))
}

/// Ordered difference between stored state and the requested macros
///
/// Same steps as the update use case, minus persistence.
///
/// # Errors
/// Returns error if resolution fails or a requested macro is invalid
pub fn diff(snapshot: &Snapshot, config: &UpdateConfig) -> Result<MacroDifference> {
    let resolved = resolve(snapshot, config)?;
    let command = MacroManager::resolve_inheritance_for_command_macro(
        snapshot
            .command_macros
            .iter()
            .filter(|m| m.kind() == CommandMacroType::Service)
            .cloned(),
    );

    let mut target = MacroMap::new();
    for request in &snapshot.requested {
        let macro_ = MacroFactory::create(
            request,
            snapshot.object_id,
            &resolved,
            &command,
            &config.macro_limits,
        )?;
        target.insert(macro_.name().to_string(), macro_);
    }

    let mut difference =
        MacroDifference::compute(&resolved.direct, &resolved.inherited, &command, &target);
    MacroManager::set_order(&mut difference, &target, &resolved.direct);
    MacroManager::fill_descriptions(&mut difference, &command);

    tracing::info!(
        object_id = %snapshot.object_id,
        changes = difference.change_count(),
        "difference computed"
    );
    Ok(difference)
}
