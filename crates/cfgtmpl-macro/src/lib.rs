//! Template macro engine
//!
//! Resolves macros across a template inheritance line and computes the
//! minimal set of writes needed to reach a requested macro set.
//!
//! # Core Concepts
//!
//! - [`Macro`]: A named value stored against a service or template
//! - [`CommandMacro`]: Macro declared by a check command (default description)
//! - [`InheritanceLine`]: Ancestors of an object, nearest first
//! - [`MacroResolver`]: Splits stored macros into direct and inherited views
//! - [`MacroDifference`]: Added / updated / removed / unchanged classification
//! - [`MacroManager`]: Ordering and command-macro flattening
//!
//! Everything here is pure and synchronous. Persisting a difference, and
//! serializing concurrent updates of one object, belong to the caller.
//!
//! # Example
//!
//! ```rust
//! use cfgtmpl_macro::{
//!     CommandMacroMap, InheritanceLine, Macro, MacroDifference, MacroManager, MacroMap,
//!     MacroResolver, ObjectId, TemplateInheritance,
//! };
//!
//! let object = ObjectId(1);
//! let line = InheritanceLine::build(object, &[TemplateInheritance::new(object, ObjectId(2))])?;
//! let stored = vec![Macro::new(ObjectId(2), "TIMEOUT", "30")?];
//! let resolved = MacroResolver::resolve_inheritance(&stored, &line);
//!
//! let mut target = MacroMap::new();
//! target.insert("TIMEOUT".into(), Macro::new(object, "TIMEOUT", "60")?);
//!
//! let mut diff = MacroDifference::compute(
//!     &resolved.direct,
//!     &resolved.inherited,
//!     &CommandMacroMap::new(),
//!     &target,
//! );
//! MacroManager::set_order(&mut diff, &target, &resolved.direct);
//! assert!(diff.added_macros.contains_key("TIMEOUT"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod command;
mod difference;
mod error;
mod inheritance;
mod limits;
mod macros;
mod manager;
mod resolver;
mod types;

pub use command::{CommandMacro, CommandMacroMap, CommandMacroType};
pub use difference::MacroDifference;
pub use error::{InheritanceError, MacroError};
pub use inheritance::{InheritanceLine, TemplateInheritance};
pub use limits::{MacroLimits, DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH, VALUE_MAX_LENGTH};
pub use macros::{Macro, MacroBuilder, MacroMap};
pub use manager::MacroManager;
pub use resolver::{MacroResolver, ResolvedMacros};
pub use types::ObjectId;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn full_update_cycle() {
        let object = ObjectId(1);
        let parent = ObjectId(2);
        let line =
            InheritanceLine::build(object, &[TemplateInheritance::new(object, parent)]).unwrap();

        let stored = vec![
            Macro::new(parent, "TIMEOUT", "30").unwrap(),
            Macro::builder(object, "HOSTNAME").value("db01").order(0).build().unwrap(),
        ];
        let resolved = MacroResolver::resolve_inheritance(&stored, &line);

        let commands = MacroManager::resolve_inheritance_for_command_macro(vec![CommandMacro::new(
            ObjectId(50),
            CommandMacroType::Service,
            "WARNING",
        )
        .with_description("warning threshold")]);

        let mut target = MacroMap::new();
        target.insert("WARNING".into(), Macro::new(object, "WARNING", "80").unwrap());
        target.insert("TIMEOUT".into(), Macro::new(object, "TIMEOUT", "30").unwrap());

        let mut diff =
            MacroDifference::compute(&resolved.direct, &resolved.inherited, &commands, &target);
        MacroManager::set_order(&mut diff, &target, &resolved.direct);
        MacroManager::fill_descriptions(&mut diff, &commands);

        assert_eq!(diff.added_macros.len(), 1);
        let warning = &diff.added_macros["WARNING"];
        assert_eq!(warning.order(), 0);
        assert_eq!(warning.description(), "warning threshold");
        assert!(diff.unchanged_macros.contains_key("TIMEOUT"));
        assert!(diff.removed_macros.contains_key("HOSTNAME"));
    }
}
