//! Direct / inherited partition of stored macros

use crate::inheritance::InheritanceLine;
use crate::macros::{Macro, MacroMap};
use serde::Serialize;

/// Effective macros of one object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedMacros {
    /// Macros stored on the object itself
    pub direct: MacroMap,
    /// Macros visible through ancestors, nearest definition per name
    pub inherited: MacroMap,
}

impl ResolvedMacros {
    /// Effective macro for `name`: direct first, then inherited
    #[must_use]
    pub fn effective(&self, name: &str) -> Option<&Macro> {
        self.direct.get(name).or_else(|| self.inherited.get(name))
    }
}

/// Splits macros stored across an inheritance line
pub struct MacroResolver;

impl MacroResolver {
    /// Partition `macros` into direct and inherited views for `line.object_id()`
    ///
    /// - direct: every macro owned by the object
    /// - inherited: one entry per name defined by an ancestor, nearest
    ///   ancestor wins; names defined directly are left out
    ///
    /// Inherited entries follow the line order (nearest ancestor first),
    /// then the order of `macros` within one owner.
    ///
    /// # Panics
    /// Panics if a macro is owned by an object outside `line`. Callers load
    /// macros by `line.owners()` and screen them with
    /// [`InheritanceLine::check_owners`] first.
    #[must_use]
    pub fn resolve_inheritance(macros: &[Macro], line: &InheritanceLine) -> ResolvedMacros {
        let object_id = line.object_id();
        let mut direct = MacroMap::new();

        for macro_ in macros {
            assert!(
                line.contains(macro_.owner_id()),
                "macro '{}' owned by {} which is outside the inheritance line of {}",
                macro_.name(),
                macro_.owner_id(),
                object_id,
            );
            if macro_.owner_id() == object_id {
                direct.insert(macro_.name().to_string(), macro_.clone());
            }
        }

        let mut inherited = MacroMap::new();
        for &ancestor in line.ancestors() {
            for macro_ in macros.iter().filter(|m| m.owner_id() == ancestor) {
                if direct.contains_key(macro_.name()) {
                    continue;
                }
                inherited
                    .entry(macro_.name().to_string())
                    .or_insert_with(|| macro_.clone());
            }
        }

        tracing::debug!(
            object_id = %object_id,
            direct = direct.len(),
            inherited = inherited.len(),
            "macros resolved"
        );
        ResolvedMacros { direct, inherited }
    }
}
