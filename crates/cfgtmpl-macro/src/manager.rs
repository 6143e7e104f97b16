//! Ordering and command-macro helpers applied on top of a difference

use crate::command::{CommandMacro, CommandMacroMap};
use crate::difference::MacroDifference;
use crate::macros::{Macro, MacroMap};

/// Finalizes a [`MacroDifference`] before it is persisted
pub struct MacroManager;

impl MacroManager {
    /// Assign display order to every macro that will be stored directly
    ///
    /// Positions follow `target` (the caller's order) starting at 0, one per
    /// requested entry, so gaps are left where an inherited macro was listed.
    /// Direct macros `target` does not mention (and the diff does not remove)
    /// are appended afterwards in their stored order.
    ///
    /// A direct macro that is otherwise unchanged but sits at a new position
    /// is moved to `updated_macros` so its order gets written.
    pub fn set_order(diff: &mut MacroDifference, target: &MacroMap, direct: &MacroMap) {
        let mut position: u32 = 0;

        for name in target.keys() {
            if !diff.removed_macros.contains_key(name) {
                Self::place(diff, direct, name, position);
                position += 1;
            }
        }

        let mut unmentioned: Vec<&Macro> = direct
            .values()
            .filter(|m| !target.contains_key(m.name()) && !diff.removed_macros.contains_key(m.name()))
            .collect();
        unmentioned.sort_by_key(|m| m.order());

        for stored in unmentioned {
            if stored.order() != position {
                let mut moved = stored.clone();
                moved.set_order(position);
                diff.updated_macros.insert(moved.name().to_string(), moved);
            }
            position += 1;
        }
    }

    fn place(diff: &mut MacroDifference, direct: &MacroMap, name: &str, position: u32) {
        if let Some(m) = diff.added_macros.get_mut(name) {
            m.set_order(position);
            return;
        }
        if let Some(m) = diff.updated_macros.get_mut(name) {
            m.set_order(position);
            return;
        }

        let reordered = direct.get(name).is_some_and(|stored| stored.order() != position);
        if reordered {
            if let Some(mut m) = diff.unchanged_macros.shift_remove(name) {
                m.set_order(position);
                diff.updated_macros.insert(name.to_string(), m);
            }
        } else if let Some(m) = diff.unchanged_macros.get_mut(name) {
            m.set_order(position);
        }
    }

    /// Flatten command macros into one map, first occurrence wins
    ///
    /// `macros` must be ordered nearest command first, the same rule as
    /// nearest-ancestor-wins for template macros.
    #[must_use]
    pub fn resolve_inheritance_for_command_macro(
        macros: impl IntoIterator<Item = CommandMacro>,
    ) -> CommandMacroMap {
        let mut resolved = CommandMacroMap::new();
        for macro_ in macros {
            resolved
                .entry(macro_.name().to_string())
                .or_insert(macro_);
        }
        resolved
    }

    /// Give added macros without description the command's description
    pub fn fill_descriptions(diff: &mut MacroDifference, command: &CommandMacroMap) {
        for (name, macro_) in &mut diff.added_macros {
            if !macro_.description().is_empty() {
                continue;
            }
            if let Some(cmd) = command.get(name) {
                macro_.set_description(cmd.description());
            }
        }
    }
}
