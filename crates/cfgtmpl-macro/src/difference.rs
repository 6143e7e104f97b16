//! Macro difference
//!
//! Computes the writes needed to move the stored macros of an object to a
//! requested macro set, without materializing values the object already
//! gets from its ancestors or its check command.

use crate::command::CommandMacroMap;
use crate::macros::{Macro, MacroMap};
use serde::Serialize;

/// Classification of a requested macro set against stored state
///
/// # Invariants
/// - the four maps are pairwise disjoint by name
/// - added/updated/unchanged keep the caller's order; removed keeps the
///   stored order of direct macros
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MacroDifference {
    /// New direct rows
    pub added_macros: MacroMap,
    /// Direct rows whose content changes
    pub updated_macros: MacroMap,
    /// Direct rows to delete (reverts to inherited / command default)
    pub removed_macros: MacroMap,
    /// Requested macros that need no write
    pub unchanged_macros: MacroMap,
}

impl MacroDifference {
    /// Classify every macro of `target`
    ///
    /// Per requested name, checked in this order:
    /// 1. stored directly: updated if value, password flag or description
    ///    differ, unchanged otherwise
    /// 2. inherited: unchanged if identical to the inherited definition
    ///    (value, password flag and description), added (an override)
    ///    otherwise. Requests without a description are expected to carry
    ///    the inherited one, so this matches on value alone in that case.
    /// 3. declared by the command: unchanged if it only restates the
    ///    command default, added otherwise
    /// 4. added
    ///
    /// Direct macros missing from `target` are removed. Inherited and
    /// command macros missing from `target` are not touched.
    #[must_use]
    pub fn compute(
        direct: &MacroMap,
        inherited: &MacroMap,
        command: &CommandMacroMap,
        target: &MacroMap,
    ) -> Self {
        let mut diff = Self::default();

        for (name, macro_) in target {
            if let Some(stored) = direct.get(name) {
                if stored.same_definition(macro_) {
                    diff.unchanged_macros.insert(name.clone(), macro_.clone());
                } else {
                    diff.updated_macros.insert(name.clone(), macro_.clone());
                }
                continue;
            }

            let restates_default = match (inherited.get(name), command.get(name)) {
                (Some(parent), _) => parent.same_definition(macro_),
                (None, Some(cmd)) => cmd.is_default_for(macro_),
                (None, None) => false,
            };
            if restates_default {
                diff.unchanged_macros.insert(name.clone(), macro_.clone());
            } else {
                diff.added_macros.insert(name.clone(), macro_.clone());
            }
        }

        for (name, stored) in direct {
            if !target.contains_key(name) {
                diff.removed_macros.insert(name.clone(), stored.clone());
            }
        }

        tracing::debug!(
            added = diff.added_macros.len(),
            updated = diff.updated_macros.len(),
            removed = diff.removed_macros.len(),
            unchanged = diff.unchanged_macros.len(),
            "macro difference computed"
        );
        diff
    }

    /// No write is required
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added_macros.is_empty()
            && self.updated_macros.is_empty()
            && self.removed_macros.is_empty()
    }

    /// Number of writes (add + update + delete)
    #[inline]
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.added_macros.len() + self.updated_macros.len() + self.removed_macros.len()
    }

    /// Find `name` in any of the maps
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Macro> {
        self.added_macros
            .get(name)
            .or_else(|| self.updated_macros.get(name))
            .or_else(|| self.removed_macros.get(name))
            .or_else(|| self.unchanged_macros.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandMacro, CommandMacroType};
    use crate::types::ObjectId;
    use pretty_assertions::assert_eq;

    const OBJECT: ObjectId = ObjectId(10);
    const PARENT: ObjectId = ObjectId(20);

    fn map(owner: ObjectId, entries: &[(&str, &str)]) -> MacroMap {
        entries
            .iter()
            .map(|(name, value)| {
                (
                    (*name).to_string(),
                    Macro::new(owner, *name, *value).unwrap(),
                )
            })
            .collect()
    }

    fn names(map: &MacroMap) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[test]
    fn resubmitted_inherited_value_is_not_materialized() {
        let diff = MacroDifference::compute(
            &MacroMap::new(),
            &map(PARENT, &[("TIMEOUT", "30")]),
            &CommandMacroMap::new(),
            &map(OBJECT, &[("TIMEOUT", "30")]),
        );

        assert!(diff.is_empty());
        assert_eq!(names(&diff.unchanged_macros), vec!["TIMEOUT"]);
    }

    #[test]
    fn overriding_inherited_value_adds_direct_row() {
        let diff = MacroDifference::compute(
            &MacroMap::new(),
            &map(PARENT, &[("TIMEOUT", "30")]),
            &CommandMacroMap::new(),
            &map(OBJECT, &[("TIMEOUT", "60")]),
        );

        assert_eq!(names(&diff.added_macros), vec!["TIMEOUT"]);
        assert_eq!(diff.added_macros["TIMEOUT"].value(), "60");
        assert_eq!(diff.added_macros["TIMEOUT"].owner_id(), OBJECT);
        assert!(diff.updated_macros.is_empty());
        assert!(diff.removed_macros.is_empty());
    }

    #[test]
    fn omitted_override_is_removed() {
        let diff = MacroDifference::compute(
            &map(OBJECT, &[("TIMEOUT", "60")]),
            &map(PARENT, &[("TIMEOUT", "30")]),
            &CommandMacroMap::new(),
            &MacroMap::new(),
        );

        assert_eq!(names(&diff.removed_macros), vec!["TIMEOUT"]);
        assert_eq!(diff.removed_macros["TIMEOUT"].value(), "60");
        assert!(diff.added_macros.is_empty());
        assert!(diff.updated_macros.is_empty());
    }

    #[test]
    fn direct_changes_and_no_ops() {
        let direct = map(OBJECT, &[("A", "1"), ("B", "2"), ("C", "3")]);
        let target = map(OBJECT, &[("A", "1"), ("B", "changed"), ("D", "4")]);

        let diff =
            MacroDifference::compute(&direct, &MacroMap::new(), &CommandMacroMap::new(), &target);

        assert_eq!(names(&diff.unchanged_macros), vec!["A"]);
        assert_eq!(names(&diff.updated_macros), vec!["B"]);
        assert_eq!(names(&diff.added_macros), vec!["D"]);
        assert_eq!(names(&diff.removed_macros), vec!["C"]);
        assert_eq!(diff.change_count(), 3);
    }

    #[test]
    fn description_or_password_change_updates() {
        let direct = map(OBJECT, &[("A", "1"), ("B", "2")]);
        let mut target = MacroMap::new();
        target.insert(
            "A".into(),
            Macro::builder(OBJECT, "A").value("1").description("new").build().unwrap(),
        );
        target.insert(
            "B".into(),
            Macro::builder(OBJECT, "B").value("2").password(true).build().unwrap(),
        );

        let diff =
            MacroDifference::compute(&direct, &MacroMap::new(), &CommandMacroMap::new(), &target);
        assert_eq!(names(&diff.updated_macros), vec!["A", "B"]);
    }

    #[test]
    fn untouched_inherited_and_command_macros_stay_implicit() {
        let mut command = CommandMacroMap::new();
        command.insert(
            "WARNING".into(),
            CommandMacro::new(ObjectId(5), CommandMacroType::Service, "WARNING"),
        );

        let diff = MacroDifference::compute(
            &MacroMap::new(),
            &map(PARENT, &[("TIMEOUT", "30")]),
            &command,
            &MacroMap::new(),
        );

        assert_eq!(diff, MacroDifference::default());
    }

    #[test]
    fn command_default_restatement_is_unchanged() {
        let mut command = CommandMacroMap::new();
        command.insert(
            "WARNING".into(),
            CommandMacro::new(ObjectId(5), CommandMacroType::Service, "WARNING")
                .with_description("warn level"),
        );
        let mut target = MacroMap::new();
        target.insert(
            "WARNING".into(),
            Macro::builder(OBJECT, "WARNING").description("warn level").build().unwrap(),
        );

        let diff =
            MacroDifference::compute(&MacroMap::new(), &MacroMap::new(), &command, &target);
        assert!(diff.is_empty());

        let valued = map(OBJECT, &[("WARNING", "80")]);
        let diff = MacroDifference::compute(&MacroMap::new(), &MacroMap::new(), &command, &valued);
        assert_eq!(names(&diff.added_macros), vec!["WARNING"]);
    }

    #[test]
    fn get_searches_all_maps() {
        let diff = MacroDifference::compute(
            &map(OBJECT, &[("OLD", "x")]),
            &MacroMap::new(),
            &CommandMacroMap::new(),
            &map(OBJECT, &[("NEW", "y")]),
        );
        assert_eq!(diff.get("OLD").map(Macro::value), Some("x"));
        assert_eq!(diff.get("NEW").map(Macro::value), Some("y"));
        assert!(diff.get("MISSING").is_none());
    }
}
