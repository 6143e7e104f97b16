//! Text output

use cfgtmpl_macro::{Macro, MacroDifference, MacroMap, ResolvedMacros};
use std::fmt::Write;

const MASK: &str = "********";

fn shown_value(macro_: &Macro) -> &str {
    if macro_.is_password() {
        MASK
    } else {
        macro_.value()
    }
}

fn push_line(out: &mut String, marker: char, macro_: &Macro, with_owner: bool) {
    let _ = write!(out, "{marker} {}={}", macro_.name(), shown_value(macro_));
    if with_owner {
        let _ = write!(out, " (from {})", macro_.owner_id());
    } else {
        let _ = write!(out, " (order {})", macro_.order());
    }
    if !macro_.description().is_empty() {
        let _ = write!(out, " # {}", macro_.description());
    }
    out.push('\n');
}

fn push_section(out: &mut String, title: &str, marker: char, macros: &MacroMap, with_owner: bool) {
    let _ = writeln!(out, "{title} ({})", macros.len());
    for macro_ in macros.values() {
        push_line(out, marker, macro_, with_owner);
    }
}

/// Direct then inherited macros, one per line; passwords masked
#[must_use]
pub fn render_resolved(resolved: &ResolvedMacros) -> String {
    let mut out = String::new();
    push_section(&mut out, "direct", '*', &resolved.direct, false);
    push_section(&mut out, "inherited", '^', &resolved.inherited, true);
    out
}

/// Writes in execution order (removed, updated, added), then unchanged
#[must_use]
pub fn render_difference(difference: &MacroDifference) -> String {
    let mut out = String::new();
    push_section(&mut out, "removed", '-', &difference.removed_macros, false);
    push_section(&mut out, "updated", '~', &difference.updated_macros, false);
    push_section(&mut out, "added", '+', &difference.added_macros, false);
    push_section(&mut out, "unchanged", '=', &difference.unchanged_macros, false);
    out
}
