//! Gathers the variable definitions a cheat needs.
//!
//! Definitions come from the cheat itself and from the definition sets it
//! imports, transitively. The first definition seen for a name among the
//! imports wins and local definitions always override imported ones.

use std::collections::{HashMap, HashSet};

use log::warn;

use crate::cheat_definitions::{Cheat, CheatIndex, VariableDefinition};
use crate::interpolation::find_variables;
use crate::session::VariableState;

enum Visit<'a> {
    /// Look at an import for the first time.
    Enter(&'a str),
    /// All nested imports of this set are done, merge its own vars.
    Merge(&'a str),
}

/// Build the name → definition lookup for a cheat.
pub fn collect_definitions(
    cheat: &Cheat,
    index: &CheatIndex,
) -> HashMap<String, VariableDefinition> {
    let mut definitions: HashMap<String, VariableDefinition> = HashMap::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut worklist: Vec<Visit> = cheat
        .imports
        .iter()
        .rev()
        .map(|import| Visit::Enter(import.as_str()))
        .collect();

    while let Some(visit) = worklist.pop() {
        match visit {
            Visit::Enter(name) => {
                if !seen.insert(name) {
                    continue;
                }

                let Some(module) = index.modules.get(name) else {
                    warn!("Import `{}` is not a known definition set, skipping", name);
                    continue;
                };

                worklist.push(Visit::Merge(name));
                worklist.extend(
                    module
                        .imports
                        .iter()
                        .rev()
                        .map(|import| Visit::Enter(import.as_str())),
                );
            }
            Visit::Merge(name) => {
                let Some(module) = index.modules.get(name) else {
                    continue;
                };

                for var in &module.vars {
                    definitions
                        .entry(var.name.clone())
                        .or_insert_with(|| var.clone());
                }
            }
        }
    }

    for var in &cheat.vars {
        definitions.insert(var.name.clone(), var.clone());
    }

    definitions
}

/// The variables still needed by `cheat`, in first-use order.
///
/// Variables without any definition get a free-text-only definition.
pub fn collect_variables(cheat: &Cheat, index: &CheatIndex) -> Vec<VariableState> {
    let mut definitions = collect_definitions(cheat, index);

    find_variables(&cheat.command, Some(&cheat.scope))
        .into_iter()
        .map(|name| {
            let definition = definitions
                .remove(&name)
                .unwrap_or_else(|| VariableDefinition::free_text(&name));
            VariableState::new(definition)
        })
        .collect()
}
