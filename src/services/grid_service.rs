//! Thematic grid lookup by verb.

use indexmap::IndexMap;
use tracing::debug;

use crate::core::text_utils::extract_verb;
use crate::structure::{RoleMap, ThematicGrid, ThematicRole, contains_role};

/// Grids registering the leading verb of `identifier`, in definition order.
///
/// Blank identifiers have no verb and match nothing.
pub fn find_matching_grids<'a>(identifier: &str, grids: &'a [ThematicGrid]) -> Vec<&'a ThematicGrid> {
    let Some(verb) = extract_verb(identifier) else {
        return Vec::new();
    };
    let matching: Vec<_> = grids.iter().filter(|grid| grid.has_verb(&verb)).collect();
    debug!("verb \"{verb}\" of {identifier} matches {} grid(s)", matching.len());
    matching
}

/// Role maps of every grid matching `identifier`, keyed by grid name.
///
/// A later grid with a name already present replaces the earlier one.
pub fn derive_thematic_grid(identifier: &str, grids: &[ThematicGrid]) -> IndexMap<String, RoleMap> {
    find_matching_grids(identifier, grids)
        .into_iter()
        .map(|grid| (grid.name.clone(), grid.roles.clone()))
        .collect()
}

/// Add the roles of `grids` to `existing_roles`, skipping names already
/// present.
pub fn collect_thematic_roles<'a>(
    grids: impl IntoIterator<Item = &'a ThematicGrid>,
    existing_roles: &mut Vec<ThematicRole>,
) {
    for grid in grids {
        for role in grid.roles.keys() {
            if !contains_role(existing_roles.iter(), role) {
                existing_roles.push(role.clone());
            }
        }
    }
}

pub fn find_thematic_grid_by_name<'a>(name: &str, grids: &'a [ThematicGrid]) -> Option<&'a ThematicGrid> {
    grids.iter().find(|grid| grid.name == name)
}
