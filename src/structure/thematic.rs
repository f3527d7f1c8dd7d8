//! Thematic roles, thematic grids and the recommendation result.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use super::element::Numerus;

/// Placement restriction of a thematic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoleScope {
    /// Usable on interfaces and operations.
    #[default]
    Both,
    /// Usable on operations and their parameters only.
    OperationLevel,
    /// Usable on interfaces only.
    InterfaceLevel,
}

/// A semantic tag such as AGENT, OBJECT or SOURCE.
///
/// Equality, ordering and hashing look at `name` only. Two roles with the
/// same name but different descriptions or rules are the same role for every
/// set and map in this crate.
#[derive(Debug, Clone, Default)]
pub struct ThematicRole {
    pub name: String,
    pub description: Option<String>,
    /// Rule deciding whether the role is recommended at all.
    pub role_based_rule: Option<String>,
    pub role_scope: RoleScope,
}

impl ThematicRole {
    /// Name of the placeholder role shown when no role applies.
    pub const EMPTY_ROLE_NAME: &'static str = "No Roles found";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.role_based_rule = Some(rule.into());
        self
    }

    pub fn with_scope(mut self, scope: RoleScope) -> Self {
        self.role_scope = scope;
        self
    }

    /// The role-based rule, if one is configured and not blank.
    pub fn rule(&self) -> Option<&str> {
        self.role_based_rule
            .as_deref()
            .filter(|rule| !rule.trim().is_empty())
    }
}

impl PartialEq for ThematicRole {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ThematicRole {}

impl Hash for ThematicRole {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for ThematicRole {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ThematicRole {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// Find a role by name, ignoring case.
pub fn find_role_by_name<'a>(
    name: &str,
    roles: impl IntoIterator<Item = &'a ThematicRole>,
) -> Option<&'a ThematicRole> {
    let wanted = name.to_lowercase();
    roles
        .into_iter()
        .find(|role| role.name.to_lowercase() == wanted)
}

/// Check whether `roles` contains a role with exactly the name of `role`.
pub fn contains_role<'a>(
    roles: impl IntoIterator<Item = &'a ThematicRole>,
    role: &ThematicRole,
) -> bool {
    roles.into_iter().any(|candidate| candidate.name == role.name)
}

/// Roles of a grid mapped to their mandatory flag.
pub type RoleMap = IndexMap<ThematicRole, bool>;

/// A named bundle of thematic roles associated with a set of verbs.
#[derive(Debug, Clone, Default)]
pub struct ThematicGrid {
    pub name: String,
    pub description: Option<String>,
    pub verbs: BTreeSet<String>,
    /// Roles of this grid; `true` marks a mandatory role.
    pub roles: RoleMap,
    pub reference_verb: Option<String>,
    /// Rule applied to every role of the grid.
    pub grid_based_rule: Option<String>,
    /// Per-role overrides of `grid_based_rule`, keyed by role name.
    pub grid_based_rules: IndexMap<String, String>,
}

impl ThematicGrid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_verbs<I, S>(mut self, verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.verbs.extend(verbs.into_iter().map(Into::into));
        self
    }

    pub fn with_role(mut self, role: ThematicRole, mandatory: bool) -> Self {
        self.roles.insert(role, mandatory);
        self
    }

    pub fn with_grid_rule(mut self, rule: impl Into<String>) -> Self {
        self.grid_based_rule = Some(rule.into());
        self
    }

    pub fn with_role_rule(mut self, role_name: impl Into<String>, rule: impl Into<String>) -> Self {
        self.grid_based_rules.insert(role_name.into(), rule.into());
        self
    }

    pub fn contains_role(&self, role: &ThematicRole) -> bool {
        self.roles.contains_key(role)
    }

    pub fn is_mandatory(&self, role: &ThematicRole) -> bool {
        self.roles.get(role).copied().unwrap_or(false)
    }

    pub fn has_verb(&self, verb: &str) -> bool {
        self.verbs.contains(verb)
    }

    /// The grid rule for a role: its per-role override, else the grid rule.
    /// Blank rules count as absent.
    pub fn rule_for(&self, role_name: &str) -> Option<&str> {
        self.grid_based_rules
            .get(role_name)
            .map(String::as_str)
            .filter(|rule| !rule.trim().is_empty())
            .or_else(|| {
                self.grid_based_rule
                    .as_deref()
                    .filter(|rule| !rule.trim().is_empty())
            })
    }
}

/// One documented occurrence of a role, as seen by the rule predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThematicRoleContext {
    /// Name of the role referenced by the documentation.
    pub role: String,
    /// Grammatical number of the documented element.
    pub numerus: Numerus,
    /// The documented element exposes public attributes or nested parameters.
    pub has_public_accessible_attributes: bool,
    /// The documentation sits on an interface rather than inside an operation.
    pub interface_level: bool,
    /// Leading verb of the enclosing operation.
    pub predicate: Option<String>,
}

/// Partition of candidate roles into recommended and optional ones.
///
/// Both lists are sorted by role name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolesRecommendations {
    first_level: Vec<ThematicRole>,
    second_level: Vec<ThematicRole>,
}

impl RolesRecommendations {
    pub fn new(first_level: Vec<ThematicRole>, second_level: Vec<ThematicRole>) -> Self {
        Self {
            first_level,
            second_level,
        }
    }

    /// Roles recommended for documentation.
    pub fn first_level(&self) -> &[ThematicRole] {
        &self.first_level
    }

    /// Roles that may be documented but need not be.
    pub fn second_level(&self) -> &[ThematicRole] {
        &self.second_level
    }

    pub fn is_recommended(&self, role_name: &str) -> bool {
        self.first_level.iter().any(|role| role.name == role_name)
    }

    pub fn is_optional(&self, role_name: &str) -> bool {
        self.second_level.iter().any(|role| role.name == role_name)
    }

    pub fn into_parts(self) -> (Vec<ThematicRole>, Vec<ThematicRole>) {
        (self.first_level, self.second_level)
    }
}
