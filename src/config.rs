//! Role catalog configuration.
//!
//! Persistence layers hand the core plain data: addressees, thematic roles
//! and thematic grids. [`Catalog`] is the resolved in-memory form the
//! services consume. With the `config` feature a catalog can also be read
//! from JSON or YAML text shaped like this:
//!
//! ```yaml
//! addressees:
//!   - name: Developer
//! roles:
//!   - name: OBJECT
//!     role_based_rule: isSingular("OBJECT")
//! grids:
//!   - name: Searching Operations
//!     verbs: [find, search]
//!     roles:
//!       OBJECT: true
//!     grid_based_rule: always()
//! ```
//!
//! The library never reads files itself.

use std::fmt;

use thiserror::Error;
use tracing::warn;

use crate::rules::{self, RuleError};
use crate::structure::{Addressee, RoleScope, ThematicGrid, ThematicRole, find_role_by_name};

/// Errors raised while decoding or resolving catalog configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML decoding error.
    #[error("YAML error: {0}")]
    Yaml(String),

    /// A grid lists a role that is not defined.
    #[error("Grid \"{grid}\" references unknown role \"{role}\"")]
    UnknownRole { grid: String, role: String },

    /// Two entries of the same kind share a name.
    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    /// A role scope value is not one of BOTH, OPERATION_LEVEL, INTERFACE_LEVEL.
    #[error("Unknown role scope: {0}")]
    UnknownScope(String),

    /// The operation needs a cargo feature that is disabled.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl ConfigError {
    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    /// Create a YAML error.
    pub fn yaml(message: impl Into<String>) -> Self {
        Self::Yaml(message.into())
    }

    /// Create a duplicate name error.
    pub fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }
}

/// What is wrong with a rule of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleProblem {
    /// The role has no role-based rule at all.
    MissingRoleBasedRule,
    /// The rule text does not compile.
    Invalid(RuleError),
}

/// A broken rule found by [`Catalog::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleIssue {
    /// `role OBJECT`, `grid Finder` or `grid Finder, role OBJECT`.
    pub owner: String,
    pub rule: Option<String>,
    pub problem: RuleProblem,
}

impl fmt::Display for RuleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            RuleProblem::MissingRoleBasedRule => {
                write!(f, "{}: no role-based rule", self.owner)
            }
            RuleProblem::Invalid(err) => write!(
                f,
                "{}: invalid rule \"{}\": {err}",
                self.owner,
                self.rule.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// The resolved role catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub addressees: Vec<Addressee>,
    pub roles: Vec<ThematicRole>,
    pub grids: Vec<ThematicGrid>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a role by name, ignoring case.
    pub fn role(&self, name: &str) -> Option<&ThematicRole> {
        find_role_by_name(name, &self.roles)
    }

    pub fn grid(&self, name: &str) -> Option<&ThematicGrid> {
        self.grids.iter().find(|grid| grid.name == name)
    }

    pub fn default_addressees(&self) -> impl Iterator<Item = &Addressee> {
        self.addressees.iter().filter(|addressee| addressee.is_default)
    }

    /// Every rule that would break a recommendation: roles without a
    /// role-based rule and rule texts that do not compile.
    pub fn validate(&self) -> Vec<RuleIssue> {
        let mut issues = Vec::new();

        for role in &self.roles {
            let owner = format!("role {}", role.name);
            match role.rule() {
                None => issues.push(RuleIssue {
                    owner,
                    rule: None,
                    problem: RuleProblem::MissingRoleBasedRule,
                }),
                Some(rule) => check_rule(owner, rule, &mut issues),
            }
        }

        for grid in &self.grids {
            if let Some(rule) = grid.grid_based_rule.as_deref().filter(|r| !r.trim().is_empty()) {
                check_rule(format!("grid {}", grid.name), rule, &mut issues);
            }
            for (role, rule) in &grid.grid_based_rules {
                if !rule.trim().is_empty() {
                    check_rule(format!("grid {}, role {role}", grid.name), rule, &mut issues);
                }
            }
        }

        for issue in &issues {
            warn!("{issue}");
        }
        issues
    }

    /// Decode and resolve a JSON catalog.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        #[cfg(feature = "config")]
        {
            CatalogConfig::from_json_str(input)?.resolve()
        }
        #[cfg(not(feature = "config"))]
        {
            let _ = input;
            Err(ConfigError::Unsupported(
                "JSON catalogs require the 'config' feature".to_string(),
            ))
        }
    }

    /// Decode and resolve a YAML catalog.
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        #[cfg(feature = "config")]
        {
            CatalogConfig::from_yaml_str(input)?.resolve()
        }
        #[cfg(not(feature = "config"))]
        {
            let _ = input;
            Err(ConfigError::Unsupported(
                "YAML catalogs require the 'config' feature".to_string(),
            ))
        }
    }
}

fn check_rule(owner: String, rule: &str, issues: &mut Vec<RuleIssue>) {
    if let Err(err) = rules::compile(rule) {
        issues.push(RuleIssue {
            owner,
            rule: Some(rule.to_string()),
            problem: RuleProblem::Invalid(err),
        });
    }
}

/// Parse a role scope as written in configuration files.
pub fn parse_role_scope(value: &str) -> Result<RoleScope, ConfigError> {
    match value.trim().to_ascii_uppercase().as_str() {
        "BOTH" => Ok(RoleScope::Both),
        "OPERATION_LEVEL" => Ok(RoleScope::OperationLevel),
        "INTERFACE_LEVEL" => Ok(RoleScope::InterfaceLevel),
        _ => Err(ConfigError::UnknownScope(value.to_string())),
    }
}

// ============================================================================
// SERDE DATA TYPES
// ============================================================================

#[cfg(feature = "config")]
pub use dto::{AddresseeConfig, CatalogConfig, GridConfig, RoleConfig};

#[cfg(feature = "config")]
mod dto {
    use indexmap::IndexMap;
    use rustc_hash::FxHashSet;
    use serde::{Deserialize, Serialize};

    use super::{Catalog, ConfigError, parse_role_scope};
    use crate::structure::{Addressee, ThematicGrid, ThematicRole};

    fn default_true() -> bool {
        true
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct CatalogConfig {
        #[serde(default)]
        pub addressees: Vec<AddresseeConfig>,
        #[serde(default)]
        pub roles: Vec<RoleConfig>,
        #[serde(default)]
        pub grids: Vec<GridConfig>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct AddresseeConfig {
        pub name: String,
        #[serde(default)]
        pub description: String,
        #[serde(default = "default_true")]
        pub is_default: bool,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct RoleConfig {
        pub name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub role_based_rule: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub scope: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct GridConfig {
        pub name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(default)]
        pub verbs: Vec<String>,
        /// Role name to mandatory flag.
        #[serde(default)]
        pub roles: IndexMap<String, bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub reference_verb: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub grid_based_rule: Option<String>,
        #[serde(default)]
        pub grid_based_rules: IndexMap<String, String>,
    }

    impl CatalogConfig {
        pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
            serde_json::from_str(input).map_err(|e| ConfigError::json(e.to_string()))
        }

        pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
            serde_yaml::from_str(input).map_err(|e| ConfigError::yaml(e.to_string()))
        }

        pub fn to_json_string(&self) -> Result<String, ConfigError> {
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::json(e.to_string()))
        }

        pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
            serde_yaml::to_string(self).map_err(|e| ConfigError::yaml(e.to_string()))
        }

        /// Resolve role references of the grids and build the catalog.
        ///
        /// Grid roles are matched by exact role name.
        pub fn resolve(&self) -> Result<Catalog, ConfigError> {
            let mut addressees = Vec::with_capacity(self.addressees.len());
            let mut names = FxHashSet::default();
            for config in &self.addressees {
                if !names.insert(config.name.as_str()) {
                    return Err(ConfigError::duplicate("addressee", &config.name));
                }
                let mut addressee =
                    Addressee::new(config.name.clone()).with_description(config.description.clone());
                addressee.is_default = config.is_default;
                addressees.push(addressee);
            }

            let mut roles = Vec::with_capacity(self.roles.len());
            names.clear();
            for config in &self.roles {
                if !names.insert(config.name.as_str()) {
                    return Err(ConfigError::duplicate("role", &config.name));
                }
                let scope = match &config.scope {
                    Some(scope) => parse_role_scope(scope)?,
                    None => Default::default(),
                };
                roles.push(ThematicRole {
                    name: config.name.clone(),
                    description: config.description.clone(),
                    role_based_rule: config.role_based_rule.clone(),
                    role_scope: scope,
                });
            }

            let mut grids = Vec::with_capacity(self.grids.len());
            names.clear();
            for config in &self.grids {
                if !names.insert(config.name.as_str()) {
                    return Err(ConfigError::duplicate("grid", &config.name));
                }
                let mut grid = ThematicGrid::new(config.name.clone()).with_verbs(config.verbs.iter().cloned());
                grid.description = config.description.clone();
                grid.reference_verb = config.reference_verb.clone();
                grid.grid_based_rule = config.grid_based_rule.clone();
                grid.grid_based_rules = config.grid_based_rules.clone();
                for (role_name, mandatory) in &config.roles {
                    let role = roles
                        .iter()
                        .find(|role| &role.name == role_name)
                        .ok_or_else(|| ConfigError::UnknownRole {
                            grid: config.name.clone(),
                            role: role_name.clone(),
                        })?;
                    grid.roles.insert(role.clone(), *mandatory);
                }
                grids.push(grid);
            }

            Ok(Catalog {
                addressees,
                roles,
                grids,
            })
        }
    }

    impl From<&Catalog> for CatalogConfig {
        fn from(catalog: &Catalog) -> Self {
            Self {
                addressees: catalog
                    .addressees
                    .iter()
                    .map(|a| AddresseeConfig {
                        name: a.name.clone(),
                        description: a.description.clone(),
                        is_default: a.is_default,
                    })
                    .collect(),
                roles: catalog
                    .roles
                    .iter()
                    .map(|r| RoleConfig {
                        name: r.name.clone(),
                        description: r.description.clone(),
                        role_based_rule: r.role_based_rule.clone(),
                        scope: Some(
                            match r.role_scope {
                                crate::structure::RoleScope::Both => "BOTH",
                                crate::structure::RoleScope::OperationLevel => "OPERATION_LEVEL",
                                crate::structure::RoleScope::InterfaceLevel => "INTERFACE_LEVEL",
                            }
                            .to_string(),
                        ),
                    })
                    .collect(),
                grids: catalog
                    .grids
                    .iter()
                    .map(|g| GridConfig {
                        name: g.name.clone(),
                        description: g.description.clone(),
                        verbs: g.verbs.iter().cloned().collect(),
                        roles: g
                            .roles
                            .iter()
                            .map(|(role, mandatory)| (role.name.clone(), *mandatory))
                            .collect(),
                        reference_verb: g.reference_verb.clone(),
                        grid_based_rule: g.grid_based_rule.clone(),
                        grid_based_rules: g.grid_based_rules.clone(),
                    })
                    .collect(),
            }
        }
    }
}
