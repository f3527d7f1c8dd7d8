//! Error types for the sigdoc core.

use thiserror::Error;

use crate::base::NodeIdx;
use crate::config::ConfigError;
use crate::rules::RuleError;

/// Errors raised by tree construction, rule evaluation and recommendation.
///
/// Reconciliation misses are not errors; they are reported through
/// [`MatchOutcome::Unmatched`](crate::structure::MatchOutcome).
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was empty or out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The node does not belong to the tree it was used with.
    #[error("Unknown signature element: {0}")]
    UnknownNode(NodeIdx),

    /// A child variant was placed under a parent variant that cannot own it.
    #[error("\"{child}\" is not assignable to \"{parent}\"")]
    IncompatibleParent {
        parent: &'static str,
        child: &'static str,
    },

    /// The id counter of a tree has no ids left.
    #[error("Element ids exhausted")]
    IdsExhausted,

    /// A thematic role has no role-based rule configured.
    #[error("No role-based rule found for role {role}")]
    MissingRoleBasedRule { role: String },

    /// A rule expression could not be compiled.
    #[error("Error evaluating rule \"{rule}\": {source}")]
    RuleEvaluation {
        rule: String,
        #[source]
        source: RuleError,
    },

    /// Catalog configuration could not be decoded or resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a missing role-based rule error.
    pub fn missing_role_based_rule(role: impl Into<String>) -> Self {
        Self::MissingRoleBasedRule { role: role.into() }
    }

    /// Create a rule evaluation error.
    pub fn rule_evaluation(rule: impl Into<String>, source: RuleError) -> Self {
        Self::RuleEvaluation {
            rule: rule.into(),
            source,
        }
    }

    /// True for errors that must abort a whole parse or recommend cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingRoleBasedRule { .. } | Self::IncompatibleParent { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
