//! Rule evaluation and role recommendation.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use tracing::{debug, error, info, trace};

use crate::base::NodeIdx;
use crate::error::{Error, Result};
use crate::rules::{self, Rule, RuleContext};
use crate::structure::{RolesRecommendations, SignatureTree, ThematicGrid, ThematicRole};

/// Evaluate `expression` for `role` at `element`.
///
/// Fails with [`Error::InvalidArgument`] for a blank expression or a node
/// outside `tree`, and with [`Error::RuleEvaluation`] if the expression
/// does not compile.
pub fn evaluate_rule(
    expression: &str,
    role: &ThematicRole,
    tree: &SignatureTree,
    element: NodeIdx,
) -> Result<bool> {
    if expression.trim().is_empty() {
        return Err(Error::invalid_argument("the rule expression must not be empty"));
    }
    if tree.get(element).is_none() {
        return Err(Error::invalid_argument(format!(
            "{element} is not part of the signature tree"
        )));
    }

    let rule = rules::compile(expression).map_err(|source| {
        error!("Error evaluating rule \"{expression}\": {source}");
        Error::rule_evaluation(expression, source)
    })?;
    let ctx = RuleContext::for_element(tree, role, element)?;
    Ok(rule.evaluate(&ctx))
}

/// Check that `expression` compiles. Nothing is evaluated.
pub fn is_rule_valid(expression: &str) -> bool {
    match rules::compile(expression) {
        Ok(_) => true,
        Err(err) => {
            info!("invalid rule \"{expression}\": {err}");
            false
        }
    }
}

/// Compiled rules of one derivation, keyed by their text.
#[derive(Default)]
struct RuleCache {
    rules: FxHashMap<String, Rule>,
}

impl RuleCache {
    fn evaluate(&mut self, expression: &str, ctx: &RuleContext) -> Result<bool> {
        if let Some(rule) = self.rules.get(expression) {
            return Ok(rule.evaluate(ctx));
        }
        let rule = rules::compile(expression).map_err(|source| {
            error!("Error evaluating rule \"{expression}\": {source}");
            Error::rule_evaluation(expression, source)
        })?;
        let result = rule.evaluate(ctx);
        self.rules.insert(expression.to_string(), rule);
        Ok(result)
    }
}

/// Partition the roles of `matching_grids` into recommended and optional
/// ones for `element`.
///
/// Every role is first judged by its own role-based rule. Recommended
/// roles are then checked against the unambiguous grid: the only grid if
/// there is one, else the grid named by the operation's pinned thematic
/// grid. A role that grid does not list, or whose grid rule is false, is
/// demoted to optional. Without an unambiguous grid nothing is demoted.
///
/// A role without a role-based rule fails the whole derivation with
/// [`Error::MissingRoleBasedRule`].
pub fn derive_roles_recommendation<'a, I>(
    matching_grids: I,
    tree: &SignatureTree,
    element: NodeIdx,
) -> Result<RolesRecommendations>
where
    I: IntoIterator<Item = &'a ThematicGrid>,
{
    let grids: Vec<&ThematicGrid> = matching_grids.into_iter().collect();
    if tree.get(element).is_none() {
        return Err(Error::invalid_argument(format!(
            "{element} is not part of the signature tree"
        )));
    }

    let base = RuleContext::for_element(tree, &ThematicRole::default(), element)?;
    let mut cache = RuleCache::default();
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut recommended: BTreeSet<ThematicRole> = BTreeSet::new();
    let mut optional: BTreeSet<ThematicRole> = BTreeSet::new();

    // role-based phase
    for grid in &grids {
        for role in grid.roles.keys() {
            if !seen.insert(role.name.as_str()) {
                continue;
            }
            let Some(rule) = role.rule() else {
                error!("No role-based rule found for role {}", role.name);
                return Err(Error::missing_role_based_rule(&role.name));
            };
            let ctx = base.rebind(role.name.as_str());
            let result = cache.evaluate(rule, &ctx)?;
            trace!("role-based rule of {}: {result}", role.name);
            if result {
                recommended.insert(role.clone());
            } else {
                optional.insert(role.clone());
            }
        }
    }

    // grid-based phase
    let operation = tree.find_operation_for_parameter(element);
    let pinned = operation
        .and_then(|op| tree.get(op))
        .and_then(|op| op.thematic_grid_name());
    let unambiguous = match grids.as_slice() {
        [only] => Some(*only),
        _ => pinned.and_then(|name| grids.iter().copied().find(|grid| grid.name == name)),
    };

    if let Some(grid) = unambiguous {
        debug!("applying grid-based rules of grid {}", grid.name);
        let candidates: Vec<ThematicRole> = recommended.iter().cloned().collect();
        for role in candidates {
            let keep = if !grid.contains_role(&role) {
                false
            } else if let Some(rule) = grid.rule_for(&role.name) {
                let ctx = base.rebind(role.name.as_str());
                cache.evaluate(rule, &ctx)?
            } else {
                true
            };
            trace!("grid-based rule of {} in {}: {keep}", role.name, grid.name);
            if !keep {
                recommended.remove(&role);
                optional.insert(role);
            }
        }
    }

    Ok(RolesRecommendations::new(
        recommended.into_iter().collect(),
        optional.into_iter().collect(),
    ))
}
