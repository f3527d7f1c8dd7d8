//! Evaluation of compiled rules against a role context.

use crate::base::NodeIdx;
use crate::core::text_utils::extract_verb;
use crate::error::{Error, Result};
use crate::structure::{SignatureTree, ThematicRole, ThematicRoleContext};

use super::ast::{Arg, Expr, Predicate, Rule};

/// Everything a rule can observe: the role under evaluation, the verb of
/// the enclosing operation and the documented role occurrences around it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleContext {
    pub role: String,
    pub verb: Option<String>,
    pub contexts: Vec<ThematicRoleContext>,
}

impl RuleContext {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            ..Self::default()
        }
    }

    pub fn with_verb(mut self, verb: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self
    }

    pub fn with_context(mut self, context: ThematicRoleContext) -> Self {
        self.contexts.push(context);
        self
    }

    /// Context for evaluating `role` at `element`.
    ///
    /// Elements outside any operation see no role occurrences and no verb.
    pub fn for_element(tree: &SignatureTree, role: &ThematicRole, element: NodeIdx) -> Result<Self> {
        if tree.get(element).is_none() {
            return Err(Error::UnknownNode(element));
        }
        let Some(operation) = tree.find_operation_for_parameter(element) else {
            return Ok(Self::new(role.name.clone()));
        };
        let verb = tree
            .get(operation)
            .and_then(|op| extract_verb(&op.identifier));

        Ok(Self {
            role: role.name.clone(),
            verb,
            contexts: tree.thematic_role_contexts(operation),
        })
    }

    /// The same context, evaluated for another role.
    pub fn rebind(&self, role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            ..self.clone()
        }
    }

    fn occurrences<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a ThematicRoleContext> + 'a {
        self.contexts.iter().filter(move |context| context.role == role)
    }
}

impl Rule {
    /// Evaluate the rule. Evaluation never mutates anything.
    pub fn evaluate(&self, ctx: &RuleContext) -> bool {
        eval_expr(self.expr(), ctx)
    }
}

fn eval_expr(expr: &Expr, ctx: &RuleContext) -> bool {
    match expr {
        Expr::Bool(value) => *value,
        Expr::Not(inner) => !eval_expr(inner, ctx),
        Expr::And(operands) => operands.iter().all(|operand| eval_expr(operand, ctx)),
        Expr::Or(operands) => operands.iter().any(|operand| eval_expr(operand, ctx)),
        Expr::Call { predicate, arg } => {
            let arg = match arg {
                Some(Arg::Literal(text)) => text.as_str(),
                Some(Arg::Role) => ctx.role.as_str(),
                None => "",
            };
            eval_predicate(*predicate, arg, ctx)
        }
    }
}

fn eval_predicate(predicate: Predicate, arg: &str, ctx: &RuleContext) -> bool {
    match predicate {
        Predicate::Always => true,
        Predicate::IsSingular => !eval_predicate(Predicate::IsPlural, arg, ctx),
        Predicate::IsPlural => ctx.occurrences(arg).any(|c| c.numerus.is_plural()),
        Predicate::Exists => ctx.occurrences(arg).next().is_some(),
        Predicate::HasAttributes => ctx
            .occurrences(arg)
            .any(|c| c.has_public_accessible_attributes),
        Predicate::IsPredicate => ctx
            .verb
            .as_deref()
            .is_some_and(|verb| verb.to_lowercase() == arg.to_lowercase()),
    }
}
