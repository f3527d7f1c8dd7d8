//! Compiled form of a rule expression.

use std::fmt;

/// The predicates a rule may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Always true. `def()` is the name older rule sets use.
    Always,
    IsSingular,
    IsPlural,
    Exists,
    HasAttributes,
    IsPredicate,
}

impl Predicate {
    pub const ALL: [Predicate; 6] = [
        Predicate::Always,
        Predicate::IsSingular,
        Predicate::IsPlural,
        Predicate::Exists,
        Predicate::HasAttributes,
        Predicate::IsPredicate,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "always" | "def" => Some(Predicate::Always),
            "isSingular" => Some(Predicate::IsSingular),
            "isPlural" => Some(Predicate::IsPlural),
            "exists" => Some(Predicate::Exists),
            "hasAttributes" => Some(Predicate::HasAttributes),
            "isPredicate" => Some(Predicate::IsPredicate),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Predicate::Always => "always",
            Predicate::IsSingular => "isSingular",
            Predicate::IsPlural => "isPlural",
            Predicate::Exists => "exists",
            Predicate::HasAttributes => "hasAttributes",
            Predicate::IsPredicate => "isPredicate",
        }
    }

    /// Number of arguments the predicate takes.
    pub fn arity(self) -> usize {
        match self {
            Predicate::Always => 0,
            _ => 1,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Argument of a predicate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// A quoted string.
    Literal(String),
    /// `role` or `role.name`: the role under evaluation.
    Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Bool(bool),
    Call { predicate: Predicate, arg: Option<Arg> },
    Not(Box<Expr>),
    /// Conjunction of two or more operands, evaluated left to right.
    And(Vec<Expr>),
    /// Disjunction of two or more operands, evaluated left to right.
    Or(Vec<Expr>),
}

impl Expr {
    /// Predicates used anywhere in the expression, in source order.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        self.collect_predicates(&mut out);
        out
    }

    fn collect_predicates(&self, out: &mut Vec<Predicate>) {
        match self {
            Expr::Bool(_) => {}
            Expr::Call { predicate, .. } => out.push(*predicate),
            Expr::Not(inner) => inner.collect_predicates(out),
            Expr::And(operands) | Expr::Or(operands) => {
                for operand in operands {
                    operand.collect_predicates(out);
                }
            }
        }
    }
}

/// A compiled rule, ready for evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    source: String,
    expr: Expr,
}

impl Rule {
    pub(crate) fn new(source: impl Into<String>, expr: Expr) -> Self {
        Self {
            source: source.into(),
            expr,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}
