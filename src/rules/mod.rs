//! Rule language.
//!
//! Roles and grids carry small boolean expressions deciding whether a role
//! is recommended for an operation. They are compiled by a logos lexer and
//! a recursive descent parser into an [`Expr`] tree and interpreted against
//! a [`RuleContext`]. Only the predicates of [`Predicate`] exist; a rule can
//! neither loop nor touch the signature tree.
//!
//! ```text
//! isSingular("OBJECT") && !exists("SOURCE")
//! hasAttributes(role.name) || isPredicate('get');
//! ```

mod ast;
mod error;
mod eval;
mod lexer;
mod parser;

pub use ast::{Arg, Expr, Predicate, Rule};
pub use error::RuleError;
pub use eval::RuleContext;
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::MAX_DEPTH;

/// Compile rule text without evaluating it.
pub fn compile(text: &str) -> Result<Rule, RuleError> {
    let expr = parser::parse(text)?;
    Ok(Rule::new(text, expr))
}
