//! Recursive descent parser for rule expressions
//!
//! ```text
//! rule     := or_expr ';'? EOF
//! or_expr  := and_expr ('||' and_expr)*
//! and_expr := unary ('&&' unary)*
//! unary    := '!' unary | primary
//! primary  := 'true' | 'false' | call | '(' or_expr ')'
//! call     := IDENT '(' (arg (',' arg)*)? ')'
//! arg      := STRING | 'role' ('.' 'name')?
//! ```

use text_size::{TextRange, TextSize};

use super::ast::{Arg, Expr, Predicate};
use super::error::RuleError;
use super::lexer::{Lexer, Token, TokenKind};

/// Deepest nesting of `!` and parentheses accepted.
pub const MAX_DEPTH: usize = 64;

/// Parse a rule expression.
pub fn parse(input: &str) -> Result<Expr, RuleError> {
    let tokens: Vec<_> = Lexer::new(input)
        .filter(|token| !token.kind.is_trivia())
        .collect();
    let mut parser = Parser::new(&tokens, TextSize::of(input));
    parser.parse_rule()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    depth: usize,
    end: TextSize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], end: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            end,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    fn current_range(&self) -> TextRange {
        self.current()
            .map(Token::range)
            .unwrap_or_else(|| TextRange::empty(self.end))
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) -> Option<&'a Token<'a>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), RuleError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> RuleError {
        match self.current() {
            Some(token) => RuleError::new(
                format!("expected {expected}, found {}", token.kind.describe()),
                token.range(),
            ),
            None => RuleError::new(
                format!("expected {expected}, found end of rule"),
                TextRange::empty(self.end),
            ),
        }
    }

    fn enter(&mut self) -> Result<(), RuleError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(RuleError::new(
                format!("rule nests deeper than {MAX_DEPTH} levels"),
                self.current_range(),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    fn parse_rule(&mut self) -> Result<Expr, RuleError> {
        if self.tokens.is_empty() {
            return Err(RuleError::new("empty rule", TextRange::empty(self.end))
                .with_hint("use always() for a rule that always holds"));
        }
        let expr = self.parse_or()?;
        self.eat(TokenKind::SEMICOLON);
        if self.current().is_some() {
            return Err(self.unexpected("end of rule"));
        }
        Ok(expr)
    }

    // Operator chains stay flat so evaluation depth only grows with nesting.
    fn parse_or(&mut self) -> Result<Expr, RuleError> {
        let first = self.parse_and()?;
        if !self.at(TokenKind::PIPE_PIPE) {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.eat(TokenKind::PIPE_PIPE) {
            operands.push(self.parse_and()?);
        }
        Ok(Expr::Or(operands))
    }

    fn parse_and(&mut self) -> Result<Expr, RuleError> {
        let first = self.parse_unary()?;
        if !self.at(TokenKind::AMP_AMP) {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.eat(TokenKind::AMP_AMP) {
            operands.push(self.parse_unary()?);
        }
        Ok(Expr::And(operands))
    }

    fn parse_unary(&mut self) -> Result<Expr, RuleError> {
        if self.eat(TokenKind::BANG) {
            self.enter()?;
            let inner = self.parse_unary()?;
            self.leave();
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, RuleError> {
        match self.current_kind() {
            Some(TokenKind::TRUE_KW) => {
                self.pos += 1;
                Ok(Expr::Bool(true))
            }
            Some(TokenKind::FALSE_KW) => {
                self.pos += 1;
                Ok(Expr::Bool(false))
            }
            Some(TokenKind::L_PAREN) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.parse_or()?;
                self.leave();
                self.expect(TokenKind::R_PAREN)?;
                Ok(inner)
            }
            Some(TokenKind::IDENT) => self.parse_call(),
            _ => Err(self.unexpected("a predicate call, 'true', 'false' or '('")),
        }
    }

    fn parse_call(&mut self) -> Result<Expr, RuleError> {
        let name_range = self.current_range();
        let name = self.bump().map(|t| t.text).unwrap_or_default();
        let Some(predicate) = Predicate::from_name(name) else {
            let known: Vec<_> = Predicate::ALL.iter().map(|p| p.name()).collect();
            return Err(RuleError::new(format!("unknown predicate `{name}`"), name_range)
                .with_hint(format!("known predicates: {}", known.join(", "))));
        };

        self.expect(TokenKind::L_PAREN)?;
        let mut args = Vec::new();
        if !self.at(TokenKind::R_PAREN) {
            args.push(self.parse_arg()?);
            while self.eat(TokenKind::COMMA) {
                args.push(self.parse_arg()?);
            }
        }
        let close = self.current_range();
        self.expect(TokenKind::R_PAREN)?;

        if args.len() != predicate.arity() {
            return Err(RuleError::new(
                format!(
                    "`{predicate}` takes {} argument(s), {} given",
                    predicate.arity(),
                    args.len()
                ),
                name_range.cover(close),
            ));
        }

        Ok(Expr::Call {
            predicate,
            arg: args.pop(),
        })
    }

    fn parse_arg(&mut self) -> Result<Arg, RuleError> {
        match self.current_kind() {
            Some(TokenKind::STRING) => {
                let text = self.bump().map(|t| t.text).unwrap_or_default();
                Ok(Arg::Literal(unquote(text)))
            }
            Some(TokenKind::ROLE_KW) => {
                self.pos += 1;
                if self.eat(TokenKind::DOT) {
                    let range = self.current_range();
                    match self.bump() {
                        Some(token) if token.kind == TokenKind::IDENT && token.text == "name" => {}
                        _ => {
                            return Err(RuleError::new("expected `name` after `role.`", range));
                        }
                    }
                }
                Ok(Arg::Role)
            }
            Some(TokenKind::IDENT) => Err(self
                .unexpected("a string or `role`")
                .with_hint("role names must be quoted, e.g. \"OBJECT\"")),
            _ => Err(self.unexpected("a string or `role`")),
        }
    }
}

/// Strip the quotes of a string token and resolve its escapes.
fn unquote(text: &str) -> String {
    let inner = text
        .get(1..text.len().saturating_sub(1))
        .unwrap_or_default();
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
