//! Logos-based lexer for rule expressions.

use logos::Logos;
use text_size::{TextRange, TextSize};

/// Kind of a rule token.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    WHITESPACE,
    LINE_COMMENT,
    BLOCK_COMMENT,
    IDENT,
    STRING,
    TRUE_KW,
    FALSE_KW,
    ROLE_KW,
    L_PAREN,
    R_PAREN,
    COMMA,
    SEMICOLON,
    DOT,
    AMP_AMP,
    PIPE_PIPE,
    BANG,
    ERROR,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::WHITESPACE | TokenKind::LINE_COMMENT | TokenKind::BLOCK_COMMENT
        )
    }

    /// Human readable form used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::WHITESPACE => "whitespace",
            TokenKind::LINE_COMMENT | TokenKind::BLOCK_COMMENT => "comment",
            TokenKind::IDENT => "identifier",
            TokenKind::STRING => "string",
            TokenKind::TRUE_KW => "'true'",
            TokenKind::FALSE_KW => "'false'",
            TokenKind::ROLE_KW => "'role'",
            TokenKind::L_PAREN => "'('",
            TokenKind::R_PAREN => "')'",
            TokenKind::COMMA => "','",
            TokenKind::SEMICOLON => "';'",
            TokenKind::DOT => "'.'",
            TokenKind::AMP_AMP => "'&&'",
            TokenKind::PIPE_PIPE => "'||'",
            TokenKind::BANG => "'!'",
            TokenKind::ERROR => "invalid character",
        }
    }
}

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    // =========================================================================
    // KEYWORDS (must win over identifiers)
    // =========================================================================
    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("role")]
    Role,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    String,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("!")]
    Bang,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(".")]
    Dot,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => TokenKind::WHITESPACE,
            LineComment => TokenKind::LINE_COMMENT,
            BlockComment => TokenKind::BLOCK_COMMENT,
            True => TokenKind::TRUE_KW,
            False => TokenKind::FALSE_KW,
            Role => TokenKind::ROLE_KW,
            Ident => TokenKind::IDENT,
            String => TokenKind::STRING,
            AmpAmp => TokenKind::AMP_AMP,
            PipePipe => TokenKind::PIPE_PIPE,
            Bang => TokenKind::BANG,
            LParen => TokenKind::L_PAREN,
            RParen => TokenKind::R_PAREN,
            Comma => TokenKind::COMMA,
            Semicolon => TokenKind::SEMICOLON,
            Dot => TokenKind::DOT,
        }
    }
}
