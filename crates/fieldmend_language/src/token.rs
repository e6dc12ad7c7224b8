//! Tokens shared by the Logic and Query dialects.

use std::fmt;

use crate::span::Span;

/// A lexed token with its source span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Where it came from in the source.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Token kinds for both dialects.
///
/// `AND`, `OR`, `TRUE`, and `LIKE` are matched case-insensitively; every
/// other word (including dotted field paths) lexes as [`TokenKind::Word`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `AND` keyword.
    And,
    /// `OR` keyword.
    Or,
    /// `TRUE` keyword (the always-true logic constant).
    True,
    /// `LIKE` comparison keyword.
    Like,
    /// `=`
    Eq,
    /// `!=` or `<>`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// Numeric literal, kept verbatim (`12`, `3.5`).
    Number(String),
    /// Single-quoted string literal, unquoted content.
    Str(String),
    /// Identifier or dotted field path.
    Word(String),
    /// Lexical error; parsing surfaces it instead of panicking.
    Error(String),
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns true for the boolean connective keywords.
    #[must_use]
    pub const fn is_connective(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// Returns true for comparison operator tokens.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge | Self::Like
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::True => write!(f, "TRUE"),
            Self::Like => write!(f, "LIKE"),
            Self::Eq => write!(f, "="),
            Self::Ne => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
            Self::Number(text) | Self::Word(text) => write!(f, "{text}"),
            Self::Str(text) => write!(f, "'{text}'"),
            Self::Error(message) => write!(f, "<error: {message}>"),
            Self::Eof => write!(f, "<eof>"),
        }
    }
}
