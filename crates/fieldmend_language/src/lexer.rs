//! Lexer shared by the Logic and Query dialects.
//!
//! The lexer never fails: malformed input produces [`TokenKind::Error`]
//! tokens and the parser turns those into proper errors.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Tokenizer over a source string.
pub struct Lexer<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in the original source.
    position: usize,
}

/// Returns true for bytes that may start a word.
const fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Returns true for bytes that continue a word (dotted paths included).
const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}

impl<'src> Lexer<'src> {
    /// Creates a lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            position: 0,
        }
    }

    /// Returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let Some(b) = self.peek() else {
            return Token::new(TokenKind::Eof, Span::new(start, start));
        };

        let kind = match b {
            b'(' => {
                self.advance(1);
                TokenKind::LParen
            }
            b')' => {
                self.advance(1);
                TokenKind::RParen
            }
            b'=' => {
                self.advance(1);
                TokenKind::Eq
            }
            b'!' => {
                self.advance(1);
                if self.peek() == Some(b'=') {
                    self.advance(1);
                    TokenKind::Ne
                } else {
                    TokenKind::Error("expected '=' after '!'".into())
                }
            }
            b'<' => {
                self.advance(1);
                match self.peek() {
                    Some(b'=') => {
                        self.advance(1);
                        TokenKind::Le
                    }
                    Some(b'>') => {
                        self.advance(1);
                        TokenKind::Ne
                    }
                    _ => TokenKind::Lt,
                }
            }
            b'>' => {
                self.advance(1);
                if self.peek() == Some(b'=') {
                    self.advance(1);
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            b'\'' => self.scan_string(),
            b if b.is_ascii_digit() => self.scan_number(),
            b if is_word_start(b) => self.scan_word(),
            _ => {
                // Multi-byte characters must be skipped whole.
                let c = self.rest.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                self.advance(c.len_utf8());
                TokenKind::Error(format!("unexpected character: {c}"))
            }
        };

        Token::new(kind, Span::new(start, self.position))
    }

    /// Tokenizes the whole source, including the trailing EOF token.
    #[must_use]
    pub fn tokenize_all(source: &'src str) -> Vec<Token> {
        let mut lexer = Self::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    fn peek(&self) -> Option<u8> {
        self.rest.bytes().next()
    }

    fn advance(&mut self, n: usize) {
        self.rest = &self.rest[n..];
        self.position += n;
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.advance(1);
            } else {
                break;
            }
        }
    }

    /// Scans a single-quoted string literal. A doubled quote (`''`)
    /// escapes a literal quote.
    fn scan_string(&mut self) -> TokenKind {
        self.advance(1); // opening quote
        let mut text = String::new();
        loop {
            match self.peek() {
                None => return TokenKind::Error("unterminated string literal".into()),
                Some(b'\'') => {
                    self.advance(1);
                    if self.peek() == Some(b'\'') {
                        text.push('\'');
                        self.advance(1);
                    } else {
                        return TokenKind::Str(text);
                    }
                }
                Some(b) => {
                    // Strings are treated as opaque bytes; the dialects
                    // never inspect their contents.
                    let c = self.rest.chars().next().unwrap_or(b as char);
                    text.push(c);
                    self.advance(c.len_utf8());
                }
            }
        }
    }

    /// Scans a numeric literal: digits with at most one interior dot.
    fn scan_number(&mut self) -> TokenKind {
        let mut text = String::new();
        let mut seen_dot = false;
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                text.push(b as char);
                self.advance(1);
            } else if b == b'.' && !seen_dot && self.second_is_digit() {
                seen_dot = true;
                text.push('.');
                self.advance(1);
            } else {
                break;
            }
        }
        TokenKind::Number(text)
    }

    fn second_is_digit(&self) -> bool {
        self.rest.as_bytes().get(1).is_some_and(u8::is_ascii_digit)
    }

    /// Scans a word (identifier or dotted path), classifying keywords.
    fn scan_word(&mut self) -> TokenKind {
        let mut len = 0;
        for b in self.rest.bytes() {
            if is_word_byte(b) {
                len += 1;
            } else {
                break;
            }
        }
        let text = &self.rest[..len];
        self.advance(len);

        if text.eq_ignore_ascii_case("AND") {
            TokenKind::And
        } else if text.eq_ignore_ascii_case("OR") {
            TokenKind::Or
        } else if text.eq_ignore_ascii_case("TRUE") {
            TokenKind::True
        } else if text.eq_ignore_ascii_case("LIKE") {
            TokenKind::Like
        } else {
            TokenKind::Word(text.to_string())
        }
    }
}
