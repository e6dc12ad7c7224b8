//! Recursive-descent parsers for the Logic and Query dialects.
//!
//! `AND` binds tighter than `OR` in both dialects; parentheses group.

use fieldmend_foundation::{Error, FieldPath, Result};

use crate::ast::{CompareOp, Comparison, LogicExpr, QueryExpr, QueryValue};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Parses a Logic expression over filter positions.
///
/// Empty (or whitespace-only) input parses to [`LogicExpr::True`]: an
/// empty Logic column constrains nothing.
///
/// # Errors
/// Returns a parse error on malformed input.
pub fn parse_logic(source: &str) -> Result<LogicExpr> {
    if source.trim().is_empty() {
        return Ok(LogicExpr::True);
    }
    let mut parser = Parser::new(source);
    let expr = parser.logic_or()?;
    parser.expect_eof()?;
    Ok(expr)
}

/// Parses a Query clause over field paths.
///
/// # Errors
/// Returns a parse error on malformed or empty input; callers treat an
/// empty Query column as "no clause" before reaching the parser.
pub fn parse_query(source: &str) -> Result<QueryExpr> {
    let mut parser = Parser::new(source);
    let expr = parser.query_or()?;
    parser.expect_eof()?;
    Ok(expr)
}

/// Lookahead-one parser over the shared lexer.
struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self { lexer, current }
    }

    fn bump(&mut self) -> Token {
        std::mem::replace(&mut self.current, self.lexer.next_token())
    }

    fn error_here(&self, message: impl Into<String>) -> Error {
        Error::parse(message, self.current.span.start)
    }

    fn expect_eof(&self) -> Result<()> {
        if self.current.kind == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.error_here(format!("unexpected trailing input: {}", self.current.kind)))
        }
    }

    fn expect_rparen(&mut self) -> Result<()> {
        if self.current.kind == TokenKind::RParen {
            self.bump();
            Ok(())
        } else {
            Err(self.error_here("expected ')'"))
        }
    }

    // ----- Logic dialect ---------------------------------------------------

    fn logic_or(&mut self) -> Result<LogicExpr> {
        let mut left = self.logic_and()?;
        while self.current.kind == TokenKind::Or {
            self.bump();
            let right = self.logic_and()?;
            left = LogicExpr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn logic_and(&mut self) -> Result<LogicExpr> {
        let mut left = self.logic_primary()?;
        while self.current.kind == TokenKind::And {
            self.bump();
            let right = self.logic_primary()?;
            left = LogicExpr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn logic_primary(&mut self) -> Result<LogicExpr> {
        match &self.current.kind {
            TokenKind::Number(text) => {
                let position: u32 = text
                    .parse()
                    .map_err(|_| self.error_here(format!("invalid filter position '{text}'")))?;
                if position == 0 {
                    return Err(self.error_here("filter positions are 1-based"));
                }
                self.bump();
                Ok(LogicExpr::Term(position))
            }
            TokenKind::True => {
                self.bump();
                Ok(LogicExpr::True)
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.logic_or()?;
                self.expect_rparen()?;
                Ok(LogicExpr::Group(Box::new(inner)))
            }
            TokenKind::Error(message) => Err(self.error_here(message.clone())),
            other => Err(self.error_here(format!(
                "expected filter position or '(', found {other}"
            ))),
        }
    }

    // ----- Query dialect ---------------------------------------------------

    fn query_or(&mut self) -> Result<QueryExpr> {
        let mut left = self.query_and()?;
        while self.current.kind == TokenKind::Or {
            self.bump();
            let right = self.query_and()?;
            left = QueryExpr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn query_and(&mut self) -> Result<QueryExpr> {
        let mut left = self.query_primary()?;
        while self.current.kind == TokenKind::And {
            self.bump();
            let right = self.query_primary()?;
            left = QueryExpr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn query_primary(&mut self) -> Result<QueryExpr> {
        match &self.current.kind {
            TokenKind::LParen => {
                self.bump();
                let inner = self.query_or()?;
                self.expect_rparen()?;
                Ok(QueryExpr::Group(Box::new(inner)))
            }
            TokenKind::Word(_) => Ok(QueryExpr::Comparison(self.comparison()?)),
            TokenKind::Error(message) => Err(self.error_here(message.clone())),
            other => Err(self.error_here(format!(
                "expected field path or '(', found {other}"
            ))),
        }
    }

    fn comparison(&mut self) -> Result<Comparison> {
        let offset = self.current.span.start;
        let TokenKind::Word(text) = self.bump().kind else {
            return Err(Error::parse("expected field path", offset));
        };
        let path = FieldPath::parse(&text)?;

        let op = match self.current.kind {
            TokenKind::Eq => CompareOp::Eq,
            TokenKind::Ne => CompareOp::Ne,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::Le => CompareOp::Le,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::Ge => CompareOp::Ge,
            TokenKind::Like => CompareOp::Like,
            _ => {
                return Err(self.error_here(format!(
                    "expected comparison operator after {path}"
                )));
            }
        };
        self.bump();

        let value = match self.bump().kind {
            TokenKind::Str(text) => QueryValue::Str(text),
            TokenKind::Number(text) => QueryValue::Number(text),
            TokenKind::Word(text) => QueryValue::Word(text),
            TokenKind::True => QueryValue::Word("true".into()),
            other => {
                return Err(Error::parse(
                    format!("expected comparison value, found {other}"),
                    offset,
                ));
            }
        };

        Ok(Comparison { path, op, value })
    }
}
