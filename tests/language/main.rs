//! Integration tests for Layer 1: Language
//!
//! Lexing, parsing, and canonical rendering of the Logic and Query dialects.

mod lexer;
mod query;
