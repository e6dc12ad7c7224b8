//! Integration tests for the shared lexer.

use fieldmend_language::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn logic_tokens() {
    assert_eq!(
        kinds("1 AND (2 OR 3)"),
        vec![
            TokenKind::Number("1".into()),
            TokenKind::And,
            TokenKind::LParen,
            TokenKind::Number("2".into()),
            TokenKind::Or,
            TokenKind::Number("3".into()),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(
        kinds("1 and 2 oR 3"),
        kinds("1 AND 2 OR 3"),
    );
    assert_eq!(kinds("true"), vec![TokenKind::True, TokenKind::Eof]);
}

#[test]
fn dotted_paths_lex_as_single_words() {
    let tokens = kinds("site__r.owner__r.Name = 'Alice'");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Word("site__r.owner__r.Name".into()),
            TokenKind::Eq,
            TokenKind::Str("Alice".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comparison_operators() {
    let tokens = kinds("a = 1 b != 2 c <> 3 d <= 4 e >= 5 f LIKE 'x'");
    let operators: Vec<&TokenKind> = tokens
        .iter()
        .filter(|kind| kind.is_comparison())
        .collect();
    assert_eq!(
        operators,
        vec![
            &TokenKind::Eq,
            &TokenKind::Ne,
            &TokenKind::Ne,
            &TokenKind::Le,
            &TokenKind::Ge,
            &TokenKind::Like,
        ]
    );
}

#[test]
fn unterminated_string_is_an_error_token() {
    let tokens = kinds("a = 'open");
    assert!(tokens.iter().any(|kind| matches!(kind, TokenKind::Error(_))));
}

#[test]
fn multibyte_input_lexes_to_error_tokens() {
    // Non-ASCII characters are outside both dialects but must still be
    // consumed whole, one error token per character.
    let tokens = kinds("é");
    assert_eq!(tokens.len(), 2);
    assert!(matches!(tokens[0], TokenKind::Error(_)));
    assert_eq!(tokens[1], TokenKind::Eof);
}

#[test]
fn spans_cover_the_source() {
    let tokens = Lexer::tokenize_all("12 AND 3");
    assert_eq!(tokens[0].span.start, 0);
    assert_eq!(tokens[0].span.end, 2);
    assert_eq!(tokens[1].span.start, 3);
}
