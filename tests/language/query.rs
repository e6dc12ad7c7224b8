//! Integration tests for the Query dialect parser and renderer.

use fieldmend_language::{parse_query, render_query, CompareOp, QueryExpr, QueryValue};

#[test]
fn single_comparison() {
    let expr = parse_query("status__c = 'Open'").unwrap();
    let QueryExpr::Comparison(cmp) = &expr else {
        panic!("expected a comparison");
    };
    assert_eq!(cmp.path.to_string(), "status__c");
    assert_eq!(cmp.op, CompareOp::Eq);
    assert_eq!(cmp.value, QueryValue::Str("Open".into()));
}

#[test]
fn all_operators_parse() {
    for (source, op) in [
        ("a = 1", CompareOp::Eq),
        ("a != 1", CompareOp::Ne),
        ("a <> 1", CompareOp::Ne),
        ("a < 1", CompareOp::Lt),
        ("a <= 1", CompareOp::Le),
        ("a > 1", CompareOp::Gt),
        ("a >= 1", CompareOp::Ge),
        ("a LIKE '%x%'", CompareOp::Like),
    ] {
        let expr = parse_query(source).unwrap();
        let QueryExpr::Comparison(cmp) = expr else {
            panic!("expected a comparison for {source}");
        };
        assert_eq!(cmp.op, op, "{source}");
    }
}

#[test]
fn compound_clause_collects_paths_in_order() {
    let expr = parse_query("a__c = 1 AND (site__r.Name = 'HQ' OR b__c > 2)").unwrap();
    let paths: Vec<String> = expr.paths().iter().map(ToString::to_string).collect();
    assert_eq!(paths, vec!["a__c", "site__r.Name", "b__c"]);
}

#[test]
fn malformed_clauses_are_rejected() {
    assert!(parse_query("").is_err());
    assert!(parse_query("status__c =").is_err());
    assert!(parse_query("= 'Open'").is_err());
    assert!(parse_query("status__c 'Open'").is_err());
    assert!(parse_query("a = 1 AND").is_err());
    assert!(parse_query("(a = 1").is_err());
}

#[test]
fn rendering_round_trips() {
    for source in [
        "status__c = 'Open'",
        "a = 1 AND b = 2",
        "a = 1 AND (b = 2 OR c = 3)",
        "site__r.Name LIKE '%west%'",
    ] {
        let expr = parse_query(source).unwrap();
        let rendered = render_query(&expr);
        assert_eq!(parse_query(&rendered).unwrap(), expr, "{source}");
    }
}

#[test]
fn doubled_quotes_escape_inside_strings() {
    let expr = parse_query("name = 'O''Brien'").unwrap();
    let QueryExpr::Comparison(cmp) = &expr else {
        panic!("expected a comparison");
    };
    assert_eq!(cmp.value, QueryValue::Str("O'Brien".into()));
    assert_eq!(render_query(&expr), "name = 'O''Brien'");
}
