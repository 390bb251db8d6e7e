use docsel_parser::{normalize_guard, normalize_selector, parse_guard, parse_selector, Arg, ParseError, Value};

#[test]
fn test_scoped_selector_chain() {
    let selector = parse_selector(r#"under(heading("Intro")).match("TODO", occurrence=2).nth(1)"#).unwrap();
    let chain = &selector.call_chain;

    assert_eq!(chain.head.name, "under");
    let Some(Value::Call(scope)) = chain.head.positional(0) else {
        panic!("expected a nested call");
    };
    assert_eq!(scope.name, "heading");
    assert_eq!(scope.positional(0).and_then(Value::as_str), Some("Intro"));

    let names: Vec<&str> = chain.chain.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["match", "nth"]);
    assert_eq!(chain.chain[0].named("occurrence").and_then(Value::as_number), Some(2.0));
    assert!(matches!(chain.chain[0].args[1], Arg::Named { .. }));
}

#[test]
fn test_whitespace_and_newlines_are_insignificant() {
    let selector = parse_selector("betweenHeadings(\n  \"Start\",\n  \"End\"\n)\n  .paragraphs()").unwrap();
    assert_eq!(
        normalize_selector(&selector),
        r#"betweenHeadings("Start", "End").paragraphs()"#
    );
}

#[test]
fn test_guard_with_literals() {
    let guard = parse_guard(r#"any(false, not(expectRegex("a\\d+")), true)"#).unwrap();
    assert_eq!(normalize_guard(&guard), r#"any(false, not(expectRegex("a\\d+")), true)"#);
    assert_eq!(guard.call_chain.head.positional(0), Some(&Value::Bool(false)));
}

#[test]
fn test_string_escapes_follow_json() {
    let selector = parse_selector(r#"match("tab\there \"quoted\" é 😀 a\/b")"#).unwrap();
    assert_eq!(
        selector.call_chain.head.positional(0).and_then(Value::as_str),
        Some("tab\there \"quoted\" \u{e9} \u{1f600} a/b")
    );
}

#[test]
fn test_invalid_strings() {
    assert!(matches!(
        parse_selector(r#"match("open)"#),
        Err(ParseError::InvalidString { .. })
    ));
    assert!(matches!(
        parse_selector(r#"match("bad \q escape")"#),
        Err(ParseError::InvalidString { .. })
    ));
    assert!(matches!(
        parse_selector(r#"match("\ud83d alone")"#),
        Err(ParseError::InvalidString { .. })
    ));
}

#[test]
fn test_malformed_number_normalizes_to_zero() {
    let selector = parse_selector("blocks().nth(1.2.3)").unwrap();
    let value = selector.call_chain.chain[0].positional(0).and_then(Value::as_number);
    assert!(value.map_or(false, |n| !n.is_finite()));
    assert_eq!(normalize_selector(&selector), "blocks().nth(0)");
}

#[test]
fn test_structural_errors_carry_positions() {
    match parse_selector("heading(\"a\" \"b\")") {
        Err(ParseError::UnexpectedToken { pos, .. }) => assert_eq!(pos, 12),
        other => panic!("unexpected result {:?}", other),
    }
    assert!(matches!(parse_selector("heading("), Err(ParseError::UnexpectedEof { .. })));
    assert!(matches!(
        parse_selector("heading(\"a\") extra"),
        Err(ParseError::UnexpectedToken { .. })
    ));
    assert!(matches!(
        parse_selector("heading(#)"),
        Err(ParseError::UnexpectedCharacter { ch: '#', pos: 8 })
    ));
    assert!(parse_selector("").is_err());
}
