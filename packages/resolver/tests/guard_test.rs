use docsel_model::fixtures::DocBuilder;
use docsel_model::DocumentModel;
use docsel_resolver::{resolve_str, ResolveError, ResolveOptions, ResolvedTarget};

fn doc() -> DocumentModel {
    DocBuilder::new()
        .revision("rev-7")
        .heading("Install", 2)
        .para("Run npm install")
        .para_with_image("Logo ", " here")
        .table(1, 1)
        .heading("Usage", 2)
        .para("Run npm start")
        .build()
}

fn check(selector: &str, guard: &str) -> Result<ResolvedTarget, ResolveError> {
    resolve_str(&doc(), selector, Some(guard), ResolveOptions::default())
}

fn failed_guard(result: Result<ResolvedTarget, ResolveError>) -> String {
    match result {
        Err(ResolveError::ExpectationFailed { guard }) => guard,
        other => panic!("expected a failed expectation, got {:?}", other),
    }
}

fn is_unsupported(result: Result<ResolvedTarget, ResolveError>) -> bool {
    matches!(result, Err(ResolveError::UnsupportedSelection { .. }))
}

#[test]
fn test_if_revision_matches() {
    assert!(check(r#"heading("Install")"#, r#"ifRevision("rev-7")"#).is_ok());
}

#[test]
fn test_if_revision_mismatch_raises() {
    match check(r#"heading("Install")"#, r#"ifRevision("rev-1")"#) {
        Err(ResolveError::RevisionMismatch { expected, actual }) => {
            assert_eq!(expected, "rev-1");
            assert_eq!(actual, "rev-7");
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_not_if_revision_fails_hard_on_mismatch() {
    let result = check(r#"heading("Install")"#, r#"not(ifRevision("rev-1"))"#);
    assert!(matches!(result, Err(ResolveError::RevisionMismatch { .. })));
}

#[test]
fn test_not_if_revision_on_match_is_false() {
    let result = check(r#"heading("Install")"#, r#"not(ifRevision("rev-7"))"#);
    assert_eq!(failed_guard(result), "not");
}

#[test]
fn test_combinators_short_circuit() {
    assert!(check(r#"heading("Install")"#, r#"any(true, ifRevision("rev-1"))"#).is_ok());
    assert!(matches!(
        check(r#"heading("Install")"#, r#"any(false, ifRevision("rev-1"))"#),
        Err(ResolveError::RevisionMismatch { .. })
    ));
    assert_eq!(
        failed_guard(check(r#"heading("Install")"#, r#"all(false, ifRevision("rev-1"))"#)),
        "all"
    );
    assert!(check(r#"heading("Install")"#, "all(true, true)").is_ok());
    assert!(check(r#"heading("Install")"#, "all()").is_ok());
    assert_eq!(failed_guard(check(r#"heading("Install")"#, "any()")), "any");
}

#[test]
fn test_document_text_expectations() {
    assert!(check(r#"heading("Install")"#, r#"expectContains("npm install\nLogo")"#).is_ok());
    assert_eq!(
        failed_guard(check(r#"heading("Install")"#, r#"expectNotContains("npm start")"#)),
        "expectNotContains"
    );
    assert!(check(r#"heading("Install")"#, r#"expectRegex("npm (run|start)")"#).is_ok());
    assert!(matches!(
        check(r#"heading("Install")"#, r#"expectRegex("[")"#),
        Err(ResolveError::InvalidPattern { .. })
    ));
}

#[test]
fn test_range_text_equals_requires_text_range() {
    assert!(check(r#"match("npm start")"#, r#"expectRangeTextEquals("npm start")"#).is_ok());
    assert_eq!(
        failed_guard(check(r#"match("npm start")"#, r#"expectRangeTextEquals("npm")"#)),
        "expectRangeTextEquals"
    );
    assert!(is_unsupported(check(r#"heading("Usage")"#, r#"expectRangeTextEquals("Usage")"#)));
}

#[test]
fn test_atomic_checks_on_text_range_are_asymmetric() {
    // no blocks are gathered for a text range, so this holds vacuously
    assert!(check(r#"match("Logo")"#, "expectHasNoAtomicObjects()").is_ok());
    // the owning paragraph holds an inline image
    assert_eq!(
        failed_guard(check(r#"match("Logo")"#, "expectHasNoInlineAtomic()")),
        "expectHasNoInlineAtomic"
    );
    assert!(check(r#"match("Run npm install")"#, "expectHasNoInlineAtomic()").is_ok());
}

#[test]
fn test_atomic_checks_on_block_range() {
    let range = r#"betweenHeadings("Install", "Usage")"#;
    assert_eq!(failed_guard(check(range, "expectHasNoAtomicObjects()")), "expectHasNoAtomicObjects");
    assert_eq!(failed_guard(check(range, "expectHasNoInlineAtomic()")), "expectHasNoInlineAtomic");
    assert!(check(r#"heading("Usage")"#, "all(expectHasNoAtomicObjects(), expectHasNoInlineAtomic())").is_ok());
}

#[test]
fn test_next_heading_follows_last_member() {
    assert!(check(r#"heading("Install")"#, r#"expectNextHeadingIs("Usage")"#).is_ok());
    assert!(check(r#"betweenHeadings("Install", "Usage")"#, r#"expectNextHeadingIs("Usage")"#).is_ok());
    assert_eq!(
        failed_guard(check(r#"heading("Usage")"#, r#"expectNextHeadingIs("Install")"#)),
        "expectNextHeadingIs"
    );
}

#[test]
fn test_heading_level_uses_own_or_nearest_ancestor() {
    assert!(check(r#"heading("Install")"#, "expectHeadingLevelIs(2)").is_ok());
    assert!(check(r#"match("npm install")"#, "expectHeadingLevelIs(2)").is_ok());
    assert_eq!(
        failed_guard(check(r#"match("npm install")"#, "expectHeadingLevelIs(1)")),
        "expectHeadingLevelIs"
    );
}

#[test]
fn test_malformed_guards_are_unsupported() {
    let selector = r#"heading("Install")"#;
    assert!(is_unsupported(check(selector, r#"expectContains("npm").not()"#)));
    assert!(is_unsupported(check(selector, "all(flag=true)")));
    assert!(is_unsupported(check(selector, "not(true, false)")));
    assert!(is_unsupported(check(selector, r#"all("yes")"#)));
    assert!(is_unsupported(check(selector, "expectSomething()")));
    assert!(is_unsupported(check(selector, "expectHeadingLevelIs(\"2\")")));
}
