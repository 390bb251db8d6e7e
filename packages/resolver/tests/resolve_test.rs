use docsel_model::fixtures::DocBuilder;
use docsel_model::DocumentModel;
use docsel_resolver::{resolve_str, ResolveError, ResolveOptions, ResolvedTarget, TargetKind, TargetSelection};
use serde_json::json;

/// node-1  H1 Guide
/// node-2  P  Welcome to the guide
/// node-3  H2 Install
/// node-4  P  Run npm install
/// node-5  P  npm run build (code)
/// node-6  table 2x2
/// node-7  H2 Usage
/// node-8  P  Run npm start
/// node-9  P  See <image> below
/// node-10 horizontal rule
/// node-11 embed "Chart image"
/// node-12 H1 Appendix
/// node-13 P  The end
fn guide() -> DocumentModel {
    DocBuilder::new()
        .heading("Guide", 1)
        .para("Welcome to the guide")
        .heading("Install", 2)
        .para("Run npm install")
        .code("npm run build")
        .table(2, 2)
        .heading("Usage", 2)
        .para("Run npm start")
        .para_with_image("See ", " below")
        .horizontal_rule()
        .embed("Chart image")
        .heading("Appendix", 1)
        .para("The end")
        .build()
}

fn resolve(model: &DocumentModel, selector: &str) -> Result<ResolvedTarget, ResolveError> {
    resolve_str(model, selector, None, ResolveOptions::default())
}

fn resolve_ambiguous(model: &DocumentModel, selector: &str) -> Result<ResolvedTarget, ResolveError> {
    resolve_str(model, selector, None, ResolveOptions { allow_ambiguous: true })
}

fn block_id(target: &ResolvedTarget) -> &str {
    match &target.selection {
        TargetSelection::Block { block } => &block.node_id,
        other => panic!("expected block target, got {:?}", other),
    }
}

fn range_ids(target: &ResolvedTarget) -> Vec<&str> {
    match &target.selection {
        TargetSelection::BlockRange { blocks } => blocks.iter().map(|b| b.node_id.as_str()).collect(),
        other => panic!("expected block range, got {:?}", other),
    }
}

fn text_range(target: &ResolvedTarget) -> (&str, usize, usize) {
    match &target.selection {
        TargetSelection::TextRange {
            paragraph,
            start_offset,
            end_offset,
        } => (&paragraph.node_id, *start_offset, *end_offset),
        other => panic!("expected text range, got {:?}", other),
    }
}

fn ambiguous_count(err: ResolveError) -> usize {
    match err {
        ResolveError::AmbiguousMatch { count, hints } => {
            assert_eq!(hints.len(), 2);
            count
        }
        other => panic!("expected ambiguous match, got {:?}", other),
    }
}

#[test]
fn test_end_to_end_heading_and_match() {
    let model = DocumentModel::from_value(json!({
        "documentId": "doc",
        "revisionId": "r1",
        "body": { "content": [
            {
                "startIndex": 1,
                "endIndex": 7,
                "paragraph": {
                    "elements": [{ "startIndex": 1, "endIndex": 7, "textRun": { "content": "Title\n" } }],
                    "paragraphStyle": { "namedStyleType": "HEADING_1" }
                }
            },
            {
                "startIndex": 8,
                "endIndex": 22,
                "paragraph": {
                    "elements": [{ "startIndex": 8, "endIndex": 22, "textRun": { "content": "Hello world\n" } }]
                }
            }
        ] }
    }))
    .unwrap();

    let heading = resolve(&model, r#"heading("Title")"#).unwrap();
    assert_eq!(heading.kind(), TargetKind::Block);
    assert_eq!(block_id(&heading), "node-1");

    let hello = resolve(&model, r#"match("Hello", occurrence=1)"#).unwrap();
    let (paragraph_id, start, end) = text_range(&hello);
    assert_eq!((paragraph_id, start, end), ("node-2", 0, 5));
    let paragraph = model.block("node-2").unwrap();
    assert_eq!(paragraph.map_offset_to_index(start).unwrap(), 8);
    assert_eq!(paragraph.map_offset_to_index(end).unwrap(), 13);
    assert_eq!(hello.context.snippet, "Hello");
    assert_eq!(hello.context.heading_path, vec!["Title"]);
}

#[test]
fn test_same_literal_twice_is_ambiguous() {
    let model = DocBuilder::new().para("echo").para("echo").build();
    let err = resolve(&model, r#"match("echo")"#).unwrap_err();
    assert_eq!(ambiguous_count(err), 2);
}

#[test]
fn test_heading_lookup_is_normalized_and_level_filtered() {
    let model = guide();
    assert_eq!(block_id(&resolve(&model, r#"heading("  INSTALL ")"#).unwrap()), "node-3");
    assert_eq!(block_id(&resolve(&model, r#"heading("Install", level=2)"#).unwrap()), "node-3");
    assert!(matches!(
        resolve(&model, r#"heading("Install", level=1)"#),
        Err(ResolveError::NoMatch { .. })
    ));
}

#[test]
fn test_under_heading_excludes_heading_itself() {
    let model = guide();
    let err = resolve(&model, r#"under(heading("Install"))"#).unwrap_err();
    assert_eq!(ambiguous_count(err), 3);

    let table = resolve(&model, r#"under(heading("Install")).nth(3)"#).unwrap();
    assert_eq!(block_id(&table), "node-6");
    assert_eq!(table.context.conflicts, vec!["atomic:node-6"]);
    assert_eq!(table.context.snippet, "table");

    let nested = resolve(&model, r#"under(in=heading("Guide")).nth(1)"#).unwrap();
    assert_eq!(block_id(&nested), "node-2");
}

#[test]
fn test_under_requires_selector_argument() {
    let model = guide();
    assert!(matches!(
        resolve(&model, r#"under("Install")"#),
        Err(ResolveError::UnsupportedSelection { .. })
    ));
}

#[test]
fn test_between_headings_is_exclusive() {
    let model = guide();
    let range = resolve(&model, r#"betweenHeadings("Install", "Usage")"#).unwrap();
    assert_eq!(range.kind(), TargetKind::BlockRange);
    assert_eq!(range_ids(&range), vec!["node-4", "node-5", "node-6"]);
    assert_eq!(range.context.heading_path, vec!["Guide", "Install"]);
    assert_eq!(range.context.snippet, "Run npm install");
    assert_eq!(range.context.conflicts, vec!["atomic:node-6"]);
}

#[test]
fn test_between_headings_without_later_bound_has_no_match() {
    let model = guide();
    assert!(matches!(
        resolve(&model, r#"betweenHeadings("Appendix", "Install")"#),
        Err(ResolveError::NoMatch { .. })
    ));
}

#[test]
fn test_section_with_selector_bounds() {
    let model = guide();
    let range = resolve(&model, r#"section(from=heading("Usage"), to=heading("Appendix"))"#).unwrap();
    assert_eq!(range_ids(&range), vec!["node-8", "node-9", "node-10", "node-11"]);
    assert_eq!(
        range.context.conflicts,
        vec!["atomic:node-10", "atomic:node-11", "inline:node-9"]
    );

    assert!(matches!(
        resolve(&model, r#"section(from=heading("Usage"))"#),
        Err(ResolveError::UnsupportedSelection { .. })
    ));
}

#[test]
fn test_blocks_and_paragraphs_scoping() {
    let model = guide();
    assert_eq!(ambiguous_count(resolve(&model, "blocks()").unwrap_err()), 13);

    let second = resolve(&model, r#"paragraphs(in=under(heading("Install"))).nth(2)"#).unwrap();
    assert_eq!(block_id(&second), "node-5");

    let chained = resolve(&model, r#"betweenHeadings("Install", "Usage").paragraphs()"#).unwrap_err();
    assert_eq!(ambiguous_count(chained), 2);
}

#[test]
fn test_objects_by_kind() {
    let model = guide();
    assert_eq!(ambiguous_count(resolve(&model, "objects()").unwrap_err()), 4);
    assert_eq!(block_id(&resolve(&model, r#"objects(type="table")"#).unwrap()), "node-6");
    assert_eq!(block_id(&resolve(&model, r#"objects(type="hr")"#).unwrap()), "node-10");
    assert_eq!(block_id(&resolve(&model, r#"objects(type="horizontalRule")"#).unwrap()), "node-10");

    assert_eq!(ambiguous_count(resolve(&model, r#"objects(type="image")"#).unwrap_err()), 2);
    let inline = resolve(&model, r#"objects(type="image").nth(2)"#).unwrap();
    assert_eq!(block_id(&inline), "inline-node-9-1");
    assert_eq!(inline.context.conflicts, vec!["atomic:inline-node-9-1"]);

    let scoped = resolve(&model, r#"objects(type="embed", in=under(heading("Usage"))).nth(1)"#).unwrap();
    assert_eq!(block_id(&scoped), "node-11");
}

#[test]
fn test_match_literal_scoping_and_occurrence() {
    let model = guide();
    assert_eq!(ambiguous_count(resolve(&model, r#"match("npm")"#).unwrap_err()), 3);

    let second = resolve(&model, r#"match("npm").nth(2)"#).unwrap();
    assert_eq!(text_range(&second), ("node-5", 0, 3));

    let third = resolve(&model, r#"match("npm", occurrence=3)"#).unwrap();
    assert_eq!(text_range(&third), ("node-8", 4, 7));

    assert!(matches!(
        resolve(&model, r#"match("npm", occurrence=4)"#),
        Err(ResolveError::NoMatch { .. })
    ));

    let scoped = resolve(&model, r#"match("npm", in=under(heading("Usage")))"#).unwrap();
    assert_eq!(text_range(&scoped).0, "node-8");

    let chained = resolve(&model, r#"under(heading("Install")).match("npm")"#).unwrap_err();
    assert_eq!(ambiguous_count(chained), 2);
}

#[test]
fn test_match_regex() {
    let model = guide();
    let target = resolve(
        &model,
        r#"paragraphs().filter(textEquals("Run npm install")).match("n[a-z]+", regex=true).nth(2)"#,
    )
    .unwrap();
    assert_eq!(text_range(&target), ("node-4", 9, 15));
    assert_eq!(target.context.snippet, "nstall");

    assert!(matches!(
        resolve(&model, r#"match("(", regex=true)"#),
        Err(ResolveError::InvalidPattern { .. })
    ));
}

#[test]
fn test_match_offsets_are_utf16() {
    let model = DocBuilder::new().para("h\u{e9}llo \u{1f600} world").build();
    let target = resolve(&model, r#"match("world")"#).unwrap();
    assert_eq!(text_range(&target), ("node-1", 9, 14));
    assert_eq!(target.context.snippet, "world");
    assert_eq!(model.blocks[0].map_offset_to_index(9).unwrap(), 10);
}

#[test]
fn test_filter_predicates() {
    let model = guide();
    assert_eq!(block_id(&resolve(&model, "paragraphs().filter(isCode())").unwrap()), "node-5");
    assert_eq!(
        block_id(&resolve(&model, r#"blocks().filter(textEquals("Run npm start"))"#).unwrap()),
        "node-8"
    );
    assert_eq!(
        block_id(&resolve(&model, r#"blocks().filter(and(textContains("npm"), isCode()))"#).unwrap()),
        "node-5"
    );
    assert_eq!(
        block_id(&resolve(&model, r#"blocks().filter(styleIs("HEADING_1"), textContains("App"))"#).unwrap()),
        "node-12"
    );
    assert!(matches!(
        resolve(&model, "blocks().filter(bogus())"),
        Err(ResolveError::UnsupportedSelection { .. })
    ));
}

#[test]
fn test_first_requires_allow_ambiguous() {
    let model = guide();
    assert!(matches!(
        resolve(&model, r#"match("npm").first()"#),
        Err(ResolveError::UnsupportedSelection { .. })
    ));
    let first = resolve_ambiguous(&model, r#"match("npm").first()"#).unwrap();
    assert_eq!(text_range(&first).0, "node-4");
}

#[test]
fn test_allow_ambiguous_picks_first_for_implicit_one() {
    let model = guide();
    let target = resolve_ambiguous(&model, r#"match("npm")"#).unwrap();
    assert_eq!(text_range(&target).0, "node-4");
}

#[test]
fn test_terminal_must_be_last() {
    let model = guide();
    let err = resolve(&model, r#"heading("Install").one().nth(1)"#).unwrap_err();
    match err {
        ResolveError::UnsupportedSelection { details, .. } => {
            assert_eq!(details["terminal"], "one");
            assert_eq!(details["position"], "not-last");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_nth_bounds_and_flooring() {
    let model = guide();
    assert!(matches!(resolve(&model, r#"match("npm").nth(0)"#), Err(ResolveError::NoMatch { .. })));
    assert!(matches!(resolve(&model, r#"match("npm").nth(4)"#), Err(ResolveError::NoMatch { .. })));
    let floored = resolve(&model, r#"match("npm").nth(2.7)"#).unwrap();
    assert_eq!(text_range(&floored).0, "node-5");
}

#[test]
fn test_unknown_function_is_unsupported() {
    let model = guide();
    let err = resolve(&model, "tables()").unwrap_err();
    match err {
        ResolveError::UnsupportedSelection { details, .. } => assert_eq!(details["function"], "tables"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_syntax_errors_surface() {
    let model = guide();
    assert!(matches!(resolve(&model, "heading("), Err(ResolveError::Syntax(_))));
}

#[test]
fn test_target_serializes_with_kind_tag() {
    let model = guide();
    let target = resolve(&model, r#"match("start")"#).unwrap();
    let json = serde_json::to_value(&target).unwrap();
    assert_eq!(json["kind"], "textRange");
    assert_eq!(json["startOffset"], 8);
    assert_eq!(json["paragraph"]["nodeId"], "node-8");
    assert_eq!(json["context"]["snippet"], "start");
}
