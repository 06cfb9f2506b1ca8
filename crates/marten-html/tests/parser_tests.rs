//! Integration tests for the HTML parser.

use marten_dom::{DomTree, ElementKind, Namespace, NodeId, NodeType, QuirksMode};
use marten_html::{ParseFailure, ParseOptions, ParseOutput, parse_bytes, parse_str};
use quickcheck_macros::quickcheck;

/// Helper to parse HTML with default options
fn parse(html: &str) -> ParseOutput {
    parse_str(html, &ParseOptions::default())
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if let Some(data) = tree.as_element(from)
        && data.tag_name == tag
    {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

fn has_issue_containing(output: &ParseOutput, needle: &str) -> bool {
    output
        .issues
        .iter()
        .any(|issue| issue.message.contains(needle))
}

#[test]
fn test_document_structure() {
    let output = parse("<!DOCTYPE html><html><head></head><body></body></html>");
    let tree = &output.document.tree;

    // Root should be Document
    let root = tree.get(NodeId::ROOT).unwrap();
    assert!(matches!(root.node_type, NodeType::Document));

    let html_id = output.document.document_element().unwrap();
    let children: Vec<_> = tree
        .children(html_id)
        .iter()
        .filter_map(|&id| tree.as_element(id))
        .map(|data| data.tag_name.as_str())
        .collect();
    assert_eq!(children, ["head", "body"]);
    assert!(output.is_complete());
    assert!(output.issues.is_empty());
}

#[test]
fn test_doctype_is_recorded() {
    let output = parse("<!DOCTYPE html>");
    let doctype = output.document.doctype_data().unwrap();
    assert_eq!(doctype.name, "html");
    assert_eq!(doctype.public_id, "");
    assert_eq!(output.document.quirks_mode, QuirksMode::NoQuirks);
}

#[test]
fn test_missing_doctype_is_quirks() {
    let output = parse("<p>x");
    assert_eq!(output.document.quirks_mode, QuirksMode::Quirks);
    assert!(output.document.doctype.is_none());
    assert!(!output.issues.is_empty());

    let nameless = parse("<!DOCTYPE><p>x");
    assert_eq!(nameless.document.quirks_mode, QuirksMode::Quirks);
}

#[test]
fn test_legacy_doctypes() {
    let quirks = parse(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#);
    assert_eq!(quirks.document.quirks_mode, QuirksMode::Quirks);

    let limited = parse(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#,
    );
    assert_eq!(limited.document.quirks_mode, QuirksMode::LimitedQuirks);

    let xhtml = parse(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#,
    );
    assert_eq!(xhtml.document.quirks_mode, QuirksMode::LimitedQuirks);
}

#[test]
fn test_text_node() {
    let output = parse("<html><body>Hello World</body></html>");
    let body = output.document.body().unwrap();
    assert_eq!(output.document.tree.text_content(body), "Hello World");
}

#[test]
fn test_comment_node() {
    let output = parse("<body><!-- note --></body>");
    let tree = &output.document.tree;
    let body = output.document.body().unwrap();
    let comment = tree.children(body)[0];
    match &tree.get(comment).unwrap().node_type {
        NodeType::Comment(text) => assert_eq!(text, " note "),
        other => panic!("Expected comment, got {other:?}"),
    }
}

#[test]
fn test_self_closing_non_void_is_reported() {
    let output = parse("<!DOCTYPE html><div/>x");
    assert!(has_issue_containing(
        &output,
        "non-void-html-element-start-tag-with-trailing-solidus"
    ));
    // The slash is ignored: the text ends up inside the div.
    let tree = &output.document.tree;
    let div = find_element(tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(tree.text_content(div), "x");
}

#[test]
fn test_self_closing_svg_is_acknowledged() {
    let output = parse("<!DOCTYPE html><svg/>x");
    assert!(output.issues.is_empty());
    let tree = &output.document.tree;
    let svg = find_element(tree, NodeId::ROOT, "svg").unwrap();
    assert_eq!(tree.as_element(svg).unwrap().namespace, Namespace::Svg);
    assert!(tree.children(svg).is_empty());
}

#[test]
fn test_null_characters_are_dropped_in_body() {
    let output = parse("<!DOCTYPE html><p>a\0b");
    let p = find_element(&output.document.tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(output.document.tree.text_content(p), "ab");
    assert!(has_issue_containing(&output, "unexpected-null-character"));
}

#[test]
fn test_leading_newline_in_pre_and_textarea() {
    let output = parse("<pre>\n\nx</pre><textarea>\nfoo</textarea>");
    let tree = &output.document.tree;
    let pre = find_element(tree, NodeId::ROOT, "pre").unwrap();
    assert_eq!(tree.text_content(pre), "\nx");
    let textarea = find_element(tree, NodeId::ROOT, "textarea").unwrap();
    assert_eq!(tree.text_content(textarea), "foo");
}

#[test]
fn test_title_is_rcdata() {
    let output = parse("<title>a &amp; <b></title>");
    let tree = &output.document.tree;
    let title = find_element(tree, NodeId::ROOT, "title").unwrap();
    assert_eq!(tree.text_content(title), "a & <b>");
    assert!(find_element(tree, NodeId::ROOT, "b").is_none());
}

#[test]
fn test_element_kinds_are_classified() {
    let output = parse("<!DOCTYPE html><table><tr><td>x");
    let tree = &output.document.tree;
    let td = find_element(tree, NodeId::ROOT, "td").unwrap();
    assert!(tree.as_element(td).unwrap().is(ElementKind::Td));
}

#[test]
fn test_nesting_too_deep_fails_closed() {
    let html = "<div>".repeat(20);
    let options = ParseOptions::default().with_max_depth(10);
    let output = parse_str(&html, &options);

    assert_eq!(output.failure, Some(ParseFailure::NestingTooDeep { limit: 10 }));
    assert!(!output.is_complete());
    // The partial tree is still returned.
    assert!(find_element(&output.document.tree, NodeId::ROOT, "div").is_some());
}

#[test]
fn test_default_depth_allows_ordinary_nesting() {
    let html = "<div>".repeat(100);
    let output = parse(&html);
    assert!(output.is_complete());
}

#[test]
fn test_parse_bytes_windows_1252() {
    let options = ParseOptions::default().with_utf8(false);
    let output = parse_bytes(b"<p>caf\xE9 \x80", &options);
    let p = find_element(&output.document.tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(output.document.tree.text_content(p), "caf\u{E9} \u{20AC}");
}

#[test]
fn test_parse_bytes_utf8_replaces_invalid_sequences() {
    let output = parse_bytes(b"<p>a\xFFb", &ParseOptions::default());
    let p = find_element(&output.document.tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(output.document.tree.text_content(p), "a\u{FFFD}b");
}

#[test]
fn test_issue_positions_point_into_input() {
    let output = parse("<!DOCTYPE html>\n<p>\0");
    let null_issue = output
        .issues
        .iter()
        .find(|issue| issue.message == "unexpected-null-character")
        .unwrap();
    assert_eq!(null_issue.position.line, 2);
    assert_eq!(null_issue.position.column, 4);
}

#[test]
fn test_json_snapshot() {
    let output = parse("<!DOCTYPE html><p class=x>hi");
    let json = output.document.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "document");
    assert_eq!(value["quirksMode"], "no-quirks");
    assert_eq!(value["children"][0]["type"], "doctype");
    assert_eq!(value["children"][1]["tagName"], "html");
}

/// Any input produces a tree with a single `<html>` document element.
#[quickcheck]
fn parser_is_total(input: String) -> bool {
    let output = parse(&input);
    let tree = &output.document.tree;
    let element_children = tree
        .children(NodeId::ROOT)
        .iter()
        .filter(|&&id| tree.as_element(id).is_some())
        .count();
    output.is_complete()
        && element_children == 1
        && output.document.document_element().is_some()
}

/// Markup-heavy inputs built from a small alphabet reach far more of the
/// tree builder than arbitrary strings do.
#[quickcheck]
fn parser_is_total_on_tag_soup(pieces: Vec<u8>) -> bool {
    const PIECES: &[&str] = &[
        "<p>", "</p>", "<b>", "</b>", "<i>", "</i>", "<a>", "</a>", "<table>", "</table>",
        "<tr>", "<td>", "</td>", "<select>", "<option>", "<svg>", "</svg>", "<math>",
        "<mi>", "<template>", "</template>", "<frameset>", "<li>", "<div>", "</div>",
        "<caption>", "<col>", "<form>", "</form>", "<button>", "x", " ", "<!--c-->",
        "<!DOCTYPE html>", "</body>", "</html>", "<foreignObject>", "<nobr>", "<textarea>",
    ];
    let html: String = pieces
        .iter()
        .map(|&piece| PIECES[usize::from(piece) % PIECES.len()])
        .collect();
    let output = parse(&html);
    output.document.document_element().is_some()
        && output
            .issues
            .iter()
            .all(|issue| issue.position.offset <= html.chars().count())
}
