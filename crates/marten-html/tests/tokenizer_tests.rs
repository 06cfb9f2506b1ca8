//! Integration tests for the HTML tokenizer.

use marten_html::{HTMLTokenizer, InputStream, ParseIssue, Token, tokenize};

/// Helper to tokenize and also collect the lexical issues
fn tokenize_with_issues(input: &str) -> (Vec<Token>, Vec<ParseIssue>) {
    let mut tokenizer = HTMLTokenizer::from_text(input).self_driving();
    let tokens: Vec<Token> = tokenizer.by_ref().collect();
    let issues = tokenizer.take_issues();
    (tokens, issues)
}

/// Helper to concatenate every character run in `tokens`
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Data { text } | Token::Whitespace { text } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn has_issue(issues: &[ParseIssue], code: &str) -> bool {
    issues.iter().any(|issue| issue.message == code)
}

#[test]
fn test_text_runs_split_on_whitespace() {
    let tokens = tokenize("Hello  world");
    assert_eq!(
        tokens,
        vec![
            Token::Data {
                text: "Hello".to_string()
            },
            Token::Whitespace {
                text: "  ".to_string()
            },
            Token::Data {
                text: "world".to_string()
            },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_empty_input_is_just_eof() {
    assert_eq!(tokenize(""), vec![Token::EndOfFile]);
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name,
            public_id,
            system_id,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert_eq!(public_id, &None);
            assert_eq!(system_id, &None);
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_with_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    );
    match &tokens[0] {
        Token::Doctype {
            public_id,
            system_id,
            ..
        } => {
            assert_eq!(public_id.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_id.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let (tokens, issues) = tokenize_with_issues("<!DOCTYPE>");
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert_eq!(name, &None);
            assert!(force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
    assert!(has_issue(&issues, "missing-doctype-name"));
}

#[test]
fn test_start_tag_with_attributes() {
    let tokens = tokenize(r#"<DIV Class="a" id=b data-x='c'>"#);
    match &tokens[0] {
        Token::OpenTag {
            name,
            attributes,
            self_closing,
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.get("class"), Some("a"));
            assert_eq!(attributes.get("id"), Some("b"));
            assert_eq!(attributes.get("data-x"), Some("c"));
            assert!(!self_closing);
        }
        _ => panic!("Expected OpenTag token"),
    }
}

#[test]
fn test_void_element_is_self_close_tag() {
    let tokens = tokenize(r#"<br class="x">"#);
    match &tokens[0] {
        Token::SelfCloseTag {
            name,
            attributes,
            self_closing,
        } => {
            assert_eq!(name, "br");
            assert_eq!(attributes.get("class"), Some("x"));
            assert!(!self_closing);
        }
        _ => panic!("Expected SelfCloseTag token"),
    }

    let tokens = tokenize("<img/>");
    assert!(matches!(
        &tokens[0],
        Token::SelfCloseTag {
            self_closing: true,
            ..
        }
    ));
}

#[test]
fn test_self_closing_non_void_stays_open_tag() {
    let tokens = tokenize("<div/>");
    assert!(matches!(
        &tokens[0],
        Token::OpenTag {
            self_closing: true,
            ..
        }
    ));
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</P>");
    assert_eq!(
        tokens[0],
        Token::CloseTag {
            name: "p".to_string()
        }
    );
}

#[test]
fn test_end_tag_attributes_are_dropped() {
    let (tokens, issues) = tokenize_with_issues(r#"</p class="x">"#);
    assert_eq!(
        tokens[0],
        Token::CloseTag {
            name: "p".to_string()
        }
    );
    assert!(has_issue(&issues, "end-tag-with-attributes"));
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let (tokens, issues) = tokenize_with_issues("<p a=1 a=2>");
    let attributes = tokens[0].attributes().unwrap();
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes.get("a"), Some("1"));
    assert!(has_issue(&issues, "duplicate-attribute"));
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hi -->");
    assert_eq!(
        tokens[0],
        Token::Comment {
            text: " hi ".to_string()
        }
    );
}

#[test]
fn test_bogus_comment() {
    let (tokens, issues) = tokenize_with_issues("<?xml version?>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            text: "?xml version?".to_string()
        }
    );
    assert!(has_issue(
        &issues,
        "unexpected-question-mark-instead-of-tag-name"
    ));
}

#[test]
fn test_cdata_outside_foreign_content_is_a_comment() {
    let (tokens, issues) = tokenize_with_issues("<![CDATA[x]]>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            text: "[CDATA[x]]".to_string()
        }
    );
    assert!(has_issue(&issues, "cdata-in-html-content"));
}

#[test]
fn test_cdata_section_when_allowed() {
    let mut tokenizer = HTMLTokenizer::from_text("<![CDATA[a<b]]>");
    tokenizer.set_cdata_allowed(true);
    let tokens: Vec<Token> = tokenizer.collect();
    assert_eq!(text_of(&tokens), "a<b");
    assert!(!tokens.iter().any(|t| matches!(t, Token::Comment { .. })));
}

#[test]
fn test_character_references_in_data() {
    let tokens = tokenize("&amp;&lt;&#65;&#x42;");
    assert_eq!(
        tokens[0],
        Token::Data {
            text: "&<AB".to_string()
        }
    );
}

#[test]
fn test_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2">"#);
    assert_eq!(tokens[0].attributes().unwrap().get("href"), Some("?a=1&b=2"));
}

#[test]
fn test_numeric_reference_to_c1_control_uses_windows_1252() {
    let tokens = tokenize("&#x80;");
    assert_eq!(text_of(&tokens), "\u{20AC}");
}

#[test]
fn test_null_in_data_is_reported() {
    let (tokens, issues) = tokenize_with_issues("a\0b");
    assert_eq!(text_of(&tokens), "a\0b");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message, "unexpected-null-character");
    assert_eq!(issues[0].position.offset, 1);
    assert_eq!(issues[0].position.column, 2);
}

#[test]
fn test_script_content_is_not_markup() {
    let tokens = tokenize("<script>if (a <b) {}</script>");
    assert_eq!(tokens[0].tag_name(), Some("script"));
    assert_eq!(text_of(&tokens), "if (a <b) {}");
    assert_eq!(
        tokens[tokens.len() - 2],
        Token::CloseTag {
            name: "script".to_string()
        }
    );
    // No <b> start tag inside the script.
    assert_eq!(tokens.iter().filter(|t| t.is_start_tag()).count(), 1);
}

#[test]
fn test_rcdata_decodes_references_but_not_tags() {
    let tokens = tokenize("<title>&lt;b&gt;<i></title>");
    assert_eq!(text_of(&tokens), "<b><i>");
    assert_eq!(tokens.iter().filter(|t| t.is_start_tag()).count(), 1);
}

#[test]
fn test_eof_in_tag() {
    let (tokens, issues) = tokenize_with_issues("<div class=");
    assert_eq!(tokens.len(), 2);
    assert!(tokens[0].is_start_tag());
    assert_eq!(tokens[0].tag_name(), Some("div"));
    assert_eq!(tokens[0].attributes().unwrap().get("class"), Some(""));
    assert_eq!(tokens[1], Token::EndOfFile);
    assert!(has_issue(&issues, "eof-in-tag"));
}

#[test]
fn test_eof_in_quoted_attribute_keeps_the_tag() {
    let (tokens, issues) = tokenize_with_issues("<a href=\"x");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::OpenTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "a");
            assert_eq!(attributes.get("href"), Some("x"));
        }
        other => panic!("Expected OpenTag token, got {other:?}"),
    }
    assert_eq!(tokens[1], Token::EndOfFile);
    assert!(has_issue(&issues, "eof-in-tag"));
}

#[test]
fn test_eof_in_tag_name_emits_partial_tags() {
    let tokens = tokenize("<p>x</p");
    assert_eq!(tokens[0].tag_name(), Some("p"));
    assert_eq!(
        tokens[2],
        Token::CloseTag {
            name: "p".to_string()
        }
    );
    assert_eq!(tokens.last(), Some(&Token::EndOfFile));
}

#[test]
fn test_rare_named_references_decode() {
    let tokens = tokenize("&NotEqualTilde;&bigstar;&Dagger;");
    assert_eq!(text_of(&tokens), "\u{2242}\u{0338}\u{2605}\u{2021}");
}

#[test]
fn test_lone_less_than_sign_is_text() {
    let (tokens, issues) = tokenize_with_issues("a < b");
    assert_eq!(text_of(&tokens), "a < b");
    assert!(has_issue(&issues, "invalid-first-character-of-tag-name"));
}

#[test]
fn test_crlf_is_normalized() {
    let tokens = tokenize("a\r\nb");
    assert_eq!(
        tokens[1],
        Token::Whitespace {
            text: "\n".to_string()
        }
    );
}

#[test]
fn test_windows_1252_input() {
    let input = InputStream::from_bytes(&[b'c', b'a', b'f', 0xE9], false);
    let tokens: Vec<Token> = HTMLTokenizer::new(input).collect();
    assert_eq!(text_of(&tokens), "caf\u{E9}");
}

#[test]
fn test_tokenizer_stops_after_eof() {
    let mut tokenizer = HTMLTokenizer::from_text("x");
    assert!(tokenizer.next_token().is_some());
    assert_eq!(tokenizer.next_token(), Some(Token::EndOfFile));
    assert_eq!(tokenizer.next_token(), None);
}
