//! Tests for the element registry: classification, void elements, content
//! models and the special / formatting categories.

use marten_dom::{ContentModel, ElementKind, Namespace, classify, is_void};

#[test]
fn test_void_elements() {
    for name in [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
        "track", "wbr",
    ] {
        assert!(is_void(name), "{name} should be void");
    }
    for name in ["div", "p", "span", "template", "blink"] {
        assert!(!is_void(name), "{name} should not be void");
    }
}

#[test]
fn test_classify_formatting_elements() {
    for name in [
        "a", "b", "big", "code", "em", "font", "i", "nobr", "s", "small", "strike", "strong",
        "tt", "u",
    ] {
        let info = classify(name);
        assert!(info.is_formatting, "{name} should be formatting");
        assert!(!info.is_special, "{name} should not be special");
    }
}

#[test]
fn test_classify_special_elements() {
    for name in ["address", "div", "p", "table", "td", "template", "html", "select"] {
        assert!(classify(name).is_special, "{name} should be special");
    }
    assert!(!classify("span").is_special);
    assert!(!classify("blink").is_special);
}

#[test]
fn test_foreign_special_elements_depend_on_namespace() {
    assert!(ElementKind::Mi.is_special_in(Namespace::MathMl));
    assert!(!ElementKind::Mi.is_special_in(Namespace::Html));
    assert!(ElementKind::ForeignObject.is_special_in(Namespace::Svg));
    assert!(ElementKind::Title.is_special_in(Namespace::Svg));
    assert!(ElementKind::Title.is_special_in(Namespace::Html));
    assert!(!ElementKind::Div.is_special_in(Namespace::Svg));
}

#[test]
fn test_content_models() {
    assert_eq!(classify("title").content_model, ContentModel::Rcdata);
    assert_eq!(classify("textarea").content_model, ContentModel::Rcdata);
    for name in ["style", "xmp", "iframe", "noembed", "noframes"] {
        assert_eq!(classify(name).content_model, ContentModel::RawText, "{name}");
    }
    assert_eq!(classify("script").content_model, ContentModel::ScriptData);
    assert_eq!(classify("plaintext").content_model, ContentModel::PlainText);
    assert_eq!(classify("div").content_model, ContentModel::Data);
}

#[test]
fn test_noscript_content_model_follows_scripting_flag() {
    assert_eq!(ElementKind::Noscript.content_model(false), ContentModel::Data);
    assert_eq!(ElementKind::Noscript.content_model(true), ContentModel::RawText);
}

#[test]
fn test_unknown_names() {
    let info = classify("my-widget");
    assert_eq!(info.kind, ElementKind::Unknown);
    assert!(!info.is_void);
    assert!(!info.is_special);
    assert!(!info.is_formatting);
    assert_eq!(info.content_model, ContentModel::Data);
}

#[test]
fn test_headings() {
    assert!(ElementKind::H1.is_heading());
    assert!(ElementKind::H6.is_heading());
    assert!(!ElementKind::Hr.is_heading());
}
