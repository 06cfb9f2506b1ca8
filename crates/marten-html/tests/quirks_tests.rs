//! Document mode classification from DOCTYPE fields.

use marten_dom::QuirksMode;
use marten_html::classify_doctype;
use quickcheck_macros::quickcheck;

const IBM_SYSTEM_ID: &str = "http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd";

#[test]
fn test_force_quirks_wins() {
    assert_eq!(
        classify_doctype(Some("html"), None, None, true),
        QuirksMode::Quirks
    );
}

#[test]
fn test_name_must_be_html() {
    assert_eq!(
        classify_doctype(Some("svg"), None, None, false),
        QuirksMode::Quirks
    );
    assert_eq!(classify_doctype(None, None, None, false), QuirksMode::Quirks);
}

#[test]
fn test_exact_public_ids() {
    assert_eq!(
        classify_doctype(Some("html"), Some("HTML"), None, false),
        QuirksMode::Quirks
    );
    assert_eq!(
        classify_doctype(
            Some("html"),
            Some("-/w3c/dtd html 4.0 transitional/en"),
            None,
            false
        ),
        QuirksMode::Quirks
    );
}

#[test]
fn test_ibm_system_id() {
    assert_eq!(
        classify_doctype(Some("html"), None, Some(IBM_SYSTEM_ID), false),
        QuirksMode::Quirks
    );
}

#[test]
fn test_html401_depends_on_system_id() {
    let public = Some("-//W3C//DTD HTML 4.01 Frameset//EN");
    assert_eq!(
        classify_doctype(Some("html"), public, None, false),
        QuirksMode::Quirks
    );
    assert_eq!(
        classify_doctype(
            Some("html"),
            public,
            Some("http://www.w3.org/TR/html4/frameset.dtd"),
            false
        ),
        QuirksMode::LimitedQuirks
    );
}

#[test]
fn test_xhtml_is_limited_quirks() {
    assert_eq!(
        classify_doctype(
            Some("html"),
            Some("-//W3C//DTD XHTML 1.0 Frameset//EN"),
            None,
            false
        ),
        QuirksMode::LimitedQuirks
    );
}

#[test]
fn test_strict_doctypes_are_no_quirks() {
    assert_eq!(
        classify_doctype(
            Some("html"),
            Some("-//W3C//DTD HTML 4.01//EN"),
            Some("http://www.w3.org/TR/html4/strict.dtd"),
            false
        ),
        QuirksMode::NoQuirks
    );
    assert_eq!(
        classify_doctype(Some("html"), None, Some("about:legacy-compat"), false),
        QuirksMode::NoQuirks
    );
}

#[test]
fn test_empty_public_id_differs_from_missing() {
    // An empty public ID matches no prefix, so only the name matters.
    assert_eq!(
        classify_doctype(Some("html"), Some(""), None, false),
        QuirksMode::NoQuirks
    );
}

/// Classification is a pure function of its inputs.
#[quickcheck]
fn classification_is_deterministic(
    name: Option<String>,
    public_id: Option<String>,
    system_id: Option<String>,
    force_quirks: bool,
) -> bool {
    let classify = || {
        classify_doctype(
            name.as_deref(),
            public_id.as_deref(),
            system_id.as_deref(),
            force_quirks,
        )
    };
    classify() == classify()
}

/// Forcing quirks always yields quirks mode, whatever the identifiers say.
#[quickcheck]
fn force_quirks_always_quirks(public_id: Option<String>, system_id: Option<String>) -> bool {
    classify_doctype(
        Some("html"),
        public_id.as_deref(),
        system_id.as_deref(),
        true,
    ) == QuirksMode::Quirks
}
