//! DOCTYPE-driven document mode selection.
//!
//! [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)

use marten_dom::QuirksMode;

/// "The public identifier is set to" one of these (ASCII case-insensitive).
const QUIRKS_PUBLIC_IDS: &[&str] = &[
    "-//W3O//DTD W3 HTML Strict 3.0//EN//",
    "-/W3C/DTD HTML 4.0 Transitional/EN",
    "HTML",
];

/// "The public identifier starts with" one of these.
const QUIRKS_PUBLIC_ID_PREFIXES: &[&str] = &[
    "+//Silmaril//dtd html Pro v0r11 19970101//",
    "-//AS//DTD HTML 3.0 asWedit + extensions//",
    "-//AdvaSoft Ltd//DTD HTML 3.0 asWedit + extensions//",
    "-//IETF//DTD HTML 2.0 Level 1//",
    "-//IETF//DTD HTML 2.0 Level 2//",
    "-//IETF//DTD HTML 2.0 Strict Level 1//",
    "-//IETF//DTD HTML 2.0 Strict Level 2//",
    "-//IETF//DTD HTML 2.0 Strict//",
    "-//IETF//DTD HTML 2.0//",
    "-//IETF//DTD HTML 2.1E//",
    "-//IETF//DTD HTML 3.0//",
    "-//IETF//DTD HTML 3.2 Final//",
    "-//IETF//DTD HTML 3.2//",
    "-//IETF//DTD HTML 3//",
    "-//IETF//DTD HTML Level 0//",
    "-//IETF//DTD HTML Level 1//",
    "-//IETF//DTD HTML Level 2//",
    "-//IETF//DTD HTML Level 3//",
    "-//IETF//DTD HTML Strict Level 0//",
    "-//IETF//DTD HTML Strict Level 1//",
    "-//IETF//DTD HTML Strict Level 2//",
    "-//IETF//DTD HTML Strict Level 3//",
    "-//IETF//DTD HTML Strict//",
    "-//IETF//DTD HTML//",
    "-//Metrius//DTD Metrius Presentational//",
    "-//Microsoft//DTD Internet Explorer 2.0 HTML Strict//",
    "-//Microsoft//DTD Internet Explorer 2.0 HTML//",
    "-//Microsoft//DTD Internet Explorer 2.0 Tables//",
    "-//Microsoft//DTD Internet Explorer 3.0 HTML Strict//",
    "-//Microsoft//DTD Internet Explorer 3.0 HTML//",
    "-//Microsoft//DTD Internet Explorer 3.0 Tables//",
    "-//Netscape Comm. Corp.//DTD HTML//",
    "-//Netscape Comm. Corp.//DTD Strict HTML//",
    "-//O'Reilly and Associates//DTD HTML 2.0//",
    "-//O'Reilly and Associates//DTD HTML Extended 1.0//",
    "-//O'Reilly and Associates//DTD HTML Extended Relaxed 1.0//",
    "-//SQ//DTD HTML 2.0 HoTMetaL + extensions//",
    "-//SoftQuad Software//DTD HoTMetaL PRO 6.0::19990601::extensions to HTML 4.0//",
    "-//SoftQuad//DTD HoTMetaL PRO 4.0::19971010::extensions to HTML 4.0//",
    "-//Spyglass//DTD HTML 2.0 Extended//",
    "-//Sun Microsystems Corp.//DTD HotJava HTML//",
    "-//Sun Microsystems Corp.//DTD HotJava Strict HTML//",
    "-//W3C//DTD HTML 3 1995-03-24//",
    "-//W3C//DTD HTML 3.2 Draft//",
    "-//W3C//DTD HTML 3.2 Final//",
    "-//W3C//DTD HTML 3.2//",
    "-//W3C//DTD HTML 3.2S Draft//",
    "-//W3C//DTD HTML 4.0 Frameset//",
    "-//W3C//DTD HTML 4.0 Transitional//",
    "-//W3C//DTD HTML Experimental 19960712//",
    "-//W3C//DTD HTML Experimental 970421//",
    "-//W3C//DTD W3 HTML//",
    "-//W3O//DTD W3 HTML 3.0//",
    "-//WebTechs//DTD Mozilla HTML 2.0//",
    "-//WebTechs//DTD Mozilla HTML//",
];

/// HTML 4.01 Frameset and Transitional: quirks without a system identifier,
/// limited quirks with one.
const HTML401_PUBLIC_ID_PREFIXES: &[&str] = &[
    "-//W3C//DTD HTML 4.01 Frameset//",
    "-//W3C//DTD HTML 4.01 Transitional//",
];

/// "The public identifier starts with" one of these: limited quirks.
const LIMITED_QUIRKS_PUBLIC_ID_PREFIXES: &[&str] = &[
    "-//W3C//DTD XHTML 1.0 Frameset//",
    "-//W3C//DTD XHTML 1.0 Transitional//",
];

/// "The system identifier is set to" this (ASCII case-insensitive).
const QUIRKS_SYSTEM_ID: &str = "http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd";

fn starts_with_ignore_ascii_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn has_prefix_in(value: &str, prefixes: &[&str]) -> bool {
    prefixes
        .iter()
        .any(|prefix| starts_with_ignore_ascii_case(value, prefix))
}

/// [§ 13.2.6.4.1](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
///
/// Decide the document mode from a DOCTYPE token's fields. Missing
/// identifiers are `None`, which differs from the empty string: the HTML 4.01
/// rules depend on whether the system identifier is missing.
#[must_use]
pub fn classify_doctype(
    name: Option<&str>,
    public_id: Option<&str>,
    system_id: Option<&str>,
    force_quirks: bool,
) -> QuirksMode {
    // "The force-quirks flag is set to on."
    // "The name is not "html"."
    if force_quirks || name != Some("html") {
        return QuirksMode::Quirks;
    }

    if let Some(system) = system_id
        && system.eq_ignore_ascii_case(QUIRKS_SYSTEM_ID)
    {
        return QuirksMode::Quirks;
    }

    let Some(public) = public_id else {
        return QuirksMode::NoQuirks;
    };

    if QUIRKS_PUBLIC_IDS
        .iter()
        .any(|id| public.eq_ignore_ascii_case(id))
        || has_prefix_in(public, QUIRKS_PUBLIC_ID_PREFIXES)
    {
        return QuirksMode::Quirks;
    }

    // "The system identifier is missing and the public identifier starts
    // with: "-//W3C//DTD HTML 4.01 Frameset//", ..."
    if has_prefix_in(public, HTML401_PUBLIC_ID_PREFIXES) {
        return if system_id.is_none() {
            QuirksMode::Quirks
        } else {
            QuirksMode::LimitedQuirks
        };
    }

    if has_prefix_in(public, LIMITED_QUIRKS_PUBLIC_ID_PREFIXES) {
        return QuirksMode::LimitedQuirks;
    }

    QuirksMode::NoQuirks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html5_doctype_is_no_quirks() {
        assert_eq!(classify_doctype(Some("html"), None, None, false), QuirksMode::NoQuirks);
    }

    #[test]
    fn prefixes_match_case_insensitively() {
        assert_eq!(
            classify_doctype(Some("html"), Some("-//w3c//dtd html 3.2 final//en"), None, false),
            QuirksMode::Quirks
        );
    }

    #[test]
    fn short_public_id_does_not_panic() {
        assert_eq!(classify_doctype(Some("html"), Some("-//"), None, false), QuirksMode::NoQuirks);
        assert_eq!(classify_doctype(Some("html"), Some("é"), None, false), QuirksMode::NoQuirks);
    }
}
