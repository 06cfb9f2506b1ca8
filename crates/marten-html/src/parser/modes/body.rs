//! The "in body" insertion mode.

use std::borrow::Cow;

use marten_dom::{ContentModel, ElementKind, Namespace, QuirksMode};

use crate::parser::core::{HTMLParser, InsertionMode, Outcome, TokenView};
use crate::parser::stack::Scope;
use crate::tokenizer::Token;

/// Elements that may still be open when the body ends without a parse error.
const CLOSABLE_AT_END_OF_BODY: &[ElementKind] = &[
    ElementKind::Dd,
    ElementKind::Dt,
    ElementKind::Li,
    ElementKind::Optgroup,
    ElementKind::Option,
    ElementKind::P,
    ElementKind::Rb,
    ElementKind::Rp,
    ElementKind::Rt,
    ElementKind::Rtc,
    ElementKind::Tbody,
    ElementKind::Td,
    ElementKind::Tfoot,
    ElementKind::Th,
    ElementKind::Thead,
    ElementKind::Tr,
    ElementKind::Body,
    ElementKind::Html,
];

const HEADINGS: &[ElementKind] = &[
    ElementKind::H1,
    ElementKind::H2,
    ElementKind::H3,
    ElementKind::H4,
    ElementKind::H5,
    ElementKind::H6,
];

impl HTMLParser {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(in crate::parser) fn handle_in_body_mode(&mut self, token: &Token) -> Outcome {
        use ElementKind as K;

        match TokenView::of(token) {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            //
            // "Any other character token"
            // "Reconstruct the active formatting elements, if any. Insert the
            // token's character. Set the frameset-ok flag to "not ok"."
            TokenView::Data(text) => {
                let text = self.strip_null_characters(text);
                if text.is_empty() {
                    return Outcome::Consumed;
                }
                self.reconstruct_active_formatting_elements();
                self.insert_characters(&text);
                self.frameset_ok = false;
                Outcome::Consumed
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Reconstruct the active formatting elements, if any. Insert the
            // token's character."
            TokenView::Whitespace(text) => {
                self.reconstruct_active_formatting_elements();
                self.insert_characters(text);
                Outcome::Consumed
            }

            // "A comment token"
            // "Insert a comment."
            TokenView::Comment(text) => {
                self.insert_comment(text, None);
                Outcome::Consumed
            }

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            TokenView::Doctype => self.ignore_unexpected(token),

            // "A start tag whose tag name is "html""
            TokenView::StartTag("html") => {
                // "Parse error."
                self.report_unexpected(token);
                // "If there is a template element on the stack of open
                // elements, then ignore the token. Otherwise, for each
                // attribute on the token, check to see if the attribute is
                // already present on the top element of the stack of open
                // elements. If it is not, add the attribute and its
                // corresponding value to that element."
                if !self.stack_contains(K::Template)
                    && let Some(&html) = self.stack_of_open_elements.first()
                {
                    self.merge_attributes(html, token);
                }
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link", "meta", "noframes", "script", "style",
            // "template", "title""
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            TokenView::StartTag(
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                | "style" | "template" | "title",
            )
            | TokenView::EndTag("template") => self.handle_in_head_mode(token),

            // "A start tag whose tag name is "body""
            TokenView::StartTag("body") => {
                // "Parse error."
                self.report_unexpected(token);
                // "If the second element on the stack of open elements is not
                // a body element, if the stack of open elements has only one
                // node on it, or if there is a template element on the stack
                // of open elements, then ignore the token."
                // "Otherwise, set the frameset-ok flag to "not ok"; then, for
                // each attribute on the token, check to see if the attribute
                // is already present on the body element ... If it is not, add
                // the attribute and its corresponding value to that element."
                if let Some(&body) = self.stack_of_open_elements.get(1)
                    && self.node_is(body, K::Body)
                    && !self.stack_contains(K::Template)
                {
                    self.frameset_ok = false;
                    self.merge_attributes(body, token);
                }
                Outcome::Consumed
            }

            // "A start tag whose tag name is "frameset""
            TokenView::StartTag("frameset") => {
                // "Parse error."
                self.report_unexpected(token);
                // "If the stack of open elements has only one node on it, or
                // if the second element on the stack of open elements is not a
                // body element, then ignore the token."
                // "If the frameset-ok flag is set to "not ok", ignore the token."
                let Some(&body) = self.stack_of_open_elements.get(1) else {
                    return Outcome::Consumed;
                };
                if !self.node_is(body, K::Body) || !self.frameset_ok {
                    return Outcome::Consumed;
                }
                // "Otherwise, run the following steps:"
                // STEP 1: "Remove the second element on the stack of open
                //          elements from its parent node, if it has one."
                self.tree.detach(body);
                // STEP 2: "Pop all the nodes from the bottom of the stack of
                //          open elements, from the current node up to, but not
                //          including, the root html element."
                self.stack_of_open_elements.truncate(1);
                // STEP 3: "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
                // STEP 4: "Switch the insertion mode to "in frameset"."
                self.insertion_mode = InsertionMode::InFrameset;
                Outcome::Consumed
            }

            // "An end-of-file token"
            TokenView::Eof => {
                // "If the stack of template insertion modes is not empty, then
                // process the token using the rules for the "in template"
                // insertion mode."
                if !self.template_insertion_modes.is_empty() {
                    return self.handle_in_template_mode(token);
                }
                // "Otherwise, follow these steps: If there is a node in the
                // stack of open elements that is not either a dd element, a dt
                // element, ... the body element, or the html element, then this
                // is a parse error."
                self.report_elements_left_open();
                // "Stop parsing."
                self.stop_parsing()
            }

            // "An end tag whose tag name is "body""
            // "An end tag whose tag name is "html""
            TokenView::EndTag(name @ ("body" | "html")) => {
                // "If the stack of open elements does not have a body element
                // in scope, this is a parse error; ignore the token."
                if !self.has_element_in_scope(K::Body) {
                    return self.ignore_unexpected(token);
                }
                // "Otherwise, if there is a node in the stack of open elements
                // that is not either a dd element, ... then this is a parse
                // error."
                self.report_elements_left_open();
                // "Switch the insertion mode to "after body"."
                if name == "body" {
                    self.insertion_mode = InsertionMode::AfterBody;
                    Outcome::Consumed
                } else {
                    // "Reprocess the token."
                    self.reprocess_in(InsertionMode::AfterBody)
                }
            }

            // "A start tag whose tag name is one of: "address", "article",
            // "aside", "blockquote", "center", "details", "dialog", "dir",
            // "div", "dl", "fieldset", "figcaption", "figure", "footer",
            // "header", "hgroup", "main", "menu", "nav", "ol", "p", "search",
            // "section", "summary", "ul""
            // "If the stack of open elements has a p element in button scope,
            // then close a p element. Insert an HTML element for the token."
            TokenView::StartTag(
                "address" | "article" | "aside" | "blockquote" | "center" | "details" | "dialog"
                | "dir" | "div" | "dl" | "fieldset" | "figcaption" | "figure" | "footer"
                | "header" | "hgroup" | "main" | "menu" | "nav" | "ol" | "p" | "search"
                | "section" | "summary" | "ul",
            ) => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4",
            // "h5", "h6""
            TokenView::StartTag("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => {
                self.close_p_element_in_button_scope();
                // "If the current node is an HTML element whose tag name is one
                // of "h1", "h2", "h3", "h4", "h5", or "h6", then this is a
                // parse error; pop the current node off the stack of open
                // elements."
                if self.current_node_is_one_of(HEADINGS) {
                    self.report_unexpected(token);
                    self.pop_current_node();
                }
                let _ = self.insert_html_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            TokenView::StartTag("pre" | "listing") => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                // "If the next token is a U+000A LINE FEED (LF) character
                // token, then ignore that token and move on to the next one."
                self.ignore_next_line_feed = true;
                self.frameset_ok = false;
                Outcome::Consumed
            }

            // "A start tag whose tag name is "form""
            TokenView::StartTag("form") => {
                let in_template = self.stack_contains(K::Template);
                // "If the form element pointer is not null, and there is no
                // template element on the stack of open elements, then this is
                // a parse error; ignore the token."
                if self.form_element_pointer.is_some() && !in_template {
                    return self.ignore_unexpected(token);
                }
                self.close_p_element_in_button_scope();
                let form = self.insert_html_element(token);
                // "if there is no template element on the stack of open
                // elements, set the form element pointer to point to the
                // element created."
                if !in_template {
                    self.form_element_pointer = Some(form);
                }
                Outcome::Consumed
            }

            // "A start tag whose tag name is "li""
            TokenView::StartTag("li") => {
                self.frameset_ok = false;
                self.close_open_list_item(&[K::Li]);
                let _ = self.insert_html_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "dd", "dt""
            TokenView::StartTag("dd" | "dt") => {
                self.frameset_ok = false;
                self.close_open_list_item(&[K::Dd, K::Dt]);
                let _ = self.insert_html_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is "plaintext""
            TokenView::StartTag("plaintext") => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                // "Switch the tokenizer to the PLAINTEXT state."
                self.switch_tokenizer_to(ContentModel::PlainText);
                Outcome::Consumed
            }

            // "A start tag whose tag name is "button""
            TokenView::StartTag("button") => {
                // "If the stack of open elements has a button element in
                // scope, then run these substeps: Parse error. Generate implied
                // end tags. Pop elements from the stack of open elements until
                // a button element has been popped from the stack."
                if self.has_element_in_scope(K::Button) {
                    self.report_unexpected(token);
                    self.generate_implied_end_tags(None);
                    self.pop_until(K::Button);
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                Outcome::Consumed
            }

            // "An end tag whose tag name is one of: "address", "article",
            // "aside", "blockquote", "button", "center", "details", "dialog",
            // "dir", "div", "dl", "fieldset", "figcaption", "figure",
            // "footer", "header", "hgroup", "listing", "main", "menu", "nav",
            // "ol", "pre", "search", "section", "summary", "ul""
            TokenView::EndTag(
                name @ ("address" | "article" | "aside" | "blockquote" | "button" | "center"
                | "details" | "dialog" | "dir" | "div" | "dl" | "fieldset" | "figcaption"
                | "figure" | "footer" | "header" | "hgroup" | "listing" | "main" | "menu"
                | "nav" | "ol" | "pre" | "search" | "section" | "summary" | "ul"),
            ) => self.close_element_in_scope(token, K::from_name(name), None),

            // "An end tag whose tag name is "form""
            TokenView::EndTag("form") => self.close_form_element(token),

            // "An end tag whose tag name is "p""
            TokenView::EndTag("p") => {
                // "If the stack of open elements does not have a p element in
                // button scope, then this is a parse error; insert an HTML
                // element for a "p" start tag token with no attributes."
                if !self.has_element_in_button_scope(K::P) {
                    self.report_unexpected(token);
                    let _ = self.insert_implied_element("p");
                }
                // "Close a p element."
                self.close_p_element();
                Outcome::Consumed
            }

            // "An end tag whose tag name is "li""
            TokenView::EndTag("li") => {
                // "If the stack of open elements does not have an li element in
                // list item scope, then this is a parse error; ignore the token."
                if !self.has_element_in(Scope::ListItem, K::Li) {
                    return self.ignore_unexpected(token);
                }
                // "Generate implied end tags, except for li elements."
                self.generate_implied_end_tags(Some(K::Li));
                if !self.current_node_is(K::Li) {
                    self.report_unexpected(token);
                }
                self.pop_until(K::Li);
                Outcome::Consumed
            }

            // "An end tag whose tag name is one of: "dd", "dt""
            TokenView::EndTag(name @ ("dd" | "dt")) => {
                let kind = K::from_name(name);
                self.close_element_in_scope(token, kind, Some(kind))
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4",
            // "h5", "h6""
            TokenView::EndTag(name @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6")) => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element and whose tag name is one of
                // "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; ignore the token."
                if !self.has_heading_in_scope() {
                    return self.ignore_unexpected(token);
                }
                self.generate_implied_end_tags(None);
                if !self.current_node_is(K::from_name(name)) {
                    self.report_unexpected(token);
                }
                // "Pop elements from the stack of open elements until an HTML
                // element whose tag name is one of "h1", "h2", "h3", "h4",
                // "h5", or "h6" has been popped from the stack."
                self.pop_until_one_of(HEADINGS);
                Outcome::Consumed
            }

            // "A start tag whose tag name is "a""
            TokenView::StartTag("a") => {
                // "If the list of active formatting elements contains an a
                // element between the end of the list and the last marker on
                // the list (or the start of the list if there is no marker on
                // the list), then this is a parse error; run the adoption
                // agency algorithm for the token, then remove that element from
                // the list of active formatting elements and the stack of open
                // elements if the adoption agency algorithm didn't already
                // remove it (it might not have if the element is not in table
                // scope)."
                if let Some((_, existing)) = self.formatting_element_after_last_marker("a") {
                    self.report_unexpected(token);
                    // The "any other end tag" fallback only applies to end tags.
                    let _ = self.run_adoption_agency(token);
                    self.remove_from_formatting_list(existing);
                    self.remove_from_stack(existing);
                }
                self.insert_formatting_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "b", "big", "code", "em",
            // "font", "i", "s", "small", "strike", "strong", "tt", "u""
            // "Reconstruct the active formatting elements, if any. Insert an
            // HTML element for the token. Push onto the list of active
            // formatting elements that element."
            TokenView::StartTag(
                "b" | "big" | "code" | "em" | "font" | "i" | "s" | "small" | "strike" | "strong"
                | "tt" | "u",
            ) => {
                self.insert_formatting_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is "nobr""
            TokenView::StartTag("nobr") => {
                self.reconstruct_active_formatting_elements();
                // "If the stack of open elements has a nobr element in scope,
                // then this is a parse error; run the adoption agency algorithm
                // for the token, then once again reconstruct the active
                // formatting elements, if any."
                if self.has_element_in_scope(K::Nobr) {
                    self.report_unexpected(token);
                    // The "any other end tag" fallback only applies to end tags.
                    let _ = self.run_adoption_agency(token);
                }
                self.insert_formatting_element(token);
                Outcome::Consumed
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code",
            // "em", "font", "i", "nobr", "s", "small", "strike", "strong",
            // "tt", "u""
            // "Run the adoption agency algorithm for the token."
            TokenView::EndTag(
                "a" | "b" | "big" | "code" | "em" | "font" | "i" | "nobr" | "s" | "small"
                | "strike" | "strong" | "tt" | "u",
            ) => {
                if self.run_adoption_agency(token) {
                    Outcome::Consumed
                } else {
                    self.any_other_end_tag(token)
                }
            }

            // "A start tag whose tag name is one of: "applet", "marquee",
            // "object""
            TokenView::StartTag("applet" | "marquee" | "object") => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                // "Insert a marker at the end of the list of active formatting
                // elements."
                self.push_formatting_marker();
                self.frameset_ok = false;
                Outcome::Consumed
            }

            // "An end tag token whose tag name is one of: "applet", "marquee",
            // "object""
            TokenView::EndTag(name @ ("applet" | "marquee" | "object")) => {
                if !self.has_element_in_scope(K::from_name(name)) {
                    return self.ignore_unexpected(token);
                }
                let outcome = self.close_element_in_scope(token, K::from_name(name), None);
                // "Clear the list of active formatting elements up to the last
                // marker."
                self.clear_active_formatting_elements_to_last_marker();
                outcome
            }

            // "A start tag whose tag name is "table""
            TokenView::StartTag("table") => {
                // "If the Document is not set to quirks mode, and the stack of
                // open elements has a p element in button scope, then close a p
                // element."
                if self.quirks_mode != QuirksMode::Quirks {
                    self.close_p_element_in_button_scope();
                }
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::InTable;
                Outcome::Consumed
            }

            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as
            // described in the next entry; i.e. act as if this was a "br"
            // start tag token with no attributes, rather than the end tag
            // token that it actually is."
            TokenView::EndTag("br") => {
                self.report_unexpected(token);
                self.handle_in_body_mode(&Token::implied_start_tag("br"))
            }

            // "A start tag whose tag name is one of: "area", "br", "embed",
            // "img", "keygen", "wbr""
            TokenView::StartTag("area" | "br" | "embed" | "img" | "keygen" | "wbr") => {
                self.reconstruct_active_formatting_elements();
                self.insert_void_element(token);
                self.frameset_ok = false;
                Outcome::Consumed
            }

            // "A start tag whose tag name is "input""
            TokenView::StartTag("input") => {
                self.reconstruct_active_formatting_elements();
                self.insert_void_element(token);
                // "If the token does not have an attribute with the name
                // "type", or if it does, but that attribute's value is not an
                // ASCII case-insensitive match for the string "hidden", then:
                // set the frameset-ok flag to "not ok"."
                let hidden = token
                    .attributes()
                    .and_then(|attributes| attributes.get("type"))
                    .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden"));
                if !hidden {
                    self.frameset_ok = false;
                }
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "param", "source", "track""
            TokenView::StartTag("param" | "source" | "track") => {
                self.insert_void_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is "hr""
            TokenView::StartTag("hr") => {
                self.close_p_element_in_button_scope();
                self.insert_void_element(token);
                self.frameset_ok = false;
                Outcome::Consumed
            }

            // "A start tag whose tag name is "image""
            // "Parse error. Change the token's tag name to "img" and reprocess
            // it. (Don't ask.)"
            TokenView::StartTag("image") => {
                self.report_unexpected(token);
                let img = Token::SelfCloseTag {
                    name: K::Img.name().to_owned(),
                    attributes: token.attributes().cloned().unwrap_or_default(),
                    self_closing: token.is_self_closing(),
                };
                self.handle_in_body_mode(&img)
            }

            // "A start tag whose tag name is "textarea""
            TokenView::StartTag("textarea") => {
                let outcome = self.parse_text_element(token, ContentModel::Rcdata);
                self.ignore_next_line_feed = true;
                self.frameset_ok = false;
                outcome
            }

            // "A start tag whose tag name is "xmp""
            TokenView::StartTag("xmp") => {
                self.close_p_element_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_element(token, ContentModel::RawText)
            }

            // "A start tag whose tag name is "iframe""
            TokenView::StartTag("iframe") => {
                self.frameset_ok = false;
                self.parse_text_element(token, ContentModel::RawText)
            }

            // "A start tag whose tag name is "noembed""
            // "A start tag whose tag name is "noscript", if the scripting flag
            // is enabled"
            // "Follow the generic raw text element parsing algorithm."
            TokenView::StartTag("noembed") => self.parse_text_element(token, ContentModel::RawText),
            TokenView::StartTag("noscript") if self.scripting_enabled => {
                self.parse_text_element(token, ContentModel::RawText)
            }

            // "A start tag whose tag name is "select""
            TokenView::StartTag("select") => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption",
                // "in table body", "in row", or "in cell", then switch the
                // insertion mode to "in select in table". Otherwise, switch the
                // insertion mode to "in select"."
                self.insertion_mode = match self.insertion_mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "optgroup", "option""
            TokenView::StartTag("optgroup" | "option") => {
                // "If the current node is an option element, then pop the
                // current node off the stack of open elements."
                if self.current_node_is(K::Option) {
                    self.pop_current_node();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "rb", "rtc""
            TokenView::StartTag("rb" | "rtc") => {
                if self.has_element_in_scope(K::Ruby) {
                    self.generate_implied_end_tags(None);
                    if !self.current_node_is(K::Ruby) {
                        self.report_unexpected(token);
                    }
                }
                let _ = self.insert_html_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "rp", "rt""
            TokenView::StartTag("rp" | "rt") => {
                if self.has_element_in_scope(K::Ruby) {
                    self.generate_implied_end_tags(Some(K::Rtc));
                    if !self.current_node_is_one_of(&[K::Rtc, K::Ruby]) {
                        self.report_unexpected(token);
                    }
                }
                let _ = self.insert_html_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is "math""
            // "A start tag whose tag name is "svg""
            // "Reconstruct the active formatting elements, if any. Adjust
            // MathML attributes for the token. (This fixes the case of MathML
            // attributes that are not all lowercase.) Adjust foreign
            // attributes for the token. Insert a foreign element for the
            // token, with MathML namespace and false."
            TokenView::StartTag(name @ ("math" | "svg")) => {
                self.reconstruct_active_formatting_elements();
                let namespace = if name == "math" {
                    Namespace::MathMl
                } else {
                    Namespace::Svg
                };
                self.insert_foreign_element(token, namespace);
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "frame", "head", "tbody", "td", "tfoot", "th",
            // "thead", "tr""
            // "Parse error. Ignore the token."
            TokenView::StartTag(
                "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot" | "th"
                | "thead" | "tr",
            ) => self.ignore_unexpected(token),

            // "Any other start tag"
            // "Reconstruct the active formatting elements, if any. Insert an
            // HTML element for the token."
            TokenView::StartTag(_) => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                Outcome::Consumed
            }

            // "Any other end tag"
            TokenView::EndTag(_) => self.any_other_end_tag(token),
        }
    }

    /// The "any other end tag" steps of the in body insertion mode.
    pub(in crate::parser) fn any_other_end_tag(&mut self, token: &Token) -> Outcome {
        let Some(name) = token.tag_name() else {
            return Outcome::Consumed;
        };

        // STEP 1: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            let Some(element) = self.tree.as_element(node) else {
                continue;
            };
            let same_name = element.namespace == Namespace::Html && element.tag_name == name;
            let special = element.is_special();

            // STEP 2: "Loop: If node is an HTML element with the same tag name
            //          as the token, then:"
            if same_name {
                // STEP 2.1: "Generate implied end tags, except for HTML
                //            elements with the same tag name as the token."
                self.generate_implied_end_tags(Some(ElementKind::from_name(name)));
                // STEP 2.2: "If node is not the current node, then this is a
                //            parse error."
                if self.current_node() != Some(node) {
                    self.report_unexpected(token);
                }
                // STEP 2.3: "Pop all the nodes from the current node up to
                //            node, including node, then stop these steps."
                self.stack_of_open_elements.truncate(index);
                return Outcome::Consumed;
            }

            // STEP 3: "Otherwise, if node is in the special category, then this
            //          is a parse error; ignore the token, and return."
            if special {
                return self.ignore_unexpected(token);
            }
            // STEP 4: "Set node to the previous entry in the stack of open
            //          elements." STEP 5: "Return to the step labeled loop."
        }
        Outcome::Consumed
    }

    /// Drop NUL characters from a run of character tokens, recording one
    /// parse error for the run if any were present.
    pub(in crate::parser) fn strip_null_characters<'a>(&mut self, text: &'a str) -> Cow<'a, str> {
        if text.contains('\0') {
            self.parse_error("unexpected-null-character");
            Cow::Owned(text.replace('\0', ""))
        } else {
            Cow::Borrowed(text)
        }
    }

    /// "Reconstruct the active formatting elements, if any. Insert an HTML
    /// element for the token. Push onto the list of active formatting elements
    /// that element."
    fn insert_formatting_element(&mut self, token: &Token) {
        self.reconstruct_active_formatting_elements();
        let element = self.insert_html_element(token);
        self.push_active_formatting_element(element);
    }

    /// Shared steps of the `li`, `dd` and `dt` start tags: close the nearest
    /// open list item of one of `kinds`, stopping at special elements other
    /// than `address`, `div` and `p`, then close any `p` in button scope.
    fn close_open_list_item(&mut self, kinds: &[ElementKind]) {
        // STEP 1: "Initialize node to be the current node."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            let Some(element) = self.tree.as_element(node) else {
                continue;
            };

            // STEP 2: "Loop: If node is an li element, then run these substeps:
            //          Generate implied end tags, except for li elements. If
            //          the current node is not an li element, then this is a
            //          parse error. Pop elements from the stack of open
            //          elements until an li element has been popped from the
            //          stack. Jump to the step labeled done below."
            if element.is_one_of(kinds) {
                let kind = element.kind;
                self.generate_implied_end_tags(Some(kind));
                if !self.current_node_is(kind) {
                    self.parse_error(format!("unclosed elements inside {kind}"));
                }
                self.pop_until(kind);
                break;
            }

            // STEP 3: "If node is in the special category, but is not an
            //          address, div, or p element, then jump to the step
            //          labeled done below."
            if element.is_special()
                && !element.is_one_of(&[ElementKind::Address, ElementKind::Div, ElementKind::P])
            {
                break;
            }
            // STEP 4: "Otherwise, set node to the previous entry in the stack
            //          of open elements and return to the step labeled loop."
        }

        // STEP 5: "Done: If the stack of open elements has a p element in
        //          button scope, then close a p element."
        self.close_p_element_in_button_scope();
    }

    /// "If the stack of open elements does not have an element in scope that
    /// is an HTML element with the same tag name as that of the token, then
    /// this is a parse error; ignore the token. Otherwise: Generate implied
    /// end tags. If the current node is not an HTML element with the same tag
    /// name as that of the token, then this is a parse error. Pop elements
    /// from the stack of open elements until an HTML element with the same
    /// tag name as the token has been popped from the stack."
    fn close_element_in_scope(
        &mut self,
        token: &Token,
        kind: ElementKind,
        except: Option<ElementKind>,
    ) -> Outcome {
        if !self.has_element_in_scope(kind) {
            return self.ignore_unexpected(token);
        }
        self.generate_implied_end_tags(except);
        if !self.current_node_is(kind) {
            self.report_unexpected(token);
        }
        self.pop_until(kind);
        Outcome::Consumed
    }

    /// "An end tag whose tag name is "form""
    fn close_form_element(&mut self, token: &Token) -> Outcome {
        // "If there is no template element on the stack of open elements, then
        // run these substeps:"
        if !self.stack_contains(ElementKind::Template) {
            // STEP 1: "Let node be the element that the form element pointer
            //          is set to, or null if it is not set to an element."
            // STEP 2: "Set the form element pointer to null."
            let node = self.form_element_pointer.take();
            // STEP 3: "If node is null or if the stack of open elements does
            //          not have node in scope, then this is a parse error;
            //          return and ignore the token."
            let Some(node) = node.filter(|&node| self.has_node_in_scope(node)) else {
                return self.ignore_unexpected(token);
            };
            // STEP 4: "Generate implied end tags."
            self.generate_implied_end_tags(None);
            // STEP 5: "If the current node is not node, then this is a parse
            //          error."
            if self.current_node() != Some(node) {
                self.report_unexpected(token);
            }
            // STEP 6: "Remove node from the stack of open elements."
            self.remove_from_stack(node);
            return Outcome::Consumed;
        }

        // "If there is a template element on the stack of open elements, then
        // run these substeps instead:"
        self.close_element_in_scope(token, ElementKind::Form, None)
    }

    /// Record a parse error if anything other than the elements that close
    /// implicitly at the end of the body is still open.
    fn report_elements_left_open(&mut self) {
        let left_open = self.stack_of_open_elements.iter().find_map(|&id| {
            self.tree
                .as_element(id)
                .filter(|element| !element.is_one_of(CLOSABLE_AT_END_OF_BODY))
                .map(|element| element.tag_name.clone())
        });
        if let Some(name) = left_open {
            self.parse_error(format!("end of body with unclosed <{name}> element"));
        }
    }
}
