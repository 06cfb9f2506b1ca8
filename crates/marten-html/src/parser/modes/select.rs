use marten_dom::ElementKind;

use crate::parser::core::{HTMLParser, Outcome, TokenView};
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(in crate::parser) fn handle_in_select_mode(&mut self, token: &Token) -> Outcome {
        use ElementKind as K;

        match TokenView::of(token) {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            // "Any other character token"
            // "Insert the token's character."
            TokenView::Data(text) => {
                let text = self.strip_null_characters(text);
                self.insert_characters(&text);
                Outcome::Consumed
            }
            TokenView::Whitespace(text) => {
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
            // "Process the token using the rules for the "in body" insertion mode."
            TokenView::StartTag("html") => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "option""
            // "If the current node is an option element, pop that node from the
            // stack of open elements. Insert an HTML element for the token."
            TokenView::StartTag("option") => {
                if self.current_node_is(K::Option) {
                    self.pop_current_node();
                }
                let _ = self.insert_html_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is "optgroup""
            // "A start tag whose tag name is "hr""
            // "If the current node is an option element, pop that node from the
            // stack of open elements. If the current node is an optgroup
            // element, pop that node from the stack of open elements. Insert an
            // HTML element for the token." An hr is popped again right away.
            TokenView::StartTag(name @ ("optgroup" | "hr")) => {
                if self.current_node_is(K::Option) {
                    self.pop_current_node();
                }
                if self.current_node_is(K::Optgroup) {
                    self.pop_current_node();
                }
                if name == "hr" {
                    self.insert_void_element(token);
                } else {
                    let _ = self.insert_html_element(token);
                }
                Outcome::Consumed
            }

            // "An end tag whose tag name is "optgroup""
            TokenView::EndTag("optgroup") => {
                // "First, if the current node is an option element, and the node
                // immediately before it in the stack of open elements is an
                // optgroup element, then pop the current node from the stack of
                // open elements."
                let length = self.stack_of_open_elements.len();
                if length >= 2
                    && self.current_node_is(K::Option)
                    && self.node_is(self.stack_of_open_elements[length - 2], K::Optgroup)
                {
                    self.pop_current_node();
                }
                // "If the current node is an optgroup element, then pop that
                // node from the stack of open elements. Otherwise, this is a
                // parse error; ignore the token."
                if self.current_node_is(K::Optgroup) {
                    self.pop_current_node();
                    Outcome::Consumed
                } else {
                    self.ignore_unexpected(token)
                }
            }

            // "An end tag whose tag name is "option""
            // "If the current node is an option element, then pop that node
            // from the stack of open elements. Otherwise, this is a parse
            // error; ignore the token."
            TokenView::EndTag("option") => {
                if self.current_node_is(K::Option) {
                    self.pop_current_node();
                    Outcome::Consumed
                } else {
                    self.ignore_unexpected(token)
                }
            }

            // "An end tag whose tag name is "select""
            TokenView::EndTag("select") => {
                // "If the stack of open elements does not have a select element
                // in select scope, this is a parse error; ignore the token."
                if !self.has_element_in_select_scope(K::Select) {
                    return self.ignore_unexpected(token);
                }
                // "Otherwise: Pop elements from the stack of open elements
                // until a select element has been popped from the stack. Reset
                // the insertion mode appropriately."
                self.close_select();
                Outcome::Consumed
            }

            // "A start tag whose tag name is "select""
            // "Parse error. If the stack of open elements does not have a
            // select element in select scope, ignore the token. Otherwise: Pop
            // elements from the stack of open elements until a select element
            // has been popped from the stack. Reset the insertion mode
            // appropriately."
            TokenView::StartTag("select") => {
                self.report_unexpected(token);
                if self.has_element_in_select_scope(K::Select) {
                    self.close_select();
                }
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "input", "keygen",
            // "textarea""
            // Same as above, then "Reprocess the token."
            TokenView::StartTag("input" | "keygen" | "textarea") => {
                self.report_unexpected(token);
                if !self.has_element_in_select_scope(K::Select) {
                    return Outcome::Consumed;
                }
                self.close_select();
                Outcome::Reprocess
            }

            // "A start tag whose tag name is one of: "script", "template""
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            TokenView::StartTag("script" | "template") | TokenView::EndTag("template") => {
                self.handle_in_head_mode(token)
            }

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion mode."
            TokenView::Eof => self.handle_in_body_mode(token),

            // "Anything else"
            // "Parse error. Ignore the token."
            TokenView::StartTag(_) | TokenView::EndTag(_) => self.ignore_unexpected(token),
        }
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(in crate::parser) fn handle_in_select_in_table_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A start tag whose tag name is one of: "caption", "table",
            // "tbody", "tfoot", "thead", "tr", "td", "th""
            // "Parse error. Pop elements from the stack of open elements until
            // a select element has been popped from the stack. Reset the
            // insertion mode appropriately. Reprocess the token."
            TokenView::StartTag(
                "caption" | "table" | "tbody" | "tfoot" | "thead" | "tr" | "td" | "th",
            ) => {
                self.report_unexpected(token);
                self.close_select();
                Outcome::Reprocess
            }

            // "An end tag whose tag name is one of: "caption", "table",
            // "tbody", "tfoot", "thead", "tr", "td", "th""
            TokenView::EndTag(
                name @ ("caption" | "table" | "tbody" | "tfoot" | "thead" | "tr" | "td" | "th"),
            ) => {
                // "Parse error."
                self.report_unexpected(token);
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name as
                // that of the token, then ignore the token."
                if !self.has_element_in_table_scope(ElementKind::from_name(name)) {
                    return Outcome::Consumed;
                }
                // "Otherwise: Pop elements from the stack of open elements
                // until a select element has been popped from the stack. Reset
                // the insertion mode appropriately. Reprocess the token."
                self.close_select();
                Outcome::Reprocess
            }

            // "Anything else"
            // "Process the token using the rules for the "in select" insertion mode."
            _ => self.handle_in_select_mode(token),
        }
    }

    fn close_select(&mut self) {
        self.pop_until(ElementKind::Select);
        self.reset_insertion_mode_appropriately();
    }
}
