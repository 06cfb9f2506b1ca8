//! Modes that run once the body or frameset has been closed, plus the
//! frameset modes.

use marten_dom::{ElementKind, NodeId};

use crate::parser::core::{HTMLParser, InsertionMode, Outcome, TokenView};
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(in crate::parser) fn handle_after_body_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Process the token using the rules for the "in body" insertion mode."
            TokenView::Whitespace(_) => self.handle_in_body_mode(token),

            // "A comment token"
            // "Insert a comment as the last child of the first element in the
            // stack of open elements (the html element)."
            TokenView::Comment(text) => {
                let html = self
                    .stack_of_open_elements
                    .first()
                    .copied()
                    .unwrap_or(NodeId::ROOT);
                self.insert_comment(text, Some(html));
                Outcome::Consumed
            }

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            TokenView::Doctype => self.ignore_unexpected(token),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            TokenView::StartTag("html") => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after body"."
            TokenView::EndTag("html") => {
                self.insertion_mode = InsertionMode::AfterAfterBody;
                Outcome::Consumed
            }

            // "An end-of-file token"
            // "Stop parsing."
            TokenView::Eof => self.stop_parsing(),

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and
            // reprocess the token."
            _ => {
                self.report_unexpected(token);
                self.reprocess_in(InsertionMode::InBody)
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(in crate::parser) fn handle_in_frameset_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the character."
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

            // "A start tag whose tag name is "frameset""
            // "Insert an HTML element for the token."
            TokenView::StartTag("frameset") => {
                let _ = self.insert_html_element(token);
                Outcome::Consumed
            }

            // "An end tag whose tag name is "frameset""
            TokenView::EndTag("frameset") => {
                // "If the current node is the root html element, then this is a
                // parse error; ignore the token."
                if self.stack_of_open_elements.len() <= 1 {
                    return self.ignore_unexpected(token);
                }
                // "Otherwise, pop the current node from the stack of open
                // elements."
                self.pop_current_node();
                // "If the parser was not created as part of the HTML fragment
                // parsing algorithm, and the current node is no longer a
                // frameset element, then switch the insertion mode to "after
                // frameset"."
                if !self.current_node_is(ElementKind::Frameset) {
                    self.insertion_mode = InsertionMode::AfterFrameset;
                }
                Outcome::Consumed
            }

            // "A start tag whose tag name is "frame""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            TokenView::StartTag("frame") => {
                self.insert_void_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is "noframes""
            // "Process the token using the rules for the "in head" insertion mode."
            TokenView::StartTag("noframes") => self.handle_in_head_mode(token),

            // "An end-of-file token"
            // "If the current node is not the root html element, then this is a
            // parse error. Stop parsing."
            TokenView::Eof => {
                if self.stack_of_open_elements.len() > 1 {
                    self.parse_error("end of file inside frameset");
                }
                self.stop_parsing()
            }

            // "Anything else"
            // "Parse error. Ignore the token."
            TokenView::Data(text) => self.ignore_non_whitespace(text),
            TokenView::StartTag(_) | TokenView::EndTag(_) => self.ignore_unexpected(token),
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(in crate::parser) fn handle_after_frameset_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the character."
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

            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after frameset"."
            TokenView::EndTag("html") => {
                self.insertion_mode = InsertionMode::AfterAfterFrameset;
                Outcome::Consumed
            }

            // "A start tag whose tag name is "noframes""
            // "Process the token using the rules for the "in head" insertion mode."
            TokenView::StartTag("noframes") => self.handle_in_head_mode(token),

            // "An end-of-file token"
            // "Stop parsing."
            TokenView::Eof => self.stop_parsing(),

            // "Anything else"
            // "Parse error. Ignore the token."
            TokenView::Data(text) => self.ignore_non_whitespace(text),
            TokenView::StartTag(_) | TokenView::EndTag(_) => self.ignore_unexpected(token),
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(in crate::parser) fn handle_after_after_body_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            TokenView::Comment(text) => {
                self.insert_comment(text, Some(NodeId::ROOT));
                Outcome::Consumed
            }

            // "A DOCTYPE token"
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            TokenView::Doctype | TokenView::Whitespace(_) | TokenView::StartTag("html") => {
                self.handle_in_body_mode(token)
            }

            // "An end-of-file token"
            // "Stop parsing."
            TokenView::Eof => self.stop_parsing(),

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and
            // reprocess the token."
            _ => {
                self.report_unexpected(token);
                self.reprocess_in(InsertionMode::InBody)
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(in crate::parser) fn handle_after_after_frameset_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            TokenView::Comment(text) => {
                self.insert_comment(text, Some(NodeId::ROOT));
                Outcome::Consumed
            }

            // "A DOCTYPE token"
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            TokenView::Doctype | TokenView::Whitespace(_) | TokenView::StartTag("html") => {
                self.handle_in_body_mode(token)
            }

            // "An end-of-file token"
            // "Stop parsing."
            TokenView::Eof => self.stop_parsing(),

            // "A start tag whose tag name is "noframes""
            // "Process the token using the rules for the "in head" insertion mode."
            TokenView::StartTag("noframes") => self.handle_in_head_mode(token),

            // "Anything else"
            // "Parse error. Ignore the token."
            TokenView::Data(text) => self.ignore_non_whitespace(text),
            TokenView::StartTag(_) | TokenView::EndTag(_) => self.ignore_unexpected(token),
        }
    }

    /// Non-whitespace characters in the frameset modes are a parse error and
    /// are dropped.
    fn ignore_non_whitespace(&mut self, text: &str) -> Outcome {
        self.parse_error(format!(
            "unexpected characters {text:?} in {} insertion mode",
            self.insertion_mode
        ));
        Outcome::Consumed
    }
}
