//! "in head", "in head noscript" and "after head".

use marten_dom::{ContentModel, ElementKind};

use crate::parser::core::{HTMLParser, InsertionMode, Outcome, TokenView};
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(in crate::parser) fn handle_in_head_mode(&mut self, token: &Token) -> Outcome {
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

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            //
            // "A start tag whose tag name is "meta""
            // Same steps; the charset sniffing that follows them does not apply
            // once the input is decoded.
            TokenView::StartTag("base" | "basefont" | "bgsound" | "link" | "meta") => {
                self.insert_void_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is "title""
            // "Follow the generic RCDATA element parsing algorithm."
            TokenView::StartTag("title") => self.parse_text_element(token, ContentModel::Rcdata),

            // "A start tag whose tag name is "noscript", if the scripting flag
            // is enabled"
            // "A start tag whose tag name is one of: "noframes", "style""
            // "Follow the generic raw text element parsing algorithm."
            TokenView::StartTag("noscript") if self.scripting_enabled => {
                self.parse_text_element(token, ContentModel::RawText)
            }
            TokenView::StartTag("noframes" | "style") => {
                self.parse_text_element(token, ContentModel::RawText)
            }

            // "A start tag whose tag name is "noscript", if the scripting flag
            // is disabled"
            // "Insert an HTML element for the token."
            // "Switch the insertion mode to "in head noscript"."
            TokenView::StartTag("noscript") => {
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InHeadNoscript;
                Outcome::Consumed
            }

            // "A start tag whose tag name is "script""
            // Insert the element at the appropriate place, "Switch the tokenizer
            // to the script data state", remember the original insertion mode
            // and "Switch the insertion mode to "text"." Scripts never run, so
            // the parser-inserted and already-started flags have no effect.
            TokenView::StartTag("script") => self.parse_text_element(token, ContentModel::ScriptData),

            // "An end tag whose tag name is "head""
            // "Pop the current node (which will be the head element) off the
            // stack of open elements."
            // "Switch the insertion mode to "after head"."
            TokenView::EndTag("head") => {
                self.pop_current_node();
                self.insertion_mode = InsertionMode::AfterHead;
                Outcome::Consumed
            }

            // "An end tag whose tag name is one of: "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            TokenView::EndTag("body" | "html" | "br") => self.in_head_anything_else(),

            // "A start tag whose tag name is "template""
            TokenView::StartTag("template") => {
                // "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
                // "Insert a marker at the end of the list of active formatting
                // elements."
                self.push_formatting_marker();
                // "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
                // "Switch the insertion mode to "in template"."
                self.insertion_mode = InsertionMode::InTemplate;
                // "Push "in template" onto the stack of template insertion
                // modes so that it is the new current template insertion mode."
                self.template_insertion_modes.push(InsertionMode::InTemplate);
                Outcome::Consumed
            }

            // "An end tag whose tag name is "template""
            TokenView::EndTag("template") => {
                // "If there is no template element on the stack of open
                // elements, then this is a parse error; ignore the token."
                if !self.stack_contains(ElementKind::Template) {
                    return self.ignore_unexpected(token);
                }
                // "Generate all implied end tags thoroughly."
                self.generate_all_implied_end_tags_thoroughly();
                // "If the current node is not a template element, then this is
                // a parse error."
                if !self.current_node_is(ElementKind::Template) {
                    self.report_unexpected(token);
                }
                // "Pop elements from the stack of open elements until a
                // template element has been popped from the stack."
                self.pop_until(ElementKind::Template);
                // "Clear the list of active formatting elements up to the last
                // marker."
                self.clear_active_formatting_elements_to_last_marker();
                // "Pop the current template insertion mode off the stack of
                // template insertion modes."
                let _ = self.template_insertion_modes.pop();
                // "Reset the insertion mode appropriately."
                self.reset_insertion_mode_appropriately();
                Outcome::Consumed
            }

            // "A start tag whose tag name is "head""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            TokenView::StartTag("head") | TokenView::EndTag(_) => self.ignore_unexpected(token),

            _ => self.in_head_anything_else(),
        }
    }

    /// "Anything else": "Pop the current node (which will be the head element)
    /// off the stack of open elements. Switch the insertion mode to "after
    /// head". Reprocess the token."
    fn in_head_anything_else(&mut self) -> Outcome {
        self.pop_current_node();
        self.reprocess_in(InsertionMode::AfterHead)
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(in crate::parser) fn handle_in_head_noscript_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            TokenView::Doctype => self.ignore_unexpected(token),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            TokenView::StartTag("html") => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "noscript""
            // "Pop the current node (which will be a noscript element) from the
            // stack of open elements; the new current node will be a head
            // element."
            // "Switch the insertion mode to "in head"."
            TokenView::EndTag("noscript") => {
                self.pop_current_node();
                self.insertion_mode = InsertionMode::InHead;
                Outcome::Consumed
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "A comment token"
            // "A start tag whose tag name is one of: "basefont", "bgsound",
            // "link", "meta", "noframes", "style""
            // "Process the token using the rules for the "in head" insertion mode."
            TokenView::Whitespace(_)
            | TokenView::Comment(_)
            | TokenView::StartTag("basefont" | "bgsound" | "link" | "meta" | "noframes" | "style") => {
                self.handle_in_head_mode(token)
            }

            // "An end tag whose tag name is "br""
            // "Act as described in the "anything else" entry below."
            TokenView::EndTag("br") => self.in_head_noscript_anything_else(token),

            // "A start tag whose tag name is one of: "head", "noscript""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            TokenView::StartTag("head" | "noscript") | TokenView::EndTag(_) => {
                self.ignore_unexpected(token)
            }

            _ => self.in_head_noscript_anything_else(token),
        }
    }

    /// "Anything else": "Parse error. Pop the current node (which will be a
    /// noscript element) from the stack of open elements; the new current node
    /// will be a head element. Switch the insertion mode to "in head".
    /// Reprocess the token."
    fn in_head_noscript_anything_else(&mut self, token: &Token) -> Outcome {
        self.report_unexpected(token);
        self.pop_current_node();
        self.reprocess_in(InsertionMode::InHead)
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(in crate::parser) fn handle_after_head_mode(&mut self, token: &Token) -> Outcome {
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

            // "A start tag whose tag name is "body""
            // "Insert an HTML element for the token."
            // "Set the frameset-ok flag to "not ok"."
            // "Switch the insertion mode to "in body"."
            TokenView::StartTag("body") => {
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::InBody;
                Outcome::Consumed
            }

            // "A start tag whose tag name is "frameset""
            // "Insert an HTML element for the token."
            // "Switch the insertion mode to "in frameset"."
            TokenView::StartTag("frameset") => {
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InFrameset;
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link", "meta", "noframes", "script", "style",
            // "template", "title""
            TokenView::StartTag(
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                | "style" | "template" | "title",
            ) => {
                // "Parse error."
                self.report_unexpected(token);
                // "Push the node pointed to by the head element pointer onto the
                // stack of open elements."
                let Some(head) = self.head_element_pointer else {
                    return self.handle_in_head_mode(token);
                };
                self.stack_of_open_elements.push(head);
                // "Process the token using the rules for the "in head" insertion
                // mode."
                let outcome = self.handle_in_head_mode(token);
                // "Remove the node pointed to by the head element pointer from
                // the stack of open elements. (It might not be the current node
                // at this point.)"
                self.remove_from_stack(head);
                outcome
            }

            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            TokenView::EndTag("template") => self.handle_in_head_mode(token),

            // "An end tag whose tag name is one of: "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            TokenView::EndTag("body" | "html" | "br") => self.after_head_anything_else(),

            // "A start tag whose tag name is "head""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            TokenView::StartTag("head") | TokenView::EndTag(_) => self.ignore_unexpected(token),

            _ => self.after_head_anything_else(),
        }
    }

    /// "Anything else": "Insert an HTML element for a "body" start tag token
    /// with no attributes. Switch the insertion mode to "in body". Reprocess
    /// the current token."
    fn after_head_anything_else(&mut self) -> Outcome {
        let _ = self.insert_implied_element("body");
        self.reprocess_in(InsertionMode::InBody)
    }
}
