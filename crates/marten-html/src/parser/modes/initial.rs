//! The three insertion modes that run before the head.

use marten_dom::{AttributesMap, DoctypeData, ElementKind, Namespace, NodeId, QuirksMode};

use crate::parser::core::{HTMLParser, InsertionMode, Outcome, TokenView};
use crate::parser::quirks::classify_doctype;
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(in crate::parser) fn handle_initial_mode(&mut self, token: &Token) -> Outcome {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            Token::Whitespace { .. } => Outcome::Consumed,

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { text } => {
                self.insert_comment(text, Some(NodeId::ROOT));
                Outcome::Consumed
            }

            // "A DOCTYPE token"
            Token::Doctype {
                name,
                public_id,
                system_id,
                force_quirks,
            } => {
                // "If the DOCTYPE token's name is not "html", or the token's
                // public identifier is not missing, or the token's system
                // identifier is neither missing nor "about:legacy-compat", then
                // there is a parse error."
                if name.as_deref() != Some("html")
                    || public_id.is_some()
                    || system_id
                        .as_deref()
                        .is_some_and(|id| id != "about:legacy-compat")
                {
                    self.parse_error(format!("unexpected {token}"));
                }

                // "Append a DocumentType node to the Document node, with its
                // name set to the name given in the DOCTYPE token, or the empty
                // string if the name was missing; its public ID set to the
                // public identifier given in the DOCTYPE token, or the empty
                // string if the public identifier was missing; and its system
                // ID set to the system identifier given in the DOCTYPE token,
                // or the empty string if the system identifier was missing."
                self.append_doctype(DoctypeData {
                    name: name.clone().unwrap_or_default(),
                    public_id: public_id.clone().unwrap_or_default(),
                    system_id: system_id.clone().unwrap_or_default(),
                });

                // "Then, if the document is not an iframe srcdoc document, and
                // the parser cannot change the mode flag is false, and the
                // DOCTYPE token matches one of the conditions in the following
                // list, then set the Document to quirks mode ..."
                self.quirks_mode = classify_doctype(
                    name.as_deref(),
                    public_id.as_deref(),
                    system_id.as_deref(),
                    *force_quirks,
                );

                // "Then, switch the insertion mode to "before html"."
                self.insertion_mode = InsertionMode::BeforeHtml;
                Outcome::Consumed
            }

            // "Anything else"
            // "If the document is not an iframe srcdoc document, then this is a
            // parse error; if the parser cannot change the mode flag is false,
            // set the Document to quirks mode."
            // "In any case, switch the insertion mode to "before html", then
            // reprocess the token."
            _ => {
                self.parse_error("missing DOCTYPE");
                self.quirks_mode = QuirksMode::Quirks;
                self.reprocess_in(InsertionMode::BeforeHtml)
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(in crate::parser) fn handle_before_html_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            TokenView::Doctype => self.ignore_unexpected(token),

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            TokenView::Comment(text) => {
                self.insert_comment(text, Some(NodeId::ROOT));
                Outcome::Consumed
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Ignore the token."
            TokenView::Whitespace(_) => Outcome::Consumed,

            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the
            // Document as the intended parent. Append it to the Document
            // object. Put this element in the stack of open elements."
            // "Switch the insertion mode to "before head"."
            TokenView::StartTag("html") => {
                let html = self.create_element_for_token(token, Namespace::Html);
                self.tree.append_child(NodeId::ROOT, html);
                self.stack_of_open_elements.push(html);
                self.insertion_mode = InsertionMode::BeforeHead;
                Outcome::Consumed
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            TokenView::EndTag("head" | "body" | "html" | "br") => self.before_html_anything_else(),

            // "Any other end tag"
            // "Parse error. Ignore the token."
            TokenView::EndTag(_) => self.ignore_unexpected(token),

            _ => self.before_html_anything_else(),
        }
    }

    /// "Anything else": "Create an html element whose node document is the
    /// Document object. Append it to the Document object. Put this element in
    /// the stack of open elements. Switch the insertion mode to "before head",
    /// then reprocess the token."
    fn before_html_anything_else(&mut self) -> Outcome {
        let html = self.create_element(
            ElementKind::Html.name(),
            AttributesMap::new(),
            Namespace::Html,
        );
        self.tree.append_child(NodeId::ROOT, html);
        self.stack_of_open_elements.push(html);
        self.reprocess_in(InsertionMode::BeforeHead)
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(in crate::parser) fn handle_before_head_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Ignore the token."
            TokenView::Whitespace(_) => Outcome::Consumed,

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

            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token."
            // "Set the head element pointer to the newly created head element."
            // "Switch the insertion mode to "in head"."
            TokenView::StartTag("head") => {
                let head = self.insert_html_element(token);
                self.head_element_pointer = Some(head);
                self.insertion_mode = InsertionMode::InHead;
                Outcome::Consumed
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            TokenView::EndTag("head" | "body" | "html" | "br") => self.before_head_anything_else(),

            // "Any other end tag"
            // "Parse error. Ignore the token."
            TokenView::EndTag(_) => self.ignore_unexpected(token),

            _ => self.before_head_anything_else(),
        }
    }

    /// "Anything else": "Insert an HTML element for a "head" start tag token
    /// with no attributes. Set the head element pointer to the newly created
    /// head element. Switch the insertion mode to "in head". Reprocess the
    /// current token."
    fn before_head_anything_else(&mut self) -> Outcome {
        let head = self.insert_implied_element("head");
        self.head_element_pointer = Some(head);
        self.reprocess_in(InsertionMode::InHead)
    }
}
