//! Foreign content parsing support for SVG and MathML.
//!
//! [§ 13.2.6.3 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)

pub mod mathml;
pub mod svg;

pub use mathml::adjust_mathml_attributes;
pub use svg::{adjust_svg_attributes, adjust_svg_tag_name};

use marten_dom::{ElementKind, Namespace};

use super::core::{
    HTMLParser, Outcome, TokenView, is_html_integration_point, is_mathml_text_integration_point,
};
use crate::tokenizer::Token;

/// Whether a start tag in foreign content pops back out to HTML content.
///
/// "A start tag whose tag name is one of: "b", "big", "blockquote", "body",
/// "br", "center", "code", "dd", "div", "dl", "dt", "em", "embed", "h1", "h2",
/// "h3", "h4", "h5", "h6", "head", "hr", "i", "img", "li", "listing", "menu",
/// "meta", "nobr", "ol", "p", "pre", "ruby", "s", "small", "span", "strong",
/// "strike", "sub", "sup", "table", "tt", "u", "ul", "var""
/// "A start tag whose tag name is "font", if the token has any attributes
/// named "color", "face", or "size""
fn is_breakout_start_tag(name: &str, token: &Token) -> bool {
    match name {
        "b" | "big" | "blockquote" | "body" | "br" | "center" | "code" | "dd" | "div" | "dl"
        | "dt" | "em" | "embed" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "head" | "hr"
        | "i" | "img" | "li" | "listing" | "menu" | "meta" | "nobr" | "ol" | "p" | "pre"
        | "ruby" | "s" | "small" | "span" | "strong" | "strike" | "sub" | "sup" | "table"
        | "tt" | "u" | "ul" | "var" => true,
        "font" => token.attributes().is_some_and(|attributes| {
            ["color", "face", "size"]
                .iter()
                .any(|name| attributes.contains(name))
        }),
        _ => false,
    }
}

impl HTMLParser {
    /// [§ 13.2.6.1 Insert a foreign element](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// Applies the MathML or SVG attribute adjustments (and the SVG tag name
    /// fix-ups), inserts the element in `namespace`, and pops it again when
    /// the token is self-closing.
    pub(in crate::parser) fn insert_foreign_element(&mut self, token: &Token, namespace: Namespace) {
        let mut name = token.tag_name().unwrap_or_default();
        let mut attributes = token.attributes().cloned().unwrap_or_default();
        match namespace {
            Namespace::MathMl => adjust_mathml_attributes(&mut attributes),
            Namespace::Svg => {
                name = adjust_svg_tag_name(name);
                adjust_svg_attributes(&mut attributes);
            }
            Namespace::Html => {}
        }

        let location = self.appropriate_place_for_inserting(None);
        let element = self.create_element(name, attributes, namespace);
        self.insert_node_at(location, element);
        self.stack_of_open_elements.push(element);

        // "If the token has its self-closing flag set, pop the current node
        // off the stack of open elements and acknowledge the token's
        // self-closing flag."
        if token.is_self_closing() {
            self.pop_current_node();
        }
    }

    /// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    pub(in crate::parser) fn handle_foreign_content(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A character token that is U+0000 NULL"
            // "Parse error. Insert a U+FFFD REPLACEMENT CHARACTER character."
            // "Any other character token"
            // "Insert the token's character. Set the frameset-ok flag to "not
            // ok"."
            TokenView::Data(text) => {
                if text.contains('\0') {
                    self.parse_error("unexpected-null-character");
                    self.insert_characters(&text.replace('\0', "\u{FFFD}"));
                } else {
                    self.insert_characters(text);
                }
                if text.chars().any(|c| c != '\0') {
                    self.frameset_ok = false;
                }
                Outcome::Consumed
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the token's character."
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

            // Breakout start tags, and "An end tag whose tag name is "br", "p"":
            // "Parse error. While the current node is not a MathML text
            // integration point, an HTML integration point, or an element in
            // the HTML namespace, pop elements from the stack of open elements.
            // Reprocess the token according to the rules given in the section
            // corresponding to the current insertion mode in HTML content."
            TokenView::StartTag(name) if is_breakout_start_tag(name, token) => {
                self.break_out_of_foreign_content(token)
            }
            TokenView::EndTag("br" | "p") => self.break_out_of_foreign_content(token),

            // "Any other start tag"
            TokenView::StartTag(_) => {
                // "If the adjusted current node is an element in the MathML
                // namespace, adjust MathML attributes for the token. If the
                // adjusted current node is an element in the SVG namespace,
                // and the token's tag name is one of the ones in the first
                // column of the following table, change the tag name ... adjust
                // SVG attributes for the token. Adjust foreign attributes for
                // the token. Insert a foreign element for the token, with
                // adjusted current node's namespace and false."
                let namespace = self
                    .adjusted_current_node()
                    .and_then(|id| self.tree.as_element(id))
                    .map_or(Namespace::Html, |element| element.namespace);
                self.insert_foreign_element(token, namespace);
                Outcome::Consumed
            }

            // "An end tag whose tag name is "script", if the current node is an
            // SVG script element"
            // "Pop the current node off the stack of open elements." The
            // script is not processed.
            TokenView::EndTag("script")
                if self.current_element().is_some_and(|element| {
                    element.namespace == Namespace::Svg && element.kind == ElementKind::Script
                }) =>
            {
                self.pop_current_node();
                Outcome::Consumed
            }

            // "Any other end tag"
            TokenView::EndTag(name) => self.foreign_end_tag(name, token),

            // End of file always uses the HTML rules.
            TokenView::Eof => self.process_using_rules_for(self.insertion_mode, token),
        }
    }

    fn break_out_of_foreign_content(&mut self, token: &Token) -> Outcome {
        self.report_unexpected(token);
        while let Some(element) = self.current_element()
            && element.namespace != Namespace::Html
            && !is_mathml_text_integration_point(element)
            && !is_html_integration_point(element)
        {
            self.pop_current_node();
        }
        self.process_using_rules_for(self.insertion_mode, token)
    }

    /// "Any other end tag" in foreign content: walk up the stack looking for
    /// an element with a matching tag name, handing over to the HTML rules
    /// once an HTML element is reached.
    fn foreign_end_tag(&mut self, name: &str, token: &Token) -> Outcome {
        let tag_name_matches = |parser: &Self, index: usize| {
            parser
                .tree
                .as_element(parser.stack_of_open_elements[index])
                .is_some_and(|element| element.tag_name.eq_ignore_ascii_case(name))
        };
        let Some(mut index) = self.stack_of_open_elements.len().checked_sub(1) else {
            return Outcome::Consumed;
        };

        // STEP 1-2: "Initialize node to be the current node. If node's tag
        //            name, converted to ASCII lowercase, is not the same as the
        //            tag name of the token, then this is a parse error."
        if !tag_name_matches(self, index) {
            self.report_unexpected(token);
        }

        loop {
            // STEP 3: "Loop: If node is the topmost element in the stack of
            //          open elements, then return."
            if index == 0 {
                return Outcome::Consumed;
            }
            // STEP 4: "If node's tag name, converted to ASCII lowercase, is the
            //          same as the tag name of the token, pop elements from the
            //          stack of open elements until node has been popped from
            //          the stack, and then return."
            if tag_name_matches(self, index) {
                self.stack_of_open_elements.truncate(index);
                return Outcome::Consumed;
            }
            // STEP 5: "Set node to the previous entry in the stack of open
            //          elements."
            index -= 1;
            // STEP 6: "If node is not an element in the HTML namespace, return
            //          to the step labeled loop."
            // STEP 7: "Otherwise, process the token according to the rules
            //          given in the section corresponding to the current
            //          insertion mode in HTML content."
            let is_html = self
                .tree
                .as_element(self.stack_of_open_elements[index])
                .is_some_and(|element| element.namespace == Namespace::Html);
            if is_html {
                return self.process_using_rules_for(self.insertion_mode, token);
            }
        }
    }
}
