//! Table insertion modes: "in table", "in table text", "in caption",
//! "in column group", "in table body", "in row" and "in cell".

use marten_dom::ElementKind;

use crate::parser::core::{HTMLParser, InsertionMode, Outcome, TokenView};
use crate::tokenizer::Token;

const TABLE_SECTIONS: &[ElementKind] = &[ElementKind::Tbody, ElementKind::Thead, ElementKind::Tfoot];

impl HTMLParser {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(in crate::parser) fn handle_in_table_mode(&mut self, token: &Token) -> Outcome {
        use ElementKind as K;

        match TokenView::of(token) {
            // "A character token, if the current node is table, tbody,
            // template, tfoot, thead, or tr element"
            TokenView::Whitespace(_) | TokenView::Data(_)
                if self.current_node_is_one_of(&[
                    K::Table,
                    K::Tbody,
                    K::Template,
                    K::Tfoot,
                    K::Thead,
                    K::Tr,
                ]) =>
            {
                // "Let the pending table character tokens be an empty list of
                // tokens. Let the original insertion mode be the current
                // insertion mode. Switch the insertion mode to "in table text"
                // and reprocess the token."
                self.pending_table_character_tokens.clear();
                self.original_insertion_mode = Some(self.insertion_mode);
                self.reprocess_in(InsertionMode::InTableText)
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

            // "A start tag whose tag name is "caption""
            TokenView::StartTag("caption") => {
                // "Clear the stack back to a table context. Insert a marker at
                // the end of the list of active formatting elements. Insert an
                // HTML element for the token, then switch the insertion mode
                // to "in caption"."
                self.clear_stack_back_to_table_context();
                self.push_formatting_marker();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InCaption;
                Outcome::Consumed
            }

            // "A start tag whose tag name is "colgroup""
            TokenView::StartTag("colgroup") => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InColumnGroup;
                Outcome::Consumed
            }

            // "A start tag whose tag name is "col""
            // "Clear the stack back to a table context. Insert an HTML element
            // for a "colgroup" start tag token with no attributes, then switch
            // the insertion mode to "in column group". Reprocess the current
            // token."
            TokenView::StartTag("col") => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_implied_element("colgroup");
                self.reprocess_in(InsertionMode::InColumnGroup)
            }

            // "A start tag whose tag name is one of: "tbody", "tfoot", "thead""
            TokenView::StartTag("tbody" | "tfoot" | "thead") => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InTableBody;
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "td", "th", "tr""
            // "Clear the stack back to a table context. Insert an HTML element
            // for a "tbody" start tag token with no attributes, then switch the
            // insertion mode to "in table body". Reprocess the current token."
            TokenView::StartTag("td" | "th" | "tr") => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_implied_element("tbody");
                self.reprocess_in(InsertionMode::InTableBody)
            }

            // "A start tag whose tag name is "table""
            TokenView::StartTag("table") => {
                // "Parse error."
                self.report_unexpected(token);
                // "If the stack of open elements does not have a table element
                // in table scope, ignore the token."
                if !self.has_element_in_table_scope(K::Table) {
                    return Outcome::Consumed;
                }
                // "Otherwise: Pop elements from this stack until a table
                // element has been popped from the stack. Reset the insertion
                // mode appropriately. Reprocess the token."
                self.pop_until(K::Table);
                self.reset_insertion_mode_appropriately();
                Outcome::Reprocess
            }

            // "An end tag whose tag name is "table""
            TokenView::EndTag("table") => {
                if !self.has_element_in_table_scope(K::Table) {
                    return self.ignore_unexpected(token);
                }
                self.pop_until(K::Table);
                self.reset_insertion_mode_appropriately();
                Outcome::Consumed
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            TokenView::EndTag(
                "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th"
                | "thead" | "tr",
            ) => self.ignore_unexpected(token),

            // "A start tag whose tag name is one of: "style", "script",
            // "template""
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            TokenView::StartTag("style" | "script" | "template") | TokenView::EndTag("template") => {
                self.handle_in_head_mode(token)
            }

            // "A start tag whose tag name is "input""
            // "If the token does not have an attribute with the name "type", or
            // if it does, but that attribute's value is not an ASCII
            // case-insensitive match for the string "hidden", then: act as
            // described in the "anything else" entry below."
            // "Otherwise: Parse error. Insert an HTML element for the token.
            // Pop that input element off the stack of open elements.
            // Acknowledge the token's self-closing flag, if it is set."
            TokenView::StartTag("input")
                if token
                    .attributes()
                    .and_then(|attributes| attributes.get("type"))
                    .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden")) =>
            {
                self.report_unexpected(token);
                self.insert_void_element(token);
                Outcome::Consumed
            }

            // "A start tag whose tag name is "form""
            TokenView::StartTag("form") => {
                // "Parse error."
                self.report_unexpected(token);
                // "If there is a template element on the stack of open
                // elements, or if the form element pointer is not null, ignore
                // the token."
                if self.stack_contains(K::Template) || self.form_element_pointer.is_some() {
                    return Outcome::Consumed;
                }
                // "Otherwise: Insert an HTML element for the token, and set the
                // form element pointer to point to the element created. Pop
                // that form element off the stack of open elements."
                let form = self.insert_html_element(token);
                self.form_element_pointer = Some(form);
                self.pop_current_node();
                Outcome::Consumed
            }

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion mode."
            TokenView::Eof => self.handle_in_body_mode(token),

            _ => self.in_table_anything_else(token),
        }
    }

    /// "Anything else": "Parse error. Enable foster parenting, process the
    /// token using the rules for the "in body" insertion mode, and then
    /// disable foster parenting."
    fn in_table_anything_else(&mut self, token: &Token) -> Outcome {
        self.report_unexpected(token);
        self.foster_parenting = true;
        let outcome = self.handle_in_body_mode(token);
        self.foster_parenting = false;
        outcome
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(in crate::parser) fn handle_in_table_text_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            // "Any other character token"
            // "Append the character token to the pending table character
            // tokens list."
            TokenView::Data(text) => {
                let text = self.strip_null_characters(text);
                if !text.is_empty() {
                    self.pending_table_character_tokens.push(Token::Data {
                        text: text.into_owned(),
                    });
                }
                Outcome::Consumed
            }
            TokenView::Whitespace(_) => {
                self.pending_table_character_tokens.push(token.clone());
                Outcome::Consumed
            }

            // "Anything else"
            _ => {
                let pending = std::mem::take(&mut self.pending_table_character_tokens);

                // "If any of the tokens in the pending table character tokens
                // list are character tokens that are not ASCII whitespace, then
                // this is a parse error: reprocess the character tokens in the
                // pending table character tokens list using the rules given in
                // the "anything else" entry in the "in table" insertion mode."
                if pending.iter().any(|pending| matches!(pending, Token::Data { .. })) {
                    for pending in &pending {
                        match self.in_table_anything_else(pending) {
                            Outcome::Consumed | Outcome::Reprocess => {}
                            failure @ Outcome::Failure(_) => return failure,
                        }
                    }
                } else {
                    // "Otherwise, insert the characters given by the pending
                    // table character tokens list."
                    for pending in &pending {
                        if let Token::Whitespace { text } = pending {
                            self.insert_characters(text);
                        }
                    }
                }

                // "Switch the insertion mode to the original insertion mode and
                // reprocess the token."
                let mode = self.take_original_insertion_mode();
                self.reprocess_in(mode)
            }
        }
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(in crate::parser) fn handle_in_caption_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "An end tag whose tag name is "caption""
            TokenView::EndTag("caption") => {
                if self.close_caption(token) {
                    self.insertion_mode = InsertionMode::InTable;
                }
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "An end tag whose tag name is "table""
            TokenView::StartTag(
                "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr",
            )
            | TokenView::EndTag("table") => {
                // Same steps as the caption end tag, then "Reprocess the token."
                if self.close_caption(token) {
                    self.reprocess_in(InsertionMode::InTable)
                } else {
                    Outcome::Consumed
                }
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup",
            // "html", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            TokenView::EndTag(
                "body" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th" | "thead"
                | "tr",
            ) => self.ignore_unexpected(token),

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.handle_in_body_mode(token),
        }
    }

    /// Close the open caption. Returns false when there is none in table
    /// scope and the token was ignored.
    fn close_caption(&mut self, token: &Token) -> bool {
        // STEP 1: "If the stack of open elements does not have a caption
        //          element in table scope, this is a parse error; ignore the
        //          token."
        if !self.has_element_in_table_scope(ElementKind::Caption) {
            self.report_unexpected(token);
            return false;
        }
        // STEP 2: "Generate implied end tags."
        self.generate_implied_end_tags(None);
        // STEP 3: "Now, if the current node is not a caption element, then
        //          this is a parse error."
        if !self.current_node_is(ElementKind::Caption) {
            self.report_unexpected(token);
        }
        // STEP 4: "Pop elements from this stack until a caption element has
        //          been popped from the stack."
        self.pop_until(ElementKind::Caption);
        // STEP 5: "Clear the list of active formatting elements up to the last
        //          marker."
        self.clear_active_formatting_elements_to_last_marker();
        true
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    pub(in crate::parser) fn handle_in_column_group_mode(&mut self, token: &Token) -> Outcome {
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

            // "A start tag whose tag name is "col""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            TokenView::StartTag("col") => {
                self.insert_void_element(token);
                Outcome::Consumed
            }

            // "An end tag whose tag name is "colgroup""
            TokenView::EndTag("colgroup") => {
                // "If the current node is not a colgroup element, then this is
                // a parse error; ignore the token."
                if !self.current_node_is(ElementKind::Colgroup) {
                    return self.ignore_unexpected(token);
                }
                // "Otherwise, pop the current node from the stack of open
                // elements. Switch the insertion mode to "in table"."
                self.pop_current_node();
                self.insertion_mode = InsertionMode::InTable;
                Outcome::Consumed
            }

            // "An end tag whose tag name is "col""
            // "Parse error. Ignore the token."
            TokenView::EndTag("col") => self.ignore_unexpected(token),

            // "A start tag whose tag name is "template""
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            TokenView::StartTag("template") | TokenView::EndTag("template") => {
                self.handle_in_head_mode(token)
            }

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion mode."
            TokenView::Eof => self.handle_in_body_mode(token),

            // "Anything else"
            _ => {
                // "If the current node is not a colgroup element, then this is
                // a parse error; ignore the token."
                if !self.current_node_is(ElementKind::Colgroup) {
                    return self.ignore_unexpected(token);
                }
                // "Otherwise, pop the current node from the stack of open
                // elements. Switch the insertion mode to "in table". Reprocess
                // the token."
                self.pop_current_node();
                self.reprocess_in(InsertionMode::InTable)
            }
        }
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    pub(in crate::parser) fn handle_in_table_body_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A start tag whose tag name is "tr""
            // "Clear the stack back to a table body context. Insert an HTML
            // element for the token, then switch the insertion mode to "in
            // row"."
            TokenView::StartTag("tr") => {
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InRow;
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "th", "td""
            // "Parse error. Clear the stack back to a table body context.
            // Insert an HTML element for a "tr" start tag token with no
            // attributes, then switch the insertion mode to "in row".
            // Reprocess the current token."
            TokenView::StartTag("th" | "td") => {
                self.report_unexpected(token);
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_implied_element("tr");
                self.reprocess_in(InsertionMode::InRow)
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            TokenView::EndTag(name @ ("tbody" | "tfoot" | "thead")) => {
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name
                // as the token, this is a parse error; ignore the token."
                if !self.has_element_in_table_scope(ElementKind::from_name(name)) {
                    return self.ignore_unexpected(token);
                }
                // "Otherwise: Clear the stack back to a table body context. Pop
                // the current node from the stack of open elements. Switch the
                // insertion mode to "in table"."
                self.clear_stack_back_to_table_body_context();
                self.pop_current_node();
                self.insertion_mode = InsertionMode::InTable;
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead""
            // "An end tag whose tag name is "table""
            TokenView::StartTag("caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead")
            | TokenView::EndTag("table") => {
                // "If the stack of open elements does not have a tbody, thead,
                // or tfoot element in table scope, this is a parse error;
                // ignore the token."
                if !TABLE_SECTIONS
                    .iter()
                    .any(|&kind| self.has_element_in_table_scope(kind))
                {
                    return self.ignore_unexpected(token);
                }
                // "Otherwise: Clear the stack back to a table body context. Pop
                // the current node from the stack of open elements. Switch the
                // insertion mode to "in table". Reprocess the token."
                self.clear_stack_back_to_table_body_context();
                self.pop_current_node();
                self.reprocess_in(InsertionMode::InTable)
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th", "tr""
            // "Parse error. Ignore the token."
            TokenView::EndTag(
                "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr",
            ) => self.ignore_unexpected(token),

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.handle_in_table_mode(token),
        }
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    pub(in crate::parser) fn handle_in_row_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A start tag whose tag name is one of: "th", "td""
            // "Clear the stack back to a table row context. Insert an HTML
            // element for the token, then switch the insertion mode to "in
            // cell". Insert a marker at the end of the list of active
            // formatting elements."
            TokenView::StartTag("th" | "td") => {
                self.clear_stack_back_to_table_row_context();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InCell;
                self.push_formatting_marker();
                Outcome::Consumed
            }

            // "An end tag whose tag name is "tr""
            TokenView::EndTag("tr") => {
                if self.close_row(token) {
                    self.insertion_mode = InsertionMode::InTableBody;
                }
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead", "tr""
            // "An end tag whose tag name is "table""
            TokenView::StartTag("caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr")
            | TokenView::EndTag("table") => {
                if self.close_row(token) {
                    self.reprocess_in(InsertionMode::InTableBody)
                } else {
                    Outcome::Consumed
                }
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            TokenView::EndTag(name @ ("tbody" | "tfoot" | "thead")) => {
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name
                // as the token, this is a parse error; ignore the token."
                if !self.has_element_in_table_scope(ElementKind::from_name(name)) {
                    return self.ignore_unexpected(token);
                }
                // "If the stack of open elements does not have a tr element in
                // table scope, ignore the token."
                if !self.has_element_in_table_scope(ElementKind::Tr) {
                    return Outcome::Consumed;
                }
                // "Otherwise: Clear the stack back to a table row context. Pop
                // the current node (which will be a tr element) from the stack
                // of open elements. Switch the insertion mode to "in table
                // body". Reprocess the token."
                self.clear_stack_back_to_table_row_context();
                self.pop_current_node();
                self.reprocess_in(InsertionMode::InTableBody)
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th""
            // "Parse error. Ignore the token."
            TokenView::EndTag("body" | "caption" | "col" | "colgroup" | "html" | "td" | "th") => {
                self.ignore_unexpected(token)
            }

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.handle_in_table_mode(token),
        }
    }

    /// Close the open row. Returns false when there is no tr in table scope
    /// and the token was ignored.
    fn close_row(&mut self, token: &Token) -> bool {
        // STEP 1: "If the stack of open elements does not have a tr element in
        //          table scope, this is a parse error; ignore the token."
        if !self.has_element_in_table_scope(ElementKind::Tr) {
            self.report_unexpected(token);
            return false;
        }
        // STEP 2: "Clear the stack back to a table row context."
        self.clear_stack_back_to_table_row_context();
        // STEP 3: "Pop the current node (which will be a tr element) from the
        //          stack of open elements."
        self.pop_current_node();
        true
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(in crate::parser) fn handle_in_cell_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "An end tag whose tag name is one of: "td", "th""
            TokenView::EndTag(name @ ("td" | "th")) => {
                let kind = ElementKind::from_name(name);
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name as
                // that of the token, then this is a parse error; ignore the
                // token."
                if !self.has_element_in_table_scope(kind) {
                    return self.ignore_unexpected(token);
                }
                // "Otherwise: Generate implied end tags. Now, if the current
                // node is not an HTML element with the same tag name as the
                // token, then this is a parse error. Pop elements from the
                // stack of open elements stack until an HTML element with the
                // same tag name as the token has been popped from the stack.
                // Clear the list of active formatting elements up to the last
                // marker. Switch the insertion mode to "in row"."
                self.generate_implied_end_tags(None);
                if !self.current_node_is(kind) {
                    self.report_unexpected(token);
                }
                self.pop_until(kind);
                self.clear_active_formatting_elements_to_last_marker();
                self.insertion_mode = InsertionMode::InRow;
                Outcome::Consumed
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            TokenView::StartTag(
                "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr",
            ) => {
                // "Assert: The stack of open elements has a td or th element in
                // table scope."
                if !self.has_element_in_table_scope(ElementKind::Td)
                    && !self.has_element_in_table_scope(ElementKind::Th)
                {
                    return self.ignore_unexpected(token);
                }
                // "Close the cell and reprocess the token."
                self.close_the_cell();
                Outcome::Reprocess
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html""
            // "Parse error. Ignore the token."
            TokenView::EndTag("body" | "caption" | "col" | "colgroup" | "html") => {
                self.ignore_unexpected(token)
            }

            // "An end tag whose tag name is one of: "table", "tbody", "tfoot",
            // "thead", "tr""
            TokenView::EndTag(name @ ("table" | "tbody" | "tfoot" | "thead" | "tr")) => {
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name as
                // that of the token, then this is a parse error; ignore the
                // token."
                if !self.has_element_in_table_scope(ElementKind::from_name(name)) {
                    return self.ignore_unexpected(token);
                }
                // "Otherwise, close the cell and reprocess the token."
                self.close_the_cell();
                Outcome::Reprocess
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.handle_in_body_mode(token),
        }
    }
}
