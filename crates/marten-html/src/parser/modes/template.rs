use marten_dom::ElementKind;

use crate::parser::core::{HTMLParser, InsertionMode, Outcome, TokenView};
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    ///
    /// Template contents are kept as ordinary children of the `template`
    /// element.
    pub(in crate::parser) fn handle_in_template_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A character token"
            // "A comment token"
            // "A DOCTYPE token"
            // "Process the token using the rules for the "in body" insertion mode."
            TokenView::Whitespace(_)
            | TokenView::Data(_)
            | TokenView::Comment(_)
            | TokenView::Doctype => self.handle_in_body_mode(token),

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

            // "A start tag whose tag name is one of: "caption", "colgroup",
            // "tbody", "tfoot", "thead""
            TokenView::StartTag("caption" | "colgroup" | "tbody" | "tfoot" | "thead") => {
                self.switch_template_mode(InsertionMode::InTable)
            }

            // "A start tag whose tag name is "col""
            TokenView::StartTag("col") => self.switch_template_mode(InsertionMode::InColumnGroup),

            // "A start tag whose tag name is "tr""
            TokenView::StartTag("tr") => self.switch_template_mode(InsertionMode::InTableBody),

            // "A start tag whose tag name is one of: "td", "th""
            TokenView::StartTag("td" | "th") => self.switch_template_mode(InsertionMode::InRow),

            // "Any other start tag"
            TokenView::StartTag(_) => self.switch_template_mode(InsertionMode::InBody),

            // "Any other end tag"
            // "Parse error. Ignore the token."
            TokenView::EndTag(_) => self.ignore_unexpected(token),

            // "An end-of-file token"
            TokenView::Eof => {
                // "If there is no template element on the stack of open
                // elements, then stop parsing."
                if !self.stack_contains(ElementKind::Template) {
                    return self.stop_parsing();
                }
                // "Otherwise, this is a parse error."
                self.parse_error("end of file inside template");
                // "Pop elements from the stack of open elements until a
                // template element has been popped from the stack. Clear the
                // list of active formatting elements up to the last marker. Pop
                // the current template insertion mode off the stack of template
                // insertion modes. Reset the insertion mode appropriately.
                // Reprocess the token."
                self.pop_until(ElementKind::Template);
                self.clear_active_formatting_elements_to_last_marker();
                let _ = self.template_insertion_modes.pop();
                self.reset_insertion_mode_appropriately();
                Outcome::Reprocess
            }
        }
    }

    /// "Pop the current template insertion mode off the stack of template
    /// insertion modes. Push `mode` onto the stack of template insertion modes
    /// so that it is the new current template insertion mode. Switch the
    /// insertion mode to `mode`, and reprocess the token."
    fn switch_template_mode(&mut self, mode: InsertionMode) -> Outcome {
        let _ = self.template_insertion_modes.pop();
        self.template_insertion_modes.push(mode);
        self.reprocess_in(mode)
    }
}
