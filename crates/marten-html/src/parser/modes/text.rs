use crate::parser::core::{HTMLParser, InsertionMode, Outcome, TokenView};
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    ///
    /// Used for the contents of `script`, `style`, `title`, `textarea` and the
    /// other elements parsed as raw text or RCDATA.
    pub(in crate::parser) fn handle_text_mode(&mut self, token: &Token) -> Outcome {
        match TokenView::of(token) {
            // "A character token"
            // "Insert the token's character."
            TokenView::Whitespace(text) | TokenView::Data(text) => {
                self.insert_characters(text);
                Outcome::Consumed
            }

            // "An end-of-file token"
            // "Parse error. If the current node is a script element, then set
            // its already started to true. Pop the current node off the stack
            // of open elements. Switch the insertion mode to the original
            // insertion mode and reprocess the token."
            TokenView::Eof => {
                self.parse_error("end of file inside a text element");
                self.pop_current_node();
                let mode = self.take_original_insertion_mode();
                self.reprocess_in(mode)
            }

            // "An end tag whose tag name is "script""
            // "Any other end tag"
            // "Pop the current node off the stack of open elements. Switch the
            // insertion mode to the original insertion mode."
            //
            // Scripts are never executed, so the script end tag needs none of
            // the preparation steps.
            TokenView::EndTag(_) => {
                self.pop_current_node();
                self.insertion_mode = self.take_original_insertion_mode();
                Outcome::Consumed
            }

            // The tokenizer only produces character tokens and end tags in the
            // text content models.
            TokenView::Doctype | TokenView::Comment(_) | TokenView::StartTag(_) => {
                self.ignore_unexpected(token)
            }
        }
    }

    /// Take the original insertion mode, falling back to "in body".
    pub(in crate::parser) fn take_original_insertion_mode(&mut self) -> InsertionMode {
        self.original_insertion_mode
            .take()
            .unwrap_or(InsertionMode::InBody)
    }
}
