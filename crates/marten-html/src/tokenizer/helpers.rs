//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! - State transitions ("Switch to", "Reconsume in")
//! - Token emission ("Emit the current token"), including character run coalescing
//! - RCDATA/RAWTEXT/script data end tag helpers
//! - Parse error recording

use marten_common::warning::warn_once;
use marten_dom::{ElementKind, is_void};

use super::core::{HTMLTokenizer, TextRun, TokenizerState};
use super::token::{TagBuilder, Token};
use crate::error::{LexicalError, ParseIssue};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF),
    /// U+000C FORM FEED (FF), U+0020 SPACE". CR never reaches the tokenizer.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current input character as a character token."
    ///
    /// Adjacent characters of the same kind are merged into one
    /// [`Token::Whitespace`] or [`Token::Data`] run.
    pub(super) fn emit_char(&mut self, c: char) {
        let run = if Self::is_whitespace_char(c) {
            TextRun::Whitespace
        } else {
            TextRun::Data
        };
        if self.pending_run != Some(run) {
            self.flush_text();
            self.pending_run = Some(run);
        }
        self.pending_text.push(c);
    }

    /// Emit each character of `s` as a character token.
    pub(super) fn emit_str(&mut self, s: &str) {
        for c in s.chars() {
            self.emit_char(c);
        }
    }

    /// "This is an unexpected-null-character parse error. Emit a U+FFFD
    /// REPLACEMENT CHARACTER character token."
    pub(super) fn emit_replacement_character(&mut self) {
        self.parse_error(LexicalError::UnexpectedNullCharacter);
        self.emit_char('\u{FFFD}');
    }

    /// Close the current character run, if any.
    pub(super) fn flush_text(&mut self) {
        let Some(run) = self.pending_run.take() else {
            return;
        };
        let text = std::mem::take(&mut self.pending_text);
        self.queue.push_back(match run {
            TextRun::Whitespace => Token::Whitespace { text },
            TextRun::Data => Token::Data { text },
        });
    }

    /// Queue a non-character token behind any pending character run.
    pub(super) fn push_token(&mut self, token: Token) {
        self.flush_text();
        self.queue.push_back(token);
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof(&mut self) {
        self.push_token(Token::EndOfFile);
        self.finished = true;
    }

    /// EOF inside a tag: record `eof-in-tag`, then emit the tag with the name
    /// and attributes gathered so far, followed by end-of-file.
    pub(super) fn emit_tag_at_eof(&mut self) {
        self.parse_error(LexicalError::EofInTag);
        self.emit_current_tag();
        self.emit_eof();
    }

    /// "Emit the current comment token."
    pub(super) fn emit_current_comment(&mut self) {
        let text = std::mem::take(&mut self.current_comment);
        self.push_token(Token::Comment { text });
    }

    /// "Emit the current DOCTYPE token."
    pub(super) fn emit_current_doctype(&mut self) {
        let doctype = std::mem::take(&mut self.current_doctype);
        self.push_token(doctype.into_token());
    }

    /// "Emit the current tag token."
    ///
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
    /// "When an end tag token is emitted with attributes, that is an
    /// end-tag-with-attributes parse error. When an end tag token is emitted
    /// with its self-closing flag set, that is an end-tag-with-trailing-solidus
    /// parse error."
    pub(super) fn emit_current_tag(&mut self) {
        if !self.current_tag.commit_attribute() {
            self.parse_error(LexicalError::DuplicateAttribute);
        }
        let tag = std::mem::take(&mut self.current_tag);

        if tag.is_end {
            if tag.had_attributes {
                self.parse_error(LexicalError::EndTagWithAttributes);
            }
            if tag.self_closing {
                self.parse_error(LexicalError::EndTagWithTrailingSolidus);
            }
            self.push_token(Token::CloseTag { name: tag.name });
            return;
        }

        self.last_start_tag_name = Some(tag.name.clone());
        if self.self_driving {
            let model = ElementKind::from_name(&tag.name).content_model(false);
            self.switch_content_model(model);
        }

        let token = if is_void(&tag.name) {
            Token::SelfCloseTag {
                name: tag.name,
                attributes: tag.attributes,
                self_closing: tag.self_closing,
            }
        } else {
            Token::OpenTag {
                name: tag.name,
                attributes: tag.attributes,
                self_closing: tag.self_closing,
            }
        };
        self.push_token(token);
    }
}

// =============================================================================
// Text-Content End Tag Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        self.current_tag.is_end
            && self
                .last_start_tag_name
                .as_deref()
                .is_some_and(|last| last == self.current_tag.name)
    }

    /// "Anything else":
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer (in the order they were added to the buffer). Reconsume in the
    /// RCDATA state."
    ///
    /// Shared by the RCDATA, RAWTEXT, script data and script data escaped
    /// end tag name states; `text_state` is where to reconsume.
    pub(super) fn emit_end_tag_name_anything_else(&mut self, text_state: TokenizerState) {
        self.emit_str("</");
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.emit_str(&buffer);
        self.current_tag = TagBuilder::start_tag();
        self.reconsume_in(text_state);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Start a new attribute in the current tag token."
    ///
    /// Completing the previous attribute is where duplicates are caught:
    /// "if there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token."
    pub(super) fn start_new_attribute(&mut self, first: Option<char>) {
        if !self.current_tag.start_attribute(first) {
            self.parse_error(LexicalError::DuplicateAttribute);
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Record a parse error at the current input position. Parse errors in
    /// HTML are not fatal; the calling state performs the recovery.
    pub(super) fn parse_error(&mut self, code: LexicalError) {
        let issue = ParseIssue::new(code.to_string(), self.input.current_position());
        if self.log_issues {
            let _ = warn_once("HTML Tokenizer", &issue.to_string());
        }
        self.issues.push(issue);
    }
}
