//! Markup declarations: comments, DOCTYPEs and CDATA sections.
//!
//! [§ 13.2.5.41](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
//! through [§ 13.2.5.71](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state).

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::DoctypeBuilder;
use crate::error::LexicalError;

// =============================================================================
// Comments
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            None => {
                self.emit_current_comment();
                self.emit_eof();
            }
            Some('\0') => {
                self.parse_error(LexicalError::UnexpectedNullCharacter);
                self.current_comment.push('\u{FFFD}');
            }
            Some(c) => self.current_comment.push(c),
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Looks ahead without consuming the current character first.
    pub(super) fn handle_markup_declaration_open_state(&mut self) {
        // "Two U+002D HYPHEN-MINUS characters (-)"
        // "Consume those two characters, create a comment token whose data is the
        // empty string, and switch to the comment start state."
        if self.input.starts_with("--") {
            self.input.skip(2);
            self.current_comment.clear();
            self.switch_to(TokenizerState::CommentStart);
        }
        // "ASCII case-insensitive match for the word "DOCTYPE""
        // "Consume those characters and switch to the DOCTYPE state."
        else if self.input.starts_with_ignore_ascii_case("DOCTYPE") {
            self.input.skip(7);
            self.current_doctype = DoctypeBuilder::default();
            self.switch_to(TokenizerState::Doctype);
        }
        // "The string "[CDATA[" (the five uppercase letters "CDATA" with a
        // U+005B LEFT SQUARE BRACKET character before and after)"
        else if self.input.starts_with("[CDATA[") {
            self.input.skip(7);
            // "If there is an adjusted current node and it is not an element in
            // the HTML namespace, then switch to the CDATA section state.
            // Otherwise, this is a cdata-in-html-content parse error. Create a
            // comment token whose data is the "[CDATA[" string. Switch to the
            // bogus comment state."
            if self.cdata_allowed {
                self.switch_to(TokenizerState::CdataSection);
            } else {
                self.parse_error(LexicalError::CdataInHtmlContent);
                self.current_comment = String::from("[CDATA[");
                self.switch_to(TokenizerState::BogusComment);
            }
        }
        // "Anything else"
        // "This is an incorrectly-opened-comment parse error. Create a comment
        // token whose data is the empty string. Switch to the bogus comment state
        // (don't consume anything in the current state)."
        else {
            self.parse_error(LexicalError::IncorrectlyOpenedComment);
            self.current_comment.clear();
            self.switch_to(TokenizerState::BogusComment);
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            // "This is an abrupt-closing-of-empty-comment parse error. Switch to
            // the data state. Emit the current comment token."
            Some('>') => {
                self.parse_error(LexicalError::AbruptClosingOfEmptyComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('>') => {
                self.parse_error(LexicalError::AbruptClosingOfEmptyComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.current_comment.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.current_comment.push('<');
                self.switch_to(TokenizerState::CommentLessThanSign);
            }
            Some('-') => self.switch_to(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.parse_error(LexicalError::UnexpectedNullCharacter);
                self.current_comment.push('\u{FFFD}');
            }
            None => self.eof_in_comment(),
            Some(c) => self.current_comment.push(c),
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    pub(super) fn handle_comment_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('!') => {
                self.current_comment.push('!');
                self.switch_to(TokenizerState::CommentLessThanSignBang);
            }
            Some('<') => self.current_comment.push('<'),
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    pub(super) fn handle_comment_less_than_sign_bang_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_to(TokenizerState::CommentLessThanSignBangDash);
        } else {
            self.reconsume_in(TokenizerState::Comment);
        }
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_to(TokenizerState::CommentLessThanSignBangDashDash);
        } else {
            self.reconsume_in(TokenizerState::CommentEndDash);
        }
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_dash_state(&mut self) {
        match self.current_input_character {
            Some('>') | None => self.reconsume_in(TokenizerState::CommentEnd),
            // "This is a nested-comment parse error. Reconsume in the comment end state."
            Some(_) => {
                self.parse_error(LexicalError::NestedComment);
                self.reconsume_in(TokenizerState::CommentEnd);
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            None => self.eof_in_comment(),
            Some(_) => {
                self.current_comment.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            Some('!') => self.switch_to(TokenizerState::CommentEndBang),
            Some('-') => self.current_comment.push('-'),
            None => self.eof_in_comment(),
            // "Append two U+002D HYPHEN-MINUS characters (-) to the comment
            // token's data. Reconsume in the comment state."
            Some(_) => {
                self.current_comment.push_str("--");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(super) fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.current_comment.push_str("--!");
                self.switch_to(TokenizerState::CommentEndDash);
            }
            Some('>') => {
                self.parse_error(LexicalError::IncorrectlyClosedComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.current_comment.push_str("--!");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// "This is an eof-in-comment parse error. Emit the current comment token.
    /// Emit an end-of-file token."
    fn eof_in_comment(&mut self) {
        self.parse_error(LexicalError::EofInComment);
        self.emit_current_comment();
        self.emit_eof();
    }
}

// =============================================================================
// DOCTYPE
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDoctypeName);
            }
            Some('>') => self.reconsume_in(TokenizerState::BeforeDoctypeName),
            // "This is an eof-in-doctype parse error. Create a new DOCTYPE token.
            // Set its force-quirks flag to on. Emit the current token. Emit an
            // end-of-file token."
            None => self.eof_in_doctype(),
            Some(_) => {
                self.parse_error(LexicalError::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDoctypeName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('\0') => {
                self.parse_error(LexicalError::UnexpectedNullCharacter);
                self.current_doctype.name = Some(String::from('\u{FFFD}'));
                self.switch_to(TokenizerState::DoctypeName);
            }
            // "This is a missing-doctype-name parse error. Create a new DOCTYPE
            // token. Set its force-quirks flag to on. Switch to the data state.
            // Emit the current token."
            Some('>') => {
                self.parse_error(LexicalError::MissingDoctypeName);
                self.current_doctype.force_quirks = true;
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                self.current_doctype.name = Some(String::from(c.to_ascii_lowercase()));
                self.switch_to(TokenizerState::DoctypeName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDoctypeName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some('\0') => {
                self.parse_error(LexicalError::UnexpectedNullCharacter);
                self.current_doctype
                    .name
                    .get_or_insert_with(String::new)
                    .push('\u{FFFD}');
            }
            None => self.eof_in_doctype(),
            Some(c) => self
                .current_doctype
                .name
                .get_or_insert_with(String::new)
                .push(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                // "If the six characters starting from the current input character
                // are an ASCII case-insensitive match for the word "PUBLIC", then
                // consume those characters and switch to the after DOCTYPE public
                // keyword state."
                if c.eq_ignore_ascii_case(&'p') && self.input.starts_with_ignore_ascii_case("UBLIC") {
                    self.input.skip(5);
                    self.switch_to(TokenizerState::AfterDoctypePublicKeyword);
                } else if c.eq_ignore_ascii_case(&'s')
                    && self.input.starts_with_ignore_ascii_case("YSTEM")
                {
                    self.input.skip(5);
                    self.switch_to(TokenizerState::AfterDoctypeSystemKeyword);
                } else {
                    // "This is an invalid-character-sequence-after-doctype-name parse
                    // error. Set the current DOCTYPE token's force-quirks flag to on.
                    // Reconsume in the bogus DOCTYPE state."
                    self.parse_error(LexicalError::InvalidCharacterSequenceAfterDoctypeName);
                    self.current_doctype.force_quirks = true;
                    self.reconsume_in(TokenizerState::BogusDoctype);
                }
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_keyword_state(&mut self, public: bool) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => self.switch_to(if public {
                TokenizerState::BeforeDoctypePublicIdentifier
            } else {
                TokenizerState::BeforeDoctypeSystemIdentifier
            }),
            // "This is a missing-whitespace-after-doctype-public-keyword parse
            // error. Set the current DOCTYPE token's public identifier to the empty
            // string (not missing), then switch to the DOCTYPE public identifier
            // (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(if public {
                    LexicalError::MissingWhitespaceAfterDoctypePublicKeyword
                } else {
                    LexicalError::MissingWhitespaceAfterDoctypeSystemKeyword
                });
                self.begin_doctype_identifier(public, quote);
            }
            Some('>') => self.missing_doctype_identifier(public),
            None => self.eof_in_doctype(),
            Some(_) => self.missing_quote_before_doctype_identifier(public),
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_identifier_state(&mut self, public: bool) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(quote @ ('"' | '\'')) => self.begin_doctype_identifier(public, quote),
            Some('>') => self.missing_doctype_identifier(public),
            None => self.eof_in_doctype(),
            Some(_) => self.missing_quote_before_doctype_identifier(public),
        }
    }

    /// [§ 13.2.5.59](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// through [§ 13.2.5.66](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state):
    /// the four quoted identifier states.
    pub(super) fn handle_doctype_identifier_quoted_state(&mut self, public: bool, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(if public {
                TokenizerState::AfterDoctypePublicIdentifier
            } else {
                TokenizerState::AfterDoctypeSystemIdentifier
            }),
            Some('\0') => {
                self.parse_error(LexicalError::UnexpectedNullCharacter);
                self.push_doctype_identifier(public, '\u{FFFD}');
            }
            // "This is an abrupt-doctype-public-identifier parse error. Set the
            // current DOCTYPE token's force-quirks flag to on. Switch to the data
            // state. Emit the current DOCTYPE token."
            Some('>') => {
                self.parse_error(if public {
                    LexicalError::AbruptDoctypePublicIdentifier
                } else {
                    LexicalError::AbruptDoctypeSystemIdentifier
                });
                self.current_doctype.force_quirks = true;
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            Some(c) => self.push_doctype_identifier(public, c),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BetweenDoctypePublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(LexicalError::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers);
                self.begin_doctype_identifier(false, quote);
            }
            None => self.eof_in_doctype(),
            Some(_) => self.missing_quote_before_doctype_identifier(false),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some(quote @ ('"' | '\'')) => self.begin_doctype_identifier(false, quote),
            None => self.eof_in_doctype(),
            Some(_) => self.missing_quote_before_doctype_identifier(false),
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            // "This is an unexpected-character-after-doctype-system-identifier parse
            // error. Reconsume in the bogus DOCTYPE state. (This does not set the
            // current DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.parse_error(LexicalError::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some('\0') => self.parse_error(LexicalError::UnexpectedNullCharacter),
            None => {
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(_) => {}
        }
    }

    fn begin_doctype_identifier(&mut self, public: bool, quote: char) {
        let double = quote == '"';
        let next = if public {
            self.current_doctype.public_id = Some(String::new());
            if double {
                TokenizerState::DoctypePublicIdentifierDoubleQuoted
            } else {
                TokenizerState::DoctypePublicIdentifierSingleQuoted
            }
        } else {
            self.current_doctype.system_id = Some(String::new());
            if double {
                TokenizerState::DoctypeSystemIdentifierDoubleQuoted
            } else {
                TokenizerState::DoctypeSystemIdentifierSingleQuoted
            }
        };
        self.switch_to(next);
    }

    fn push_doctype_identifier(&mut self, public: bool, c: char) {
        let target = if public {
            &mut self.current_doctype.public_id
        } else {
            &mut self.current_doctype.system_id
        };
        target.get_or_insert_with(String::new).push(c);
    }

    /// "This is a missing-doctype-public-identifier parse error. Set the current
    /// DOCTYPE token's force-quirks flag to on. Switch to the data state. Emit
    /// the current DOCTYPE token."
    fn missing_doctype_identifier(&mut self, public: bool) {
        self.parse_error(if public {
            LexicalError::MissingDoctypePublicIdentifier
        } else {
            LexicalError::MissingDoctypeSystemIdentifier
        });
        self.current_doctype.force_quirks = true;
        self.switch_to(TokenizerState::Data);
        self.emit_current_doctype();
    }

    /// "This is a missing-quote-before-doctype-public-identifier parse error.
    /// Set the current DOCTYPE token's force-quirks flag to on. Reconsume in
    /// the bogus DOCTYPE state."
    fn missing_quote_before_doctype_identifier(&mut self, public: bool) {
        self.parse_error(if public {
            LexicalError::MissingQuoteBeforeDoctypePublicIdentifier
        } else {
            LexicalError::MissingQuoteBeforeDoctypeSystemIdentifier
        });
        self.current_doctype.force_quirks = true;
        self.reconsume_in(TokenizerState::BogusDoctype);
    }

    fn eof_in_doctype(&mut self) {
        self.parse_error(LexicalError::EofInDoctype);
        self.current_doctype.force_quirks = true;
        self.emit_current_doctype();
        self.emit_eof();
    }
}

// =============================================================================
// CDATA sections
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    pub(super) fn handle_cdata_section_state(&mut self) {
        match self.current_input_character {
            Some(']') => self.switch_to(TokenizerState::CdataSectionBracket),
            None => {
                self.parse_error(LexicalError::EofInCdata);
                self.emit_eof();
            }
            // "U+0000 NULL characters are handled in the tree construction stage,
            // as part of the in foreign content insertion mode."
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    pub(super) fn handle_cdata_section_bracket_state(&mut self) {
        if self.current_input_character == Some(']') {
            self.switch_to(TokenizerState::CdataSectionEnd);
        } else {
            self.emit_char(']');
            self.reconsume_in(TokenizerState::CdataSection);
        }
    }

    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    pub(super) fn handle_cdata_section_end_state(&mut self) {
        match self.current_input_character {
            Some(']') => self.emit_char(']'),
            Some('>') => self.switch_to(TokenizerState::Data),
            _ => {
                self.emit_str("]]");
                self.reconsume_in(TokenizerState::CdataSection);
            }
        }
    }
}
