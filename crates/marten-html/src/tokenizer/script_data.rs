//! Script data states.
//!
//! [§ 13.2.5.15](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
//! through [§ 13.2.5.31](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state).
//!
//! The end tag open and end tag name states are shared with RCDATA and
//! RAWTEXT and live in `core.rs`.

use super::core::{HTMLTokenizer, TokenizerState};
use crate::error::LexicalError;

impl HTMLTokenizer {
    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    pub(super) fn handle_script_data_less_than_sign_state(&mut self) {
        match self.current_input_character {
            // "U+002F SOLIDUS (/)"
            // "Set the temporary buffer to the empty string. Switch to the script
            // data end tag open state."
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::ScriptDataEndTagOpen);
            }
            // "U+0021 EXCLAMATION MARK (!)"
            // "Switch to the script data escape start state. Emit a U+003C
            // LESS-THAN SIGN character token and a U+0021 EXCLAMATION MARK
            // character token."
            Some('!') => {
                self.switch_to(TokenizerState::ScriptDataEscapeStart);
                self.emit_str("<!");
            }
            _ => {
                self.emit_char('<');
                self.reconsume_in(TokenizerState::ScriptData);
            }
        }
    }

    /// [§ 13.2.5.18 Script data escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state)
    pub(super) fn handle_script_data_escape_start_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_to(TokenizerState::ScriptDataEscapeStartDash);
            self.emit_char('-');
        } else {
            self.reconsume_in(TokenizerState::ScriptData);
        }
    }

    /// [§ 13.2.5.19 Script data escape start dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state)
    pub(super) fn handle_script_data_escape_start_dash_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_to(TokenizerState::ScriptDataEscapedDashDash);
            self.emit_char('-');
        } else {
            self.reconsume_in(TokenizerState::ScriptData);
        }
    }

    /// [§ 13.2.5.20 Script data escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state)
    pub(super) fn handle_script_data_escaped_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::ScriptDataEscapedDash);
                self.emit_char('-');
            }
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('\0') => self.emit_replacement_character(),
            // "EOF"
            // "This is an eof-in-script-html-comment-like-text parse error. Emit an
            // end-of-file token."
            None => {
                self.parse_error(LexicalError::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.21 Script data escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state)
    pub(super) fn handle_script_data_escaped_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::ScriptDataEscapedDashDash);
                self.emit_char('-');
            }
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('\0') => {
                self.switch_to(TokenizerState::ScriptDataEscaped);
                self.emit_replacement_character();
            }
            None => {
                self.parse_error(LexicalError::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }
            Some(c) => {
                self.switch_to(TokenizerState::ScriptDataEscaped);
                self.emit_char(c);
            }
        }
    }

    /// [§ 13.2.5.22 Script data escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state)
    pub(super) fn handle_script_data_escaped_dash_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.emit_char('-'),
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the script data state. Emit a U+003E GREATER-THAN SIGN
            // character token."
            Some('>') => {
                self.switch_to(TokenizerState::ScriptData);
                self.emit_char('>');
            }
            Some('\0') => {
                self.switch_to(TokenizerState::ScriptDataEscaped);
                self.emit_replacement_character();
            }
            None => {
                self.parse_error(LexicalError::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }
            Some(c) => {
                self.switch_to(TokenizerState::ScriptDataEscaped);
                self.emit_char(c);
            }
        }
    }

    /// [§ 13.2.5.23 Script data escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state)
    pub(super) fn handle_script_data_escaped_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::ScriptDataEscapedEndTagOpen);
            }
            // "ASCII alpha"
            // "Set the temporary buffer to the empty string. Emit a U+003C
            // LESS-THAN SIGN character token. Reconsume in the script data double
            // escape start state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.temporary_buffer.clear();
                self.emit_char('<');
                self.reconsume_in(TokenizerState::ScriptDataDoubleEscapeStart);
            }
            _ => {
                self.emit_char('<');
                self.reconsume_in(TokenizerState::ScriptDataEscaped);
            }
        }
    }

    /// [§ 13.2.5.26 Script data double escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state)
    /// [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
    ///
    /// The two states are mirror images: on a delimiter, "If the temporary
    /// buffer is the string "script", then switch to" `on_script`, otherwise
    /// `otherwise`.
    pub(super) fn handle_script_data_double_escape_boundary_state(
        &mut self,
        on_script: TokenizerState,
        otherwise: TokenizerState,
    ) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) || c == '/' || c == '>' => {
                if self.temporary_buffer == "script" {
                    self.switch_to(on_script);
                } else {
                    self.switch_to(otherwise);
                }
                self.emit_char(c);
            }
            // "ASCII alpha"
            // "Append the lowercase version of the current input character to the
            // temporary buffer. Emit the current input character as a character token."
            Some(c) if c.is_ascii_alphabetic() => {
                self.temporary_buffer.push(c.to_ascii_lowercase());
                self.emit_char(c);
            }
            _ => self.reconsume_in(otherwise),
        }
    }

    /// [§ 13.2.5.27 Script data double escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state)
    pub(super) fn handle_script_data_double_escaped_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedDash);
                self.emit_char('-');
            }
            Some('<') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                self.emit_char('<');
            }
            Some('\0') => self.emit_replacement_character(),
            None => {
                self.parse_error(LexicalError::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.28 Script data double escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state)
    pub(super) fn handle_script_data_double_escaped_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedDashDash);
                self.emit_char('-');
            }
            Some('<') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                self.emit_char('<');
            }
            Some('\0') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                self.emit_replacement_character();
            }
            None => {
                self.parse_error(LexicalError::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }
            Some(c) => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                self.emit_char(c);
            }
        }
    }

    /// [§ 13.2.5.29 Script data double escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state)
    pub(super) fn handle_script_data_double_escaped_dash_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.emit_char('-'),
            Some('<') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                self.emit_char('<');
            }
            Some('>') => {
                self.switch_to(TokenizerState::ScriptData);
                self.emit_char('>');
            }
            Some('\0') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                self.emit_replacement_character();
            }
            None => {
                self.parse_error(LexicalError::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }
            Some(c) => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                self.emit_char(c);
            }
        }
    }

    /// [§ 13.2.5.30 Script data double escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state)
    pub(super) fn handle_script_data_double_escaped_less_than_sign_state(&mut self) {
        if self.current_input_character == Some('/') {
            // "Set the temporary buffer to the empty string. Switch to the script
            // data double escape end state. Emit a U+002F SOLIDUS character token."
            self.temporary_buffer.clear();
            self.switch_to(TokenizerState::ScriptDataDoubleEscapeEnd);
            self.emit_char('/');
        } else {
            self.reconsume_in(TokenizerState::ScriptDataDoubleEscaped);
        }
    }
}
