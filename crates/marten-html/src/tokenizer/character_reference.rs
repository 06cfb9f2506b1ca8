//! Character reference states.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)

use super::core::{HTMLTokenizer, TokenizerState};
use super::named_character_references::{any_entity_has_prefix, lookup_entity};
use crate::error::LexicalError;
use crate::input::windows_1252_c1;

impl HTMLTokenizer {
    /// "consumed as part of an attribute": the return state is an attribute
    /// value state.
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        self.return_state.is_attribute_value()
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute, then
    /// append each character to the current attribute's value. Otherwise, emit
    /// each character as a character token."
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            self.current_tag.push_attribute_value_str(&buffer);
        } else {
            self.emit_str(&buffer);
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026
        // AMPERSAND (&) character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');
        match self.current_input_character {
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Flush code points consumed as a character reference. Reconsume in
            // the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in(self.return_state);
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the named character references
    /// table."
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let Some(first) = self.current_input_character else {
            self.flush_code_points_consumed_as_character_reference();
            self.reconsume_in(self.return_state);
            return;
        };

        // Longest match by lookahead: (byte length of the name, characters
        // beyond the current one, replacement).
        let mut candidate = String::from(first);
        let mut lookahead = 0;
        let mut matched: Option<(usize, usize, &'static str)> = None;
        loop {
            if let Some(value) = lookup_entity(&candidate) {
                matched = Some((candidate.len(), lookahead, value));
            }
            if !any_entity_has_prefix(&candidate) {
                break;
            }
            let Some(next) = self.input.peek(lookahead) else {
                break;
            };
            candidate.push(next);
            lookahead += 1;
        }

        let Some((name_len, extra, value)) = matched else {
            // "Otherwise: Flush code points consumed as a character reference.
            // Switch to the ambiguous ampersand state."
            self.flush_code_points_consumed_as_character_reference();
            self.reconsume_in(TokenizerState::AmbiguousAmpersand);
            return;
        };

        self.input.skip(extra);
        let name = &candidate[..name_len];
        self.temporary_buffer.push_str(name);
        let ends_with_semicolon = name.ends_with(';');

        // "If the character reference was consumed as part of an attribute, and
        // the last character matched is not a U+003B SEMICOLON character (;), and
        // the next input character is either a U+003D EQUALS SIGN character (=)
        // or an ASCII alphanumeric, then, for historical reasons, flush code
        // points consumed as a character reference and switch to the return state."
        if self.is_consumed_as_part_of_attribute()
            && !ends_with_semicolon
            && self
                .input
                .peek(0)
                .is_some_and(|c| c == '=' || c.is_ascii_alphanumeric())
        {
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(self.return_state);
            return;
        }

        // "If the last character matched is not a U+003B SEMICOLON character (;),
        // then this is a missing-semicolon-after-character-reference parse error."
        if !ends_with_semicolon {
            self.parse_error(LexicalError::MissingSemicolonAfterCharacterReference);
        }
        // "Set the temporary buffer to the empty string. Append one or two
        // characters corresponding to the character reference name to the
        // temporary buffer. Flush code points consumed as a character reference.
        // Switch to the return state."
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(value);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to(self.return_state);
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "If the character reference was consumed as part of an attribute,
            // then append the current input character to the current attribute's
            // value. Otherwise, emit the current input character as a character token."
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.is_consumed_as_part_of_attribute() {
                    self.current_tag.push_attribute_value(c);
                } else {
                    self.emit_char(c);
                }
            }
            // "This is an unknown-named-character-reference parse error. Reconsume
            // in the return state."
            Some(';') => {
                self.parse_error(LexicalError::UnknownNamedCharacterReference);
                self.reconsume_in(self.return_state);
            }
            _ => self.reconsume_in(self.return_state),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;
        match self.current_input_character {
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_numeric_character_reference_start_state(&mut self, radix: u32) {
        match self.current_input_character {
            Some(c) if c.is_digit(radix) => self.reconsume_in(if radix == 16 {
                TokenizerState::HexadecimalCharacterReference
            } else {
                TokenizerState::DecimalCharacterReference
            }),
            // "This is an absence-of-digits-in-numeric-character-reference parse
            // error. Flush code points consumed as a character reference.
            // Reconsume in the return state."
            _ => {
                self.parse_error(LexicalError::AbsenceOfDigitsInNumericCharacterReference);
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in(self.return_state);
            }
        }
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    ///
    /// The end state is always entered by reconsuming, so it can tell a
    /// terminating semicolon from anything else.
    pub(super) fn handle_numeric_character_reference_digits_state(&mut self, radix: u32) {
        match self.current_input_character.and_then(|c| c.to_digit(radix)) {
            // "Multiply the character reference code by 16. Add a numeric version
            // of the current input character to the character reference code."
            Some(digit) => {
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(radix)
                    .saturating_add(digit);
            }
            None if self.current_input_character == Some(';') => {
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
            // "This is a missing-semicolon-after-character-reference parse error.
            // Reconsume in the numeric character reference end state."
            None => {
                self.parse_error(LexicalError::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        let code = self.character_reference_code;
        let replacement = match code {
            // "If the number is 0x00, then this is a null-character-reference parse
            // error. Set the character reference code to 0xFFFD."
            0 => {
                self.parse_error(LexicalError::NullCharacterReference);
                '\u{FFFD}'
            }
            // "If the number is greater than 0x10FFFF, then this is a
            // character-reference-outside-unicode-range parse error."
            c if c > 0x0010_FFFF => {
                self.parse_error(LexicalError::CharacterReferenceOutsideUnicodeRange);
                '\u{FFFD}'
            }
            // "If the number is a surrogate, then this is a
            // surrogate-character-reference parse error."
            0xD800..=0xDFFF => {
                self.parse_error(LexicalError::SurrogateCharacterReference);
                '\u{FFFD}'
            }
            c => {
                if is_noncharacter(c) {
                    self.parse_error(LexicalError::NoncharacterCharacterReference);
                }
                // "If the number is 0x0D, or a control that's not ASCII whitespace,
                // then this is a control-character-reference parse error. If the
                // number is one of the numbers in the first column of the following
                // table, then find the row with that number in the first column,
                // and set the character reference code to the number in the second
                // column of that row."
                if c == 0x0D || (is_control(c) && !matches!(c, 0x09 | 0x0A | 0x0C | 0x20)) {
                    self.parse_error(LexicalError::ControlCharacterReference);
                }
                windows_1252_c1(c)
                    .or_else(|| char::from_u32(c))
                    .unwrap_or('\u{FFFD}')
            }
        };

        self.temporary_buffer.clear();
        self.temporary_buffer.push(replacement);
        self.flush_code_points_consumed_as_character_reference();
        if self.current_input_character == Some(';') {
            self.switch_to(self.return_state);
        } else {
            self.reconsume_in(self.return_state);
        }
    }
}

/// [Infra § noncharacter](https://infra.spec.whatwg.org/#noncharacter)
const fn is_noncharacter(code: u32) -> bool {
    matches!(code, 0xFDD0..=0xFDEF) || (code & 0xFFFE) == 0xFFFE
}

/// [Infra § control](https://infra.spec.whatwg.org/#control): "a C0 control
/// or a code point in the range U+007F DELETE to U+009F APPLICATION PROGRAM
/// COMMAND, inclusive."
const fn is_control(code: u32) -> bool {
    code <= 0x1F || matches!(code, 0x7F..=0x9F)
}
