use std::collections::VecDeque;

use marten_common::SourcePosition;
use marten_dom::ContentModel;
use strum_macros::Display;

use super::token::{DoctypeBuilder, TagBuilder, Token};
use crate::error::{LexicalError, ParseIssue};
use crate::input::InputStream;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine. Each state corresponds to a section in § 13.2.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    Rcdata,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    RawText,
    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    ScriptData,
    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    PlainText,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    RcdataLessThanSign,
    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    RcdataEndTagOpen,
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    RcdataEndTagName,
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    RawTextLessThanSign,
    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    RawTextEndTagOpen,
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    RawTextEndTagName,
    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    ScriptDataLessThanSign,
    /// [§ 13.2.5.16 Script data end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-open-state)
    ScriptDataEndTagOpen,
    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    ScriptDataEndTagName,
    /// [§ 13.2.5.18 Script data escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state)
    ScriptDataEscapeStart,
    /// [§ 13.2.5.19 Script data escape start dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state)
    ScriptDataEscapeStartDash,
    /// [§ 13.2.5.20 Script data escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state)
    ScriptDataEscaped,
    /// [§ 13.2.5.21 Script data escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state)
    ScriptDataEscapedDash,
    /// [§ 13.2.5.22 Script data escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state)
    ScriptDataEscapedDashDash,
    /// [§ 13.2.5.23 Script data escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state)
    ScriptDataEscapedLessThanSign,
    /// [§ 13.2.5.24 Script data escaped end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-open-state)
    ScriptDataEscapedEndTagOpen,
    /// [§ 13.2.5.25 Script data escaped end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-name-state)
    ScriptDataEscapedEndTagName,
    /// [§ 13.2.5.26 Script data double escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state)
    ScriptDataDoubleEscapeStart,
    /// [§ 13.2.5.27 Script data double escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state)
    ScriptDataDoubleEscaped,
    /// [§ 13.2.5.28 Script data double escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state)
    ScriptDataDoubleEscapedDash,
    /// [§ 13.2.5.29 Script data double escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state)
    ScriptDataDoubleEscapedDashDash,
    /// [§ 13.2.5.30 Script data double escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state)
    ScriptDataDoubleEscapedLessThanSign,
    /// [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
    ScriptDataDoubleEscapeEnd,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    CommentLessThanSign,
    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    CommentLessThanSignBang,
    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    CommentLessThanSignBangDash,
    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    CommentLessThanSignBangDashDash,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    CommentEndBang,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    Doctype,
    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    BeforeDoctypeName,
    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    DoctypeName,
    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    AfterDoctypeName,
    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    AfterDoctypePublicKeyword,
    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    BeforeDoctypePublicIdentifier,
    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    DoctypePublicIdentifierDoubleQuoted,
    /// [§ 13.2.5.60 DOCTYPE public identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    DoctypePublicIdentifierSingleQuoted,
    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    AfterDoctypePublicIdentifier,
    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    BetweenDoctypePublicAndSystemIdentifiers,
    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    AfterDoctypeSystemKeyword,
    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    BeforeDoctypeSystemIdentifier,
    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    DoctypeSystemIdentifierDoubleQuoted,
    /// [§ 13.2.5.66 DOCTYPE system identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    DoctypeSystemIdentifierSingleQuoted,
    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    AfterDoctypeSystemIdentifier,
    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    BogusDoctype,
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    CdataSection,
    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    CdataSectionBracket,
    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    CdataSectionEnd,
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    CharacterReference,
    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    NamedCharacterReference,
    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    AmbiguousAmpersand,
    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    NumericCharacterReference,
    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    HexadecimalCharacterReferenceStart,
    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    DecimalCharacterReferenceStart,
    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    HexadecimalCharacterReference,
    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    DecimalCharacterReference,
    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    NumericCharacterReferenceEnd,
}

impl TokenizerState {
    /// States that inspect upcoming input without first consuming a character.
    const fn consumes_input(self) -> bool {
        !matches!(self, Self::MarkupDeclarationOpen)
    }

    /// Attribute value states, the return states for which character
    /// references are "consumed as part of an attribute".
    pub(super) const fn is_attribute_value(self) -> bool {
        matches!(
            self,
            Self::AttributeValueDoubleQuoted
                | Self::AttributeValueSingleQuoted
                | Self::AttributeValueUnquoted
        )
    }
}

/// The kind of character run being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TextRun {
    Whitespace,
    Data,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to tokenize HTML."
///
/// A pull tokenizer: [`HTMLTokenizer::next_token`] runs the state machine until
/// at least one complete token is available. The tree builder talks back through
/// [`HTMLTokenizer::switch_content_model`] and [`HTMLTokenizer::set_cdata_allowed`]
/// between tokens.
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) return_state: TokenizerState,
    pub(super) input: InputStream,
    pub(super) current_input_character: Option<char>,
    // When true, the next iteration of the main loop will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,

    pub(super) current_tag: TagBuilder,
    pub(super) current_doctype: DoctypeBuilder,
    pub(super) current_comment: String,

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    /// "The last start tag token emitted is used as part of the tree construction stage
    /// and in the RCDATA, RAWTEXT, and script data states."
    pub(super) last_start_tag_name: Option<String>,

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#temporary-buffer)
    pub(super) temporary_buffer: String,

    /// [§ 13.2.5.75](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-code)
    /// "the character reference code"
    pub(super) character_reference_code: u32,

    /// Characters waiting to be emitted as one run.
    pub(super) pending_text: String,
    pub(super) pending_run: Option<TextRun>,

    /// Completed tokens not yet handed out.
    pub(super) queue: VecDeque<Token>,
    /// Set once the end-of-file token has been queued.
    pub(super) finished: bool,

    /// [§ 13.2.5.42](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    /// "If there is an adjusted current node and it is not an element in the
    /// HTML namespace", as reported by the tree builder.
    pub(super) cdata_allowed: bool,

    /// Switch content models from the start tag itself, for standalone use
    /// without a tree builder.
    pub(super) self_driving: bool,

    pub(super) issues: Vec<ParseIssue>,
    pub(super) log_issues: bool,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input.
    ///
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
    /// "The tokenizer state machine consists of the states defined in the
    /// following subsections. The initial state is the data state."
    #[must_use]
    pub fn new(input: InputStream) -> Self {
        Self {
            state: TokenizerState::Data,
            return_state: TokenizerState::Data,
            input,
            current_input_character: None,
            reconsume: false,
            current_tag: TagBuilder::start_tag(),
            current_doctype: DoctypeBuilder::default(),
            current_comment: String::new(),
            last_start_tag_name: None,
            temporary_buffer: String::new(),
            character_reference_code: 0,
            pending_text: String::new(),
            pending_run: None,
            queue: VecDeque::new(),
            finished: false,
            cdata_allowed: false,
            self_driving: false,
            issues: Vec::new(),
            log_issues: false,
        }
    }

    /// Tokenizer over already-decoded text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::new(InputStream::new(text))
    }

    /// Let the tokenizer pick RCDATA / RAWTEXT / script data / PLAINTEXT
    /// itself after each start tag, the way the tree builder would in the
    /// common case. Only meant for token dumps without tree construction.
    #[must_use]
    pub const fn self_driving(mut self) -> Self {
        self.self_driving = true;
        self
    }

    /// Forward lexical errors to the warning log as they happen.
    pub const fn set_log_issues(&mut self, log_issues: bool) {
        self.log_issues = log_issues;
    }

    /// Return the next token, running the state machine as far as needed.
    /// Returns `None` once [`Token::EndOfFile`] has been handed out.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(token);
            }
            if self.finished {
                return None;
            }
            self.step();
        }
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    ///
    /// "Switch the tokenizer to the RCDATA state" and its siblings. Once in
    /// PLAINTEXT the tokenizer never leaves it.
    pub fn switch_content_model(&mut self, model: ContentModel) {
        if self.state == TokenizerState::PlainText {
            return;
        }
        self.state = match model {
            ContentModel::Data => TokenizerState::Data,
            ContentModel::Rcdata => TokenizerState::Rcdata,
            ContentModel::RawText => TokenizerState::RawText,
            ContentModel::ScriptData => TokenizerState::ScriptData,
            ContentModel::PlainText => TokenizerState::PlainText,
        };
    }

    /// Whether `<![CDATA[` opens a CDATA section (foreign content) or is a
    /// bogus comment (HTML content).
    pub const fn set_cdata_allowed(&mut self, allowed: bool) {
        self.cdata_allowed = allowed;
    }

    /// The current state, mostly for diagnostics.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Position of the most recently consumed input character.
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        self.input.current_position()
    }

    /// Drain the lexical issues recorded so far.
    pub fn take_issues(&mut self) -> Vec<ParseIssue> {
        std::mem::take(&mut self.issues)
    }

    /// Run one state transition.
    fn step(&mut self) {
        // Each state begins by consuming the next input character,
        // unless we're reconsuming from a previous state transition.
        if self.reconsume {
            self.reconsume = false;
        } else if self.state.consumes_input() {
            self.current_input_character = self.input.next_char();
        }

        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::Rcdata => self.handle_rcdata_state(),
            TokenizerState::RawText => self.handle_rawtext_state(),
            TokenizerState::ScriptData => self.handle_script_data_state(),
            TokenizerState::PlainText => self.handle_plaintext_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::RcdataLessThanSign => {
                self.handle_text_less_than_sign_state(TokenizerState::Rcdata);
            }
            TokenizerState::RcdataEndTagOpen => {
                self.handle_text_end_tag_open_state(TokenizerState::Rcdata);
            }
            TokenizerState::RcdataEndTagName => {
                self.handle_text_end_tag_name_state(TokenizerState::Rcdata);
            }
            TokenizerState::RawTextLessThanSign => {
                self.handle_text_less_than_sign_state(TokenizerState::RawText);
            }
            TokenizerState::RawTextEndTagOpen => {
                self.handle_text_end_tag_open_state(TokenizerState::RawText);
            }
            TokenizerState::RawTextEndTagName => {
                self.handle_text_end_tag_name_state(TokenizerState::RawText);
            }
            TokenizerState::ScriptDataLessThanSign => {
                self.handle_script_data_less_than_sign_state();
            }
            TokenizerState::ScriptDataEndTagOpen => {
                self.handle_text_end_tag_open_state(TokenizerState::ScriptData);
            }
            TokenizerState::ScriptDataEndTagName => {
                self.handle_text_end_tag_name_state(TokenizerState::ScriptData);
            }
            TokenizerState::ScriptDataEscapeStart => self.handle_script_data_escape_start_state(),
            TokenizerState::ScriptDataEscapeStartDash => {
                self.handle_script_data_escape_start_dash_state();
            }
            TokenizerState::ScriptDataEscaped => self.handle_script_data_escaped_state(),
            TokenizerState::ScriptDataEscapedDash => self.handle_script_data_escaped_dash_state(),
            TokenizerState::ScriptDataEscapedDashDash => {
                self.handle_script_data_escaped_dash_dash_state();
            }
            TokenizerState::ScriptDataEscapedLessThanSign => {
                self.handle_script_data_escaped_less_than_sign_state();
            }
            TokenizerState::ScriptDataEscapedEndTagOpen => {
                self.handle_text_end_tag_open_state(TokenizerState::ScriptDataEscaped);
            }
            TokenizerState::ScriptDataEscapedEndTagName => {
                self.handle_text_end_tag_name_state(TokenizerState::ScriptDataEscaped);
            }
            TokenizerState::ScriptDataDoubleEscapeStart => {
                self.handle_script_data_double_escape_boundary_state(
                    TokenizerState::ScriptDataDoubleEscaped,
                    TokenizerState::ScriptDataEscaped,
                );
            }
            TokenizerState::ScriptDataDoubleEscaped => {
                self.handle_script_data_double_escaped_state();
            }
            TokenizerState::ScriptDataDoubleEscapedDash => {
                self.handle_script_data_double_escaped_dash_state();
            }
            TokenizerState::ScriptDataDoubleEscapedDashDash => {
                self.handle_script_data_double_escaped_dash_dash_state();
            }
            TokenizerState::ScriptDataDoubleEscapedLessThanSign => {
                self.handle_script_data_double_escaped_less_than_sign_state();
            }
            TokenizerState::ScriptDataDoubleEscapeEnd => {
                self.handle_script_data_double_escape_boundary_state(
                    TokenizerState::ScriptDataEscaped,
                    TokenizerState::ScriptDataDoubleEscaped,
                );
            }
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state('"');
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state('\'');
            }
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            TokenizerState::BogusComment => self.handle_bogus_comment_state(),
            TokenizerState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
            TokenizerState::CommentStart => self.handle_comment_start_state(),
            TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
            TokenizerState::Comment => self.handle_comment_state(),
            TokenizerState::CommentLessThanSign => self.handle_comment_less_than_sign_state(),
            TokenizerState::CommentLessThanSignBang => {
                self.handle_comment_less_than_sign_bang_state();
            }
            TokenizerState::CommentLessThanSignBangDash => {
                self.handle_comment_less_than_sign_bang_dash_state();
            }
            TokenizerState::CommentLessThanSignBangDashDash => {
                self.handle_comment_less_than_sign_bang_dash_dash_state();
            }
            TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
            TokenizerState::CommentEnd => self.handle_comment_end_state(),
            TokenizerState::CommentEndBang => self.handle_comment_end_bang_state(),
            TokenizerState::Doctype => self.handle_doctype_state(),
            TokenizerState::BeforeDoctypeName => self.handle_before_doctype_name_state(),
            TokenizerState::DoctypeName => self.handle_doctype_name_state(),
            TokenizerState::AfterDoctypeName => self.handle_after_doctype_name_state(),
            TokenizerState::AfterDoctypePublicKeyword => {
                self.handle_after_doctype_keyword_state(true);
            }
            TokenizerState::BeforeDoctypePublicIdentifier => {
                self.handle_before_doctype_identifier_state(true);
            }
            TokenizerState::DoctypePublicIdentifierDoubleQuoted => {
                self.handle_doctype_identifier_quoted_state(true, '"');
            }
            TokenizerState::DoctypePublicIdentifierSingleQuoted => {
                self.handle_doctype_identifier_quoted_state(true, '\'');
            }
            TokenizerState::AfterDoctypePublicIdentifier => {
                self.handle_after_doctype_public_identifier_state();
            }
            TokenizerState::BetweenDoctypePublicAndSystemIdentifiers => {
                self.handle_between_doctype_public_and_system_identifiers_state();
            }
            TokenizerState::AfterDoctypeSystemKeyword => {
                self.handle_after_doctype_keyword_state(false);
            }
            TokenizerState::BeforeDoctypeSystemIdentifier => {
                self.handle_before_doctype_identifier_state(false);
            }
            TokenizerState::DoctypeSystemIdentifierDoubleQuoted => {
                self.handle_doctype_identifier_quoted_state(false, '"');
            }
            TokenizerState::DoctypeSystemIdentifierSingleQuoted => {
                self.handle_doctype_identifier_quoted_state(false, '\'');
            }
            TokenizerState::AfterDoctypeSystemIdentifier => {
                self.handle_after_doctype_system_identifier_state();
            }
            TokenizerState::BogusDoctype => self.handle_bogus_doctype_state(),
            TokenizerState::CdataSection => self.handle_cdata_section_state(),
            TokenizerState::CdataSectionBracket => self.handle_cdata_section_bracket_state(),
            TokenizerState::CdataSectionEnd => self.handle_cdata_section_end_state(),
            TokenizerState::CharacterReference => self.handle_character_reference_state(),
            TokenizerState::NamedCharacterReference => {
                self.handle_named_character_reference_state();
            }
            TokenizerState::AmbiguousAmpersand => self.handle_ambiguous_ampersand_state(),
            TokenizerState::NumericCharacterReference => {
                self.handle_numeric_character_reference_state();
            }
            TokenizerState::HexadecimalCharacterReferenceStart => {
                self.handle_numeric_character_reference_start_state(16);
            }
            TokenizerState::DecimalCharacterReferenceStart => {
                self.handle_numeric_character_reference_start_state(10);
            }
            TokenizerState::HexadecimalCharacterReference => {
                self.handle_numeric_character_reference_digits_state(16);
            }
            TokenizerState::DecimalCharacterReference => {
                self.handle_numeric_character_reference_digits_state(10);
            }
            TokenizerState::NumericCharacterReferenceEnd => {
                self.handle_numeric_character_reference_end_state();
            }
        }
    }

    // =========================================================================
    // Content-model states
    // =========================================================================

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&) - Set the return state to the data state.
            // Switch to the character reference state."
            Some('&') => {
                self.return_state = TokenizerState::Data;
                self.switch_to(TokenizerState::CharacterReference);
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => self.switch_to(TokenizerState::TagOpen),
            // "U+0000 NULL - This is an unexpected-null-character parse error.
            // Emit the current input character as a character token."
            Some('\0') => {
                self.parse_error(LexicalError::UnexpectedNullCharacter);
                self.emit_char('\0');
            }
            // "EOF - Emit an end-of-file token."
            None => self.emit_eof(),
            // "Anything else - Emit the current input character as a character token."
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    fn handle_rcdata_state(&mut self) {
        match self.current_input_character {
            Some('&') => {
                self.return_state = TokenizerState::Rcdata;
                self.switch_to(TokenizerState::CharacterReference);
            }
            Some('<') => self.switch_to(TokenizerState::RcdataLessThanSign),
            Some('\0') => self.emit_replacement_character(),
            None => self.emit_eof(),
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    fn handle_rawtext_state(&mut self) {
        match self.current_input_character {
            Some('<') => self.switch_to(TokenizerState::RawTextLessThanSign),
            Some('\0') => self.emit_replacement_character(),
            None => self.emit_eof(),
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    fn handle_script_data_state(&mut self) {
        match self.current_input_character {
            Some('<') => self.switch_to(TokenizerState::ScriptDataLessThanSign),
            Some('\0') => self.emit_replacement_character(),
            None => self.emit_eof(),
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    fn handle_plaintext_state(&mut self) {
        match self.current_input_character {
            // "U+0000 NULL"
            //   "This is an unexpected-null-character parse error. Emit a U+FFFD
            //    REPLACEMENT CHARACTER character token."
            Some('\0') => self.emit_replacement_character(),
            None => self.emit_eof(),
            Some(c) => self.emit_char(c),
        }
    }

    // =========================================================================
    // Tag states
    // =========================================================================

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!)"
            // "Switch to the markup declaration open state."
            Some('!') => self.switch_to(TokenizerState::MarkupDeclarationOpen),
            // "U+002F SOLIDUS (/)"
            // "Switch to the end tag open state."
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            // "ASCII alpha"
            // "Create a new start tag token, set its tag name to the empty string.
            // Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = TagBuilder::start_tag();
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003F QUESTION MARK (?)"
            // "This is an unexpected-question-mark-instead-of-tag-name parse error.
            // Create a comment token whose data is the empty string. Reconsume in
            // the bogus comment state."
            Some('?') => {
                self.parse_error(LexicalError::UnexpectedQuestionMarkInsteadOfTagName);
                self.current_comment.clear();
                self.reconsume_in(TokenizerState::BogusComment);
            }
            // "EOF"
            // "This is an eof-before-tag-name parse error. Emit a U+003C LESS-THAN
            // SIGN character token and an end-of-file token."
            None => {
                self.parse_error(LexicalError::EofBeforeTagName);
                self.emit_char('<');
                self.emit_eof();
            }
            // "Anything else"
            // "This is an invalid-first-character-of-tag-name parse error. Emit a
            // U+003C LESS-THAN SIGN character token. Reconsume in the data state."
            Some(_) => {
                self.parse_error(LexicalError::InvalidFirstCharacterOfTagName);
                self.emit_char('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = TagBuilder::end_tag();
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is a missing-end-tag-name parse error. Switch to the data state."
            Some('>') => {
                self.parse_error(LexicalError::MissingEndTagName);
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.parse_error(LexicalError::EofBeforeTagName);
                self.emit_str("</");
                self.emit_eof();
            }
            // "Anything else"
            // "This is an invalid-first-character-of-tag-name parse error. Create a
            // comment token whose data is the empty string. Reconsume in the bogus
            // comment state."
            Some(_) => {
                self.parse_error(LexicalError::InvalidFirstCharacterOfTagName);
                self.current_comment.clear();
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            // "ASCII upper alpha"
            // "Append the lowercase version of the current input character (add
            // 0x0020 to the character's code point) to the current tag token's tag name."
            Some(c) if c.is_ascii_uppercase() => {
                self.current_tag.name.push(c.to_ascii_lowercase());
            }
            Some('\0') => {
                self.parse_error(LexicalError::UnexpectedNullCharacter);
                self.current_tag.name.push('\u{FFFD}');
            }
            // "EOF"
            // "This is an eof-in-tag parse error." The tag gathered so far is
            // still emitted ahead of the end-of-file token.
            None => self.emit_tag_at_eof(),
            Some(c) => self.current_tag.name.push(c),
        }
    }

    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    fn handle_text_less_than_sign_state(&mut self, text_state: TokenizerState) {
        match self.current_input_character {
            // "U+002F SOLIDUS (/)"
            // "Set the temporary buffer to the empty string. Switch to the RCDATA end tag open state."
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(match text_state {
                    TokenizerState::Rcdata => TokenizerState::RcdataEndTagOpen,
                    _ => TokenizerState::RawTextEndTagOpen,
                });
            }
            // "Anything else"
            // "Emit a U+003C LESS-THAN SIGN character token. Reconsume in the RCDATA state."
            _ => {
                self.emit_char('<');
                self.reconsume_in(text_state);
            }
        }
    }

    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    /// and its RAWTEXT, script data and script data escaped counterparts.
    fn handle_text_end_tag_open_state(&mut self, text_state: TokenizerState) {
        match self.current_input_character {
            // "ASCII alpha"
            // "Create a new end tag token, set its tag name to the empty string. Reconsume in
            // the RCDATA end tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = TagBuilder::end_tag();
                self.reconsume_in(match text_state {
                    TokenizerState::Rcdata => TokenizerState::RcdataEndTagName,
                    TokenizerState::RawText => TokenizerState::RawTextEndTagName,
                    TokenizerState::ScriptData => TokenizerState::ScriptDataEndTagName,
                    _ => TokenizerState::ScriptDataEscapedEndTagName,
                });
            }
            // "Anything else"
            // "Emit a U+003C LESS-THAN SIGN character token and a U+002F SOLIDUS character token.
            // Reconsume in the RCDATA state."
            _ => {
                self.emit_str("</");
                self.reconsume_in(text_state);
            }
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    /// and its RAWTEXT, script data and script data escaped counterparts.
    fn handle_text_end_tag_name_state(&mut self, text_state: TokenizerState) {
        match self.current_input_character {
            // "If the current end tag token is an appropriate end tag token, then
            // switch to the before attribute name state. Otherwise, treat it as per
            // the 'anything else' entry below."
            Some(c) if Self::is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            // "ASCII upper alpha"
            // "Append the lowercase version of the current input character to the
            // current tag token's tag name. Append the current input character to
            // the temporary buffer."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag.name.push(c.to_ascii_lowercase());
                self.temporary_buffer.push(c);
            }
            _ => self.emit_end_tag_name_anything_else(text_state),
        }
    }

    // =========================================================================
    // Attribute states
    // =========================================================================

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF"
            // "Reconsume in the after attribute name state."
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            // "U+003D EQUALS SIGN (=)"
            // "This is an unexpected-equals-sign-before-attribute-name parse error.
            // Start a new attribute in the current tag token. Set that attribute's
            // name to the current input character, and its value to the empty
            // string. Switch to the attribute name state."
            Some('=') => {
                self.parse_error(LexicalError::UnexpectedEqualsSignBeforeAttributeName);
                self.start_new_attribute(Some('='));
                self.switch_to(TokenizerState::AttributeName);
            }
            // "Anything else"
            // "Start a new attribute in the current tag token. Set that attribute
            // name and value to the empty string. Reconsume in the attribute name state."
            Some(_) => {
                self.start_new_attribute(None);
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some(c) if c.is_ascii_uppercase() => {
                self.current_tag.push_attribute_name(c.to_ascii_lowercase());
            }
            Some('\0') => {
                self.parse_error(LexicalError::UnexpectedNullCharacter);
                self.current_tag.push_attribute_name('\u{FFFD}');
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C LESS-THAN SIGN (<)"
            // "This is an unexpected-character-in-attribute-name parse error. Treat
            // it as per the 'anything else' entry below."
            Some(c @ ('"' | '\'' | '<')) => {
                self.parse_error(LexicalError::UnexpectedCharacterInAttributeName);
                self.current_tag.push_attribute_name(c);
            }
            Some(c) => self.current_tag.push_attribute_name(c),
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            None => self.emit_tag_at_eof(),
            Some(_) => {
                self.start_new_attribute(None);
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is a missing-attribute-value parse error. Switch to the data
            // state. Emit the current tag token."
            Some('>') => {
                self.parse_error(LexicalError::MissingAttributeValue);
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            // "U+0026 AMPERSAND (&)"
            // "Set the return state to the attribute value (double-quoted) state.
            // Switch to the character reference state."
            Some('&') => {
                self.return_state = self.state;
                self.switch_to(TokenizerState::CharacterReference);
            }
            Some('\0') => {
                self.parse_error(LexicalError::UnexpectedNullCharacter);
                self.current_tag.push_attribute_value('\u{FFFD}');
            }
            None => self.emit_tag_at_eof(),
            Some(c) => self.current_tag.push_attribute_value(c),
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => {
                self.return_state = TokenizerState::AttributeValueUnquoted;
                self.switch_to(TokenizerState::CharacterReference);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            Some('\0') => {
                self.parse_error(LexicalError::UnexpectedNullCharacter);
                self.current_tag.push_attribute_value('\u{FFFD}');
            }
            // "U+0022 ("), U+0027 ('), U+003C (<), U+003D (=), U+0060 (`)"
            // "This is an unexpected-character-in-unquoted-attribute-value parse
            // error. Treat it as per the 'anything else' entry below."
            Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                self.parse_error(LexicalError::UnexpectedCharacterInUnquotedAttributeValue);
                self.current_tag.push_attribute_value(c);
            }
            None => self.emit_tag_at_eof(),
            Some(c) => self.current_tag.push_attribute_value(c),
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            None => self.emit_tag_at_eof(),
            // "This is a missing-whitespace-between-attributes parse error.
            // Reconsume in the before attribute name state."
            Some(_) => {
                self.parse_error(LexicalError::MissingWhitespaceBetweenAttributes);
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>)"
            // "Set the self-closing flag of the current tag token. Switch to the
            // data state. Emit the current tag token."
            Some('>') => {
                self.current_tag.self_closing = true;
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            None => self.emit_tag_at_eof(),
            Some(_) => {
                self.parse_error(LexicalError::UnexpectedSolidusInTag);
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }
}

impl Iterator for HTMLTokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
