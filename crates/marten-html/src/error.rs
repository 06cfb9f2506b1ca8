//! Parse issues and fatal parse failures.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! Parse errors never stop the parser: they are recorded as [`ParseIssue`]s and
//! the algorithm's recovery steps run. The only way a parse ends early is a
//! [`ParseFailure`] from the depth guard.

use std::fmt;

use marten_common::SourcePosition;
use strum_macros::{Display, IntoStaticStr};
use thiserror::Error;

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// The tokenizer's error codes. `Display` renders the WHATWG code,
/// e.g. `unexpected-null-character`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum LexicalError {
    AbruptClosingOfEmptyComment,
    AbruptDoctypePublicIdentifier,
    AbruptDoctypeSystemIdentifier,
    AbsenceOfDigitsInNumericCharacterReference,
    CdataInHtmlContent,
    CharacterReferenceOutsideUnicodeRange,
    ControlCharacterReference,
    DuplicateAttribute,
    EndTagWithAttributes,
    EndTagWithTrailingSolidus,
    EofBeforeTagName,
    EofInCdata,
    EofInComment,
    EofInDoctype,
    EofInScriptHtmlCommentLikeText,
    EofInTag,
    IncorrectlyClosedComment,
    IncorrectlyOpenedComment,
    InvalidCharacterSequenceAfterDoctypeName,
    InvalidFirstCharacterOfTagName,
    MissingAttributeValue,
    MissingDoctypeName,
    MissingDoctypePublicIdentifier,
    MissingDoctypeSystemIdentifier,
    MissingEndTagName,
    MissingQuoteBeforeDoctypePublicIdentifier,
    MissingQuoteBeforeDoctypeSystemIdentifier,
    MissingSemicolonAfterCharacterReference,
    MissingWhitespaceAfterDoctypePublicKeyword,
    MissingWhitespaceAfterDoctypeSystemKeyword,
    MissingWhitespaceBeforeDoctypeName,
    MissingWhitespaceBetweenAttributes,
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    NestedComment,
    NoncharacterCharacterReference,
    NullCharacterReference,
    SurrogateCharacterReference,
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    UnexpectedCharacterInAttributeName,
    UnexpectedCharacterInUnquotedAttributeValue,
    UnexpectedEqualsSignBeforeAttributeName,
    UnexpectedNullCharacter,
    UnexpectedQuestionMarkInsteadOfTagName,
    UnexpectedSolidusInTag,
    UnknownNamedCharacterReference,
}

/// A recoverable problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human-readable description. Tokenizer issues use the WHATWG error
    /// code; tree-construction issues name the offending token and mode.
    pub message: String,
    /// Where in the decoded input the problem was noticed.
    pub position: SourcePosition,
}

impl ParseIssue {
    /// Create an issue at `position`.
    #[must_use]
    pub fn new(message: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

/// A condition that stops tree construction. The partial tree built so far is
/// still returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// The stack of open elements grew past the configured limit.
    #[error("elements nested deeper than {limit} levels")]
    NestingTooDeep {
        /// The configured `max_depth`.
        limit: usize,
    },
    /// The list of active formatting elements grew past the configured limit.
    #[error("more than {limit} active formatting elements")]
    FormattingListTooLong {
        /// The configured `max_depth`.
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_errors_render_as_whatwg_codes() {
        assert_eq!(
            LexicalError::UnexpectedNullCharacter.to_string(),
            "unexpected-null-character"
        );
        assert_eq!(LexicalError::EofInTag.to_string(), "eof-in-tag");
        assert_eq!(LexicalError::CdataInHtmlContent.to_string(), "cdata-in-html-content");
    }
}
