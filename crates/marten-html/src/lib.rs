//! Browser-compatible HTML tokenizer and tree builder.
//!
//! # Scope
//!
//! This crate implements:
//! - **Input preprocessing** ([WHATWG § 13.2.3](https://html.spec.whatwg.org/multipage/parsing.html#the-input-byte-stream))
//!   - UTF-8 or windows-1252 decoding, newline normalization
//!
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Every tokenizer state, including script data and CDATA sections
//!   - Named and numeric character references
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - All 23 insertion modes and the foreign content rules
//!   - Adoption agency algorithm, foster parenting, template contents
//!   - Quirks mode classification from the DOCTYPE
//!
//! # Not Implemented
//!
//! - Script execution and `document.write()`
//! - Encoding sniffing (the caller says whether the input is UTF-8)
//! - Fragment parsing
//!
//! ```ignore
//! use marten_html::{ParseOptions, parse_str};
//!
//! let output = parse_str("<p>Hello<b>world", &ParseOptions::default());
//! println!("{}", output.document.to_test_format());
//! ```

/// Parse issues and fatal parse failures.
pub mod error;
/// Decoded input with newline normalization and positions.
pub mod input;
/// Parser configuration.
pub mod options;
/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use error::{LexicalError, ParseFailure, ParseIssue};
pub use input::InputStream;
pub use options::{DEFAULT_MAX_DEPTH, ParseOptions};
pub use parser::{HTMLParser, InsertionMode, ParseOutput, classify_doctype};
pub use tokenizer::{HTMLTokenizer, Token, tokenize};

/// Parse a complete document from raw bytes.
///
/// The bytes are decoded as UTF-8 when `options.is_utf8` is set and as
/// windows-1252 otherwise.
#[must_use]
pub fn parse_bytes(bytes: &[u8], options: &ParseOptions) -> ParseOutput {
    let input = InputStream::from_bytes(bytes, options.is_utf8);
    HTMLParser::new(HTMLTokenizer::new(input), options).run()
}

/// Parse a complete document from already-decoded text.
#[must_use]
pub fn parse_str(text: &str, options: &ParseOptions) -> ParseOutput {
    HTMLParser::new(HTMLTokenizer::from_text(text), options).run()
}
