//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference parsing per § 13.2.5.72.
mod character_reference;
/// HTML tokenizer state machine implementation.
pub mod core;
/// Helper methods for tokenizer state transitions and emission.
mod helpers;
/// Comment, DOCTYPE and CDATA states.
mod markup;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Script data states per § 13.2.5.15 - 13.2.5.31.
mod script_data;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, TokenizerState};
pub use token::Token;

/// Tokenize `text` on its own, with the tokenizer choosing text content
/// models from start tags the way a tree builder usually would.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    HTMLTokenizer::from_text(text).self_driving().collect()
}
