//! The markup tokenizer.
//!
//! Converts a complete markup string into an ordered token stream plus an
//! ordered list of diagnostics for everything malformed along the way.

/// The tokenizer state machine.
pub mod core;
/// Non-fatal diagnostics for malformed markup.
pub mod diagnostics;
/// Cursor, transition, and commit helpers for the state machine.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{Tokenizer, TokenizerState};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use token::{Attribute, AttributeList, Token, TokenKind, VOID_ELEMENTS};

/// Tokenize `markup` in one call.
///
/// Returns the ordered token stream and the ordered diagnostics list. Empty
/// input yields empty lists; tokenization never fails.
#[must_use]
pub fn tokenize(markup: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut tokenizer = Tokenizer::new(markup);
    tokenizer.run();
    tokenizer.into_parts()
}
