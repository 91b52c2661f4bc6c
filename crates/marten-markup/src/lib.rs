//! Markup tokenizer for the marten parser.
//!
//! # Scope
//!
//! This crate implements the lexical half of the parser:
//! - **Tokenizer** - a character-at-a-time state machine that classifies raw
//!   markup into typed tokens: opening, closing, and auto-closing tags,
//!   text content, comments, bogus comments, and doctype declarations
//! - **Attribute scanning** - quoted, unquoted, and valueless attributes,
//!   with `class` values split into one entry per class token
//! - **Void-element reclassification** - `<br>` and `<img src="...">` become
//!   auto-closing tags even without an explicit `/>`
//! - **Diagnostics** - malformed constructs are reported, not fatal
//!
//! # Not Implemented
//!
//! This is a lenient scanner, not a conforming HTML5 tokenizer:
//! - No CDATA sections
//! - No raw-text handling for `<script>`/`<style>` bodies
//! - No character/entity reference decoding
//! - No browser-grade error recovery

/// Tokenizer state machine and token types.
pub mod tokenizer;

pub use tokenizer::{
    Attribute, AttributeList, Diagnostic, DiagnosticKind, Token, TokenKind, Tokenizer,
    TokenizerState, VOID_ELEMENTS, tokenize,
};
